//! HTML page generation through the site's templates.
//!
//! Templates are loaded by name from `[build].templates`. Every render gets
//! the same shared record (site, links, badges, labels, unfurl card, ...)
//! flattened together with the fields specific to the kind of page:
//!
//! | Page          | Output                         | Extra fields                         |
//! |---------------|--------------------------------|--------------------------------------|
//! | Document      | `<link>/index.html`            | `post`, `content`, `tags`, neighbors |
//! | Index         | `index.html`                   | `posts`                              |
//! | Tags index    | `tags/index.html`              | `tags`                               |
//! | Tag           | `tags/<name>/index.html`       | `tag`, `posts`                       |
//! | Static page   | `<link>/index.html`            | `page`                               |
//! | Search        | `<search.dir>/index.html`      | `search`                             |

use super::Site;
use crate::{
    config::{SearchSection, SiteConfig, SiteSection},
    log,
    site::{
        Document, ResolvedPage, SiteLinks, Tag, TagEntry,
        links::{INDEX_FILE, TAGS_DIR},
    },
};
use anyhow::{Context, Result};
use minijinja::{AutoEscape, Environment, Output, State, Value, escape_formatter, path_loader};
use serde::Serialize;
use std::{collections::BTreeMap, fmt::Write, path::Path};

/// Render and write every HTML page.
pub fn build_pages(site: &Site<'_>) -> Result<()> {
    let renderer = Renderer::new(site)?;

    renderer.render_documents()?;
    renderer.render_index()?;
    renderer.render_tags()?;
    renderer.render_static_pages()?;
    if site.config.search.enabled {
        renderer.render_search()?;
    }
    Ok(())
}

// ============================================================================
// Template data
// ============================================================================

/// Fields every page receives.
#[derive(Serialize)]
struct Shared<'a> {
    site: &'a SiteSection,
    config: &'a SiteConfig,
    links: &'a SiteLinks,
    badges: &'a BTreeMap<String, Value>,
    version: &'static str,
    now: &'a str,
    layout: &'a str,
    labels: Labels<'a>,
    unfurl: Unfurl<'a>,
    canonical: &'a str,
}

#[derive(Serialize)]
struct Labels<'a> {
    title: &'a str,
    back: &'a str,
}

/// Social card metadata.
#[derive(Serialize)]
struct Unfurl<'a> {
    title: &'a str,
    url: &'a str,
    author: &'a str,
    description: &'a str,
    site_name: &'a str,
    image: &'a str,
    tags: Vec<&'a str>,
    locale: &'a str,
}

/// Shared fields flattened with one kind of page's own fields.
#[derive(Serialize)]
struct PageContext<'a, P: Serialize> {
    #[serde(flatten)]
    shared: Shared<'a>,
    #[serde(flatten)]
    page: P,
}

#[derive(Serialize)]
struct DocumentPage<'a> {
    post: &'a Document,
    content: Value,
    tags: &'a [Tag],
    previous: Option<&'a Document>,
    next: Option<&'a Document>,
    related: Vec<&'a Document>,
}

#[derive(Serialize)]
struct IndexPage<'a> {
    posts: &'a [Document],
}

#[derive(Serialize)]
struct TagSummary<'a> {
    name: &'a str,
    url: &'a str,
    count: usize,
    posts: Vec<&'a Document>,
}

#[derive(Serialize)]
struct TagsIndexPage<'a> {
    tags: Vec<TagSummary<'a>>,
}

#[derive(Serialize)]
struct TagPage<'a> {
    tag: &'a Tag,
    posts: Vec<&'a Document>,
}

#[derive(Serialize)]
struct StaticPageData<'a> {
    page: &'a ResolvedPage,
}

#[derive(Serialize)]
struct SearchPage<'a> {
    search: &'a SearchSection,
}

/// What a page's shared record is derived from.
struct Meta<'a> {
    title: &'a str,
    url: &'a str,
    description: &'a str,
    author: &'a str,
    image: &'a str,
    tags: Vec<&'a str>,
}

// ============================================================================
// Renderer
// ============================================================================

struct Renderer<'s, 'g> {
    site: &'s Site<'g>,
    env: Environment<'static>,
    badges: BTreeMap<String, Value>,
    now: String,
}

impl<'s, 'g> Renderer<'s, 'g> {
    /// Set up the template environment; the shared layout must exist.
    fn new(site: &'s Site<'g>) -> Result<Self> {
        let templates = &site.config.templates;
        let dir = &site.config.build.templates;

        let mut env = Environment::new();
        env.set_loader(path_loader(dir));
        env.set_formatter(html_formatter);
        env.get_template(&templates.shared).with_context(|| {
            format!(
                "Failed to load shared layout `{}` from {}",
                templates.shared,
                dir.display()
            )
        })?;

        let badges = site
            .badges
            .iter()
            .map(|(name, markup)| (name.clone(), Value::from_safe_string(markup.clone())))
            .collect();

        Ok(Self {
            site,
            env,
            badges,
            now: site.time.human(),
        })
    }

    fn shared<'a>(&'a self, label: &'a str, meta: Meta<'a>) -> Shared<'a> {
        let config = self.site.config;
        Shared {
            site: &config.site,
            config,
            links: &self.site.links,
            badges: &self.badges,
            version: env!("CARGO_PKG_VERSION"),
            now: &self.now,
            layout: &config.templates.shared,
            labels: Labels {
                title: label,
                back: &config.site.back_label,
            },
            unfurl: Unfurl {
                title: meta.title,
                url: meta.url,
                author: meta.author,
                description: meta.description,
                site_name: &config.site.title,
                image: meta.image,
                tags: meta.tags,
                locale: &config.site.locale,
            },
            canonical: meta.url,
        }
    }

    /// Defaults for pages that describe the blog as a whole.
    fn site_meta<'a>(&'a self, title: &'a str, url: &'a str) -> Meta<'a> {
        let site = &self.site.config.site;
        Meta {
            title,
            url,
            description: &site.description,
            author: &site.author,
            image: "",
            tags: Vec::new(),
        }
    }

    fn render<P: Serialize>(
        &self,
        template: &str,
        shared: Shared<'_>,
        page: P,
        rel: impl AsRef<Path>,
    ) -> Result<()> {
        let html = self
            .env
            .get_template(template)
            .and_then(|tmpl| tmpl.render(PageContext { shared, page }))
            .with_context(|| format!("Failed to render template `{template}`"))?;

        self.site.write_html(rel, &html)?;
        Ok(())
    }

    fn render_documents(&self) -> Result<()> {
        let graph = self.site.graph;
        for doc in &graph.documents {
            let meta = Meta {
                title: &doc.title,
                url: &doc.url,
                description: &doc.description,
                author: &doc.author,
                image: &doc.image,
                tags: doc.tag_names(),
            };
            let page = DocumentPage {
                post: doc,
                content: Value::from_safe_string(doc.content.clone()),
                tags: &doc.tags,
                previous: graph.previous(doc),
                next: graph.next(doc),
                related: graph.related(doc).collect(),
            };

            self.render(
                &doc.template,
                self.shared(&doc.title, meta),
                page,
                Path::new(&doc.link).join(INDEX_FILE),
            )
            .with_context(|| format!("Failed to publish {}", doc.source.display()))?;

            log!("post"; "\"{}\" by {}", doc.link, doc.author);
        }
        Ok(())
    }

    fn render_index(&self) -> Result<()> {
        let site = &self.site.config.site;
        let meta = self.site_meta(&site.title, &self.site.links.home);
        let page = IndexPage {
            posts: &self.site.graph.documents,
        };

        self.render(
            &self.site.config.templates.index,
            self.shared(&site.title, meta),
            page,
            INDEX_FILE,
        )?;

        log!("index"; "{} posts", self.site.graph.documents.len());
        Ok(())
    }

    fn render_tags(&self) -> Result<()> {
        let graph = self.site.graph;
        let templates = &self.site.config.templates;

        let summaries = graph
            .tags
            .values()
            .map(|entry| TagSummary {
                name: &entry.tag.name,
                url: &entry.tag.url,
                count: entry.documents.len(),
                posts: graph.tag_documents(entry).collect(),
            })
            .collect();
        let meta = self.site_meta("Tags", &self.site.links.tags);
        self.render(
            &templates.tags_index,
            self.shared("Tags", meta),
            TagsIndexPage { tags: summaries },
            Path::new(TAGS_DIR).join(INDEX_FILE),
        )?;

        for entry in graph.tags.values() {
            self.render_tag(entry)?;
        }

        log!("tags"; "{} tags", graph.tags.len());
        Ok(())
    }

    fn render_tag(&self, entry: &TagEntry) -> Result<()> {
        let graph = self.site.graph;
        let label = format!("#{}", entry.tag.name);
        let meta = Meta {
            tags: vec![entry.tag.name.as_str()],
            ..self.site_meta(&label, &entry.tag.url)
        };
        let page = TagPage {
            tag: &entry.tag,
            posts: graph.tag_documents(entry).collect(),
        };

        self.render(
            &self.site.config.templates.tag_page,
            self.shared(&label, meta),
            page,
            Path::new(TAGS_DIR).join(&entry.tag.name).join(INDEX_FILE),
        )
    }

    fn render_static_pages(&self) -> Result<()> {
        for resolved in &self.site.graph.pages {
            let page = &resolved.page;
            let meta = self.site_meta(&page.title, &resolved.url);

            self.render(
                &page.template,
                self.shared(&page.title, meta),
                StaticPageData { page: resolved },
                Path::new(&page.link).join(INDEX_FILE),
            )?;

            log!("page"; "{}", page.link);
        }
        Ok(())
    }

    fn render_search(&self) -> Result<()> {
        let config = self.site.config;
        let url = self.site.resolver.page(&config.search.dir);
        let meta = self.site_meta("Search", &url);

        self.render(
            &config.templates.search,
            self.shared("Search", meta),
            SearchPage {
                search: &config.search,
            },
            Path::new(&config.search.dir).join(INDEX_FILE),
        )?;

        log!("search"; "{}/index.html", config.search.dir);
        Ok(())
    }
}

/// Escape markup-significant characters in HTML templates, leaving URLs
/// readable (`/` stays as is).
fn html_formatter(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> Result<(), minijinja::Error> {
    match (value.as_str(), state.auto_escape()) {
        (Some(text), AutoEscape::Html) if !value.is_safe() => {
            out.write_str(&quick_xml::escape::escape(text))?;
            Ok(())
        }
        _ => escape_formatter(out, state, value),
    }
}
