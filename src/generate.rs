//! HTML site generation.
//!
//! Stage 2 of the folio build pipeline. Takes the scan manifest and
//! generates the final static site.
//!
//! ## Generated Pages
//!
//! - **Homepage** (`/index.html`): intro, featured projects, recent posts
//! - **Project listing** (`/projects/index.html`): all projects, grouped
//!   by kind (work / personal)
//! - **Blog index** (`/blog/index.html`): posts newest-first
//! - **Post pages** (`/blog/{slug}/index.html`): markdown body as HTML
//! - **Standalone pages** (`/{slug}/index.html`): about, resume, contact,
//!   privacy-policy — whatever root-level markdown the content has
//! - **404 page** (`404.html`)
//! - **Redirect stubs** for configured legacy paths
//! - **`sitemap.xml`** when a base URL is configured
//!
//! ## Pre-rendered Preference State
//!
//! The theme and privacy-notice machines run here, over the unavailable
//! store — at build time no visitor storage exists, which is exactly the
//! degraded context they are specified to tolerate. Their resolved states
//! (latte, notice shown) become the markup defaults; the few lines of
//! vanilla JavaScript shipped with every page replay the same transitions
//! against the browser's real storage.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping. Post and
//! page bodies go through pulldown-cmark. The stylesheet (palette custom
//! properties from config plus the static base) and the scripts are
//! inlined into every page — the output has no runtime asset pipeline,
//! only files a browser can take as-is.

use crate::config::{self, SiteConfig};
use crate::content::{BlogEntry, ProjectEntry, ProjectKind};
use crate::prefs::UnavailableStore;
use crate::privacy::PrivacyNotice;
use crate::scan::{Manifest, PageEntry};
use crate::theme::{DARK_MARKER, MarkerState, ThemeMachine};
use chrono::NaiveDate;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const SITE_JS: &str = include_str!("../static/site.js");

/// Applies the stored (or system) theme before first paint so a mocha
/// visitor never sees a latte flash. Same resolution order as the theme
/// machine: valid stored value, then the system signal.
const THEME_BOOT: &str = "\
(function () {
  var stored = null;
  try { stored = localStorage.getItem(\"theme\"); } catch (e) { }
  var dark = stored === \"mocha\" ||
    (stored !== \"latte\" && window.matchMedia(\"(prefers-color-scheme: dark)\").matches);
  document.documentElement.classList.toggle(\"mocha\", dark);
})();";

const NOT_FOUND_JS: &str =
    "document.querySelector(\"[data-request-path]\").textContent = window.location.pathname;";

pub fn generate(manifest_path: &Path, source: &Path, output_dir: &Path) -> Result<(), GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;

    let css = format!(
        "{}\n{}",
        config::generate_palette_css(&manifest.config.colors),
        CSS_STATIC
    );

    // Build time is a storage-less execution context: the machines resolve
    // their defaults over the unavailable store.
    let theme = ThemeMachine::initialize(UnavailableStore, MarkerState::default(), || false);
    let notice = PrivacyNotice::initialize(UnavailableStore);

    let site = Site {
        manifest: &manifest,
        css: &css,
        dark_default: theme.target().dark,
        notice_dismissed: notice.is_acknowledged(),
    };

    fs::create_dir_all(output_dir)?;

    write_page(output_dir, "index.html", site.render_index())?;
    write_page(output_dir, "projects/index.html", site.render_projects())?;
    write_page(output_dir, "blog/index.html", site.render_blog_index())?;
    for (slug, post) in &manifest.posts {
        write_page(
            output_dir,
            &format!("blog/{slug}/index.html"),
            site.render_post(post),
        )?;
    }
    for (slug, page) in &manifest.pages {
        write_page(
            output_dir,
            &format!("{slug}/index.html"),
            site.render_page(page),
        )?;
    }
    write_page(output_dir, "404.html", site.render_not_found())?;

    for (from, to) in &manifest.config.redirects {
        let rel = format!("{}/index.html", from.trim_matches('/'));
        write_page(output_dir, &rel, redirect_stub(to))?;
    }

    if let Some(base_url) = &manifest.config.base_url {
        fs::write(output_dir.join("sitemap.xml"), sitemap(&manifest, base_url))?;
    }

    let assets = source.join("assets");
    if assets.is_dir() {
        copy_dir_recursive(&assets, &output_dir.join("assets"))?;
    }

    Ok(())
}

fn write_page(output_dir: &Path, rel: &str, markup: Markup) -> Result<(), GenerateError> {
    let path = output_dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, markup.into_string())?;
    Ok(())
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Render context shared by every page of one build.
struct Site<'a> {
    manifest: &'a Manifest,
    css: &'a str,
    dark_default: bool,
    notice_dismissed: bool,
}

impl Site<'_> {
    fn config(&self) -> &SiteConfig {
        &self.manifest.config
    }

    /// Standalone pages that belong in the navigation. The privacy policy
    /// is footer-only.
    fn nav_pages(&self) -> impl Iterator<Item = (&String, &PageEntry)> {
        self.manifest
            .pages
            .iter()
            .filter(|(slug, _)| slug.as_str() != "privacy-policy")
    }

    /// Common document shell: head with inlined style and theme boot
    /// script, navbar, content, footer with the privacy dialog, site
    /// script.
    fn shell(&self, page_title: Option<&str>, content: Markup) -> Markup {
        let cfg = self.config();
        let title = match page_title {
            Some(t) => format!("{t} · {}", cfg.title),
            None => cfg.title.clone(),
        };
        html! {
            (DOCTYPE)
            html lang="en" class=[self.dark_default.then_some(DARK_MARKER)] {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    @if !cfg.description.is_empty() {
                        meta name="description" content=(cfg.description);
                    }
                    title { (title) }
                    style { (PreEscaped(self.css)) }
                    script { (PreEscaped(THEME_BOOT)) }
                }
                body {
                    (self.navbar())
                    main { (content) }
                    (self.footer())
                    script { (PreEscaped(SITE_JS)) }
                }
            }
        }
    }

    fn navbar(&self) -> Markup {
        html! {
            header .site-header {
                a .brand href="/" { (self.config().title) }
                nav aria-label="Site" {
                    a href="/projects/" { "Projects" }
                    a href="/blog/" { "Blog" }
                    @for (slug, page) in self.nav_pages() {
                        a href=(format!("/{slug}/")) { (page.title) }
                    }
                    button type="button" data-theme-toggle aria-label="Toggle theme" {
                        span .sun aria-hidden="true" { "☀" }
                        span .moon aria-hidden="true" { "☾" }
                    }
                }
            }
        }
    }

    fn footer(&self) -> Markup {
        let cfg = self.config();
        html! {
            footer .site-footer {
                div .footer-links {
                    a href="/" { "Home" }
                    a href="/projects/" { "Projects" }
                    a href="/blog/" { "Blog" }
                    @for (slug, page) in self.nav_pages() {
                        a href=(format!("/{slug}/")) { (page.title) }
                    }
                    @if let Some(url) = &cfg.social.github {
                        a href=(url) target="_blank" rel="noopener" { "GitHub" }
                    }
                    @if let Some(url) = &cfg.social.linkedin {
                        a href=(url) target="_blank" rel="noopener" { "LinkedIn" }
                    }
                    @if self.manifest.page("privacy-policy").is_some() {
                        a href="/privacy-policy/" { "Privacy Policy" }
                    }
                }
                @if !cfg.author.is_empty() {
                    p .colophon { "© " (cfg.author) }
                }
                (self.privacy_notice())
            }
        }
    }

    /// The first-visit dialog. Blocking, and acknowledgement is the only
    /// exit — there is deliberately no other close control in the markup.
    fn privacy_notice(&self) -> Markup {
        html! {
            div .privacy-notice data-privacy-notice hidden[self.notice_dismissed]
                role="dialog" aria-modal="true" aria-labelledby="privacy-notice-title" {
                div .privacy-panel {
                    h2 #privacy-notice-title { "Privacy Notice" }
                    p {
                        "This site sets no cookies, loads no third-party scripts, and "
                        "logs only the bare minimum. Details in the "
                        a href="/privacy-policy/" { "privacy policy" }
                        "."
                    }
                    button type="button" data-privacy-ack { "That seems reasonable" }
                }
            }
        }
    }

    fn project_card(&self, project: &ProjectEntry) -> Markup {
        html! {
            article .project-card {
                h3 {
                    @if let Some(link) = &project.link {
                        a href=(link) { (project.title) }
                    } @else {
                        (project.title)
                    }
                }
                p .kind { (project.kind.label()) }
                p { (project.description) }
            }
        }
    }

    fn render_index(&self) -> Markup {
        let cfg = self.config();
        let featured = self.manifest.featured_projects();
        let recent: Vec<_> = self.manifest.posts_by_date().into_iter().take(3).collect();
        self.shell(
            None,
            html! {
                section .hero {
                    h1 { (cfg.title) }
                    @if !cfg.description.is_empty() { p { (cfg.description) } }
                }
                @if !featured.is_empty() {
                    section {
                        h2 { "Featured Work" }
                        div .project-grid {
                            @for (_, project) in &featured { (self.project_card(project)) }
                        }
                    }
                }
                @if !recent.is_empty() {
                    section {
                        h2 { "Recent Posts" }
                        ul .post-list {
                            @for (slug, post) in &recent { (post_item(slug, post)) }
                        }
                    }
                }
            },
        )
    }

    fn render_projects(&self) -> Markup {
        self.shell(
            Some("Projects"),
            html! {
                h1 { "Projects" }
                @for (kind, heading) in [(ProjectKind::Work, "Work"), (ProjectKind::Personal, "Personal")] {
                    @let group = self.manifest.projects_of(kind);
                    @if !group.is_empty() {
                        section {
                            h2 { (heading) }
                            div .project-grid {
                                @for (_, project) in &group { (self.project_card(project)) }
                            }
                        }
                    }
                }
            },
        )
    }

    fn render_blog_index(&self) -> Markup {
        self.shell(
            Some("Blog"),
            html! {
                h1 { "Blog" }
                ul .post-list {
                    @for (slug, post) in self.manifest.posts_by_date() { (post_item(slug, post)) }
                }
            },
        )
    }

    fn render_post(&self, post: &BlogEntry) -> Markup {
        self.shell(
            Some(&post.title),
            html! {
                article .post {
                    header {
                        h1 { (post.title) }
                        p .dates {
                            time datetime=(post.published.to_string()) { (display_date(post.published)) }
                            @if post.updated != post.published {
                                " · updated "
                                time datetime=(post.updated.to_string()) { (display_date(post.updated)) }
                            }
                        }
                    }
                    (markdown_to_html(&post.body))
                }
            },
        )
    }

    fn render_page(&self, page: &PageEntry) -> Markup {
        self.shell(
            Some(&page.title),
            html! {
                article .page { (markdown_to_html(&page.body)) }
            },
        )
    }

    fn render_not_found(&self) -> Markup {
        self.shell(
            Some("Not Found"),
            html! {
                section .not-found {
                    h1 { "Page not found" }
                    p { "There is nothing at " code data-request-path { "this address" } "." }
                    p { a href="/" { "Back to the homepage" } }
                    script { (PreEscaped(NOT_FOUND_JS)) }
                }
            },
        )
    }
}

fn post_item(slug: &str, post: &BlogEntry) -> Markup {
    html! {
        li {
            a href=(format!("/blog/{slug}/")) { (post.title) }
            " "
            time .muted datetime=(post.published.to_string()) { (display_date(post.published)) }
            p { (post.description) }
        }
    }
}

fn display_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn markdown_to_html(markdown: &str) -> Markup {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}

/// Stub page for a configured legacy path: instant meta refresh plus a
/// plain link for anything that ignores it.
fn redirect_stub(to: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta http-equiv="refresh" content=(format!("0; url={to}"));
                link rel="canonical" href=(to);
                title { "Redirecting" }
            }
            body {
                p { "This page has moved to " a href=(to) { (to) } "." }
            }
        }
    }
}

fn sitemap(manifest: &Manifest, base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    let mut push = |path: &str, lastmod: Option<NaiveDate>| {
        xml.push_str("  <url><loc>");
        xml.push_str(base);
        xml.push_str(path);
        xml.push_str("</loc>");
        if let Some(date) = lastmod {
            xml.push_str(&format!("<lastmod>{date}</lastmod>"));
        }
        xml.push_str("</url>\n");
    };
    push("/", None);
    push("/projects/", None);
    push("/blog/", None);
    for slug in manifest.pages.keys() {
        push(&format!("/{slug}/"), None);
    }
    for (slug, post) in &manifest.posts {
        push(&format!("/blog/{slug}/"), Some(post.updated));
    }
    xml.push_str("</urlset>\n");
    xml
}
