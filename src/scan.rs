//! Content scanning and manifest generation.
//!
//! Stage 1 of the folio build pipeline. Reads the content directory into a
//! validated [`Manifest`] that the generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── assets/                      # Static assets, copied verbatim
//! ├── about.md                     # Standalone page (root-level markdown)
//! ├── resume.md
//! ├── contact.md
//! ├── privacy-policy.md
//! ├── projects/                    # Portfolio collection
//! │   ├── mandelbrot.md            # Frontmatter-validated entry
//! │   └── wit-it.md
//! └── blog/                        # Post collection
//!     ├── hello-world.md
//!     └── 2024/retrospective.md    # Nested files get path slugs
//! ```
//!
//! ## Validation
//!
//! Scanning is where content problems surface: a collection file with
//! missing, mistyped, or unknown frontmatter fields fails the scan with an
//! error naming the file. Standalone pages carry no frontmatter — their
//! title comes from the first `#` heading.
//!
//! ## Output
//!
//! Produces a [`Manifest`]: both collections keyed by slug, the standalone
//! pages, and the site config. Serialized as pretty JSON between stages so
//! intermediate state is inspectable.

use crate::config::{self, ConfigError, SiteConfig};
use crate::content::{self, BlogEntry, ContentError, ProjectEntry, ProjectKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Collection directory names under the content root.
pub const PROJECTS_DIR: &str = "projects";
pub const BLOG_DIR: &str = "blog";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub projects: BTreeMap<String, ProjectEntry>,
    pub posts: BTreeMap<String, BlogEntry>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pages: BTreeMap<String, PageEntry>,
    pub config: SiteConfig,
}

/// A standalone page from a root-level markdown file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEntry {
    /// Title from the first `# heading`, or the slug with dashes as spaces.
    pub title: String,
    /// Raw markdown body.
    pub body: String,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let projects = content::load_projects(&root.join(PROJECTS_DIR))?;
    let posts = content::load_blog(&root.join(BLOG_DIR))?;
    let pages = parse_pages(root)?;
    let config = config::load_config(root)?;

    Ok(Manifest {
        projects,
        posts,
        pages,
        config,
    })
}

/// Parse root-level markdown files into standalone pages.
///
/// Only the content root is considered — collection directories have their
/// own schemas. Pages need no frontmatter: the slug is the file stem and
/// the title falls out of the document itself.
fn parse_pages(root: &Path) -> Result<BTreeMap<String, PageEntry>, ScanError> {
    let mut pages = BTreeMap::new();
    let mut md_files: Vec<_> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
        })
        .collect();
    md_files.sort();

    for path in md_files {
        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let body = fs::read_to_string(&path)?;
        let title = body
            .lines()
            .find_map(|line| line.strip_prefix("# "))
            .map(|heading| heading.trim().to_string())
            .filter(|heading| !heading.is_empty())
            .unwrap_or_else(|| slug.replace('-', " "));

        pages.insert(slug, PageEntry { title, body });
    }
    Ok(pages)
}

impl Manifest {
    /// Featured projects, slug order.
    pub fn featured_projects(&self) -> Vec<(&str, &ProjectEntry)> {
        self.projects
            .iter()
            .filter(|(_, p)| p.featured)
            .map(|(slug, p)| (slug.as_str(), p))
            .collect()
    }

    /// Projects of one kind, slug order.
    pub fn projects_of(&self, kind: ProjectKind) -> Vec<(&str, &ProjectEntry)> {
        self.projects
            .iter()
            .filter(|(_, p)| p.kind == kind)
            .map(|(slug, p)| (slug.as_str(), p))
            .collect()
    }

    /// Posts newest-first by published date, slug as tie-break.
    pub fn posts_by_date(&self) -> Vec<(&str, &BlogEntry)> {
        let mut posts: Vec<_> = self
            .posts
            .iter()
            .map(|(slug, p)| (slug.as_str(), p))
            .collect();
        posts.sort_by(|(a_slug, a), (b_slug, b)| {
            b.published.cmp(&a.published).then(a_slug.cmp(b_slug))
        });
        posts
    }

    pub fn page(&self, slug: &str) -> Option<&PageEntry> {
        self.pages.get(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scan_finds_both_collections() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        assert_eq!(manifest.projects.len(), 4);
        assert_eq!(manifest.posts.len(), 2);
    }

    #[test]
    fn scan_finds_standalone_pages() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        let about = find_page(&manifest, "about");
        assert_eq!(about.title, "About");
        assert!(manifest.page("privacy-policy").is_some());
        assert!(manifest.page("contact").is_some());
    }

    #[test]
    fn page_title_falls_back_to_slug() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("now-playing.md"), "No heading here.\n").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(find_page(&manifest, "now-playing").title, "now playing");
    }

    #[test]
    fn collection_files_are_not_pages() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        assert!(manifest.page("mandelbrot").is_none());
        assert!(manifest.page("hello-world").is_none());
    }

    #[test]
    fn config_loaded_from_content_root() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        assert_eq!(manifest.config.title, "folio demo");
        assert!(manifest.config.base_url.is_some());
    }

    #[test]
    fn default_config_when_no_toml() {
        let tmp = TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();

        assert_eq!(manifest.config.title, "folio");
        assert_eq!(manifest.config.colors.latte.background, "#eff1f5");
    }

    #[test]
    fn empty_root_scans_to_empty_manifest() {
        let tmp = TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();

        assert!(manifest.projects.is_empty());
        assert!(manifest.posts.is_empty());
        assert!(manifest.pages.is_empty());
    }

    #[test]
    fn bad_collection_file_fails_the_scan() {
        let tmp = setup_fixtures();
        fs::write(
            tmp.path().join("projects/broken.md"),
            "---\ntitle: Broken\n---\n",
        )
        .unwrap();

        let err = scan(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("broken.md"));
    }

    // =========================================================================
    // Derived listings
    // =========================================================================

    #[test]
    fn featured_projects_filtered() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        let featured = manifest.featured_projects();
        assert!(!featured.is_empty());
        assert!(featured.iter().all(|(_, p)| p.featured));
        assert!(featured.iter().any(|(slug, _)| *slug == "mandelbrot"));
    }

    #[test]
    fn projects_partitioned_by_kind() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        let work = manifest.projects_of(ProjectKind::Work);
        let personal = manifest.projects_of(ProjectKind::Personal);
        assert_eq!(work.len() + personal.len(), manifest.projects.len());
        assert!(work.iter().all(|(_, p)| p.kind == ProjectKind::Work));
    }

    #[test]
    fn posts_sorted_newest_first() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        let posts = manifest.posts_by_date();
        for pair in posts.windows(2) {
            assert!(pair[0].1.published >= pair[1].1.published);
        }
        assert_eq!(posts[0].0, "strange-attractors");
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        let json = serde_json::to_string_pretty(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.projects.len(), manifest.projects.len());
        assert_eq!(back.posts.len(), manifest.posts.len());
        assert_eq!(
            back.posts["hello-world"].published,
            manifest.posts["hello-world"].published
        );
        assert_eq!(back.config.title, manifest.config.title);
    }
}
