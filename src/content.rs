//! Content collections: schemas, validation, and loading.
//!
//! Two collections back the site, each a directory of markdown files with
//! YAML frontmatter:
//!
//! - `projects/` — portfolio entries ([`ProjectEntry`])
//! - `blog/` — posts ([`BlogEntry`])
//!
//! Loading walks a collection directory recursively, splits each file's
//! frontmatter, deserializes it against the collection schema, and keys
//! the entry by slug — the file's path relative to the collection root
//! with the `.md` extension stripped. Filesystem uniqueness of paths makes
//! slugs unique; no explicit duplicate check is needed.
//!
//! ## Validation
//!
//! A single malformed file fails the whole collection load with an error
//! naming it. A portfolio's integrity depends on every listed entry being
//! intentional, so nothing is ever silently dropped. Beyond the serde
//! schema (required fields, types, enum range, unknown-key rejection),
//! text fields that render as headings must be non-blank.
//!
//! Collections are read-only after load. There is no create/update/delete:
//! authoring happens on the filesystem, outside the running tool.

use crate::frontmatter::{self, FrontmatterError};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{path}: {source}")]
    Frontmatter {
        path: String,
        source: FrontmatterError,
    },
    #[error("invalid frontmatter in {path}: {source}")]
    Schema {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("invalid frontmatter in {path}: `{field}` must not be blank")]
    BlankField { path: String, field: &'static str },
}

/// Project category: client work or personal experiments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    Work,
    Personal,
}

impl ProjectKind {
    pub fn label(self) -> &'static str {
        match self {
            ProjectKind::Work => "work",
            ProjectKind::Personal => "personal",
        }
    }
}

/// A portfolio entry from `projects/*.md`.
///
/// The struct is the schema: frontmatter deserializes straight into it,
/// unknown keys rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectEntry {
    pub title: String,
    /// External URL, for projects that live somewhere visitable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Featured entries surface on the homepage.
    pub featured: bool,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ProjectKind,
}

/// A post from `blog/*.md`: validated frontmatter plus the markdown body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogEntry {
    pub title: String,
    pub description: String,
    /// First publication date (calendar date, no time component).
    pub published: NaiveDate,
    /// Last revision date. The schema does not cross-check it against
    /// `published`; see [`BlogEntry::dates_inverted`].
    pub updated: NaiveDate,
    /// Markdown body, rendered to HTML at generate time.
    #[serde(default)]
    pub body: String,
}

/// Frontmatter half of a post, before the body is attached.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BlogFront {
    title: String,
    description: String,
    published: NaiveDate,
    updated: NaiveDate,
}

impl BlogEntry {
    /// True when `updated` precedes `published`. Legal per the schema —
    /// date format is all it checks — but worth a warning in scan output.
    pub fn dates_inverted(&self) -> bool {
        self.updated < self.published
    }
}

/// Load the `projects` collection. A missing directory is an empty
/// collection, not an error — a site without client work yet is fine.
pub fn load_projects(dir: &Path) -> Result<BTreeMap<String, ProjectEntry>, ContentError> {
    let mut projects = BTreeMap::new();
    for (slug, display, raw) in read_collection(dir)? {
        let (entry, _body) = parse_entry::<ProjectEntry>(&display, &raw)?;
        require_non_blank(&display, "title", &entry.title)?;
        require_non_blank(&display, "description", &entry.description)?;
        projects.insert(slug, entry);
    }
    Ok(projects)
}

/// Load the `blog` collection.
pub fn load_blog(dir: &Path) -> Result<BTreeMap<String, BlogEntry>, ContentError> {
    let mut posts = BTreeMap::new();
    for (slug, display, raw) in read_collection(dir)? {
        let (front, body) = parse_entry::<BlogFront>(&display, &raw)?;
        require_non_blank(&display, "title", &front.title)?;
        require_non_blank(&display, "description", &front.description)?;
        posts.insert(
            slug,
            BlogEntry {
                title: front.title,
                description: front.description,
                published: front.published,
                updated: front.updated,
                body,
            },
        );
    }
    Ok(posts)
}

/// Collect `(slug, display path, raw contents)` for every markdown file
/// under `dir`, recursively, hidden entries skipped.
fn read_collection(dir: &Path) -> Result<Vec<(String, String, String)>, ContentError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
    {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || !path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
        {
            continue;
        }

        let rel = path.strip_prefix(dir).expect("walked under dir");
        let slug = rel
            .with_extension("")
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let display = path.display().to_string();
        let raw = fs::read_to_string(path)?;
        files.push((slug, display, raw));
    }
    Ok(files)
}

/// Split frontmatter and deserialize it against the schema `T`.
///
/// Returns the parsed frontmatter and the markdown body with leading blank
/// lines dropped.
fn parse_entry<T: DeserializeOwned>(display: &str, raw: &str) -> Result<(T, String), ContentError> {
    let (yaml, body) = frontmatter::split(raw).map_err(|source| ContentError::Frontmatter {
        path: display.to_string(),
        source,
    })?;
    let front = serde_yaml::from_str(yaml).map_err(|source| ContentError::Schema {
        path: display.to_string(),
        source,
    })?;
    Ok((front, body.trim_start_matches(['\n', '\r']).to_string()))
}

fn require_non_blank(display: &str, field: &'static str, value: &str) -> Result<(), ContentError> {
    if value.trim().is_empty() {
        return Err(ContentError::BlankField {
            path: display.to_string(),
            field,
        });
    }
    Ok(())
}
