//! Shared test utilities for the folio test suite.
//!
//! Provides fixture setup and lookup helpers over the scan-phase
//! [`Manifest`].
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let project = find_project(&manifest, "mandelbrot");
//! assert!(project.featured);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::content::{BlogEntry, ProjectEntry};
use crate::scan::{Manifest, PageEntry};

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other
/// tests or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Manifest lookups — panics with a clear message on miss
// =========================================================================

/// Find a project by slug. Panics if not found.
pub fn find_project<'a>(manifest: &'a Manifest, slug: &str) -> &'a ProjectEntry {
    manifest.projects.get(slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = manifest.projects.keys().map(String::as_str).collect();
        panic!("project '{slug}' not found. Available: {slugs:?}")
    })
}

/// Find a post by slug. Panics if not found.
pub fn find_post<'a>(manifest: &'a Manifest, slug: &str) -> &'a BlogEntry {
    manifest.posts.get(slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = manifest.posts.keys().map(String::as_str).collect();
        panic!("post '{slug}' not found. Available: {slugs:?}")
    })
}

/// Find a standalone page by slug. Panics if not found.
pub fn find_page<'a>(manifest: &'a Manifest, slug: &str) -> &'a PageEntry {
    manifest.pages.get(slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = manifest.pages.keys().map(String::as_str).collect();
        panic!("page '{slug}' not found. Available: {slugs:?}")
    })
}
