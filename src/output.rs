//! CLI output formatting for both pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary line
//! for every entry is its semantic identity — title, kind, dates — with
//! the source file as secondary context on an indented `Source:` line.
//! The scan report doubles as a content inventory; the generate report
//! maps each entry to the file it became.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Projects
//! 001 Mandelbrot [personal] [featured]
//!     Source: projects/mandelbrot.md
//!
//! Posts
//! 001 Strange Attractors (March 1, 2024, updated April 11, 2024)
//!     Source: blog/strange-attractors.md
//!     Warning: updated 2023-12-31 precedes published 2024-01-01
//!
//! Pages
//! 001 About
//!     Source: about.md
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Projects → projects/index.html (4 projects)
//! Blog → blog/index.html (2 posts)
//! 001 Hello World → blog/hello-world/index.html
//! Pages
//! 001 About → about/index.html
//! Redirects: 1
//! Generated 8 pages
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::scan::{BLOG_DIR, Manifest, PROJECTS_DIR};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

const INDENT: &str = "    ";

pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();

    if !manifest.projects.is_empty() {
        lines.push("Projects".to_string());
        for (pos, (slug, project)) in manifest.projects.iter().enumerate() {
            let mut header = format!(
                "{} {} [{}]",
                format_index(pos + 1),
                project.title,
                project.kind.label()
            );
            if project.featured {
                header.push_str(" [featured]");
            }
            lines.push(header);
            lines.push(format!("{INDENT}Source: {PROJECTS_DIR}/{slug}.md"));
        }
        lines.push(String::new());
    }

    if !manifest.posts.is_empty() {
        lines.push("Posts".to_string());
        for (pos, (slug, post)) in manifest.posts_by_date().iter().enumerate() {
            let mut header = format!(
                "{} {} ({}",
                format_index(pos + 1),
                post.title,
                post.published.format("%B %-d, %Y")
            );
            if post.updated != post.published {
                header.push_str(&format!(", updated {}", post.updated.format("%B %-d, %Y")));
            }
            header.push(')');
            lines.push(header);
            lines.push(format!("{INDENT}Source: {BLOG_DIR}/{slug}.md"));
            if post.dates_inverted() {
                lines.push(format!(
                    "{INDENT}Warning: updated {} precedes published {}",
                    post.updated, post.published
                ));
            }
        }
        lines.push(String::new());
    }

    if !manifest.pages.is_empty() {
        lines.push("Pages".to_string());
        for (pos, (slug, page)) in manifest.pages.iter().enumerate() {
            lines.push(format!("{} {}", format_index(pos + 1), page.title));
            lines.push(format!("{INDENT}Source: {slug}.md"));
        }
        lines.push(String::new());
    }

    lines.push(format!(
        "Scanned {} projects, {} posts, {} pages",
        manifest.projects.len(),
        manifest.posts.len(),
        manifest.pages.len()
    ));
    lines
}

pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{line}");
    }
}

pub fn format_generate_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec![
        "Home → index.html".to_string(),
        format!(
            "Projects → projects/index.html ({} projects)",
            manifest.projects.len()
        ),
        format!("Blog → blog/index.html ({} posts)", manifest.posts.len()),
    ];

    for (pos, (slug, post)) in manifest.posts_by_date().iter().enumerate() {
        lines.push(format!(
            "{} {} → blog/{}/index.html",
            format_index(pos + 1),
            post.title,
            slug
        ));
    }

    if !manifest.pages.is_empty() {
        lines.push("Pages".to_string());
        for (pos, (slug, page)) in manifest.pages.iter().enumerate() {
            lines.push(format!(
                "{} {} → {}/index.html",
                format_index(pos + 1),
                page.title,
                slug
            ));
        }
    }

    if !manifest.config.redirects.is_empty() {
        lines.push(format!("Redirects: {}", manifest.config.redirects.len()));
    }

    // index + projects + blog + 404, plus one per post and page
    let total = 4 + manifest.posts.len() + manifest.pages.len();
    lines.push(format!("Generated {total} pages"));
    lines
}

pub fn print_generate_output(manifest: &Manifest) {
    for line in format_generate_output(manifest) {
        println!("{line}");
    }
}
