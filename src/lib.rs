//! # Folio
//!
//! A minimal static site generator for personal portfolio and blog sites.
//! Your filesystem is the data source: markdown files with validated
//! frontmatter become projects and posts, root-level markdown files become
//! standalone pages, and a single `config.toml` styles the result.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! Folio processes content through two independent stages, with a JSON
//! manifest between them:
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (markdown + config → validated data)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: the manifest is human-readable JSON you can inspect.
//! - **Fail-fast validation**: every content problem surfaces in the scan,
//!   before a single output file is written.
//! - **Testability**: generation is a pure function of the manifest, so
//!   rendering tests never depend on live content.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — loads collections, standalone pages, and config into the manifest |
//! | [`generate`] | Stage 2 — renders the final HTML site from the manifest using Maud |
//! | [`content`] | Collection schemas (`ProjectEntry`, `BlogEntry`) and the frontmatter-validating loader |
//! | [`frontmatter`] | `---`-fenced YAML block splitter used by the loader |
//! | [`config`] | `config.toml` loading, validation, and palette CSS generation |
//! | [`prefs`] | Preference-store abstraction: browser storage seam, in-memory and unavailable impls |
//! | [`theme`] | Two-variant theme machine (latte/mocha) over the preference store |
//! | [`privacy`] | One-shot privacy-notice acknowledgement machine |
//! | [`output`] | CLI output formatting — content inventory and generation report |
//!
//! # Design Decisions
//!
//! ## Schema-First Content
//!
//! Collection frontmatter deserializes directly into the entry structs with
//! unknown keys rejected. A file that fails the schema fails the build,
//! naming the file: a portfolio that silently drops a mistyped project is
//! worse than one that refuses to build.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera. Malformed HTML is a
//! build error, template variables are Rust expressions, all interpolation
//! is auto-escaped, and there is no template directory to ship or get out
//! of sync.
//!
//! ## Preference Machines Run Twice
//!
//! Theme selection and the privacy notice are modeled as small state
//! machines over an injectable [`prefs::PreferenceStore`]. The generator
//! runs them at build time against the unavailable store (no visitor
//! storage exists yet) to decide the markup defaults, and ships a few
//! lines of vanilla JavaScript that replay the same transitions against
//! the browser's real storage. The Rust machines are the canonical,
//! tested model.
//!
//! # The "Forever Stack"
//!
//! The output is plain HTML, established CSS, and a small block of vanilla
//! JavaScript, all inlined. The generated site can be dropped on any file
//! server — no Node, no PHP, no database. If a browser can render HTML, it
//! can display your portfolio.

pub mod config;
pub mod content;
pub mod frontmatter;
pub mod generate;
pub mod output;
pub mod prefs;
pub mod privacy;
pub mod scan;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_helpers;
