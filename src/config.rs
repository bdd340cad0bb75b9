//! Site configuration module.
//!
//! Handles loading and validating `config.toml` from the content root.
//! Configuration is sparse: stock defaults cover everything, and a user
//! file overrides just the values it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "folio"                  # Site title, also the navbar brand
//! author = ""                      # Shown in the footer copyright line
//! description = ""                 # Homepage intro and meta description
//! # base_url = "https://..."       # Absolute site URL; enables sitemap.xml
//!
//! [social]
//! # github = "https://github.com/you"        # Footer links, shown when set
//! # linkedin = "https://linkedin.com/in/you"
//!
//! [colors.latte]                   # Light palette (Catppuccin latte)
//! background = "#eff1f5"
//! surface = "#e6e9ef"
//! text = "#4c4f69"
//! text_muted = "#6c6f85"
//! border = "#bcc0cc"
//! accent = "#7287fd"
//!
//! [colors.mocha]                   # Dark palette (Catppuccin mocha)
//! background = "#1e1e2e"
//! surface = "#181825"
//! text = "#cdd6f4"
//! text_muted = "#a6adc8"
//! border = "#45475a"
//! accent = "#b4befe"
//!
//! [redirects]                      # Legacy path -> target, one stub page each
//! # "/work/old-slug" = "/"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! # Only override the dark background
//! [colors.mocha]
//! background = "#11111b"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title; doubles as the navbar brand text.
    pub title: String,
    /// Author name for the footer copyright line.
    pub author: String,
    /// Short site description, used on the homepage and as meta description.
    pub description: String,
    /// Absolute site URL (e.g. `https://example.com`). When set, a
    /// `sitemap.xml` is generated against it.
    pub base_url: Option<String>,
    /// External profile links rendered in the footer.
    pub social: SocialConfig,
    /// Color palettes for the two theme variants.
    pub colors: PaletteConfig,
    /// Legacy path → target path. Each entry becomes a redirect stub page.
    pub redirects: BTreeMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "folio".to_string(),
            author: String::new(),
            description: String::new(),
            base_url: None,
            social: SocialConfig::default(),
            colors: PaletteConfig::default(),
            redirects: BTreeMap::new(),
        }
    }
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if let Some(url) = &self.base_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(ConfigError::Validation(
                "base_url must start with http:// or https://".into(),
            ));
        }
        for (variant, palette) in [("latte", &self.colors.latte), ("mocha", &self.colors.mocha)] {
            for (name, value) in palette.entries() {
                if !is_css_color(value) {
                    return Err(ConfigError::Validation(format!(
                        "colors.{variant}.{name} must be a hex color, got {value:?}"
                    )));
                }
            }
        }
        for (from, to) in &self.redirects {
            if !from.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "redirect source {from:?} must start with /"
                )));
            }
            if to.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "redirect target for {from:?} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

/// External profile links, rendered in the footer when set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SocialConfig {
    pub github: Option<String>,
    pub linkedin: Option<String>,
}

/// Color palettes for the two theme variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    pub latte: Palette,
    pub mocha: Palette,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            latte: Palette::latte(),
            mocha: Palette::mocha(),
        }
    }
}

/// One theme variant's colors, emitted as CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub background: String,
    /// Cards, navbar, dialog panels.
    pub surface: String,
    pub text: String,
    /// Dates, captions, secondary text.
    pub text_muted: String,
    pub border: String,
    /// Links and the acknowledge button.
    pub accent: String,
}

impl Default for Palette {
    fn default() -> Self {
        Palette::latte()
    }
}

impl Palette {
    /// Stock light palette (Catppuccin latte).
    fn latte() -> Self {
        Self {
            background: "#eff1f5".into(),
            surface: "#e6e9ef".into(),
            text: "#4c4f69".into(),
            text_muted: "#6c6f85".into(),
            border: "#bcc0cc".into(),
            accent: "#7287fd".into(),
        }
    }

    /// Stock dark palette (Catppuccin mocha).
    fn mocha() -> Self {
        Self {
            background: "#1e1e2e".into(),
            surface: "#181825".into(),
            text: "#cdd6f4".into(),
            text_muted: "#a6adc8".into(),
            border: "#45475a".into(),
            accent: "#b4befe".into(),
        }
    }

    /// Field name/value pairs, in emission order.
    fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("background", &self.background),
            ("surface", &self.surface),
            ("text", &self.text),
            ("text_muted", &self.text_muted),
            ("border", &self.border),
            ("accent", &self.accent),
        ]
    }
}

fn is_css_color(value: &str) -> bool {
    let Some(hex) = value.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from the content root.
///
/// Merges user values on top of stock defaults, rejects unknown keys, and
/// validates the result. A missing file is the stock config.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join("config.toml");
    let merged = if path.exists() {
        let content = fs::read_to_string(&path)?;
        let overlay: toml::Value = toml::from_str(&content)?;
        merge_toml(stock_defaults_value(), overlay)
    } else {
        stock_defaults_value()
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Generate the palette CSS: latte custom properties on `:root`, mocha
/// overrides behind the dark marker class.
pub fn generate_palette_css(colors: &PaletteConfig) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in colors.latte.entries() {
        css.push_str(&format!("  --{}: {};\n", name.replace('_', "-"), value));
    }
    css.push_str("}\n\n.mocha {\n");
    for (name, value) in colors.mocha.entries() {
        css.push_str(&format!("  --{}: {};\n", name.replace('_', "-"), value));
    }
    css.push_str("}\n");
    css
}

/// A stock `config.toml` with every option documented, for `folio gen-config`.
pub fn stock_config_toml() -> String {
    let defaults = PaletteConfig::default();
    let mut out = String::from(
        "\
# folio site configuration. All options are optional; the values below are
# the stock defaults.

title = \"folio\"        # Site title, also the navbar brand
author = \"\"            # Shown in the footer copyright line
description = \"\"       # Homepage intro and meta description
# base_url = \"https://example.com\"   # Uncomment to generate sitemap.xml

[social]
# github = \"https://github.com/you\"
# linkedin = \"https://www.linkedin.com/in/you/\"

",
    );
    for (variant, palette, label) in [
        ("latte", &defaults.latte, "Light palette (Catppuccin latte)"),
        ("mocha", &defaults.mocha, "Dark palette (Catppuccin mocha)"),
    ] {
        out.push_str(&format!("[colors.{variant}]  # {label}\n"));
        for (name, value) in palette.entries() {
            out.push_str(&format!("{name} = \"{value}\"\n"));
        }
        out.push('\n');
    }
    out.push_str(
        "\
[redirects]
# Legacy paths from a previous incarnation of the site; each entry becomes
# a stub page that forwards the visitor.
# \"/work/old-slug\" = \"/\"
",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.title, "folio");
        assert_eq!(config.colors.latte.background, "#eff1f5");
        assert_eq!(config.colors.mocha.background, "#1e1e2e");
        assert!(config.redirects.is_empty());
    }

    #[test]
    fn sparse_override_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "title = \"my site\"\n[colors.mocha]\nbackground = \"#11111b\"\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.title, "my site");
        assert_eq!(config.colors.mocha.background, "#11111b");
        // Untouched values stay stock
        assert_eq!(config.colors.mocha.text, "#cdd6f4");
        assert_eq!(config.colors.latte.background, "#eff1f5");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "titel = \"typo\"\n").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn empty_title_is_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "title = \"  \"\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn bad_color_is_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[colors.latte]\naccent = \"blue\"\n",
        )
        .unwrap();
        let err = load_config(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("colors.latte.accent"));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "base_url = \"example.com\"\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn redirect_source_must_be_absolute() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[redirects]\n\"work/x\" = \"/\"\n",
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn redirects_parse_into_map() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[redirects]\n\"/work/mandelbrot\" = \"/\"\n\"/discipline/book-design\" = \"/projects/\"\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.redirects.len(), 2);
        assert_eq!(config.redirects["/work/mandelbrot"], "/");
    }

    #[test]
    fn palette_css_has_both_scopes() {
        let css = generate_palette_css(&PaletteConfig::default());
        assert!(css.starts_with(":root {"));
        assert!(css.contains(".mocha {"));
        assert!(css.contains("--background: #eff1f5;"));
        assert!(css.contains("--background: #1e1e2e;"));
        assert!(css.contains("--text-muted:"));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(&stock_config_toml()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.title, SiteConfig::default().title);
        assert_eq!(
            config.colors.mocha.accent,
            SiteConfig::default().colors.mocha.accent
        );
    }

    #[test]
    fn hex_color_forms() {
        assert!(is_css_color("#fff"));
        assert!(is_css_color("#11111b"));
        assert!(is_css_color("#11111bff"));
        assert!(!is_css_color("fff"));
        assert!(!is_css_color("#11111"));
        assert!(!is_css_color("#gggggg"));
    }
}
