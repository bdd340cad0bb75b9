use clap::{Parser, Subcommand};
use folio::{config, generate, output, scan};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("FOLIO_ON_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let rev = env!("FOLIO_GIT_REV");
        if rev.is_empty() {
            "dev@unknown"
        } else {
            // Leaked exactly once, at startup
            Box::leak(format!("dev@{rev}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Static site generator for portfolio and blog sites")]
#[command(long_about = "\
Static site generator for portfolio and blog sites

Your filesystem is the data source. Markdown files with frontmatter become
projects and posts; root-level markdown files become standalone pages.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── assets/                      # Static assets (favicon, images) → copied to output
  ├── about.md                     # Standalone page (title from first # heading)
  ├── resume.md
  ├── contact.md
  ├── privacy-policy.md            # Linked from the privacy notice
  ├── projects/
  │   ├── mandelbrot.md            # Frontmatter: title, link?, featured, description, type
  │   └── client-site.md
  └── blog/
      ├── hello-world.md           # Frontmatter: title, description, published, updated
      └── 2024/retrospective.md    # Nested files get path slugs

Collection frontmatter is validated at scan time; a file with missing,
mistyped, or unknown fields fails the build, naming the file.

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for the intermediate manifest
    #[arg(long, default_value = ".folio-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content directory into a manifest
    Scan,
    /// Produce the HTML site from a previously scanned manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content without writing any output
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            generate::generate(&manifest_path, &cli.source, &cli.output)?;
            let manifest_content = std::fs::read_to_string(&manifest_path)?;
            let manifest: scan::Manifest = serde_json::from_str(&manifest_content)?;
            output::print_generate_output(&manifest);
        }
        Command::Build => {
            std::fs::create_dir_all(&cli.temp_dir)?;

            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&manifest);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
