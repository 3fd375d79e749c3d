use billing_answers::{config, generate, output, site, social};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "billing-answers")]
#[command(about = "Static site generator for medical billing answers")]
#[command(long_about = "\
Static site generator for medical billing answers

Publishes a fixed registry of 50 question pages under /answers/{slug}, each
with search metadata and QAPage, FAQPage and BreadcrumbList structured data,
plus a listing page grouped by category, a sitemap and robots.txt.

The answer bank is compiled in. To author content, pass --source pointing
at a directory laid out like this:

  content/
  ├── config.toml                  # Site config (optional)
  └── answers/
      ├── 010-billing-basics.toml  # Shards merge in prefix order
      ├── 020-medical-coding.toml
      └── ...

Each shard is a TOML document of [slug] tables holding one answer record.
A slug defined in two shards fails the build unless
[validation] duplicate_slugs = \"last-wins\".

Run 'billing-answers gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory (defaults to the bundled answer bank)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every page into the output directory
    Build {
        /// Disable the write cache and rewrite every file
        #[arg(long)]
        no_cache: bool,
    },
    /// Load and validate content without writing anything
    Check,
    /// Print every static answer route
    Routes,
    /// Print the metadata and structured data of one answer page
    Page {
        slug: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Preview a social post feed exported from the admin endpoint
    Social {
        /// JSON file with the GET /api/admin/social response
        feed: PathBuf,
        /// Only show one category (national, state, specialty)
        #[arg(long)]
        category: Option<social::PostCategory>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config_root = config_root(cli.source.as_deref());

    match cli.command {
        Command::Build { no_cache } => {
            println!("==> Loading content from {}", source_label(cli.source.as_deref()));
            let content = site::Content::load(cli.source.as_deref(), &config_root)?;
            init_thread_pool(&content.config.processing);

            println!("==> Generating HTML \u{2192} {}", cli.output.display());
            let report = site::build(&content, &cli.output, !no_cache)?;
            output::print_build_output(&report, &content);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", source_label(cli.source.as_deref()));
            let content = site::Content::load(cli.source.as_deref(), &config_root)?;
            output::print_check_output(&content);
            content.enforce()?;
            println!("==> Content is valid");
        }
        Command::Routes => {
            let content = site::Content::load(cli.source.as_deref(), &config_root)?;
            output::print_routes(&content.registry);
        }
        Command::Page { slug, json } => {
            let content = site::Content::load(cli.source.as_deref(), &config_root)?;
            let page = generate::generate(&slug, &content.catalog, &content.registry, &content.config)?;
            if json {
                println!("{}", output::page_json(&page)?);
            } else {
                output::print_page(&page);
            }
        }
        Command::Social { feed, category } => {
            let site_config = config::load_config(&config_root)?;
            let feed = social::load_feed(&feed)?;
            output::print_social(&feed, category, &site_config.social);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; config can only lower it.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

/// `config.toml` lives in the content root, or the working directory when
/// building the bundled bank.
fn config_root(source: Option<&Path>) -> PathBuf {
    source
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn source_label(source: Option<&Path>) -> String {
    match source {
        Some(dir) => dir.display().to_string(),
        None => "bundled answer bank".to_string(),
    }
}
