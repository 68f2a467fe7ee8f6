use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use til_index::{config, generate, output, scan};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "til-index")]
#[command(version, about = "Regenerate the table of contents of a TIL notes repository")]
#[command(long_about = "\
Regenerate the table of contents of a TIL notes repository

Your folder tree is the data source. Top-level folders become categories,
nested folders become subcategories, and markdown files become articles.

Notes structure:

  notes/
  ├── README.md                    # Target document (hand-written parts kept)
  ├── til-index.toml               # Optional config
  ├── python/                      # Category
  │   ├── basics.md                # Article
  │   └── advanced/                # Subcategory
  │       └── metaclasses.md
  └── rust/
      └── async/
          └── pinning.md

Article title (first available wins):
  front matter `title:` → first heading → file name

The listing is written between <!-- til-index:start --> and
<!-- til-index:end -->. Everything else in the README is preserved.

Run 'til-index gen-config' to print a documented til-index.toml.")]
struct Cli {
    /// Notes root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (default: <root>/til-index.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Target document, relative to the root (overrides the config file)
    #[arg(long, global = true)]
    output: Option<String>,

    /// Log progress at info level (otherwise RUST_LOG, default warn)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the notes and rewrite the target document (default)
    Generate,
    /// Exit with status 1 if the target document is out of date
    Check,
    /// Print the discovered categories and articles without writing
    Scan {
        /// Print the index as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock til-index.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.unwrap_or(Command::Generate) {
        Command::Generate => {
            let index_config = resolve_config(&cli.root, cli.config.as_deref(), cli.output)?;
            let result = generate::generate(&cli.root, &index_config)?;
            output::print_generate_output(&result, &index_config.output);
        }
        Command::Check => {
            let index_config = resolve_config(&cli.root, cli.config.as_deref(), cli.output)?;
            let result = generate::check(&cli.root, &index_config)?;
            output::print_check_output(&result, &index_config.output);
            if !result.is_up_to_date() {
                std::process::exit(1);
            }
        }
        Command::Scan { json } => {
            let index_config = resolve_config(&cli.root, cli.config.as_deref(), cli.output)?;
            let index = scan::scan(&cli.root, &index_config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&index)?);
            } else {
                output::print_scan_output(&index, &cli.root);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize tracing: `--verbose` enables INFO, otherwise RUST_LOG or WARN.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config file and apply the `--output` override.
fn resolve_config(
    root: &Path,
    explicit: Option<&Path>,
    output_override: Option<String>,
) -> Result<config::IndexConfig, config::ConfigError> {
    let mut index_config = match explicit {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(root)?,
    };
    if let Some(output) = output_override {
        index_config.output = output;
        index_config.validate()?;
    }
    Ok(index_config)
}
