mod colors;
mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use commands::FilterArgs;
use taproom::{BreweryApi, Config};

#[derive(Parser)]
#[command(name = "taproom")]
#[command(author, version, about = "Browse and summarize the Open Brewery DB directory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory API root (overrides TAPROOM_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Results per page (overrides TAPROOM_PER_PAGE)
    #[arg(long, global = true)]
    per_page: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// List breweries matching the filters
    Browse {
        #[command(flatten)]
        filters: FilterArgs,

        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Summary statistics for the breweries matching the filters
    Stats {
        #[command(flatten)]
        filters: FilterArgs,

        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Type and state distributions across the first pages of the directory
    Analytics {
        /// Number of pages to fetch concurrently
        #[arg(short, long, default_value_t = 5)]
        pages: u32,

        /// How many states to rank
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one brewery by id
    Show {
        /// Brewery id
        id: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a random brewery
    Random {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show resolved configuration
    Config {
        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    colors::init_colors();

    let mut config = Config::from_env()?;
    if let Some(api_base) = cli.api_base {
        config = config.with_api_base(api_base)?;
    }
    if let Some(per_page) = cli.per_page {
        config = config.with_per_page(per_page)?;
    }

    let api = BreweryApi::new(&config)?;

    match cli.command {
        Some(Commands::Browse {
            filters,
            pages,
            json,
        }) => {
            commands::browse(&api, &config, &filters, pages, json).await?;
        }
        Some(Commands::Stats {
            filters,
            pages,
            json,
        }) => {
            commands::stats(&api, &config, &filters, pages, json).await?;
        }
        Some(Commands::Analytics { pages, top, json }) => {
            commands::analytics(&api, &config, pages, top, json).await?;
        }
        Some(Commands::Show { id, json }) => {
            commands::show(&api, &id, json).await?;
        }
        Some(Commands::Random { json }) => {
            commands::random(&api, json).await?;
        }
        Some(Commands::Config { json }) => {
            commands::config(&config, json)?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "taproom",
                &mut std::io::stdout(),
            );
        }
        None => {
            println!(
                "{} taproom - browse the Open Brewery DB from your terminal",
                "🍺".bold()
            );
            println!("\nRun {} to see available commands.", "taproom --help".cyan());
        }
    }

    Ok(())
}
