use clap::Parser;
use clap::Subcommand;
use mixrag::config::AppConfig;
use mixrag::dataset::DatasetStore;
use mixrag::models::Category;
use mixrag::Result;
use tracing::info;

#[derive(Parser)]
#[command(name = "mixrag")]
#[command(about = "MixRAG cocktail chat assistant and dataset query tool")]
#[command(version)]
struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the chat API server
    Serve {
        /// Bind host (defaults to the configured value)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (defaults to the configured value)
        #[arg(long)]
        port: Option<u16>,
        /// Enable permissive CORS
        #[arg(long)]
        cors: bool,
    },
    /// Search the cocktail dataset by ingredient
    Search {
        /// Ingredient search term
        query: String,
        /// Restrict to a category (alcoholic / non-alcoholic)
        #[arg(long)]
        category: Option<String>,
    },
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        mixrag::logging::init_logging_with_level("debug")?;
    } else {
        mixrag::logging::init_logging()?;
    }

    // Load configuration
    let config = AppConfig::load()?;
    info!("Configuration loaded successfully");

    // Execute the requested command
    match cli.command {
        Commands::Serve { host, port, cors } => {
            let host = host.unwrap_or_else(|| config.host().to_string());
            let port = port.unwrap_or_else(|| config.port());
            let cors = cors || config.server.enable_cors;

            mixrag::api::serve_api(&config, host, port, cors).await?;
        }
        Commands::Search { query, category } => {
            handle_search_command(&config, &query, category.as_deref())?;
        }
        Commands::Config => {
            handle_config_command(&config);
        }
    }

    Ok(())
}

fn handle_search_command(config: &AppConfig, query: &str, category: Option<&str>) -> Result<()> {
    let dataset = DatasetStore::from_csv_path(config.dataset_path())?;

    let category = category.and_then(Category::detect);
    let matches = dataset.filter(query, category);

    println!("🔍 Searching cocktails containing: \"{query}\"");
    if let Some(filter) = category {
        println!("Category: {}", filter.as_str());
    }
    println!();

    if matches.is_empty() {
        println!("No cocktails found.");
    } else {
        println!("Found {} cocktails:", matches.len());
        for entry in matches {
            println!("  - {}", entry.display_line());
        }
    }

    Ok(())
}

fn handle_config_command(config: &AppConfig) {
    println!("📋 MixRAG Configuration:");
    println!();

    println!("🌐 Server:");
    println!("  Host: {}", config.host());
    println!("  Port: {}", config.port());
    println!("  Static dir: {}", config.static_dir());
    println!("  CORS: {}", config.server.enable_cors);
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Backtrace: {}", config.logging.backtrace);
    println!();

    println!("🍸 Dataset:");
    println!("  Path: {}", config.dataset_path());
    println!();

    println!("🧠 Embeddings:");
    println!("  Provider: {}", config.embedding_provider());
    println!("  Model: {}", config.embedding_model());
    println!("  Endpoint: {}", config.embedding_endpoint());
    println!();

    println!("💬 LLM:");
    println!("  Endpoint: {}", config.llm_endpoint());
    println!("  Model: {}", config.llm_model());
    println!();

    println!("🔎 Retrieval:");
    println!("  Top-k: {}", config.retrieval_top_k());
    println!("  Temperature: {}", config.retrieval.temperature);
    println!("  Max tokens: {}", config.retrieval.max_tokens);
}
