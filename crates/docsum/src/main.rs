use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docsum_common::{logger, AppConfig};
use docsum_llm::{CohereClient, GenerationClient};
use std::path::PathBuf;
use std::sync::Arc;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
            return;
        }
    }

    dotenv::dotenv().ok();
}

#[derive(Parser)]
#[command(name = "docsum")]
#[command(about = "docsum - document summarization service", long_about = None)]
struct Cli {
    /// Log to the console only (no log file)
    #[arg(long, global = true)]
    console_log: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate configuration and check the Cohere credential
    Check,
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load .env before AppConfig::from_env so project-root settings win over cwd
    load_dotenv_from_project_root();

    let mut config = AppConfig::from_env()?;

    if let Some(Commands::Serve { host, port }) = &cli.command {
        if let Some(host) = host {
            config.server_host = host.clone();
        }
        if let Some(port) = port {
            config.server_port = *port;
        }
    }

    config.validate()?;

    if cli.console_log {
        logger::setup_console_logging(&config.log_level)?;
    } else {
        logger::setup_logging(&config.log_dir, &config.log_level)?;
    }

    match cli.command {
        Some(Commands::Check) => check(&config).await,
        Some(Commands::Serve { .. }) | None => serve(config).await,
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    tracing::info!("docsum starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Uploads: {}", config.upload_dir.display());
    tracing::info!("  Max chunk chars: {}", config.max_chunk_chars);
    tracing::info!("  Summary concurrency: {}", config.summary_concurrency);

    if !config.has_generation_credential() {
        tracing::error!("No COHERE_API_KEY found in environment variables.");
        tracing::error!("Please create a .env file with your Cohere API key.");
    }

    println!("Server listening on http://{}", config.server_bind_address());

    docsum_server::start_server(config).await?;
    Ok(())
}

async fn check(config: &AppConfig) -> Result<()> {
    let client: Arc<dyn GenerationClient> =
        Arc::new(CohereClient::from_config(config).context("Cohere client unavailable")?);

    if client.test_connection().await? {
        println!("Configuration OK: Cohere API key accepted");
        Ok(())
    } else {
        anyhow::bail!("Cohere rejected the configured API key")
    }
}
