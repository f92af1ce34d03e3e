use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use taskdeck::config::ClientConfig;

mod cmd;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(version, about = "AI-assisted kanban board")]
pub struct Cli {
    /// Base URL of the taskdeck API (client commands). Falls back to
    /// TASKDECK_API_URL, then http://localhost:5000.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,
    },
    /// Generate tickets from a project description
    Generate {
        /// Free-text description of the project to break down
        prompt: String,
    },
    /// Show the kanban board
    Board,
    /// Move a ticket to another column
    Move {
        id: Uuid,
        /// Target status: todo, in-progress, done
        status: String,
    },
    /// Delete a ticket
    Delete { id: Uuid },
    /// Delete all tickets
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskdeck=info")),
        )
        .init();

    let cli = Cli::parse();
    let client_config = ClientConfig::resolve(cli.api_url.clone());
    let api_url = client_config.base_url.as_str();

    match &cli.command {
        Commands::Serve { host, port } => {
            cmd::cmd_serve(host.clone(), *port).await?;
        }
        Commands::Generate { prompt } => {
            cmd::cmd_generate(api_url, prompt).await?;
        }
        Commands::Board => {
            cmd::cmd_board(api_url).await?;
        }
        Commands::Move { id, status } => {
            cmd::cmd_move(api_url, *id, status).await?;
        }
        Commands::Delete { id } => {
            cmd::cmd_delete(api_url, *id).await?;
        }
        Commands::Clear { yes } => {
            cmd::cmd_clear(api_url, *yes).await?;
        }
    }

    Ok(())
}
