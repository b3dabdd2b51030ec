use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chat;
pub mod history;
pub mod serve;
pub mod session;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "8000")]
        port: String,
    },
    /// Start an interactive chat for this profile's session
    Chat {
        /// Talk to a running proxy instead of calling the vendor directly
        #[arg(long)]
        proxy_url: Option<String>,

        /// Agent persona to use, e.g. `education`
        #[arg(long)]
        agent: Option<String>,
    },
    /// Print the stored chat history
    History {
        /// Session to print, defaults to this profile's session
        #[arg(long)]
        session_id: Option<String>,
    },
    /// Print this profile's session id
    Session {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        Some(Command::Chat { proxy_url, agent }) => {
            chat::run(proxy_url, agent).await?;
        }
        Some(Command::History { session_id }) => {
            history::run(session_id).await?;
        }
        Some(Command::Session {}) => {
            session::run()?;
        }
        None => {}
    }

    Ok(())
}
