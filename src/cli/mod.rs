use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod chat;
pub mod init;
pub mod serve;

#[derive(Subcommand)]
enum Command {
    /// Create the storage directory and message table
    Init {},
    /// Run the chat handler
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "2222")]
        port: String,
    },
    /// Chat with Nova in the terminal
    Chat {
        /// URL of a running chat handler. Runs in process when omitted.
        #[arg(long)]
        server: Option<String>,

        /// Bearer token sent to the chat handler
        #[arg(long, env = "NOVA_API_KEY")]
        api_key: Option<String>,

        /// Signed in user. Messages can't be sent without one.
        #[arg(long, env = "NOVA_USER_ID")]
        user_id: Option<String>,

        /// Look up the approximate position before chatting
        #[arg(long, action, default_value = "false")]
        locate: bool,
    },
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
        Some(Command::Init {}) => {
            init::run().await?;
        }
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        Some(Command::Chat {
            server,
            api_key,
            user_id,
            locate,
        }) => {
            chat::run(server, api_key, user_id, locate).await?;
        }
        None => {}
    }

    Ok(())
}
