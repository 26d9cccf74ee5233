use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "msgboard", version, about = "Message Board API Server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the config file path globally
    #[arg(short, long, global = true, default_value = "config.yaml")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve,

    /// Create the messages table in the configured database
    InitDb,

    /// Append a message from the terminal
    Post {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        message: String,
    },

    /// Print the newest messages
    List {
        /// Maximum number of messages to print
        #[arg(short, long, default_value_t = 50)]
        limit: i64,
    },
}
