//! kubepilot - a Kubernetes assistant driven by a chat model.

use clap::{Args, Parser, Subcommand};
use kubepilot_agent::ui;

mod commands;

use commands::{chat_command, check_command};

/// Kubernetes assistant for your terminal
#[derive(Parser)]
#[command(name = "kubepilot")]
#[command(about = "Chat with your Kubernetes cluster in natural language")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by both interactive commands.
#[derive(Args, Clone)]
struct LoopArgs {
    /// Default namespace to use for Kubernetes operations
    #[arg(short, long, default_value = "")]
    namespace: String,
    /// Enable debug mode to see detailed processing information
    #[arg(short, long)]
    debug: bool,
    /// Maximum number of reasoning loops before stopping
    #[arg(short, long, default_value_t = 5)]
    max_loops: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Create, list, or delete cluster resources through chat
    Chat {
        #[command(flatten)]
        args: LoopArgs,
    },
    /// Diagnose cluster state with kubectl, web search and page fetch
    Check {
        #[command(flatten)]
        args: LoopArgs,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let debug = match &cli.command {
        Commands::Chat { args } | Commands::Check { args } => args.debug,
    };
    if debug {
        tracing_subscriber::fmt().with_env_filter("debug").init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let result = match cli.command {
        Commands::Chat { args } => chat_command(args.namespace, args.debug, args.max_loops).await,
        Commands::Check { args } => check_command(args.namespace, args.debug, args.max_loops).await,
    };

    if let Err(e) = result {
        ui::print_red(&format!("Error: {:#}", e));
        std::process::exit(1);
    }
}
