mod cmd;
mod prompt;

use clap::{Parser, Subcommand};
use cmd::{
    analysis::AnalysisSubcommand, spoke::SpokeSubcommand, twilio::TwilioSubcommand,
    van::VanSubcommand,
};

#[derive(Parser)]
#[command(
    name = "textbank",
    about = "Campaign texting toolkit: Twilio number operations, Spoke exports, VAN sync",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Offline reports over exported message logs
    Analysis {
        #[command(subcommand)]
        subcommand: AnalysisSubcommand,
    },

    /// Number inventory, purchasing, and messaging services
    Twilio {
        #[command(subcommand)]
        subcommand: TwilioSubcommand,
    },

    /// Push Spoke canvass results to VAN
    Van {
        #[command(subcommand)]
        subcommand: VanSubcommand,
    },

    /// Exports and reconciliation against the Spoke database
    Spoke {
        #[command(subcommand)]
        subcommand: SpokeSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Analysis { subcommand } => cmd::analysis::run(subcommand),
        Commands::Twilio { subcommand } => cmd::twilio::run(subcommand),
        Commands::Van { subcommand } => cmd::van::run(subcommand),
        Commands::Spoke { subcommand } => cmd::spoke::run(subcommand),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
