use clap::{Parser, Subcommand};

mod commands;

use commands::{LoopArgs, PassArgs, ShowConfigArgs};

#[derive(Parser)]
#[command(name = "wheelbot")]
#[command(about = "Wheel options strategy: cash-secured puts and covered calls", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one pass against a snapshot and print the intended action
    Pass(PassArgs),
    /// Run passes on an interval until Ctrl-C
    #[command(name = "loop")]
    Loop(LoopArgs),
    /// Print the effective configuration
    Config(ShowConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `pass` output on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Pass(args) => {
            commands::run_pass(args).await?;
        }
        Commands::Loop(args) => {
            commands::run_pass_loop(args).await?;
        }
        Commands::Config(args) => {
            commands::run_show_config(args)?;
        }
    }

    Ok(())
}
