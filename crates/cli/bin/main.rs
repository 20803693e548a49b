use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use query_compiler_cli::{run, Command, Context};

/// Compile list-request parameters into query plans.
#[derive(Parser)]
#[command(name = "query-compiler", version)]
struct Cli {
    /// The directory holding the configuration. Defaults to the current directory.
    #[arg(long, global = true, env = "QUERY_COMPILER_CONTEXT_PATH", value_name = "PATH")]
    context_path: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
pub async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match try_main(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn try_main(cli: Cli) -> anyhow::Result<()> {
    let context_path = match cli.context_path {
        Some(context_path) => context_path,
        None => std::env::current_dir()?,
    };
    let context = Context { context_path };
    let mut stdout = std::io::stdout().lock();
    run(cli.command, &context, &mut stdout).await
}
