use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use oapi_ts_generator::GenerateConfig;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None, disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    _version: Option<bool>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate models and API code from an OpenAPI document
    Get {
        /// Path or http(s) URL of the OpenAPI document
        #[arg(value_name = "URL")]
        source: String,
        /// Directory to save the generated code to
        #[arg(short, long, value_name = "PATH", default_value = ".")]
        dir: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Get { source, dir } => {
            let config = GenerateConfig::new(&source, dir);
            oapi_ts_generator::run(&config).await?;
        }
    }

    Ok(())
}
