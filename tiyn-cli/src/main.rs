use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tiyn_advisor::AdvisorConfig;
use tiyn_core::{PROMPT_SAMPLE_LIMIT, Summary, aggregate, normalize_columns};
use tiyn_ingest::decode_path;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "tiyn", version, about = "Bank statement expense analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a statement file (.csv, .xlsx, .pdf) and print the report
    Analyze {
        file: PathBuf,

        /// Ask the configured model for spending advice (needs Ollama)
        #[arg(long)]
        advice: bool,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,
    },

    /// Forward a message to the configured model and print the reply
    Chat { message: String },
}

#[derive(Serialize)]
struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<String>,
    #[serde(flatten)]
    summary: Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    fn get_rust_log() -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into())
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(get_rust_log()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            file,
            advice,
            pretty,
        } => {
            if !file.exists() {
                bail!("file not found: {}", file.display());
            }
            let report = analyze(&file, advice).await?;
            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{json}");
        }

        Command::Chat { message } => {
            let config = AdvisorConfig::from_env();
            let reply = tiyn_advisor::chat(&config, &message)
                .await
                .context("forwarding chat message")?;
            println!("{reply}");
        }
    }

    Ok(())
}

async fn analyze(file: &PathBuf, advice: bool) -> Result<Report> {
    let mut dataset = decode_path(file)?;
    normalize_columns(&mut dataset)?;

    // The prompt sample is taken before aggregation filters any rows.
    let reply = if advice {
        let sample = dataset.rows_as_json(PROMPT_SAMPLE_LIMIT);
        let prompt = tiyn_advisor::build_prompt(&sample);
        let config = AdvisorConfig::from_env();
        Some(
            tiyn_advisor::generate(&config, &prompt)
                .await
                .context("requesting spending advice")?,
        )
    } else {
        None
    };

    let summary = aggregate(dataset);
    Ok(Report { reply, summary })
}
