use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, error};

use aiday_register::{
    config::Settings,
    handlers::{Flow, Session},
    utils::logging,
    FormContext,
};

/// Terminal host for the AI Day registration form
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Configuration file read instead of ./config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Path opened at startup, e.g. /register/ai
    #[arg(default_value = "/")]
    start_path: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::new(),
    }
    .context("Failed to load configuration")?;
    settings.validate().context("Invalid configuration")?;

    if cli.print_config {
        println!("{}", settings.to_toml()?);
        return Ok(());
    }

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", aiday_register::info());

    info!("Loading datasets, catalog and translations...");
    let context = Arc::new(FormContext::load(&settings).await.context("Failed to load collaborators")?);

    let locale = std::env::var("LANG").ok();
    let language = context.i18n.detect_language(locale.as_deref());
    info!(language = %language, endpoint = %settings.registration.endpoint, "Registration host is ready");

    let mut session = Session::new(context, language);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    write_lines(&mut stdout, &session.open(&cli.start_path)).await?;

    loop {
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let reply = session.handle_line(&line).await;
        if let Err(e) = write_lines(&mut stdout, &reply.lines).await {
            error!(error = %e, "Failed to write output");
            return Err(e.into());
        }

        if reply.flow == Flow::Quit {
            break;
        }
    }

    info!("Registration host has been shut down.");
    Ok(())
}

async fn write_lines(stdout: &mut tokio::io::Stdout, lines: &[String]) -> std::io::Result<()> {
    for line in lines {
        stdout.write_all(line.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }
    stdout.flush().await
}
