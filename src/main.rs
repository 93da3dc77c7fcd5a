use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;

use rectask::answer::{HttpTransport, sanitize_answer};
use rectask::config::Config;
use rectask::host::Host;
use rectask::session::{self, SessionScript};

/// Long-press a rectangle over a page, get a one-line answer about its text
#[derive(Parser, Debug)]
#[command(name = "rectask", version, about)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, env = "RECTASK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded session and print each selection message as JSON
    Select { session: PathBuf },
    /// Replay a recorded session and answer every selection
    Ask { session: PathBuf },
    /// Sanitize raw model output read from stdin
    Sanitize,
    /// Store the backend API key in the configuration file
    SetKey { key: String },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Ok(Config::load()),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Select { session: path } => {
            let config = load_config(cli.config.as_ref())?;
            let script = SessionScript::load(&path)?;
            let (tx, mut rx) = mpsc::unbounded_channel();
            let deliveries = session::replay(script, &config, Some(tx))?;
            log::info!("{} selection(s) delivered", deliveries.len());
            while let Ok(json) = rx.try_recv() {
                println!("{json}");
            }
        }
        Command::Ask { session: path } => {
            let config = load_config(cli.config.as_ref())?;
            let script = SessionScript::load(&path)?;
            let (tx, rx) = mpsc::unbounded_channel();
            session::replay(script, &config, Some(tx))?;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;
            let transport =
                HttpTransport::new(&config).context("Failed to build HTTP client")?;
            let host = Host::new(config, transport);
            for result in runtime.block_on(host.serve(rx)) {
                println!("{}", result.display_text());
            }
        }
        Command::Sanitize => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read stdin")?;
            println!("{}", sanitize_answer(&raw));
        }
        Command::SetKey { key } => {
            let mut config = match &cli.config {
                Some(path) if path.exists() => Config::load_from(path)?,
                Some(_) => Config::default(),
                None => Config::load(),
            };
            config.api_key = Some(key.trim().to_string());
            match &cli.config {
                Some(path) => config.save_to(path)?,
                None => config.save(),
            }
        }
    }
    Ok(())
}
