//! Command-line client for fetchurl content-addressable cache servers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fetchurl_client::{FetchRequest, Fetcher, HttpTransport};
use fetchurl_core::ClientConfig;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fetchurl")]
#[command(about = "Fetch content-addressable artifacts via cache servers")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "FETCHURL_CONFIG",
        default_value = "config/fetchurl.toml"
    )]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a file by hash algorithm and digest
    Get {
        /// Hash algorithm (sha1, sha256, sha512; any spelling)
        algo: String,
        /// Expected digest in hex
        digest: String,
        /// Direct source URL (repeatable)
        #[arg(long = "url")]
        urls: Vec<String>,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Load client configuration: optional TOML file, then `FETCHURL_`-prefixed
/// environment variables (`FETCHURL_SERVER` carries the server list).
fn load_config(path: &str) -> Result<ClientConfig> {
    let mut figment = Figment::new();
    if Path::new(path).exists() {
        figment = figment.merge(Toml::file(path));
    }
    figment = figment.merge(Env::prefixed("FETCHURL_"));
    figment.extract().context("invalid configuration")
}

/// Writer wrapper that feeds a progress bar as bytes are accepted.
struct ProgressWriter<W> {
    inner: W,
    bar: ProgressBar,
}

impl<W: Write> Write for ProgressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bar.inc(n as u64);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

fn download_bar() -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} downloading {bytes} ({bytes_per_sec})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar
}

async fn run_get(
    config: &ClientConfig,
    algo: String,
    digest: String,
    urls: Vec<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let fetcher = Fetcher::from_config(HttpTransport::new(), config);
    let request = FetchRequest { algo, digest, urls };

    let out: Box<dyn Write> = match &output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    let bar = download_bar();
    let mut writer = ProgressWriter {
        inner: out,
        bar: bar.clone(),
    };

    let result = fetcher.fetch(&request, &mut writer).await;
    bar.finish_and_clear();

    if let Err(err) = result {
        // A failed fetch may have left partial content behind.
        if let Some(path) = &output {
            if let Err(remove_err) = std::fs::remove_file(path) {
                tracing::warn!(path = %path.display(), error = %remove_err,
                    "failed to remove output file after failed fetch");
            }
        }
        return Err(err).context("fetch failed");
    }

    writer.flush().context("failed to flush output")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Get {
            algo,
            digest,
            urls,
            output,
        } => run_get(&config, algo, digest, urls, output).await,
    }
}
