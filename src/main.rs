// src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use talkimoji::config::{self, AppConfig, ConfigOverrides, FileConfig};
use talkimoji::convert::{ConversionRequest, ConversionResult, Dispatcher, Mode};
use talkimoji::{api, AppState};

#[derive(Parser)]
#[command(name = "talkimoji")]
#[command(version, about = "Convert text to emojis or emojis to text")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file (defaults to ~/.talkimoji/config.toml)
    #[arg(long, short = 'c', global = true, env = "TALKIMOJI_CONFIG")]
    config: Option<PathBuf>,

    /// Gemini API key
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the generative-language API
    #[arg(long, global = true, env = "TALKIMOJI_API_BASE")]
    api_base: Option<String>,

    /// Model name
    #[arg(long, global = true, env = "TALKIMOJI_MODEL")]
    model: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, global = true, env = "TALKIMOJI_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Listen address
    #[arg(long, global = true, env = "TALKIMOJI_HOST")]
    host: Option<String>,

    /// Listen port
    #[arg(long, short = 'p', global = true, env = "TALKIMOJI_PORT")]
    port: Option<u16>,

    /// Serve this HTML file instead of the built-in page
    #[arg(long, global = true, env = "TALKIMOJI_PAGE")]
    page: Option<PathBuf>,

    /// Outbound proxy for API calls: SYSTEM, NONE or a proxy URL
    #[arg(long, global = true, env = "TALKIMOJI_PROXY")]
    proxy: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web server (default)
    Serve {
        /// Don't send a test conversion to the API before serving
        #[arg(long)]
        skip_probe: bool,
    },
    /// Convert a single string and print the result
    Convert {
        text: String,

        /// auto, to_emoji or to_text
        #[arg(long, short, default_value = "auto")]
        mode: String,
    },
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_key: self.api_key.clone(),
            api_base: self.api_base.clone(),
            model: self.model.clone(),
            timeout_secs: self.timeout_secs,
            host: self.host.clone(),
            port: self.port,
            page: self.page.clone(),
            proxy: self.proxy.clone(),
        }
    }
}

/// Check the API key with a throwaway conversion. Failure only warns.
async fn probe(dispatcher: &Dispatcher) {
    info!("Testing Gemini API key...");
    match dispatcher
        .convert(ConversionRequest::new("hello", Mode::ToEmoji))
        .await
    {
        ConversionResult::Success { .. } => info!("API key is working"),
        ConversionResult::Failure { message } => {
            warn!("API key test failed: {}", message);
            warn!("Check that the API key is correct and has Gemini API access");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    config::load_dotenv();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let file = FileConfig::load(cli.config.as_deref())?;
    let app_config = AppConfig::resolve(cli.overrides(), file)?;
    let state = AppState::from_config(&app_config)?;

    match cli.command.unwrap_or(Command::Serve { skip_probe: false }) {
        Command::Serve { skip_probe } => {
            info!(
                "Starting TalkiMoji {} (model: {})",
                env!("CARGO_PKG_VERSION"),
                app_config.oracle.model
            );
            if !skip_probe {
                probe(&state.dispatcher).await;
            }
            api::run(state, &app_config.server).await
        }
        Command::Convert { text, mode } => {
            let request = ConversionRequest {
                text,
                mode: Some(mode),
            };
            match state.dispatcher.convert(request).await {
                ConversionResult::Success { output, .. } => {
                    println!("{}", output);
                    Ok(())
                }
                ConversionResult::Failure { message } => anyhow::bail!(message),
            }
        }
    }
}
