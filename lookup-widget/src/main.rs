use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dictionary::Dictionary;

use app::App;
use config::Config;
use state::{Font, SessionState};
use tui::Tui;

mod app;
mod audio;
mod config;
mod fetch;
mod logging;
mod message;
mod state;
mod theme;
mod tui;
mod update;
mod view;

#[derive(Parser)]
#[command(
    name = "lookup-widget",
    version,
    about = "Look up english words, their pronunciation and synonyms"
)]
struct Cli {
    /// Word to look up right away
    word: Option<String>,

    #[arg(long, help = "Start with the dark theme")]
    dark: bool,

    #[arg(long, value_enum, help = "Font family")]
    font: Option<Font>,

    #[arg(long, help = "Dictionary entries endpoint")]
    api_base: Option<String>,

    #[arg(long, help = "Request timeout in seconds")]
    timeout: Option<u64>,

    #[arg(long, help = "Directory for log files")]
    log_dir: Option<PathBuf>,

    #[arg(long, help = "Log filter, e.g. debug or lookup_widget=trace")]
    log_level: Option<String>,

    #[arg(long, help = "Do not write a log file")]
    no_log: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if self.dark {
            config.dark_theme = true;
        }
        if let Some(font) = self.font {
            config.font = font;
        }
        if let Some(api_base) = &self.api_base {
            config.api_base = api_base.clone();
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
        if let Some(log_dir) = &self.log_dir {
            config.log_dir = log_dir.clone();
        }
        if let Some(log_level) = &self.log_level {
            config.log_level = log_level.clone();
        }
        if self.no_log {
            config.file_logging = false;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let mut config = Config::from_env();
    cli.apply(&mut config);
    let _log_guard = logging::init_tracing(&config);

    let dictionary = Dictionary::with_base(&config.api_base, config.request_timeout())
        .context("failed to set up the dictionary client")?;
    tracing::info!(api_base = %dictionary.base(), "starting");
    let http = dictionary.client().clone();

    let state = SessionState::new(config.font, config.dark_theme);
    let mut app = App::new(state, Arc::new(dictionary), http)?;
    if let Some(word) = cli.word {
        app.submit(word);
    }

    tui::install_panic_hook();
    let mut tui = Tui::enter()?;
    let result = app.run(&mut tui.terminal, tui.keyboard_enhanced).await;
    tui.exit()?;

    if let Err(err) = &result {
        tracing::error!("widget exited with an error: {err:#}");
    }
    result
}
