mod app;
mod config;
mod error;
mod logging;
mod paths;
mod terminal;
mod ui;
mod widgets;

use std::process::ExitCode;
use std::sync::Arc;

use artworks_lib::ArtworksClient;
use artworks_lib::api::PageSource;
use artworks_lib::browser::ArtworkBrowser;
use log::{error, info};

use crate::app::App;
use crate::config::Config;
use crate::error::AppError;
use crate::terminal::TerminalGuard;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;
    let log_path = logging::init(config.log_level)?;
    info!("Logging to {}", log_path.display());

    let mut builder = ArtworksClient::builder().url(config.api_url.as_str());
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(timeout) = config.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    let client = builder.build()?;
    info!("Browsing artworks from {}", client.base_url());

    let source: Arc<dyn PageSource> = Arc::new(client);
    let mut app = App::new(ArtworkBrowser::new());

    let mut terminal = TerminalGuard::new()?;
    let result = app::run(&mut app, source, &mut terminal).await;
    drop(terminal);

    info!(
        "Exited with {} selected rows",
        app.browser().state().selection().len()
    );
    result
}
