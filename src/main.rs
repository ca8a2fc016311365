use app::App;
use config::Config;
use iced::{Application, Settings};
use task::Services;

mod app;
mod browser;
mod canvas;
mod catalog;
mod config;
mod deck_service;
mod error;
mod http;
mod images;
mod logging;
mod models;
mod screens;
mod session;
mod task;
#[cfg(test)]
mod test_support;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    logging::init(&config.log_filter);

    let services = Services::over_http(&config)?;
    tracing::info!(
        deck_api = %config.deck_api,
        catalog_api = %config.catalog_api,
        "starting deck builder"
    );

    App::run(Settings::with_flags(services))?;

    Ok(())
}
