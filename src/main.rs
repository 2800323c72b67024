mod app;
use flashcards_app::*;

use anyhow::Context;
use app::MyApp;
use config::{AppConfig, ConfigOrigin};
use database::SqliteGateway;
use database::db::init_database;

fn main() -> anyhow::Result<()> {
    let config_path = AppConfig::default_path();
    let (config, origin) = AppConfig::load(&config_path)?;

    let _log_guard =
        logging::setup_logging(&config.log_dir, "flashcards", config.debug, config.console_log)?;

    match origin {
        ConfigOrigin::File => tracing::info!("Loaded config from {}", config_path.display()),
        ConfigOrigin::Defaults => {
            tracing::warn!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            // Leave an editable copy of the defaults behind
            if let Err(e) = config.save(&config_path) {
                tracing::warn!("Could not write default config: {:#}", e);
            }
        }
    }

    let conn = init_database(&config.database_path).with_context(|| {
        format!(
            "Failed to open database at {}",
            config.database_path.display()
        )
    })?;
    let controller = StudyController::open(Box::new(SqliteGateway::new(
        conn,
        config.storage_key.clone(),
    )));

    tracing::info!("Loaded {} cards from database", controller.store().len());
    for card in controller.store().cards() {
        tracing::debug!("  - [{}] {}", card.subject, card.statement);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([520.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Flashcards MSB",
        options,
        Box::new(move |_cc| Ok(Box::new(MyApp::new(controller, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run the application: {}", e))
}
