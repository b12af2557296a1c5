//! # TrendWatch Binary
//!
//! The entry point that assembles the application based on compile-time features.

mod menu;
mod telemetry;
mod wiring;

use configs::Settings;

use crate::menu::Menu;
use crate::wiring::PluginWiring;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let dotenv = configs::load_dotenv();
    let settings = Settings::load()?;
    telemetry::init_telemetry(&settings.log);
    dotenv.log();

    let default_backend = settings.storage.backend;
    let default_source = settings.source.kind;
    tracing::info!(backend = ?default_backend, source = ?default_source, "starting trendwatch");

    let wiring = PluginWiring::new(settings);
    tracing::debug!(sqlite_path = %wiring.settings().storage.sqlite_path, "storage settings");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Menu::new(&wiring, stdin.lock(), stdout.lock())
        .run(default_backend, default_source)
        .await
}
