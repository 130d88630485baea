use autokey::config::AppConfig;
use autokey::emitter::EmitterHandle;
use autokey::injection::{detect_backend, keystroke_factory};
use color_eyre::{eyre::eyre, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config = AppConfig::load_or_default();
    info!("Active configuration: {:?}", config);

    let backend = detect_backend(config.injection.dry_run);
    info!("Selected injection backend: {}", backend);

    let mut emitter_handle = EmitterHandle::spawn(config.emitter, keystroke_factory(backend))
        .map_err(|e| eyre!("Failed to spawn emitter: {}", e))?;

    println!("autokey started. Press Ctrl+C to stop.");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| eyre!("Failed to listen for interrupt: {}", e))?;
    info!("Interrupt received, shutting down");

    let stats = emitter_handle
        .shutdown()
        .await
        .map_err(|e| eyre!("Failed to shut down emitter: {}", e))?;

    println!("autokey stopped. Sent {} key presses.", stats.press_count);

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
