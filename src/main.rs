use anyhow::Result;
use quiz_platformer::app::{App, ScriptedInput};
use quiz_platformer::constants::LOOP_TIME;
use quiz_platformer::formatter::FrameFormatter;
use quiz_platformer::game::GameConfig;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

/// Configure and install the global tracing subscriber.
fn setup_logging() -> Result<()> {
    // RUST_LOG overrides; default to info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(true)
        .event_format(FrameFormatter)
        .with_env_filter(filter)
        .finish()
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// The main entry point of the application.
///
/// Runs the simulation headless on a scripted input sequence, then exits.
pub fn main() -> Result<()> {
    setup_logging()?;

    let muted = std::env::args().any(|arg| arg == "--mute" || arg == "-m");
    let config = GameConfig::stock()?.muted(muted);
    let mut app = App::new(config, ScriptedInput::demo())?;

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    while app.run() {}

    info!(scene = ?app.scene(), "Exiting");
    Ok(())
}
