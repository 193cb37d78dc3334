//! Walks a console through the redirects an identity provider produces.
//!
//! Run with `RUST_LOG=debug` to see every navigation and re-check.

use std::time::Duration;

use ragdesk::prelude::*;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

/// Successful handoff: `?auth=` is stored, stripped, and the user lands
/// on the knowledge page.
async fn handoff(config: &ConsoleConfig) -> Result<(), ConsoleError> {
    let router = MemoryRouter::at("/rag/?auth=demo-token&tab=1");
    let mut console = Console::builder()
        .config(config.clone())
        .build(MemoryStore::new(), router.clone())?;

    let frame = console.render();
    tracing::info!(action = ?frame.callback, shell = %frame.shell, at = %router.location(), "handoff");
    tracing::info!(header = %console.authorization_header(), "request header");

    console.render();
    Ok(())
}

/// Provider error: a toast, then the login page a moment later.
async fn provider_error(config: &ConsoleConfig) -> Result<(), ConsoleError> {
    let router = MemoryRouter::at("/rag/?error=access_denied");
    let mut console = Console::builder()
        .config(config.clone())
        .build(MemoryStore::new(), router.clone())?;

    let frame = console.render();
    tracing::info!(action = ?frame.callback, at = %router.location(), "error callback");

    tokio::time::sleep(config.error_redirect_delay() + Duration::from_millis(10)).await;
    tracing::info!(at = %router.location(), "after redirect delay");
    Ok(())
}

/// Simple mode via `simple=1`, carried into the settings area, then logout.
async fn simple_mode(config: &ConsoleConfig) -> Result<(), ConsoleError> {
    let router = MemoryRouter::at("/rag/?auth=demo-token&simple=1");
    let mut console = Console::builder()
        .config(config.clone())
        .build(MemoryStore::new(), router.clone())?;

    console.render();
    router.navigate("/rag/?simple=1", NavigateOptions::default());
    let frame = console.render();
    tracing::info!(shell = %frame.shell, at = %router.location(), "simple home");

    console.open_settings();
    console.render();
    tracing::info!(menu = ?console.settings_menu(), at = %router.location(), "settings");

    console.select_setting(SettingsKey::Logout);
    tracing::info!(login = %console.login_state(), at = %router.location(), "after logout");
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ConsoleConfig::default();
    handoff(&config).await?;
    provider_error(&config).await?;
    simple_mode(&config).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_scenarios_run_to_completion() {
        let config = ConsoleConfig::default();
        handoff(&config).await.unwrap();
        provider_error(&config).await.unwrap();
        simple_mode(&config).await.unwrap();
    }
}
