//! Front-end entry-point: wires storage, the backend client and the shell,
//! then drives the shell from events read on standard input.

use std::sync::Arc;

use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use frontend::config::FrontendSettings;
use frontend::domain::pages::PageRegistry;
use frontend::domain::{LoginFlow, NotificationChannel, SessionStore, Shell, ShellSnapshot};
use frontend::inbound::{NavigationDriver, NavigationEvent};
use frontend::outbound::backend::HttpBackendClient;
use frontend::outbound::storage::FileIdentityStorage;

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        FrontendSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build front-end runtime")?;
    runtime.block_on(run(settings))
}

async fn run(settings: FrontendSettings) -> Result<()> {
    let storage = FileIdentityStorage::open(settings.state_dir())
        .wrap_err("failed to open identity storage")?;
    let base_url = settings
        .api_base_url()
        .wrap_err("invalid backend base URL")?;
    let backend = Arc::new(
        HttpBackendClient::new(base_url, settings.request_timeout())
            .wrap_err("failed to build backend client")?,
    );
    let clock = Arc::new(DefaultClock);

    let session = Arc::new(SessionStore::rehydrate(Arc::new(storage)));
    let notifications = Arc::new(NotificationChannel::new(
        clock.clone(),
        settings.notification_timing(),
    ));
    let shell = Arc::new(Shell::new(
        session.clone(),
        backend.clone(),
        notifications,
        clock,
        PageRegistry::standard(),
    ));
    let login = Arc::new(LoginFlow::new(session, backend));
    let driver = NavigationDriver::new(shell, login);

    let start = NavigationEvent::Navigate(settings.start_path().to_owned());
    report(driver.handle(start).await.map_err(|err| err.message()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.wrap_err("failed to read event")? {
        if line.trim().is_empty() {
            continue;
        }
        match NavigationEvent::parse(&line) {
            Ok(event) => report(driver.handle(event).await.map_err(|err| err.message())),
            Err(err) => warn!(error = %err, "ignoring malformed event"),
        }
    }
    Ok(())
}

fn report(outcome: std::result::Result<ShellSnapshot, String>) {
    match outcome {
        Ok(snapshot) => info!(
            path = %snapshot.path,
            state = ?snapshot.state,
            title = ?snapshot.header.title,
            content = ?snapshot.content,
            notification = ?snapshot.notification,
            "frame"
        ),
        Err(message) => warn!(%message, "event failed"),
    }
}
