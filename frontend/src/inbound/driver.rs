//! Dispatches navigation events to the shell and the login flow.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::events::NavigationEvent;
use crate::domain::{Error, LOGIN_PATH, LoginFlow, ROOT_PATH, Shell, ShellSnapshot};

/// Event dispatcher sitting in front of the shell.
pub struct NavigationDriver {
    shell: Arc<Shell>,
    login: Arc<LoginFlow>,
}

impl NavigationDriver {
    /// Drive `shell`, using `login` for the login view.
    pub fn new(shell: Arc<Shell>, login: Arc<LoginFlow>) -> Self {
        Self { shell, login }
    }

    /// Shell being driven.
    pub fn shell(&self) -> &Shell {
        self.shell.as_ref()
    }

    /// Apply one event and return the resulting frame.
    ///
    /// A failure is also published on the notification channel so the next
    /// frame shows it.
    ///
    /// # Errors
    ///
    /// Returns page load failures and login errors unchanged; the shell
    /// stays usable after any of them.
    pub async fn handle(&self, event: NavigationEvent) -> Result<ShellSnapshot, Error> {
        debug!(?event, "handling navigation event");
        let outcome = self.dispatch(event).await;
        if let Err(error) = &outcome {
            warn!(code = ?error.code(), %error, "navigation event failed");
            self.shell.page_context().notify(error.to_notification());
        }
        outcome.map(|()| self.shell.snapshot())
    }

    async fn dispatch(&self, event: NavigationEvent) -> Result<(), Error> {
        match event {
            NavigationEvent::Navigate(path) => self.navigate(&path).await,
            NavigationEvent::Back => {
                self.shell.back();
                Ok(())
            }
            NavigationEvent::Logout => {
                self.shell.logout()?;
                self.login.enter()
            }
            NavigationEvent::Login { cpf, password } => {
                let has_password = self.login.check_cpf(&cpf).await?;
                if !has_password {
                    info!("first access; a password must be created");
                    return Ok(());
                }
                self.login.authenticate(&password).await?;
                self.navigate(ROOT_PATH).await
            }
            NavigationEvent::SetPassword {
                password,
                confirmation,
            } => {
                self.login.set_password(&password, &confirmation).await?;
                self.login.authenticate(&password).await?;
                self.navigate(ROOT_PATH).await
            }
            NavigationEvent::Tick => {
                if let Some(reload) = self.shell.refresh_due() {
                    self.shell.finish_load(reload.run().await)?;
                }
                Ok(())
            }
        }
    }

    async fn navigate(&self, path: &str) -> Result<(), Error> {
        if path == LOGIN_PATH {
            self.login.enter()?;
        }
        self.shell.open(path).await.map(|state| {
            debug!(?state, "navigation settled");
        })
    }
}
