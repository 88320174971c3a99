//! Role-granted pages mounted by the shell.
//!
//! Pages are view-models: [`Page::load`] fetches what a renderer would show
//! and each page type exposes its actions as associated functions taking a
//! [`PageContext`]. Pages never hold the session themselves; the context is
//! handed to them on every call.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::TimeDelta;
use tracing::debug;

use super::ports::{BackendApi, BackendError};
use super::{
    Acknowledgement, CitizenRequest, DashboardSummary, Error, Medication, NavigationTicket, NotificationChannel,
    NotificationMessage, ReviewItem, SessionStore, Severity, UserAccount,
};

mod catalog;
mod dashboard;
mod registry;
mod request_form;
mod request_history;
mod review_queue;
mod users;

pub use catalog::CatalogPage;
pub use dashboard::{DASHBOARD_REFRESH_SECS, DashboardPage};
pub use registry::{PageConstructor, PageRegistry};
pub use request_form::RequestFormPage;
pub use request_history::RequestHistoryPage;
pub use review_queue::ReviewQueuePage;
pub use users::UsersPage;

/// Data a page produced on its last load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageData {
    /// Medications selectable on the request form.
    RequestForm {
        /// Active catalog medications.
        medications: Vec<Medication>,
    },
    /// Requests filed by the logged-in citizen.
    RequestHistory {
        /// Requests, newest first as the backend orders them.
        requests: Vec<CitizenRequest>,
    },
    /// Requests awaiting or past review.
    ReviewQueue {
        /// Queue entries.
        items: Vec<ReviewItem>,
    },
    /// Catalog under management.
    Catalog {
        /// Active medications.
        medications: Vec<Medication>,
    },
    /// Accounts under management.
    Users {
        /// Every account.
        accounts: Vec<UserAccount>,
    },
    /// Request counts.
    Dashboard {
        /// Counts by status.
        summary: DashboardSummary,
    },
}

/// Everything a page needs to load or act.
///
/// The context carries the navigation ticket current when it was created.
/// Notifications published through it are dropped once the ticket is stale.
#[derive(Clone)]
pub struct PageContext {
    session: Arc<SessionStore>,
    backend: Arc<dyn BackendApi>,
    notifications: Arc<NotificationChannel>,
    ticket: NavigationTicket,
}

impl PageContext {
    /// Bundle the collaborators with the ticket the work is issued under.
    pub fn new(
        session: Arc<SessionStore>,
        backend: Arc<dyn BackendApi>,
        notifications: Arc<NotificationChannel>,
        ticket: NavigationTicket,
    ) -> Self {
        Self {
            session,
            backend,
            notifications,
            ticket,
        }
    }

    /// Session of the logged-in user.
    pub fn session(&self) -> &SessionStore {
        self.session.as_ref()
    }

    /// Backend port.
    pub fn backend(&self) -> &dyn BackendApi {
        self.backend.as_ref()
    }

    /// Ticket the work was issued under.
    pub const fn ticket(&self) -> &NavigationTicket {
        &self.ticket
    }

    /// Publish `message` unless the user has navigated away since.
    ///
    /// Returns whether the message was published.
    pub fn notify(&self, message: NotificationMessage) -> bool {
        if !self.ticket.is_current() {
            debug!(
                generation = self.ticket.generation(),
                "dropping notification from stale page"
            );
            return false;
        }
        self.notifications.publish(message);
        true
    }

    /// Publish the outcome of a page action and hand it back.
    ///
    /// Success publishes `success`; failure publishes the error as a warning
    /// or error message.
    pub(crate) fn report<T>(
        &self,
        outcome: Result<T, Error>,
        success: impl FnOnce(&T) -> NotificationMessage,
    ) -> Result<T, Error> {
        match &outcome {
            Ok(value) => self.notify(success(value)),
            Err(error) => self.notify(error.to_notification()),
        };
        outcome
    }

    /// Publish `error` and return it; used for validation failures caught
    /// before any backend call.
    pub(crate) fn reject<T>(&self, error: Error) -> Result<T, Error> {
        self.notify(error.to_notification());
        Err(error)
    }
}

/// Map a backend failure, preferring the backend's own message.
pub(crate) fn backend_failure(fallback: &'static str) -> impl Fn(BackendError) -> Error {
    move |error| error.to_domain(fallback)
}

/// Success message for an acknowledged mutation: the backend's own lines
/// when it sent any, otherwise `default`.
pub(crate) fn acknowledged(ack: &Acknowledgement, default: &str) -> NotificationMessage {
    if ack.lines.iter().all(|line| line.trim().is_empty()) {
        NotificationMessage::success(default)
    } else {
        NotificationMessage::new(Severity::Success, ack.lines.clone())
    }
}

/// A page the shell can mount.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Page: Send + Sync {
    /// Title shown in the shell header while the page is active.
    fn title(&self) -> &'static str;

    /// Fetch the page data.
    async fn load(&self, context: &PageContext) -> Result<PageData, Error>;

    /// Interval at which the shell should reload the page, if any.
    fn refresh_interval(&self) -> Option<TimeDelta> {
        None
    }
}
