//! Domain primitives, services and ports.
//!
//! Purpose: hold the session/role context, the role-driven navigation, the
//! shell state machine and the notification channel. Nothing here knows
//! about HTTP or the filesystem; those live behind [`ports`].
//!
//! Public surface:
//! - SessionStore: identity with write-through persistence.
//! - resolve_navigation: role code to ordered menu entries.
//! - Shell: header, side navigation and content slot composition.
//! - NotificationChannel: single-slot, auto-dismissing messages.
//! - LoginFlow: CPF lookup, first password and authentication.

pub mod auth;
pub mod carousel;
pub mod error;
pub mod identity;
pub mod login_flow;
pub mod navigation;
pub mod notification;
pub mod pages;
pub mod ports;
pub mod records;
pub mod role;
pub mod session;
pub mod shell;
pub mod ticket;

pub use self::auth::{Cpf, LoginCredentials, LoginValidationError, PASSWORD_MIN_LEN, PasswordSetup};
pub use self::carousel::{CAROUSEL_INTERVAL_SECS, LandingCarousel, NEWS, NewsItem};
pub use self::error::{CONNECTION_ERROR_MESSAGE, Error, ErrorCode};
pub use self::identity::Identity;
pub use self::login_flow::{LoginFlow, LoginStep, MISSING_ROLE_MESSAGE};
pub use self::navigation::{
    CATALOG_ROUTE, DASHBOARD_ROUTE, NavigationEntry, REQUEST_FORM_ROUTE, REQUEST_HISTORY_ROUTE,
    REVIEW_QUEUE_ROUTE, USERS_ROUTE, resolve_navigation,
};
pub use self::notification::{
    DEFAULT_DISPLAY_MS, DEFAULT_FADE_MS, NotificationChannel, NotificationMessage,
    NotificationPhase, NotificationTiming, NotificationView, Severity,
};
pub use self::records::{
    Acknowledgement, AuthenticatedSubject, CitizenRequest, DashboardSummary, Medication,
    NewMedication, NewRequest, RequestStatus, ReviewDecision, ReviewItem, UserAccount, UserDraft,
};
pub use self::role::RoleCode;
pub use self::session::{DEFAULT_TITLE, SessionStore};
pub use self::shell::{
    CompletedLoad, ContentView, FALLBACK_DISPLAY_NAME, HeaderView, LOGIN_PATH, PendingLoad,
    ROOT_PATH, Shell, ShellSnapshot, ShellState, is_root_path,
};
pub use self::ticket::{NavigationGeneration, NavigationTicket};
