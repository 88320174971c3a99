//! Authenticated shell: header, side navigation and content slot.
//!
//! The shell owns the route table built from the session role and the page
//! registry. Navigation is synchronous: it classifies the path and, when a
//! page must be loaded, hands back a [`PendingLoad`] for the caller to drive.
//! Finishing a load applies its result only if no navigation happened since
//! the load was issued.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{debug, warn};

use super::pages::{Page, PageContext, PageData, PageRegistry};
use super::ports::BackendApi;
use super::{
    Error, LandingCarousel, NavigationEntry, NavigationGeneration, NavigationTicket, NewsItem,
    NotificationChannel, NotificationView, RoleCode, SessionStore, resolve_navigation,
};

/// Authenticated root path; the back affordance always targets it.
pub const ROOT_PATH: &str = "/TelaPadrao";
/// Login view path.
pub const LOGIN_PATH: &str = "/Login";

/// Name shown in the header when the session has none.
pub const FALLBACK_DISPLAY_NAME: &str = "Usuário";

/// Whether `path` is one of the spellings of the authenticated root.
pub fn is_root_path(path: &str) -> bool {
    matches!(path, "/" | "/TelaPadrao" | "/TelaPadrao/")
}

/// Shell state, decided by the current path alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellState {
    /// Login view; no shell chrome.
    Login,
    /// Authenticated root showing the news carousel.
    Landing,
    /// A granted page is mounted.
    PageActive {
        /// Entry whose route matched.
        entry: NavigationEntry,
    },
    /// The path matches nothing the role may reach.
    NotFound {
        /// Path that failed to match.
        path: String,
    },
}

/// What the content region shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentView {
    /// Login form.
    Login,
    /// Landing carousel on its current slide.
    Landing(NewsItem),
    /// Neutral placeholder while the page loads.
    Loading,
    /// Data of the mounted page.
    Page(PageData),
    /// The last load failed; the error went to the caller.
    Unavailable,
    /// Static not-found placeholder.
    NotFound,
}

/// Header contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    /// Session display name, or [`FALLBACK_DISPLAY_NAME`].
    pub display_name: String,
    /// Human-readable role.
    pub role_label: &'static str,
    /// Page title; only while a page is active.
    pub title: Option<String>,
    /// Back affordance target; only while a page is active.
    pub back_target: Option<&'static str>,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSnapshot {
    /// Current path.
    pub path: String,
    /// Shell state.
    pub state: ShellState,
    /// Header contents.
    pub header: HeaderView,
    /// Side navigation entries.
    pub navigation: Vec<NavigationEntry>,
    /// Content region.
    pub content: ContentView,
    /// Live notification.
    pub notification: Option<NotificationView>,
}

#[derive(Clone)]
struct MountedRoute {
    entry: NavigationEntry,
    page: Arc<dyn Page>,
}

#[derive(Debug, Clone)]
enum ContentSlot {
    Idle,
    Loading,
    Loaded {
        data: PageData,
        loaded_at: DateTime<Utc>,
    },
    Failed,
}

struct ShellInner {
    path: String,
    role: RoleCode,
    navigation: Vec<NavigationEntry>,
    routes: HashMap<&'static str, MountedRoute>,
    state: ShellState,
    content: ContentSlot,
}

/// Page load issued by a navigation, to be driven by the caller.
pub struct PendingLoad {
    page: Arc<dyn Page>,
    context: PageContext,
    refresh: bool,
}

impl PendingLoad {
    /// Ticket the load was issued under.
    pub const fn ticket(&self) -> &NavigationTicket {
        self.context.ticket()
    }

    /// Run the page loader.
    pub async fn run(self) -> CompletedLoad {
        let result = self.page.load(&self.context).await;
        CompletedLoad {
            ticket: self.context.ticket().clone(),
            refresh: self.refresh,
            result,
        }
    }
}

/// Finished page load, ready to hand back to [`Shell::finish_load`].
pub struct CompletedLoad {
    ticket: NavigationTicket,
    refresh: bool,
    result: Result<PageData, Error>,
}

impl CompletedLoad {
    /// Ticket the load was issued under.
    pub const fn ticket(&self) -> &NavigationTicket {
        &self.ticket
    }
}

/// Shell composer.
pub struct Shell {
    session: Arc<SessionStore>,
    backend: Arc<dyn BackendApi>,
    notifications: Arc<NotificationChannel>,
    clock: Arc<dyn Clock>,
    registry: PageRegistry,
    carousel: LandingCarousel,
    generation: NavigationGeneration,
    inner: Mutex<ShellInner>,
}

impl Shell {
    /// Compose a shell at the login path, with the route table built for
    /// the session's current role.
    pub fn new(
        session: Arc<SessionStore>,
        backend: Arc<dyn BackendApi>,
        notifications: Arc<NotificationChannel>,
        clock: Arc<dyn Clock>,
        registry: PageRegistry,
    ) -> Self {
        let role = session.role();
        let (navigation, routes) = build_routes(&registry, role);
        let carousel = LandingCarousel::new(Arc::clone(&clock));
        Self {
            session,
            backend,
            notifications,
            clock,
            registry,
            carousel,
            generation: NavigationGeneration::new(),
            inner: Mutex::new(ShellInner {
                path: LOGIN_PATH.to_owned(),
                role,
                navigation,
                routes,
                state: ShellState::Login,
                content: ContentSlot::Idle,
            }),
        }
    }

    /// Navigate to `path`.
    ///
    /// Returns the page load to drive when the path mounts a page. Any load
    /// still in flight becomes stale.
    ///
    /// Navigating to [`LOGIN_PATH`] only shows the login view; the session
    /// is left alone. Callers entering the login view go through
    /// [`Shell::logout`] or `LoginFlow::enter`, which clear it.
    pub fn navigate(&self, path: &str) -> Option<PendingLoad> {
        let mut inner = self.lock();
        inner.path = path.to_owned();
        self.sync_role(&mut inner);
        self.enter_current_path(&mut inner)
    }

    /// Rebuild the route table if the session role changed since it was last
    /// built, then re-evaluate the current path.
    pub fn reconcile(&self) -> Option<PendingLoad> {
        let mut inner = self.lock();
        if !self.sync_role(&mut inner) {
            return None;
        }
        self.enter_current_path(&mut inner)
    }

    /// Go back to the authenticated root. History is never consulted.
    pub fn back(&self) {
        // The root never mounts a page, so there is nothing to load.
        let _root_load = self.navigate(ROOT_PATH);
    }

    /// Clear the session and return to the login view.
    ///
    /// # Errors
    ///
    /// Returns the storage error when persisted entries could not be
    /// removed; the shell is at the login view regardless.
    pub fn logout(&self) -> Result<(), Error> {
        let cleared = self.session.clear();
        let _login_load = self.navigate(LOGIN_PATH);
        debug!("logged out");
        cleared
    }

    /// Apply a finished load.
    ///
    /// Returns `Ok(false)` when the load is stale and was discarded.
    ///
    /// # Errors
    ///
    /// Returns the page's load error, unchanged, for the host to handle.
    pub fn finish_load(&self, completed: CompletedLoad) -> Result<bool, Error> {
        let mut inner = self.lock();
        if !completed.ticket.is_current() {
            debug!(
                generation = completed.ticket.generation(),
                "discarding stale page load"
            );
            return Ok(false);
        }
        let now = self.clock.utc();
        match completed.result {
            Ok(data) => {
                inner.content = ContentSlot::Loaded {
                    data,
                    loaded_at: now,
                };
                Ok(true)
            }
            Err(error) => {
                if completed.refresh {
                    if let ContentSlot::Loaded { loaded_at, .. } = &mut inner.content {
                        *loaded_at = now;
                    }
                } else {
                    inner.content = ContentSlot::Failed;
                }
                warn!(path = %inner.path, %error, "page load failed");
                Err(error)
            }
        }
    }

    /// Navigate, load and apply in one step.
    ///
    /// # Errors
    ///
    /// Returns the page's load error.
    pub async fn open(&self, path: &str) -> Result<ShellState, Error> {
        if let Some(load) = self.navigate(path) {
            self.finish_load(load.run().await)?;
        }
        Ok(self.state())
    }

    /// Reload issued when the mounted page's refresh interval has elapsed.
    ///
    /// The current content stays on screen while the reload runs.
    pub fn refresh_due(&self) -> Option<PendingLoad> {
        let inner = self.lock();
        let ShellState::PageActive { entry } = &inner.state else {
            return None;
        };
        let ContentSlot::Loaded { loaded_at, .. } = &inner.content else {
            return None;
        };
        let route = inner.routes.get(entry.route_path())?;
        let interval = route.page.refresh_interval()?;
        if self.clock.utc().signed_duration_since(*loaded_at) < interval {
            return None;
        }
        debug!(path = %inner.path, "page refresh due");
        Some(PendingLoad {
            page: Arc::clone(&route.page),
            context: self.context_with(self.generation.current()),
            refresh: true,
        })
    }

    /// Current state.
    pub fn state(&self) -> ShellState {
        self.lock().state.clone()
    }

    /// Current path.
    pub fn path(&self) -> String {
        self.lock().path.clone()
    }

    /// Side navigation entries, in menu order.
    pub fn navigation(&self) -> Vec<NavigationEntry> {
        self.lock().navigation.clone()
    }

    /// Header contents.
    pub fn header(&self) -> HeaderView {
        let page_active = matches!(self.lock().state, ShellState::PageActive { .. });
        let identity = self.session.identity();
        let display_name = if identity.display_name().trim().is_empty() {
            FALLBACK_DISPLAY_NAME.to_owned()
        } else {
            identity.display_name().to_owned()
        };
        HeaderView {
            display_name,
            role_label: identity.role().label(),
            title: page_active.then(|| self.session.title()),
            back_target: page_active.then_some(ROOT_PATH),
        }
    }

    /// Content region.
    pub fn content(&self) -> ContentView {
        let inner = self.lock();
        match (&inner.state, &inner.content) {
            (ShellState::Login, _) => ContentView::Login,
            (ShellState::Landing, _) => ContentView::Landing(self.carousel.current()),
            (ShellState::NotFound { .. }, _) => ContentView::NotFound,
            (ShellState::PageActive { .. }, ContentSlot::Loaded { data, .. }) => {
                ContentView::Page(data.clone())
            }
            (ShellState::PageActive { .. }, ContentSlot::Failed) => ContentView::Unavailable,
            (ShellState::PageActive { .. }, ContentSlot::Idle | ContentSlot::Loading) => {
                ContentView::Loading
            }
        }
    }

    /// Live notification, if any.
    pub fn notification(&self) -> Option<NotificationView> {
        self.notifications.current()
    }

    /// Capture the whole shell for rendering.
    pub fn snapshot(&self) -> ShellSnapshot {
        ShellSnapshot {
            path: self.path(),
            state: self.state(),
            header: self.header(),
            navigation: self.navigation(),
            content: self.content(),
            notification: self.notification(),
        }
    }

    /// Landing carousel.
    pub const fn carousel(&self) -> &LandingCarousel {
        &self.carousel
    }

    /// Context for page actions issued now. Their notifications are dropped
    /// once the user navigates away.
    pub fn page_context(&self) -> PageContext {
        self.context_with(self.generation.current())
    }

    fn context_with(&self, ticket: NavigationTicket) -> PageContext {
        PageContext::new(
            Arc::clone(&self.session),
            Arc::clone(&self.backend),
            Arc::clone(&self.notifications),
            ticket,
        )
    }

    fn sync_role(&self, inner: &mut ShellInner) -> bool {
        let role = self.session.role();
        if role == inner.role {
            return false;
        }
        let (navigation, routes) = build_routes(&self.registry, role);
        debug!(
            from = inner.role.code(),
            to = role.code(),
            entries = navigation.len(),
            "route table rebuilt"
        );
        inner.role = role;
        inner.navigation = navigation;
        inner.routes = routes;
        true
    }

    fn enter_current_path(&self, inner: &mut ShellInner) -> Option<PendingLoad> {
        let ticket = self.generation.issue();
        let path = inner.path.clone();
        let (state, mounted) = classify(&inner.routes, &path);
        debug!(path = %path, generation = ticket.generation(), state = ?state, "navigated");
        inner.state = state;
        match mounted {
            Some(route) => {
                self.session.set_title(route.page.title());
                inner.content = ContentSlot::Loading;
                Some(PendingLoad {
                    page: route.page,
                    context: self.context_with(ticket),
                    refresh: false,
                })
            }
            None => {
                inner.content = ContentSlot::Idle;
                None
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ShellInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn classify(
    routes: &HashMap<&'static str, MountedRoute>,
    path: &str,
) -> (ShellState, Option<MountedRoute>) {
    if path == LOGIN_PATH {
        return (ShellState::Login, None);
    }
    if is_root_path(path) {
        return (ShellState::Landing, None);
    }
    match routes.get(path) {
        Some(route) => (
            ShellState::PageActive { entry: route.entry },
            Some(route.clone()),
        ),
        None => (
            ShellState::NotFound {
                path: path.to_owned(),
            },
            None,
        ),
    }
}

fn build_routes(
    registry: &PageRegistry,
    role: RoleCode,
) -> (Vec<NavigationEntry>, HashMap<&'static str, MountedRoute>) {
    let navigation = resolve_navigation(role);
    let mut routes = HashMap::with_capacity(navigation.len());
    for entry in &navigation {
        match registry.construct(entry.route_path()) {
            Some(page) => {
                routes.insert(
                    entry.route_path(),
                    MountedRoute {
                        entry: *entry,
                        page,
                    },
                );
            }
            None => warn!(path = entry.route_path(), "no page registered for route"),
        }
    }
    (navigation, routes)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::pages::MockPage;
    use crate::domain::ports::{InMemoryIdentityStorage, MockBackendApi};
    use crate::domain::{
        DashboardSummary, ErrorCode, Medication, NotificationTiming, REQUEST_FORM_ROUTE,
        REVIEW_QUEUE_ROUTE,
    };
    use crate::test_support::MutableClock;
    use rstest::{fixture, rstest};

    struct Harness {
        clock: Arc<MutableClock>,
        session: Arc<SessionStore>,
        shell: Shell,
    }

    fn harness_with(backend: MockBackendApi, registry: PageRegistry, role: RoleCode) -> Harness {
        let clock = Arc::new(MutableClock::default());
        let session = Arc::new(SessionStore::rehydrate(Arc::new(
            InMemoryIdentityStorage::new(),
        )));
        if !role.is_unset() {
            session
                .set_identity("12345678909", "Maria", role)
                .expect("in-memory storage accepts writes");
        }
        let notifications = Arc::new(NotificationChannel::new(
            clock.clone(),
            NotificationTiming::default(),
        ));
        let shell = Shell::new(
            session.clone(),
            Arc::new(backend),
            notifications,
            clock.clone(),
            registry,
        );
        Harness {
            clock,
            session,
            shell,
        }
    }

    fn medications_backend() -> MockBackendApi {
        let mut backend = MockBackendApi::new();
        backend.expect_list_medications().returning(|| {
            Ok(vec![Medication {
                id: 1,
                name: "Dipirona".to_owned(),
                dosage: "500mg".to_owned(),
            }])
        });
        backend
    }

    #[fixture]
    fn citizen() -> Harness {
        harness_with(medications_backend(), PageRegistry::standard(), RoleCode::Citizen)
    }

    #[rstest]
    #[case("/")]
    #[case("/TelaPadrao")]
    #[case("/TelaPadrao/")]
    fn root_paths_land(citizen: Harness, #[case] path: &str) {
        assert!(citizen.shell.navigate(path).is_none());
        assert_eq!(citizen.shell.state(), ShellState::Landing);
        assert!(matches!(citizen.shell.content(), ContentView::Landing(_)));
        let header = citizen.shell.header();
        assert_eq!(header.title, None);
        assert_eq!(header.back_target, None);
    }

    #[rstest]
    #[case(RoleCode::Unset, "/")]
    #[case(RoleCode::Unset, "/TelaPadrao")]
    #[case(RoleCode::Analyst, "/")]
    #[case(RoleCode::Analyst, "/TelaPadrao/")]
    #[case(RoleCode::Manager, "/TelaPadrao")]
    fn root_paths_land_for_any_role(#[case] role: RoleCode, #[case] path: &str) {
        let harness = harness_with(MockBackendApi::new(), PageRegistry::standard(), role);
        assert!(harness.shell.navigate(path).is_none());
        assert_eq!(harness.shell.state(), ShellState::Landing);
        assert!(matches!(harness.shell.content(), ContentView::Landing(_)));
        assert_eq!(harness.session.role(), role);
    }

    #[rstest]
    #[tokio::test]
    async fn granted_path_activates_page(citizen: Harness) {
        let load = citizen
            .shell
            .navigate(REQUEST_FORM_ROUTE)
            .expect("page load issued");
        assert_eq!(citizen.shell.content(), ContentView::Loading);

        assert!(citizen.shell.finish_load(load.run().await).expect("load ok"));
        let ShellState::PageActive { entry } = citizen.shell.state() else {
            panic!("expected an active page");
        };
        assert_eq!(entry.route_path(), REQUEST_FORM_ROUTE);
        assert!(matches!(
            citizen.shell.content(),
            ContentView::Page(PageData::RequestForm { .. })
        ));

        let header = citizen.shell.header();
        assert_eq!(header.title.as_deref(), Some("Nova Solicitação de Medicamento"));
        assert_eq!(header.back_target, Some(ROOT_PATH));
        assert_eq!(header.role_label, "Cidadão");
        assert_eq!(header.display_name, "Maria");
    }

    #[rstest]
    #[case("/rota-inexistente")]
    #[case(REVIEW_QUEUE_ROUTE)]
    fn unmatched_path_is_not_found(citizen: Harness, #[case] path: &str) {
        assert!(citizen.shell.navigate(path).is_none());
        assert_eq!(
            citizen.shell.state(),
            ShellState::NotFound {
                path: path.to_owned()
            }
        );
        assert_eq!(citizen.shell.content(), ContentView::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn back_returns_to_root(citizen: Harness) {
        citizen
            .shell
            .open(REQUEST_FORM_ROUTE)
            .await
            .expect("page opens");
        citizen.shell.back();
        assert_eq!(citizen.shell.state(), ShellState::Landing);
        assert_eq!(citizen.shell.path(), ROOT_PATH);
    }

    #[rstest]
    #[tokio::test]
    async fn stale_load_is_discarded(citizen: Harness) {
        let load = citizen
            .shell
            .navigate(REQUEST_FORM_ROUTE)
            .expect("page load issued");
        citizen.shell.back();

        assert!(!citizen.shell.finish_load(load.run().await).expect("stale"));
        assert_eq!(citizen.shell.state(), ShellState::Landing);
        assert!(matches!(citizen.shell.content(), ContentView::Landing(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn role_change_rebuilds_routes_and_reevaluates_path(citizen: Harness) {
        citizen
            .shell
            .open(REQUEST_FORM_ROUTE)
            .await
            .expect("page opens");

        citizen
            .session
            .set_role(RoleCode::Analyst)
            .expect("role persisted");
        assert!(citizen.shell.reconcile().is_none());
        assert_eq!(
            citizen.shell.state(),
            ShellState::NotFound {
                path: REQUEST_FORM_ROUTE.to_owned()
            }
        );
        let paths: Vec<_> = citizen
            .shell
            .navigation()
            .iter()
            .map(NavigationEntry::route_path)
            .collect();
        assert_eq!(paths, ["/TelaSolicitacoes", "/TelaCadastroMedicamento"]);
        assert!(citizen.shell.reconcile().is_none(), "nothing changed");
    }

    #[rstest]
    fn navigate_picks_up_role_change_without_reconcile(citizen: Harness) {
        citizen
            .session
            .set_role(RoleCode::Manager)
            .expect("role persisted");
        assert!(citizen.shell.navigate("/TelaUsuarios").is_some());
    }

    #[rstest]
    fn logout_clears_session_and_shows_login(citizen: Harness) {
        citizen.shell.navigate(ROOT_PATH);
        citizen.shell.logout().expect("cleared");

        assert_eq!(citizen.shell.state(), ShellState::Login);
        assert_eq!(citizen.shell.content(), ContentView::Login);
        assert!(citizen.session.identity().is_logged_out());
        assert!(citizen.shell.navigation().is_empty());
        assert_eq!(citizen.shell.header().display_name, FALLBACK_DISPLAY_NAME);
    }

    #[rstest]
    #[tokio::test]
    async fn load_failure_propagates_to_caller() {
        let mut backend = MockBackendApi::new();
        backend.expect_list_medications().returning(|| {
            Err(crate::domain::ports::BackendError::transport("refused"))
        });
        let harness = harness_with(backend, PageRegistry::standard(), RoleCode::Citizen);

        let err = harness
            .shell
            .open(REQUEST_FORM_ROUTE)
            .await
            .expect_err("load fails");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
        assert_eq!(harness.shell.content(), ContentView::Unavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn dashboard_refreshes_after_interval() {
        let mut backend = MockBackendApi::new();
        backend
            .expect_dashboard_summary()
            .times(2)
            .returning(|| Ok(DashboardSummary::default()));
        let harness = harness_with(backend, PageRegistry::standard(), RoleCode::Manager);

        harness
            .shell
            .open("/TelaDashboard")
            .await
            .expect("dashboard opens");
        assert!(harness.shell.refresh_due().is_none());

        harness.clock.advance_seconds(10);
        let reload = harness.shell.refresh_due().expect("refresh due");
        assert!(matches!(harness.shell.content(), ContentView::Page(_)));
        assert!(harness.shell.finish_load(reload.run().await).expect("reloaded"));
        assert!(harness.shell.refresh_due().is_none());
    }

    #[rstest]
    fn later_registration_replaces_earlier_page() {
        fn first() -> Arc<dyn Page> {
            let mut page = MockPage::new();
            page.expect_title().return_const("primeira");
            Arc::new(page)
        }
        fn second() -> Arc<dyn Page> {
            let mut page = MockPage::new();
            page.expect_title().return_const("segunda");
            Arc::new(page)
        }
        let mut registry = PageRegistry::empty();
        registry
            .register(REQUEST_FORM_ROUTE, first)
            .register(REQUEST_FORM_ROUTE, second);
        let harness = harness_with(MockBackendApi::new(), registry, RoleCode::Citizen);

        let load = harness.shell.navigate(REQUEST_FORM_ROUTE);
        assert!(load.is_some());
        assert_eq!(harness.session.title(), "segunda");
    }
}
