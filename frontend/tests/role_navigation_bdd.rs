//! Behaviour tests for role-scoped navigation through the shell driver.

use std::sync::Arc;
use std::time::Duration;

use frontend::domain::pages::{PageData, PageRegistry};
use frontend::domain::ports::InMemoryIdentityStorage;
use frontend::domain::{
    ContentView, LoginFlow, NotificationChannel, NotificationTiming, REVIEW_QUEUE_ROUTE,
    RoleCode, SessionStore, Shell, ShellSnapshot, ShellState,
};
use frontend::inbound::{NavigationDriver, NavigationEvent};
use frontend::outbound::backend::HttpBackendClient;
use frontend::test_support::MutableClock;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::json;

mod support;

use support::canned_backend::{CannedBackend, CannedRoutes};

#[derive(Clone)]
struct RuntimeHandle(Arc<tokio::runtime::Runtime>);

#[derive(Default, ScenarioState)]
struct NavigationWorld {
    runtime: Slot<RuntimeHandle>,
    backend: Slot<Arc<CannedBackend>>,
    driver: Slot<Arc<NavigationDriver>>,
    clock: Slot<Arc<MutableClock>>,
    last_frame: Slot<ShellSnapshot>,
}

impl NavigationWorld {
    fn start(&self, role: RoleCode) {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("test runtime");
        let routes = CannedRoutes::default()
            .with(
                "GET /api/listar_solicitacoes",
                200,
                &json!([{
                    "protocolo": 7,
                    "cidadao": "Maria",
                    "medicamento": "Dipirona",
                    "data": "01/03/2025",
                    "status": "EM ANALISE"
                }]),
            )
            .with(
                "GET /api/dashboard/resumo",
                200,
                &json!({ "total": 3, "em_analise": 1, "deferidos": 1, "indeferidos": 1 }),
            );
        let backend = Arc::new(runtime.block_on(CannedBackend::start(routes)));

        let clock = Arc::new(MutableClock::default());
        let session = Arc::new(SessionStore::rehydrate(Arc::new(
            InMemoryIdentityStorage::new(),
        )));
        session
            .set_identity("12345678909", "Pessoa", role)
            .expect("seed identity");
        let client = Arc::new(
            HttpBackendClient::new(backend.base_url(), Duration::from_secs(5)).expect("client"),
        );
        let notifications = Arc::new(NotificationChannel::new(
            clock.clone(),
            NotificationTiming::default(),
        ));
        let shell = Arc::new(Shell::new(
            session.clone(),
            client.clone(),
            notifications,
            clock.clone(),
            PageRegistry::standard(),
        ));
        let login = Arc::new(LoginFlow::new(session, client));

        self.runtime.set(RuntimeHandle(Arc::new(runtime)));
        self.backend.set(backend);
        self.driver.set(Arc::new(NavigationDriver::new(shell, login)));
        self.clock.set(clock);
    }

    fn dispatch(&self, event: NavigationEvent) {
        let runtime = self.runtime.get().expect("runtime should be set");
        let driver = self.driver.get().expect("driver should be set");
        let frame = runtime
            .0
            .block_on(driver.handle(event))
            .expect("event should succeed");
        self.last_frame.set(frame);
    }

    fn frame(&self) -> ShellSnapshot {
        self.last_frame.get().expect("a frame should exist")
    }
}

#[fixture]
fn world() -> NavigationWorld {
    NavigationWorld::default()
}

#[given("a shell for a logged-in analyst")]
fn a_shell_for_a_logged_in_analyst(world: &NavigationWorld) {
    world.start(RoleCode::Analyst);
}

#[given("a shell for a logged-in citizen")]
fn a_shell_for_a_logged_in_citizen(world: &NavigationWorld) {
    world.start(RoleCode::Citizen);
}

#[given("a shell for a logged-in manager")]
fn a_shell_for_a_logged_in_manager(world: &NavigationWorld) {
    world.start(RoleCode::Manager);
}

#[when("the user opens {path}")]
fn the_user_opens(world: &NavigationWorld, path: String) {
    world.dispatch(NavigationEvent::Navigate(path));
}

#[when("the user goes back")]
fn the_user_goes_back(world: &NavigationWorld) {
    world.dispatch(NavigationEvent::Back);
}

#[when("{seconds} seconds pass")]
fn seconds_pass(world: &NavigationWorld, seconds: i64) {
    world
        .clock
        .get()
        .expect("clock should be set")
        .advance_seconds(seconds);
}

#[when("the shell ticks")]
fn the_shell_ticks(world: &NavigationWorld) {
    world.dispatch(NavigationEvent::Tick);
}

#[then("the review queue page is active")]
fn the_review_queue_page_is_active(world: &NavigationWorld) {
    let frame = world.frame();
    assert!(matches!(
        &frame.state,
        ShellState::PageActive { entry } if entry.route_path() == REVIEW_QUEUE_ROUTE
    ));
    let ContentView::Page(PageData::ReviewQueue { items }) = &frame.content else {
        panic!("expected review queue content, got {:?}", frame.content);
    };
    assert_eq!(items.len(), 1);
}

#[then("the header title is {title}")]
fn the_header_title_is(world: &NavigationWorld, title: String) {
    assert_eq!(world.frame().header.title, Some(title));
}

#[then("the shell shows not found")]
fn the_shell_shows_not_found(world: &NavigationWorld) {
    let frame = world.frame();
    assert!(matches!(frame.state, ShellState::NotFound { .. }));
    assert_eq!(frame.content, ContentView::NotFound);
}

#[then("the landing carousel is shown")]
fn the_landing_carousel_is_shown(world: &NavigationWorld) {
    let frame = world.frame();
    assert_eq!(frame.state, ShellState::Landing);
    assert!(matches!(frame.content, ContentView::Landing(_)));
    assert_eq!(frame.header.back_target, None);
}

#[then("the dashboard summary has been requested {count} times")]
fn the_dashboard_summary_has_been_requested(world: &NavigationWorld, count: usize) {
    let backend = world.backend.get().expect("backend should be set");
    let hits = backend
        .routes()
        .iter()
        .filter(|route| route.as_str() == "GET /api/dashboard/resumo")
        .count();
    assert_eq!(hits, count);
}

#[scenario(
    path = "tests/features/role_navigation.feature",
    name = "Analyst opens the review queue"
)]
fn analyst_opens_the_review_queue(world: NavigationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/role_navigation.feature",
    name = "Citizen cannot reach the review queue"
)]
fn citizen_cannot_reach_the_review_queue(world: NavigationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/role_navigation.feature",
    name = "Back returns a manager to the landing carousel"
)]
fn back_returns_a_manager_to_the_landing_carousel(world: NavigationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/role_navigation.feature",
    name = "Dashboard reloads after its refresh interval"
)]
fn dashboard_reloads_after_its_refresh_interval(world: NavigationWorld) {
    drop(world);
}
