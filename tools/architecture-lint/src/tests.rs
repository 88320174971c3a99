//! Unit tests for the architecture lint.

use camino::Utf8PathBuf;
use rstest::rstest;

use super::*;

fn lint_one(file: &str, contents: &str) -> Result<(), ArchitectureLintError> {
    lint_sources(&[LintSource {
        file: Utf8PathBuf::from(file),
        contents: contents.to_owned(),
    }])
}

#[rstest]
#[case(
    "inbound/driver.rs",
    "use crate::domain::Shell; fn drive(shell: &Shell) { let _ = shell.state(); }",
    true
)]
#[case(
    "inbound/driver.rs",
    "use crate::outbound::backend::HttpBackendClient; fn drive() { let _ = HttpBackendClient::new; }",
    false
)]
#[case(
    "inbound/driver.rs",
    "use frontend::outbound::storage::FileIdentityStorage; fn drive() {}",
    false
)]
#[case("inbound/events.rs", "use reqwest::Client; fn parse() {}", false)]
#[case(
    "domain/session.rs",
    "use crate::inbound::NavigationEvent; fn thing() { let _ = 1; }",
    false
)]
#[case(
    "domain/session.rs",
    "fn root(dir: &cap_std::fs::Dir) -> bool { dir.exists(\"identidade\") }",
    false
)]
#[case(
    "domain/shell.rs",
    "use crate::config::FrontendSettings; fn thing() {}",
    false
)]
#[case(
    "domain/notification.rs",
    "use serde_json::Value; use tracing::debug; fn thing(_: Value) { debug!(\"ok\"); }",
    true
)]
#[case(
    "outbound/backend/http_client.rs",
    "use super::super::super::inbound::events; fn thing() {}",
    false
)]
#[case(
    "outbound/storage/file_storage.rs",
    "use crate::domain::ports::IdentityStorage; use cap_std::fs::Dir; fn thing(_: Dir) {}",
    true
)]
fn detects_boundary_violations(#[case] file: &str, #[case] contents: &str, #[case] ok: bool) {
    let result = lint_one(file, contents);
    assert_eq!(result.is_ok(), ok, "result: {result:?}");
}

#[rstest]
fn files_outside_the_layers_are_rejected() {
    let err = lint_one("config.rs", "fn load() {}").expect_err("unknown layer");
    assert!(matches!(err, ArchitectureLintError::Parse { .. }));
}

#[rstest]
fn duplicate_imports_are_reported_once() {
    let err = lint_one(
        "domain/pages/catalog.rs",
        "use reqwest::Client; fn a(_: reqwest::Client) {} fn b(_: reqwest::Url) {}",
    )
    .expect_err("reqwest in domain");
    let ArchitectureLintError::Violations(violations) = err else {
        panic!("expected violations, got {err:?}");
    };
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations.first().map(|violation| violation.message.as_str()),
        Some("domain module must not depend on external crate `reqwest`")
    );
}
