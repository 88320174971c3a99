//! Request dashboard.

use async_trait::async_trait;
use chrono::TimeDelta;

use super::{Page, PageContext, PageData, backend_failure};
use crate::domain::Error;

/// Seconds between dashboard reloads while it stays mounted.
pub const DASHBOARD_REFRESH_SECS: i64 = 10;

/// Request counts by status, refreshed periodically.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardPage;

#[async_trait]
impl Page for DashboardPage {
    fn title(&self) -> &'static str {
        "Painel de Controle"
    }

    async fn load(&self, context: &PageContext) -> Result<PageData, Error> {
        let summary = context
            .backend()
            .dashboard_summary()
            .await
            .map_err(backend_failure("Erro ao carregar o painel."))?;
        Ok(PageData::Dashboard { summary })
    }

    fn refresh_interval(&self) -> Option<TimeDelta> {
        Some(TimeDelta::seconds(DASHBOARD_REFRESH_SECS))
    }
}
