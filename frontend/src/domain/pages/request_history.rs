//! Citizen request history.

use async_trait::async_trait;

use super::{Page, PageContext, PageData, backend_failure};
use crate::domain::Error;

/// Requests filed by the logged-in citizen.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestHistoryPage;

#[async_trait]
impl Page for RequestHistoryPage {
    fn title(&self) -> &'static str {
        "Minhas Solicitações"
    }

    async fn load(&self, context: &PageContext) -> Result<PageData, Error> {
        let cpf = context.session().subject_id();
        let requests = context
            .backend()
            .citizen_requests(&cpf)
            .await
            .map_err(backend_failure("Erro ao carregar solicitações."))?;
        Ok(PageData::RequestHistory { requests })
    }
}
