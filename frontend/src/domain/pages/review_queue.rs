//! Analyst review queue.

use async_trait::async_trait;
use tracing::debug;

use super::{Page, PageContext, PageData, acknowledged, backend_failure};
use crate::domain::{Acknowledgement, Error, ReviewDecision};

/// Requests waiting for an analyst decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewQueuePage;

impl ReviewQueuePage {
    /// Approve or deny the request with `protocol`.
    ///
    /// # Errors
    ///
    /// Returns the backend error after publishing it.
    pub async fn evaluate(
        context: &PageContext,
        protocol: i64,
        decision: ReviewDecision,
    ) -> Result<Acknowledgement, Error> {
        debug!(protocol, status = decision.status().as_wire(), "evaluating request");
        let outcome = context
            .backend()
            .evaluate_request(protocol, decision)
            .await
            .map_err(backend_failure("Erro ao atualizar status."));
        context.report(outcome, |ack| acknowledged(ack, decision.confirmation()))
    }
}

#[async_trait]
impl Page for ReviewQueuePage {
    fn title(&self) -> &'static str {
        "Fila de Análise"
    }

    async fn load(&self, context: &PageContext) -> Result<PageData, Error> {
        let items = context
            .backend()
            .review_queue()
            .await
            .map_err(backend_failure("Erro ao carregar solicitações."))?;
        Ok(PageData::ReviewQueue { items })
    }
}
