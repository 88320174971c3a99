//! Citizen request form.

use async_trait::async_trait;
use tracing::debug;

use super::{Page, PageContext, PageData, backend_failure};
use crate::domain::{Acknowledgement, Error, NewRequest, NotificationMessage};

/// Form for filing a new dispensing request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestFormPage;

impl RequestFormPage {
    /// Submit a request for the logged-in citizen.
    ///
    /// `medication_id` is the selected catalog entry; `None` means nothing
    /// was selected and fails validation without calling the backend.
    ///
    /// # Errors
    ///
    /// Returns the validation or backend error after publishing it.
    pub async fn submit(
        context: &PageContext,
        medication_id: Option<i64>,
        note: &str,
    ) -> Result<Acknowledgement, Error> {
        let Some(medication_id) = medication_id else {
            return context.reject(Error::invalid_request("Selecione um medicamento."));
        };
        let request = NewRequest {
            cpf: context.session().subject_id(),
            medication_id,
            note: note.trim().to_owned(),
        };
        debug!(medication_id, "submitting request");
        let outcome = context
            .backend()
            .submit_request(&request)
            .await
            .map_err(backend_failure("Erro ao salvar."));
        context.report(outcome, |ack| match ack.protocol {
            Some(protocol) => {
                NotificationMessage::success(format!("Solicitação enviada! Protocolo: {protocol}"))
            }
            None => NotificationMessage::success("Solicitação enviada!"),
        })
    }
}

#[async_trait]
impl Page for RequestFormPage {
    fn title(&self) -> &'static str {
        "Nova Solicitação de Medicamento"
    }

    async fn load(&self, context: &PageContext) -> Result<PageData, Error> {
        let medications = context
            .backend()
            .list_medications()
            .await
            .map_err(backend_failure("Falha ao buscar medicamentos."))?;
        Ok(PageData::RequestForm { medications })
    }
}
