//! Medication catalog management.

use async_trait::async_trait;
use tracing::debug;

use super::{Page, PageContext, PageData, acknowledged, backend_failure};
use crate::domain::{Acknowledgement, Error, NewMedication};

/// Catalog listing with create and delete actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogPage;

impl CatalogPage {
    /// Add a medication. Both fields are required.
    ///
    /// # Errors
    ///
    /// Returns the validation or backend error after publishing it.
    pub async fn create(
        context: &PageContext,
        name: &str,
        dosage: &str,
    ) -> Result<Acknowledgement, Error> {
        let medication = match NewMedication::try_new(name, dosage) {
            Ok(medication) => medication,
            Err(error) => return context.reject(error),
        };
        debug!(name = medication.name(), "creating medication");
        let outcome = context
            .backend()
            .create_medication(&medication)
            .await
            .map_err(backend_failure("Erro ao salvar."));
        context.report(outcome, |ack| acknowledged(ack, "Medicamento cadastrado!"))
    }

    /// Delete a medication. The backend deactivates it instead when requests
    /// still reference it.
    ///
    /// # Errors
    ///
    /// Returns the backend error after publishing it.
    pub async fn delete(context: &PageContext, id: i64) -> Result<Acknowledgement, Error> {
        debug!(id, "deleting medication");
        let outcome = context
            .backend()
            .delete_medication(id)
            .await
            .map_err(backend_failure("Erro ao excluir."));
        context.report(outcome, |ack| {
            acknowledged(ack, "Operação realizada com sucesso.")
        })
    }
}

#[async_trait]
impl Page for CatalogPage {
    fn title(&self) -> &'static str {
        "Cadastro de Medicamentos"
    }

    async fn load(&self, context: &PageContext) -> Result<PageData, Error> {
        let medications = context
            .backend()
            .list_medications()
            .await
            .map_err(backend_failure("Erro ao carregar medicamentos."))?;
        Ok(PageData::Catalog { medications })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::pages::test_helpers::harness;
    use crate::domain::ports::MockBackendApi;
    use crate::domain::{RoleCode, Severity};

    #[tokio::test]
    async fn create_requires_both_fields() {
        let mut backend = MockBackendApi::new();
        backend.expect_create_medication().never();
        let harness = harness(backend, RoleCode::Manager);

        CatalogPage::create(&harness.context, "Dipirona", "")
            .await
            .expect_err("dosage required");
        let view = harness.notifications.current().expect("published");
        assert_eq!(view.message.severity(), Severity::Warning);
        assert_eq!(view.message.lines(), ["Preencha todos os campos"]);
    }

    #[tokio::test]
    async fn create_prefers_backend_message() {
        let mut backend = MockBackendApi::new();
        backend
            .expect_create_medication()
            .withf(|medication| medication.name() == "Dipirona" && medication.dosage() == "500mg")
            .times(1)
            .return_once(|_| {
                Ok(Acknowledgement {
                    lines: vec!["Medicamento incluído".to_owned()],
                    protocol: None,
                })
            });
        let harness = harness(backend, RoleCode::Manager);

        CatalogPage::create(&harness.context, " Dipirona ", "500mg")
            .await
            .expect("created");
        let view = harness.notifications.current().expect("published");
        assert_eq!(view.message.lines(), ["Medicamento incluído"]);
    }

    #[tokio::test]
    async fn delete_falls_back_to_default_confirmation() {
        let mut backend = MockBackendApi::new();
        backend
            .expect_delete_medication()
            .withf(|id| *id == 4)
            .times(1)
            .return_once(|_| Ok(Acknowledgement::default()));
        let harness = harness(backend, RoleCode::Manager);

        CatalogPage::delete(&harness.context, 4).await.expect("deleted");
        let view = harness.notifications.current().expect("published");
        assert_eq!(view.message.lines(), ["Operação realizada com sucesso."]);
    }
}
