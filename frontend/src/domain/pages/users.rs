//! User and role management.

use async_trait::async_trait;
use tracing::debug;

use super::{Page, PageContext, PageData, acknowledged, backend_failure};
use crate::domain::{Acknowledgement, Error, RoleCode, UserDraft};

/// Account listing with a create-or-update form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsersPage;

impl UsersPage {
    /// Create the account, or update it when the CPF already exists.
    ///
    /// # Errors
    ///
    /// Returns the validation or backend error after publishing it.
    pub async fn save(
        context: &PageContext,
        cpf: &str,
        name: &str,
        email: &str,
        role: RoleCode,
    ) -> Result<Acknowledgement, Error> {
        let draft = match UserDraft::try_new(cpf, name, email, role) {
            Ok(draft) => draft,
            Err(error) => return context.reject(error),
        };
        debug!(role = draft.role().code(), "saving user");
        let outcome = context
            .backend()
            .save_user(&draft)
            .await
            .map_err(backend_failure("Erro ao salvar."));
        context.report(outcome, |ack| acknowledged(ack, "Usuário salvo!"))
    }
}

#[async_trait]
impl Page for UsersPage {
    fn title(&self) -> &'static str {
        "Gestão de Usuários"
    }

    async fn load(&self, context: &PageContext) -> Result<PageData, Error> {
        let accounts = context
            .backend()
            .list_users()
            .await
            .map_err(backend_failure("Erro ao carregar usuários."))?;
        Ok(PageData::Users { accounts })
    }
}
