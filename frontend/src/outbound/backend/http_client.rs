//! Reqwest-backed dispensing backend adapter.
//!
//! This adapter owns transport details only: URL building, timeouts, status
//! mapping and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{
    AcknowledgementDto, CitizenRequestDto, CredentialsDto, DashboardSummaryDto, ErrorBodyDto,
    EvaluationDto, LoginResponseDto, MedicationDto, NewMedicationDto, NewRequestDto,
    PasswordChangeDto, PasswordStatusDto, ReviewItemDto, UserDraftDto, UserDto,
};
use crate::domain::ports::{BackendApi, BackendError};
use crate::domain::{
    Acknowledgement, AuthenticatedSubject, CitizenRequest, Cpf, DashboardSummary,
    LoginCredentials, Medication, NewMedication, NewRequest, ReviewDecision, ReviewItem,
    UserAccount, UserDraft,
};

/// Backend adapter performing JSON requests against one base URL.
pub struct HttpBackendClient {
    client: Client,
    base_url: Url,
}

impl HttpBackendClient {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    /// Base URL every endpoint is resolved against.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|error| BackendError::transport(format!("invalid endpoint {path}: {error}")))
    }

    async fn send<T>(&self, request: RequestBuilder) -> Result<T, BackendError>
    where
        T: DeserializeOwned,
    {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "backend responded");
        if !status.is_success() {
            return Err(BackendError::rejected(
                status.as_u16(),
                ErrorBodyDto::lines_from(body.as_ref()),
            ));
        }
        decode(body.as_ref())
    }

    async fn acknowledge(&self, request: RequestBuilder) -> Result<Acknowledgement, BackendError> {
        let ack: AcknowledgementDto = self.send(request).await?;
        Ok(ack.into())
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn decode<T>(body: &[u8]) -> Result<T, BackendError>
where
    T: DeserializeOwned,
{
    // Some mutations answer 2xx with an empty body.
    let payload: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        body
    };
    serde_json::from_slice(payload)
        .map_err(|error| BackendError::decode(format!("invalid backend JSON payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> BackendError {
    if error.is_timeout() {
        BackendError::timeout(error.to_string())
    } else {
        BackendError::transport(error.to_string())
    }
}

fn collect<D, T>(items: Vec<D>) -> Vec<T>
where
    D: Into<T>,
{
    items.into_iter().map(Into::into).collect()
}

#[async_trait]
impl BackendApi for HttpBackendClient {
    async fn password_status(&self, cpf: &Cpf) -> Result<bool, BackendError> {
        let url = self.endpoint(&format!("api/loginAcesso/{}", cpf.as_str()))?;
        let status: PasswordStatusDto = self.send(self.client.get(url)).await?;
        Ok(status.has_password)
    }

    async fn login(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Vec<AuthenticatedSubject>, BackendError> {
        let url = self.endpoint("api/loginAcesso")?;
        let body = CredentialsDto {
            cpf: credentials.cpf().as_str(),
            password: credentials.password(),
        };
        let response: LoginResponseDto = self.send(self.client.post(url).json(&body)).await?;
        match response {
            LoginResponseDto::Subjects(subjects) => Ok(collect(subjects)),
            LoginResponseDto::Message(message) => Err(BackendError::rejected(
                reqwest::StatusCode::OK.as_u16(),
                message.into_lines(),
            )),
        }
    }

    async fn change_password(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Acknowledgement, BackendError> {
        let url = self.endpoint("api/alterarSenha")?;
        let body = CredentialsDto {
            cpf: credentials.cpf().as_str(),
            password: credentials.password(),
        };
        let response: PasswordChangeDto = self.send(self.client.put(url).json(&body)).await?;
        if !response.sucesso {
            return Err(BackendError::rejected(
                reqwest::StatusCode::OK.as_u16(),
                response.into_lines(),
            ));
        }
        Ok(Acknowledgement {
            lines: response.into_lines(),
            protocol: None,
        })
    }

    async fn list_medications(&self) -> Result<Vec<Medication>, BackendError> {
        let url = self.endpoint("api/medicamentos")?;
        let items: Vec<MedicationDto> = self.send(self.client.get(url)).await?;
        Ok(collect(items))
    }

    async fn create_medication(
        &self,
        medication: &NewMedication,
    ) -> Result<Acknowledgement, BackendError> {
        let url = self.endpoint("api/medicamentos")?;
        let body = NewMedicationDto {
            nome: medication.name(),
            dosagem: medication.dosage(),
        };
        self.acknowledge(self.client.post(url).json(&body)).await
    }

    async fn delete_medication(&self, id: i64) -> Result<Acknowledgement, BackendError> {
        let url = self.endpoint(&format!("api/medicamentos/{id}"))?;
        self.acknowledge(self.client.delete(url)).await
    }

    async fn list_users(&self) -> Result<Vec<UserAccount>, BackendError> {
        let url = self.endpoint("api/usuarios")?;
        let items: Vec<UserDto> = self.send(self.client.get(url)).await?;
        Ok(collect(items))
    }

    async fn save_user(&self, draft: &UserDraft) -> Result<Acknowledgement, BackendError> {
        let url = self.endpoint("api/usuarios")?;
        let body = UserDraftDto {
            cpf: draft.cpf().as_str(),
            nome: draft.name(),
            email: draft.email(),
            papel: draft.role().code(),
        };
        self.acknowledge(self.client.post(url).json(&body)).await
    }

    async fn dashboard_summary(&self) -> Result<DashboardSummary, BackendError> {
        let url = self.endpoint("api/dashboard/resumo")?;
        let summary: DashboardSummaryDto = self.send(self.client.get(url)).await?;
        Ok(summary.into())
    }

    async fn review_queue(&self) -> Result<Vec<ReviewItem>, BackendError> {
        let url = self.endpoint("api/listar_solicitacoes")?;
        let items: Vec<ReviewItemDto> = self.send(self.client.get(url)).await?;
        Ok(collect(items))
    }

    async fn evaluate_request(
        &self,
        protocol: i64,
        decision: ReviewDecision,
    ) -> Result<Acknowledgement, BackendError> {
        let url = self.endpoint("api/avaliar_solicitacao")?;
        let status = decision.status();
        let body = EvaluationDto {
            protocol,
            status: status.as_wire(),
        };
        self.acknowledge(self.client.put(url).json(&body)).await
    }

    async fn citizen_requests(&self, cpf: &str) -> Result<Vec<CitizenRequest>, BackendError> {
        let mut url = self.endpoint("api/minhas_solicitacoes/")?;
        url.path_segments_mut()
            .map_err(|()| BackendError::transport("base URL cannot carry a path"))?
            .pop_if_empty()
            .push(cpf);
        let items: Vec<CitizenRequestDto> = self.send(self.client.get(url)).await?;
        Ok(collect(items))
    }

    async fn submit_request(&self, request: &NewRequest) -> Result<Acknowledgement, BackendError> {
        let url = self.endpoint("api/solicitacoes")?;
        let body = NewRequestDto {
            cpf: &request.cpf,
            medication_id: request.medication_id,
            note: &request.note,
        };
        self.acknowledge(self.client.post(url).json(&body)).await
    }
}
