//! DTOs for the dispensing backend's JSON payloads.
//!
//! Field names follow the backend's Portuguese wire format. Each DTO maps
//! into a domain record in one pass.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Acknowledgement, AuthenticatedSubject, CitizenRequest, DashboardSummary, Medication,
    RequestStatus, ReviewItem, RoleCode, UserAccount,
};

/// `mensagem` arrives either as one string or as a list of lines.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum MessageDto {
    One(String),
    Many(Vec<String>),
}

impl MessageDto {
    pub(super) fn into_lines(self) -> Vec<String> {
        match self {
            Self::One(line) => vec![line],
            Self::Many(lines) => lines,
        }
    }
}

fn lines_of(message: Option<MessageDto>) -> Vec<String> {
    message.map(MessageDto::into_lines).unwrap_or_default()
}

/// Body of a non-2xx response.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    mensagem: Option<MessageDto>,
}

impl ErrorBodyDto {
    /// Message lines from a raw body; bodies that are not the expected JSON
    /// carry no message.
    pub(super) fn lines_from(body: &[u8]) -> Vec<String> {
        serde_json::from_slice::<Self>(body)
            .map(Self::into_lines)
            .unwrap_or_default()
    }

    pub(super) fn into_lines(self) -> Vec<String> {
        lines_of(self.mensagem)
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CredentialsDto<'a> {
    #[serde(rename = "codUsuarioCPF")]
    pub(super) cpf: &'a str,
    #[serde(rename = "desSenha")]
    pub(super) password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct PasswordStatusDto {
    #[serde(rename = "idtTemSenha", default = "default_true")]
    pub(super) has_password: bool,
}

const fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub(super) struct SubjectDto {
    #[serde(rename = "codUsuarioCPF", default)]
    cpf: Option<String>,
    #[serde(rename = "nomUsuario", default)]
    name: Option<String>,
    #[serde(rename = "idtPapel", default)]
    role: Option<String>,
}

impl From<SubjectDto> for AuthenticatedSubject {
    fn from(dto: SubjectDto) -> Self {
        Self {
            cpf: dto.cpf.unwrap_or_default().trim().to_owned(),
            name: dto.name.unwrap_or_default(),
            role_code: dto.role.unwrap_or_default().trim().to_owned(),
        }
    }
}

/// `POST /api/loginAcesso` answers with a list of subjects, or with a
/// message object when nothing matched.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum LoginResponseDto {
    Subjects(Vec<SubjectDto>),
    Message(ErrorBodyDto),
}

#[derive(Debug, Deserialize)]
pub(super) struct PasswordChangeDto {
    #[serde(default)]
    pub(super) sucesso: bool,
    #[serde(default)]
    pub(super) mensagem: Option<MessageDto>,
}

impl PasswordChangeDto {
    pub(super) fn into_lines(self) -> Vec<String> {
        lines_of(self.mensagem)
    }
}

/// Success payload of mutations: `{tipo, mensagem, protocolo}`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct AcknowledgementDto {
    #[serde(default)]
    mensagem: Option<MessageDto>,
    #[serde(default)]
    protocolo: Option<i64>,
}

impl From<AcknowledgementDto> for Acknowledgement {
    fn from(dto: AcknowledgementDto) -> Self {
        Self {
            lines: lines_of(dto.mensagem),
            protocol: dto.protocolo,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct MedicationDto {
    id: i64,
    nome: String,
    #[serde(default)]
    dosagem: Option<String>,
}

impl From<MedicationDto> for Medication {
    fn from(dto: MedicationDto) -> Self {
        Self {
            id: dto.id,
            name: dto.nome,
            dosage: dto.dosagem.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct NewMedicationDto<'a> {
    pub(super) nome: &'a str,
    pub(super) dosagem: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    cpf: String,
    nome: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    papel: Option<String>,
    #[serde(default)]
    papel_nome: Option<String>,
    #[serde(default)]
    ativo: Option<bool>,
}

impl From<UserDto> for UserAccount {
    fn from(dto: UserDto) -> Self {
        Self {
            cpf: dto.cpf.trim().to_owned(),
            name: dto.nome,
            email: dto.email.unwrap_or_default(),
            role: RoleCode::from_code(dto.papel.as_deref().unwrap_or_default()),
            role_name: dto.papel_nome.unwrap_or_default(),
            active: dto.ativo.unwrap_or(true),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct UserDraftDto<'a> {
    pub(super) cpf: &'a str,
    pub(super) nome: &'a str,
    pub(super) email: &'a str,
    pub(super) papel: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct DashboardSummaryDto {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    em_analise: u64,
    #[serde(default)]
    deferidos: u64,
    #[serde(default)]
    indeferidos: u64,
}

impl From<DashboardSummaryDto> for DashboardSummary {
    fn from(dto: DashboardSummaryDto) -> Self {
        Self {
            total: dto.total,
            in_review: dto.em_analise,
            approved: dto.deferidos,
            denied: dto.indeferidos,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ReviewItemDto {
    protocolo: i64,
    #[serde(default)]
    cidadao: String,
    #[serde(default)]
    medicamento: String,
    #[serde(default)]
    data: String,
    #[serde(default)]
    status: String,
}

impl From<ReviewItemDto> for ReviewItem {
    fn from(dto: ReviewItemDto) -> Self {
        Self {
            protocol: dto.protocolo,
            citizen: dto.cidadao,
            medication: dto.medicamento,
            date: dto.data,
            status: RequestStatus::from_wire(&dto.status),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CitizenRequestDto {
    protocolo: i64,
    #[serde(default)]
    medicamento: String,
    #[serde(default)]
    data: String,
    #[serde(default)]
    status: String,
}

impl From<CitizenRequestDto> for CitizenRequest {
    fn from(dto: CitizenRequestDto) -> Self {
        Self {
            protocol: dto.protocolo,
            medication: dto.medicamento,
            date: dto.data,
            status: RequestStatus::from_wire(&dto.status),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct EvaluationDto<'a> {
    #[serde(rename = "idSolicitacao")]
    pub(super) protocol: i64,
    pub(super) status: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct NewRequestDto<'a> {
    #[serde(rename = "codUsuarioCPF")]
    pub(super) cpf: &'a str,
    #[serde(rename = "idMedicamento")]
    pub(super) medication_id: i64,
    #[serde(rename = "observacao")]
    pub(super) note: &'a str,
}
