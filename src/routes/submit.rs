use std::fmt::Debug;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::{NewSubmission, SubmitterEmail, SubmitterName};
use crate::routes::error_chain_fmt;
use crate::startup::AppState;
use crate::store::SubmissionId;

pub const SUCCESS_MESSAGE: &str = "Form submitted successfully";

#[derive(Debug, Deserialize)]
pub struct SubmissionData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub rare_disease: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl TryFrom<SubmissionData> for NewSubmission {
    type Error = SubmitError;

    fn try_from(data: SubmissionData) -> Result<Self, Self::Error> {
        let first_name = SubmitterName::parse(data.first_name)
            .map_err(|reason| SubmitError::validation("first_name", reason))?;
        let last_name = SubmitterName::parse(data.last_name)
            .map_err(|reason| SubmitError::validation("last_name", reason))?;
        let email = SubmitterEmail::parse(data.email)
            .map_err(|reason| SubmitError::validation("email", reason))?;

        Ok(Self {
            first_name,
            last_name,
            email,
            rare_disease: data.rare_disease,
            message: data.message,
            submitted_at: Utc::now(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub message: String,
    pub id: String,
}

impl From<SubmissionId> for SubmissionReceipt {
    fn from(id: SubmissionId) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            id: id.into(),
        }
    }
}

#[tracing::instrument(
    name = "Adding a new submission",
    skip(state, payload),
    fields(
        submitter_email = tracing::field::Empty,
        submission_id = tracing::field::Empty,
    ),
)]
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<SubmissionData>, JsonRejection>,
) -> Result<Json<SubmissionReceipt>, SubmitError> {
    let Json(data) = payload?;
    tracing::Span::current().record("submitter_email", &tracing::field::display(&data.email));

    let new_submission: NewSubmission = data.try_into()?;

    let id = state
        .store
        .insert(&new_submission)
        .await
        .map_err(SubmitError::StoreError)?;
    tracing::Span::current().record("submission_id", &tracing::field::display(&id));

    Ok(Json(id.into()))
}

#[derive(thiserror::Error)]
pub enum SubmitError {
    #[error("Invalid request body")]
    MalformedBody(#[from] JsonRejection),
    #[error("Invalid value for `{field}`: {reason}")]
    ValidationError { field: &'static str, reason: String },
    #[error("Failed to store the submission")]
    StoreError(#[source] anyhow::Error),
}

impl SubmitError {
    fn validation(field: &'static str, reason: String) -> Self {
        SubmitError::ValidationError { field, reason }
    }
}

impl Debug for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            SubmitError::MalformedBody(rejection) => (
                rejection.status(),
                Json(serde_json::json!({
                    "error": self.to_string(),
                    "detail": rejection.body_text(),
                })),
            ),
            SubmitError::ValidationError { field, reason } => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({
                    "error": self.to_string(),
                    "field": field,
                    "detail": reason,
                })),
            ),
            SubmitError::StoreError(_) => {
                tracing::error!("{:?}", self);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": self.to_string() })),
                )
            }
        }
        .into_response()
    }
}
