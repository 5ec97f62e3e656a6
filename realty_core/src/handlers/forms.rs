//! Lead form handlers: session lifecycle and one-shot submission

use crate::{
    error::Result,
    extractors::AppJson,
    leads::{self, SessionView, SubmissionResult},
    models::{request::ApiResponse, FormKind, InputUpdate, OpenSessionRequest},
    validation::FormInput,
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub result: SubmissionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionView>,
}

fn result_status(result: &SubmissionResult) -> StatusCode {
    match result {
        SubmissionResult::Success { .. } => StatusCode::OK,
        SubmissionResult::FieldErrors { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionResult::ApiError { .. } => StatusCode::BAD_GATEWAY,
    }
}

fn submit_response(result: SubmissionResult, session: Option<SessionView>) -> impl IntoResponse {
    let status = result_status(&result);
    let message = match &result {
        SubmissionResult::Success { message } | SubmissionResult::ApiError { message } => {
            Some(message.clone())
        }
        SubmissionResult::FieldErrors { .. } => None,
    };
    let body = ApiResponse {
        success: result.is_success(),
        data: Some(SubmitResponse { result, session }),
        message,
    };
    (status, Json(body))
}

pub async fn handle_open_session(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    AppJson(request): AppJson<OpenSessionRequest>,
) -> Result<impl IntoResponse> {
    let kind: FormKind = kind.parse()?;
    let session = state.forms.open(kind, request.input)?;
    info!("POST /api/forms/{}/sessions - opened {}", kind, session.id());

    Ok((StatusCode::CREATED, Json(ApiResponse::success(session.view()))))
}

pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let session = state.forms.get(id)?;
    Ok(Json(ApiResponse::success(session.view())))
}

pub async fn handle_update_input(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(update): AppJson<InputUpdate>,
) -> Result<impl IntoResponse> {
    let session = state.forms.get(id)?;
    session.update_input(update.fields);
    Ok(Json(ApiResponse::success(session.view())))
}

pub async fn handle_submit_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let session = state.forms.get(id)?;
    info!("POST /api/sessions/{}/submit - {} form", id, session.kind());

    let result = session.submit(state.submitter.clone()).await?;
    Ok(submit_response(result, Some(session.view())))
}

pub async fn handle_close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.forms.close(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn handle_submit_form(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    AppJson(input): AppJson<FormInput>,
) -> Result<impl IntoResponse> {
    let kind: FormKind = kind.parse()?;
    info!("POST /api/forms/{}", kind);

    let result = leads::submit_once(kind, &input, state.submitter.as_ref()).await;
    Ok(submit_response(result, None))
}
