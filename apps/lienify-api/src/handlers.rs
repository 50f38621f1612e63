//! HTTP handlers for Lienify API

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use waiver_engine::{list_templates as all_templates, resolve_selection, GeneratedDocument, TemplateStore};
use waiver_types::{ProjectDetails, StepInput, WaiverDraft};

use crate::error::ApiError;
use crate::models::*;
use crate::session::WizardSession;
use crate::state::AppState;

type Download = (StatusCode, [(HeaderName, String); 2], Vec<u8>);

fn attachment(document: GeneratedDocument) -> Download {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, document.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", document.filename),
            ),
        ],
        document.bytes,
    )
}

fn session_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::SessionNotFound(raw.to_string()))
}

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// List the four waiver templates and whether each can be loaded
pub async fn list_templates(State(state): State<Arc<AppState>>) -> Json<Vec<TemplateListing>> {
    let store = state.generator.store();
    let listing = all_templates()
        .into_iter()
        .map(|info| {
            let available = waiver_engine::TemplateId::from_slug(&info.name)
                .is_some_and(|id| store.contains(id));
            TemplateListing { info, available }
        })
        .collect();
    Json(listing)
}

/// Start a new wizard session
pub async fn create_session(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SessionResponse>) {
    let session = WizardSession::new();
    let response = SessionResponse::from(&session);
    state.sessions.write().await.insert(session.id, session);

    tracing::info!("Created session: {}", response.id);
    (StatusCode::CREATED, Json(response))
}

/// Get session by ID
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let uuid = session_id(&id)?;
    let sessions = state.sessions.read().await;
    let session = sessions.get(&uuid).ok_or(ApiError::SessionNotFound(id))?;
    Ok(Json(SessionResponse::from(session)))
}

/// Answer the current step
pub async fn apply_step(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<StepInput>,
) -> Result<Json<SessionResponse>, ApiError> {
    let uuid = session_id(&id)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&uuid)
        .ok_or(ApiError::SessionNotFound(id))?;

    session.apply(input)?;
    tracing::info!("Session {} advanced to {}", uuid, session.step);
    Ok(Json(SessionResponse::from(&*session)))
}

/// Go back one step
pub async fn go_back(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let uuid = session_id(&id)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&uuid)
        .ok_or(ApiError::SessionNotFound(id))?;

    session.back();
    Ok(Json(SessionResponse::from(&*session)))
}

/// Validate the session's draft and generate its waiver
pub async fn generate_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let uuid = session_id(&id)?;
    let request = {
        let sessions = state.sessions.read().await;
        let session = sessions
            .get(&uuid)
            .ok_or_else(|| ApiError::SessionNotFound(id.clone()))?;
        session.ready_request()?
    };

    let document = state
        .generator
        .generate(&request, Utc::now().date_naive())?;

    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&uuid)
        .ok_or(ApiError::SessionNotFound(id))?;
    session.complete(document);

    tracing::info!("Generated waiver for session {}", uuid);
    Ok(Json(SessionResponse::from(&*session)))
}

/// Download the session's generated waiver
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Download, ApiError> {
    let uuid = session_id(&id)?;
    let sessions = state.sessions.read().await;
    let session = sessions.get(&uuid).ok_or(ApiError::SessionNotFound(id))?;
    let document = session.document.clone().ok_or(ApiError::DocumentNotReady)?;
    Ok(attachment(document))
}

/// Discard a session
pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let uuid = session_id(&id)?;
    state
        .sessions
        .write()
        .await
        .remove(&uuid)
        .ok_or(ApiError::SessionNotFound(id))?;

    tracing::info!("Deleted session: {}", uuid);
    Ok(StatusCode::NO_CONTENT)
}

/// Generate a waiver in one request, without a session
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Download, ApiError> {
    let template = resolve_selection(&req.payment_type, &req.payment_received)?;

    let draft = WaiverDraft::new()
        .apply(StepInput::StateSelection { state: req.state })?
        .apply(StepInput::Compliance {
            acknowledged: req.compliance_acknowledged,
        })?
        .apply(StepInput::Role { role: req.role })?
        .apply(StepInput::PaymentType {
            payment_type: template.payment_type(),
        })?
        .apply(StepInput::PaymentReceived {
            payment_received: template.is_unconditional().into(),
        })?
        .apply(StepInput::FirstDelivery {
            first_delivery_date: req.first_delivery_date,
        })?
        .apply(StepInput::ProjectDetails(ProjectDetails {
            owner_name: req.owner_name,
            lienor_name: req.lienor_name,
            project_address: req.project_address,
            job_number: req.job_number,
            property_description: req.property_description,
            amount: req.amount,
            work_through_date: req.work_through_date,
            execution_date: req.execution_date,
        }))?;
    let request = draft.validate()?;

    let today = req.date.unwrap_or_else(|| Utc::now().date_naive());
    let document = state.generator.generate(&request, today)?;
    Ok(attachment(document))
}
