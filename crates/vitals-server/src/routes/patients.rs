use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use vitals_core::models::patient::{Patient, PatientDraft, PatientUpdate};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SortParams {
    pub sort_by: String,
    pub order: Option<String>,
}

pub async fn view_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError> {
    Ok(Json(state.patients.get(&id)?))
}

pub async fn sort_patients(
    State(state): State<AppState>,
    params: Result<Query<SortParams>, QueryRejection>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let Query(params) = params?;
    let patients = state
        .patients
        .list_sorted(&params.sort_by, params.order.as_deref())?;
    Ok(Json(patients))
}

pub async fn create_patient(
    State(state): State<AppState>,
    body: Result<Json<PatientDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageBody>), ApiError> {
    let Json(draft) = body?;
    state.patients.create(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageBody {
            message: "patient created successfully".to_string(),
        }),
    ))
}

pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<PatientUpdate>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Json(update) = body?;
    state.patients.update(&id, update).await?;
    Ok(Json(MessageBody {
        message: "patient updated".to_string(),
    }))
}
