use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use mcontrol_common::{
    params::UpdateStateParams,
    views::{MachineState, UpdateStateResponse},
};
use mcontrol_db::storage::StateStore;
use tracing::debug;

use crate::{auth::Auth, context::ApiContext, error::ApiError};


#[utoipa::path(
    get,
    path = "/api/state",
    tags = ["state"],
    responses((status = 200, description = "The current dashboard state", body = MachineState))
)]
pub async fn get_state(
    State(ctx): State<ApiContext>,
    Auth(_claims): Auth,
) -> Result<Json<MachineState>, ApiError> {
    let state = StateStore::get_state(&*ctx.db)
        .await
        .map_err(ApiError::StateRead)?;

    Ok(Json(state.into()))
}

#[utoipa::path(
    put,
    path = "/api/state",
    tags = ["state"],
    request_body(content = UpdateStateParams, content_type = "application/json"),
    responses((status = 200, description = "State updated", body = UpdateStateResponse))
)]
pub async fn put_state(
    State(ctx): State<ApiContext>,
    Auth(_claims): Auth,
    patch: Result<Json<UpdateStateParams>, JsonRejection>,
) -> Result<Json<UpdateStateResponse>, ApiError> {
    let Json(patch) = patch.map_err(ApiError::StateBody)?;

    debug!(
        fields = ?patch.fields().map(|(k, _)| k).collect::<Vec<_>>(),
        "Updating state"
    );

    StateStore::put_state(&*ctx.db, &patch)
        .await
        .map_err(ApiError::StateWrite)?;

    Ok(Json(UpdateStateResponse {
        success: true,
        message: "Estado actualizado correctamente".into(),
    }))
}
