use http::StatusCode;
use hyper::body::Bytes;
use serde_json::json;

use crate::{
    controllers::container_controller,
    error::AppError,
    models::{app_state::AppState, launch_models::LaunchRequest},
    utils::response_utils::{json_response, HttpResponse},
};

/// `GET /containers[?q=...]`
pub async fn list_containers_handler(
    state: &AppState,
    query: Option<&str>,
) -> Result<HttpResponse, AppError> {
    let rows = state.list_rows().await?;
    let rows = match query {
        Some(query) => container_controller::filter_rows(rows, query),
        None => rows,
    };
    Ok(json_response(StatusCode::OK, &rows))
}

/// `POST /containers`
pub async fn create_container_handler(
    state: &AppState,
    body: Bytes,
) -> Result<HttpResponse, AppError> {
    let request: LaunchRequest = if body.iter().all(u8::is_ascii_whitespace) {
        LaunchRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|err| AppError::BadRequest(err.to_string()))?
    };
    container_controller::launch_container(state.runtime.as_ref(), &request).await?;
    Ok(json_response(
        StatusCode::OK,
        &json!({ "message": "Container created" }),
    ))
}
