use std::{convert::Infallible, fmt::Display, sync::Arc, time::Instant};

use http::{Method, Request};
use http_body_util::BodyExt;
use hyper::body::Body;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::AppError,
    handlers::container_handler::{create_container_handler, list_containers_handler},
    models::app_state::AppState,
    utils::response_utils::{error_response, return_404, return_405, HttpResponse},
};

/// Entry point for every request on the socket. Never fails; errors are
/// rendered as JSON bodies and logged with the request line.
pub async fn route_handler<B>(
    request: Request<B>,
    state: Arc<AppState>,
) -> Result<HttpResponse, Infallible>
where
    B: Body,
    B::Error: Display,
{
    let started = Instant::now();
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let (response, error) = match dispatch(request, &state).await {
        Ok(response) => (response, None),
        Err(err) => (error_response(&err), Some(err.to_string())),
    };

    let status = response.status().as_u16();
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    match error {
        Some(error) => {
            warn!(id = %request_id, method = %method, uri = %uri, status, latency_ms, error = %error, "request")
        }
        None => info!(id = %request_id, method = %method, uri = %uri, status, latency_ms, "request"),
    }
    Ok(response)
}

async fn dispatch<B>(request: Request<B>, state: &AppState) -> Result<HttpResponse, AppError>
where
    B: Body,
    B::Error: Display,
{
    if request.uri().path().trim_end_matches('/') != "/containers" {
        return Ok(return_404());
    }

    let method = request.method().clone();
    match method {
        Method::GET => {
            let query = search_query(request.uri().query());
            list_containers_handler(state, query.as_deref()).await
        }
        Method::POST => {
            let body = request
                .into_body()
                .collect()
                .await
                .map_err(|err| AppError::BadRequest(err.to_string()))?
                .to_bytes();
            create_container_handler(state, body).await
        }
        _ => Ok(return_405()),
    }
}

/// Value of `q` in the query string, form-decoded.
fn search_query(query: Option<&str>) -> Option<String> {
    query?.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key != "q" {
            return None;
        }
        let value = value.replace('+', " ");
        Some(
            urlencoding::decode(&value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or(value),
        )
    })
}
