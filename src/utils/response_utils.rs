use http::{header::CONTENT_TYPE, HeaderValue, Response, StatusCode};
use http_body_util::Full;
use hyper::body::Bytes;
use serde::Serialize;
use serde_json::json;

use crate::error::AppError;

pub type HttpResponse = Response<Full<Bytes>>;

fn build(status: StatusCode, body: Vec<u8>) -> HttpResponse {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

pub fn json_response<T: Serialize>(status: StatusCode, value: &T) -> HttpResponse {
    match serde_json::to_vec(value) {
        Ok(body) => build(status, body),
        Err(err) => message_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string()),
    }
}

/// `{"message": ...}`, the shape the extension UI reads for both outcomes.
pub fn message_response(status: StatusCode, message: &str) -> HttpResponse {
    build(status, json!({ "message": message }).to_string().into_bytes())
}

pub fn error_response(err: &AppError) -> HttpResponse {
    match err {
        AppError::ValidationFailed(errors) => json_response(
            err.status_code(),
            &json!({ "message": err.to_string(), "errors": errors }),
        ),
        _ => message_response(err.status_code(), &err.to_string()),
    }
}

pub fn return_404() -> HttpResponse {
    message_response(StatusCode::NOT_FOUND, "Not Found")
}

pub fn return_405() -> HttpResponse {
    message_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}
