use axum::{http::StatusCode, response::Response};

use crate::message_response;

pub async fn get_404_not_found() -> Response {
    message_response(StatusCode::NOT_FOUND, "Not found")
}
