//! JSON extractor and response wrapper using the API error envelope

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

const JSON_PARSE_ERROR: &str = "json_parse_error";

/// JSON body extractor and response wrapper
///
/// Rejections are reported as [`ApiError`]s with the `json_parse_error`
/// code: 400 for bodies that are not valid JSON or do not match the
/// expected fields, 415 when the content type is missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Consume the extractor and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: DeserializeOwned> Json<T> {
    /// Decode the body of a request that has already passed its other checks
    pub async fn decode(request: Request) -> Result<T, ApiError> {
        Self::from_request(request, &()).await.map(Json::into_inner)
    }
}

impl<T> std::ops::Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        AxumJson::<T>::from_request(req, state)
            .await
            .map(|AxumJson(value)| Json(value))
            .map_err(|rejection| rejection_error(&rejection))
    }
}

fn rejection_error(rejection: &JsonRejection) -> ApiError {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            ApiError::bad_request(format!("Invalid JSON data: {}", err.body_text()))
        }
        JsonRejection::JsonSyntaxError(err) => {
            ApiError::bad_request(format!("Invalid JSON syntax: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::unsupported_media_type(
            "Missing Content-Type header. Expected 'application/json'.",
        ),
        JsonRejection::BytesRejection(err) => {
            ApiError::bad_request(format!("Failed to read request body: {}", err.body_text()))
        }
        _ => ApiError::bad_request("Invalid JSON request"),
    };

    error.with_code(JSON_PARSE_ERROR)
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}
