//! Request and response bodies.

use serde::Deserialize;
use serde::Serialize;

use crate::error::ApiError;
use crate::model::ListQuery;
use crate::model::PageData;
use crate::model::PageMeta;

/// Body of a `POST /<resource>/find` request.
///
/// Sorting is client-side and is not sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindRequest<'a> {
    pub search: &'a str,
    pub page: u32,
    pub limit: u32,
}

impl<'a> From<&'a ListQuery> for FindRequest<'a> {
    fn from(query: &'a ListQuery) -> Self {
        Self {
            search: &query.search,
            page: query.page,
            limit: query.limit,
        }
    }
}

/// Body of a successful `find` response.
#[derive(Debug, Clone, Deserialize)]
pub struct FindResponse<T> {
    pub data: Vec<T>,
    pub page: PageMeta,
}

impl<T> From<FindResponse<T>> for PageData<T> {
    fn from(response: FindResponse<T>) -> Self {
        PageData::new(response.data, response.page)
    }
}

/// Body of a `DELETE /<resource>` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteRequest<'a> {
    pub id: &'a str,
}

/// Generic `{success, message}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SuccessResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned by the API for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Builds an [`ApiError::Http`] from a failed response body.
///
/// Uses the `message` field when the body is JSON, the raw body otherwise.
pub(crate) fn http_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|err| err.message)
        .unwrap_or_else(|_| body.to_string());
    ApiError::http(status, message)
}

/// Parses a JSON response body, keeping the body on failure.
pub(crate) fn parse_body<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::parse_with_body(e.to_string(), body))
}
