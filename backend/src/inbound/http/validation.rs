//! Extractor configuration and request-shape checks shared by handlers.
//!
//! Body, query and path values that fail to deserialise are reported as
//! `validation_failed` (422) using the same `details.errors` shape as field
//! validation. Pagination windows that parse but are out of range are
//! `invalid_request` (400).

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use pagination::{PageParams, PageRequest, PageRequestError};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, FieldError};

const MALFORMED: &str = "malformed";

fn malformed(location: &'static str, message: String) -> Error {
    debug!(location, %message, "request rejected by extractor");
    let errors = [FieldError::new(location, MALFORMED, message)];
    Error::validation_failed(format!("request {location} is malformed"))
        .with_details(json!({ "errors": errors }))
}

/// JSON body extractor reporting malformed payloads as 422.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            malformed("body", err.to_string()).into()
        })
}

/// Query string extractor reporting malformed parameters as 422.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
            malformed("query", err.to_string()).into()
        })
}

/// Path extractor reporting non-integer identifiers as 422.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| {
        malformed("path", err.to_string()).into()
    })
}

fn page_violation_code(error: &PageRequestError) -> &'static str {
    match error {
        PageRequestError::NegativeSkip { .. } => "negative",
        PageRequestError::NonPositiveLimit { .. } => "not_positive",
    }
}

/// Validate `skip`/`limit` before any query runs.
///
/// # Examples
/// ```
/// use backend::domain::ErrorCode;
/// use backend::inbound::http::validation::page_request;
/// use pagination::PageParams;
///
/// let err = page_request(PageParams { skip: Some(-1), limit: None }).expect_err("negative skip");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// ```
pub fn page_request(params: PageParams) -> Result<PageRequest, Error> {
    PageRequest::try_from(params).map_err(|err| {
        let errors = [FieldError::new(
            err.field(),
            page_violation_code(&err),
            err.to_string(),
        )];
        Error::invalid_request(err.to_string()).with_details(json!({ "errors": errors }))
    })
}
