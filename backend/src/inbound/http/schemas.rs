//! OpenAPI schema definitions for domain and envelope types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape so the generated document
//! matches what handlers return.

use utoipa::ToSchema;

use crate::inbound::http::posts::PostResponse;
use crate::inbound::http::users::UserResponse;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// Malformed request or out-of-range pagination window (400).
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Field validation failed (422).
    #[schema(rename = "validation_failed")]
    ValidationFailed,
    /// The requested resource does not exist (404).
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with stored state (409).
    #[schema(rename = "conflict")]
    Conflict,
    /// Storage is unreachable (503).
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server (500).
    #[schema(rename = "internal_error")]
    InternalError,
}

/// One rejected field inside `details.errors`.
#[derive(ToSchema)]
#[schema(as = FieldError)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FieldErrorSchema {
    /// Offending field, or `body`/`query`/`path` for unparsable input.
    #[schema(example = "email")]
    field: String,
    /// Machine-readable violation code.
    #[schema(example = "invalid_format")]
    code: String,
    /// Human-readable explanation.
    #[schema(example = "email must be a valid address")]
    message: String,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "user 42 not found")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details, for example `{"errors": [FieldError, ..]}`.
    details: Option<serde_json::Value>,
}

/// Paginated users envelope.
#[derive(ToSchema)]
#[schema(as = UserPage)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserPageSchema {
    /// Number of users across all pages.
    #[schema(example = 42)]
    total: u64,
    /// Offset echoed from the request.
    #[schema(example = 0)]
    skip: i64,
    /// Page size echoed from the request.
    #[schema(example = 10)]
    limit: i64,
    /// Users in this page, in id order.
    data: Vec<UserResponse>,
}

/// Paginated posts envelope.
#[derive(ToSchema)]
#[schema(as = PostPage)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PostPageSchema {
    /// Number of posts across all pages.
    #[schema(example = 42)]
    total: u64,
    /// Offset echoed from the request.
    #[schema(example = 0)]
    skip: i64,
    /// Page size echoed from the request.
    #[schema(example = 10)]
    limit: i64,
    /// Posts in this page, in id order.
    data: Vec<PostResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    #[case("invalid_request")]
    #[case("validation_failed")]
    #[case("not_found")]
    #[case("conflict")]
    #[case("service_unavailable")]
    #[case("internal_error")]
    fn error_code_schema_lists_every_code(#[case] code: &str) {
        assert!(schema_to_json::<ErrorCodeSchema>().contains(code), "missing {code}");
    }

    #[rstest]
    fn schema_names_match_wire_types() {
        assert_eq!(ErrorCodeSchema::name(), "ErrorCode");
        assert_eq!(ErrorSchema::name(), "Error");
        assert_eq!(FieldErrorSchema::name(), "FieldError");
        assert_eq!(UserPageSchema::name(), "UserPage");
        assert_eq!(PostPageSchema::name(), "PostPage");
    }

    #[rstest]
    fn error_schema_exposes_envelope_fields() {
        let json = schema_to_json::<ErrorSchema>();
        for field in ["code", "message", "trace_id", "details"] {
            assert!(json.contains(field), "missing {field}");
        }
    }

    #[rstest]
    fn page_schemas_reference_item_types() {
        assert!(schema_to_json::<UserPageSchema>().contains("UserResponse"));
        assert!(schema_to_json::<PostPageSchema>().contains("PostResponse"));
    }
}
