//! Domain entities, validation, ports and services.
//!
//! Purpose: hold the blog's business rules independent of HTTP and storage.
//! Inbound adapters call the driving ports in [`ports`]; outbound adapters
//! implement the repository ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserDraft and Post, PostDraft: validated records and inputs.
//! - UserService, PostService: driving port implementations.

pub mod error;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod trace_id;
pub mod user;
pub mod user_service;
pub mod validation;

pub use self::error::{Error, ErrorCode};
pub use self::post::{Post, PostContent, PostDraft, PostId, PostTitle, PostValidationError};
pub use self::post_service::PostService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, Password, User, UserDraft, UserId, UserValidationError, Username,
};
pub use self::user_service::UserService;
pub use self::validation::{FieldError, ValidationErrors, ViolationCode};
