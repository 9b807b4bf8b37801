//! API request and response types

pub mod error;
pub mod json;
pub mod pagination;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use pagination::PaginatedResponse;
