//! Data Transfer Objects for REST request/response serialization.
//!
//! Request bodies are deliberately lenient: missing fields default so that
//! incomplete drafts reach the validator and come back as findings rather
//! than as JSON rejections.

pub mod common_dto;
pub mod event_dto;
pub mod validation_dto;

pub use common_dto::*;
pub use event_dto::*;
pub use validation_dto::*;
