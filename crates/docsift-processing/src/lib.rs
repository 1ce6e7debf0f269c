//! Docsift Processing Library
//!
//! Upload validation and the post-conversion heuristics that run on
//! converted document text.

pub mod invoice;
pub mod validator;

pub use invoice::extract_invoice_fields;
pub use validator::{UploadValidator, ValidationError};
