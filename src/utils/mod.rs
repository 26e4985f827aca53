//! Utility functions shared across layers.
//!
//! - [`url_normalizer`] - scheme completion and validation for link URLs
//! - [`token_codec`] - HS256 bearer token encoding and verification

pub mod token_codec;
pub mod url_normalizer;
