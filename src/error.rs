//! Errors raised while turning source files into content records

use std::path::PathBuf;
use thiserror::Error;

/// A post that cannot become a content record
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{path:?}: missing required front-matter field `{field}`")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("{path:?}: cannot parse {field} `{value}`")]
    InvalidDate {
        path: PathBuf,
        field: &'static str,
        value: String,
    },

    #[error("{path:?}: invalid front-matter: {message}")]
    FrontMatter { path: PathBuf, message: String },
}
