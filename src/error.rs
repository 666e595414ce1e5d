//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("DATABASE_URL must be set. Did you forget to provision a database?")]
    MissingDatabaseUrl,
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
    #[error("could not find the build directory: {0}, make sure to build the client first")]
    MissingStaticDir(PathBuf),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("{table}.{column} references missing row {id}")]
    MissingReference {
        table: &'static str,
        column: &'static str,
        id: i32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    Missing,
    InvalidType,
}

/// A step into the body: an object key or an array index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(k) => Some(k),
            PathSegment::Index(_) => None,
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => f.write_str(k),
            PathSegment::Index(i) => write!(f, "{}", i),
        }
    }
}

/// One field that failed validation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub code: IssueCode,
    pub path: Vec<PathSegment>,
    pub expected: &'static str,
    pub received: &'static str,
    pub message: String,
}

/// Every failing field of one request body.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<ValidationIssue>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.0.push(issue);
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    /// First issue reported for the field, if any.
    pub fn for_field(&self, name: &str) -> Option<&ValidationIssue> {
        self.0
            .iter()
            .find(|i| i.path.first().and_then(PathSegment::as_key) == Some(name))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|i| {
                let path: Vec<String> = i.path.iter().map(ToString::to_string).collect();
                format!("{}: {}", path.join("."), i.message)
            })
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}: {errors}")]
    Validation {
        message: &'static str,
        errors: ValidationErrors,
    },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error("{message}: {source}")]
    Store {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Wrap a store failure with the client-facing message for the route.
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Store { message, source }
    }

    pub fn invalid(message: &'static str) -> impl FnOnce(ValidationErrors) -> AppError {
        move |errors| AppError::Validation { message, errors }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        ErrorBody {
            message: message.into(),
            errors: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation { message, errors } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: message.to_string(),
                    errors: Some(errors),
                },
            ),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, ErrorBody::message(message)),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, ErrorBody::message(message)),
            AppError::Store { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::message(message))
            }
        };
        (status, Json(body)).into_response()
    }
}
