// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, io, result};

use reqwest::StatusCode;
use thiserror::Error;

pub(crate) type Result<T, E = Error> = result::Result<T, E>;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("IO operation failed: {0}")]
    Io(#[from] io::Error),
    #[error("JSON format error: {0}")]
    Json(serde_json::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("data conversion error: {0}")]
    Conversion(#[from] Conversion),
    #[error("API error: {0}")]
    Api(#[from] Failure),
    #[error("you must log in before running this command")]
    Unauthenticated,
    #[error("command execution failed")]
    Command,
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(clippy::wildcard_enum_match_arm)]
        match value.classify() {
            serde_json::error::Category::Io => Self::Io(value.into()),
            _ => Self::Json(value),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Io(value.into())
    }
}

#[derive(Error, Debug)]
pub(crate) enum Conversion {
    #[error("captcha image is not a base64 data URL")]
    CaptchaImage,
    #[error("captcha image is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("server accepted the request but returned no {0}")]
    MissingData(&'static str),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum FailureKind {
    /// The request never produced a response.
    Network,
    Timeout,
    /// The server answered with a non-success status.
    Status,
    /// The body could not be parsed as JSON, e.g. an HTML error page.
    NotJson,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Status => "status",
            Self::NotJson => "non-JSON response",
        })
    }
}

/// The failed half of every transport call.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} failure{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
pub(crate) struct Failure {
    pub(crate) kind: FailureKind,
    pub(crate) status: Option<StatusCode>,
    pub(crate) message: String,
    pub(crate) body: Option<serde_json::Value>,
    pub(crate) raw: Option<String>,
}

impl Failure {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            body: None,
            raw: None,
        }
    }

    pub(crate) fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// The structured record handed to callers that expect the backend's
    /// `{success, message}` shape.
    pub(crate) fn to_record(&self) -> serde_json::Value {
        let mut record = serde_json::json!({
            "success": false,
            "message": self.message,
        });
        if let Some(raw) = &self.raw {
            record["raw"] = raw.clone().into();
        }
        record
    }
}

impl From<reqwest::Error> for Failure {
    fn from(value: reqwest::Error) -> Self {
        let kind = if value.is_timeout() {
            FailureKind::Timeout
        } else {
            FailureKind::Network
        };
        let failure = Self::new(kind, value.to_string());
        match value.status() {
            Some(status) => failure.with_status(status),
            None => failure,
        }
    }
}
