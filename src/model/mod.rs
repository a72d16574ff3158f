// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

pub(crate) mod enums;
pub(crate) mod user;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{self, Result};

/// The uniform wrapper the backend puts around most of its responses.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub(crate) success: bool,
    pub(crate) message: Option<String>,
    pub(crate) data: Option<T>,
    pub(crate) error: Option<ErrorBody>,
}

impl<T> Envelope<T> {
    /// Unwraps `data`, naming `what` when the server left it out.
    pub(crate) fn into_data(self, what: &'static str) -> Result<T> {
        self.data
            .ok_or_else(|| error::Conversion::MissingData(what).into())
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct ErrorBody {
    pub(crate) code: Option<String>,
    pub(crate) message: String,
    pub(crate) details: Option<Value>,
}

/// Picks the most specific human-readable message out of an error payload.
///
/// Understands the envelope (`error.message`, then `message`) and the plain
/// `detail` field Django REST framework produces for auth and 404 errors.
pub(crate) fn error_message(body: &Value) -> Option<String> {
    body.pointer("/error/message")
        .or_else(|| body.get("message"))
        .or_else(|| body.get("detail"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}
