// SPDX-FileCopyrightText: 2022 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::{api::Executor, error::Result, transport::Transport};

pub(crate) mod admin;
pub(crate) mod assessment;
pub(crate) mod auth;
pub(crate) mod legend;
pub(crate) mod navigate;
pub(crate) mod news;
pub(crate) mod region;
pub(crate) mod school;
pub(crate) mod survey;

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, transport: &Transport) -> Result<()>;
}

/// Pretty-prints a response body. An empty body prints nothing.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: Option<&T>) -> Result<()> {
    if let Some(value) = value {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Sends `endpoint` and prints whatever body comes back.
pub(crate) async fn show<E>(endpoint: E, transport: &Transport) -> Result<()>
where
    E: Executor,
    E::Response: Serialize,
{
    let response = endpoint.execute(transport).await?;
    print_json(response.as_ref())
}

/// The string the backend uses for a vocabulary term, e.g. `nine_year`.
pub(crate) fn wire<T: Serialize>(term: &T) -> Result<String> {
    Ok(match serde_json::to_value(term)? {
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Appends a `key=<term>` filter when one was chosen.
pub(crate) fn filter<T: Serialize>(
    mut params: Vec<(String, String)>,
    key: &str,
    term: Option<T>,
) -> Result<Vec<(String, String)>> {
    if let Some(term) = term {
        params.push((key.to_owned(), wire(&term)?));
    }
    Ok(params)
}

/// Parses a `key=value` query parameter.
pub(crate) fn parse_param(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .ok_or_else(|| format!("expected key=value, got {s:?}"))
}

/// Parses a JSON request body given on the command line.
pub(crate) fn parse_json(s: &str) -> Result<Value, String> {
    serde_json::from_str(s).map_err(|e| e.to_string())
}
