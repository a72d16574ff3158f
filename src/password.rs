// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::task;

use crate::error::Result;

#[derive(Debug, Clone)]
pub(crate) struct Request {
    label: &'static str,
    error: Option<String>,
}

pub(crate) struct RequestBuilder {
    label: &'static str,
    error: Option<String>,
}

impl RequestBuilder {
    pub(crate) const fn new(label: &'static str) -> Self {
        Self { label, error: None }
    }

    pub(crate) fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_owned());
        self
    }

    pub(crate) fn into_request(self) -> Request {
        Request {
            label: self.label,
            error: self.error,
        }
    }
}

#[async_trait]
pub(crate) trait Prompt: Send + Sync {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>>;
}

#[async_trait]
impl<T: Prompt + ?Sized> Prompt for Box<T> {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        (**self).prompt(req).await
    }
}

#[async_trait]
impl<T: Prompt> Prompt for Vec<T> {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        for candidate in self {
            if let r @ (Ok(Some(_)) | Err(_)) = candidate.prompt(req.clone()).await {
                return r;
            }
        }

        Ok(None)
    }
}

/// A password given up front, on the command line or in the environment.
/// It answers the first request only, so a retry after a mismatch falls
/// through to the next prompt.
pub(crate) struct Preset {
    password: Option<SecretString>,
}

impl Preset {
    pub(crate) const fn new(password: Option<SecretString>) -> Self {
        Self { password }
    }
}

#[async_trait]
impl Prompt for Preset {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        Ok(if req.error.is_none() {
            self.password.clone()
        } else {
            None
        })
    }
}

pub(crate) struct RpasswordPrompt;

#[async_trait]
impl Prompt for RpasswordPrompt {
    async fn prompt(&self, req: Request) -> Result<Option<SecretString>> {
        if let Some(error) = req.error {
            eprintln!("Error: {error}");
        }

        let label = format!("{}: ", req.label);
        Ok(Some(
            task::spawn_blocking(move || rpassword::prompt_password(label).map(SecretString::new))
                .await??,
        ))
    }
}
