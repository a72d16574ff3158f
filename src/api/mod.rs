// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! One request descriptor per backend endpoint.
//!
//! Every endpoint is a plain struct that converts into a [`Call`] and names the
//! type its response body parses into. None of them validate their inputs; the
//! backend reports malformed identifiers itself.

pub(crate) mod admin;
pub(crate) mod assessment;
pub(crate) mod auth;
pub(crate) mod news;
pub(crate) mod region_admin;
pub(crate) mod school;
pub(crate) mod survey;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::{self, Result},
    transport::Transport,
};

/// Query parameters, in the order they are sent.
pub(crate) type Params = Vec<(String, String)>;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Upload {
    pub(crate) field: &'static str,
    pub(crate) file_name: String,
    pub(crate) bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Body {
    Empty,
    Json(Value),
    Multipart(Upload),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Call {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Params,
    pub(crate) body: Body,
    pub(crate) timeout: Option<Duration>,
    /// Public calls never carry the session's bearer token.
    pub(crate) public: bool,
}

impl Call {
    pub(crate) fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Params::new(),
            body: Body::Empty,
            timeout: None,
            public: false,
        }
    }

    pub(crate) fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub(crate) fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub(crate) fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub(crate) fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub(crate) fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub(crate) fn with_json(mut self, body: Value) -> Self {
        self.body = Body::Json(body);
        self
    }

    pub(crate) fn with_upload(mut self, upload: Upload) -> Self {
        self.body = Body::Multipart(upload);
        self
    }

    pub(crate) fn with_query(mut self, query: Params) -> Self {
        self.query = query;
        self
    }

    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn public(mut self) -> Self {
        self.public = true;
        self
    }
}

#[async_trait]
pub(crate) trait Executor: Into<Call> + Send + Sized {
    type Response: DeserializeOwned + Send;

    /// Sends the call. `None` means the server answered with an empty body.
    async fn execute(self, transport: &Transport) -> Result<Option<Self::Response>> {
        match transport.send(self.into()).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Like [`Executor::execute`], but an empty body is an error.
    async fn fetch(self, transport: &Transport) -> Result<Self::Response> {
        self.execute(transport)
            .await?
            .ok_or_else(|| error::Conversion::MissingData("response body").into())
    }
}
