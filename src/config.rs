// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use clap::ValueEnum;
use url::Url;

pub(crate) const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub(crate) const DEFAULT_API_PREFIX: &str = "/api";
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub(crate) const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Whether the route guard looks at the roles a route declares.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum RolePolicy {
    /// Only `requires_auth` decides; declared roles are left to the server.
    #[default]
    Ignore,
    /// Routes that declare roles also require the signed-in user to hold one.
    Enforce,
}

/// Everything the client needs to know about its environment, fixed at
/// startup.
#[derive(Clone, Debug)]
pub(crate) struct Config {
    pub(crate) api_base_url: Url,
    pub(crate) api_prefix: String,
    pub(crate) timeout: Duration,
    pub(crate) role_policy: RolePolicy,
}

impl Config {
    /// The absolute URL of an API path such as `/auth/login/`.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.api_base_url.as_str().trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        let url = if prefix.is_empty() {
            format!("{base}{path}")
        } else {
            format!("{base}/{prefix}{path}")
        };
        Url::parse(&url)
    }
}

#[cfg(test)]
impl Default for Config {
    fn default() -> Self {
        Self {
            // LINT: The constant is a valid URL.
            #[allow(clippy::unwrap_used)]
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).unwrap(),
            api_prefix: DEFAULT_API_PREFIX.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            role_policy: RolePolicy::default(),
        }
    }
}
