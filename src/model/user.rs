// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::{self, Result};

use super::enums::Role;

/// The profile the backend returns for the signed-in account.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Tabled)]
pub(crate) struct User {
    #[tabled(rename = "ID")]
    pub(crate) id: u64,
    #[tabled(rename = "Username")]
    pub(crate) username: String,
    #[tabled(rename = "Email", display_with = "display_optional")]
    pub(crate) email: Option<String>,
    #[tabled(rename = "Role")]
    pub(crate) role: Role,
    #[tabled(skip)]
    #[serde(default = "active_by_default")]
    pub(crate) is_active: bool,
    #[tabled(rename = "School", display_with = "display_optional")]
    pub(crate) school_name: Option<String>,
    #[tabled(skip)]
    pub(crate) created_at: Option<String>,
}

const fn active_by_default() -> bool {
    true
}

fn display_optional(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct LoginData {
    pub(crate) access: SecretString,
    pub(crate) refresh: Option<SecretString>,
    pub(crate) user: Option<User>,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct AccessToken {
    pub(crate) access: SecretString,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct Captcha {
    pub(crate) captcha_key: String,
    /// A `data:image/png;base64,...` URL.
    pub(crate) captcha_image: String,
}

impl Captcha {
    pub(crate) fn png(&self) -> Result<Vec<u8>> {
        let (_, encoded) = self
            .captcha_image
            .split_once(";base64,")
            .ok_or(error::Conversion::CaptchaImage)?;
        Ok(base64::decode(encoded).map_err(error::Conversion::from)?)
    }
}
