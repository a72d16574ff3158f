// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{env, path::PathBuf};

use async_trait::async_trait;
use clap::Parser;
use log::{error, warn};
use secrecy::{ExposeSecret as _, SecretString};
use tabled::{settings::Style, Table};
use tokio::{
    fs,
    io::{self, AsyncBufReadExt as _, BufReader},
};

use crate::{
    api::{
        auth::{self, ChangePassword, GetCaptcha, GetCurrentUser, Login, ReportLoginFailure, ResetPassword},
        Executor,
    },
    error::{Error, Result},
    password::{self, Prompt, RequestBuilder},
    transport::Transport,
};

use super::print_json;

/// Fetch a login captcha and save its image.
#[derive(Debug, Parser)]
pub(crate) struct Captcha {
    /// Where to write the PNG image.
    #[arg(long, short, default_value = "captcha.png", value_hint = clap::ValueHint::FilePath)]
    output: PathBuf,
}

#[async_trait]
impl super::Command for Captcha {
    async fn execute(self, transport: &Transport) -> Result<()> {
        let captcha = GetCaptcha.fetch(transport).await?.into_data("captcha")?;
        fs::write(&self.output, captcha.png()?).await?;
        println!("{}", captcha.captcha_key);
        Ok(())
    }
}

/// Log in and remember the session.
#[derive(Debug, Parser)]
pub(crate) struct SignIn {
    /// The account password. Prompted for when absent.
    #[arg(long, env = "MATURITY_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// The key of a captcha fetched earlier with `captcha`. When absent a new
    /// captcha is fetched and its code is read from standard input.
    #[arg(long, requires = "captcha_code")]
    captcha_key: Option<String>,

    /// The characters shown in the captcha image.
    #[arg(long, requires = "captcha_key")]
    captcha_code: Option<String>,

    #[clap()]
    username: String,
}

async fn solve_captcha(transport: &Transport) -> Result<(String, String)> {
    let captcha = GetCaptcha.fetch(transport).await?.into_data("captcha")?;
    let path = env::temp_dir().join(format!("{}-captcha.png", env!("CARGO_PKG_NAME")));
    fs::write(&path, captcha.png()?).await?;
    eprint!("Enter the code shown in {}: ", path.display());

    let mut code = String::new();
    let _ = BufReader::new(io::stdin()).read_line(&mut code).await?;
    Ok((captcha.captcha_key, code.trim().to_owned()))
}

#[async_trait]
impl super::Command for SignIn {
    async fn execute(self, transport: &Transport) -> Result<()> {
        let prompt: Vec<Box<dyn Prompt>> = vec![
            Box::new(password::Preset::new(self.password.map(SecretString::new))),
            Box::new(password::RpasswordPrompt),
        ];
        let password = prompt
            .prompt(RequestBuilder::new("Password").into_request())
            .await?
            .ok_or(Error::Command)?;

        let (captcha_key, captcha_code) = match (self.captcha_key, self.captcha_code) {
            (Some(key), Some(code)) => (key, code),
            _ => solve_captcha(transport).await?,
        };

        let login = Login {
            username: self.username.clone(),
            password,
            captcha_key,
            captcha_code,
        };
        match auth::sign_in(transport, login).await {
            Ok(user) => {
                if !transport.session().is_persistent() {
                    warn!("The session is kept in memory and ends when this command exits");
                }
                if let Some(user) = user {
                    println!("{}", Table::new([user]).with(Style::rounded()));
                }
                Ok(())
            }
            Err(Error::Api(failure)) if auth::refused_credentials(&failure) => {
                let report = ReportLoginFailure {
                    username: self.username,
                };
                if let Err(Error::Api(lockout)) = report.execute(transport).await {
                    warn!("{}", lockout.message);
                }
                Err(Error::Api(failure))
            }
            Err(e) => Err(e),
        }
    }
}

/// End the session on the server and forget it locally.
#[derive(Debug, Parser)]
pub(crate) struct SignOut;

#[async_trait]
impl super::Command for SignOut {
    async fn execute(self, transport: &Transport) -> Result<()> {
        auth::sign_out(transport).await
    }
}

/// Show the signed-in user.
#[derive(Debug, Parser)]
pub(crate) struct Whoami {
    /// Print the profile remembered at login instead of asking the server.
    #[arg(long)]
    cached: bool,
}

#[async_trait]
impl super::Command for Whoami {
    async fn execute(self, transport: &Transport) -> Result<()> {
        let session = transport.session();
        if !session.is_authenticated() {
            return Err(Error::Unauthenticated);
        }

        let user = if self.cached {
            session.user()
        } else {
            let user = GetCurrentUser.fetch(transport).await?.into_data("user")?;
            session.set_user_info(user.clone()).await?;
            Some(user)
        };

        match user {
            Some(user) => {
                println!("{}", Table::new([user]).with(Style::rounded()));
                Ok(())
            }
            None => {
                error!("No profile has been stored for this session");
                Err(Error::Command)
            }
        }
    }
}

/// Exchange the refresh token for a new access token.
#[derive(Debug, Parser)]
pub(crate) struct Refresh;

#[async_trait]
impl super::Command for Refresh {
    async fn execute(self, transport: &Transport) -> Result<()> {
        auth::refresh(transport).await
    }
}

/// Ask for a password reset email.
#[derive(Debug, Parser)]
pub(crate) struct RequestReset {
    #[clap()]
    email: String,
}

#[async_trait]
impl super::Command for RequestReset {
    async fn execute(self, transport: &Transport) -> Result<()> {
        let response = ResetPassword { email: self.email }.execute(transport).await?;
        print_json(response.as_ref())
    }
}

/// Change the signed-in user's password.
#[derive(Debug, Parser)]
pub(crate) struct ChangeOwnPassword;

const ATTEMPTS: usize = 3;

async fn new_password(prompt: &impl Prompt) -> Result<(SecretString, SecretString)> {
    let mut mismatch = None;
    for _ in 0..ATTEMPTS {
        let mut first = RequestBuilder::new("New password");
        if let Some(e) = mismatch {
            first = first.with_error(e);
        }
        let new = prompt.prompt(first.into_request()).await?.ok_or(Error::Command)?;
        let confirm = prompt
            .prompt(RequestBuilder::new("Confirm new password").into_request())
            .await?
            .ok_or(Error::Command)?;

        if new.expose_secret() == confirm.expose_secret() {
            return Ok((new, confirm));
        }
        mismatch = Some("The passwords do not match");
    }

    error!("The new password was not confirmed");
    Err(Error::Command)
}

#[async_trait]
impl super::Command for ChangeOwnPassword {
    async fn execute(self, transport: &Transport) -> Result<()> {
        if !transport.session().is_authenticated() {
            return Err(Error::Unauthenticated);
        }

        let prompt = password::RpasswordPrompt;
        let old_password = prompt
            .prompt(RequestBuilder::new("Current password").into_request())
            .await?
            .ok_or(Error::Command)?;
        let (new_password, confirm_password) = new_password(&prompt).await?;

        let response = ChangePassword {
            old_password,
            new_password,
            confirm_password,
        }
        .execute(transport)
        .await?;
        print_json(response.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use crate::{
        command::Command,
        session::tests::session_with_token,
        transport::tests::{config_for, serve, Canned},
    };

    use super::*;

    /// Answers with a fixed script of passwords.
    struct Scripted(Mutex<Vec<&'static str>>);

    #[async_trait]
    impl Prompt for Scripted {
        async fn prompt(&self, _: password::Request) -> Result<Option<SecretString>> {
            let mut script = self.0.lock().unwrap();
            Ok((!script.is_empty()).then(|| SecretString::new(script.remove(0).to_owned())))
        }
    }

    fn sign_in(captcha_code: &str) -> SignIn {
        SignIn {
            password: Some("hunter22".to_owned()),
            captcha_key: Some("k".to_owned()),
            captcha_code: Some(captcha_code.to_owned()),
            username: "school07".to_owned(),
        }
    }

    fn refused(reason: &str) -> Canned {
        Canned::json(
            400,
            &json!({
                "success": false,
                "error": {
                    "code": "ERROR",
                    "message": "登录失败",
                    "details": { "non_field_errors": [reason] },
                },
            }),
        )
    }

    #[tokio::test]
    async fn captcha_mistake_is_not_reported() -> Result<()> {
        let (base, server) = serve(vec![refused("验证码错误")]).await;
        let transport = Transport::new(config_for(base), session_with_token(None).await?)?;

        assert!(matches!(
            sign_in("typo").execute(&transport).await,
            Err(Error::Api(_))
        ));
        let seen = server.await?;
        assert_eq!(seen.len(), 1);
        assert!(seen[0].starts_with("POST /api/auth/login/ HTTP/1.1"));
        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_is_reported() -> Result<()> {
        let (base, server) = serve(vec![
            refused("用户名或密码错误"),
            Canned::json(
                401,
                &json!({ "success": false, "error": { "code": "ERROR", "message": "登录失败，还可尝试2次" } }),
            ),
        ])
        .await;
        let transport = Transport::new(config_for(base), session_with_token(None).await?)?;

        match sign_in("1234").execute(&transport).await {
            Err(Error::Api(failure)) => assert_eq!(failure.message, "登录失败"),
            other => panic!("expected the login to be refused, got {other:?}"),
        }
        let seen = server.await?;
        assert_eq!(seen.len(), 2);
        assert!(seen[1].starts_with("POST /api/auth/login-failed/ HTTP/1.1"));
        assert!(seen[1].contains(r#"{"username":"school07"}"#));
        Ok(())
    }

    #[tokio::test]
    async fn new_password_retries_mismatch() -> Result<()> {
        let prompt = Scripted(Mutex::new(vec!["a", "b", "c", "c"]));
        let (new, confirm) = new_password(&prompt).await?;
        assert_eq!(new.expose_secret(), "c");
        assert_eq!(confirm.expose_secret(), "c");
        Ok(())
    }

    #[tokio::test]
    async fn new_password_gives_up() {
        let prompt = Scripted(Mutex::new(vec!["a", "b", "c", "d", "e", "f"]));
        assert!(matches!(new_password(&prompt).await, Err(Error::Command)));
    }
}
