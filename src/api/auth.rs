// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use log::{info, warn};
use secrecy::{ExposeSecret as _, SecretString};
use serde_json::{json, Value};

use crate::{
    error::{Error, Failure, FailureKind, Result},
    model::{
        user::{AccessToken, Captcha, LoginData, User},
        Envelope,
    },
    transport::Transport,
};

use super::{Call, Executor};

pub(crate) struct GetCaptcha;

impl From<GetCaptcha> for Call {
    fn from(_: GetCaptcha) -> Self {
        Self::get("/auth/captcha/").public()
    }
}

impl Executor for GetCaptcha {
    type Response = Envelope<Captcha>;
}

pub(crate) struct Login {
    pub(crate) username: String,
    pub(crate) password: SecretString,
    pub(crate) captcha_key: String,
    pub(crate) captcha_code: String,
}

impl From<Login> for Call {
    fn from(value: Login) -> Self {
        Self::post("/auth/login/")
            .with_json(json!({
                "username": value.username,
                "password": value.password.expose_secret(),
                "captcha_key": value.captcha_key,
                "captcha_code": value.captcha_code,
            }))
            .public()
    }
}

impl Executor for Login {
    type Response = Envelope<LoginData>;
}

/// Counts a failed attempt against the account; the server locks it after
/// three.
pub(crate) struct ReportLoginFailure {
    pub(crate) username: String,
}

impl From<ReportLoginFailure> for Call {
    fn from(value: ReportLoginFailure) -> Self {
        Self::post("/auth/login-failed/")
            .with_json(json!({ "username": value.username }))
            .public()
    }
}

impl Executor for ReportLoginFailure {
    type Response = Value;
}

const BAD_CREDENTIALS: &str = "用户名或密码错误";

/// Whether the server refused a login because of the username or password.
/// Captcha mistakes and locked or disabled accounts are refused with other
/// reasons and must not count as failed attempts.
pub(crate) fn refused_credentials(failure: &Failure) -> bool {
    failure.kind == FailureKind::Status
        && failure
            .body
            .as_ref()
            .and_then(|body| body.pointer("/error/details/non_field_errors"))
            .and_then(Value::as_array)
            .is_some_and(|reasons| {
                reasons
                    .iter()
                    .any(|reason| reason.as_str() == Some(BAD_CREDENTIALS))
            })
}

pub(crate) struct Logout;

impl From<Logout> for Call {
    fn from(_: Logout) -> Self {
        Self::post("/auth/logout/")
    }
}

impl Executor for Logout {
    type Response = Value;
}

pub(crate) struct RefreshToken {
    pub(crate) refresh: SecretString,
}

impl From<RefreshToken> for Call {
    fn from(value: RefreshToken) -> Self {
        Self::post("/auth/refresh/").with_json(json!({ "refresh": value.refresh.expose_secret() }))
    }
}

impl Executor for RefreshToken {
    type Response = Envelope<AccessToken>;
}

pub(crate) struct ResetPassword {
    pub(crate) email: String,
}

impl From<ResetPassword> for Call {
    fn from(value: ResetPassword) -> Self {
        Self::post("/auth/reset-password/").with_json(json!({ "email": value.email }))
    }
}

impl Executor for ResetPassword {
    type Response = Value;
}

pub(crate) struct ChangePassword {
    pub(crate) old_password: SecretString,
    pub(crate) new_password: SecretString,
    pub(crate) confirm_password: SecretString,
}

impl From<ChangePassword> for Call {
    fn from(value: ChangePassword) -> Self {
        Self::post("/auth/change-password/").with_json(json!({
            "old_password": value.old_password.expose_secret(),
            "new_password": value.new_password.expose_secret(),
            "confirm_password": value.confirm_password.expose_secret(),
        }))
    }
}

impl Executor for ChangePassword {
    type Response = Value;
}

pub(crate) struct GetCurrentUser;

impl From<GetCurrentUser> for Call {
    fn from(_: GetCurrentUser) -> Self {
        Self::get("/auth/current-user/")
    }
}

impl Executor for GetCurrentUser {
    type Response = Envelope<User>;
}

/// Logs in and records the issued tokens and profile in the session.
pub(crate) async fn sign_in(transport: &Transport, login: Login) -> Result<Option<User>> {
    let username = login.username.clone();
    let data = login.fetch(transport).await?.into_data("login tokens")?;

    let session = transport.session();
    session.set_token(data.access).await?;
    if let Some(refresh) = data.refresh {
        session.set_refresh_token(refresh).await?;
    }
    if let Some(ref user) = data.user {
        session.set_user_info(user.clone()).await?;
    }
    info!("Signed in as {}", username);
    Ok(data.user)
}

/// Tells the server the session is over, then forgets it locally whatever the
/// server said.
pub(crate) async fn sign_out(transport: &Transport) -> Result<()> {
    let session = transport.session();
    if session.is_authenticated() {
        if let Err(e) = Logout.execute(transport).await {
            warn!("The server did not acknowledge the logout: {}", e);
        }
    }
    session.logout().await
}

/// Exchanges the stored refresh token for a new access token.
pub(crate) async fn refresh(transport: &Transport) -> Result<()> {
    let session = transport.session();
    let refresh = session.refresh_token().ok_or(Error::Unauthenticated)?;
    let data = RefreshToken { refresh }
        .fetch(transport)
        .await?
        .into_data("access token")?;
    session.set_token(data.access).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::Method;

    use crate::{
        api::{tests::route_of, Body},
        error::Result,
        session::tests::{sample_user, session_with_token},
        transport::tests::{config_for, serve, Canned},
    };

    use super::*;

    #[test]
    fn routes() {
        assert_eq!(route_of(GetCaptcha), (Method::GET, "/auth/captcha/".to_owned()));
        assert_eq!(route_of(Logout), (Method::POST, "/auth/logout/".to_owned()));
        assert_eq!(
            route_of(RefreshToken {
                refresh: SecretString::new("r".to_owned())
            }),
            (Method::POST, "/auth/refresh/".to_owned())
        );
        assert_eq!(
            route_of(ResetPassword {
                email: "a@b.c".to_owned()
            }),
            (Method::POST, "/auth/reset-password/".to_owned())
        );
        assert_eq!(
            route_of(ReportLoginFailure {
                username: "u".to_owned()
            }),
            (Method::POST, "/auth/login-failed/".to_owned())
        );
        assert_eq!(
            route_of(GetCurrentUser),
            (Method::GET, "/auth/current-user/".to_owned())
        );
    }

    #[test]
    fn login_body_exposes_credentials() {
        let call = Call::from(Login {
            username: "school07".to_owned(),
            password: SecretString::new("hunter22".to_owned()),
            captcha_key: "k".to_owned(),
            captcha_code: "1234".to_owned(),
        });
        assert_eq!(call.method, Method::POST);
        assert_eq!(call.path, "/auth/login/");
        assert!(call.public);
        assert_eq!(
            call.body,
            Body::Json(json!({
                "username": "school07",
                "password": "hunter22",
                "captcha_key": "k",
                "captcha_code": "1234",
            }))
        );
    }

    #[test]
    fn change_password_body() {
        let call = Call::from(ChangePassword {
            old_password: SecretString::new("a".to_owned()),
            new_password: SecretString::new("bbbbbbbb".to_owned()),
            confirm_password: SecretString::new("bbbbbbbb".to_owned()),
        });
        assert_eq!(call.path, "/auth/change-password/");
        assert_eq!(
            call.body,
            Body::Json(json!({
                "old_password": "a",
                "new_password": "bbbbbbbb",
                "confirm_password": "bbbbbbbb",
            }))
        );
    }

    #[tokio::test]
    async fn sign_in_then_current_user_carries_token() -> Result<()> {
        let user = serde_json::to_value(sample_user())?;
        let (base, server) = serve(vec![
            Canned::json(
                200,
                &json!({
                    "success": true,
                    "message": "登录成功",
                    "data": { "access": "tok-1", "refresh": "ref-1", "user": user },
                }),
            ),
            Canned::json(200, &json!({ "success": true, "data": user })),
        ])
        .await;
        let session = session_with_token(None).await?;
        let transport = Transport::new(config_for(base), Arc::clone(&session))?;

        let signed_in = sign_in(
            &transport,
            Login {
                username: "school07".to_owned(),
                password: SecretString::new("hunter22".to_owned()),
                captcha_key: "k".to_owned(),
                captcha_code: "1234".to_owned(),
            },
        )
        .await?;
        assert_eq!(signed_in, Some(sample_user()));
        assert!(session.is_authenticated());
        assert_eq!(
            session.refresh_token().map(|t| t.expose_secret().clone()).as_deref(),
            Some("ref-1")
        );

        let me = GetCurrentUser.fetch(&transport).await?.into_data("user")?;
        assert_eq!(me, sample_user());

        let seen = server.await?;
        assert!(!seen[0].to_ascii_lowercase().contains("authorization:"));
        assert!(seen[1].to_ascii_lowercase().contains("authorization: bearer tok-1"));
        Ok(())
    }

    #[tokio::test]
    async fn rejected_login_leaves_session_empty() -> Result<()> {
        let (base, server) = serve(vec![Canned::json(
            400,
            &json!({ "success": false, "error": { "code": "ERROR", "message": "登录失败" } }),
        )])
        .await;
        let session = session_with_token(None).await?;
        let transport = Transport::new(config_for(base), Arc::clone(&session))?;

        let result = sign_in(
            &transport,
            Login {
                username: "school07".to_owned(),
                password: SecretString::new("wrong".to_owned()),
                captcha_key: "k".to_owned(),
                captcha_code: "0000".to_owned(),
            },
        )
        .await;
        match result {
            Err(Error::Api(failure)) => {
                assert_eq!(failure.kind, FailureKind::Status);
                assert_eq!(failure.message, "登录失败");
            }
            other => panic!("expected the login to be refused, got {other:?}"),
        }
        assert!(!session.is_authenticated());
        let _ = server.await?;
        Ok(())
    }

    fn refusal(reasons: &[&str]) -> Failure {
        let body = json!({
            "success": false,
            "error": {
                "code": "ERROR",
                "message": "登录失败",
                "details": { "non_field_errors": reasons },
            },
        });
        Failure {
            kind: FailureKind::Status,
            status: Some(reqwest::StatusCode::BAD_REQUEST),
            message: "登录失败".to_owned(),
            body: Some(body),
            raw: None,
        }
    }

    #[test]
    fn only_wrong_credentials_count_as_failed_attempts() {
        assert!(refused_credentials(&refusal(&["用户名或密码错误"])));
        assert!(!refused_credentials(&refusal(&["验证码错误"])));
        assert!(!refused_credentials(&refusal(&["验证码已过期，请刷新"])));
        assert!(!refused_credentials(&refusal(&["账号已被锁定，请稍后再试"])));

        let mut unreachable = refusal(&["用户名或密码错误"]);
        unreachable.kind = FailureKind::Network;
        assert!(!refused_credentials(&unreachable));
    }

    #[tokio::test]
    async fn sign_out_clears_session_even_if_server_fails() -> Result<()> {
        let (base, server) = serve(vec![Canned::text(500, "text/html", "<h1>boom</h1>")]).await;
        let session = session_with_token(Some("tok-1")).await?;
        let transport = Transport::new(config_for(base), Arc::clone(&session))?;

        sign_out(&transport).await?;
        assert!(!session.is_authenticated());
        let _ = server.await?;
        Ok(())
    }

    #[tokio::test]
    async fn refresh_requires_refresh_token() -> Result<()> {
        let transport = Transport::new(
            crate::config::Config::default(),
            session_with_token(Some("tok-1")).await?,
        )?;
        assert!(matches!(refresh(&transport).await, Err(Error::Unauthenticated)));
        Ok(())
    }
}
