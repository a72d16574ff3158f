// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use log::{debug, warn};
use reqwest::{
    multipart::{Form, Part},
    StatusCode,
};
use secrecy::ExposeSecret as _;
use serde_json::Value;

use crate::{
    api::{Body, Call},
    config::Config,
    error::{Failure, FailureKind, Result},
    metadata, model,
    session::Session,
};

/// Turns [`Call`]s into HTTP exchanges against the configured backend.
pub(crate) struct Transport {
    client: reqwest::Client,
    config: Config,
    session: Arc<Session>,
}

impl Transport {
    pub(crate) fn new(config: Config, session: Arc<Session>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(metadata::USER_AGENT.as_str())
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    pub(crate) const fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) const fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub(crate) fn request(&self, call: Call) -> Result<reqwest::Request> {
        let url = self.config.endpoint(&call.path)?;
        let mut builder = self.client.request(call.method, url);

        if !call.query.is_empty() {
            builder = builder.query(&call.query);
        }
        if let Some(timeout) = call.timeout {
            builder = builder.timeout(timeout);
        }
        if !call.public {
            if let Some(token) = self.session.token() {
                builder = builder.bearer_auth(token.expose_secret());
            }
        }

        builder = match call.body {
            Body::Empty => builder,
            Body::Json(ref value) => builder.json(value),
            // The boundary is only known to the form, so the content type is
            // left for reqwest to fill in.
            Body::Multipart(upload) => builder.multipart(Form::new().part(
                upload.field,
                Part::bytes(upload.bytes).file_name(upload.file_name),
            )),
        };

        Ok(builder.build()?)
    }

    /// Performs the call and interprets the response body.
    ///
    /// # Errors
    ///
    /// Every failure to obtain a successful JSON (or empty) response is an
    /// [`crate::error::Error::Api`] carrying a [`Failure`].
    pub(crate) async fn send(&self, call: Call) -> Result<Option<Value>> {
        let request = self.request(call)?;
        let (method, url) = (request.method().clone(), request.url().clone());
        debug!("{} {}", method, url);

        let outcome = match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Ok(text) => interpret(status, &text),
                    Err(e) => Err(Failure::from(e).with_status(status)),
                }
            }
            Err(e) => Err(Failure::from(e)),
        };

        if let Err(ref failure) = outcome {
            warn!("{} {} failed: {}", method, url, failure);
        }
        Ok(outcome?)
    }
}

/// Reads a response body without ever failing on its shape.
///
/// Empty successful bodies are `None`. Bodies that are not JSON, such as the
/// HTML page of a server crash, become a [`FailureKind::NotJson`] failure whose
/// message is the raw text.
pub(crate) fn interpret(status: StatusCode, body: &str) -> Result<Option<Value>, Failure> {
    if body.trim().is_empty() {
        return if status.is_success() {
            Ok(None)
        } else {
            Err(Failure::new(
                FailureKind::Status,
                status.canonical_reason().unwrap_or("request failed"),
            )
            .with_status(status))
        };
    }

    match serde_json::from_str::<Value>(body) {
        Ok(value) if status.is_success() => Ok(Some(value)),
        Ok(value) => Err(Failure {
            kind: FailureKind::Status,
            status: Some(status),
            message: model::error_message(&value).unwrap_or_else(|| status.to_string()),
            body: Some(value),
            raw: None,
        }),
        Err(_) => Err(Failure {
            kind: FailureKind::NotJson,
            status: Some(status),
            message: body.to_owned(),
            body: None,
            raw: Some(body.to_owned()),
        }),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::time::Duration;

    use reqwest::header;
    use serde_json::json;
    use tokio::{
        io::{AsyncReadExt as _, AsyncWriteExt as _},
        net::TcpListener,
        task::JoinHandle,
    };
    use url::Url;

    use crate::{
        api::{news::UploadNewsImage, Executor as _, Upload},
        error::Error,
        session::tests::session_with_token,
    };

    use super::*;

    /// A response the test server plays back.
    pub(crate) struct Canned {
        pub(crate) status: u16,
        pub(crate) content_type: &'static str,
        pub(crate) body: String,
    }

    impl Canned {
        pub(crate) fn json(status: u16, body: &Value) -> Self {
            Self {
                status,
                content_type: "application/json",
                body: body.to_string(),
            }
        }

        pub(crate) fn text(status: u16, content_type: &'static str, body: &str) -> Self {
            Self {
                status,
                content_type,
                body: body.to_owned(),
            }
        }
    }

    fn header_end(buf: &[u8]) -> Option<usize> {
        buf.windows(4).position(|w| w == b"\r\n\r\n").map(|i| i + 4)
    }

    fn content_length(head: &str) -> usize {
        head.lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Serves each canned response to one connection, in order, and hands back
    /// the raw requests it saw.
    pub(crate) async fn serve(responses: Vec<Canned>) -> (Url, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let mut seen = Vec::new();
            for canned in responses {
                let (mut stream, _) = listener.accept().await.unwrap();
                let mut buf = Vec::new();
                let mut chunk = [0_u8; 4096];
                let head_len = loop {
                    let n = stream.read(&mut chunk).await.unwrap();
                    buf.extend_from_slice(&chunk[..n]);
                    if let Some(end) = header_end(&buf) {
                        break end;
                    }
                    assert!(n > 0, "client closed before sending headers");
                };
                let wanted = head_len + content_length(&String::from_utf8_lossy(&buf[..head_len]));
                while buf.len() < wanted {
                    let n = stream.read(&mut chunk).await.unwrap();
                    assert!(n > 0, "client closed before sending the body");
                    buf.extend_from_slice(&chunk[..n]);
                }
                seen.push(String::from_utf8_lossy(&buf).into_owned());

                let reply = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    canned.status,
                    canned.content_type,
                    canned.body.len(),
                    canned.body
                );
                stream.write_all(reply.as_bytes()).await.unwrap();
                stream.shutdown().await.unwrap();
            }
            seen
        });
        (Url::parse(&format!("http://{addr}")).unwrap(), handle)
    }

    pub(crate) fn config_for(base: Url) -> Config {
        Config {
            api_base_url: base,
            ..Config::default()
        }
    }

    #[test]
    fn empty_body_is_absence() {
        assert_eq!(interpret(StatusCode::OK, ""), Ok(None));
        assert_eq!(interpret(StatusCode::NO_CONTENT, "  \n"), Ok(None));
    }

    #[test]
    fn empty_error_body_uses_reason_phrase() {
        let failure = interpret(StatusCode::BAD_GATEWAY, "").unwrap_err();
        assert_eq!(failure.kind, FailureKind::Status);
        assert_eq!(failure.message, "Bad Gateway");
    }

    #[test]
    fn json_error_body_is_kept() {
        let body = json!({ "success": false, "error": { "code": "ERROR", "message": "验证码错误" } });
        let failure = interpret(StatusCode::BAD_REQUEST, &body.to_string()).unwrap_err();
        assert_eq!(failure.kind, FailureKind::Status);
        assert_eq!(failure.status, Some(StatusCode::BAD_REQUEST));
        assert_eq!(failure.message, "验证码错误");
        assert_eq!(failure.body, Some(body));
    }

    #[test]
    fn html_body_becomes_record() {
        let page = "<html><body>Server Error (500)</body></html>";
        let failure = interpret(StatusCode::INTERNAL_SERVER_ERROR, page).unwrap_err();
        assert_eq!(failure.kind, FailureKind::NotJson);
        assert_eq!(failure.raw.as_deref(), Some(page));
        assert_eq!(failure.to_record()["success"], json!(false));
        assert_eq!(failure.to_record()["message"], json!(page));
    }

    #[tokio::test]
    async fn request_attaches_bearer_token() -> Result<()> {
        let transport = Transport::new(Config::default(), session_with_token(Some("abc")).await?)?;
        let request = transport.request(Call::get("/auth/current-user/"))?;
        assert_eq!(
            request.url().as_str(),
            "http://127.0.0.1:8000/api/auth/current-user/"
        );
        assert_eq!(
            request.headers().get(header::AUTHORIZATION).map(|v| v.as_bytes()),
            Some(&b"Bearer abc"[..])
        );
        Ok(())
    }

    #[tokio::test]
    async fn request_omits_token_when_signed_out_or_public() -> Result<()> {
        let signed_out = Transport::new(Config::default(), session_with_token(None).await?)?;
        let request = signed_out.request(Call::get("/news/"))?;
        assert!(request.headers().get(header::AUTHORIZATION).is_none());

        let signed_in = Transport::new(Config::default(), session_with_token(Some("abc")).await?)?;
        let request = signed_in.request(Call::get("/surveys/public/x/").public())?;
        assert!(request.headers().get(header::AUTHORIZATION).is_none());
        Ok(())
    }

    #[tokio::test]
    async fn request_encodes_query_json_and_timeout() -> Result<()> {
        let transport = Transport::new(Config::default(), session_with_token(None).await?)?;
        let request = transport.request(
            Call::post("/applications/1/reject/")
                .with_json(json!({ "reason": "x" }))
                .with_query(vec![("status".to_owned(), "pending".to_owned())])
                .with_timeout(Duration::from_secs(60)),
        )?;
        assert_eq!(request.url().query(), Some("status=pending"));
        assert_eq!(
            request.headers().get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
            Some(&b"application/json"[..])
        );
        assert_eq!(request.timeout(), Some(&Duration::from_secs(60)));
        Ok(())
    }

    #[tokio::test]
    async fn multipart_request_gets_boundary_from_form() -> Result<()> {
        let transport = Transport::new(Config::default(), session_with_token(Some("abc")).await?)?;
        let request = transport.request(Call::post("/admin/news/upload-image/").with_upload(Upload {
            field: "image",
            file_name: "cover.png".to_owned(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }))?;
        let content_type = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
        Ok(())
    }

    #[tokio::test]
    async fn send_parses_json_and_empty_bodies() -> Result<()> {
        let (base, server) = serve(vec![
            Canned::json(200, &json!({ "success": true, "data": [1, 2] })),
            Canned::text(200, "text/plain", ""),
        ])
        .await;
        let transport = Transport::new(config_for(base), session_with_token(Some("abc")).await?)?;

        let value = transport.send(Call::get("/assessments/")).await?;
        assert_eq!(value, Some(json!({ "success": true, "data": [1, 2] })));
        assert_eq!(transport.send(Call::post("/auth/logout/")).await?, None);

        let seen = server.await?;
        assert!(seen[0].starts_with("GET /api/assessments/ HTTP/1.1"));
        assert!(seen[0].to_ascii_lowercase().contains("authorization: bearer abc"));
        assert!(seen[1].starts_with("POST /api/auth/logout/ HTTP/1.1"));
        Ok(())
    }

    #[tokio::test]
    async fn send_turns_html_delete_response_into_failure() -> Result<()> {
        let page = "<h1>Not Found</h1>";
        let (base, server) = serve(vec![Canned::text(404, "text/html", page)]).await;
        let transport = Transport::new(config_for(base), session_with_token(Some("abc")).await?)?;

        match transport.send(Call::delete("/9/delete/")).await {
            Err(Error::Api(failure)) => {
                assert_eq!(failure.kind, FailureKind::NotJson);
                assert_eq!(failure.status, Some(StatusCode::NOT_FOUND));
                assert_eq!(
                    failure.to_record(),
                    json!({ "success": false, "message": page, "raw": page })
                );
            }
            other => panic!("expected a structured failure, got {other:?}"),
        }
        let _ = server.await?;
        Ok(())
    }

    #[tokio::test]
    async fn failed_upload_comes_back_as_record() -> Result<()> {
        let page = "<html><body>Server Error (500)</body></html>";
        let (base, server) = serve(vec![Canned::text(500, "text/html", page)]).await;
        let transport = Transport::new(config_for(base), session_with_token(Some("abc")).await?)?;

        let upload = UploadNewsImage {
            file_name: "cover.png".to_owned(),
            bytes: b"\x89PNG".to_vec(),
        };
        match upload.execute(&transport).await {
            Err(Error::Api(failure)) => {
                assert_eq!(failure.kind, FailureKind::NotJson);
                assert_eq!(failure.status, Some(StatusCode::INTERNAL_SERVER_ERROR));
                assert_eq!(
                    failure.to_record(),
                    json!({ "success": false, "message": page, "raw": page })
                );
            }
            other => panic!("expected a structured failure, got {other:?}"),
        }

        let seen = server.await?;
        assert!(seen[0].starts_with("POST /api/admin/news/upload-image/ HTTP/1.1"));
        let request = seen[0].to_ascii_lowercase();
        assert!(request.contains("authorization: bearer abc"));
        let boundary = request
            .lines()
            .find_map(|line| line.strip_prefix("content-type: multipart/form-data; boundary="))
            .map(str::trim)
            .unwrap();
        assert!(request.contains(&format!("--{boundary}")));
        assert!(request.contains(r#"name="image"; filename="cover.png""#));
        Ok(())
    }

    #[tokio::test]
    async fn send_reports_unreachable_backend() -> Result<()> {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let base = Url::parse(&format!("http://{}", listener.local_addr()?))?;
        drop(listener);

        let transport = Transport::new(config_for(base), session_with_token(None).await?)?;
        match transport.send(Call::get("/news/")).await {
            Err(Error::Api(failure)) => assert_eq!(failure.kind, FailureKind::Network),
            other => panic!("expected a network failure, got {other:?}"),
        }
        Ok(())
    }
}
