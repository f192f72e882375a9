//! HTTP seam between the action client and the ticket server.
//!
//! Every request goes through [`Transport`], so the action layer never
//! touches `reqwest` directly. The real implementation never follows
//! redirects: the server answers unauthenticated calls with a redirect to
//! `/login`, and form posts answer success with a redirect whose `Location`
//! carries the created record.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

use crate::error::{Result, TicketError};

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    Form(Vec<(&'static str, String)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Body,
}

impl ApiRequest {
    pub fn json(method: Method, path: &str, body: Value) -> Self {
        Self {
            method,
            path: path.to_string(),
            body: Body::Json(body),
        }
    }

    pub fn form(path: &str, fields: Vec<(&'static str, String)>) -> Self {
        Self {
            method: Method::POST,
            path: path.to_string(),
            body: Body::Form(fields),
        }
    }

    pub fn get(path: &str) -> Self {
        Self {
            method: Method::GET,
            path: path.to_string(),
            body: Body::Empty,
        }
    }
}

/// What came back once a request settled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub location: Option<String>,
    pub session: Option<String>,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

pub struct HttpTransport {
    http: Client,
    base_url: Url,
    session: Option<String>,
}

impl HttpTransport {
    pub fn new(base_url: Url, session: Option<String>, timeout: std::time::Duration) -> Result<Self> {
        let http = Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|_| TicketError::InvalidUrl(format!("{}{}", self.base_url, path)))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.endpoint(&request.path)?;
        tracing::debug!(method = %request.method, %url, "sending request");

        let mut builder = self.http.request(request.method.clone(), url);
        if let Some(session) = &self.session {
            builder = builder.header(COOKIE, format!("{SESSION_COOKIE}={session}"));
        }
        builder = match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder
                .header(CONTENT_TYPE, "application/json")
                .json(value),
            Body::Form(fields) => builder.form(fields),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        let session = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(session_from_set_cookie);
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read response body>".to_string());

        tracing::debug!(status, "request settled");

        Ok(ApiResponse {
            status,
            location,
            session,
            body,
        })
    }
}

/// Extract the session value from one `Set-Cookie` header.
fn session_from_set_cookie(header: &str) -> Option<String> {
    let pair = header.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    if name.trim() == SESSION_COOKIE && !value.is_empty() {
        Some(value.to_string())
    } else {
        None
    }
}

#[cfg(test)]
pub mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// In-memory transport that records every request and replays canned
    /// responses in order (200 once the queue runs dry).
    #[derive(Default)]
    pub struct RecordingTransport {
        requests: Mutex<Vec<ApiRequest>>,
        responses: Mutex<VecDeque<ApiResponse>>,
    }

    impl RecordingTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_responses(responses: Vec<ApiResponse>) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                responses: Mutex::new(responses.into()),
            }
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    pub fn status(status: u16) -> ApiResponse {
        ApiResponse {
            status,
            ..ApiResponse::default()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| status(200)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_set_cookie() {
        assert_eq!(
            session_from_set_cookie("session=abc.def; HttpOnly; Path=/"),
            Some("abc.def".to_string())
        );
        assert_eq!(session_from_set_cookie("remember_token=1|x; Path=/"), None);
        assert_eq!(session_from_set_cookie("session=; Expires=Thu, 01 Jan 1970"), None);
        assert_eq!(session_from_set_cookie("garbage"), None);
    }

    #[test]
    fn test_response_classification() {
        let ok = testing::status(200);
        assert!(ok.is_success() && !ok.is_redirect());
        let found = testing::status(302);
        assert!(found.is_redirect() && !found.is_success());
        let error = testing::status(500);
        assert!(!error.is_success() && !error.is_redirect());
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let transport = HttpTransport::new(
            Url::parse("http://localhost:5000").unwrap(),
            None,
            std::time::Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            transport.endpoint("/view-ticket?id=4").unwrap().as_str(),
            "http://localhost:5000/view-ticket?id=4"
        );
    }

    /// One-shot HTTP server on loopback: answers a single request with
    /// `reply` and hands back the raw request text.
    async fn serve_once(reply: &'static str) -> (Url, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 1024];
            while !received.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
            }
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&received).into_owned()
        });

        (Url::parse(&format!("http://{addr}")).unwrap(), handle)
    }

    #[tokio::test]
    async fn test_send_keeps_redirect_and_session_cookie() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 302 FOUND\r\n\
             Location: /login?next=%2F\r\n\
             Set-Cookie: session=abc; HttpOnly; Path=/\r\n\
             Content-Length: 0\r\n\
             Connection: close\r\n\r\n",
        )
        .await;
        let transport = HttpTransport::new(
            base_url,
            Some("tok".to_string()),
            std::time::Duration::from_secs(5),
        )
        .unwrap();

        let response = transport.send(ApiRequest::get("/logout")).await.unwrap();
        assert_eq!(response.status, 302);
        assert_eq!(response.location.as_deref(), Some("/login?next=%2F"));
        assert_eq!(response.session.as_deref(), Some("abc"));

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /logout http/1.1"));
        assert!(request.contains("cookie: session=tok"));
    }
}
