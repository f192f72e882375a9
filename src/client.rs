use url::Url;

use crate::error::{Result, TicketError};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

pub struct TicketClient<T = HttpTransport> {
    transport: T,
}

impl<T: Transport> TicketClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and hand back whatever settled, redirects included.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.transport.send(request).await
    }

    /// Send a request that must answer 2xx.
    pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse> {
        let method = request.method.clone();
        let path = request.path.clone();
        let response = self.send(request).await?;

        if response.is_redirect() {
            tracing::warn!(%method, %path, location = ?response.location, "redirected, session rejected");
            return Err(TicketError::NotAuthenticated);
        }

        if !response.is_success() {
            tracing::warn!(%method, %path, status = response.status, "request failed");
            return Err(TicketError::ApiError {
                status: response.status,
                message: error_message(&response.body),
            });
        }

        Ok(response)
    }
}

/// Whether a redirect points at the login page.
pub fn redirects_to_login(response: &ApiResponse) -> bool {
    let Some(location) = response.location.as_deref() else {
        return false;
    };
    let path = match Url::parse(location) {
        Ok(url) => url.path().to_string(),
        Err(_) => location.split('?').next().unwrap_or(location).to_string(),
    };
    path.trim_end_matches('/') == "/login"
}

fn error_message(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        "<empty response body>".to_string()
    } else {
        crate::output::truncate(body, 200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::{status, RecordingTransport};

    fn redirect(location: &str) -> ApiResponse {
        ApiResponse {
            status: 302,
            location: Some(location.to_string()),
            ..ApiResponse::default()
        }
    }

    #[test]
    fn test_redirects_to_login() {
        assert!(redirects_to_login(&redirect("/login")));
        assert!(redirects_to_login(&redirect("/login?next=%2Fgroups")));
        assert!(redirects_to_login(&redirect(
            "http://localhost:5000/login?next=%2F"
        )));
        assert!(!redirects_to_login(&redirect("/view-ticket?id=3")));
        assert!(!redirects_to_login(&status(302)));
    }

    #[tokio::test]
    async fn test_request_maps_server_error() {
        let client = TicketClient::new(RecordingTransport::with_responses(vec![ApiResponse {
            status: 500,
            body: "Internal Server Error".to_string(),
            ..ApiResponse::default()
        }]));

        let err = client.request(ApiRequest::get("/")).await.unwrap_err();
        match err {
            TicketError::ApiError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_request_maps_redirect_to_not_authenticated() {
        let client = TicketClient::new(RecordingTransport::with_responses(vec![redirect(
            "/login?next=%2F",
        )]));

        let err = client.request(ApiRequest::get("/")).await.unwrap_err();
        assert!(matches!(err, TicketError::NotAuthenticated));
    }
}
