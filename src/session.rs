use crate::client::{redirects_to_login, TicketClient};
use crate::error::{Result, TicketError};
use crate::transport::{ApiRequest, ApiResponse, Transport};

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub remember: bool,
}

/// A form post that logs the user in answers with a redirect away from
/// `/login` and a fresh session cookie. Anything else is `rejected`.
fn session_from_redirect(response: ApiResponse, rejected: TicketError) -> Result<String> {
    if !response.is_redirect() || redirects_to_login(&response) {
        tracing::debug!(status = response.status, "form rejected");
        return Err(rejected);
    }

    response.session.ok_or_else(|| {
        TicketError::UnexpectedResponse("logged in but no session cookie was set".into())
    })
}

impl<T: Transport> TicketClient<T> {
    /// Log in through the HTML form and return the session cookie value.
    ///
    /// The server redirects on success and re-renders the form (200) when the
    /// email or password is wrong.
    pub async fn login(&self, credentials: &Credentials) -> Result<String> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(TicketError::InvalidInput(
                "email and password are required".to_string(),
            ));
        }

        let mut fields = vec![
            ("email", credentials.email.trim().to_string()),
            ("password", credentials.password.clone()),
        ];
        if credentials.remember {
            fields.push(("checkbox", "on".to_string()));
        }

        let response = self.send(ApiRequest::form("/login", fields)).await?;
        session_from_redirect(response, TicketError::LoginFailed)
    }

    /// Create an account and return the session it is logged in with.
    ///
    /// The server re-renders the form (200) when the email is taken or the
    /// account details are refused.
    pub async fn sign_up(&self, account: &NewAccount) -> Result<String> {
        if account.email.trim().is_empty() || account.password.is_empty() {
            return Err(TicketError::InvalidInput(
                "email and password are required".to_string(),
            ));
        }
        if account.password != account.confirm_password {
            return Err(TicketError::InvalidInput(
                "passwords don't match".to_string(),
            ));
        }

        let mut fields = vec![
            ("email", account.email.trim().to_string()),
            ("username", account.username.clone()),
            ("password1", account.password.clone()),
            ("password2", account.confirm_password.clone()),
        ];
        if account.remember {
            fields.push(("checkbox", "on".to_string()));
        }

        let response = self.send(ApiRequest::form("/sign-up", fields)).await?;
        session_from_redirect(response, TicketError::SignUpRejected)
    }

    pub async fn logout(&self) -> Result<()> {
        let response = self.send(ApiRequest::get("/logout")).await?;
        if response.is_redirect() || response.is_success() {
            Ok(())
        } else {
            Err(TicketError::ApiError {
                status: response.status,
                message: "logout failed".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::{status, RecordingTransport};
    use crate::transport::Body;

    fn credentials(remember: bool) -> Credentials {
        Credentials {
            email: " dev@example.com ".to_string(),
            password: "hunter2".to_string(),
            remember,
        }
    }

    #[tokio::test]
    async fn test_login_returns_session_cookie() {
        let client = TicketClient::new(RecordingTransport::with_responses(vec![ApiResponse {
            status: 302,
            location: Some("/".to_string()),
            session: Some("eyJfZnJlc2giOnRydWV9".to_string()),
            body: String::new(),
        }]));

        let session = client.login(&credentials(true)).await.unwrap();
        assert_eq!(session, "eyJfZnJlc2giOnRydWV9");

        let requests = client.transport().requests();
        assert_eq!(requests[0].path, "/login");
        assert_eq!(
            requests[0].body,
            Body::Form(vec![
                ("email", "dev@example.com".to_string()),
                ("password", "hunter2".to_string()),
                ("checkbox", "on".to_string()),
            ])
        );
    }

    #[tokio::test]
    async fn test_login_rerendered_form_means_failure() {
        let client = TicketClient::new(RecordingTransport::with_responses(vec![status(200)]));
        let err = client.login(&credentials(false)).await.unwrap_err();
        assert!(matches!(err, TicketError::LoginFailed));
    }

    #[tokio::test]
    async fn test_login_requires_credentials() {
        let client = TicketClient::new(RecordingTransport::new());
        let err = client
            .login(&Credentials {
                email: String::new(),
                password: String::new(),
                remember: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TicketError::InvalidInput(_)));
        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_logout_follows_redirect_status() {
        let client = TicketClient::new(RecordingTransport::with_responses(vec![status(302)]));
        client.logout().await.unwrap();
        assert_eq!(client.transport().requests()[0], ApiRequest::get("/logout"));
    }

    fn new_account(confirm: &str) -> NewAccount {
        NewAccount {
            email: "new@example.com".to_string(),
            username: "newbie".to_string(),
            password: "s3cret".to_string(),
            confirm_password: confirm.to_string(),
            remember: false,
        }
    }

    #[tokio::test]
    async fn test_sign_up_returns_session_cookie() {
        let client = TicketClient::new(RecordingTransport::with_responses(vec![ApiResponse {
            status: 302,
            location: Some("/".to_string()),
            session: Some("fresh".to_string()),
            body: String::new(),
        }]));

        let session = client.sign_up(&new_account("s3cret")).await.unwrap();
        assert_eq!(session, "fresh");

        let requests = client.transport().requests();
        assert_eq!(requests[0].path, "/sign-up");
        assert_eq!(
            requests[0].body,
            Body::Form(vec![
                ("email", "new@example.com".to_string()),
                ("username", "newbie".to_string()),
                ("password1", "s3cret".to_string()),
                ("password2", "s3cret".to_string()),
            ])
        );
    }

    #[tokio::test]
    async fn test_sign_up_rerendered_form_means_rejected() {
        let client = TicketClient::new(RecordingTransport::with_responses(vec![status(200)]));
        let err = client.sign_up(&new_account("s3cret")).await.unwrap_err();
        assert!(matches!(err, TicketError::SignUpRejected));
    }

    #[tokio::test]
    async fn test_sign_up_mismatched_passwords_sends_nothing() {
        let client = TicketClient::new(RecordingTransport::new());
        let err = client.sign_up(&new_account("typo")).await.unwrap_err();
        assert!(matches!(err, TicketError::InvalidInput(_)));
        assert!(client.transport().requests().is_empty());
    }
}
