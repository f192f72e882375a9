//! Records created through the server's HTML forms rather than JSON
//! endpoints. A successful post answers with a redirect.

use url::Url;

use crate::client::{redirects_to_login, TicketClient};
use crate::error::{Result, TicketError};
use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::types::{Priority, TicketId};

pub const MAX_GROUP_NAME_LEN: usize = 50;
const UNIVERSAL_GROUP: &str = "universal";

#[derive(Debug, Clone)]
pub struct NewTicket {
    pub title: String,
    pub content: String,
    pub priority: Priority,
    /// Group name; `None` files the ticket where everyone can see it.
    pub group: Option<String>,
}

/// Keep ASCII letters, digits and spaces; the server applies the same filter.
pub fn sanitize_group_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

fn ticket_id_from_location(location: &str) -> Option<TicketId> {
    let url = Url::parse(location)
        .or_else(|_| Url::parse("http://localhost").and_then(|base| base.join(location)))
        .ok()?;
    if url.path() != "/view-ticket" {
        return None;
    }
    url.query_pairs()
        .find(|(key, _)| key == "id")
        .and_then(|(_, value)| value.parse().ok())
        .map(TicketId)
}

fn expect_form_redirect(response: &ApiResponse) -> Result<()> {
    if redirects_to_login(response) {
        return Err(TicketError::NotAuthenticated);
    }
    if response.is_redirect() {
        return Ok(());
    }
    if response.is_success() {
        // the form came back, with the reason flashed into the page
        return Err(TicketError::UnexpectedResponse(
            "the server rejected the form".to_string(),
        ));
    }
    Err(TicketError::ApiError {
        status: response.status,
        message: "form submission failed".to_string(),
    })
}

impl<T: Transport> TicketClient<T> {
    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<TicketId> {
        if ticket.title.is_empty() {
            return Err(TicketError::InvalidInput(
                "ticket must include a title".to_string(),
            ));
        }
        if ticket.content.is_empty() {
            return Err(TicketError::InvalidInput(
                "you need to describe your issue".to_string(),
            ));
        }

        let fields = vec![
            ("ticket_title", ticket.title.clone()),
            ("ticket_content", ticket.content.clone()),
            ("priority", ticket.priority.as_i32().to_string()),
            (
                "group",
                ticket
                    .group
                    .clone()
                    .unwrap_or_else(|| UNIVERSAL_GROUP.to_string()),
            ),
        ];

        let response = self.send(ApiRequest::form("/newticket", fields)).await?;
        expect_form_redirect(&response)?;

        response
            .location
            .as_deref()
            .and_then(ticket_id_from_location)
            .ok_or_else(|| {
                TicketError::UnexpectedResponse(format!(
                    "ticket created but redirect did not name it: {:?}",
                    response.location
                ))
            })
    }

    /// Returns the name as stored, after sanitizing. The server redirects
    /// back to the groups page whether or not the name was free.
    pub async fn create_group(&self, name: &str) -> Result<String> {
        let name = sanitize_group_name(name);
        if name.is_empty() {
            return Err(TicketError::InvalidInput(
                "you must enter a group name".to_string(),
            ));
        }
        if name.len() > MAX_GROUP_NAME_LEN {
            return Err(TicketError::InvalidInput(format!(
                "group name too long (max {MAX_GROUP_NAME_LEN} characters)"
            )));
        }

        let response = self
            .send(ApiRequest::form("/groups", vec![("new_group_name", name.clone())]))
            .await?;
        expect_form_redirect(&response)?;

        Ok(name)
    }
}
