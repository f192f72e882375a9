//! The ticket action client: one JSON request per user action, followed by
//! the effect the page should apply once the server has answered.

use std::fmt;

use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};

use crate::client::TicketClient;
use crate::error::Result;
use crate::transport::{ApiRequest, Transport};
use crate::types::{CommentId, GroupId, Rank, TicketId, UserId};

/// Content of the comment posted on behalf of whoever resolves a ticket.
pub const RESOLVING_COMMENT: &str = "I resolved this ticket";

/// What the caller should do once an action succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", content = "path", rename_all = "snake_case")]
pub enum Effect {
    /// Go back to the ticket list at `/`.
    NavigateRoot,
    /// Refresh the page the action was taken on.
    Reload,
    /// Open another page.
    Navigate(String),
    /// Nothing to refresh.
    Nothing,
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::NavigateRoot => write!(f, "navigate to /"),
            Effect::Reload => write!(f, "reload"),
            Effect::Navigate(path) => write!(f, "navigate to {path}"),
            Effect::Nothing => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    DeleteTicket,
    ResolveTicket,
    ViewTicket,
    KickUser,
    RerankUser,
    LeaveGroup,
    JoinGroup,
    PostComment,
    DeleteComment,
}

impl Endpoint {
    pub const ALL: [Endpoint; 9] = [
        Endpoint::DeleteTicket,
        Endpoint::ResolveTicket,
        Endpoint::ViewTicket,
        Endpoint::KickUser,
        Endpoint::RerankUser,
        Endpoint::LeaveGroup,
        Endpoint::JoinGroup,
        Endpoint::PostComment,
        Endpoint::DeleteComment,
    ];

    pub fn method(self) -> Method {
        match self {
            Endpoint::DeleteTicket
            | Endpoint::KickUser
            | Endpoint::LeaveGroup
            | Endpoint::DeleteComment => Method::DELETE,
            Endpoint::ResolveTicket | Endpoint::RerankUser => Method::PATCH,
            Endpoint::JoinGroup | Endpoint::PostComment => Method::POST,
            Endpoint::ViewTicket => Method::GET,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::DeleteTicket => "/delete-ticket",
            Endpoint::ResolveTicket => "/resolve-ticket",
            Endpoint::ViewTicket => "/view-ticket",
            Endpoint::KickUser => "/kick-user",
            Endpoint::RerankUser => "/rerank-user",
            Endpoint::LeaveGroup => "/leave-group",
            Endpoint::JoinGroup => "/join-group",
            Endpoint::PostComment => "/post-comment",
            Endpoint::DeleteComment => "/delete-comment",
        }
    }

    /// JSON body fields; empty for plain page links.
    pub fn body_fields(self) -> &'static [&'static str] {
        match self {
            Endpoint::DeleteTicket | Endpoint::ResolveTicket => &["ticketID"],
            Endpoint::ViewTicket => &[],
            Endpoint::KickUser | Endpoint::LeaveGroup | Endpoint::JoinGroup => {
                &["userID", "groupID"]
            }
            Endpoint::RerankUser => &["userID", "groupID", "newRank"],
            Endpoint::PostComment => &["userID", "ticketID", "commentContent"],
            Endpoint::DeleteComment => &["commentID"],
        }
    }

    /// Effect applied once the request succeeds. `None` for page links,
    /// which are never requested; their effect depends on the ticket.
    pub fn effect(self) -> Option<Effect> {
        match self {
            Endpoint::DeleteTicket => Some(Effect::NavigateRoot),
            Endpoint::ViewTicket => None,
            Endpoint::RerankUser => Some(Effect::Nothing),
            _ => Some(Effect::Reload),
        }
    }
}

/// A user's membership in a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Membership {
    pub user: UserId,
    pub group: GroupId,
}

/// A comment about to be posted on a ticket.
#[derive(Debug, Clone, Copy)]
pub struct CommentSubmission<'a> {
    pub user: UserId,
    pub ticket: TicketId,
    pub content: &'a str,
    pub resolving: bool,
}

impl<'a> CommentSubmission<'a> {
    pub fn new(user: UserId, ticket: TicketId, content: &'a str) -> Self {
        Self {
            user,
            ticket,
            content,
            resolving: false,
        }
    }

    pub fn resolving(user: UserId, ticket: TicketId) -> Self {
        Self {
            user,
            ticket,
            content: RESOLVING_COMMENT,
            resolving: true,
        }
    }

    /// Text to send, or `None` when a user comment is blank and gets dropped.
    pub fn content_to_send(&self) -> Option<&'a str> {
        if self.resolving {
            Some(RESOLVING_COMMENT)
        } else if self.content.trim().is_empty() {
            None
        } else {
            Some(self.content)
        }
    }
}

pub fn view_ticket_path(ticket: TicketId) -> String {
    format!("{}?id={}", Endpoint::ViewTicket.path(), ticket)
}

impl<T: Transport> TicketClient<T> {
    async fn dispatch(&self, endpoint: Endpoint, body: Value) -> Result<Effect> {
        self.request(ApiRequest::json(endpoint.method(), endpoint.path(), body))
            .await?;
        Ok(endpoint.effect().unwrap_or(Effect::Nothing))
    }

    pub async fn delete_ticket(&self, ticket: TicketId) -> Result<Effect> {
        self.dispatch(Endpoint::DeleteTicket, json!({ "ticketID": ticket }))
            .await
    }

    /// Post the resolving comment, then mark the ticket resolved. The
    /// comment is awaited first so it is stored before the page reloads; if
    /// it fails the ticket is left untouched.
    pub async fn resolve_ticket(&self, ticket: TicketId, user: UserId) -> Result<Effect> {
        self.post_comment(CommentSubmission::resolving(user, ticket))
            .await?;
        self.dispatch(Endpoint::ResolveTicket, json!({ "ticketID": ticket }))
            .await
    }

    /// Pure link: no request is made.
    pub fn view_ticket(&self, ticket: TicketId) -> Effect {
        Effect::Navigate(view_ticket_path(ticket))
    }

    pub async fn kick_user(&self, membership: Membership) -> Result<Effect> {
        self.dispatch(
            Endpoint::KickUser,
            json!({ "userID": membership.user, "groupID": membership.group }),
        )
        .await
    }

    pub async fn rerank_user(&self, membership: Membership, new_rank: Rank) -> Result<Effect> {
        self.dispatch(
            Endpoint::RerankUser,
            json!({
                "userID": membership.user,
                "groupID": membership.group,
                "newRank": new_rank
            }),
        )
        .await
    }

    pub async fn leave_group(&self, membership: Membership) -> Result<Effect> {
        self.dispatch(
            Endpoint::LeaveGroup,
            json!({ "userID": membership.user, "groupID": membership.group }),
        )
        .await
    }

    pub async fn join_group(&self, membership: Membership) -> Result<Effect> {
        self.dispatch(
            Endpoint::JoinGroup,
            json!({ "userID": membership.user, "groupID": membership.group }),
        )
        .await
    }

    /// Blank user comments are dropped without a request.
    pub async fn post_comment(&self, submission: CommentSubmission<'_>) -> Result<Effect> {
        let Some(content) = submission.content_to_send() else {
            tracing::debug!(ticket = %submission.ticket, "blank comment dropped");
            return Ok(Effect::Nothing);
        };

        self.dispatch(
            Endpoint::PostComment,
            json!({
                "userID": submission.user,
                "ticketID": submission.ticket,
                "commentContent": content
            }),
        )
        .await
    }

    pub async fn delete_comment(&self, comment: CommentId) -> Result<Effect> {
        self.dispatch(Endpoint::DeleteComment, json!({ "commentID": comment }))
            .await
    }
}
