use serde::Serialize;
use url::Url;

use crate::actions::view_ticket_path;
use crate::cli::TicketCreateArgs;
use crate::client::TicketClient;
use crate::config::Config;
use crate::error::{Result, TicketError};
use crate::forms::NewTicket;
use crate::output;
use crate::transport::Transport;
use crate::types::{TicketId, UserId};

use super::report;

pub async fn create<T: Transport>(client: &TicketClient<T>, args: TicketCreateArgs) -> Result<()> {
    let ticket = NewTicket {
        title: args.title,
        content: args.content,
        priority: args.priority,
        group: args.group,
    };

    let id = client.create_ticket(&ticket).await?;
    report(
        &format!("Created ticket {id} ({})", ticket.priority),
        &client.view_ticket(id),
    );

    Ok(())
}

/// Prints the absolute page URL; nothing is sent.
pub fn view(base_url: &Url, id: i64) -> Result<()> {
    let path = view_ticket_path(TicketId(id));
    let url = base_url
        .join(&path)
        .map_err(|_| TicketError::InvalidUrl(path.clone()))?;

    #[derive(Serialize)]
    struct Link {
        url: String,
    }

    output::print_item(&Link { url: url.to_string() }, |link| println!("{}", link.url));
    Ok(())
}

pub async fn resolve<T: Transport>(
    client: &TicketClient<T>,
    config: &Config,
    id: i64,
    user: Option<i64>,
) -> Result<()> {
    let user = UserId(config.resolve_user(user)?);
    let effect = client.resolve_ticket(TicketId(id), user).await?;
    report(&format!("Resolved ticket {id}"), &effect);
    Ok(())
}

pub async fn delete<T: Transport>(client: &TicketClient<T>, id: i64) -> Result<()> {
    let effect = client.delete_ticket(TicketId(id)).await?;
    report(&format!("Deleted ticket {id}"), &effect);
    Ok(())
}
