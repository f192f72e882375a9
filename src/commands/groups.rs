use crate::actions::Membership;
use crate::cli::MembershipArgs;
use crate::client::TicketClient;
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::transport::Transport;
use crate::types::{GroupId, Rank, UserId};

use super::report;

fn membership(config: &Config, args: &MembershipArgs) -> Result<Membership> {
    Ok(Membership {
        user: UserId(config.resolve_user(args.user)?),
        group: GroupId(args.group),
    })
}

pub async fn create<T: Transport>(client: &TicketClient<T>, name: &str) -> Result<()> {
    let stored = client.create_group(name).await?;
    if stored != name {
        output::print_message(&format!("Group name sanitized to \"{stored}\""));
    }
    report(
        &format!("Created group \"{stored}\""),
        &crate::actions::Effect::Reload,
    );
    Ok(())
}

pub async fn join<T: Transport>(
    client: &TicketClient<T>,
    config: &Config,
    args: MembershipArgs,
) -> Result<()> {
    let membership = membership(config, &args)?;
    let effect = client.join_group(membership).await?;
    report(&format!("Joined group {}", membership.group), &effect);
    Ok(())
}

pub async fn leave<T: Transport>(
    client: &TicketClient<T>,
    config: &Config,
    args: MembershipArgs,
) -> Result<()> {
    let membership = membership(config, &args)?;
    let effect = client.leave_group(membership).await?;
    report(&format!("Left group {}", membership.group), &effect);
    Ok(())
}

pub async fn kick<T: Transport>(client: &TicketClient<T>, group: i64, user: i64) -> Result<()> {
    let effect = client
        .kick_user(Membership {
            user: UserId(user),
            group: GroupId(group),
        })
        .await?;
    report(&format!("Removed user {user} from group {group}"), &effect);
    Ok(())
}

pub async fn rerank<T: Transport>(
    client: &TicketClient<T>,
    group: i64,
    user: i64,
    rank: i32,
) -> Result<()> {
    let rank = Rank(rank);
    let effect = client
        .rerank_user(
            Membership {
                user: UserId(user),
                group: GroupId(group),
            },
            rank,
        )
        .await?;
    report(&format!("User {user} is now {rank} in group {group}"), &effect);
    Ok(())
}
