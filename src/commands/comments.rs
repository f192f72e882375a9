use crate::actions::{CommentSubmission, Effect};
use crate::cli::CommentArgs;
use crate::client::TicketClient;
use crate::config::Config;
use crate::error::Result;
use crate::layout::{ResizeListener, TerminalTextArea};
use crate::output;
use crate::transport::Transport;
use crate::types::{CommentId, TicketId, UserId};

use super::report;

/// Comment text framed to fit the terminal.
fn framed(content: &str, width: usize) -> String {
    let listener = ResizeListener::new(
        vec![TerminalTextArea::new("new-comment", content, width)],
        width,
    );
    listener
        .areas()
        .iter()
        .map(TerminalTextArea::render)
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn post<T: Transport>(
    client: &TicketClient<T>,
    config: &Config,
    args: CommentArgs,
) -> Result<()> {
    let user = UserId(config.resolve_user(args.user)?);
    let submission = CommentSubmission::new(user, TicketId(args.ticket), &args.content);

    let effect = client.post_comment(submission).await?;
    if effect == Effect::Nothing {
        output::print_message("Comment is empty, nothing posted");
        return Ok(());
    }

    if !output::is_json_output() && !output::is_quiet() {
        println!("{}", framed(&args.content, output::terminal_width()));
    }
    report(&format!("Added comment to ticket {}", args.ticket), &effect);

    Ok(())
}

pub async fn delete<T: Transport>(client: &TicketClient<T>, id: i64) -> Result<()> {
    let effect = client.delete_comment(CommentId(id)).await?;
    report(&format!("Deleted comment {id}"), &effect);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framed_wraps_inside_gutter() {
        assert_eq!(framed("abcdef", 5), "│ abc\n│ def");
        assert_eq!(framed("", 5), "");
    }
}
