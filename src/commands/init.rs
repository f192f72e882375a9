use std::io::{self, Write};

use crate::config::Config;
use crate::error::{Result, TicketError};

fn ask(question: &str) -> Result<String> {
    print!("{question}");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;
    let existing = Config::load()?;

    if config_path.exists() {
        let answer = ask(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Ticket CLI Configuration");
    println!("========================\n");

    let base_url = ask("Server URL (e.g., http://localhost:5000): ")?;
    if base_url.is_empty() {
        return Err(TicketError::MissingBaseUrl);
    }
    // validates the URL before it is saved
    let base_url = Config::default().base_url(Some(&base_url))?.to_string();

    let user_id = ask("Your user id [optional]: ")?;
    let user_id = if user_id.is_empty() {
        None
    } else {
        Some(
            user_id
                .parse::<i64>()
                .map_err(|_| TicketError::InvalidInput(format!("not a user id: {user_id}")))?,
        )
    };

    let config = Config {
        base_url: Some(base_url),
        user_id,
        // keep an existing login
        session: existing.session,
        timeout_secs: existing.timeout_secs,
    };
    config.save()?;

    println!("\nConfig saved to {}", config_path.display());
    println!("Run 'tickets login --email <email>' to start a session.");

    Ok(())
}
