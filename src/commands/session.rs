use std::io::{self, Write};

use crate::cli::{LoginArgs, SignupArgs};
use crate::client::TicketClient;
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::session::{Credentials, NewAccount};
use crate::toast::{flash_toast, ToastCategory};
use crate::transport::Transport;

fn prompt_password() -> Result<String> {
    prompt("Password: ")
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut password = String::new();
    io::stdin().read_line(&mut password)?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn login<T: Transport>(
    client: &TicketClient<T>,
    mut config: Config,
    args: LoginArgs,
) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => prompt_password()?,
    };
    let credentials = Credentials {
        email: args.email,
        password,
        remember: args.remember,
    };

    let session = client.login(&credentials).await?;
    config.session = Some(session);
    config.save()?;

    flash_toast("Logged in successfully!", ToastCategory::Success);
    output::print_message(&format!(
        "Session saved to {}",
        Config::config_path()?.display()
    ));
    Ok(())
}

pub async fn signup<T: Transport>(
    client: &TicketClient<T>,
    mut config: Config,
    args: SignupArgs,
) -> Result<()> {
    let (password, confirm_password) = match args.password {
        Some(password) => (password.clone(), password),
        None => (prompt_password()?, prompt("Confirm password: ")?),
    };
    let account = NewAccount {
        email: args.email,
        username: args.username,
        password,
        confirm_password,
        remember: args.remember,
    };

    let session = client.sign_up(&account).await?;
    config.session = Some(session);
    config.save()?;

    flash_toast("Account created!", ToastCategory::Success);
    output::print_message(&format!(
        "Session saved to {}",
        Config::config_path()?.display()
    ));
    Ok(())
}

pub async fn logout<T: Transport>(client: &TicketClient<T>, mut config: Config) -> Result<()> {
    client.logout().await?;
    config.session = None;
    config.save()?;

    output::print_message("Logged out");
    Ok(())
}
