mod actions;
mod cli;
mod client;
mod commands;
mod config;
mod error;
mod forms;
mod layout;
mod output;
mod session;
mod toast;
mod transport;
mod types;

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, CommentCommands, Commands, GroupCommands, TicketCommands};
use client::TicketClient;
use config::Config;
use error::Result;
use std::error::Error;
use toast::{flash_toast, ToastCategory};
use transport::HttpTransport;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_tracing(verbose);

    if let Err(e) = run(cli).await {
        flash_toast(&format!("Error: {e}"), ToastCategory::Error);

        // Show error chain if verbose flag was passed
        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = std::error::Error::source(cause);
            }
        }

        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "ticket_cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    // Set global output format
    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "tickets", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        Commands::Endpoints => {
            commands::endpoints::list();
        }
        Commands::Toast(args) => {
            flash_toast(&args.message, args.category());
        }
        // Commands that require config and client
        command => {
            let config = Config::load()?;
            let base_url = config.base_url(cli.base_url.as_deref())?;

            if let Commands::Ticket {
                action: TicketCommands::View { id },
            } = command
            {
                return commands::tickets::view(&base_url, id);
            }

            let transport = HttpTransport::new(base_url, config.session(), config.timeout())?;
            let client = TicketClient::new(transport);

            match command {
                Commands::Login(args) => {
                    commands::session::login(&client, config, args).await?;
                }
                Commands::Signup(args) => {
                    commands::session::signup(&client, config, args).await?;
                }
                Commands::Logout => {
                    commands::session::logout(&client, config).await?;
                }
                Commands::Ticket { action } => match action {
                    TicketCommands::Create(args) => {
                        commands::tickets::create(&client, args).await?;
                    }
                    TicketCommands::Resolve { id, user } => {
                        commands::tickets::resolve(&client, &config, id, user).await?;
                    }
                    TicketCommands::Delete { id } => {
                        commands::tickets::delete(&client, id).await?;
                    }
                    TicketCommands::View { .. } => {
                        // Already handled above
                    }
                },
                Commands::Group { action } => match action {
                    GroupCommands::Create { name } => {
                        commands::groups::create(&client, &name).await?;
                    }
                    GroupCommands::Join(args) => {
                        commands::groups::join(&client, &config, args).await?;
                    }
                    GroupCommands::Leave(args) => {
                        commands::groups::leave(&client, &config, args).await?;
                    }
                    GroupCommands::Kick { group, user } => {
                        commands::groups::kick(&client, group, user).await?;
                    }
                    GroupCommands::Rerank { group, user, rank } => {
                        commands::groups::rerank(&client, group, user, rank).await?;
                    }
                },
                Commands::Comment { action } => match action {
                    CommentCommands::Post(args) => {
                        commands::comments::post(&client, &config, args).await?;
                    }
                    CommentCommands::Delete { id } => {
                        commands::comments::delete(&client, id).await?;
                    }
                },
                Commands::Completions { .. }
                | Commands::Init
                | Commands::Endpoints
                | Commands::Toast(_) => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
