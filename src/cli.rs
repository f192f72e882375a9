use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::toast::ToastCategory;
use crate::types::Priority;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Compact,
}

#[derive(Parser)]
#[command(name = "tickets")]
#[command(about = "A CLI for the support ticket tracker", version)]
#[command(after_help = "EXAMPLES:
    tickets login --email me@example.com   Log in and store the session
    tickets ticket resolve 12              Resolve ticket 12
    tickets comment post 12 \"On it\"        Comment on ticket 12
    tickets group join 4                   Join group 4")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, compact)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show detailed error information and debug logs
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Server URL (overrides TICKETS_BASE_URL and the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage tickets
    #[command(
        alias = "t",
        after_help = "EXAMPLES:
    tickets ticket create -t \"Printer\" -c \"It is on fire\" --priority critical
    tickets ticket view 12
    tickets ticket resolve 12
    tickets ticket delete 12"
    )]
    Ticket {
        #[command(subcommand)]
        action: TicketCommands,
    },
    /// Manage group membership
    #[command(
        alias = "g",
        after_help = "EXAMPLES:
    tickets group create \"Help Desk\"
    tickets group join 4
    tickets group rerank 4 7 --rank 2
    tickets group kick 4 7
    tickets group leave 4"
    )]
    Group {
        #[command(subcommand)]
        action: GroupCommands,
    },
    /// Manage comments
    #[command(
        alias = "c",
        after_help = "EXAMPLES:
    tickets comment post 12 \"Looking into it\"
    tickets comment delete 88"
    )]
    Comment {
        #[command(subcommand)]
        action: CommentCommands,
    },
    /// Show a toast notification
    #[command(after_help = "EXAMPLES:
    tickets toast \"Deployed\" --category success")]
    Toast(ToastArgs),
    /// List the server endpoints this client calls
    Endpoints,
    /// Log in and store the session cookie
    Login(LoginArgs),
    /// Create an account and store its session cookie
    #[command(after_help = "EXAMPLES:
    tickets signup --email me@example.com --username me")]
    Signup(SignupArgs),
    /// Log out and forget the stored session
    Logout,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    tickets completions bash > ~/.bash_completion.d/tickets
    tickets completions zsh > ~/.zfunc/_tickets")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    Init,
}

#[derive(Subcommand)]
pub enum TicketCommands {
    /// Create a new ticket
    Create(TicketCreateArgs),
    /// Show the page for a ticket
    View {
        /// Ticket id
        id: i64,
    },
    /// Resolve a ticket, leaving a comment that you resolved it
    Resolve {
        /// Ticket id
        id: i64,

        /// Resolving user (defaults to user_id from config)
        #[arg(long)]
        user: Option<i64>,
    },
    /// Delete a ticket and its comments
    Delete {
        /// Ticket id
        id: i64,
    },
}

#[derive(Args)]
pub struct TicketCreateArgs {
    /// Ticket title
    #[arg(long, short)]
    pub title: String,

    /// Description of the issue
    #[arg(long, short)]
    pub content: String,

    /// Priority
    #[arg(long, value_enum, default_value = "whenever")]
    pub priority: Priority,

    /// Group name (omit for a ticket everyone can see)
    #[arg(long)]
    pub group: Option<String>,
}

#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create a group and become its admin
    Create {
        /// Group name (letters, digits and spaces, max 50)
        name: String,
    },
    /// Join a group
    Join(MembershipArgs),
    /// Leave a group
    Leave(MembershipArgs),
    /// Remove another user from a group
    Kick {
        /// Group id
        group: i64,

        /// User to remove
        user: i64,
    },
    /// Change a user's rank in a group
    Rerank {
        /// Group id
        group: i64,

        /// User to rerank
        user: i64,

        /// New rank (0=member, 2=admin)
        #[arg(long, value_parser = clap::value_parser!(i32).range(0..=2))]
        rank: i32,
    },
}

#[derive(Args)]
pub struct MembershipArgs {
    /// Group id
    pub group: i64,

    /// User id (defaults to user_id from config)
    #[arg(long)]
    pub user: Option<i64>,
}

#[derive(Subcommand)]
pub enum CommentCommands {
    /// Post a comment on a ticket
    Post(CommentArgs),
    /// Delete a comment
    Delete {
        /// Comment id
        id: i64,
    },
}

#[derive(Args)]
pub struct CommentArgs {
    /// Ticket id
    pub ticket: i64,

    /// Comment text (blank comments are not posted)
    pub content: String,

    /// Author (defaults to user_id from config)
    #[arg(long)]
    pub user: Option<i64>,
}

#[derive(Args)]
pub struct ToastArgs {
    /// Message to show
    pub message: String,

    /// Category selecting the colour: error, success or info. Unknown
    /// values (including other capitalisations) fall back to info.
    #[arg(long = "category", default_value = "info")]
    pub tag: String,
}

impl ToastArgs {
    pub fn category(&self) -> ToastCategory {
        ToastCategory::from_tag(&self.tag)
    }
}

#[derive(Args)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Password (prompted for when omitted)
    #[arg(long)]
    pub password: Option<String>,

    /// Ask the server for a long-lived session
    #[arg(long)]
    pub remember: bool,
}

#[derive(Args)]
pub struct SignupArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Display name
    #[arg(long)]
    pub username: String,

    /// Password (prompted for twice when omitted)
    #[arg(long)]
    pub password: Option<String>,

    /// Ask the server for a long-lived session
    #[arg(long)]
    pub remember: bool,
}
