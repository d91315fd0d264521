use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Compact,
}

#[derive(Parser)]
#[command(name = "users")]
#[command(about = "A CLI for managing user records", version)]
#[command(after_help = "EXAMPLES:
    users                             List users (loads them on first use)
    users show 3                      Show user details
    users add -n \"Ada\" -e ada@example.com --street \"1 Main St\" --suite \"Apt 2\" --city Springfield --zipcode 12345
    users edit 3 --email new@example.com
    users delete 3                    Delete a user (asks first)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

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
    /// List users (the default command)
    #[command(
        alias = "ls",
        after_help = "EXAMPLES:
    users list
    users list --expand
    users list --refresh --format json"
    )]
    List(ListArgs),
    /// Show user details
    #[command(
        alias = "v",
        after_help = "EXAMPLES:
    users show 3"
    )]
    Show {
        /// User id
        id: u64,
    },
    /// Add a new user
    #[command(
        alias = "a",
        after_help = "EXAMPLES:
    users add -n \"Ada Lovelace\" -e ada@example.com --street \"12 St James's Sq\" --suite \"No. 1\" --city London --zipcode SW1Y
    users add -n Bob -e bob@example.com --street Elm --suite 4 --city Oslo --zipcode 0150 --company Acme --bs \"synergize markets\""
    )]
    Add(AddArgs),
    /// Edit an existing user
    #[command(
        alias = "e",
        after_help = "EXAMPLES:
    users edit 3 --name \"Clementine Bauch\"
    users edit 3 --city Lebsackbury --zipcode 31428-2261
    users edit 3 --phone \"\"                 Clear the phone number"
    )]
    Edit(EditArgs),
    /// Delete a user
    #[command(
        alias = "rm",
        after_help = "EXAMPLES:
    users delete 3
    users delete 3 --yes"
    )]
    Delete {
        /// User id
        id: u64,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Reload all users from the endpoint, discarding local changes
    #[command(after_help = "EXAMPLES:
    users refresh")]
    Refresh,
    /// Show endpoint, sync time and last load error
    #[command(after_help = "EXAMPLES:
    users status
    users status --json")]
    Status,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    users completions bash > ~/.bash_completion.d/users
    users completions zsh > ~/.zfunc/_users
    users completions fish > ~/.config/fish/completions/users.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    users init")]
    Init,
}

#[derive(Args, Clone, Default)]
pub struct ListArgs {
    /// Also show phone, website and company
    #[arg(long, short = 'x')]
    pub expand: bool,

    /// Reload from the endpoint before listing
    #[arg(long, short)]
    pub refresh: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Full name
    #[arg(long, short)]
    pub name: String,

    /// Email address
    #[arg(long, short)]
    pub email: String,

    /// Street
    #[arg(long)]
    pub street: String,

    /// Suite or apartment
    #[arg(long)]
    pub suite: String,

    /// City
    #[arg(long)]
    pub city: String,

    /// Zip code
    #[arg(long)]
    pub zipcode: String,

    #[command(flatten)]
    pub extra: ExtraArgs,
}

#[derive(Args)]
pub struct EditArgs {
    /// User id
    pub id: u64,

    /// New name
    #[arg(long, short)]
    pub name: Option<String>,

    /// New email address
    #[arg(long, short)]
    pub email: Option<String>,

    /// New street
    #[arg(long)]
    pub street: Option<String>,

    /// New suite or apartment
    #[arg(long)]
    pub suite: Option<String>,

    /// New city
    #[arg(long)]
    pub city: Option<String>,

    /// New zip code
    #[arg(long)]
    pub zipcode: Option<String>,

    #[command(flatten)]
    pub extra: ExtraArgs,
}

/// Optional fields shared by add and edit. An empty value clears the field.
#[derive(Args, Default)]
pub struct ExtraArgs {
    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Website
    #[arg(long)]
    pub website: Option<String>,

    /// Company name
    #[arg(long)]
    pub company: Option<String>,

    /// Company catch phrase
    #[arg(long)]
    pub catch_phrase: Option<String>,

    /// Company business summary
    #[arg(long)]
    pub bs: Option<String>,
}
