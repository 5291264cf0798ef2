//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use nexus_core::AppProfile;

use crate::commands::{
    admin::AdminCommand, assistant::AssistantCommand, auth::AuthCommand, chat::ChatCommand,
    image::ImageCommand, navigate::NavigateArgs, roles::RolesCommand, tts::TtsCommand,
    upload::UploadCommand,
};

/// NexusVoice command-line client.
#[derive(Parser, Debug)]
#[command(name = "nexus")]
#[command(author, version = env!("NEXUS_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Which application's session and routes to use
    #[arg(long, value_enum, default_value_t = App::User, env = "NEXUS_APP", global = true)]
    pub app: App,

    /// Backend base URL, including the /api prefix
    #[arg(long, env = "NEXUS_API", global = true)]
    pub api: Option<String>,

    /// Overall request timeout in seconds
    #[arg(long, default_value_t = 10, env = "NEXUS_TIMEOUT_SECS", global = true)]
    pub timeout_secs: u64,

    /// Session file (defaults to the platform data directory)
    #[arg(long, env = "NEXUS_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum App {
    User,
    Admin,
}

impl From<App> for AppProfile {
    fn from(app: App) -> Self {
        match app {
            App::User => AppProfile::User,
            App::Admin => AppProfile::Admin,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Login, registration and session management
    Auth(AuthCommand),

    /// Run a route through the navigation guard
    Navigate(NavigateArgs),

    /// Character roles
    Roles(RolesCommand),

    /// Conversations and chat
    Chat(ChatCommand),

    /// Text to speech
    Tts(TtsCommand),

    /// Image generation
    Image(ImageCommand),

    /// File uploads
    Upload(UploadCommand),

    /// Role creation assistant
    Assistant(AssistantCommand),

    /// Admin console operations (requires --app admin)
    Admin(AdminCommand),
}
