//! Role command implementations.

use anyhow::Result;
use clap::{Args, Subcommand};

use nexus_http::api::{self, roles::RoleRequest};

use super::PageArgs;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct RolesCommand {
    #[command(subcommand)]
    pub command: RolesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RolesSubcommand {
    /// Browse public roles
    Public(PageArgs),

    /// Show one public role
    Get { id: i64 },

    /// List your private roles
    Mine(PageArgs),

    /// Create a private role
    Create(RoleArgs),

    /// Update a private role
    Update {
        id: i64,
        #[command(flatten)]
        role: RoleArgs,
    },

    /// Delete a private role
    Delete { id: i64 },
}

/// Role fields shared by create and update.
#[derive(Args, Debug)]
pub struct RoleArgs {
    #[arg(long)]
    pub name: String,

    /// Persona prompt the model plays
    #[arg(long)]
    pub persona: String,

    /// TTS voice type
    #[arg(long)]
    pub voice: String,

    #[arg(long)]
    pub description: Option<String>,

    /// First message shown in a new chat
    #[arg(long)]
    pub greeting: Option<String>,

    #[arg(long)]
    pub avatar_url: Option<String>,
}

impl From<RoleArgs> for RoleRequest {
    fn from(args: RoleArgs) -> Self {
        RoleRequest {
            name: args.name,
            description: args.description,
            persona_prompt: args.persona,
            greeting_message: args.greeting,
            greeting_audio_url: None,
            avatar_url: args.avatar_url,
            voice_type: args.voice,
        }
    }
}

pub async fn handle(cmd: RolesCommand, ctx: &Context) -> Result<()> {
    ctx.enter_home()?;
    let client = ctx.client();

    match cmd.command {
        RolesSubcommand::Public(page) => ctx.show(
            api::roles::public(client, &page.into()).await,
            "list public roles",
        ),
        RolesSubcommand::Get { id } => {
            ctx.show(api::roles::public_detail(client, id).await, "get role")
        }
        RolesSubcommand::Mine(page) => ctx.show(
            api::roles::private(client, &page.into()).await,
            "list private roles",
        ),
        RolesSubcommand::Create(role) => ctx.show(
            api::roles::create_private(client, &role.into()).await,
            "create role",
        ),
        RolesSubcommand::Update { id, role } => ctx.show(
            api::roles::update_private(client, id, &role.into()).await,
            "update role",
        ),
        RolesSubcommand::Delete { id } => {
            ctx.show(api::roles::delete_private(client, id).await, "delete role")
        }
    }
}
