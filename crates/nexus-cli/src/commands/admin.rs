//! Admin console command implementations.

use anyhow::Result;
use clap::{Args, Subcommand};

use nexus_http::api;

use super::PageArgs;
use super::roles::RoleArgs;
use crate::session::Context;

/// Route of the character management view.
const CHARACTERS_ROUTE: &str = "/characters";

#[derive(Args, Debug)]
pub struct AdminCommand {
    #[command(subcommand)]
    pub command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AdminSubcommand {
    /// List public roles
    Roles(PageArgs),

    /// Update a public role
    UpdateRole {
        id: i64,
        #[command(flatten)]
        role: RoleArgs,
    },

    /// Delete a public role
    DeleteRole { id: i64 },

    /// List users
    Users(PageArgs),
}

pub async fn handle(cmd: AdminCommand, ctx: &Context) -> Result<()> {
    let client = ctx.client();

    match cmd.command {
        AdminSubcommand::Roles(page) => {
            ctx.enter(CHARACTERS_ROUTE)?;
            ctx.show(
                api::admin::public_roles(client, &page.into()).await,
                "list public roles",
            )
        }
        AdminSubcommand::UpdateRole { id, role } => {
            ctx.enter(CHARACTERS_ROUTE)?;
            ctx.show(
                api::admin::update_public_role(client, id, &role.into()).await,
                "update role",
            )
        }
        AdminSubcommand::DeleteRole { id } => {
            ctx.enter(CHARACTERS_ROUTE)?;
            ctx.show(
                api::admin::delete_public_role(client, id).await,
                "delete role",
            )
        }
        AdminSubcommand::Users(page) => {
            ctx.enter_home()?;
            ctx.show(api::admin::users(client, &page.into()).await, "list users")
        }
    }
}
