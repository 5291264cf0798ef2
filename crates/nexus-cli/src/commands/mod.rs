//! Subcommand implementations.

pub mod admin;
pub mod assistant;
pub mod auth;
pub mod chat;
pub mod image;
pub mod navigate;
pub mod roles;
pub mod tts;
pub mod upload;

use anyhow::Result;
use clap::Args;

use nexus_http::api::PageQuery;

use crate::cli::Commands;
use crate::session::Context;

pub async fn handle(cmd: Commands, ctx: &Context) -> Result<()> {
    match cmd {
        Commands::Auth(cmd) => auth::handle(cmd, ctx).await,
        Commands::Navigate(args) => navigate::run(args, ctx),
        Commands::Roles(cmd) => roles::handle(cmd, ctx).await,
        Commands::Chat(cmd) => chat::handle(cmd, ctx).await,
        Commands::Tts(cmd) => tts::handle(cmd, ctx).await,
        Commands::Image(cmd) => image::handle(cmd, ctx).await,
        Commands::Upload(cmd) => upload::handle(cmd, ctx).await,
        Commands::Assistant(cmd) => assistant::handle(cmd, ctx).await,
        Commands::Admin(cmd) => admin::handle(cmd, ctx).await,
    }
}

/// Paging flags shared by the list commands.
#[derive(Args, Debug)]
pub struct PageArgs {
    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<u32>,

    /// Page size
    #[arg(long)]
    pub size: Option<u32>,

    /// Search keyword
    #[arg(long)]
    pub keyword: Option<String>,
}

impl From<PageArgs> for PageQuery {
    fn from(args: PageArgs) -> Self {
        PageQuery {
            page: args.page,
            size: args.size,
            keyword: args.keyword,
        }
    }
}
