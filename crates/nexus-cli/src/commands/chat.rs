//! Conversation command implementations.

use anyhow::Result;
use clap::{Args, Subcommand};

use nexus_http::api::{self, conversations::ChatRequest, conversations::CreateConversation};

use crate::session::Context;

#[derive(Args, Debug)]
pub struct ChatCommand {
    #[command(subcommand)]
    pub command: ChatSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ChatSubcommand {
    /// Start a conversation
    New(NewArgs),

    /// List recent conversations
    List {
        /// Maximum number of conversations
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show a conversation's messages
    History { id: i64 },

    /// Delete a conversation
    Delete { id: i64 },

    /// Send a message
    Send(SendArgs),

    /// List available chat models
    Models,
}

#[derive(Args, Debug)]
pub struct NewArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub system_prompt: Option<String>,

    /// Role to chat with
    #[arg(long)]
    pub role_id: Option<i64>,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Message text
    pub message: String,

    /// Conversation to continue; a new one is opened when omitted
    #[arg(long, short = 'c')]
    pub conversation: Option<i64>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub role_id: Option<i64>,

    /// Let the model search the web
    #[arg(long)]
    pub web_search: bool,

    #[arg(long)]
    pub temperature: Option<f64>,

    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Title for a new conversation
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub system_prompt: Option<String>,
}

pub async fn handle(cmd: ChatCommand, ctx: &Context) -> Result<()> {
    let client = ctx.client();

    match cmd.command {
        ChatSubcommand::New(args) => {
            ctx.enter_home()?;
            let request = CreateConversation {
                title: args.title,
                model_name: args.model,
                system_prompt: args.system_prompt,
                role_id: args.role_id,
            };
            ctx.show(
                api::conversations::create(client, &request).await,
                "create conversation",
            )
        }
        ChatSubcommand::List { limit } => {
            ctx.enter_home()?;
            ctx.show(
                api::conversations::list(client, limit).await,
                "list conversations",
            )
        }
        ChatSubcommand::History { id } => {
            ctx.enter(&chat_route(id))?;
            ctx.show(api::conversations::history(client, id).await, "load history")
        }
        ChatSubcommand::Delete { id } => {
            ctx.enter(&chat_route(id))?;
            ctx.show(
                api::conversations::delete(client, id).await,
                "delete conversation",
            )
        }
        ChatSubcommand::Send(args) => {
            match args.conversation {
                Some(id) => ctx.enter(&chat_route(id))?,
                None => ctx.enter_home()?,
            };
            let request = ChatRequest {
                conversation_id: args.conversation,
                message: args.message,
                model_name: args.model,
                temperature: args.temperature,
                max_tokens: args.max_tokens,
                system_prompt: args.system_prompt,
                title: args.title,
                enable_web_search: args.web_search,
                role_id: args.role_id,
            };
            ctx.show(api::conversations::chat(client, &request).await, "send message")
        }
        ChatSubcommand::Models => {
            ctx.enter_home()?;
            ctx.show(api::conversations::models(client).await, "list models")
        }
    }
}

pub(crate) fn chat_route(id: i64) -> String {
    format!("/chat/{}", id)
}
