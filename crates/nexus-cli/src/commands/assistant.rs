//! Role assistant command implementations.

use anyhow::Result;
use clap::{Args, Subcommand};

use nexus_http::api::{
    self,
    assistant::{ConfirmRequest, ResearchApplyRequest},
};

use super::chat::chat_route;
use crate::session::Context;

#[derive(Args, Debug)]
pub struct AssistantCommand {
    #[command(subcommand)]
    pub command: AssistantSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AssistantSubcommand {
    /// Summarize an assistant conversation into a role brief
    Brief {
        conversation: i64,

        #[arg(long)]
        web_search: bool,
    },

    /// List research tasks for a conversation
    Tasks { conversation: i64 },

    /// Create the role drafted in a conversation
    Confirm {
        conversation: i64,

        /// Research the character before creating it
        #[arg(long)]
        deep_research: bool,

        #[arg(long)]
        research_limit: Option<u32>,

        /// Research query (repeatable)
        #[arg(long = "query")]
        queries: Vec<String>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        voice: Option<String>,
    },

    /// Apply research results to a drafted role
    Apply {
        conversation: i64,

        /// Research query (repeatable)
        #[arg(long = "query")]
        queries: Vec<String>,

        #[arg(long)]
        research_limit: Option<u32>,
    },
}

pub async fn handle(cmd: AssistantCommand, ctx: &Context) -> Result<()> {
    let client = ctx.client();

    match cmd.command {
        AssistantSubcommand::Brief {
            conversation,
            web_search,
        } => {
            ctx.enter(&chat_route(conversation))?;
            ctx.show(
                api::assistant::brief(client, conversation, web_search).await,
                "build role brief",
            )
        }
        AssistantSubcommand::Tasks { conversation } => {
            ctx.enter(&chat_route(conversation))?;
            ctx.show(
                api::assistant::research_tasks(client, conversation).await,
                "list research tasks",
            )
        }
        AssistantSubcommand::Confirm {
            conversation,
            deep_research,
            research_limit,
            queries,
            name,
            voice,
        } => {
            ctx.enter(&chat_route(conversation))?;
            let request = ConfirmRequest {
                conversation_id: conversation,
                deep_research,
                research_limit,
                override_name: name,
                override_voice_type: voice,
                research_queries: queries,
            };
            ctx.show(api::assistant::confirm(client, &request).await, "confirm role")
        }
        AssistantSubcommand::Apply {
            conversation,
            queries,
            research_limit,
        } => {
            ctx.enter(&chat_route(conversation))?;
            let request = ResearchApplyRequest {
                conversation_id: conversation,
                research_queries: queries,
                research_limit,
            };
            ctx.show(
                api::assistant::apply_research(client, &request).await,
                "apply research",
            )
        }
    }
}
