//! Image generation command implementations.

use anyhow::Result;
use clap::{Args, Subcommand};

use nexus_http::api::{self, image::ImageRequest};

use crate::session::Context;

#[derive(Args, Debug)]
pub struct ImageCommand {
    #[command(subcommand)]
    pub command: ImageSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ImageSubcommand {
    /// Generate images from a prompt
    Generate(GenerateArgs),

    /// List image models
    Models,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    pub prompt: String,

    #[arg(long)]
    pub model: String,

    #[arg(long)]
    pub negative_prompt: Option<String>,

    /// Image size as WIDTHxHEIGHT
    #[arg(long)]
    pub size: Option<String>,

    /// Number of images
    #[arg(long)]
    pub batch: Option<u32>,

    #[arg(long)]
    pub seed: Option<i64>,

    #[arg(long)]
    pub steps: Option<u32>,

    #[arg(long)]
    pub guidance: Option<f64>,
}

pub async fn handle(cmd: ImageCommand, ctx: &Context) -> Result<()> {
    ctx.enter_home()?;
    let client = ctx.client();

    match cmd.command {
        ImageSubcommand::Generate(args) => {
            let request = ImageRequest {
                model: args.model,
                prompt: args.prompt,
                negative_prompt: args.negative_prompt,
                image_size: args.size,
                batch_size: args.batch,
                seed: args.seed,
                num_inference_steps: args.steps,
                guidance_scale: args.guidance,
            };
            ctx.show(api::image::generate(client, &request).await, "generate image")
        }
        ImageSubcommand::Models => ctx.show(api::image::models(client).await, "list models"),
    }
}
