//! Upload command implementations.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use nexus_http::api;

use crate::session::Context;

#[derive(Args, Debug)]
pub struct UploadCommand {
    #[command(subcommand)]
    pub command: UploadSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UploadSubcommand {
    /// Upload an image and print its URL
    Image { file: PathBuf },

    /// Upload an audio clip and print its URL
    Audio { file: PathBuf },
}

pub async fn handle(cmd: UploadCommand, ctx: &Context) -> Result<()> {
    ctx.enter_home()?;
    let client = ctx.client();

    match cmd.command {
        UploadSubcommand::Image { file } => ctx.show(
            api::files::upload_image_file(client, &file).await,
            "upload image",
        ),
        UploadSubcommand::Audio { file } => ctx.show(
            api::files::upload_audio_file(client, &file).await,
            "upload audio",
        ),
    }
}
