//! Text-to-speech command implementations.

use anyhow::Result;
use clap::{Args, Subcommand};

use nexus_http::api::{self, tts::SpeechRequest};

use crate::session::Context;

#[derive(Args, Debug)]
pub struct TtsCommand {
    #[command(subcommand)]
    pub command: TtsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TtsSubcommand {
    /// Synthesize speech
    Speak {
        text: String,

        #[arg(long)]
        voice: Option<String>,

        /// Audio encoding, e.g. mp3
        #[arg(long)]
        encoding: Option<String>,

        /// Playback speed multiplier
        #[arg(long)]
        speed: Option<f64>,
    },

    /// List voice types
    Voices,
}

pub async fn handle(cmd: TtsCommand, ctx: &Context) -> Result<()> {
    ctx.enter_home()?;
    let client = ctx.client();

    match cmd.command {
        TtsSubcommand::Speak {
            text,
            voice,
            encoding,
            speed,
        } => {
            let request = SpeechRequest {
                text,
                voice_type: voice,
                encoding,
                speed_ratio: speed,
            };
            ctx.show(
                api::tts::text_to_speech(client, &request).await,
                "synthesize speech",
            )
        }
        TtsSubcommand::Voices => ctx.show(api::tts::voice_types(client).await, "list voices"),
    }
}
