//! Parlance CLI — diarized speech-to-text transcription.
//!
//! Usage:
//!   parlance fetch-models [OPTIONS]    Download diarization + whisper models
//!   parlance file <INPUT>              Transcribe a single audio file
//!   parlance batch <ROOT>              Transcribe every audio file under a folder

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "parlance",
    about = "Speaker-diarized speech-to-text transcription",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and cache the diarization and whisper models (idempotent)
    FetchModels {
        /// Model cache directory (defaults to the configured cache)
        #[arg(long)]
        model_dir: Option<PathBuf>,

        /// Whisper model to fetch
        #[arg(long)]
        whisper_model: Option<String>,
    },

    /// Transcribe a single audio file
    File {
        /// Input audio file
        input: PathBuf,

        /// Output transcript path (defaults to `<stem>.txt` next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Whisper model to use
        #[arg(long)]
        whisper_model: Option<String>,

        /// Language hint (ISO 639-1 code, e.g. "en", "ja")
        #[arg(long)]
        language: Option<String>,

        /// Overwrite an existing transcript
        #[arg(short, long)]
        force: bool,
    },

    /// Transcribe every audio file under a folder
    Batch {
        /// Root folder to scan recursively
        root: PathBuf,

        /// Directory for transcripts, mirroring the folder structure under
        /// ROOT (defaults to next to each input)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Comma-separated extensions to pick up (e.g. "wav,mp3,mp4")
        #[arg(long, value_delimiter = ',')]
        extensions: Option<Vec<String>>,

        /// Whisper model to use
        #[arg(long)]
        whisper_model: Option<String>,

        /// Language hint (ISO 639-1 code)
        #[arg(long)]
        language: Option<String>,

        /// Overwrite existing transcripts
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Local .env supplies HUGGINGFACE_ACCESS_TOKEN / PARLANCE_MODEL_DIR.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = parlance_common::AppConfig::load();
    parlance_common::logging::init_logging(&config.logging, cli.verbose);

    match cli.command {
        Commands::FetchModels {
            model_dir,
            whisper_model,
        } => commands::fetch_models::run(&config, model_dir, whisper_model).await,
        Commands::File {
            input,
            output,
            whisper_model,
            language,
            force,
        } => commands::file::run(&config, input, output, whisper_model, language, force),
        Commands::Batch {
            root,
            output_dir,
            extensions,
            whisper_model,
            language,
            force,
        } => commands::batch::run(
            &config,
            root,
            output_dir,
            extensions,
            whisper_model,
            language,
            force,
        ),
    }
}
