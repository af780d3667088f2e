use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use scribe::{Client, ResponseFormat, TranscribeOptions};

#[derive(Parser)]
#[command(name = "scribe", about = "Transcribe audio files via an OpenAI-compatible speech-to-text API")]
struct Cli {
    /// Path to the audio file to transcribe.
    file_path: PathBuf,

    /// Model to use for transcription.
    #[arg(short, long, default_value = "whisper-1")]
    model: String,

    /// Response format.
    #[arg(short, long, default_value = "text")]
    format: Format,

    /// Language of the audio file (ISO-639-1 code, e.g. "en").
    #[arg(short, long)]
    language: Option<String>,

    /// Include word-level timestamps (requires verbose_json format).
    #[arg(long)]
    timestamps: bool,

    /// Write the transcript to this file as well.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    #[value(name = "verbose_json")]
    VerboseJson,
    Srt,
    Vtt,
}

impl From<Format> for ResponseFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ResponseFormat::Text,
            Format::Json => ResponseFormat::Json,
            Format::VerboseJson => ResponseFormat::VerboseJson,
            Format::Srt => ResponseFormat::Srt,
            Format::Vtt => ResponseFormat::Vtt,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Credential check comes before argument parsing: without a key there is
    // nothing this tool can do, whatever the arguments say.
    let client = match Client::from_env() {
        Ok(client) => client,
        Err(_) => {
            eprintln!("Error: OPENAI_API_KEY not found in environment variables or .env file");
            eprintln!(
                "Please create a .env file with your OpenAI API key: OPENAI_API_KEY=your_key_here"
            );
            std::process::exit(1);
        }
    };

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("scribe=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.timestamps && !matches!(cli.format, Format::VerboseJson) {
        println!("Note: --timestamps requires verbose_json format. Switching format.");
    }

    let mut opts = TranscribeOptions::new()
        .model(&cli.model)
        .format(cli.format.into())
        .word_timestamps(cli.timestamps);
    if let Some(language) = &cli.language {
        opts = opts.language(language);
    }

    let result = match client.transcribe(&cli.file_path, &opts).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if cli.timestamps {
        println!("\nTranscription:");
        println!("{}", result.text());
        println!("\nWord timestamps:");
        match result.render_word_timestamps() {
            Some(listing) => print!("{listing}"),
            None => println!("(no word timestamps returned)"),
        }

        // With timestamps the saved file carries the full structured result,
        // not just the text field.
        if let Some(path) = &cli.output {
            let json = match result.to_json_pretty() {
                Ok(json) => json,
                Err(e) => {
                    eprintln!("Error: {e}");
                    std::process::exit(1);
                }
            };
            write_output(path, &json);
            println!("\nTranscription saved to {}!", path.display());
        }
    } else {
        println!("{}", result.text());

        match &cli.output {
            Some(path) => {
                write_output(path, result.text());
                println!("\nTranscription saved to {}!", path.display());
            }
            None => println!("\nTranscription complete!"),
        }
    }
}

fn write_output(path: &Path, contents: &str) {
    if let Err(e) = std::fs::write(path, contents) {
        eprintln!("Error writing to {}: {e}", path.display());
        std::process::exit(1);
    }
}
