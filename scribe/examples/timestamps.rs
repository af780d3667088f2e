//! Transcribe with word-level timestamps.
//!
//! Usage: cargo run --example timestamps -- path/to/audio.mp3

use scribe::{Client, TranscribeOptions};

#[tokio::main]
async fn main() -> scribe::Result<()> {
    let path = std::env::args()
        .nth(1)
        .expect("usage: timestamps <audio-file>");

    let client = Client::from_env()?;
    let opts = TranscribeOptions::new().word_timestamps(true);

    let transcript = client.transcribe(&path, &opts).await?;

    println!("{}", transcript.text());
    if let Some(listing) = transcript.render_word_timestamps() {
        println!("\n{listing}");
    }

    Ok(())
}
