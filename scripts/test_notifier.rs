//! Standalone test for the Telegram notifier.
//!
//! Reads TG_BOT_TOKEN and TG_CHAT_ID from the environment and sends one sample
//! free-game message to verify the bot can post to the chat and that the
//! cover image renders as a preview.
//!
//! Run with: cargo run --bin test-notifier

use epic_freebies::config::Settings;
use epic_freebies::epic::FreeGameOffer;
use epic_freebies::global::Global;
use epic_freebies::message;
use epic_freebies::telegram::{self, Delivery};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let config = Settings::new()?;

    if config.credentials().is_none() {
        anyhow::bail!("TG_BOT_TOKEN and TG_CHAT_ID must both be set");
    }

    let global = Global::init(config)?;

    let sample = FreeGameOffer {
        title: "Sample Game".to_string(),
        description: "this is a test notification".to_string(),
        link: "https://store.epicgames.com/free-games".to_string(),
        image: "https://cdn1.epicgames.com/offer/placeholder/thumbnail.jpg".to_string(),
        end_date: "2025-12-14 16:00 (UTC)".to_string(),
    };

    println!("Sending test notification to Telegram...");

    match telegram::send(&global, &message::render(&sample)).await {
        Delivery::Sent => println!("Success!"),
        outcome => println!("Failed! outcome={outcome:?}"),
    }

    Ok(())
}
