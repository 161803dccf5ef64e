use summer_config::Settings;
use summer_core::prelude::Handlers;

mod bot;
mod connection;
mod journal;
mod lifecycle;

pub mod parser;
pub mod router;
pub mod testing;

pub use bot::Bot;
pub use connection::{Connection, WIRE};
pub use journal::Journal;
pub use lifecycle::{Lifecycle, Transition};

/// Connects to `addr`, registers and runs the read loop until the server hangs up
pub async fn create_bot(addr: &str, settings: Settings, handlers: Handlers) -> anyhow::Result<()> {
    let mut bot = Bot::connect(addr, settings, handlers).await?;
    log::info!("starting the bot");
    bot.start().await
}
