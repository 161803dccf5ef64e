use summer_config::Settings;
use summer_core::prelude::Handlers;
use tokio::io::{AsyncReadExt as _, AsyncWriteExt as _, DuplexStream};

use crate::{Bot, Connection};

/// The far end of a [`Connection`], playing the part of the server
pub struct TestServer {
    stream: DuplexStream,
}

/// A connection and the server on the other side of it
pub fn pair() -> (Connection<DuplexStream>, TestServer) {
    let (client, server) = tokio::io::duplex(64 * 1024);
    (Connection::new(client), TestServer { stream: server })
}

impl TestServer {
    pub async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        self.stream.write_all(line.as_bytes()).await?;
        self.stream.write_all(b"\r\n").await?;
        Ok(())
    }

    pub async fn send_all(&mut self, lines: &[&str]) -> anyhow::Result<()> {
        for line in lines {
            self.send(line).await?;
        }
        Ok(())
    }

    /// Closes the server's side, the bot will see the end of the stream
    pub async fn hang_up(&mut self) -> anyhow::Result<()> {
        Ok(self.stream.shutdown().await?)
    }

    /// Everything the bot wrote, once the bot is gone
    pub async fn received(mut self) -> anyhow::Result<Vec<String>> {
        let mut out = String::new();
        self.stream.read_to_string(&mut out).await?;
        Ok(out.lines().map(ToString::to_string).collect())
    }
}

/// Registers a bot, feeds it `lines`, hangs up and returns what the bot wrote
pub async fn run(
    settings: Settings,
    handlers: Handlers,
    lines: &[&str],
) -> anyhow::Result<Vec<String>> {
    let (conn, mut server) = pair();
    let mut bot = Bot::register(conn, settings, handlers).await?;

    server.send_all(lines).await?;
    server.hang_up().await?;

    bot.start().await?;
    drop(bot);

    server.received().await
}
