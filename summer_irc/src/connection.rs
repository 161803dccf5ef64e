use anyhow::Context;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufStream},
    net::TcpStream,
};

/// Every line that crosses the wire is echoed under this target
pub const WIRE: &str = "summer::wire";

/// A line-at-a-time view of the transport
pub struct Connection<S = TcpStream> {
    stream: BufStream<S>,
    buf: Vec<u8>,
    line: String,
}

impl Connection<TcpStream> {
    pub async fn connect(addr: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .with_context(|| anyhow::anyhow!("could not connect to {addr}"))?;
        Ok(Self::new(stream))
    }
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream: BufStream::new(stream),
            buf: Vec::with_capacity(1024),
            line: String::with_capacity(1024),
        }
    }

    pub async fn write_raw(&mut self, data: &str) -> anyhow::Result<()> {
        let data = data.trim_end_matches(['\r', '\n']);
        log::info!(target: WIRE, ">> {data}");
        self.send(data).await
    }

    /// Like `write_raw`, but `secret` is masked in the echo
    pub async fn write_masked(&mut self, data: &str, secret: &str) -> anyhow::Result<()> {
        let data = data.trim_end_matches(['\r', '\n']);
        log::info!(target: WIRE, ">> {}", data.replace(secret, "********"));
        self.send(data).await
    }

    async fn send(&mut self, data: &str) -> anyhow::Result<()> {
        self.stream.write_all(data.as_bytes()).await?;
        self.stream.write_all(b"\r\n").await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Reads the next line, without its line ending.
    ///
    /// `None` means the other side closed the stream.
    pub async fn read_line(&mut self) -> anyhow::Result<Option<&str>> {
        self.buf.clear();
        let n = self.stream.read_until(b'\n', &mut self.buf).await?;
        if n == 0 {
            log::debug!(target: WIRE, "end of stream");
            return Ok(None);
        }

        self.line.clear();
        self.line.push_str(&String::from_utf8_lossy(&self.buf));
        let line = self.line.trim_end_matches(['\r', '\n']);
        log::info!(target: WIRE, "<< {line}");
        Ok(Some(line))
    }
}
