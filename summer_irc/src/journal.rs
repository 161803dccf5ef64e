use std::path::PathBuf;

use tokio::io::AsyncWriteExt as _;

/// Where `Response::Log` lines end up
#[derive(Clone, Debug, Default)]
pub struct Journal {
    path: Option<PathBuf>,
}

impl Journal {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Appends a timestamped line to the log file.
    /// Without a log file the line is only logged.
    pub async fn write(&self, data: &str) -> anyhow::Result<()> {
        let path = match &self.path {
            Some(path) => path,
            None => {
                log::info!("{data}");
                return Ok(());
            }
        };

        let now = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        file.write_all(format!("[{now}] {data}\n").as_bytes())
            .await?;
        file.flush().await?;
        Ok(())
    }
}
