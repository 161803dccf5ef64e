use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::Secret;

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Settings {
    #[serde(default)]
    pub nick: String,

    #[serde(default)]
    pub channels: Vec<String>,

    /// Older configurations name a single channel. It is joined after `channels`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickserv_password: Option<Secret<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickserv_email: Option<String>,

    #[serde(default)]
    pub auto_rejoin: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn new(nick: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            ..Self::default()
        }
    }

    pub async fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::debug!("loading settings from {}", path.display());

        let data = tokio::fs::read_to_string(path)
            .await
            .with_context(|| anyhow::anyhow!("cannot read '{}'", path.display()))?;

        Self::from_yaml(&data)
            .with_context(|| anyhow::anyhow!("cannot parse '{}'", path.display()))
    }

    pub fn from_yaml(data: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(data)?)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.nick.trim().is_empty(), "a nick must be configured");
        anyhow::ensure!(
            !self.nick.contains(char::is_whitespace),
            "nick '{}' cannot contain whitespace",
            self.nick
        );
        Ok(())
    }

    /// Every channel to join, in configuration order, each at most once
    pub fn channels(&self) -> Vec<&str> {
        self.channels
            .iter()
            .chain(&self.channel)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .fold(Vec::new(), |mut out, channel| {
                if !out.contains(&channel) {
                    out.push(channel)
                }
                out
            })
    }

    pub fn nickserv(&self) -> Option<(&str, Option<&str>)> {
        let password = self.nickserv_password.as_deref().map(String::as_str)?;
        Some((password, self.nickserv_email.as_deref()))
    }

    pub fn is_me(&self, name: &str) -> bool {
        !self.nick.is_empty() && self.nick == name
    }
}
