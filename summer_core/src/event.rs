/// The originator of a line, taken from its `nick!hostname` prefix
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sender {
    pub nick: String,
    pub hostname: Option<String>,
}

impl Sender {
    pub fn new(nick: impl Into<String>, hostname: impl Into<Option<String>>) -> Self {
        Self {
            nick: nick.into(),
            hostname: hostname.into(),
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.hostname {
            Some(hostname) => write!(f, "{}!{}", self.nick, hostname),
            None => f.write_str(&self.nick),
        }
    }
}

/// The numeric replies that are acted on. Every other numeric is ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Numeric {
    EndOfMotd,
    NoMotd,
}

impl Numeric {
    pub const ALL: [Self; 2] = [Self::EndOfMotd, Self::NoMotd];

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|numeric| numeric.code() == code)
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::EndOfMotd => "376",
            Self::NoMotd => "422",
        }
    }
}

impl std::fmt::Display for Numeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// The key a handler is registered under
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    DidStartUp,
    Command(String),
    PrivateMessage,
    ChannelMessage,
    Join,
    Part,
    Quit,
    Kick,
    Mode,
    Topic,
    Numeric(Numeric),
}

impl Capability {
    pub fn command(name: impl Into<String>) -> Self {
        Self::Command(name.into())
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::DidStartUp => "did_start_up",
            Self::Command(name) => return write!(f, "{name}_command"),
            Self::PrivateMessage => "private_message",
            Self::ChannelMessage => "channel_message",
            Self::Join => "join",
            Self::Part => "part",
            Self::Quit => "quit",
            Self::Kick => "kick",
            Self::Mode => "mode",
            Self::Topic => "topic",
            Self::Numeric(numeric) => return write!(f, "handle_{numeric}"),
        };
        f.write_str(name)
    }
}

/// Something a handler can react to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    StartUp,
    Numeric {
        numeric: Numeric,
        raw: String,
    },
    Command {
        sender: Sender,
        channel: String,
        name: String,
        args: String,
    },
    PrivateMessage {
        sender: Sender,
        channel: String,
        text: String,
    },
    ChannelMessage {
        sender: Sender,
        channel: String,
        text: String,
    },
    Join {
        sender: Sender,
        channel: String,
    },
    Part {
        sender: Sender,
        channel: String,
        text: String,
    },
    Quit {
        sender: Sender,
        text: String,
    },
    Kick {
        sender: Sender,
        channel: String,
        target: String,
        text: String,
    },
    Mode {
        sender: Sender,
        channel: String,
        target: String,
        text: String,
    },
    Topic {
        sender: Sender,
        channel: String,
        text: String,
    },
}

impl Event {
    pub fn capability(&self) -> Capability {
        match self {
            Self::StartUp => Capability::DidStartUp,
            Self::Numeric { numeric, .. } => Capability::Numeric(*numeric),
            Self::Command { name, .. } => Capability::Command(name.clone()),
            Self::PrivateMessage { .. } => Capability::PrivateMessage,
            Self::ChannelMessage { .. } => Capability::ChannelMessage,
            Self::Join { .. } => Capability::Join,
            Self::Part { .. } => Capability::Part,
            Self::Quit { .. } => Capability::Quit,
            Self::Kick { .. } => Capability::Kick,
            Self::Mode { .. } => Capability::Mode,
            Self::Topic { .. } => Capability::Topic,
        }
    }

    pub fn sender(&self) -> Option<&Sender> {
        match self {
            Self::StartUp | Self::Numeric { .. } => None,
            Self::Command { sender, .. }
            | Self::PrivateMessage { sender, .. }
            | Self::ChannelMessage { sender, .. }
            | Self::Join { sender, .. }
            | Self::Part { sender, .. }
            | Self::Quit { sender, .. }
            | Self::Kick { sender, .. }
            | Self::Mode { sender, .. }
            | Self::Topic { sender, .. } => Some(sender),
        }
    }

    /// Where a `Say` or a `Reply` for this event goes.
    ///
    /// For private messages the channel already is the sender's nick.
    pub fn reply_target(&self) -> Option<&str> {
        match self {
            Self::StartUp | Self::Numeric { .. } | Self::Quit { .. } => None,
            Self::Command { channel, .. }
            | Self::PrivateMessage { channel, .. }
            | Self::ChannelMessage { channel, .. }
            | Self::Join { channel, .. }
            | Self::Part { channel, .. }
            | Self::Kick { channel, .. }
            | Self::Mode { channel, .. }
            | Self::Topic { channel, .. } => Some(channel),
        }
    }
}
