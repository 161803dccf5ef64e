/// Where a connection is in its life
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Lifecycle {
    #[default]
    Disconnected,
    Connecting,
    /// `USER` and `NICK` were sent, waiting for the end of the MOTD
    Registering,
    /// The server is ready, channels haven't been joined yet
    Ready,
    Started,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Connect,
    Registered,
    /// An end-of-MOTD (or no-MOTD) numeric was seen
    MotdDone,
    StartedUp,
    EndOfStream,
}

impl Lifecycle {
    #[must_use]
    pub const fn next(self, transition: Transition) -> Self {
        use {Lifecycle::*, Transition::*};
        match (self, transition) {
            (_, EndOfStream) => Disconnected,
            (Disconnected, Connect) => Connecting,
            (Connecting, Registered) => Registering,
            (Registering, MotdDone) => Ready,
            (Ready, StartedUp) => Started,
            (state, _) => state,
        }
    }

    pub const fn should_start_up(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_started(&self) -> bool {
        matches!(self, Self::Started)
    }
}
