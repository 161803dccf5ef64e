use summer_config::Settings;
use summer_core::prelude::{Dispatch, Event, Handlers, Response};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::TcpStream,
};

use crate::{
    parser::{self, Message},
    router, Connection, Journal, Lifecycle, Transition,
};

/// A single connection and everything that drives it
pub struct Bot<S = TcpStream> {
    conn: Connection<S>,
    settings: Settings,
    handlers: Handlers,
    journal: Journal,
    state: Lifecycle,
}

impl Bot<TcpStream> {
    pub async fn connect(addr: &str, settings: Settings, handlers: Handlers) -> anyhow::Result<Self> {
        log::info!("connecting to {addr} (with nick {})", settings.nick);
        let conn = Connection::connect(addr).await?;
        log::info!("connected");
        Self::register(conn, settings, handlers).await
    }
}

impl<S> Bot<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Sends `USER` and `NICK` over an already open connection.
    ///
    /// The server's answer is picked up later by the read loop.
    pub async fn register(
        conn: Connection<S>,
        settings: Settings,
        handlers: Handlers,
    ) -> anyhow::Result<Self> {
        settings.validate()?;
        log::debug!("handlers: {handlers:?}");

        let mut this = Self {
            conn,
            journal: Journal::new(settings.log_file.clone()),
            settings,
            handlers,
            state: Lifecycle::default().next(Transition::Connect),
        };

        let nick = this.settings.nick.clone();
        this.write_raw(&format!("USER {nick} {nick} {nick} {nick}"))
            .await?;
        this.write_raw(&format!("NICK {nick}")).await?;
        this.transition(Transition::Registered);

        Ok(this)
    }

    pub const fn lifecycle(&self) -> Lifecycle {
        self.state
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs until the server closes the connection
    pub async fn start(&mut self) -> anyhow::Result<()> {
        loop {
            if self.state.should_start_up() {
                self.start_up().await?;
            }

            let line = match self.conn.read_line().await? {
                Some(line) => line.to_string(),
                None => break,
            };
            self.handle_line(&line).await?;
        }

        self.transition(Transition::EndOfStream);
        log::info!("connection closed");
        Ok(())
    }

    /// Identifies with NickServ and joins the configured channels.
    ///
    /// Does nothing unless the server is ready and this hasn't happened yet.
    pub async fn start_up(&mut self) -> anyhow::Result<()> {
        if !self.state.should_start_up() {
            return Ok(());
        }

        let nickserv = self
            .settings
            .nickserv()
            .map(|(password, email)| (password.to_string(), email.map(ToString::to_string)));

        if let Some((password, email)) = nickserv {
            log::info!("identifying with NickServ");
            let register = match email {
                Some(email) => format!("PRIVMSG NickServ :REGISTER {password} {email}"),
                None => format!("PRIVMSG NickServ :REGISTER {password}"),
            };
            self.conn.write_masked(&register, &password).await?;

            let identify = format!("PRIVMSG NickServ :IDENTIFY {password}");
            self.conn.write_masked(&identify, &password).await?;
        }

        let channels = self
            .settings
            .channels()
            .into_iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        for channel in &channels {
            log::info!("joining {channel}");
            self.join(channel).await?;
        }

        self.transition(Transition::StartedUp);
        self.dispatch(Event::StartUp).await
    }

    /// Classifies one line and reacts to it
    pub async fn handle_line(&mut self, line: &str) -> anyhow::Result<()> {
        match parser::parse(line) {
            Message::Ping { token } => self.write_raw(&format!("PONG {token}")).await,

            Message::Numeric { numeric, raw } => {
                self.transition(Transition::MotdDone);
                self.dispatch(Event::Numeric { numeric, raw }).await
            }

            Message::Privmsg {
                sender,
                channel,
                text,
            } => {
                let event = router::route_privmsg(
                    sender,
                    channel,
                    text,
                    &self.settings.nick,
                    &self.handlers,
                );
                self.dispatch(event).await
            }

            Message::Join { sender, channel } => {
                self.dispatch(Event::Join { sender, channel }).await
            }

            Message::Part {
                sender,
                channel,
                text,
            } => {
                let event = Event::Part {
                    sender,
                    channel,
                    text,
                };
                self.dispatch(event).await
            }

            Message::Quit { sender, text } => self.dispatch(Event::Quit { sender, text }).await,

            Message::Kick {
                sender,
                channel,
                target,
                text,
            } => {
                let rejoin = self.settings.auto_rejoin && self.settings.is_me(&target);
                let event = Event::Kick {
                    sender,
                    channel: channel.clone(),
                    target,
                    text,
                };
                self.dispatch(event).await?;

                if rejoin {
                    log::info!("kicked from {channel}, rejoining");
                    self.join(&channel).await?;
                }
                Ok(())
            }

            Message::Mode {
                sender,
                channel,
                target,
                text,
            } => {
                let event = Event::Mode {
                    sender,
                    channel,
                    target,
                    text,
                };
                self.dispatch(event).await
            }

            Message::Topic {
                sender,
                channel,
                text,
            } => {
                let event = Event::Topic {
                    sender,
                    channel,
                    text,
                };
                self.dispatch(event).await
            }

            Message::Unknown => Ok(()),
        }
    }

    pub async fn join(&mut self, channel: &str) -> anyhow::Result<()> {
        self.write_raw(&format!("JOIN {channel}")).await
    }

    pub async fn part(&mut self, channel: &str) -> anyhow::Result<()> {
        self.write_raw(&format!("PART {channel}")).await
    }

    /// Sends `data` to `target`, one PRIVMSG per line
    pub async fn privmsg(&mut self, target: &str, data: &str) -> anyhow::Result<()> {
        for line in data.lines().filter(|s| !s.trim().is_empty()) {
            self.write_raw(&format!("PRIVMSG {target} :{line}")).await?;
        }
        Ok(())
    }

    pub async fn write_raw(&mut self, data: &str) -> anyhow::Result<()> {
        self.conn.write_raw(data).await
    }

    async fn dispatch(&mut self, event: Event) -> anyhow::Result<()> {
        let capability = event.capability();
        let sender = event.sender().map(|sender| sender.nick.clone());
        // a reply to something sent to us goes back to whoever sent it
        let target = match (event.reply_target(), &sender) {
            (Some(target), Some(nick)) if self.settings.is_me(target) => Some(nick.clone()),
            (target, _) => target.map(ToString::to_string),
        };

        let responses = Dispatch::new(&self.handlers).dispatch(event).await;
        for resp in responses {
            match resp {
                Response::Say(data) => match &target {
                    Some(target) => self.privmsg(target, &data).await?,
                    None => log::warn!("{capability} has nowhere to say: {data}"),
                },

                Response::Reply(data) => match (&target, &sender) {
                    (Some(target), Some(nick)) => {
                        self.privmsg(target, &format!("{nick}: {data}")).await?
                    }
                    _ => log::warn!("{capability} has nobody to reply to: {data}"),
                },

                Response::Problem(data) => log::warn!("{capability} had a problem: {data}"),

                Response::Privmsg { target, data } => self.privmsg(&target, &data).await?,
                Response::Join(channel) => self.join(&channel).await?,
                Response::Part(channel) => self.part(&channel).await?,

                Response::Log(data) => {
                    if let Err(err) = self.journal.write(&data).await {
                        log::warn!("cannot write to the log file: {err:#}")
                    }
                }
            }
        }

        Ok(())
    }

    fn transition(&mut self, transition: Transition) {
        let next = self.state.next(transition);
        if next != self.state {
            log::debug!("{:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }
}
