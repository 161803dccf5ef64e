use summer_core::prelude::{Numeric, Sender};

/// A classified line. Each variant carries what its handler needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    Ping {
        token: String,
    },
    Numeric {
        numeric: Numeric,
        raw: String,
    },
    Privmsg {
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
    /// Anything else, including numerics that aren't acted on
    Unknown,
}

/// Classifies a single line. The order of the checks matters: the first match wins.
pub fn parse(line: &str) -> Message {
    let line = line.trim_end();

    if let Some(token) = ping(line) {
        return Message::Ping {
            token: token.to_string(),
        };
    }

    let words = line.split_whitespace().collect::<Vec<_>>();
    let (prefix, verb) = match &*words {
        [prefix, verb, ..] => (*prefix, *verb),
        _ => return Message::Unknown,
    };

    if verb.bytes().all(|c| c.is_ascii_digit()) {
        return Numeric::from_code(verb)
            .map(|numeric| Message::Numeric {
                numeric,
                raw: line.to_string(),
            })
            .unwrap_or(Message::Unknown);
    }

    let sender = parse_sender(prefix);
    let channel = words.get(2).map(|s| clean(s).to_string());
    let target = || words.get(3).map(|s| s.to_string()).unwrap_or_default();
    let trailing = |start: usize| words.get(start..).map(join).unwrap_or_default();

    match (verb, channel) {
        ("PRIVMSG", Some(channel)) => Message::Privmsg {
            sender,
            channel,
            text: trailing(3),
        },
        ("JOIN", Some(channel)) => Message::Join { sender, channel },
        ("PART", Some(channel)) => Message::Part {
            sender,
            channel,
            text: trailing(3),
        },
        ("QUIT", ..) => Message::Quit {
            sender,
            text: trailing(2),
        },
        ("KICK", Some(channel)) => Message::Kick {
            sender,
            channel,
            target: target(),
            text: trailing(4),
        },
        ("MODE", Some(channel)) => Message::Mode {
            sender,
            channel,
            target: target(),
            text: trailing(4),
        },
        ("TOPIC", Some(channel)) => Message::Topic {
            sender,
            channel,
            text: trailing(3),
        },
        _ => Message::Unknown,
    }
}

/// Splits `nick!hostname` on the first `!`
pub fn parse_sender(token: &str) -> Sender {
    match token.split_once('!') {
        Some((nick, hostname)) => Sender {
            nick: clean(nick).to_string(),
            hostname: Some(hostname.to_string()),
        },
        None => Sender {
            nick: clean(token).to_string(),
            hostname: None,
        },
    }
}

fn ping(line: &str) -> Option<&str> {
    let token = line.strip_prefix("PING ")?.trim();
    (!token.is_empty() && !token.contains(char::is_whitespace)).then_some(token)
}

// strips the protocol's leading ':'
fn clean(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix(':').unwrap_or(s)
}

fn join(words: &[&str]) -> String {
    clean(&words.join(" ")).to_string()
}
