use summer_core::prelude::{Event, Handlers, Sender};

/// Turns a PRIVMSG into the event that should handle it.
///
/// `!word rest` goes to the `word` command when one is bound. Everything else
/// is either a private message (when it was sent to `me`) or a channel message.
pub fn route_privmsg(
    sender: Sender,
    channel: String,
    text: String,
    me: &str,
    handlers: &Handlers,
) -> Event {
    if let Some((name, args)) = split_command(&text) {
        if handlers.has_command(name) {
            return Event::Command {
                name: name.to_string(),
                args: args.to_string(),
                sender,
                channel,
            };
        }
    }

    if channel == me {
        let channel = sender.nick.clone();
        return Event::PrivateMessage {
            sender,
            channel,
            text,
        };
    }

    Event::ChannelMessage {
        sender,
        channel,
        text,
    }
}

/// Splits `!name args` into `(name, args)`.
///
/// The name is the run of word characters after the `!`.
pub fn split_command(text: &str) -> Option<(&str, &str)> {
    let tail = text.strip_prefix('!')?;
    let end = tail
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(tail.len());
    if end == 0 {
        return None;
    }
    let (name, args) = tail.split_at(end);
    Some((name, args.trim_start()))
}
