use summer_config::Settings;
use summer_core::prelude::*;

/// The handlers the bot ships with
pub struct Builtin;

impl Builtin {
    pub fn bind(settings: &Settings) -> Handlers {
        let channels = settings.channels().join(", ");

        Handlers::default()
            .did_start_up(move || {
                let channels = channels.clone();
                async move {
                    match channels.as_str() {
                        "" => log::info!("started up without any channels"),
                        channels => log::info!("started up in: {channels}"),
                    }
                }
            })
            .command("hello", |sender: Sender, _, _| async move {
                Response::reply(format!("hello, {}!", sender.nick))
            })
            .command("echo", |_, _, args: String| async move {
                let args = args.trim();
                if args.is_empty() {
                    return None;
                }
                Some(Response::say(args))
            })
            .numeric(Numeric::EndOfMotd, Self::motd_done)
            .numeric(Numeric::NoMotd, Self::motd_done)
            .kick(Self::kicked)
    }

    async fn motd_done(raw: String) {
        log::debug!("end of motd: {raw}");
    }

    async fn kicked(sender: Sender, channel: String, target: String, text: String) -> impl Render {
        let line = format!("{} kicked {target} from {channel}", sender.nick);
        match text.as_str() {
            "" => Response::log(line),
            text => Response::log(format!("{line} ({text})")),
        }
    }
}
