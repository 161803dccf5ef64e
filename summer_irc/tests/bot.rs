use std::sync::{Arc, Mutex};

use summer_config::{Secret, Settings};
use summer_core::prelude::{Capability, Event, Handlers, Numeric, Response, Sender};
use summer_irc::{testing, Bot, Lifecycle};

const MOTD_END: &str = ":irc.example.com 376 summer :End of /MOTD command.";

fn settings() -> Settings {
    Settings {
        channels: vec!["#rust".into(), "#summer".into()],
        ..Settings::new("summer")
    }
}

type Calls = Arc<Mutex<Vec<String>>>;

fn calls() -> Calls {
    Arc::default()
}

fn take(calls: &Calls) -> Vec<String> {
    std::mem::take(&mut *calls.lock().unwrap())
}

#[tokio::test]
async fn registers_on_connect() {
    let (conn, server) = testing::pair();
    let bot = Bot::register(conn, settings(), Handlers::default())
        .await
        .unwrap();
    assert_eq!(bot.lifecycle(), Lifecycle::Registering);
    drop(bot);

    assert_eq!(
        server.received().await.unwrap(),
        ["USER summer summer summer summer", "NICK summer"]
    );
}

#[tokio::test]
async fn empty_nick_is_rejected() {
    let (conn, server) = testing::pair();
    let res = Bot::register(conn, Settings::default(), Handlers::default()).await;
    assert!(res.is_err());
    drop(res);

    // rejected before anything is written
    assert!(server.received().await.unwrap().is_empty());
}

#[tokio::test]
async fn ping_is_answered_without_handlers() {
    let seen = calls();
    let handlers = Handlers::default().bind(Capability::ChannelMessage, {
        let seen = Arc::clone(&seen);
        move |event: Event| {
            seen.lock().unwrap().push(format!("{event:?}"));
            async {}
        }
    });

    let out = testing::run(settings(), handlers, &["PING :irc.example.com"])
        .await
        .unwrap();

    insta::assert_snapshot!(out[2..].join("\n"), @"PONG :irc.example.com");
    assert!(take(&seen).is_empty());
}

#[tokio::test]
async fn starts_up_after_motd() {
    let seen = calls();
    let handlers = Handlers::default()
        .numeric(Numeric::EndOfMotd, {
            let seen = Arc::clone(&seen);
            move |raw| {
                seen.lock().unwrap().push(raw);
                async {}
            }
        })
        .did_start_up({
            let seen = Arc::clone(&seen);
            move || {
                seen.lock().unwrap().push(String::from("did_start_up"));
                async { Response::privmsg("#rust", "hello everyone") }
            }
        });

    let out = testing::run(settings(), handlers, &[MOTD_END]).await.unwrap();
    assert_eq!(
        out,
        [
            "USER summer summer summer summer",
            "NICK summer",
            "JOIN #rust",
            "JOIN #summer",
            "PRIVMSG #rust :hello everyone",
        ]
    );
    assert_eq!(take(&seen), [MOTD_END, "did_start_up"]);
}

#[tokio::test]
async fn no_motd_also_starts_up() {
    let out = testing::run(
        settings(),
        Handlers::default(),
        &[":irc.example.com 422 summer :MOTD File is missing"],
    )
    .await
    .unwrap();
    assert_eq!(out[2..], ["JOIN #rust", "JOIN #summer"]);
}

#[tokio::test]
async fn starts_up_only_once() {
    let out = testing::run(
        settings(),
        Handlers::default(),
        &[
            MOTD_END,
            ":irc.example.com 422 summer :MOTD File is missing",
            MOTD_END,
        ],
    )
    .await
    .unwrap();
    assert_eq!(out[2..], ["JOIN #rust", "JOIN #summer"]);
}

#[tokio::test]
async fn start_up_is_idempotent() {
    let (conn, mut server) = testing::pair();
    let mut bot = Bot::register(conn, settings(), Handlers::default())
        .await
        .unwrap();

    // not ready yet
    bot.start_up().await.unwrap();
    assert_eq!(bot.lifecycle(), Lifecycle::Registering);

    bot.handle_line(MOTD_END).await.unwrap();
    assert_eq!(bot.lifecycle(), Lifecycle::Ready);

    bot.start_up().await.unwrap();
    assert_eq!(bot.lifecycle(), Lifecycle::Started);
    bot.start_up().await.unwrap();
    assert_eq!(bot.lifecycle(), Lifecycle::Started);

    server.hang_up().await.unwrap();
    bot.start().await.unwrap();
    assert_eq!(bot.lifecycle(), Lifecycle::Disconnected);
    drop(bot);

    let out = server.received().await.unwrap();
    assert_eq!(out[2..], ["JOIN #rust", "JOIN #summer"]);
}

#[tokio::test]
async fn nickserv_comes_before_joins() {
    let settings = Settings {
        nickserv_password: Some(Secret::from("hunter2")),
        nickserv_email: Some("summer@example.com".into()),
        channel: Some("#legacy".into()),
        ..settings()
    };

    let out = testing::run(settings, Handlers::default(), &[MOTD_END])
        .await
        .unwrap();
    assert_eq!(
        out[2..],
        [
            "PRIVMSG NickServ :REGISTER hunter2 summer@example.com",
            "PRIVMSG NickServ :IDENTIFY hunter2",
            "JOIN #rust",
            "JOIN #summer",
            "JOIN #legacy",
        ]
    );
}

#[tokio::test]
async fn commands_are_routed() {
    let seen = calls();
    let handlers = Handlers::default().command("greet", {
        let seen = Arc::clone(&seen);
        move |sender: Sender, channel, args| {
            seen.lock()
                .unwrap()
                .push(format!("{} {channel} {args}", sender.nick));
            async move { Response::reply(format!("hello {args}")) }
        }
    });

    let out = testing::run(
        settings(),
        handlers,
        &[":alice!~alice@host.example PRIVMSG #chan :!greet world"],
    )
    .await
    .unwrap();

    assert_eq!(take(&seen), ["alice #chan world"]);
    insta::assert_snapshot!(out[2..].join("\n"), @"PRIVMSG #chan :alice: hello world");
}

#[tokio::test]
async fn unbound_commands_are_channel_messages() {
    let seen = calls();
    let handlers = Handlers::default().channel_message({
        let seen = Arc::clone(&seen);
        move |sender: Sender, channel, text| {
            seen.lock()
                .unwrap()
                .push(format!("{} {channel} {text}", sender.nick));
            async {}
        }
    });

    testing::run(
        settings(),
        handlers,
        &[":alice!~alice@host.example PRIVMSG #chan :!greet world"],
    )
    .await
    .unwrap();

    assert_eq!(take(&seen), ["alice #chan !greet world"]);
}

#[tokio::test]
async fn private_messages_use_the_senders_nick() {
    let seen = calls();
    let handlers = Handlers::default().private_message({
        let seen = Arc::clone(&seen);
        move |sender: Sender, channel, text| {
            seen.lock()
                .unwrap()
                .push(format!("{} {channel} {text}", sender.nick));
            async { "hi there" }
        }
    });

    let out = testing::run(
        settings(),
        handlers,
        &[":alice!~alice@host.example PRIVMSG summer :hello"],
    )
    .await
    .unwrap();

    assert_eq!(take(&seen), ["alice alice hello"]);
    assert_eq!(out[2..], ["PRIVMSG alice :hi there"]);
}

#[tokio::test]
async fn kicked_bot_rejoins() {
    let seen = calls();
    let handlers = Handlers::default().kick({
        let seen = Arc::clone(&seen);
        move |sender: Sender, channel, target, text| {
            seen.lock()
                .unwrap()
                .push(format!("{} {channel} {target} {text}", sender.nick));
            async { Response::log("kicked") }
        }
    });

    let settings = Settings {
        auto_rejoin: true,
        ..settings()
    };

    let out = testing::run(
        settings,
        handlers,
        &[":alice!~alice@host.example KICK #chan summer :reason text"],
    )
    .await
    .unwrap();

    assert_eq!(take(&seen), ["alice #chan summer reason text"]);
    assert_eq!(out[2..], ["JOIN #chan"]);
}

#[tokio::test]
async fn no_rejoin_unless_enabled() {
    let out = testing::run(
        settings(),
        Handlers::default(),
        &[":alice!~alice@host.example KICK #chan summer :reason text"],
    )
    .await
    .unwrap();
    assert!(out[2..].is_empty());

    let settings = Settings {
        auto_rejoin: true,
        ..settings()
    };
    let out = testing::run(
        settings,
        Handlers::default(),
        &[":alice!~alice@host.example KICK #chan bob :not you"],
    )
    .await
    .unwrap();
    assert!(out[2..].is_empty());
}

#[tokio::test]
async fn unknown_numerics_are_ignored() {
    let seen = calls();
    let record = |seen: &Calls| {
        let seen = Arc::clone(seen);
        move |event: Event| {
            seen.lock().unwrap().push(format!("{event:?}"));
            async {}
        }
    };

    let handlers = Handlers::default()
        .bind(Capability::Numeric(Numeric::EndOfMotd), record(&seen))
        .bind(Capability::Numeric(Numeric::NoMotd), record(&seen));

    let out = testing::run(
        settings(),
        handlers,
        &[
            ":irc.example.com 001 summer :Welcome to the network",
            ":irc.example.com 375 summer :- irc.example.com Message of the Day -",
            ":irc.example.com 433 * summer :Nickname is already in use",
        ],
    )
    .await
    .unwrap();

    assert!(take(&seen).is_empty());
    assert_eq!(out.len(), 2);
}

#[tokio::test]
async fn membership_events() {
    let seen = calls();
    let push = |seen: &Calls, line: String| seen.lock().unwrap().push(line);

    let handlers = Handlers::default()
        .join({
            let seen = Arc::clone(&seen);
            move |sender: Sender, channel| {
                push(&seen, format!("join {} {channel}", sender.nick));
                async {}
            }
        })
        .part({
            let seen = Arc::clone(&seen);
            move |sender: Sender, channel, text| {
                push(&seen, format!("part {} {channel} {text}", sender.nick));
                async {}
            }
        })
        .quit({
            let seen = Arc::clone(&seen);
            move |sender: Sender, text| {
                push(&seen, format!("quit {} {text}", sender.nick));
                async {}
            }
        })
        .mode({
            let seen = Arc::clone(&seen);
            move |sender: Sender, channel, target, text| {
                push(&seen, format!("mode {} {channel} {target} {text}", sender.nick));
                async {}
            }
        })
        .topic({
            let seen = Arc::clone(&seen);
            move |sender: Sender, channel, text| {
                push(&seen, format!("topic {} {channel} {text}", sender.nick));
                async {}
            }
        });

    testing::run(
        settings(),
        handlers,
        &[
            ":alice!~alice@host.example JOIN :#summer",
            ":alice!~alice@host.example MODE #summer +o bob",
            ":alice!~alice@host.example TOPIC #summer :summer time",
            ":alice!~alice@host.example PART #summer :bye",
            ":alice!~alice@host.example QUIT :Quit: gone",
            ":irc.example.com NOTICE * :*** this is dropped",
        ],
    )
    .await
    .unwrap();

    assert_eq!(
        take(&seen),
        [
            "join alice #summer",
            "mode alice #summer +o bob",
            "topic alice #summer summer time",
            "part alice #summer bye",
            "quit alice Quit: gone",
        ]
    );
}

#[tokio::test]
async fn faulty_handlers_do_not_stop_the_loop() {
    let seen = calls();
    let handlers = Handlers::default()
        .join(|_, _| async {
            if true {
                panic!("broken join handler");
            }
        })
        .part(|_, _, _| async { Err::<(), _>(anyhow::anyhow!("broken part handler")) })
        .quit({
            let seen = Arc::clone(&seen);
            move |sender: Sender, _| {
                seen.lock().unwrap().push(sender.nick);
                async {}
            }
        });

    let out = testing::run(
        settings(),
        handlers,
        &[
            ":alice!a@host JOIN #summer",
            ":alice!a@host PART #summer",
            ":alice!a@host QUIT :bye",
            "PING :still-alive",
        ],
    )
    .await
    .unwrap();

    assert_eq!(take(&seen), ["alice"]);
    assert_eq!(out[2..], ["PONG :still-alive"]);
}

#[tokio::test]
async fn end_of_stream_stops_everything() {
    let seen = calls();
    let handlers = Handlers::default().did_start_up({
        let seen = Arc::clone(&seen);
        move || {
            seen.lock().unwrap().push(String::from("did_start_up"));
            async {}
        }
    });

    let out = testing::run(settings(), handlers, &[]).await.unwrap();
    assert!(take(&seen).is_empty());
    assert_eq!(out, ["USER summer summer summer summer", "NICK summer"]);
}

#[tokio::test]
async fn log_responses_go_to_the_log_file() {
    let path = std::env::temp_dir().join(format!("summer-bot-{}.log", std::process::id()));
    let _ = tokio::fs::remove_file(&path).await;

    let settings = Settings {
        log_file: Some(path.clone()),
        ..settings()
    };
    let handlers = Handlers::default()
        .topic(|sender: Sender, channel, text| async move {
            Response::log(format!("{} changed the topic of {channel} to {text}", sender.nick))
        });

    let out = testing::run(
        settings,
        handlers,
        &[":alice!a@host TOPIC #summer :new topic"],
    )
    .await
    .unwrap();
    assert_eq!(out.len(), 2);

    let data = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(data.trim_end().ends_with("alice changed the topic of #summer to new topic"));
    tokio::fs::remove_file(&path).await.unwrap();
}
