use std::{collections::HashMap, future::Future, sync::Arc};

use crate::{
    event::{Capability, Event, Numeric, Sender},
    render::{BoxedRender, Render},
    BoxedFuture,
};

use super::SharedCallable;

/// The set of capabilities a bot can call into. Every one of them is optional.
///
/// ```no_run
/// # use summer_core::prelude::*;
/// let handlers = Handlers::default()
///     .command("hello", |sender: Sender, _channel, _args| async move {
///         format!("hello, {}", sender.nick)
///     })
///     .join(|sender: Sender, channel| async move {
///         Response::log(format!("{} joined {channel}", sender.nick))
///     });
/// ```
#[derive(Default, Clone)]
pub struct Handlers {
    map: HashMap<Capability, SharedCallable>,
}

impl std::fmt::Debug for Handlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.map.keys().map(ToString::to_string))
            .finish()
    }
}

impl Handlers {
    pub fn get(&self, capability: &Capability) -> Option<&SharedCallable> {
        self.map.get(capability)
    }

    pub fn has(&self, capability: &Capability) -> bool {
        self.map.contains_key(capability)
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.has(&Capability::command(name))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Registers `func` for `capability`, replacing any earlier one
    pub fn bind<F, Fut>(mut self, capability: Capability, func: F) -> Self
    where
        F: Fn(Event) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Render + Send + 'static,
    {
        if self.map.insert(capability.clone(), Arc::new(func)).is_some() {
            log::warn!("replaced handler: {capability}");
        }
        self
    }

    pub fn did_start_up<F, Fut>(self, func: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Render + Send + 'static,
    {
        self.bind(
            Capability::DidStartUp,
            adapt(func, |func, event| match event {
                Event::StartUp => Some(func()),
                _ => None,
            }),
        )
    }

    /// Binds `!name`. The handler gets the sender, the channel and the rest of the line.
    pub fn command<F, Fut>(self, name: &str, func: F) -> Self
    where
        F: Fn(Sender, String, String) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Render + Send + 'static,
    {
        let name = name.strip_prefix('!').unwrap_or(name);
        self.bind(
            Capability::command(name),
            adapt(func, |func, event| match event {
                Event::Command {
                    sender,
                    channel,
                    args,
                    ..
                } => Some(func(sender, channel, args)),
                _ => None,
            }),
        )
    }

    /// The channel passed along is the sender's nick
    pub fn private_message<F, Fut>(self, func: F) -> Self
    where
        F: Fn(Sender, String, String) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Render + Send + 'static,
    {
        self.bind(
            Capability::PrivateMessage,
            adapt(func, |func, event| match event {
                Event::PrivateMessage {
                    sender,
                    channel,
                    text,
                } => Some(func(sender, channel, text)),
                _ => None,
            }),
        )
    }

    pub fn channel_message<F, Fut>(self, func: F) -> Self
    where
        F: Fn(Sender, String, String) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Render + Send + 'static,
    {
        self.bind(
            Capability::ChannelMessage,
            adapt(func, |func, event| match event {
                Event::ChannelMessage {
                    sender,
                    channel,
                    text,
                } => Some(func(sender, channel, text)),
                _ => None,
            }),
        )
    }

    pub fn join<F, Fut>(self, func: F) -> Self
    where
        F: Fn(Sender, String) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Render + Send + 'static,
    {
        self.bind(
            Capability::Join,
            adapt(func, |func, event| match event {
                Event::Join { sender, channel } => Some(func(sender, channel)),
                _ => None,
            }),
        )
    }

    pub fn part<F, Fut>(self, func: F) -> Self
    where
        F: Fn(Sender, String, String) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Render + Send + 'static,
    {
        self.bind(
            Capability::Part,
            adapt(func, |func, event| match event {
                Event::Part {
                    sender,
                    channel,
                    text,
                } => Some(func(sender, channel, text)),
                _ => None,
            }),
        )
    }

    pub fn quit<F, Fut>(self, func: F) -> Self
    where
        F: Fn(Sender, String) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Render + Send + 'static,
    {
        self.bind(
            Capability::Quit,
            adapt(func, |func, event| match event {
                Event::Quit { sender, text } => Some(func(sender, text)),
                _ => None,
            }),
        )
    }

    /// The handler gets the sender, the channel, who was kicked and the reason
    pub fn kick<F, Fut>(self, func: F) -> Self
    where
        F: Fn(Sender, String, String, String) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Render + Send + 'static,
    {
        self.bind(
            Capability::Kick,
            adapt(func, |func, event| match event {
                Event::Kick {
                    sender,
                    channel,
                    target,
                    text,
                } => Some(func(sender, channel, target, text)),
                _ => None,
            }),
        )
    }

    pub fn mode<F, Fut>(self, func: F) -> Self
    where
        F: Fn(Sender, String, String, String) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Render + Send + 'static,
    {
        self.bind(
            Capability::Mode,
            adapt(func, |func, event| match event {
                Event::Mode {
                    sender,
                    channel,
                    target,
                    text,
                } => Some(func(sender, channel, target, text)),
                _ => None,
            }),
        )
    }

    pub fn topic<F, Fut>(self, func: F) -> Self
    where
        F: Fn(Sender, String, String) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Render + Send + 'static,
    {
        self.bind(
            Capability::Topic,
            adapt(func, |func, event| match event {
                Event::Topic {
                    sender,
                    channel,
                    text,
                } => Some(func(sender, channel, text)),
                _ => None,
            }),
        )
    }

    /// The handler gets the raw line
    pub fn numeric<F, Fut>(self, numeric: Numeric, func: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future + Send + 'static,
        Fut::Output: Render + Send + 'static,
    {
        self.bind(
            Capability::Numeric(numeric),
            adapt(func, |func, event| match event {
                Event::Numeric { raw, .. } => Some(func(raw)),
                _ => None,
            }),
        )
    }
}

fn adapt<F, Fut>(
    func: F,
    pick: fn(&F, Event) -> Option<Fut>,
) -> impl Fn(Event) -> BoxedFuture<'static, BoxedRender> + Send + Sync + 'static
where
    F: Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: Render + Send + 'static,
{
    move |event: Event| -> BoxedFuture<'static, BoxedRender> {
        let fut = pick(&func, event);
        Box::pin(async move {
            match fut {
                Some(fut) => fut.await.boxed(),
                None => ().boxed(),
            }
        })
    }
}
