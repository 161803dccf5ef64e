use std::sync::Arc;

use crate::{
    event::Event,
    render::{Render, Response},
};

use super::{CallableFn, Handlers};

/// Calls into a [`Handlers`] set, one event at a time.
///
/// A missing capability is a no-op. A handler that panics is reported and
/// produces nothing, the caller keeps going.
pub struct Dispatch<'a> {
    handlers: &'a Handlers,
}

impl<'a> Dispatch<'a> {
    pub const fn new(handlers: &'a Handlers) -> Self {
        Self { handlers }
    }

    pub async fn dispatch(&self, event: Event) -> Vec<Response> {
        let capability = event.capability();
        let callable = match self.handlers.get(&capability) {
            Some(callable) => Arc::clone(callable),
            None => {
                log::trace!("no handler for {capability}");
                return vec![];
            }
        };

        log::trace!("calling {capability}");
        // the handler runs on its own task so a panic stays inside of it
        let task = tokio::spawn(async move { callable.call(event).await });
        match task.await {
            Ok(render) => render.render(),
            Err(err) => {
                log::warn!("handler {capability} failed: {err}");
                vec![]
            }
        }
    }
}
