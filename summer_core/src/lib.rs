use std::{future::Future, pin::Pin};

pub mod callable;
pub mod event;
pub mod render;

type BoxedFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a + Send>>;

pub mod prelude {
    pub use crate::callable::{CallableFn, Dispatch, Handlers, SharedCallable};
    pub use crate::event::{Capability, Event, Numeric, Sender};
    pub use crate::render::{Render, Response};
}
