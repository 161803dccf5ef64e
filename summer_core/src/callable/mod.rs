use std::{future::Future, sync::Arc};

use crate::{
    event::Event,
    render::{BoxedRender, Render},
    BoxedFuture,
};

mod dispatch;
mod handlers;

pub use dispatch::Dispatch;
pub use handlers::Handlers;

pub type SharedCallable = Arc<dyn CallableFn<Out = BoxedFuture<'static, BoxedRender>>>;

pub trait CallableFn
where
    Self: Send + Sync + 'static,
{
    type Out: Future + Send;
    fn call(&self, event: Event) -> Self::Out;
}

impl<F> CallableFn for Arc<F>
where
    F: CallableFn + ?Sized,
{
    type Out = F::Out;

    fn call(&self, event: Event) -> Self::Out {
        (**self).call(event)
    }
}

impl<F, Fut> CallableFn for F
where
    F: Fn(Event) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: Render + Send + 'static,
{
    type Out = BoxedFuture<'static, BoxedRender>;

    fn call(&self, event: Event) -> Self::Out {
        let fut = (self)(event);
        Box::pin(async move { fut.await.boxed() })
    }
}
