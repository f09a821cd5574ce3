//! Tower integration for switchyard.
//!
//! Wraps a [`Handler`] as a `tower::Service`, so routers built on tower (and
//! tower middleware such as timeouts or concurrency limits) can drive
//! controller actions directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use switchyard::tower::{Invocation, into_service};
//!
//! let service = into_service(dispatcher.handler("show")?);
//! let with_timeout = tower::timeout::Timeout::new(service, Duration::from_secs(5));
//!
//! let response = with_timeout
//!     .oneshot(Invocation::new(request, Response::new(), route_args![5]))
//!     .await?;
//! ```

use crate::{ActionFuture, Controller, DispatchError, Handler, RouteArgs};
use std::{
    fmt,
    task::{Context, Poll},
};

/// One call of a handler: the request, the response and the route arguments.
pub struct Invocation<C: Controller> {
    /// The incoming request.
    pub request: C::Request,
    /// The response the action starts from.
    pub response: C::Response,
    /// Positional route arguments.
    pub args: RouteArgs,
}

impl<C: Controller> Invocation<C> {
    /// Bundle the three inputs of a handler call.
    pub fn new(request: C::Request, response: C::Response, args: RouteArgs) -> Self {
        Self {
            request,
            response,
            args,
        }
    }
}

impl<C: Controller> fmt::Debug for Invocation<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

/// Wraps a switchyard [`Handler`] as a tower `Service`.
pub struct HandlerService<C: Controller> {
    handler: Handler<C>,
}

impl<C: Controller> HandlerService<C> {
    /// Create a new `HandlerService` wrapping the given handler.
    pub fn new(handler: Handler<C>) -> Self {
        Self { handler }
    }

    /// Get a reference to the inner handler.
    pub fn inner(&self) -> &Handler<C> {
        &self.handler
    }
}

impl<C: Controller> Clone for HandlerService<C> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
        }
    }
}

impl<C: Controller> fmt::Debug for HandlerService<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerService").field(&self.handler).finish()
    }
}

impl<C: Controller> ::tower::Service<Invocation<C>> for HandlerService<C> {
    type Response = C::Output;
    type Error = DispatchError;
    type Future = ActionFuture<'static, C::Output>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // Every call builds its own controller.
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, invocation: Invocation<C>) -> Self::Future {
        #[cfg(feature = "tracing")]
        tracing::trace!(action = %self.handler.action(), "tower call");

        self.handler
            .call(invocation.request, invocation.response, invocation.args)
    }
}

/// Convert a handler into a tower Service.
pub fn into_service<C: Controller>(handler: Handler<C>) -> HandlerService<C> {
    HandlerService::new(handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StatelessController;
    use crate::{ActionTable, Dispatch, Dispatcher, route_args};
    use ::tower::Service;
    use std::sync::Arc;

    fn count(_cx: &mut Dispatch<StatelessController>, args: RouteArgs) -> ActionFuture<'_, String> {
        Box::pin(async move { Ok::<_, DispatchError>(format!("{} args", args.len())) })
    }

    fn service() -> HandlerService<StatelessController> {
        let table = ActionTable::<StatelessController>::builder()
            .action("count", count)
            .build()
            .unwrap();
        let dispatcher = Dispatcher::with_table(Arc::new(()), table).unwrap();
        into_service(dispatcher.handler("count").unwrap())
    }

    #[tokio::test]
    async fn test_service_call() {
        let mut service = service();
        let out = service
            .call(Invocation::new((), (), route_args![1, 2]))
            .await
            .unwrap();
        assert_eq!(out, "2 args");
    }

    #[tokio::test]
    async fn test_clones_share_the_handler() {
        let mut first = service();
        let mut second = first.clone();
        assert_eq!(second.inner().action(), "count");

        let a = first.call(Invocation::new((), (), RouteArgs::new()));
        let b = second.call(Invocation::new((), (), route_args!["x"]));
        assert_eq!(a.await.unwrap(), "0 args");
        assert_eq!(b.await.unwrap(), "1 args");
    }
}
