//! # Dispatch
//!
//! Turns a controller type and an action name into a handler the router can
//! call, and runs that handler.
//!
//! ## Invocation order
//!
//! For every call of [`Handler::call`]:
//!
//! 1. a fresh controller is built with [`Controller::create`];
//! 2. the request goes to [`Controller::request_receiver`] if the controller
//!    exposes one, otherwise the [`Dispatch`] context keeps it;
//! 3. the response likewise, through [`Controller::response_receiver`];
//! 4. [`Controller::initializer`] runs, if present;
//! 5. controller name, controller type and action name are recorded on the
//!    response, if it exposes [`DispatchResponse::recorder`];
//! 6. the action runs with the route arguments and its result is returned
//!    unchanged; on success the context ends in [`DispatchState::Complete`].
//!
//! Missing capabilities are skipped silently. A controller with none of them
//! gets the bare `(request, response, args) -> result` treatment.
//!
//! ## Forwarding
//!
//! From inside an action, [`Dispatch::forward`] hands control to another
//! action of the same controller instance. Injection and the init hook are
//! not repeated; only the recorded action name changes.
//!
//! ```rust,ignore
//! #[switchyard::actions]
//! impl ArticlesController {
//!     async fn legacy(cx: &mut Dispatch<Self>, id: i64) -> Result<Response, DispatchError> {
//!         cx.forward("show", route_args![id]).await
//!     }
//! }
//! ```

use crate::table::{ActionFn, ActionFuture, ActionTable, ActionTableBuilder};
use futures::future;
use std::{fmt, sync::Arc};
use switchyard_core::{
    Controller, ControllerIdentity, DispatchError, DispatchMetadata, DispatchRecorder,
    DispatchResponse, DispatchState, RouteArgs,
};

/// Controllers that know their own action table.
///
/// Usually generated by `#[switchyard::actions]`.
pub trait Actions: Controller {
    /// Register every action of the controller.
    fn actions(table: ActionTableBuilder<Self>) -> ActionTableBuilder<Self>;
}

/// The per-request dispatch context.
///
/// Owns the controller instance for the duration of one request, plus
/// whatever part of the request/response context the controller did not take
/// itself. Actions receive it as `&mut Dispatch<Self>`.
pub struct Dispatch<C: Controller> {
    controller: C,
    app: Arc<C::App>,
    actions: Arc<ActionTable<C>>,
    request: Option<C::Request>,
    response: Option<C::Response>,
    metadata: DispatchMetadata,
    state: DispatchState,
}

impl<C: Controller> Dispatch<C> {
    /// Create a context outside of any dispatch.
    ///
    /// The context starts in [`DispatchState::Constructed`]; forwarding from
    /// it fails with [`DispatchError::InvalidState`].
    pub fn detached(controller: C, app: Arc<C::App>, actions: Arc<ActionTable<C>>) -> Self {
        Self {
            controller,
            app,
            actions,
            request: None,
            response: None,
            metadata: DispatchMetadata::default(),
            state: DispatchState::Constructed,
        }
    }

    /// The controller instance.
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// The controller instance, mutably.
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    /// The application handle.
    pub fn app(&self) -> &Arc<C::App> {
        &self.app
    }

    /// The action table shared by every dispatch of this controller.
    pub fn actions(&self) -> &ActionTable<C> {
        &self.actions
    }

    /// The request, when the controller did not take it.
    pub fn request(&self) -> Option<&C::Request> {
        self.request.as_ref()
    }

    /// Remove the request held by the context.
    pub fn take_request(&mut self) -> Option<C::Request> {
        self.request.take()
    }

    /// The current response, wherever it is held.
    pub fn response_mut(&mut self) -> Option<&mut C::Response> {
        if self.response.is_some() {
            return self.response.as_mut();
        }
        self.controller
            .response_receiver()
            .and_then(|receiver| receiver.current_response())
    }

    /// Remove the current response, wherever it is held.
    ///
    /// Forwarding afterwards fails with [`DispatchError::InvalidState`].
    pub fn take_response(&mut self) -> Option<C::Response> {
        if self.response.is_some() {
            return self.response.take();
        }
        self.controller
            .response_receiver()
            .and_then(|receiver| receiver.take_response())
    }

    /// Metadata of the current dispatch.
    pub fn metadata(&self) -> &DispatchMetadata {
        &self.metadata
    }

    /// The action currently running.
    pub fn action_name(&self) -> Option<&str> {
        self.metadata.action_name()
    }

    /// Lifecycle state.
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Hand control to another action of the same controller.
    ///
    /// The recorded action name is updated before the action runs; request,
    /// response and controller state carry over untouched.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::InvalidState`] when called outside a running
    ///   action, or after the response has been taken.
    /// - [`DispatchError::MethodNotFound`] when `action` isn't registered.
    pub fn forward(&mut self, action: &str, args: RouteArgs) -> ActionFuture<'_, C::Output> {
        let next = match self.begin_forward(action) {
            Ok(next) => next,
            Err(err) => return Box::pin(future::ready(Err(err))),
        };
        next(self, args)
    }

    fn begin_forward(&mut self, action: &str) -> Result<ActionFn<C>, DispatchError> {
        if !self.state.is_running() {
            return Err(DispatchError::invalid_state(format!(
                "cannot forward to `{action}` outside a dispatched action ({:?})",
                self.state
            )));
        }
        if self.response_mut().is_none() {
            return Err(DispatchError::invalid_state(format!(
                "cannot forward to `{action}` without a response"
            )));
        }

        let next = self
            .actions
            .get(action)
            .ok_or_else(|| DispatchError::method_not_found(C::type_name(), action))?;

        if let Some(recorder) = self.response_mut().and_then(|response| response.recorder()) {
            recorder.set_action_name(action);
        }
        self.metadata.set_action_name(action);
        self.state = DispatchState::Forwarded;

        #[cfg(feature = "tracing")]
        tracing::debug!(action = %action, "forwarding");

        Ok(next)
    }

    fn inject(&mut self, request: C::Request, response: C::Response) {
        match self.controller.request_receiver() {
            Some(receiver) => receiver.receive_request(request),
            None => self.request = Some(request),
        }
        match self.controller.response_receiver() {
            Some(receiver) => receiver.receive_response(response),
            None => self.response = Some(response),
        }
        self.state = DispatchState::ContextInjected;
    }

    fn initialize(&mut self) -> Result<(), DispatchError> {
        if let Some(hook) = self.controller.initializer() {
            hook.init()?;
        }
        self.state = DispatchState::Initialized;
        Ok(())
    }

    fn record(&mut self, metadata: DispatchMetadata) {
        if let Some(recorder) = self.response_mut().and_then(|response| response.recorder()) {
            metadata.record_on(recorder);
        }
        self.metadata = metadata;
    }
}

impl<C: Controller + fmt::Debug> fmt::Debug for Dispatch<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("controller", &self.controller)
            .field("metadata", &self.metadata)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// A router-facing handler for one action of one controller type.
///
/// Cheap to clone; all shared state sits behind `Arc`.
pub struct Handler<C: Controller> {
    app: Arc<C::App>,
    actions: Arc<ActionTable<C>>,
    identity: Arc<ControllerIdentity>,
    action: Arc<str>,
    resolved: Option<ActionFn<C>>,
}

impl<C: Controller> Clone for Handler<C> {
    fn clone(&self) -> Self {
        Self {
            app: Arc::clone(&self.app),
            actions: Arc::clone(&self.actions),
            identity: Arc::clone(&self.identity),
            action: Arc::clone(&self.action),
            resolved: self.resolved,
        }
    }
}

impl<C: Controller> fmt::Debug for Handler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("controller", &self.identity.type_name())
            .field("action", &self.action)
            .field("resolved", &self.resolved.is_some())
            .finish()
    }
}

impl<C: Controller> Handler<C> {
    /// The action this handler runs.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Whether the action was resolved when the handler was created.
    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Invoke the handler for one request.
    pub fn call(
        &self,
        request: C::Request,
        response: C::Response,
        args: RouteArgs,
    ) -> ActionFuture<'static, C::Output> {
        let handler = self.clone();
        let fut = async move { handler.invoke(request, response, args).await };

        #[cfg(feature = "tracing")]
        let fut = {
            use tracing::Instrument;
            let span = tracing::debug_span!(
                "dispatch",
                controller = %self.identity.short_name(),
                action = %self.action,
            );
            fut.instrument(span)
        };

        Box::pin(fut)
    }

    async fn invoke(
        &self,
        request: C::Request,
        response: C::Response,
        args: RouteArgs,
    ) -> Result<C::Output, DispatchError> {
        let mut dispatch = self.prepare(request, response)?;
        self.run(&mut dispatch, args).await
    }

    /// Steps 1 to 5: a fresh controller with context injected, initialized,
    /// and the metadata recorded.
    fn prepare(
        &self,
        request: C::Request,
        response: C::Response,
    ) -> Result<Dispatch<C>, DispatchError> {
        let controller = C::create(&self.app);
        let mut dispatch =
            Dispatch::detached(controller, Arc::clone(&self.app), Arc::clone(&self.actions));

        dispatch.inject(request, response);
        dispatch.initialize()?;
        dispatch.record(DispatchMetadata::new(
            self.identity.short_name(),
            self.identity.type_name(),
            &*self.action,
        ));
        Ok(dispatch)
    }

    /// Resolve and run the action. Leaves the context in
    /// [`DispatchState::Complete`] on success.
    async fn run(
        &self,
        dispatch: &mut Dispatch<C>,
        args: RouteArgs,
    ) -> Result<C::Output, DispatchError> {
        let action = match self.resolved {
            Some(action) => action,
            None => self.actions.get(&self.action).ok_or_else(|| {
                #[cfg(feature = "tracing")]
                tracing::warn!(action = %self.action, "action not found");
                DispatchError::method_not_found(self.identity.type_name(), &*self.action)
            })?,
        };

        dispatch.state = DispatchState::Dispatched;
        #[cfg(feature = "tracing")]
        tracing::debug!("running action");

        let output = action(dispatch, args).await?;
        dispatch.state = DispatchState::Complete;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            handled_by = ?dispatch.action_name(),
            state = ?dispatch.state(),
            "dispatch complete"
        );

        Ok(output)
    }
}

/// Produces handlers for the actions of controller type `C`.
///
/// Holds the application handle, the action table and the controller
/// identity, all computed once.
pub struct Dispatcher<C: Controller> {
    app: Arc<C::App>,
    actions: Arc<ActionTable<C>>,
    identity: Arc<ControllerIdentity>,
}

impl<C: Controller> Clone for Dispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            app: Arc::clone(&self.app),
            actions: Arc::clone(&self.actions),
            identity: Arc::clone(&self.identity),
        }
    }
}

impl<C: Controller> fmt::Debug for Dispatcher<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("identity", &self.identity)
            .field("actions", &self.actions)
            .finish_non_exhaustive()
    }
}

impl<C: Actions> Dispatcher<C> {
    /// Create a dispatcher using the controller's own action table.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::NamingConventionViolation`] when the controller
    ///   type name lacks the `Controller` suffix.
    /// - [`DispatchError::DuplicateAction`] when the table is inconsistent.
    pub fn new(app: Arc<C::App>) -> Result<Self, DispatchError> {
        let table = C::actions(ActionTable::builder()).build()?;
        Self::with_table(app, table)
    }
}

impl<C: Controller> Dispatcher<C> {
    /// Create a dispatcher from an explicit action table.
    pub fn with_table(app: Arc<C::App>, table: ActionTable<C>) -> Result<Self, DispatchError> {
        let identity = ControllerIdentity::of::<C>()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            controller = %identity.type_name(),
            actions = table.len(),
            "dispatcher ready"
        );

        Ok(Self {
            app,
            actions: Arc::new(table),
            identity: Arc::new(identity),
        })
    }

    /// Create a handler for `action`, resolving it now.
    ///
    /// # Errors
    ///
    /// [`DispatchError::MethodNotFound`] when the action isn't registered.
    pub fn handler(&self, action: &str) -> Result<Handler<C>, DispatchError> {
        let resolved = self.actions.get(action).ok_or_else(|| {
            #[cfg(feature = "tracing")]
            tracing::warn!(controller = %self.identity.type_name(), action = %action, "action not found");
            DispatchError::method_not_found(self.identity.type_name(), action)
        })?;
        Ok(self.build_handler(action, Some(resolved)))
    }

    /// Create a handler that resolves `action` on every call.
    ///
    /// Unknown actions surface as [`DispatchError::MethodNotFound`] from
    /// [`Handler::call`].
    pub fn handler_unchecked(&self, action: &str) -> Handler<C> {
        self.build_handler(action, None)
    }

    /// Dispatch a single request to `action`.
    pub fn dispatch(
        &self,
        action: &str,
        request: C::Request,
        response: C::Response,
        args: RouteArgs,
    ) -> ActionFuture<'static, C::Output> {
        self.handler_unchecked(action).call(request, response, args)
    }

    /// A context outside of any dispatch, with a fresh controller.
    pub fn detached(&self) -> Dispatch<C> {
        Dispatch::detached(
            C::create(&self.app),
            Arc::clone(&self.app),
            Arc::clone(&self.actions),
        )
    }

    /// The application handle.
    pub fn app(&self) -> &Arc<C::App> {
        &self.app
    }

    /// The action table.
    pub fn actions(&self) -> &ActionTable<C> {
        &self.actions
    }

    /// The controller identity.
    pub fn identity(&self) -> &ControllerIdentity {
        &self.identity
    }

    fn build_handler(&self, action: &str, resolved: Option<ActionFn<C>>) -> Handler<C> {
        Handler {
            app: Arc::clone(&self.app),
            actions: Arc::clone(&self.actions),
            identity: Arc::clone(&self.identity),
            action: Arc::from(action),
            resolved,
        }
    }
}
