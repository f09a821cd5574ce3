#![allow(dead_code)]

use futures::future;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use switchyard::app::{Application, Container, ViewVars};
use switchyard::http::{Request, Response};
use switchyard::testing::{CallLog, RecordingRenderer};
use switchyard::{
    ActionFuture, ActionTableBuilder, Actions, ContextCarrier, Controller, Dispatch,
    DispatchError, Initialize, ReceiveRequest, ReceiveResponse, RouteArgs,
};

pub const LOG: &str = "log";
pub const CREATED: &str = "created";

// ============================================================================
// Application
// ============================================================================

pub struct Fixture {
    pub app: Arc<Application>,
    pub log: CallLog,
    pub renderer: RecordingRenderer,
}

impl Fixture {
    pub fn new() -> Self {
        let log = CallLog::new();
        let renderer = RecordingRenderer::new();
        let container = Container::new()
            .with(LOG, log.clone())
            .with(CREATED, AtomicUsize::new(0));
        let app = Application::new()
            .with_container(container)
            .with_renderer(renderer.clone());

        Self {
            app: Arc::new(app),
            log,
            renderer,
        }
    }

    pub fn created(&self) -> usize {
        self.app
            .get::<AtomicUsize>(CREATED)
            .map(|count| count.load(Ordering::SeqCst))
            .unwrap_or(0)
    }
}

pub fn request(path: &str) -> Request {
    Request::new("GET", path)
}

// ============================================================================
// Full-capability controller
// ============================================================================

/// Exposes every capability: request and response injection plus an init
/// hook that writes what it saw to the shared log.
pub struct ArticlesController {
    pub carrier: ContextCarrier<Request, Response>,
    pub serial: usize,
    log: Option<Arc<CallLog>>,
}

impl Controller for ArticlesController {
    type App = Application;
    type Request = Request;
    type Response = Response;
    type Output = Response;

    fn create(app: &Arc<Application>) -> Self {
        let serial = app
            .get::<AtomicUsize>(CREATED)
            .map(|count| count.fetch_add(1, Ordering::SeqCst) + 1)
            .unwrap_or(0);

        Self {
            carrier: ContextCarrier::new(),
            serial,
            log: app.get::<CallLog>(LOG).ok(),
        }
    }

    fn request_receiver(&mut self) -> Option<&mut dyn ReceiveRequest<Request>> {
        Some(&mut self.carrier)
    }

    fn response_receiver(&mut self) -> Option<&mut dyn ReceiveResponse<Response>> {
        Some(&mut self.carrier)
    }

    fn initializer(&mut self) -> Option<&mut dyn Initialize> {
        Some(self)
    }
}

impl Initialize for ArticlesController {
    fn init(&mut self) -> Result<(), DispatchError> {
        let path = self
            .carrier
            .request()
            .map(|request| request.path().to_owned())
            .unwrap_or_default();
        let has_response = self.carrier.response().is_some();

        if let Some(log) = &self.log {
            log.push(format!("init {path} response={has_response}"));
        }
        Ok(())
    }
}

/// Take the response and append `body` to it.
pub fn respond(cx: &mut Dispatch<ArticlesController>, body: &str) -> Result<Response, DispatchError> {
    let mut response = cx
        .take_response()
        .ok_or_else(|| DispatchError::invalid_state("response already taken"))?;
    response.write(body);
    Ok(response)
}

fn index(cx: &mut Dispatch<ArticlesController>, _args: RouteArgs) -> ActionFuture<'_, Response> {
    Box::pin(future::ready(respond(cx, "index")))
}

fn show(cx: &mut Dispatch<ArticlesController>, args: RouteArgs) -> ActionFuture<'_, Response> {
    let result = args
        .arg::<i64>(0)
        .and_then(|id| respond(cx, &format!("show {id}")));
    Box::pin(future::ready(result))
}

fn serial(cx: &mut Dispatch<ArticlesController>, _args: RouteArgs) -> ActionFuture<'_, Response> {
    let serial = cx.controller().serial;
    Box::pin(future::ready(respond(cx, &serial.to_string())))
}

fn a(cx: &mut Dispatch<ArticlesController>, args: RouteArgs) -> ActionFuture<'_, Response> {
    cx.forward("b", args)
}

fn b(cx: &mut Dispatch<ArticlesController>, _args: RouteArgs) -> ActionFuture<'_, Response> {
    Box::pin(future::ready(respond(cx, "from b")))
}

fn start(cx: &mut Dispatch<ArticlesController>, args: RouteArgs) -> ActionFuture<'_, Response> {
    cx.forward("middle", args)
}

fn middle(cx: &mut Dispatch<ArticlesController>, args: RouteArgs) -> ActionFuture<'_, Response> {
    if let Some(response) = cx.response_mut() {
        response.write("middle,");
    }
    cx.forward("end", args)
}

fn end(cx: &mut Dispatch<ArticlesController>, _args: RouteArgs) -> ActionFuture<'_, Response> {
    Box::pin(future::ready(respond(cx, "end")))
}

fn checkout(cx: &mut Dispatch<ArticlesController>, args: RouteArgs) -> ActionFuture<'_, Response> {
    let _ = cx.take_response();
    cx.forward("b", args)
}

fn lost(cx: &mut Dispatch<ArticlesController>, args: RouteArgs) -> ActionFuture<'_, Response> {
    cx.forward("nope", args)
}

fn login(cx: &mut Dispatch<ArticlesController>, _args: RouteArgs) -> ActionFuture<'_, Response> {
    Box::pin(future::ready(cx.controller().carrier.redirect("/login")))
}

fn render(cx: &mut Dispatch<ArticlesController>, args: RouteArgs) -> ActionFuture<'_, Response> {
    let result = args.arg::<String>(0).and_then(|title| {
        let mut vars = ViewVars::new();
        vars.insert("title".to_owned(), title);
        let response = respond(cx, "")?;
        cx.app().render(response, "articles/show", &vars)
    });
    Box::pin(future::ready(result))
}

impl Actions for ArticlesController {
    fn actions(table: ActionTableBuilder<Self>) -> ActionTableBuilder<Self> {
        table
            .action("index", index)
            .action("show", show)
            .action("serial", serial)
            .action("a", a)
            .action("b", b)
            .action("start", start)
            .action("middle", middle)
            .action("end", end)
            .action("checkout", checkout)
            .action("lost", lost)
            .action("login", login)
            .action("render", render)
    }
}
