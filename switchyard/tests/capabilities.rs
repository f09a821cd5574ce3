//! Controllers and responses that expose none of the optional capabilities.

use futures::future;
use std::sync::Arc;
use switchyard::testing::{PlainResponse, StatelessController};
use switchyard::{
    ActionFuture, ActionTable, Controller, Dispatch, DispatchError, DispatchResponse, Dispatcher,
    RouteArgs, route_args,
};

/// Keeps nothing itself; the dispatch context holds request and response.
struct PlainController;

impl Controller for PlainController {
    type App = ();
    type Request = String;
    type Response = PlainResponse;
    type Output = PlainResponse;

    fn create(_app: &Arc<()>) -> Self {
        PlainController
    }
}

fn greet(cx: &mut Dispatch<PlainController>, args: RouteArgs) -> ActionFuture<'_, PlainResponse> {
    let result = args.arg::<String>(0).and_then(|name| {
        let greeting = cx.request().cloned().unwrap_or_default();
        let mut response = cx
            .take_response()
            .ok_or_else(|| DispatchError::invalid_state("response already taken"))?;
        response.body = format!("{greeting}, {name}");
        Ok(response)
    });
    Box::pin(future::ready(result))
}

fn forward_to_greet(cx: &mut Dispatch<PlainController>, args: RouteArgs) -> ActionFuture<'_, PlainResponse> {
    cx.forward("greet", args)
}

fn plain() -> Dispatcher<PlainController> {
    let table = ActionTable::<PlainController>::builder()
        .action("greet", greet)
        .action("hop", forward_to_greet)
        .build()
        .unwrap();
    Dispatcher::with_table(Arc::new(()), table).unwrap()
}

#[tokio::test]
async fn test_plain_controller_returns_action_result_unchanged() {
    let handler = plain().handler("greet").unwrap();
    let mut response = handler
        .call("Hello".to_owned(), PlainResponse::new(), route_args!["world"])
        .await
        .unwrap();

    assert_eq!(response.body, "Hello, world");
    assert!(response.recorder().is_none());
}

#[tokio::test]
async fn test_forward_without_recorder() {
    let response = plain()
        .dispatch("hop", "Hi".to_owned(), PlainResponse::new(), route_args!["there"])
        .await
        .unwrap();

    assert_eq!(response.body, "Hi, there");
}

#[tokio::test]
async fn test_unit_request_and_response() {
    fn echo(_cx: &mut Dispatch<StatelessController>, args: RouteArgs) -> ActionFuture<'_, String> {
        let values: Vec<String> = args.iter().map(ToString::to_string).collect();
        Box::pin(future::ready(Ok(values.join("|"))))
    }

    let table = ActionTable::<StatelessController>::builder()
        .action("echo", echo)
        .build()
        .unwrap();
    let dispatcher = Dispatcher::with_table(Arc::new(()), table).unwrap();

    let out = dispatcher
        .dispatch("echo", (), (), route_args![5, "x", true])
        .await
        .unwrap();
    assert_eq!(out, "5|x|true");
}
