//! Minimal HTTP request and response types.
//!
//! These stand in for whatever the host framework provides. They carry just
//! enough for the controller conveniences in [`ContextCarrier`](crate::ContextCarrier):
//! query and body parameters, headers, cookies, redirects, and the dispatch
//! metadata recorded on the response.

use std::collections::BTreeMap;
use switchyard_core::{DispatchMetadata, DispatchRecorder, DispatchResponse};

/// An incoming request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    method: String,
    path: String,
    query: BTreeMap<String, String>,
    body: BTreeMap<String, String>,
    headers: Vec<(String, String)>,
    cookies: BTreeMap<String, String>,
}

impl Request {
    /// Body field used by HTML forms to override the HTTP method.
    pub const METHOD_OVERRIDE: &'static str = "_METHOD";

    /// Create a request for `method` and `path`.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Add a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Add a body parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.body.insert(name.into(), value.into());
        self
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a cookie.
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All query parameters.
    pub fn query_params(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// A query parameter.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// All body parameters.
    pub fn body_params(&self) -> &BTreeMap<String, String> {
        &self.body
    }

    /// Query and body parameters merged; body values win.
    pub fn params(&self) -> BTreeMap<String, String> {
        let mut params = self.query.clone();
        params.extend(self.body.iter().map(|(k, v)| (k.clone(), v.clone())));
        params
    }

    /// A header (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether the request was made through XMLHttpRequest.
    pub fn is_xhr(&self) -> bool {
        self.header("X-Requested-With") == Some("XMLHttpRequest")
    }

    /// A cookie, or `default` when the request doesn't carry it.
    pub fn cookie(&self, name: &str, default: Option<&str>) -> Option<String> {
        self.cookies
            .get(name)
            .map(String::as_str)
            .or(default)
            .map(str::to_owned)
    }

    /// All cookies.
    pub fn cookies(&self) -> &BTreeMap<String, String> {
        &self.cookies
    }
}

/// An outgoing response.
///
/// Records which controller and action produced it, so tests can assert on
/// routing without inspecting the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
    dispatch: DispatchMetadata,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    /// `200 OK`.
    pub const OK: u16 = 200;
    /// `302 Found`, the default redirect status.
    pub const FOUND: u16 = 302;

    /// An empty `200 OK` response.
    pub fn new() -> Self {
        Self {
            status: Self::OK,
            headers: Vec::new(),
            body: String::new(),
            dispatch: DispatchMetadata::default(),
        }
    }

    /// Set the status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Set a header, replacing any existing value.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Replace the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// A redirect to `url` with the given status.
    pub fn with_redirect(self, url: impl Into<String>, status: u16) -> Self {
        self.with_status(status).with_header("Location", url)
    }

    /// Set a header in place, replacing any existing value.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
    }

    /// Append to the body.
    pub fn write(&mut self, chunk: &str) {
        self.body.push_str(chunk);
    }

    /// The status.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// A header (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Everything recorded about the dispatch that produced this response.
    pub fn dispatch(&self) -> &DispatchMetadata {
        &self.dispatch
    }

    /// The controller short name, e.g. `articles`.
    pub fn controller_name(&self) -> Option<&str> {
        self.dispatch.controller_name()
    }

    /// The fully-qualified controller type name.
    pub fn controller_class(&self) -> Option<&str> {
        self.dispatch.controller_class()
    }

    /// The action that produced the response.
    pub fn action_name(&self) -> Option<&str> {
        self.dispatch.action_name()
    }
}

impl DispatchRecorder for Response {
    fn set_controller_name(&mut self, name: &str) {
        self.dispatch.set_controller_name(name);
    }

    fn set_controller_class(&mut self, class: &str) {
        self.dispatch.set_controller_class(class);
    }

    fn set_action_name(&mut self, action: &str) {
        self.dispatch.set_action_name(action);
    }
}

impl DispatchResponse for Response {
    fn recorder(&mut self) -> Option<&mut dyn DispatchRecorder> {
        Some(self)
    }
}
