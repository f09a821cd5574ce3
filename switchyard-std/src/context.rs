//! # Context Carrier
//!
//! Holds the current request and response on a controller. Controllers embed
//! a [`ContextCarrier`] and point both injection probes at it:
//!
//! ```rust,ignore
//! struct ArticlesController {
//!     carrier: ContextCarrier<Request, Response>,
//! }
//!
//! impl Controller for ArticlesController {
//!     // ...
//!     fn request_receiver(&mut self) -> Option<&mut dyn ReceiveRequest<Request>> {
//!         Some(&mut self.carrier)
//!     }
//!
//!     fn response_receiver(&mut self) -> Option<&mut dyn ReceiveResponse<Response>> {
//!         Some(&mut self.carrier)
//!     }
//! }
//! ```
//!
//! With the standard [`Request`]/[`Response`] types the carrier also offers
//! the usual controller conveniences: XHR detection, body and query
//! parameters, cookies and redirects.

use crate::http::{Request, Response};
use std::collections::BTreeMap;
use switchyard_core::{DispatchError, ReceiveRequest, ReceiveResponse};

/// Request and response handles of the current invocation.
#[derive(Debug, Clone)]
pub struct ContextCarrier<Req, Res> {
    request: Option<Req>,
    response: Option<Res>,
}

impl<Req, Res> Default for ContextCarrier<Req, Res> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Res> ContextCarrier<Req, Res> {
    /// Create an empty carrier.
    pub const fn new() -> Self {
        Self {
            request: None,
            response: None,
        }
    }

    /// Set the current request.
    pub fn set_request(&mut self, request: Req) -> &mut Self {
        self.request = Some(request);
        self
    }

    /// Set the current response.
    pub fn set_response(&mut self, response: Res) -> &mut Self {
        self.response = Some(response);
        self
    }

    /// The current request.
    pub fn request(&self) -> Option<&Req> {
        self.request.as_ref()
    }

    /// The current response.
    pub fn response(&self) -> Option<&Res> {
        self.response.as_ref()
    }

    /// The current response, mutably.
    pub fn response_mut(&mut self) -> Option<&mut Res> {
        self.response.as_mut()
    }

    /// Remove and return the current response.
    pub fn take_response(&mut self) -> Option<Res> {
        self.response.take()
    }

    /// Clear both handles.
    pub fn clear(&mut self) {
        self.request = None;
        self.response = None;
    }
}

impl<Req, Res> ReceiveRequest<Req> for ContextCarrier<Req, Res> {
    fn receive_request(&mut self, request: Req) {
        self.set_request(request);
    }
}

impl<Req, Res> ReceiveResponse<Res> for ContextCarrier<Req, Res> {
    fn receive_response(&mut self, response: Res) {
        self.set_response(response);
    }

    fn current_response(&mut self) -> Option<&mut Res> {
        self.response.as_mut()
    }

    fn take_response(&mut self) -> Option<Res> {
        self.response.take()
    }
}

impl ContextCarrier<Request, Response> {
    fn require_request(&self) -> Result<&Request, DispatchError> {
        self.request
            .as_ref()
            .ok_or_else(|| DispatchError::invalid_state("no request has been set"))
    }

    fn require_response(&self) -> Result<&Response, DispatchError> {
        self.response
            .as_ref()
            .ok_or_else(|| DispatchError::invalid_state("no response has been set"))
    }

    /// Whether the current request was made through XMLHttpRequest.
    pub fn is_xhr(&self) -> Result<bool, DispatchError> {
        Ok(self.require_request()?.is_xhr())
    }

    /// Query and body parameters, without the `_METHOD` override field.
    pub fn post(&self) -> Result<BTreeMap<String, String>, DispatchError> {
        let mut params = self.require_request()?.params();
        params.remove(Request::METHOD_OVERRIDE);
        Ok(params)
    }

    /// A single query parameter, or `default` when absent.
    pub fn query_param(
        &self,
        name: &str,
        default: Option<&str>,
    ) -> Result<Option<String>, DispatchError> {
        Ok(self
            .require_request()?
            .query_param(name)
            .or(default)
            .map(str::to_owned))
    }

    /// All query parameters.
    pub fn query_params(&self) -> Result<&BTreeMap<String, String>, DispatchError> {
        Ok(self.require_request()?.query_params())
    }

    /// A cookie, or `default` when absent.
    pub fn cookie(&self, name: &str, default: Option<&str>) -> Result<Option<String>, DispatchError> {
        Ok(self.require_request()?.cookie(name, default))
    }

    /// A `302 Found` redirect built from the current response.
    pub fn redirect(&self, url: &str) -> Result<Response, DispatchError> {
        self.redirect_with_status(url, Response::FOUND)
    }

    /// A redirect with an explicit status, built from the current response.
    pub fn redirect_with_status(&self, url: &str, status: u16) -> Result<Response, DispatchError> {
        Ok(self.require_response()?.clone().with_redirect(url, status))
    }
}
