//! Chain of Responsibility
//! Example: API Request Handler
//!
//! A [`HandlerChain`] offers a request to each handler in declared order. The
//! first handler that returns [`Step::Done`] decides the outcome and nothing
//! after it runs. If every handler forwards, the chain's default outcome
//! ([`Outcome::Unhandled`] unless configured) is returned.
//!
//! ```
//! use design_patterns::behavioral::chain::{
//!     CookieHandler, EndpointHandler, HandlerChain, MethodHandler, Request, RouteHandler,
//! };
//!
//! let chain = HandlerChain::new()
//!     .then(MethodHandler::new("GET"))
//!     .then(RouteHandler::new("/api/key"))
//!     .then(CookieHandler::new("KEY", "Pa$$w0rd"))
//!     .then(EndpointHandler::new("api-key", "200 OK"));
//!
//! let request = Request::new("GET", "/api/key").with_cookie("KEY", "Pa$$w0rd");
//! assert!(chain.dispatch(&request).is_accepted());
//! ```

mod handlers;
mod request;

pub use handlers::{
    AuthHandler, CookieHandler, EndpointHandler, FnHandler, MethodHandler, PayloadHandler,
    RateLimitHandler, RouteHandler,
};
pub use request::{Request, RequestError};

use std::fmt;
use tracing::debug;

/// The single result a chain produces for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted { handler: String, response: String },
    Rejected { handler: String, reason: String },
    Unhandled,
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected { .. })
    }

    /// Name of the handler that produced this outcome, if any did.
    pub fn handler(&self) -> Option<&str> {
        match self {
            Outcome::Accepted { handler, .. } | Outcome::Rejected { handler, .. } => Some(handler),
            Outcome::Unhandled => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Accepted { handler, response } => {
                write!(f, "accepted by {handler}: {response}")
            }
            Outcome::Rejected { handler, reason } => write!(f, "rejected by {handler}: {reason}"),
            Outcome::Unhandled => write!(f, "unhandled"),
        }
    }
}

/// What a single handler decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Not mine; pass it on.
    Forward,
    Done(Outcome),
}

impl Step {
    pub fn reject(handler: impl Into<String>, reason: impl Into<String>) -> Self {
        Step::Done(Outcome::Rejected {
            handler: handler.into(),
            reason: reason.into(),
        })
    }

    pub fn accept(handler: impl Into<String>, response: impl Into<String>) -> Self {
        Step::Done(Outcome::Accepted {
            handler: handler.into(),
            response: response.into(),
        })
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Step::Forward)
    }
}

pub trait RequestHandler {
    fn name(&self) -> &str;
    fn handle(&self, request: &Request) -> Step;
}

pub struct HandlerChain {
    handlers: Vec<Box<dyn RequestHandler>>,
    default: Outcome,
}

impl Default for HandlerChain {
    fn default() -> Self {
        HandlerChain {
            handlers: Vec::new(),
            default: Outcome::Unhandled,
        }
    }
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler after all existing ones.
    pub fn then<H: RequestHandler + 'static>(self, handler: H) -> Self {
        self.then_boxed(Box::new(handler))
    }

    pub fn then_boxed(mut self, handler: Box<dyn RequestHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn with_default(mut self, outcome: Outcome) -> Self {
        self.default = outcome;
        self
    }

    pub fn dispatch(&self, request: &Request) -> Outcome {
        for handler in &self.handlers {
            match handler.handle(request) {
                Step::Forward => {
                    debug!(handler = handler.name(), path = request.path(), "forwarded");
                }
                Step::Done(outcome) => {
                    debug!(handler = handler.name(), %outcome, "handled");
                    return outcome;
                }
            }
        }
        debug!(path = request.path(), "no handler took the request");
        self.default.clone()
    }

    /// Parse `raw` and dispatch it.
    pub fn dispatch_raw(&self, raw: &str) -> Result<Outcome, RequestError> {
        Ok(self.dispatch(&Request::parse(raw)?))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }
}
