//! Concrete links for a [`HandlerChain`](super::HandlerChain).
//!
//! Validators (method, route, cookie, auth, rate limit, payload) consume a
//! request only to reject it and forward everything that passes. Terminal
//! handlers ([`EndpointHandler`], [`FnHandler`]) decide for themselves.

use super::request::Request;
use super::{Outcome, RequestHandler, Step};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

// =============================================================================
// Matchers
// =============================================================================

pub struct MethodHandler {
    method: String,
}

impl MethodHandler {
    pub fn new(method: impl Into<String>) -> Self {
        MethodHandler {
            method: method.into().to_ascii_uppercase(),
        }
    }
}

impl RequestHandler for MethodHandler {
    fn name(&self) -> &str {
        "method"
    }

    fn handle(&self, request: &Request) -> Step {
        if request.method() == self.method {
            Step::Forward
        } else {
            Step::reject(
                self.name(),
                format!("expected method {}, got {}", self.method, request.method()),
            )
        }
    }
}

pub struct RouteHandler {
    route: String,
}

impl RouteHandler {
    pub fn new(route: impl Into<String>) -> Self {
        RouteHandler { route: route.into() }
    }
}

impl RequestHandler for RouteHandler {
    fn name(&self) -> &str {
        "route"
    }

    fn handle(&self, request: &Request) -> Step {
        if request.path() == self.route {
            Step::Forward
        } else {
            Step::reject(self.name(), format!("no route for {}", request.path()))
        }
    }
}

/// Requires cookie `key` to carry exactly `expected`, e.g. an API key.
pub struct CookieHandler {
    key: String,
    expected: String,
}

impl CookieHandler {
    pub fn new(key: impl Into<String>, expected: impl Into<String>) -> Self {
        CookieHandler {
            key: key.into(),
            expected: expected.into(),
        }
    }
}

impl RequestHandler for CookieHandler {
    fn name(&self) -> &str {
        "cookie"
    }

    fn handle(&self, request: &Request) -> Step {
        match request.cookie(&self.key) {
            Some(value) if value == self.expected => Step::Forward,
            Some(_) => Step::reject(self.name(), format!("cookie '{}' does not match", self.key)),
            None => Step::reject(self.name(), format!("cookie '{}' is missing", self.key)),
        }
    }
}

// =============================================================================
// Validators
// =============================================================================

/// Accepts `Authorization: Bearer <token>` for any of the known tokens.
pub struct AuthHandler {
    tokens: HashSet<String>,
}

impl AuthHandler {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AuthHandler {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

impl RequestHandler for AuthHandler {
    fn name(&self) -> &str {
        "auth"
    }

    fn handle(&self, request: &Request) -> Step {
        let Some(header) = request.header("authorization") else {
            return Step::reject(self.name(), "missing credentials");
        };
        match header.strip_prefix("Bearer ").map(str::trim) {
            Some(token) if self.tokens.contains(token) => Step::Forward,
            Some(_) => Step::reject(self.name(), "invalid token"),
            None => Step::reject(self.name(), "unsupported authorization scheme"),
        }
    }
}

/// Allows each client at most `limit` requests for the lifetime of the
/// handler. Clients are told apart by `x-client-id`, then `host`.
pub struct RateLimitHandler {
    limit: u32,
    seen: RefCell<HashMap<String, u32>>,
}

impl RateLimitHandler {
    pub fn new(limit: u32) -> Self {
        RateLimitHandler {
            limit,
            seen: RefCell::new(HashMap::new()),
        }
    }

    pub fn client_of(request: &Request) -> &str {
        request
            .header("x-client-id")
            .or_else(|| request.header("host"))
            .unwrap_or("anonymous")
    }

    /// Requests counted so far for `client`, rejected ones included.
    pub fn count(&self, client: &str) -> u32 {
        self.seen.borrow().get(client).copied().unwrap_or(0)
    }

    pub fn reset(&self) {
        self.seen.borrow_mut().clear();
    }
}

impl RequestHandler for RateLimitHandler {
    fn name(&self) -> &str {
        "rate-limit"
    }

    fn handle(&self, request: &Request) -> Step {
        let client = Self::client_of(request);
        let mut seen = self.seen.borrow_mut();
        let count = seen.entry(client.to_string()).or_insert(0);
        *count += 1;

        if *count > self.limit {
            Step::reject(
                self.name(),
                format!("client '{client}' exceeded {} requests", self.limit),
            )
        } else {
            Step::Forward
        }
    }
}

/// Requires a JSON object body containing every required field.
pub struct PayloadHandler {
    required: Vec<String>,
}

impl PayloadHandler {
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PayloadHandler {
            required: required.into_iter().map(Into::into).collect(),
        }
    }
}

impl RequestHandler for PayloadHandler {
    fn name(&self) -> &str {
        "payload"
    }

    fn handle(&self, request: &Request) -> Step {
        if request.body().is_empty() {
            return if self.required.is_empty() {
                Step::Forward
            } else {
                Step::reject(self.name(), "missing payload")
            };
        }

        let object = match serde_json::from_str::<Value>(request.body()) {
            Ok(Value::Object(object)) => object,
            Ok(_) => return Step::reject(self.name(), "payload must be a JSON object"),
            Err(e) => return Step::reject(self.name(), format!("invalid JSON: {e}")),
        };

        let missing: Vec<&str> = self
            .required
            .iter()
            .filter(|field| !object.contains_key(field.as_str()))
            .map(String::as_str)
            .collect();
        if missing.is_empty() {
            Step::Forward
        } else {
            Step::reject(
                self.name(),
                format!("missing fields: {}", missing.join(", ")),
            )
        }
    }
}

// =============================================================================
// Terminal handlers
// =============================================================================

/// Accepts whatever reaches it.
pub struct EndpointHandler {
    name: String,
    response: String,
}

impl EndpointHandler {
    pub fn new(name: impl Into<String>, response: impl Into<String>) -> Self {
        EndpointHandler {
            name: name.into(),
            response: response.into(),
        }
    }
}

impl RequestHandler for EndpointHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&self, _request: &Request) -> Step {
        Step::Done(Outcome::Accepted {
            handler: self.name.clone(),
            response: self.response.clone(),
        })
    }
}

/// Wraps a closure so ad-hoc rules can join a chain.
pub struct FnHandler<F> {
    name: String,
    f: F,
}

impl<F> FnHandler<F>
where
    F: Fn(&Request) -> Step,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        FnHandler { name: name.into(), f }
    }
}

impl<F> RequestHandler for FnHandler<F>
where
    F: Fn(&Request) -> Step,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&self, request: &Request) -> Step {
        (self.f)(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_by(step: Step) -> Option<String> {
        match step {
            Step::Done(Outcome::Rejected { handler, .. }) => Some(handler),
            _ => None,
        }
    }

    #[test]
    fn test_method_and_route() {
        let get = Request::new("GET", "/api/key");
        assert!(MethodHandler::new("get").handle(&get).is_forward());
        assert_eq!(
            rejected_by(MethodHandler::new("POST").handle(&get)).as_deref(),
            Some("method")
        );
        assert!(RouteHandler::new("/api/key").handle(&get).is_forward());
        assert!(!RouteHandler::new("/api/nope").handle(&get).is_forward());
    }

    #[test]
    fn test_cookie_handler() {
        let handler = CookieHandler::new("KEY", "Pa$$w0rd");
        let good = Request::new("GET", "/").with_cookie("KEY", "Pa$$w0rd");
        let bad = Request::new("GET", "/").with_cookie("KEY", "wrong");

        assert!(handler.handle(&good).is_forward());
        assert!(!handler.handle(&bad).is_forward());
        assert!(!handler.handle(&Request::new("GET", "/")).is_forward());
    }

    #[test]
    fn test_auth_reasons() {
        let auth = AuthHandler::new(["t0ken"]);
        let reason = |request: &Request| match auth.handle(request) {
            Step::Done(Outcome::Rejected { reason, .. }) => reason,
            other => panic!("expected rejection, got {other:?}"),
        };

        assert_eq!(reason(&Request::new("GET", "/")), "missing credentials");
        assert_eq!(
            reason(&Request::new("GET", "/").with_header("Authorization", "Bearer nope")),
            "invalid token"
        );
        assert_eq!(
            reason(&Request::new("GET", "/").with_header("Authorization", "Basic abc")),
            "unsupported authorization scheme"
        );
        assert!(auth
            .handle(&Request::new("GET", "/").with_header("Authorization", "Bearer t0ken"))
            .is_forward());
    }

    #[test]
    fn test_rate_limit_per_client() {
        let limiter = RateLimitHandler::new(2);
        let alice = Request::new("GET", "/").with_header("X-Client-Id", "alice");
        let bob = Request::new("GET", "/").with_header("Host", "bob.local");

        assert!(limiter.handle(&alice).is_forward());
        assert!(limiter.handle(&alice).is_forward());
        assert!(!limiter.handle(&alice).is_forward());
        assert!(limiter.handle(&bob).is_forward());
        assert_eq!(limiter.count("alice"), 3);
        assert_eq!(limiter.count("bob.local"), 1);

        limiter.reset();
        assert!(limiter.handle(&alice).is_forward());
    }

    #[test]
    fn test_payload_shapes() {
        let handler = PayloadHandler::new(["name", "qty"]);
        let with = |body: &str| Request::new("POST", "/items").with_body(body);

        assert!(handler.handle(&with(r#"{"name": "bolt", "qty": 3}"#)).is_forward());
        assert!(!handler.handle(&with(r#"{"name": "bolt"}"#)).is_forward());
        assert!(!handler.handle(&with("[1, 2]")).is_forward());
        assert!(!handler.handle(&with("{oops")).is_forward());
        assert!(!handler.handle(&with("")).is_forward());
        assert!(PayloadHandler::new(Vec::<String>::new())
            .handle(&with(""))
            .is_forward());
    }

    #[test]
    fn test_endpoint_and_fn_handler() {
        let request = Request::new("GET", "/");
        assert_eq!(
            EndpointHandler::new("ok", "200 OK").handle(&request),
            Step::Done(Outcome::Accepted {
                handler: "ok".into(),
                response: "200 OK".into()
            })
        );

        let only_root = FnHandler::new("root-only", |r: &Request| {
            if r.path() == "/" {
                Step::Forward
            } else {
                Step::reject("root-only", "not root")
            }
        });
        assert!(only_root.handle(&request).is_forward());
        assert_eq!(only_root.name(), "root-only");
    }
}
