use design_patterns::behavioral::chain::{
    AuthHandler, CookieHandler, EndpointHandler, HandlerChain, MethodHandler, Outcome,
    PayloadHandler, RateLimitHandler, Request, RequestError, RouteHandler,
};

fn request(method: &str, route: &str, key: &str) -> String {
    format!(
        "{method} {route} HTTP/1.1
Host: localhost:8080
Connection: keep-alive
Upgrade-Insecure-Requests: 1
User-Agent: Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)
cookie: KEY={key};
    "
    )
}

fn api_key_chain() -> HandlerChain {
    HandlerChain::new()
        .then(MethodHandler::new("GET"))
        .then(RouteHandler::new("/api/key"))
        .then(CookieHandler::new("KEY", "Pa$$w0rd"))
        .then(EndpointHandler::new("api-key", "200 OK"))
}

#[test]
fn test_only_the_exact_request_gets_through() {
    let chain = api_key_chain();
    let cases = [
        (request("GET", "/api/key", "Pa$$w0rd"), None),
        (request("POST", "/api/key", "Pa$$w0rd"), Some("method")),
        (request("GET", "/api/nope", "Pa$$w0rd"), Some("route")),
        (request("GET", "/api/key", "wrong"), Some("cookie")),
    ];

    for (raw, rejected_by) in cases {
        let outcome = chain.dispatch_raw(&raw).unwrap();
        match rejected_by {
            None => assert_eq!(
                outcome,
                Outcome::Accepted {
                    handler: "api-key".into(),
                    response: "200 OK".into()
                }
            ),
            Some(handler) => {
                assert!(outcome.is_rejected(), "{raw} should be rejected");
                assert_eq!(outcome.handler(), Some(handler));
            }
        }
    }
}

#[test]
fn test_malformed_raw_request_is_an_error() {
    let err = api_key_chain().dispatch_raw("hello there").unwrap_err();
    assert!(matches!(err, RequestError::MalformedRequestLine { .. }));
}

#[test]
fn test_every_request_gets_exactly_one_outcome() {
    let chain = HandlerChain::new()
        .then(AuthHandler::new(["t1"]))
        .then(RateLimitHandler::new(1))
        .then(PayloadHandler::new(["name"]));

    let authed = |client: &str| {
        Request::new("POST", "/items")
            .with_header("Authorization", "Bearer t1")
            .with_header("X-Client-Id", client)
    };

    // Validators only reject; a request passing all of them is unhandled.
    assert_eq!(
        chain.dispatch(&authed("a").with_body(r#"{"name": "n"}"#)),
        Outcome::Unhandled
    );
    assert_eq!(
        chain.dispatch(&authed("a").with_body(r#"{"name": "n"}"#)).handler(),
        Some("rate-limit")
    );
    assert_eq!(
        chain.dispatch(&authed("b").with_body("{}")).handler(),
        Some("payload")
    );
    assert_eq!(
        chain
            .dispatch(&Request::new("POST", "/items").with_header("Authorization", "Bearer t2"))
            .handler(),
        Some("auth")
    );
}
