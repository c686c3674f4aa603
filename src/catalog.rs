//! The list of runnable examples and their console demonstrations.
//!
//! Demos only read the shared [`CatalogConfig`]; no example feeds another.

use anyhow::{Context, Result};
use colored::Colorize;
use itertools::Itertools;
use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::rc::Rc;
use thiserror::Error;
use tracing::{info, warn};

use crate::behavioral::chain::{
    AuthHandler, CookieHandler, EndpointHandler, HandlerChain, MethodHandler, PayloadHandler,
    RateLimitHandler, Request, RouteHandler,
};
use crate::behavioral::iterator::Tree;
use crate::behavioral::observer::{Draggable, MouseEvent, MouseEventManager};
use crate::config::{CatalogConfig, ChainConfig};
use crate::creational::builder::{Color, GraphicsBuilder, GraphicsDirector, Point};
use crate::creational::factory::{self, LinuxFactory, Platform, TerminalFactory};
use crate::creational::singleton::{LoggerError, LoggerHandle};
use crate::structural::decorator::{Base64, DataSource, FileSource, Rot13};
use crate::structural::monad::Maybe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Creational,
    Structural,
    Behavioral,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Creational => "creational",
            Category::Structural => "structural",
            Category::Behavioral => "behavioral",
        };
        f.write_str(name)
    }
}

pub type DemoFn = fn(&mut dyn Write, &CatalogConfig) -> Result<()>;

pub struct Example {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub category: Category,
    pub summary: &'static str,
    pub run: DemoFn,
}

impl Example {
    fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

impl fmt::Debug for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Example")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish()
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Unknown example '{name}' (known: {known})")]
    UnknownExample { name: String, known: String },
}

static EXAMPLES: &[Example] = &[
    Example {
        name: "factory",
        aliases: &["factory-method"],
        category: Category::Creational,
        summary: "Cross-platform terminal commands from one description",
        run: demo_factory,
    },
    Example {
        name: "builder",
        aliases: &[],
        category: Category::Creational,
        summary: "Line-drawing API with a shape director",
        run: demo_builder,
    },
    Example {
        name: "singleton",
        aliases: &[],
        category: Category::Creational,
        summary: "One process-wide file logger",
        run: demo_singleton,
    },
    Example {
        name: "monad",
        aliases: &["maybe", "optional"],
        category: Category::Structural,
        summary: "An optional value with map and and_then",
        run: demo_monad,
    },
    Example {
        name: "decorator",
        aliases: &[],
        category: Category::Structural,
        summary: "rot13 and base64 codecs stacked over a file",
        run: demo_decorator,
    },
    Example {
        name: "chain",
        aliases: &["cor", "chain-of-responsibility"],
        category: Category::Behavioral,
        summary: "API request handler chain",
        run: demo_chain,
    },
    Example {
        name: "iterator",
        aliases: &[],
        category: Category::Behavioral,
        summary: "Iterative in-order tree traversal",
        run: demo_iterator,
    },
    Example {
        name: "observer",
        aliases: &[],
        category: Category::Behavioral,
        summary: "Drag and drop via mouse event listeners",
        run: demo_observer,
    },
];

pub fn catalog() -> &'static [Example] {
    EXAMPLES
}

pub fn find(name: &str) -> Result<&'static Example, CatalogError> {
    EXAMPLES
        .iter()
        .find(|e| e.answers_to(name))
        .ok_or_else(|| CatalogError::UnknownExample {
            name: name.to_string(),
            known: EXAMPLES.iter().map(|e| e.name).join(", "),
        })
}

/// Examples grouped under their category, in catalog order.
pub fn render_listing() -> String {
    let mut out = String::new();
    for (category, examples) in &EXAMPLES.iter().chunk_by(|e| e.category) {
        out.push_str(&format!("{category}\n"));
        for example in examples {
            out.push_str(&format!("  {:<10} {}\n", example.name, example.summary));
        }
    }
    out
}

pub fn run(example: &Example, out: &mut dyn Write, config: &CatalogConfig) -> Result<()> {
    info!(example = example.name, "running demo");
    writeln!(out, "{}", format!("=== {} ({}) ===", example.name, example.category).bold())?;
    (example.run)(out, config).with_context(|| format!("demo '{}' failed", example.name))?;
    writeln!(out)?;
    Ok(())
}

/// Run every example in order, stopping at the first failure.
pub fn run_all(out: &mut dyn Write, config: &CatalogConfig) -> Result<()> {
    for example in EXAMPLES {
        run(example, out, config)?;
    }
    Ok(())
}

// =============================================================================
// Creational
// =============================================================================

fn demo_factory(out: &mut dyn Write, _config: &CatalogConfig) -> Result<()> {
    let mut linux = LinuxFactory::new("ls")?;
    linux.arg("-l").arg("-a");
    writeln!(
        out,
        "Creator holds {:?} with args {:?}",
        linux.spec().command(),
        linux.spec().args()
    )?;
    writeln!(out, "{}", linux.create().execute())?;

    for platform in [Platform::Windows, Platform::Generic] {
        let terminal = factory::create_for(platform, "dir", ["/a"])?;
        writeln!(out, "{:?}: {}", platform, terminal.execute())?;
    }

    let native = factory::create_for(Platform::current(), "echo", ["hello"])?;
    writeln!(out, "This platform ({:?}): {}", Platform::current(), native.execute())?;
    Ok(())
}

fn demo_builder(out: &mut dyn Write, _config: &CatalogConfig) -> Result<()> {
    let mut builder = GraphicsBuilder::new();
    builder.set_color(Color::BLACK).add_line(0.0, 0.0, 20.0, 0.0);

    GraphicsDirector::new(&mut builder)
        .polygon(5, Point::new(10.0, 10.0), 5.0, Color::WHITE)?
        .rectangle(Point::new(0.0, 0.0), 20.0, 20.0, Color::RED)?;

    writeln!(out, "Builder colour after director: {:?}", builder.color())?;
    let graphics = builder.build();
    writeln!(out, "Built {} lines", graphics.len())?;
    writeln!(out, "{}", graphics.to_json()?)?;
    Ok(())
}

fn demo_singleton(out: &mut dyn Write, config: &CatalogConfig) -> Result<()> {
    let path = &config.singleton.log_file;
    let logger = match LoggerHandle::init(path) {
        Ok(logger) => logger,
        Err(LoggerError::AlreadyInitialized { path: existing }) => {
            warn!(path = %existing.display(), "logger already running, reusing it");
            LoggerHandle::instance()?
        }
        Err(e) => return Err(e.into()),
    };
    logger.log("This is a log message")?;

    let again = LoggerHandle::instance()?;
    again.log("This is another log message")?;
    writeln!(out, "Both handles refer to the same logger: {}", logger == again)?;

    if let Err(e) = LoggerHandle::init(path) {
        writeln!(out, "Second init refused: {e}")?;
    }

    let log_path = logger.path()?;
    let contents = std::fs::read_to_string(&log_path)
        .with_context(|| format!("reading {}", log_path.display()))?;
    writeln!(out, "{} ({} entries):", log_path.display(), logger.entries()?)?;
    write!(out, "{contents}")?;
    Ok(())
}

// =============================================================================
// Structural
// =============================================================================

fn demo_monad(out: &mut dyn Write, _config: &CatalogConfig) -> Result<()> {
    writeln!(out, "{}", Maybe::some(5).map(|x| x + 1))?;
    writeln!(out, "{}", Maybe::<i32>::none().map(|x| x + 1))?;
    writeln!(out, "{}", Maybe::some(5).unwrap_or(10))?;
    writeln!(out, "{}", Maybe::none().unwrap_or(10))?;

    let parse = |s: &str| Maybe::from(s.trim().parse::<i32>().ok());
    for input in ["42", "-7", "forty-two"] {
        let result = Maybe::some(input)
            .and_then(parse)
            .filter(|n| *n >= 0)
            .map(|n| n * 2);
        writeln!(out, "{input:>10} -> {result}")?;
    }
    Ok(())
}

fn demo_decorator(out: &mut dyn Write, config: &CatalogConfig) -> Result<()> {
    let mut source = Rot13::new(Base64::new(FileSource::new(&config.decorator.file)));
    source.write("Hello World!")?;

    let file = source.inner().inner();
    let stored = std::fs::read_to_string(file.path())
        .with_context(|| format!("reading {}", file.path().display()))?;
    writeln!(out, "On disk ({}): {stored}", file.path().display())?;
    writeln!(out, "Read back: {}", source.read()?)?;
    Ok(())
}

// =============================================================================
// Behavioral
// =============================================================================

fn api_key_chain(config: &ChainConfig) -> HandlerChain {
    HandlerChain::new()
        .then(MethodHandler::new(&config.method))
        .then(RouteHandler::new(&config.route))
        .then(CookieHandler::new(&config.cookie_key, &config.cookie_value))
        .then(EndpointHandler::new("api-key", "200 OK"))
}

fn validated_chain(config: &ChainConfig) -> HandlerChain {
    HandlerChain::new()
        .then(AuthHandler::new(config.api_tokens.iter().cloned()))
        .then(RateLimitHandler::new(config.rate_limit))
        .then(PayloadHandler::new(config.required_fields.iter().cloned()))
        .then(EndpointHandler::new("create", "201 Created"))
}

fn raw_request(method: &str, route: &str, cookie: &str) -> String {
    format!(
        "{method} {route} HTTP/1.1\n\
         Host: localhost:8080\n\
         Connection: keep-alive\n\
         cookie: {cookie};\n"
    )
}

fn demo_chain(out: &mut dyn Write, config: &CatalogConfig) -> Result<()> {
    let cfg = &config.chain;
    let chain = api_key_chain(cfg);
    writeln!(out, "Chain: {}", chain.handler_names().join(" -> "))?;

    let good_cookie = format!("{}={}", cfg.cookie_key, cfg.cookie_value);
    let bad_cookie = format!("{}=wrong", cfg.cookie_key);
    let requests = [
        ("expected request", raw_request(&cfg.method, &cfg.route, &good_cookie)),
        ("wrong method", raw_request("PATCH", &cfg.route, &good_cookie)),
        ("wrong route", raw_request(&cfg.method, "/api/nope", &good_cookie)),
        ("wrong key", raw_request(&cfg.method, &cfg.route, &bad_cookie)),
    ];
    for (label, raw) in &requests {
        let outcome = chain.dispatch_raw(raw)?;
        let shown = if outcome.is_accepted() {
            outcome.to_string().green()
        } else {
            outcome.to_string().red()
        };
        writeln!(out, "{label:>16}: {shown}")?;
    }

    let chain = validated_chain(cfg);
    writeln!(out, "Chain: {}", chain.handler_names().join(" -> "))?;
    let token = cfg.api_tokens.first().map(String::as_str).unwrap_or_default();
    let body = format!(
        "{{{}}}",
        cfg.required_fields.iter().map(|f| format!("\"{f}\": 1")).join(", ")
    );
    let authed = |client: &str| {
        Request::new("POST", "/items")
            .with_header("Authorization", format!("Bearer {token}"))
            .with_header("X-Client-Id", client)
    };

    let mut cases = vec![
        ("no credentials", Request::new("POST", "/items").with_body(body.clone())),
        ("empty body", authed("curl")),
        ("valid", authed("demo").with_body(body.clone())),
    ];
    // one past the quota for client "demo"
    cases.extend(
        (0..cfg.rate_limit).map(|_| ("repeat", authed("demo").with_body(body.clone()))),
    );
    for (label, request) in &cases {
        writeln!(out, "{label:>16}: {}", chain.dispatch(request))?;
    }
    Ok(())
}

fn demo_iterator(out: &mut dyn Write, _config: &CatalogConfig) -> Result<()> {
    let tree = Tree::node(
        1,
        Tree::node(2, Tree::leaf(4), Tree::leaf(5).with_left(Tree::leaf(10))),
        Tree::node(3, Tree::leaf(6), Tree::leaf(7)),
    );

    let mut iter = tree.iter();
    let mut visited = Vec::new();
    while !iter.is_done() {
        if let Some(value) = iter.next() {
            visited.push(value.to_string());
        }
    }
    writeln!(out, "In-order: {}", visited.join(" "))?;
    writeln!(out, "Sum via for-loop adapters: {}", tree.iter().sum::<i32>())?;
    Ok(())
}

fn demo_observer(out: &mut dyn Write, _config: &CatalogConfig) -> Result<()> {
    let mut manager = MouseEventManager::new();
    let first = Draggable::shared(10, 10, 30, 30);
    let second = Draggable::shared(120, 120, 10, 10);
    manager.subscribe(first.clone());
    manager.subscribe(second.clone());

    let items = [first.clone(), second.clone()];

    writeln!(out, "Moving the mouse around, nothing should happen")?;
    manager.notify(MouseEvent::Move, 10, 10);
    manager.notify(MouseEvent::Move, 120, 120);
    show_draggables(out, &items)?;

    writeln!(out, "Drag the first draggable from (10, 10) to (100, 100)")?;
    manager.notify(MouseEvent::Down, 15, 5);
    manager.notify(MouseEvent::Move, 100, 100);
    manager.notify(MouseEvent::Up, 100, 100);
    show_draggables(out, &items)?;

    writeln!(out, "Drag the second draggable from (120, 120) to (40, 40)")?;
    manager.notify(MouseEvent::Move, 125, 115);
    manager.notify(MouseEvent::Down, 125, 115);
    manager.notify(MouseEvent::Move, 40, 40);
    manager.notify(MouseEvent::Up, 100, 100);
    show_draggables(out, &items)?;

    for event in first.borrow().history().iter().chain(second.borrow().history()) {
        writeln!(out, "  > {event}")?;
    }
    Ok(())
}

fn show_draggables(out: &mut dyn Write, items: &[Rc<RefCell<Draggable>>]) -> std::io::Result<()> {
    for item in items {
        writeln!(out, "  {}", item.borrow())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_name_and_alias() {
        assert_eq!(find("builder").unwrap().name, "builder");
        assert_eq!(find("CoR").unwrap().name, "chain");
        assert_eq!(find("Maybe").unwrap().category, Category::Structural);
    }

    #[test]
    fn test_unknown_example_lists_known_names() {
        let err = find("visitor").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("visitor"));
        assert!(message.contains("factory, builder, singleton"));
    }

    #[test]
    fn test_names_are_unique() {
        let names: Vec<_> = catalog().iter().map(|e| e.name).collect();
        assert_eq!(names.iter().unique().count(), names.len());
    }

    #[test]
    fn test_listing_groups_by_category() {
        let listing = render_listing();
        let creational = listing.find("creational").unwrap();
        let structural = listing.find("structural").unwrap();
        let behavioral = listing.find("behavioral").unwrap();
        assert!(creational < structural && structural < behavioral);
        assert_eq!(listing.matches("creational").count(), 1);
        assert!(listing.contains("chain"));
    }

    #[test]
    fn test_pure_demos_produce_output() {
        let config = CatalogConfig::default();
        for name in ["factory", "builder", "monad", "iterator", "observer"] {
            let mut out = Vec::new();
            run(find(name).unwrap(), &mut out, &config).unwrap();
            assert!(!out.is_empty(), "{name} printed nothing");
        }
    }

    #[test]
    fn test_iterator_demo_order() {
        let mut out = Vec::new();
        demo_iterator(&mut out, &CatalogConfig::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("In-order: 4 2 10 5 1 6 3 7"));
        assert!(text.contains("Sum via for-loop adapters: 38"));
    }

    #[test]
    fn test_chain_demo_outcomes() {
        let mut out = Vec::new();
        demo_chain(&mut out, &CatalogConfig::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("accepted by api-key: 200 OK"));
        assert!(text.contains("rejected by method"));
        assert!(text.contains("rejected by route"));
        assert!(text.contains("rejected by cookie"));
        assert!(text.contains("rejected by auth: missing credentials"));
        assert!(text.contains("rejected by payload: missing payload"));
        assert!(text.contains("accepted by create: 201 Created"));
        assert!(text.contains("rejected by rate-limit"));
    }
}
