//! The request that travels down a handler chain.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref REQUEST_LINE: Regex =
        Regex::new(r"^([A-Z]{2,}) (/[^ ]*)(?: (HTTP/\d(?:\.\d)?))?$").expect("request line regex");
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("Empty request")]
    Empty,

    #[error("Malformed request line: '{line}'")]
    MalformedRequestLine { line: String },

    #[error("Malformed header on line {line_no}: '{line}'")]
    MalformedHeader { line_no: usize, line: String },
}

/// A minimal HTTP/1.x style request. Header names are stored lowercase.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Request {
    method: String,
    path: String,
    version: Option<String>,
    headers: Vec<(String, String)>,
    cookies: Vec<(String, String)>,
    body: String,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Request {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        if name == "cookie" {
            self.cookies.extend(parse_cookies(&value));
        }
        self.headers.push((name, value));
        self
    }

    pub fn with_cookie(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let pair = format!("{}={};", key.into(), value.into());
        self.with_header("cookie", pair)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Parse the text form of a request: request line, `Name: value` headers,
    /// a blank line, then the body. Surrounding indentation is ignored.
    pub fn parse(raw: &str) -> Result<Self, RequestError> {
        let mut lines = raw.trim_start().lines().enumerate();

        let (_, first) = lines.next().ok_or(RequestError::Empty)?;
        let first = first.trim();
        let caps = REQUEST_LINE
            .captures(first)
            .ok_or_else(|| RequestError::MalformedRequestLine {
                line: first.to_string(),
            })?;

        let mut request = Request::new(&caps[1], &caps[2]);
        request.version = caps.get(3).map(|m| m.as_str().to_string());

        for (idx, line) in lines.by_ref() {
            let line = line.trim();
            if line.is_empty() {
                break;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| RequestError::MalformedHeader {
                    line_no: idx + 1,
                    line: line.to_string(),
                })?;
            request = request.with_header(name.trim(), value.trim());
        }

        request.body = lines
            .map(|(_, line)| line)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();
        Ok(request)
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// First header with this name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn cookie(&self, key: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

fn parse_cookies(value: &str) -> impl Iterator<Item = (String, String)> + '_ {
    value
        .split([';', ','])
        .filter_map(|pair| pair.trim().split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "GET /api/key HTTP/1.1
Host: localhost:8080
Connection: keep-alive
cookie: theme=dark; KEY=Pa$$w0rd;
    ";

    #[test]
    fn test_parse_request_line_and_headers() {
        let request = Request::parse(RAW).unwrap();
        assert_eq!(request.method(), "GET");
        assert_eq!(request.path(), "/api/key");
        assert_eq!(request.version(), Some("HTTP/1.1"));
        assert_eq!(request.header("HOST"), Some("localhost:8080"));
        assert_eq!(request.headers().len(), 3);
        assert_eq!(request.body(), "");
    }

    #[test]
    fn test_parse_cookies() {
        let request = Request::parse(RAW).unwrap();
        assert_eq!(request.cookie("KEY"), Some("Pa$$w0rd"));
        assert_eq!(request.cookie("theme"), Some("dark"));
        assert_eq!(request.cookie("key"), None);
    }

    #[test]
    fn test_parse_body_after_blank_line() {
        let raw = "POST /api/items HTTP/1.1\r\nContent-Type: application/json\r\n\r\n{\"name\": \"widget\"}\r\n";
        let request = Request::parse(raw).unwrap();
        assert_eq!(request.method(), "POST");
        assert_eq!(request.body(), "{\"name\": \"widget\"}");
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(Request::parse("   \n"), Err(RequestError::Empty));
        assert!(matches!(
            Request::parse("get /lowercase HTTP/1.1"),
            Err(RequestError::MalformedRequestLine { .. })
        ));
        assert_eq!(
            Request::parse("GET / HTTP/1.1\nno colon here"),
            Err(RequestError::MalformedHeader {
                line_no: 2,
                line: "no colon here".to_string()
            })
        );
    }

    #[test]
    fn test_builder_style_construction() {
        let request = Request::new("GET", "/")
            .with_header("Authorization", "Bearer abc")
            .with_cookie("session", "42");
        assert_eq!(request.header("authorization"), Some("Bearer abc"));
        assert_eq!(request.cookie("session"), Some("42"));
    }
}
