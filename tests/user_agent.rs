#[macro_use]
extern crate assert_matches;
extern crate macspoof;
extern crate regex;

mod context;

use std::time::Duration;

use regex::Regex;

use macspoof::agent::{
    get_random_user_agent,
    make_request_with_user_agent,
    random_user_agent,
    RemoteList,
    STATIC_USER_AGENTS,
};
use macspoof::{
    Config,
    Console,
    Error,
};

use context::*;

fn config() -> Config {
    Config {
        http_timeout: Duration::from_secs(5),
        ..Config::default()
    }
}

#[test]
fn random_user_agent_shape() {
    let shape = Regex::new(r"^Mozilla/5\.0 \(.+\)").unwrap();
    for _ in 0..20 {
        let agent = get_random_user_agent();
        assert!(agent.len() > 10);
        assert!(agent.contains("Mozilla"));
        assert!(shape.is_match(&agent), "{}", agent);
    }
}

#[test]
fn custom_user_agent_is_sent() {
    let (url, server) = serve_once("HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok");

    let response = make_request_with_user_agent(&url, Some("MyCustomUserAgent/1.0"), &config()).unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.text(), "ok");
    let request = server.join().unwrap().to_lowercase();
    assert!(request.starts_with("get / http/1.1"));
    assert!(request.contains("user-agent: mycustomuseragent/1.0"));
}

#[test]
fn random_user_agent_is_sent() {
    let (url, server) = serve_once("HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n");

    let response = make_request_with_user_agent(&url, None, &config()).unwrap();

    assert_eq!(response.status, 204);
    let request = server.join().unwrap().to_lowercase();
    assert!(request.contains("user-agent: mozilla/5.0 ("));
}

fn response_with_body(body: &[u8]) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    ).into_bytes();
    response.extend_from_slice(body);
    response
}

#[test]
fn binary_body_is_kept() {
    let body = b"\x89PNG\r\n\x1a\n\xff\xfe".to_vec();
    let (url, server) = serve(response_with_body(&body));

    let response = make_request_with_user_agent(&url, Some("Mozilla/5.0 (Test)"), &config()).unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, body);
    assert!(response.text().contains('\u{FFFD}'));
    server.join().unwrap();
}

#[test]
fn large_body_is_kept() {
    let body = vec![b'a'; 11 * 1024 * 1024];
    let (url, server) = serve(response_with_body(&body));

    let response = make_request_with_user_agent(&url, Some("Mozilla/5.0 (Test)"), &config()).unwrap();

    assert_eq!(response.body.len(), body.len());
    assert!(response.body.iter().all(|&byte| byte == b'a'));
    server.join().unwrap();
}

#[test]
fn body_over_limit_is_a_transport_error() {
    let (url, _server) = serve(response_with_body(&[b'a'; 4096]));
    let config = Config {
        http_body_limit: 1024,
        ..config()
    };

    assert_matches!(
        make_request_with_user_agent(&url, Some("Mozilla/5.0 (Test)"), &config),
        Err(Error::Transport(_))
    );
}

#[test]
fn error_status_is_a_response() {
    let (url, server) = serve_once(
        "HTTP/1.1 404 Not Found\r\nContent-Type: text/plain\r\nContent-Length: 4\r\nConnection: close\r\n\r\ngone",
    );

    let response = make_request_with_user_agent(&url, Some("Mozilla/5.0 (Test)"), &config()).unwrap();

    assert_eq!(response.status, 404);
    assert!(!response.is_success());
    assert_eq!(response.header("content-type"), Some("text/plain"));
    assert_eq!(response.text(), "gone");
    server.join().unwrap();
}

#[test]
fn unreachable_host_is_absent() {
    assert_matches!(
        make_request_with_user_agent("http://127.0.0.1:1/", None, &config()),
        Err(Error::Transport(_))
    );

    let mut console = Console::new(vec![]);
    assert!(console
        .make_request_with_user_agent("http://nonexistent.invalid/", None, &config())
        .is_none());
    let out = String::from_utf8(console.into_inner()).unwrap();
    assert!(out.starts_with("Mozilla/5.0"));
    assert!(out.contains("something occurred, please check"));
}

#[test]
fn remote_list_source() {
    let (url, server) = serve_once(
        "HTTP/1.1 200 OK\r\nContent-Length: 48\r\nConnection: close\r\n\r\n# agents\nnot an agent\nMozilla/5.0 (Remote Test)\n",
    );

    let agent = random_user_agent(&mut RemoteList::new(&url, &config()));

    assert_eq!(agent, "Mozilla/5.0 (Remote Test)");
    server.join().unwrap();
}

#[test]
fn remote_list_failure_falls_back() {
    let (url, server) = serve_once("HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");

    let agent = random_user_agent(&mut RemoteList::new(&url, &config()));

    assert!(STATIC_USER_AGENTS.contains(&agent.as_str()));
    server.join().unwrap();
}

#[test]
#[ignore]
fn httpbin_echoes_user_agent() {
    let response =
        make_request_with_user_agent("https://httpbin.org/headers", Some("MyCustomUserAgent/1.0"), &config())
            .unwrap();
    assert_eq!(response.status, 200);
    assert!(response.text().contains("MyCustomUserAgent/1.0"));
}
