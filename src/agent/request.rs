use std::borrow::Cow;
use std::time::Duration;

use ureq::Agent;

use agent::source::{
    configured_source,
    random_user_agent,
};
use {
    Config,
    Error,
    Result,
};

/// An HTTP response with its body read to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// Returns the first value of a header, matching its name ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|&&(ref key, _)| key.eq_ignore_ascii_case(name))
            .map(|&(_, ref value)| value.as_str())
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> Cow<str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Returns an HTTP agent with a global timeout. Error statuses are handed
/// back as responses rather than errors.
pub fn http_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Issues a GET request to url with a User-Agent header.
///
/// When user_agent is `None` one is picked with `random_user_agent`. Only
/// transport failures are errors; any HTTP status and any body up to
/// `Config::http_body_limit` bytes is returned as a `Response`.
pub fn make_request_with_user_agent(
    url: &str,
    user_agent: Option<&str>,
    config: &Config,
) -> Result<Response> {
    let user_agent = match user_agent {
        Some(user_agent) => user_agent.to_string(),
        None => random_user_agent(&mut configured_source(config)),
    };

    info!("GET {} as {}", url, user_agent);

    let response = http_agent(config.http_timeout)
        .get(url)
        .header("User-Agent", user_agent.as_str())
        .call()
        .map_err(|err| Error::Transport(err.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    let body = response
        .into_body()
        .with_config()
        .limit(config.http_body_limit)
        .read_to_vec()
        .map_err(|err| Error::Transport(err.to_string()))?;

    debug!("{} answered {} with {} bytes", url, status, body.len());

    Ok(Response {
        status,
        headers,
        body,
    })
}
