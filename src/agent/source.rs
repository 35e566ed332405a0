use std::fmt::{
    Debug,
    Formatter,
    Result as FmtResult,
};

use rand::{
    self,
    Rng,
};
use rand_agents;
use ureq::Agent;

use agent::http_agent;
use {
    Config,
    Error,
    Result,
};

/// Browser and OS combinations used when no dynamic source is available.
pub const STATIC_USER_AGENTS: [&str; 10] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.6312.105 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_4_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.6312.105 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.6312.105 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:126.0) Gecko/20100101 Firefox/126.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 13.4; rv:126.0) Gecko/20100101 Firefox/126.0",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:126.0) Gecko/20100101 Firefox/126.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_4_1) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.6312.105 Safari/537.36 Edg/123.0.2420.81",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_4_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.6312.105 Safari/537.36 Edg/123.0.2420.81",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.6312.105 Safari/537.36 Edg/123.0.2420.81",
];

/// A dynamic source of User-Agent strings.
pub trait UserAgentSource {
    fn user_agent(&mut self) -> Result<String>;
}

/// An absent source is always unavailable.
impl<S: UserAgentSource> UserAgentSource for Option<S> {
    fn user_agent(&mut self) -> Result<String> {
        match *self {
            Some(ref mut source) => source.user_agent(),
            None => Err(Error::Unsupported("a dynamic User-Agent source")),
        }
    }
}

/// Generates User-Agents of current browser releases without touching the
/// network.
#[derive(Clone, Debug, Default)]
pub struct GeneratedAgents;

impl GeneratedAgents {
    pub fn new() -> GeneratedAgents {
        GeneratedAgents {}
    }
}

impl UserAgentSource for GeneratedAgents {
    fn user_agent(&mut self) -> Result<String> {
        let agent = rand_agents::user_agent().to_string();
        if agent.starts_with("Mozilla/") {
            Ok(agent)
        } else {
            Err(Error::UserAgent(agent))
        }
    }
}

/// Picks User-Agents from a newline separated list served over HTTP. Only
/// lines starting with `Mozilla/` are considered.
pub struct RemoteList {
    url: String,
    agent: Agent,
    body_limit: u64,
}

impl RemoteList {
    pub fn new(url: &str, config: &Config) -> RemoteList {
        RemoteList {
            url: url.to_string(),
            agent: http_agent(config.http_timeout),
            body_limit: config.http_body_limit,
        }
    }
}

impl Debug for RemoteList {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.debug_struct("RemoteList").field("url", &self.url).finish()
    }
}

impl UserAgentSource for RemoteList {
    fn user_agent(&mut self) -> Result<String> {
        let response = self
            .agent
            .get(self.url.as_str())
            .call()
            .map_err(|err| Error::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "{} answered {}",
                self.url,
                response.status()
            )));
        }

        let body = response
            .into_body()
            .with_config()
            .limit(self.body_limit)
            .read_to_vec()
            .map_err(|err| Error::Transport(err.to_string()))?;
        let body = String::from_utf8_lossy(&body);

        let agents: Vec<&str> = body
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with("Mozilla/"))
            .collect();

        if agents.is_empty() {
            return Err(Error::Transport(format!("{} lists no User-Agents", self.url)));
        }

        let index = rand::thread_rng().gen_range(0, agents.len());
        Ok(agents[index].to_string())
    }
}

/// The dynamic source selected by the configuration.
#[derive(Debug)]
pub enum DynamicSource {
    Generated(GeneratedAgents),
    Remote(RemoteList),
}

impl UserAgentSource for DynamicSource {
    fn user_agent(&mut self) -> Result<String> {
        match *self {
            DynamicSource::Generated(ref mut source) => source.user_agent(),
            DynamicSource::Remote(ref mut source) => source.user_agent(),
        }
    }
}

/// Returns the remote list named by the configuration, or the local
/// generator when none is named.
pub fn configured_source(config: &Config) -> DynamicSource {
    match config.user_agent_source {
        Some(ref url) => DynamicSource::Remote(RemoteList::new(url, config)),
        None => DynamicSource::Generated(GeneratedAgents::new()),
    }
}

/// Picks one of the embedded User-Agents uniformly.
pub fn fallback_user_agent() -> String {
    let index = rand::thread_rng().gen_range(0, STATIC_USER_AGENTS.len());
    STATIC_USER_AGENTS[index].to_string()
}

/// Returns a User-Agent from source, or from the embedded list when the
/// source fails for any reason.
pub fn random_user_agent<S: UserAgentSource>(source: &mut S) -> String {
    match source.user_agent() {
        Ok(ref agent) if !agent.trim().is_empty() => agent.clone(),
        Ok(_) => fallback_user_agent(),
        Err(err) => {
            debug!("Dynamic User-Agent source unavailable: {}", err);
            fallback_user_agent()
        }
    }
}

/// Returns a User-Agent using the configuration from the environment.
pub fn get_random_user_agent() -> String {
    let config = Config::from_env();
    random_user_agent(&mut configured_source(&config))
}
