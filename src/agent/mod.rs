//! Browser User-Agent selection and requests that carry one.

mod request;
mod source;

pub use self::request::{
    http_agent,
    make_request_with_user_agent,
    Response,
};
pub use self::source::{
    configured_source,
    fallback_user_agent,
    get_random_user_agent,
    random_user_agent,
    DynamicSource,
    GeneratedAgents,
    RemoteList,
    UserAgentSource,
    STATIC_USER_AGENTS,
};
