#[cfg(test)]
#[macro_use]
extern crate assert_matches;
extern crate get_if_addrs;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate rand;
extern crate rand_agents;
extern crate regex;
extern crate ureq;
#[cfg(windows)]
extern crate winreg;

pub mod agent;
pub mod config;
pub mod console;
pub mod mac;
pub mod sys;

use std::fmt::{
    Display,
    Formatter,
    Result as FmtResult,
};

pub use config::Config;
pub use console::Console;

#[derive(Debug)]
pub enum Error {
    /// Indicates an operating system tag other than unix, macos or windows.
    UnsupportedOs(String),
    /// Indicates an external program that could not be launched.
    Launch { program: String, err: std::io::Error },
    /// Indicates an external program that exited unsuccessfully.
    Command {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
    /// Indicates command output without the expected MAC address.
    NotFound(String),
    /// Indicates an interface missing from the adapter registry.
    InterfaceNotFound(String),
    /// Indicates a failure reading or writing the registry.
    Registry(std::io::Error),
    /// Indicates a facility that does not exist on the running platform.
    Unsupported(&'static str),
    /// Indicates a malformed or unusable MAC address.
    Malformed(String),
    /// Indicates a User-Agent source answer that is not a browser User-Agent.
    UserAgent(String),
    /// Indicates an HTTP transport failure (DNS, connect, timeout, ...).
    Transport(String),
    /// Indicates a generic IO error.
    IO(std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match *self {
            Error::UnsupportedOs(ref tag) => write!(f, "unsupported operating system {:?}", tag),
            Error::Launch { ref program, ref err } => {
                write!(f, "could not launch {}: {}", program, err)
            }
            Error::Command {
                ref program,
                code,
                ref stderr,
            } => {
                match code {
                    Some(code) => write!(f, "{} exited with status {}", program, code)?,
                    None => write!(f, "{} was terminated by a signal", program)?,
                }
                if stderr.trim().is_empty() {
                    Ok(())
                } else {
                    write!(f, ": {}", stderr.trim())
                }
            }
            Error::NotFound(ref what) => write!(f, "no MAC address found for {}", what),
            Error::InterfaceNotFound(ref name) => {
                write!(f, "interface {} not found in the registry", name)
            }
            Error::Registry(ref err) => write!(f, "registry error: {}", err),
            Error::Unsupported(what) => write!(f, "{} is not available on this platform", what),
            Error::Malformed(ref mac) => write!(f, "malformed MAC address {:?}", mac),
            Error::UserAgent(ref agent) => write!(f, "unusable User-Agent {:?}", agent),
            Error::Transport(ref err) => write!(f, "request failed: {}", err),
            Error::IO(ref err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IO(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
