//! Collaborators that touch the operating system: external commands, the
//! Windows adapter registry and the local interface list.

pub mod interfaces;
pub mod process;
pub mod registry;

pub use self::process::{
    CommandOutput,
    CommandRunner,
    SystemRunner,
};
pub use self::registry::{
    AdapterClass,
    AdapterEntry,
    AdapterRegistry,
    SystemRegistry,
};
