//! Reading, generating and applying MAC addresses of network interfaces.

mod addr;
mod controller;
mod os;
pub mod parse;
pub mod random;

pub use self::addr::{
    MacAddress,
    Notation,
};
pub use self::controller::{
    ChangeReport,
    MacController,
    DEFAULT_SCAN_LIMIT,
};
pub use self::os::{
    OsTag,
    GUIDANCE,
};
pub use self::random::{
    HexSource,
    ScriptedHex,
    ThreadHex,
};
