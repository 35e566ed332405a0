//! Access to the network adapter class key of the Windows registry.
//!
//! Every adapter has a numbered subkey (`0000`, `0001`, ...) below the class
//! key holding its `NetCfgInstanceId`, its `DriverDesc` and, once overridden,
//! a `NetworkAddress` value.

use Result;

pub const ADAPTER_CLASS_KEY: &str =
    r"SYSTEM\CurrentControlSet\Control\Class\{4D36E972-E325-11CE-BFC1-08002BE10318}";

/// Identification values of one adapter subkey.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdapterEntry {
    pub instance_id: String,
    pub description: String,
}

/// An open handle to the adapter class key.
pub trait AdapterClass {
    /// Reads the adapter subkey at index.
    ///
    /// Returns `Ok(None)` when the subkey does not exist, meaning there are
    /// no more adapters, and an error when the subkey or one of its values
    /// cannot be read.
    fn entry(&self, index: usize) -> Result<Option<AdapterEntry>>;

    /// Writes the `NetworkAddress` value of the adapter subkey at index.
    fn set_network_address(&self, index: usize, value: &str) -> Result<()>;
}

/// Opens the adapter class key.
pub trait AdapterRegistry {
    type Class: AdapterClass;

    fn open_class(&self) -> Result<Self::Class>;
}

/// Name of the adapter subkey at index.
pub fn subkey_name(index: usize) -> String {
    format!("{:04}", index)
}

#[cfg(windows)]
mod platform {
    use std::io::ErrorKind;

    use winreg::enums::{
        HKEY_LOCAL_MACHINE,
        KEY_READ,
        KEY_SET_VALUE,
    };
    use winreg::RegKey;

    use super::*;
    use Error;

    /// The adapter class key of the local machine.
    #[derive(Clone, Debug, Default)]
    pub struct WindowsRegistry;

    impl WindowsRegistry {
        pub fn new() -> WindowsRegistry {
            WindowsRegistry {}
        }
    }

    pub struct WindowsClass {
        key: RegKey,
    }

    impl AdapterRegistry for WindowsRegistry {
        type Class = WindowsClass;

        fn open_class(&self) -> Result<WindowsClass> {
            let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
            let key = hklm
                .open_subkey_with_flags(ADAPTER_CLASS_KEY, KEY_READ)
                .map_err(Error::Registry)?;
            Ok(WindowsClass { key })
        }
    }

    impl AdapterClass for WindowsClass {
        fn entry(&self, index: usize) -> Result<Option<AdapterEntry>> {
            let subkey = match self.key.open_subkey_with_flags(subkey_name(index), KEY_READ) {
                Ok(subkey) => subkey,
                Err(ref err) if err.kind() == ErrorKind::NotFound => return Ok(None),
                Err(err) => return Err(Error::Registry(err)),
            };

            let instance_id: String = subkey.get_value("NetCfgInstanceId").map_err(Error::Registry)?;
            let description: String = subkey.get_value("DriverDesc").map_err(Error::Registry)?;

            Ok(Some(AdapterEntry {
                instance_id,
                description,
            }))
        }

        fn set_network_address(&self, index: usize, value: &str) -> Result<()> {
            let subkey = self
                .key
                .open_subkey_with_flags(subkey_name(index), KEY_SET_VALUE)
                .map_err(Error::Registry)?;
            subkey
                .set_value("NetworkAddress", &value.to_string())
                .map_err(Error::Registry)
        }
    }

    pub type SystemRegistry = WindowsRegistry;
}

#[cfg(not(windows))]
mod platform {
    use super::*;
    use Error;

    /// Stand-in for platforms without a Windows registry. Opening the class
    /// key always fails.
    #[derive(Clone, Debug, Default)]
    pub struct NoRegistry;

    impl NoRegistry {
        pub fn new() -> NoRegistry {
            NoRegistry {}
        }
    }

    #[derive(Debug)]
    pub enum NoClass {}

    impl AdapterRegistry for NoRegistry {
        type Class = NoClass;

        fn open_class(&self) -> Result<NoClass> {
            Err(Error::Unsupported("the Windows adapter registry"))
        }
    }

    impl AdapterClass for NoClass {
        fn entry(&self, _index: usize) -> Result<Option<AdapterEntry>> {
            match *self {}
        }

        fn set_network_address(&self, _index: usize, _value: &str) -> Result<()> {
            match *self {}
        }
    }

    pub type SystemRegistry = NoRegistry;
}

pub use self::platform::*;
