use mac::parse::{
    ifconfig_mac,
    ipconfig_mac,
};
use mac::random::random_mac;
use mac::{
    HexSource,
    MacAddress,
    OsTag,
    ThreadHex,
};
use sys::registry::subkey_name;
use sys::{
    AdapterClass,
    AdapterEntry,
    AdapterRegistry,
    CommandRunner,
    SystemRegistry,
    SystemRunner,
};
use {
    Error,
    Result,
};

/// Maximum number of adapter subkeys inspected by default.
pub const DEFAULT_SCAN_LIMIT: usize = 1000;

/// Outcome of a MAC address change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeReport {
    pub os: OsTag,
    pub interface: String,
    /// Address read before the change, if it could be read.
    pub previous: Option<MacAddress>,
    /// Address that was applied.
    pub requested: MacAddress,
    /// Address read after the change. Never read on Windows, where the new
    /// address only shows up once the adapter driver has reloaded.
    pub current: Option<MacAddress>,
}

impl ChangeReport {
    /// Checks if the address read after the change is the requested one.
    pub fn confirmed(&self) -> bool {
        self.current == Some(self.requested)
    }
}

/// Reads, generates and applies MAC addresses for named interfaces.
///
/// All side effects go through the command runner and adapter registry, so
/// every privileged operation can be observed or replaced.
pub struct MacController<C, R, H> {
    runner: C,
    registry: R,
    hex: H,
    scan_limit: usize,
}

impl MacController<SystemRunner, SystemRegistry, ThreadHex> {
    /// Creates a controller backed by the running system.
    pub fn system() -> MacController<SystemRunner, SystemRegistry, ThreadHex> {
        MacController::new(SystemRunner::new(), SystemRegistry::new(), ThreadHex::new())
    }
}

impl<C, R, H> MacController<C, R, H>
where
    C: CommandRunner,
    R: AdapterRegistry,
    H: HexSource,
{
    pub fn new(runner: C, registry: R, hex: H) -> MacController<C, R, H> {
        MacController {
            runner,
            registry,
            hex,
            scan_limit: DEFAULT_SCAN_LIMIT,
        }
    }

    /// Sets the number of adapter subkeys inspected before giving up.
    pub fn with_scan_limit(mut self, scan_limit: usize) -> MacController<C, R, H> {
        self.scan_limit = scan_limit;
        self
    }

    pub fn scan_limit(&self) -> usize {
        self.scan_limit
    }

    pub fn runner(&self) -> &C {
        &self.runner
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Reads the current MAC address of an interface.
    pub fn read_current_mac(&mut self, os: OsTag, interface: &str) -> Result<MacAddress> {
        let mac = match os {
            OsTag::Windows => {
                let output = self.runner.run("ipconfig", &[])?;
                ipconfig_mac(&output.stdout, interface)
            }
            OsTag::Unix | OsTag::MacOs => {
                let output = self.runner.run("ifconfig", &[interface])?;
                ifconfig_mac(&output.stdout)
            }
        };

        mac.ok_or_else(|| Error::NotFound(interface.to_string()))
    }

    /// Generates a random unicast MAC address.
    pub fn generate_random_mac(&mut self, os: OsTag) -> Result<MacAddress> {
        random_mac(&mut self.hex, os)
    }

    /// Applies a freshly generated random MAC address to an interface.
    pub fn change_mac(&mut self, os: OsTag, interface: &str) -> Result<ChangeReport> {
        self.change_mac_with_progress(os, interface, None, |_| {})
    }

    /// Applies mac to an interface.
    pub fn change_mac_to(
        &mut self,
        os: OsTag,
        interface: &str,
        mac: MacAddress,
    ) -> Result<ChangeReport> {
        self.change_mac_with_progress(os, interface, Some(mac), |_| {})
    }

    /// Applies mac, or a random address when `None`, to an interface.
    ///
    /// on_previous receives the address read before anything is changed, so
    /// callers can report it even when a later step fails. The sequence stops
    /// at the first failing step. Multicast addresses are rejected before
    /// anything runs.
    pub fn change_mac_with_progress<F>(
        &mut self,
        os: OsTag,
        interface: &str,
        mac: Option<MacAddress>,
        mut on_previous: F,
    ) -> Result<ChangeReport>
    where
        F: FnMut(Option<MacAddress>),
    {
        let mac = match mac {
            Some(mac) => mac,
            None => self.generate_random_mac(os)?,
        };

        if mac.is_multicast() {
            return Err(Error::Malformed(mac.display(os).to_string()));
        }

        let previous = self.read_for_report(os, interface);
        on_previous(previous);

        let text = mac.display(os).to_string();

        let current = match os {
            OsTag::Unix | OsTag::MacOs => {
                self.runner.run("ifconfig", &[interface, "down"])?;
                if os == OsTag::Unix {
                    self.runner.run("macchanger", &["-m", text.as_str(), interface])?;
                } else {
                    self.runner.run("ifconfig", &[interface, "ether", text.as_str()])?;
                }
                self.runner.run("ifconfig", &[interface, "up"])?;
                self.read_for_report(os, interface)
            }
            OsTag::Windows => {
                let entry = self.write_network_address(interface, mac)?;
                info!(
                    "Wrote NetworkAddress {} for {} ({})",
                    mac.compact(),
                    entry.description,
                    entry.instance_id
                );
                let name = format!("name={}", interface);
                self.runner
                    .run("netsh", &["interface", "set", "interface", name.as_str(), "admin=disable"])?;
                self.runner
                    .run("netsh", &["interface", "set", "interface", name.as_str(), "admin=enable"])?;
                None
            }
        };

        let report = ChangeReport {
            os,
            interface: interface.to_string(),
            previous,
            requested: mac,
            current,
        };

        if report.current.is_some() && !report.confirmed() {
            warn!(
                "{} reports {} after requesting {}",
                interface,
                report.current.map(|mac| mac.display(os).to_string()).unwrap_or_default(),
                text
            );
        }

        Ok(report)
    }

    /// Reads the current address for progress reporting, where a failure is
    /// not fatal to the surrounding operation.
    fn read_for_report(&mut self, os: OsTag, interface: &str) -> Option<MacAddress> {
        match self.read_current_mac(os, interface) {
            Ok(mac) => {
                info!("{} has MAC {}", interface, mac.display(os));
                Some(mac)
            }
            Err(err) => {
                warn!("Could not read MAC of {}: {}", interface, err);
                None
            }
        }
    }

    /// Stores mac as the `NetworkAddress` of the first adapter whose driver
    /// description contains interface, ignoring case.
    fn write_network_address(&mut self, interface: &str, mac: MacAddress) -> Result<AdapterEntry> {
        let class = self.registry.open_class()?;
        let needle = interface.to_lowercase();

        for index in 0..self.scan_limit {
            let entry = match class.entry(index) {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(err) => {
                    debug!("Skipping adapter subkey {}: {}", subkey_name(index), err);
                    continue;
                }
            };

            if entry.description.to_lowercase().contains(&needle) {
                class.set_network_address(index, &mac.compact())?;
                return Ok(entry);
            }
        }

        Err(Error::InterfaceNotFound(interface.to_string()))
    }
}
