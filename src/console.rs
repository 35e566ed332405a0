//! Interactive front end printing the classic messages of the tool.
//!
//! Every operation reports failures as a line of text and returns `None`
//! (or nothing) instead of an error.

use std::fmt::Arguments;
use std::io::Write;

use agent::{
    configured_source,
    make_request_with_user_agent,
    random_user_agent,
    Response,
};
use mac::{
    HexSource,
    MacAddress,
    MacController,
    OsTag,
    GUIDANCE,
};
use sys::{
    AdapterRegistry,
    CommandRunner,
};
use {
    Config,
    Error,
};

pub const INTERFACE_NOT_FOUND: &str = "Cannot found the interface in the register.";

pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Console<W> {
        Console { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints and returns the current MAC address of an interface.
    pub fn read_current_mac<C, R, H>(
        &mut self,
        controller: &mut MacController<C, R, H>,
        os: &str,
        interface: &str,
    ) -> Option<String>
    where
        C: CommandRunner,
        R: AdapterRegistry,
        H: HexSource,
    {
        let os = self.os_tag(os)?;
        match controller.read_current_mac(os, interface) {
            Ok(mac) => {
                let mac = mac.display(os).to_string();
                self.say(format_args!("{}", mac));
                Some(mac)
            }
            Err(err) => {
                self.fault(&err);
                None
            }
        }
    }

    /// Prints and returns a random MAC address in the notation of os.
    pub fn generate_random_mac<C, R, H>(
        &mut self,
        controller: &mut MacController<C, R, H>,
        os: &str,
    ) -> Option<String>
    where
        C: CommandRunner,
        R: AdapterRegistry,
        H: HexSource,
    {
        let os = self.os_tag(os)?;
        match controller.generate_random_mac(os) {
            Ok(mac) => {
                let mac = mac.display(os).to_string();
                self.say(format_args!("{}", mac));
                Some(mac)
            }
            Err(err) => {
                self.fault(&err);
                None
            }
        }
    }

    /// Changes the MAC address of an interface, to mac when given and to a
    /// random address otherwise, printing progress along the way.
    pub fn change_mac<C, R, H>(
        &mut self,
        controller: &mut MacController<C, R, H>,
        os: &str,
        interface: &str,
        mac: Option<MacAddress>,
    ) where
        C: CommandRunner,
        R: AdapterRegistry,
        H: HexSource,
    {
        let os = match self.os_tag(os) {
            Some(os) => os,
            None => return,
        };

        let result = controller.change_mac_with_progress(os, interface, mac, |previous| match previous {
            Some(mac) => self.say(format_args!("Current MAC address: {}", mac.display(os))),
            None => self.say(format_args!("Current MAC address: unknown")),
        });

        match result {
            Ok(report) => {
                self.say(format_args!(
                    "Success! MAC address of {} changed to {}",
                    interface,
                    report.requested.display(os)
                ));
                if let Some(mac) = report.current {
                    self.say(format_args!("New MAC address: {}", mac.display(os)));
                }
            }
            Err(Error::InterfaceNotFound(_)) => self.say(format_args!("{}", INTERFACE_NOT_FOUND)),
            Err(err) => self.fault(&err),
        }
    }

    /// Prints the User-Agent in use and fetches url with it.
    pub fn make_request_with_user_agent(
        &mut self,
        url: &str,
        user_agent: Option<&str>,
        config: &Config,
    ) -> Option<Response> {
        let user_agent = match user_agent {
            Some(user_agent) => user_agent.to_string(),
            None => random_user_agent(&mut configured_source(config)),
        };
        self.say(format_args!("{}", user_agent));

        match make_request_with_user_agent(url, Some(&user_agent), config) {
            Ok(response) => Some(response),
            Err(err) => {
                self.fault(&err);
                None
            }
        }
    }

    fn os_tag(&mut self, os: &str) -> Option<OsTag> {
        match os.parse() {
            Ok(os) => Some(os),
            Err(_) => {
                self.say(format_args!("{}", GUIDANCE));
                None
            }
        }
    }

    fn fault(&mut self, err: &Error) {
        debug!("{:?}", err);
        self.say(format_args!("something occurred, please check {}", err));
    }

    fn say(&mut self, line: Arguments) {
        if let Err(err) = self.out.write_fmt(line).and_then(|_| self.out.write_all(b"\n")) {
            debug!("Console write failed: {}", err);
        }
    }
}
