use std::fmt::{
    Display,
    Formatter,
    Result as FmtResult,
};
use std::str::FromStr;

use mac::OsTag;
use {
    Error,
    Result,
};

/// [MAC address](https://en.wikipedia.org/wiki/MAC_address) in network byte order.
///
/// The textual form depends on the target OS and is not stored with the
/// value, see `MacAddress::display`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// Creates a MAC address from a network byte order buffer.
    pub fn new(addr: [u8; 6]) -> MacAddress {
        MacAddress(addr)
    }

    /// Tries to create a MAC address from twelve hex digits.
    pub fn from_hex_digits(digits: &[u8]) -> Result<MacAddress> {
        if digits.len() != 12 {
            return Err(Error::Malformed(String::from_utf8_lossy(digits).into_owned()));
        }

        let mut addr = [0; 6];
        for (i, pair) in digits.chunks(2).enumerate() {
            let hi = hex_value(pair[0]);
            let lo = hex_value(pair[1]);
            match (hi, lo) {
                (Some(hi), Some(lo)) => addr[i] = (hi << 4) | lo,
                _ => return Err(Error::Malformed(String::from_utf8_lossy(digits).into_owned())),
            }
        }

        Ok(MacAddress(addr))
    }

    /// Returns a reference to the network byte order representation of the
    /// address.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Checks if this is a unicast address.
    pub fn is_unicast(&self) -> bool {
        !self.is_multicast()
    }

    /// Checks if this is a multicast (or broadcast) address.
    pub fn is_multicast(&self) -> bool {
        (self.0[0] & 0b00000001) > 0
    }

    /// Checks if this is a locally administered address rather than an OUI
    /// assigned by IEEE.
    pub fn is_local(&self) -> bool {
        (self.0[0] & 0b00000010) > 0
    }

    /// Returns a displayable form of the address in the notation of an OS.
    pub fn display(&self, os: OsTag) -> Notation {
        Notation {
            addr: *self,
            delimiter: Some(os.delimiter()),
            uppercase: os == OsTag::Windows,
        }
    }

    /// Returns the address without delimiters, as stored in the Windows
    /// adapter registry.
    pub fn compact(&self) -> String {
        Notation {
            addr: *self,
            delimiter: None,
            uppercase: true,
        }.to_string()
    }
}

impl Display for MacAddress {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        self.display(OsTag::Unix).fmt(f)
    }
}

impl FromStr for MacAddress {
    type Err = Error;

    /// Parses a MAC address from an a:b:c:d:e:f or A-B-C-D-E-F style string.
    fn from_str(addr: &str) -> Result<MacAddress> {
        let tokens: Vec<_> = addr.split(|c: char| c == ':' || c == '-').collect();
        if tokens.len() != 6 || tokens.iter().any(|token| token.len() != 2) {
            return Err(Error::Malformed(addr.to_string()));
        }

        let digits: Vec<u8> = tokens.iter().flat_map(|token| token.bytes()).collect();
        MacAddress::from_hex_digits(&digits).map_err(|_| Error::Malformed(addr.to_string()))
    }
}

/// A MAC address rendered with a particular delimiter and case.
#[derive(Clone, Copy, Debug)]
pub struct Notation {
    addr: MacAddress,
    delimiter: Option<char>,
    uppercase: bool,
}

impl Display for Notation {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for (i, byte) in self.addr.0.iter().enumerate() {
            if i > 0 {
                if let Some(delimiter) = self.delimiter {
                    write!(f, "{}", delimiter)?;
                }
            }
            if self.uppercase {
                write!(f, "{:02X}", byte)?;
            } else {
                write!(f, "{:02x}", byte)?;
            }
        }
        Ok(())
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}
