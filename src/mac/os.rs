use std::fmt::{
    Display,
    Formatter,
    Result as FmtResult,
};
use std::str::FromStr;

use Error;

/// Message shown whenever an unrecognized OS tag is supplied.
pub const GUIDANCE: &str = "Enter a carried OS : 1.Windows, 2.Unix, 3.MacOS";

/// Operating system family selecting both the MAC notation and the command
/// sequence used to manage an interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OsTag {
    Unix,
    MacOs,
    Windows,
}

impl OsTag {
    /// Returns the tag of the running operating system, if it is one of the
    /// supported families.
    pub fn host() -> Option<OsTag> {
        if cfg!(target_os = "windows") {
            Some(OsTag::Windows)
        } else if cfg!(target_os = "macos") {
            Some(OsTag::MacOs)
        } else if cfg!(unix) {
            Some(OsTag::Unix)
        } else {
            None
        }
    }

    /// Returns the octet delimiter used by the OS.
    pub fn delimiter(&self) -> char {
        match *self {
            OsTag::Unix | OsTag::MacOs => ':',
            OsTag::Windows => '-',
        }
    }
}

impl Display for OsTag {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let name = match *self {
            OsTag::Unix => "unix",
            OsTag::MacOs => "macos",
            OsTag::Windows => "windows",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OsTag {
    type Err = Error;

    /// Parses a case-insensitive OS tag.
    fn from_str(tag: &str) -> Result<OsTag, Error> {
        match tag.trim().to_lowercase().as_str() {
            "unix" => Ok(OsTag::Unix),
            "macos" => Ok(OsTag::MacOs),
            "windows" => Ok(OsTag::Windows),
            _ => Err(Error::UnsupportedOs(tag.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("UNIX".parse::<OsTag>().unwrap(), OsTag::Unix);
        assert_eq!("MacOS".parse::<OsTag>().unwrap(), OsTag::MacOs);
        assert_eq!("Windows".parse::<OsTag>().unwrap(), OsTag::Windows);
    }

    #[test]
    fn test_parse_unsupported() {
        assert_matches!("bogus".parse::<OsTag>(), Err(Error::UnsupportedOs(ref tag)) if tag == "bogus");
        assert_matches!("linux".parse::<OsTag>(), Err(Error::UnsupportedOs(_)));
    }

    #[test]
    fn test_display_round_trips() {
        for os in &[OsTag::Unix, OsTag::MacOs, OsTag::Windows] {
            assert_eq!(os.to_string().parse::<OsTag>().unwrap(), *os);
        }
    }
}
