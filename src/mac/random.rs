//! Sources of randomness for MAC address generation.

use std::collections::VecDeque;

use rand::{
    self,
    Rng,
    ThreadRng,
};

use mac::{
    MacAddress,
    OsTag,
};
use {
    Error,
    Result,
};

pub const LOWER_HEX: &[u8] = b"0123456789abcdef";
pub const UPPER_HEX: &[u8] = b"0123456789ABCDEF";
pub const LOWER_EVEN_HEX: &[u8] = b"02468ace";
pub const UPPER_EVEN_HEX: &[u8] = b"02468ACE";

/// A source of hex digits.
pub trait HexSource {
    /// Returns one digit chosen from a non-empty alphabet.
    fn pick(&mut self, alphabet: &[u8]) -> Result<u8>;
}

/// Picks digits uniformly with the thread local generator.
pub struct ThreadHex {
    rng: ThreadRng,
}

impl ThreadHex {
    pub fn new() -> ThreadHex {
        ThreadHex {
            rng: rand::thread_rng(),
        }
    }
}

impl HexSource for ThreadHex {
    fn pick(&mut self, alphabet: &[u8]) -> Result<u8> {
        Ok(alphabet[self.rng.gen_range(0, alphabet.len())])
    }
}

/// Replays a fixed sequence of digits, for deterministic generation.
///
/// Each scripted digit must belong to the alphabet it is picked from, so a
/// script cannot produce an address the generator would never produce.
#[derive(Clone, Debug)]
pub struct ScriptedHex {
    digits: VecDeque<u8>,
}

impl ScriptedHex {
    pub fn new(digits: &str) -> ScriptedHex {
        ScriptedHex {
            digits: digits.bytes().collect(),
        }
    }
}

impl HexSource for ScriptedHex {
    fn pick(&mut self, alphabet: &[u8]) -> Result<u8> {
        let digit = self
            .digits
            .pop_front()
            .ok_or_else(|| Error::Malformed(String::from("hex script exhausted")))?;

        if !alphabet.contains(&digit) {
            return Err(Error::Malformed(format!(
                "scripted digit {:?} outside {}",
                digit as char,
                String::from_utf8_lossy(alphabet)
            )));
        }

        Ok(digit)
    }
}

/// Generates a random unicast MAC address.
///
/// Eleven digits are drawn from the full hex alphabet, then the second digit
/// is drawn from the even digits and inserted at position one. Digit case
/// follows the OS notation.
pub fn random_mac<H: HexSource>(hex: &mut H, os: OsTag) -> Result<MacAddress> {
    let (alphabet, even) = match os {
        OsTag::Unix | OsTag::MacOs => (LOWER_HEX, LOWER_EVEN_HEX),
        OsTag::Windows => (UPPER_HEX, UPPER_EVEN_HEX),
    };

    let mut digits = (0..11)
        .map(|_| hex.pick(alphabet))
        .collect::<Result<Vec<u8>>>()?;
    let second = hex.pick(even)?;
    digits.insert(1, second);

    MacAddress::from_hex_digits(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_unix() {
        let mut hex = ScriptedHex::new("abcdef123452");
        let mac = random_mac(&mut hex, OsTag::Unix).unwrap();
        assert_eq!(mac.display(OsTag::Unix).to_string(), "a2:bc:de:f1:23:45");
    }

    #[test]
    fn test_scripted_windows() {
        let mut hex = ScriptedHex::new("ABCDEF123452");
        let mac = random_mac(&mut hex, OsTag::Windows).unwrap();
        assert_eq!(mac.display(OsTag::Windows).to_string(), "A2-BC-DE-F1-23-45");
    }

    #[test]
    fn test_scripted_rejects_odd_second_digit() {
        let mut hex = ScriptedHex::new("abcdef123453");
        assert_matches!(random_mac(&mut hex, OsTag::Unix), Err(Error::Malformed(_)));
    }

    #[test]
    fn test_scripted_rejects_wrong_case() {
        let mut hex = ScriptedHex::new("ABCDEF123452");
        assert_matches!(random_mac(&mut hex, OsTag::Unix), Err(Error::Malformed(_)));
    }

    #[test]
    fn test_scripted_exhausted() {
        let mut hex = ScriptedHex::new("abc");
        assert_matches!(random_mac(&mut hex, OsTag::MacOs), Err(Error::Malformed(ref msg)) if msg.contains("exhausted"));
    }

    #[test]
    fn test_random_is_unicast() {
        let mut hex = ThreadHex::new();
        for _ in 0..256 {
            let mac = random_mac(&mut hex, OsTag::Unix).unwrap();
            assert!(mac.is_unicast());
            assert_eq!(mac.as_bytes()[0] & 0x01, 0);
            let text = mac.display(OsTag::Unix).to_string();
            assert_eq!(text.len(), 17);
            assert!(LOWER_EVEN_HEX.contains(&text.as_bytes()[1]));
        }
    }
}
