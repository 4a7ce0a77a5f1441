//! 32-byte ledger identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Failure to parse a hex identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier has {0} hex digits, at most 64 allowed")]
    TooLong(usize),

    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
}

fn parse_hex32(s: &str) -> Result<[u8; 32], IdParseError> {
    let hex = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if hex.is_empty() {
        return Err(IdParseError::Empty);
    }
    if hex.len() > 64 {
        return Err(IdParseError::TooLong(hex.len()));
    }

    // Short forms such as `0x2` are left-padded with zeros.
    let mut nibbles = [0u8; 64];
    let offset = 64 - hex.len();
    for (i, c) in hex.chars().enumerate() {
        nibbles[offset + i] = c.to_digit(16).ok_or(IdParseError::InvalidDigit(c))? as u8;
    }

    let mut bytes = [0u8; 32];
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = (nibbles[2 * i] << 4) | nibbles[2 * i + 1];
    }
    Ok(bytes)
}

macro_rules! hex_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name([u8; 32]);

        impl $name {
            /// Identifier whose trailing eight bytes hold `n`.
            pub fn from_low_u64(n: u64) -> Self {
                let mut bytes = [0u8; 32];
                bytes[24..].copy_from_slice(&n.to_be_bytes());
                Self(bytes)
            }

            pub fn zero() -> Self {
                Self([0u8; 32])
            }

            pub fn to_hex(&self) -> String {
                let mut out = String::with_capacity(66);
                out.push_str("0x");
                for b in self.0 {
                    out.push_str(&format!("{:02x}", b));
                }
                out
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_hex32(s).map(Self)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdParseError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.to_hex()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }
    };
}

hex_id!(
    /// Ledger object identifier.
    ObjectId
);

hex_id!(
    /// Account address. Profiles are keyed by it.
    Address
);

impl Address {
    /// Abbreviated form used when an author has no username, e.g. `0x1234...abcd`.
    pub fn short(&self) -> String {
        let hex = self.to_hex();
        format!("{}...{}", &hex[..6], &hex[hex.len() - 4..])
    }
}

// Post ids are passed to move calls as addresses.
impl From<ObjectId> for Address {
    fn from(id: ObjectId) -> Self {
        Self(id.0)
    }
}

impl From<Address> for ObjectId {
    fn from(addr: Address) -> Self {
        Self(addr.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_form_is_left_padded() {
        let id: ObjectId = "0x2".parse().unwrap();
        assert_eq!(id, ObjectId::from_low_u64(2));
        assert_eq!(
            id.to_hex(),
            "0x0000000000000000000000000000000000000000000000000000000000000002"
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!("0x".parse::<ObjectId>(), Err(IdParseError::Empty));
        assert_eq!("0xzz".parse::<Address>(), Err(IdParseError::InvalidDigit('z')));
        let long = format!("0x{}", "1".repeat(65));
        assert_eq!(long.parse::<Address>(), Err(IdParseError::TooLong(65)));
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let addr = Address::from_low_u64(0xabcd);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(
            json,
            "\"0x000000000000000000000000000000000000000000000000000000000000abcd\""
        );
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
        assert!(serde_json::from_str::<Address>("\"nope\"").is_err());
    }

    #[test]
    fn test_short_address() {
        let addr: Address = format!("0x1234{}abcd", "0".repeat(56)).parse().unwrap();
        assert_eq!(addr.short(), "0x1234...abcd");
        assert_eq!(Address::from_low_u64(0xabcd).short(), "0x0000...abcd");
    }
}
