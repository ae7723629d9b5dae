//! A single decoded URL character.
//!
//! See [[RFC3986, Section 2](https://tools.ietf.org/html/rfc3986#section-2)].

use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Display, Formatter, Write};

/// One character position of a URL after percent-decoding.
///
/// Both `"a"` and `"%61"` describe the octet `0x61`. An octet knows whether it may appear
/// literally in a URL (it is an unreserved character) or whether it must stay percent-encoded.
///
/// The [`Display`] implementation writes the canonical form of the octet: the literal character
/// if it is unreserved, the uppercase percent-encoded triplet otherwise.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Octet(u8);

impl Octet {
    /// Returns the raw byte value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns whether the octet is an unreserved character as defined in
    /// [[RFC3986, Section 2.3](https://tools.ietf.org/html/rfc3986#section-2.3)].
    ///
    /// ```
    /// use url_normalize::Octet;
    ///
    /// assert!(Octet::from(b'~').is_unreserved_character());
    /// assert!(Octet::from(b'q').is_unreserved_character());
    /// assert!(!Octet::from(b'/').is_unreserved_character());
    /// ```
    pub fn is_unreserved_character(self) -> bool {
        match self.0 {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => true,
            b'-' | b'.' | b'_' | b'~' => true,
            _ => false,
        }
    }

    /// Returns whether the octet must stay percent-encoded in a normalized URL.
    pub fn needs_encoding(self) -> bool {
        !self.is_unreserved_character()
    }

    /// Returns the percent-encoded form of the octet regardless of whether it needs encoding.
    ///
    /// ```
    /// use url_normalize::Octet;
    ///
    /// assert_eq!(Octet::from(0x0A).encoded_form(), "%0A");
    /// assert_eq!(Octet::from(b'~').encoded_form(), "%7E");
    /// ```
    pub fn encoded_form(self) -> String {
        format!("%{:02X}", self.0)
    }

    /// Returns the octet interpreted as a character regardless of whether it needs encoding.
    pub fn literal_char(self) -> char {
        char::from(self.0)
    }

    /// Returns how the octet should appear in a normalized URL, e.g. `"a"` or `"%20"`.
    pub fn canonical_form(self) -> String {
        self.to_string()
    }
}

impl Display for Octet {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        if self.needs_encoding() {
            write!(formatter, "%{:02X}", self.0)
        } else {
            formatter.write_char(self.literal_char())
        }
    }
}

impl From<u8> for Octet {
    fn from(value: u8) -> Self {
        Octet(value)
    }
}

impl From<Octet> for u8 {
    fn from(value: Octet) -> Self {
        value.0
    }
}

impl TryFrom<u32> for Octet {
    type Error = InvalidOctet;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u8::try_from(value).map(Octet).map_err(|_| InvalidOctet(value))
    }
}

impl TryFrom<char> for Octet {
    type Error = InvalidOctet;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Octet::try_from(u32::from(value))
    }
}

/// The code point given to [`Octet::try_from`] was above `0xFF`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct InvalidOctet(pub u32);

impl Display for InvalidOctet {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        write!(
            formatter,
            "octet must be between 0x00 and 0xFF, got {:#X}",
            self.0
        )
    }
}

impl Error for InvalidOctet {}
