//! Fragment Component
//!
//! See [[RFC3986, Section 3.5](https://tools.ietf.org/html/rfc3986#section-3.5)].

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::utility::{check_component, InvalidComponent};

#[rustfmt::skip]
const FRAGMENT_CHAR_MAP: [u8; 256] = [
 // 0     1     2     3     4     5     6     7     8     9     A     B     C     D     E     F
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 0
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 1
    0, b'!',    0,    0, b'$', b'%', b'&',b'\'', b'(', b')', b'*', b'+', b',', b'-', b'.', b'/', // 2
 b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b':', b';',    0, b'=',    0, b'?', // 3
 b'@', b'A', b'B', b'C', b'D', b'E', b'F', b'G', b'H', b'I', b'J', b'K', b'L', b'M', b'N', b'O', // 4
 b'P', b'Q', b'R', b'S', b'T', b'U', b'V', b'W', b'X', b'Y', b'Z',    0,    0,    0,    0, b'_', // 5
    0, b'a', b'b', b'c', b'd', b'e', b'f', b'g', b'h', b'i', b'j', b'k', b'l', b'm', b'n', b'o', // 6
 b'p', b'q', b'r', b's', b't', b'u', b'v', b'w', b'x', b'y', b'z',    0,    0,    0, b'~',    0, // 7
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 8
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 9
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // A
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // B
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // C
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // D
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // E
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // F
];

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum InvalidFragment {
    InvalidCharacter,
    InvalidPercentEncoding,
}

impl Display for InvalidFragment {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        use self::InvalidFragment::*;

        formatter.write_str(match self {
            InvalidCharacter => "invalid fragment character",
            InvalidPercentEncoding => "invalid fragment percent encoding",
        })
    }
}

impl Error for InvalidFragment {}

impl From<InvalidComponent> for InvalidFragment {
    fn from(value: InvalidComponent) -> Self {
        match value {
            InvalidComponent::InvalidCharacter => InvalidFragment::InvalidCharacter,
            InvalidComponent::InvalidPercentEncoding => InvalidFragment::InvalidPercentEncoding,
        }
    }
}

/// Validates a fragment, which must already have had its leading `'#'` removed. The fragment
/// runs to the end of the URL.
pub(crate) fn parse_fragment(value: &str) -> Result<&str, InvalidFragment> {
    check_component(value.as_bytes(), &FRAGMENT_CHAR_MAP)?;
    Ok(value)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_fragment() {
        assert_eq!(parse_fragment(""), Ok(""));
        assert_eq!(parse_fragment("section-2/?x"), Ok("section-2/?x"));
        assert_eq!(parse_fragment("a%7Eb"), Ok("a%7Eb"));
    }

    #[test]
    fn test_parse_fragment_error() {
        assert_eq!(parse_fragment("a#b"), Err(InvalidFragment::InvalidCharacter));
        assert_eq!(parse_fragment("%%41"), Err(InvalidFragment::InvalidPercentEncoding));
    }
}
