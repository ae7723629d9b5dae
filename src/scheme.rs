//! Scheme Component
//!
//! See [[RFC3986, Section 3.1](https://tools.ietf.org/html/rfc3986#section-3.1)].

use std::error::Error;
use std::fmt::{self, Display, Formatter};

#[rustfmt::skip]
const SCHEME_CHAR_MAP: [u8; 256] = [
 // 0     1     2     3     4     5     6     7     8     9     A     B     C     D     E     F
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 0
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 1
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, b'+',    0, b'-', b'.',    0, // 2
 b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9',    0,    0,    0,    0,    0,    0, // 3
    0, b'A', b'B', b'C', b'D', b'E', b'F', b'G', b'H', b'I', b'J', b'K', b'L', b'M', b'N', b'O', // 4
 b'P', b'Q', b'R', b'S', b'T', b'U', b'V', b'W', b'X', b'Y', b'Z',    0,    0,    0,    0,    0, // 5
    0, b'a', b'b', b'c', b'd', b'e', b'f', b'g', b'h', b'i', b'j', b'k', b'l', b'm', b'n', b'o', // 6
 b'p', b'q', b'r', b's', b't', b'u', b'v', b'w', b'x', b'y', b'z',    0,    0,    0,    0,    0, // 7
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
pub enum InvalidScheme {
    CannotBeEmpty,
    ExpectedColon,
    InvalidCharacter,
    MustStartWithAlphabetic,
}

impl Display for InvalidScheme {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        use self::InvalidScheme::*;

        formatter.write_str(match self {
            CannotBeEmpty => "scheme cannot be empty",
            ExpectedColon => "expected colon after scheme",
            InvalidCharacter => "invalid scheme character",
            MustStartWithAlphabetic => "scheme must start with alphabetic character",
        })
    }
}

impl Error for InvalidScheme {}

/// Splits the scheme off the front of `value`, returning it along with everything after the
/// `':'` that terminates it.
pub(crate) fn parse_scheme(value: &str) -> Result<(&str, &str), InvalidScheme> {
    let mut bytes = value.bytes();

    match bytes.next() {
        None | Some(b':') => return Err(InvalidScheme::CannotBeEmpty),
        Some(byte) if !byte.is_ascii_alphabetic() => {
            return Err(InvalidScheme::MustStartWithAlphabetic)
        }
        _ => (),
    }

    let mut end_index = 1;

    loop {
        match bytes.next() {
            Some(b':') => break,
            Some(byte) if SCHEME_CHAR_MAP[byte as usize] != 0 => end_index += 1,
            Some(_) => return Err(InvalidScheme::InvalidCharacter),
            None => return Err(InvalidScheme::ExpectedColon),
        }
    }

    Ok((&value[..end_index], &value[end_index + 1..]))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_scheme() {
        assert_eq!(parse_scheme("http://example.com"), Ok(("http", "//example.com")));
        assert_eq!(parse_scheme("HTTP:"), Ok(("HTTP", "")));
        assert_eq!(parse_scheme("coap+tcp:x"), Ok(("coap+tcp", "x")));
        assert_eq!(parse_scheme("a1.b-c:"), Ok(("a1.b-c", "")));
    }

    #[test]
    fn test_parse_scheme_error() {
        assert_eq!(parse_scheme(""), Err(InvalidScheme::CannotBeEmpty));
        assert_eq!(parse_scheme(":foo"), Err(InvalidScheme::CannotBeEmpty));
        assert_eq!(
            parse_scheme("1http:"),
            Err(InvalidScheme::MustStartWithAlphabetic)
        );
        assert_eq!(
            parse_scheme("example.com/foo"),
            Err(InvalidScheme::InvalidCharacter)
        );
        assert_eq!(parse_scheme("http"), Err(InvalidScheme::ExpectedColon));
    }
}
