//! Path Component
//!
//! See [[RFC3986, Section 3.3](https://tools.ietf.org/html/rfc3986#section-3.3)].

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::utility::{check_component, InvalidComponent};

/// A map of byte characters that determines if a character is a valid path character.
#[rustfmt::skip]
const PATH_CHAR_MAP: [u8; 256] = [
 // 0     1     2     3     4     5     6     7     8     9     A     B     C     D     E     F
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 0
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 1
    0, b'!',    0,    0, b'$', b'%', b'&',b'\'', b'(', b')', b'*', b'+', b',', b'-', b'.', b'/', // 2
 b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b':', b';',    0, b'=',    0,    0, // 3
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
pub enum InvalidPath {
    InvalidCharacter,
    InvalidPercentEncoding,
}

impl Display for InvalidPath {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        use self::InvalidPath::*;

        formatter.write_str(match self {
            InvalidCharacter => "invalid path character",
            InvalidPercentEncoding => "invalid path percent encoding",
        })
    }
}

impl Error for InvalidPath {}

impl From<InvalidComponent> for InvalidPath {
    fn from(value: InvalidComponent) -> Self {
        match value {
            InvalidComponent::InvalidCharacter => InvalidPath::InvalidCharacter,
            InvalidComponent::InvalidPercentEncoding => InvalidPath::InvalidPercentEncoding,
        }
    }
}

/// Splits the path off the front of `value`. The path ends at the first `'?'` or `'#'`, which is
/// left at the start of the returned rest.
///
/// Unlike the other components, the path is always present, though it may be empty.
pub(crate) fn parse_path(value: &str) -> Result<(&str, &str), InvalidPath> {
    let end_index = value
        .bytes()
        .position(|byte| byte == b'?' || byte == b'#')
        .unwrap_or(value.len());
    let (path, rest) = value.split_at(end_index);
    check_component(path.as_bytes(), &PATH_CHAR_MAP)?;
    Ok((path, rest))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_path() {
        assert_eq!(parse_path(""), Ok(("", "")));
        assert_eq!(parse_path("/"), Ok(("/", "")));
        assert_eq!(parse_path("/a/b;c=d/@:!"), Ok(("/a/b;c=d/@:!", "")));
        assert_eq!(parse_path("/foo?bar#baz"), Ok(("/foo", "?bar#baz")));
        assert_eq!(parse_path("/foo#bar?baz"), Ok(("/foo", "#bar?baz")));
        assert_eq!(parse_path("rootless/path"), Ok(("rootless/path", "")));
    }

    #[test]
    fn test_parse_path_percent_encoding() {
        assert_eq!(parse_path("/%7efoo%2A"), Ok(("/%7efoo%2A", "")));
        assert_eq!(parse_path("/foo%2?q"), Ok(("/foo%2", "?q")));
        assert_eq!(parse_path("/foo%"), Ok(("/foo%", "")));
        assert_eq!(
            parse_path("/foo%zzbar"),
            Err(InvalidPath::InvalidPercentEncoding)
        );
    }

    #[test]
    fn test_parse_path_error() {
        assert_eq!(parse_path("/foo bar"), Err(InvalidPath::InvalidCharacter));
        assert_eq!(parse_path("/foo[1]"), Err(InvalidPath::InvalidCharacter));
        assert_eq!(parse_path("/caf\u{e9}"), Err(InvalidPath::InvalidCharacter));
    }
}
