//! Authority Component
//!
//! See [[RFC3986, Section 3.2](https://tools.ietf.org/html/rfc3986#section-3.2)].

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::net::Ipv6Addr;

use crate::utility::{check_component, InvalidComponent};

#[rustfmt::skip]
const REGISTERED_NAME_CHAR_MAP: [u8; 256] = [
 // 0     1     2     3     4     5     6     7     8     9     A     B     C     D     E     F
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 0
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 1
    0, b'!',    0,    0, b'$', b'%', b'&',b'\'', b'(', b')', b'*', b'+', b',', b'-', b'.',    0, // 2
 b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9',    0, b';',    0, b'=',    0,    0, // 3
    0, b'A', b'B', b'C', b'D', b'E', b'F', b'G', b'H', b'I', b'J', b'K', b'L', b'M', b'N', b'O', // 4
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

#[rustfmt::skip]
const IPV_FUTURE_CHAR_MAP: [u8; 256] = [
 // 0     1     2     3     4     5     6     7     8     9     A     B     C     D     E     F
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 0
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 1
    0, b'!',    0,    0, b'$',    0, b'&',b'\'', b'(', b')', b'*', b'+', b',', b'-', b'.',    0, // 2
 b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b':', b';',    0, b'=',    0,    0, // 3
    0, b'A', b'B', b'C', b'D', b'E', b'F', b'G', b'H', b'I', b'J', b'K', b'L', b'M', b'N', b'O', // 4
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

#[rustfmt::skip]
const USER_INFO_CHAR_MAP: [u8; 256] = [
 // 0     1     2     3     4     5     6     7     8     9     A     B     C     D     E     F
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 0
    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0,    0, // 1
    0, b'!',    0,    0, b'$', b'%', b'&',b'\'', b'(', b')', b'*', b'+', b',', b'-', b'.',    0, // 2
 b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b':', b';',    0, b'=',    0,    0, // 3
    0, b'A', b'B', b'C', b'D', b'E', b'F', b'G', b'H', b'I', b'J', b'K', b'L', b'M', b'N', b'O', // 4
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

/// The pieces of an authority, borrowed from the URL being parsed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Authority<'authority> {
    pub(crate) user_info: Option<&'authority str>,
    pub(crate) host: &'authority str,
    pub(crate) port: Option<u16>,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum InvalidAuthority {
    InvalidHost(InvalidHost),
    InvalidPort(InvalidPort),
    InvalidUserInfo(InvalidUserInfo),
}

impl Display for InvalidAuthority {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        use self::InvalidAuthority::*;

        match self {
            InvalidHost(invalid_host) => invalid_host.fmt(formatter),
            InvalidPort(invalid_port) => invalid_port.fmt(formatter),
            InvalidUserInfo(invalid_user_info) => invalid_user_info.fmt(formatter),
        }
    }
}

impl Error for InvalidAuthority {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use self::InvalidAuthority::*;

        match self {
            InvalidHost(invalid_host) => Some(invalid_host),
            InvalidPort(invalid_port) => Some(invalid_port),
            InvalidUserInfo(invalid_user_info) => Some(invalid_user_info),
        }
    }
}

impl From<InvalidHost> for InvalidAuthority {
    fn from(value: InvalidHost) -> Self {
        InvalidAuthority::InvalidHost(value)
    }
}

impl From<InvalidPort> for InvalidAuthority {
    fn from(value: InvalidPort) -> Self {
        InvalidAuthority::InvalidPort(value)
    }
}

impl From<InvalidUserInfo> for InvalidAuthority {
    fn from(value: InvalidUserInfo) -> Self {
        InvalidAuthority::InvalidUserInfo(value)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum InvalidHost {
    AddressMechanismNotSupported,
    InvalidIPv4OrRegisteredNameCharacter,
    InvalidIPv6,
    InvalidIPv6Character,
    InvalidIPvFutureCharacter,
}

impl Display for InvalidHost {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        use self::InvalidHost::*;

        formatter.write_str(match self {
            AddressMechanismNotSupported => "address mechanism not supported",
            InvalidIPv4OrRegisteredNameCharacter => "invalid IPv4 or registered name character",
            InvalidIPv6 => "invalid IPv6",
            InvalidIPv6Character => "invalid IPv6 character",
            InvalidIPvFutureCharacter => "invalid IPvFuture character",
        })
    }
}

impl Error for InvalidHost {}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum InvalidPort {
    InvalidCharacter,
    Overflow,
}

impl Display for InvalidPort {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        use self::InvalidPort::*;

        formatter.write_str(match self {
            InvalidCharacter => "invalid port character",
            Overflow => "port overflow",
        })
    }
}

impl Error for InvalidPort {}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum InvalidUserInfo {
    InvalidCharacter,
    InvalidPercentEncoding,
}

impl Display for InvalidUserInfo {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        use self::InvalidUserInfo::*;

        formatter.write_str(match self {
            InvalidCharacter => "invalid user info character",
            InvalidPercentEncoding => "invalid user info percent encoding",
        })
    }
}

impl Error for InvalidUserInfo {}

impl From<InvalidComponent> for InvalidUserInfo {
    fn from(value: InvalidComponent) -> Self {
        match value {
            InvalidComponent::InvalidCharacter => InvalidUserInfo::InvalidCharacter,
            InvalidComponent::InvalidPercentEncoding => InvalidUserInfo::InvalidPercentEncoding,
        }
    }
}

fn check_host(value: &str) -> Result<(), InvalidHost> {
    let bytes = value.as_bytes();

    match (bytes.first(), bytes.last()) {
        (Some(b'['), Some(b']')) if bytes.len() >= 2 => {
            let literal = &bytes[1..bytes.len() - 1];

            match literal {
                [prefix, version, ..]
                    if prefix.to_ascii_lowercase() == b'v' && version.is_ascii_hexdigit() =>
                {
                    if check_ipvfuture(&literal[1..]) {
                        Err(InvalidHost::AddressMechanismNotSupported)
                    } else {
                        Err(InvalidHost::InvalidIPvFutureCharacter)
                    }
                }
                _ => {
                    if !check_ipv6(literal) {
                        return Err(InvalidHost::InvalidIPv6Character);
                    }

                    value[1..value.len() - 1]
                        .parse::<Ipv6Addr>()
                        .map(|_| ())
                        .map_err(|_| InvalidHost::InvalidIPv6)
                }
            }
        }
        _ => check_component(bytes, &REGISTERED_NAME_CHAR_MAP)
            .map_err(|_| InvalidHost::InvalidIPv4OrRegisteredNameCharacter),
    }
}

fn check_ipv6(value: &[u8]) -> bool {
    value
        .iter()
        .all(|&byte| byte.is_ascii_hexdigit() || byte == b':' || byte == b'.')
}

/// Checks everything after the `'v'` of an IPvFuture literal: one or more hex digits, a `'.'`,
/// then at least one unreserved, sub-delim or `':'` character.
fn check_ipvfuture(value: &[u8]) -> bool {
    let version_length = value
        .iter()
        .take_while(|byte| byte.is_ascii_hexdigit())
        .count();

    match value[version_length..].split_first() {
        Some((b'.', rest)) if version_length > 0 && !rest.is_empty() => rest
            .iter()
            .all(|&byte| IPV_FUTURE_CHAR_MAP[byte as usize] != 0),
        _ => false,
    }
}

/// Splits the authority off the front of `value`, which must already have had its leading `"//"`
/// removed. The authority ends at the first `'/'`, `'?'` or `'#'`.
pub(crate) fn parse_authority(value: &str) -> Result<(Authority, &str), InvalidAuthority> {
    let mut at_index = None;
    let mut last_colon_index = None;
    let mut end_index = value.len();

    for (index, byte) in value.bytes().enumerate() {
        match byte {
            b'@' => {
                if at_index.is_none() {
                    at_index = Some(index);
                    last_colon_index = None;
                }
            }
            b':' => last_colon_index = Some(index),
            b']' => last_colon_index = None,
            b'/' | b'?' | b'#' => {
                end_index = index;
                break;
            }
            _ => (),
        }
    }

    let (value, rest) = value.split_at(end_index);
    let (user_info, host_start_index) = match at_index {
        Some(index) => {
            let user_info = &value[..index];
            check_component(user_info.as_bytes(), &USER_INFO_CHAR_MAP)
                .map_err(InvalidUserInfo::from)?;
            (Some(user_info), index + 1)
        }
        None => (None, 0),
    };

    let (host, port) = match last_colon_index {
        Some(index) => (&value[host_start_index..index], parse_port(&value[index + 1..])?),
        None => (&value[host_start_index..], None),
    };

    check_host(host)?;

    let authority = Authority {
        user_info,
        host,
        port,
    };

    Ok((authority, rest))
}

fn parse_port(value: &str) -> Result<Option<u16>, InvalidPort> {
    if value.is_empty() {
        Ok(None)
    } else {
        let mut port = 0u16;

        for byte in value.bytes() {
            if !byte.is_ascii_digit() {
                return Err(InvalidPort::InvalidCharacter);
            }

            port = port.checked_mul(10).ok_or(InvalidPort::Overflow)?;
            port = port
                .checked_add(u16::from(byte - b'0'))
                .ok_or(InvalidPort::Overflow)?;
        }

        Ok(Some(port))
    }
}
