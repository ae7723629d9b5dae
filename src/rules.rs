//! The individual semantics-preserving normalizations.
//!
//! See [[RFC3986, Section 6.2.2](https://tools.ietf.org/html/rfc3986#section-6.2.2)].
//!
//! Every rule is a pure function. The string rules operate on a single field at a time and are
//! applied to a whole URL through [`ParsedUrl::transform_fields`]; the others take and return a
//! [`ParsedUrl`]. [`Normalizer`](crate::Normalizer) runs them in the order they are listed here.
//! Dot-segment removal has to come after decoding, since `"%2E"` decodes to `"."`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::iter;

use fnv::FnvHasher;
use lazy_static::lazy_static;

use crate::octet::Octet;
use crate::parsed_url::ParsedUrl;
use crate::utility::{get_percent_encoded_value, map_triplets, InvalidTriplet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The port assumed by `http` when a URL does not name one.
pub const HTTP_DEFAULT_PORT: u16 = 80;

lazy_static! {
    static ref DEFAULT_PORTS: HashMap<&'static str, u16, BuildHasherDefault<FnvHasher>> = {
        let mut map = HashMap::with_capacity_and_hasher(5, Default::default());
        map.insert("ftp", 21);
        map.insert("http", HTTP_DEFAULT_PORT);
        map.insert("https", 443);
        map.insert("ws", 80);
        map.insert("wss", 443);
        map
    };
}

/// Which ports [`strip_default_port`] treats as redundant.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DefaultPortPolicy {
    /// Port 80 is removed whatever the scheme; no other port is.
    Port80,

    /// The registered default port of the URL's own scheme is removed (`ftp` 21, `http` 80,
    /// `https` 443, `ws` 80, `wss` 443). Ports of other schemes are kept.
    Registered,
}

impl Default for DefaultPortPolicy {
    fn default() -> Self {
        DefaultPortPolicy::Port80
    }
}

impl DefaultPortPolicy {
    /// Returns the port this policy considers implied for `scheme`, if any.
    ///
    /// The scheme is expected to be lowercase already.
    pub fn default_port(self, scheme: &str) -> Option<u16> {
        match self {
            DefaultPortPolicy::Port80 => Some(HTTP_DEFAULT_PORT),
            DefaultPortPolicy::Registered => DEFAULT_PORTS.get(scheme).cloned(),
        }
    }
}

/// Uppercases the two characters following every `'%'`.
///
/// [[RFC3986, Section 6.2.2.1](https://tools.ietf.org/html/rfc3986#section-6.2.2.1)]: the
/// hexadecimal digits within a percent-encoding triplet are case-insensitive and should be
/// normalized to uppercase.
///
/// ```
/// use url_normalize::rules::uppercase_percent_encoded_triplets;
///
/// assert_eq!(uppercase_percent_encoded_triplets("/a%2fb%7e").unwrap(), "/a%2Fb%7E");
/// assert!(uppercase_percent_encoded_triplets("/a%2").is_err());
/// ```
pub fn uppercase_percent_encoded_triplets(value: &str) -> Result<String, InvalidTriplet> {
    map_triplets(value, |first_digit, second_digit, output| {
        output.push('%');
        output.push(first_digit.to_ascii_uppercase());
        output.push(second_digit.to_ascii_uppercase());
        Ok(())
    })
}

/// Lowercases the scheme and the host, which are case-insensitive
/// ([[RFC3986, Section 6.2.2.1](https://tools.ietf.org/html/rfc3986#section-6.2.2.1)]).
pub fn lowercase_scheme_and_host(url: ParsedUrl) -> ParsedUrl {
    let protocol = url.protocol().to_ascii_lowercase();
    let host = url.host().map(str::to_ascii_lowercase);
    url.with_protocol(protocol).with_host(host.map(Cow::from))
}

/// Decodes every percent-encoded triplet that stands for an unreserved character, and rewrites
/// every other triplet in its canonical uppercase form.
///
/// [[RFC3986, Section 6.2.2.2](https://tools.ietf.org/html/rfc3986#section-6.2.2.2)].
///
/// ```
/// use url_normalize::rules::decode_unreserved_triplets;
///
/// assert_eq!(decode_unreserved_triplets("/%7efoo%2a").unwrap(), "/~foo%2A");
/// ```
pub fn decode_unreserved_triplets(value: &str) -> Result<String, InvalidTriplet> {
    map_triplets(value, |first_digit, second_digit, output| {
        let octet = Octet::from(get_percent_encoded_value(first_digit, second_digit)?);
        output.push_str(&octet.canonical_form());
        Ok(())
    })
}

/// Lowercases the host outside its percent-encoded triplets.
///
/// Decoding can leave uppercase letters in a host that [`lowercase_scheme_and_host`] already
/// handled (`"%41"` becomes `"A"`). Triplets still present are kept as they are so their hex
/// digits stay uppercase.
///
/// ```
/// use url_normalize::rules::lowercase_decoded_host;
/// use url_normalize::ParsedUrl;
///
/// let url = lowercase_decoded_host(ParsedUrl::parse("http://A%2FB/").unwrap());
/// assert_eq!(url.host(), Some("a%2Fb"));
/// ```
pub fn lowercase_decoded_host(url: ParsedUrl) -> ParsedUrl {
    let host = url.host().map(lowercase_outside_triplets);
    url.with_host(host.map(Cow::from))
}

fn lowercase_outside_triplets(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut digits_left = 0;

    for character in value.chars() {
        if digits_left > 0 {
            digits_left -= 1;
            output.push(character);
        } else if character == '%' {
            digits_left = 2;
            output.push(character);
        } else {
            output.push(character.to_ascii_lowercase());
        }
    }

    output
}

/// Collapses `"/."` and `"/.."` segments of a path.
///
/// The path is split before every `'/'`, so every segment but the first starts with one. A `"/."`
/// segment is dropped, a `"/.."` segment drops the segment before it (if any), and every other
/// segment is kept in its original order. Dots without a leading `'/'` are left alone.
///
/// ```
/// use url_normalize::rules::remove_dot_segments;
///
/// assert_eq!(remove_dot_segments("/foo/./bar/baz/../qux"), "/foo/bar/qux");
/// assert_eq!(remove_dot_segments("/../a"), "/a");
/// ```
pub fn remove_dot_segments(path: &str) -> String {
    let mut output = Vec::new();

    for segment in split_segments(path) {
        match segment {
            "/." => (),
            "/.." => {
                output.pop();
            }
            _ => output.push(segment),
        }
    }

    output.concat()
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let mut start = 0;

    path.match_indices('/')
        .map(|(index, _)| index)
        .filter(|&index| index != 0)
        .chain(iter::once(path.len()))
        .map(move |end| {
            let segment = &path[start..end];
            start = end;
            segment
        })
}

/// Replaces an empty path with `"/"`.
pub fn default_empty_path(url: ParsedUrl) -> ParsedUrl {
    if url.path().is_empty() {
        url.with_path("/")
    } else {
        url
    }
}

/// Removes the port when it is the one the scheme would use anyway, according to `policy`.
pub fn strip_default_port(url: ParsedUrl, policy: DefaultPortPolicy) -> ParsedUrl {
    match url.port() {
        Some(port) if policy.default_port(url.protocol()) == Some(port) => url.with_port(None),
        _ => url,
    }
}
