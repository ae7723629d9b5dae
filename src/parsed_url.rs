//! The structural decomposition of an absolute URL.
//!
//! See [[RFC3986, Section 3](https://tools.ietf.org/html/rfc3986#section-3)].
//!
//! A [`ParsedUrl`] is immutable. Each `with_*` function consumes the value and returns it with a
//! single field replaced, or hands the very same value back when the replacement equals what is
//! already there. Fields borrow from the parsed string until a rule actually rewrites them, so a
//! URL that is already normalized passes through the pipeline without its fields being copied.

use std::borrow::Cow;
use std::convert::TryFrom;
use std::error::Error;
use std::fmt::{self, Display, Formatter, Write};

use crate::authority::{parse_authority, InvalidAuthority};
use crate::fragment::{parse_fragment, InvalidFragment};
use crate::path::{parse_path, InvalidPath};
use crate::query::{parse_query, InvalidQuery};
use crate::scheme::{parse_scheme, InvalidScheme};

/// An absolute URL split into its seven fields.
///
/// None of the fields contain the delimiters that separate them (`":"`, `"//"`, `"@"`, `"?"`,
/// `"#"`); those are only added back by [`Display`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ParsedUrl<'url> {
    /// The scheme, e.g. `"http"`, without the trailing `':'`.
    protocol: Cow<'url, str>,

    /// Everything before the `'@'` of the authority, if there was one.
    user_info: Option<Cow<'url, str>>,

    /// The host. Present exactly when the URL has an authority, though it may be empty (as in
    /// `"file:///etc/hosts"`).
    host: Option<Cow<'url, str>>,

    port: Option<u16>,

    /// The path, possibly empty.
    path: Cow<'url, str>,

    /// Everything after the `'?'`, if there was one.
    query: Option<Cow<'url, str>>,

    /// Everything after the `'#'`, if there was one.
    fragment: Option<Cow<'url, str>>,
}

impl<'url> ParsedUrl<'url> {
    /// Parses an absolute URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_normalize::ParsedUrl;
    ///
    /// let url = ParsedUrl::parse("HTTP://user@Example.COM:8080/a/./b?q=1#top").unwrap();
    /// assert_eq!(url.protocol(), "HTTP");
    /// assert_eq!(url.user_info(), Some("user"));
    /// assert_eq!(url.host(), Some("Example.COM"));
    /// assert_eq!(url.port(), Some(8080));
    /// assert_eq!(url.path(), "/a/./b");
    /// assert_eq!(url.query(), Some("q=1"));
    /// assert_eq!(url.fragment(), Some("top"));
    ///
    /// assert!(ParsedUrl::parse("/relative/reference").is_err());
    /// ```
    pub fn parse(value: &'url str) -> Result<Self, InvalidUrl> {
        let (protocol, value) = parse_scheme(value)?;

        let (authority, value) = match value.strip_prefix("//") {
            Some(value) => {
                let (authority, value) = parse_authority(value)?;
                (Some(authority), value)
            }
            None => (None, value),
        };

        let (path, value) = parse_path(value)?;

        let (query, value) = match value.strip_prefix('?') {
            Some(value) => {
                let (query, value) = parse_query(value)?;
                (Some(query), value)
            }
            None => (None, value),
        };

        let fragment = match value.strip_prefix('#') {
            Some(value) => Some(parse_fragment(value)?),
            None => None,
        };

        Ok(ParsedUrl {
            protocol: Cow::from(protocol),
            user_info: authority
                .and_then(|authority| authority.user_info)
                .map(Cow::from),
            host: authority.map(|authority| Cow::from(authority.host)),
            port: authority.and_then(|authority| authority.port),
            path: Cow::from(path),
            query: query.map(Cow::from),
            fragment: fragment.map(Cow::from),
        })
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Detaches the value from the string it was parsed from.
    pub fn into_owned(self) -> ParsedUrl<'static> {
        fn owned(value: Cow<str>) -> Cow<'static, str> {
            Cow::Owned(value.into_owned())
        }

        ParsedUrl {
            protocol: owned(self.protocol),
            user_info: self.user_info.map(owned),
            host: self.host.map(owned),
            port: self.port,
            path: owned(self.path),
            query: self.query.map(owned),
            fragment: self.fragment.map(owned),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Reassembles the URL from its fields. Equivalent to `to_string()`.
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Applies `transform` to the protocol and path, and to the user info, host, query and
    /// fragment when they are present. Absent fields stay absent and the port is untouched.
    ///
    /// The first error returned by `transform` aborts the whole transformation.
    ///
    /// ```
    /// use std::convert::Infallible;
    ///
    /// use url_normalize::ParsedUrl;
    ///
    /// let url = ParsedUrl::parse("http://example.com/a?b").unwrap();
    /// let url = url
    ///     .transform_fields(|field| Ok::<_, Infallible>(field.to_uppercase()))
    ///     .unwrap();
    /// assert_eq!(url.to_string(), "HTTP://EXAMPLE.COM/A?B");
    /// ```
    pub fn transform_fields<F, E>(self, mut transform: F) -> Result<Self, E>
    where
        F: FnMut(&str) -> Result<String, E>,
    {
        let protocol = transform(&self.protocol)?;
        let user_info = self.user_info.as_deref().map(&mut transform).transpose()?;
        let host = self.host.as_deref().map(&mut transform).transpose()?;
        let path = transform(&self.path)?;
        let query = self.query.as_deref().map(&mut transform).transpose()?;
        let fragment = self.fragment.as_deref().map(&mut transform).transpose()?;

        Ok(self
            .with_protocol(protocol)
            .with_user_info(user_info.map(Cow::from))
            .with_host(host.map(Cow::from))
            .with_path(path)
            .with_query(query.map(Cow::from))
            .with_fragment(fragment.map(Cow::from)))
    }

    pub fn user_info(&self) -> Option<&str> {
        self.user_info.as_deref()
    }

    pub fn with_fragment(self, fragment: Option<Cow<'url, str>>) -> Self {
        if self.fragment == fragment {
            self
        } else {
            ParsedUrl { fragment, ..self }
        }
    }

    pub fn with_host(self, host: Option<Cow<'url, str>>) -> Self {
        if self.host == host {
            self
        } else {
            ParsedUrl { host, ..self }
        }
    }

    pub fn with_path<PathType>(self, path: PathType) -> Self
    where
        PathType: Into<Cow<'url, str>>,
    {
        let path = path.into();

        if self.path == path {
            self
        } else {
            ParsedUrl { path, ..self }
        }
    }

    pub fn with_port(self, port: Option<u16>) -> Self {
        if self.port == port {
            self
        } else {
            ParsedUrl { port, ..self }
        }
    }

    pub fn with_protocol<ProtocolType>(self, protocol: ProtocolType) -> Self
    where
        ProtocolType: Into<Cow<'url, str>>,
    {
        let protocol = protocol.into();

        if self.protocol == protocol {
            self
        } else {
            ParsedUrl { protocol, ..self }
        }
    }

    pub fn with_query(self, query: Option<Cow<'url, str>>) -> Self {
        if self.query == query {
            self
        } else {
            ParsedUrl { query, ..self }
        }
    }

    pub fn with_user_info(self, user_info: Option<Cow<'url, str>>) -> Self {
        if self.user_info == user_info {
            self
        } else {
            ParsedUrl { user_info, ..self }
        }
    }
}

impl<'url> Display for ParsedUrl<'url> {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str(&self.protocol)?;
        formatter.write_char(':')?;

        match self.host {
            Some(ref host) => {
                formatter.write_str("//")?;

                if let Some(ref user_info) = self.user_info {
                    formatter.write_str(user_info)?;
                    formatter.write_char('@')?;
                }

                formatter.write_str(host)?;

                if let Some(port) = self.port {
                    write!(formatter, ":{}", port)?;
                }
            }
            // Without an authority, a path starting with "//" would be read back as one.
            // See [[RFC3986, Section 5.3](https://tools.ietf.org/html/rfc3986#section-5.3)].
            None if self.path.starts_with("//") => formatter.write_str("/.")?,
            None => (),
        }

        formatter.write_str(&self.path)?;

        if let Some(ref query) = self.query {
            formatter.write_char('?')?;
            formatter.write_str(query)?;
        }

        if let Some(ref fragment) = self.fragment {
            formatter.write_char('#')?;
            formatter.write_str(fragment)?;
        }

        Ok(())
    }
}

impl<'url> From<ParsedUrl<'url>> for String {
    fn from(value: ParsedUrl<'url>) -> Self {
        value.to_string()
    }
}

impl<'url> TryFrom<&'url str> for ParsedUrl<'url> {
    type Error = InvalidUrl;

    fn try_from(value: &'url str) -> Result<Self, Self::Error> {
        ParsedUrl::parse(value)
    }
}

/// An error representing a string that is not a valid absolute URL.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum InvalidUrl {
    /// The authority component of the URL was invalid.
    InvalidAuthority(InvalidAuthority),

    /// The fragment component of the URL was invalid.
    InvalidFragment(InvalidFragment),

    /// The path component of the URL was invalid.
    InvalidPath(InvalidPath),

    /// A percent-encoded triplet whose digits are not hexadecimal reached the normalization
    /// rules.
    ///
    /// The parser reports these against the offending component, so this only occurs for field
    /// values supplied through the `with_*` functions.
    InvalidPercentEncoding,

    /// The query component of the URL was invalid.
    InvalidQuery(InvalidQuery),

    /// The scheme component of the URL was invalid or missing.
    InvalidScheme(InvalidScheme),
}

impl Display for InvalidUrl {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        use self::InvalidUrl::*;

        match self {
            InvalidAuthority(invalid_authority) => invalid_authority.fmt(formatter),
            InvalidFragment(invalid_fragment) => invalid_fragment.fmt(formatter),
            InvalidPath(invalid_path) => invalid_path.fmt(formatter),
            InvalidPercentEncoding => formatter.write_str("invalid percent encoding"),
            InvalidQuery(invalid_query) => invalid_query.fmt(formatter),
            InvalidScheme(invalid_scheme) => invalid_scheme.fmt(formatter),
        }
    }
}

impl Error for InvalidUrl {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use self::InvalidUrl::*;

        match self {
            InvalidAuthority(invalid_authority) => Some(invalid_authority),
            InvalidFragment(invalid_fragment) => Some(invalid_fragment),
            InvalidPath(invalid_path) => Some(invalid_path),
            InvalidPercentEncoding => None,
            InvalidQuery(invalid_query) => Some(invalid_query),
            InvalidScheme(invalid_scheme) => Some(invalid_scheme),
        }
    }
}

impl From<InvalidAuthority> for InvalidUrl {
    fn from(value: InvalidAuthority) -> Self {
        InvalidUrl::InvalidAuthority(value)
    }
}

impl From<InvalidFragment> for InvalidUrl {
    fn from(value: InvalidFragment) -> Self {
        InvalidUrl::InvalidFragment(value)
    }
}

impl From<InvalidPath> for InvalidUrl {
    fn from(value: InvalidPath) -> Self {
        InvalidUrl::InvalidPath(value)
    }
}

impl From<InvalidQuery> for InvalidUrl {
    fn from(value: InvalidQuery) -> Self {
        InvalidUrl::InvalidQuery(value)
    }
}

impl From<InvalidScheme> for InvalidUrl {
    fn from(value: InvalidScheme) -> Self {
        InvalidUrl::InvalidScheme(value)
    }
}
