//! The normalization pipeline.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

use tracing::{debug, trace};

use crate::parsed_url::{InvalidUrl, ParsedUrl};
use crate::rules::{
    decode_unreserved_triplets, default_empty_path, lowercase_decoded_host,
    lowercase_scheme_and_host, remove_dot_segments, strip_default_port, uppercase_percent_encoded_triplets,
    DefaultPortPolicy,
};
use crate::utility::InvalidTriplet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Knobs for a [`Normalizer`].
///
/// The default options perform exactly the normalizations every RFC-compliant HTTP client is
/// expected to perform, so the normalized URL is indistinguishable from the original to a server.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct NormalizerOptions {
    pub default_port_policy: DefaultPortPolicy,
}

/// Rewrites URLs into a canonical form without changing what they refer to.
///
/// # Examples
///
/// ```
/// use url_normalize::Normalizer;
///
/// let normalizer = Normalizer::default();
/// assert_eq!(
///     normalizer.normalize("HTTP://Example.COM:80/bar/../%7Efoo%2a").unwrap(),
///     "http://example.com/~foo%2A"
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Normalizer {
    options: NormalizerOptions,
}

impl Normalizer {
    pub fn new(options: NormalizerOptions) -> Self {
        Normalizer { options }
    }

    pub fn options(&self) -> &NormalizerOptions {
        &self.options
    }

    /// Returns whether `left` and `right` normalize to the same URL.
    ///
    /// ```
    /// use url_normalize::Normalizer;
    ///
    /// let normalizer = Normalizer::default();
    /// assert!(normalizer.are_equivalent("http://example.com", "HTTP://EXAMPLE.COM:80/").unwrap());
    /// assert!(!normalizer.are_equivalent("http://example.com/a", "http://example.com/A").unwrap());
    /// ```
    pub fn are_equivalent(&self, left: &str, right: &str) -> Result<bool, NormalizeError> {
        Ok(self.normalize(left)? == self.normalize(right)?)
    }

    /// Normalizes `url`.
    ///
    /// Fails with [`NormalizeError::MalformedUrl`] if `url` is not an absolute URL, and with
    /// [`NormalizeError::TruncatedPercentEncoding`] if it contains a `'%'` that is not followed by
    /// two characters within its component.
    pub fn normalize(&self, url: &str) -> Result<String, NormalizeError> {
        match self.normalize_parsed(url) {
            Ok(normalized) => {
                trace!(url, normalized = normalized.as_str(), "normalized url");
                Ok(normalized)
            }
            Err(error) => {
                debug!(url, %error, "failed to normalize url");
                Err(error)
            }
        }
    }

    fn normalize_parsed(&self, url: &str) -> Result<String, NormalizeError> {
        let url = ParsedUrl::parse(url)?;
        let url = url.transform_fields(uppercase_percent_encoded_triplets)?;
        let url = lowercase_scheme_and_host(url);
        let url = url.transform_fields(decode_unreserved_triplets)?;
        let url = lowercase_decoded_host(url);
        let path = remove_dot_segments(url.path());
        let url = url.with_path(path);
        let url = default_empty_path(url);
        let url = strip_default_port(url, self.options.default_port_policy);
        Ok(url.to_string())
    }
}

/// An error returned when a URL cannot be normalized.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NormalizeError {
    /// The input is not a valid absolute URL.
    MalformedUrl(InvalidUrl),

    /// A `'%'` is followed by fewer than two characters within its component.
    TruncatedPercentEncoding,
}

impl Display for NormalizeError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            NormalizeError::MalformedUrl(invalid_url) => {
                write!(formatter, "malformed url: {}", invalid_url)
            }
            NormalizeError::TruncatedPercentEncoding => {
                formatter.write_str("truncated percent encoding")
            }
        }
    }
}

impl Error for NormalizeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            NormalizeError::MalformedUrl(invalid_url) => Some(invalid_url),
            NormalizeError::TruncatedPercentEncoding => None,
        }
    }
}

impl From<InvalidUrl> for NormalizeError {
    fn from(value: InvalidUrl) -> Self {
        NormalizeError::MalformedUrl(value)
    }
}

impl From<InvalidTriplet> for NormalizeError {
    fn from(value: InvalidTriplet) -> Self {
        match value {
            InvalidTriplet::Truncated => NormalizeError::TruncatedPercentEncoding,
            InvalidTriplet::InvalidHexDigit => {
                NormalizeError::MalformedUrl(InvalidUrl::InvalidPercentEncoding)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::path::InvalidPath;
    use crate::scheme::InvalidScheme;

    #[test]
    fn test_normalize() {
        let normalizer = Normalizer::default();
        assert_eq!(
            normalizer.normalize("HTTP://Example.COM:80/bar/../%7Efoo%2a"),
            Ok("http://example.com/~foo%2A".to_owned())
        );
        assert_eq!(
            normalizer.normalize("http://example.com/"),
            Ok("http://example.com/".to_owned())
        );
    }

    #[test]
    fn test_normalize_host_triplets() {
        let normalizer = Normalizer::default();
        assert_eq!(
            normalizer.normalize("HTTP://%45XAMPLE.%43Om/"),
            Ok("http://example.com/".to_owned())
        );
        assert_eq!(
            normalizer.normalize("http://ex%2dample.com%3a/"),
            Ok("http://ex-ample.com%3A/".to_owned())
        );
        assert_eq!(
            normalizer.normalize("http://a%2fb/"),
            Ok("http://a%2Fb/".to_owned())
        );
        assert_eq!(
            normalizer.normalize("http://user%3a@Ex%3a.com/"),
            Ok("http://user%3A@ex%3A.com/".to_owned())
        );
    }

    #[test]
    fn test_normalize_error() {
        let normalizer = Normalizer::default();
        assert_eq!(
            normalizer.normalize("example.com"),
            Err(NormalizeError::MalformedUrl(InvalidUrl::InvalidScheme(
                InvalidScheme::ExpectedColon
            )))
        );
        assert_eq!(
            normalizer.normalize("http://example.com/foo%2"),
            Err(NormalizeError::TruncatedPercentEncoding)
        );
        assert_eq!(
            normalizer.normalize("http://example.com/foo?bar%"),
            Err(NormalizeError::TruncatedPercentEncoding)
        );
        assert_eq!(
            normalizer.normalize("http://example.co%4/"),
            Err(NormalizeError::TruncatedPercentEncoding)
        );
        assert_eq!(
            normalizer.normalize("http://example.com/%zz"),
            Err(NormalizeError::MalformedUrl(InvalidUrl::InvalidPath(
                InvalidPath::InvalidPercentEncoding
            )))
        );
    }

    #[test]
    fn test_normalize_registered_default_ports() {
        let normalizer = Normalizer::new(NormalizerOptions {
            default_port_policy: DefaultPortPolicy::Registered,
        });
        assert_eq!(
            normalizer.normalize("HTTPS://example.com:443"),
            Ok("https://example.com/".to_owned())
        );
        assert_eq!(
            normalizer.normalize("https://example.com:80/"),
            Ok("https://example.com:80/".to_owned())
        );
    }

    #[test]
    fn test_invalid_triplet_conversion() {
        assert_eq!(
            NormalizeError::from(InvalidTriplet::Truncated),
            NormalizeError::TruncatedPercentEncoding
        );
        assert_eq!(
            NormalizeError::from(InvalidTriplet::InvalidHexDigit),
            NormalizeError::MalformedUrl(InvalidUrl::InvalidPercentEncoding)
        );
    }

    #[test]
    fn test_error_display() {
        let error = NormalizeError::MalformedUrl(InvalidUrl::InvalidScheme(
            InvalidScheme::MustStartWithAlphabetic,
        ));
        assert_eq!(
            error.to_string(),
            "malformed url: scheme must start with alphabetic character"
        );
        assert!(error.source().is_some());
        assert_eq!(
            NormalizeError::TruncatedPercentEncoding.to_string(),
            "truncated percent encoding"
        );
    }
}
