//! Percent-encoding helpers shared by the component parsers and the normalization rules.

use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// An error produced while walking the percent-encoded triplets of a URL component.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum InvalidTriplet {
    /// A `'%'` was not followed by two more characters before the end of the component.
    Truncated,

    /// A complete triplet contained something other than a hexadecimal digit.
    InvalidHexDigit,
}

impl Display for InvalidTriplet {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        use self::InvalidTriplet::*;

        match self {
            Truncated => formatter.write_str("truncated percent encoding"),
            InvalidHexDigit => formatter.write_str("invalid hex digit in percent encoding"),
        }
    }
}

impl Error for InvalidTriplet {}

/// The failure modes of [`check_component`], mapped onto each component's own error type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum InvalidComponent {
    InvalidCharacter,
    InvalidPercentEncoding,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ScanState {
    Any,
    AfterPercent1,
    AfterPercent2(char),
}

pub(crate) fn get_percent_encoded_value(
    first_digit: char,
    second_digit: char,
) -> Result<u8, InvalidTriplet> {
    let first_digit = hex_digit_to_decimal(first_digit)?;
    let second_digit = hex_digit_to_decimal(second_digit)?;
    Ok(first_digit * 16 + second_digit)
}

fn hex_digit_to_decimal(digit: char) -> Result<u8, InvalidTriplet> {
    digit
        .to_digit(16)
        .map(|value| value as u8)
        .ok_or(InvalidTriplet::InvalidHexDigit)
}

/// Copies `value` into a new string, handing every complete `%XX` triplet to `on_triplet`
/// instead of copying it.
///
/// The handler receives the two characters following the `'%'` and is responsible for writing
/// whatever should replace the whole triplet. A `'%'` with fewer than two characters after it
/// fails with [`InvalidTriplet::Truncated`].
pub(crate) fn map_triplets<F>(value: &str, mut on_triplet: F) -> Result<String, InvalidTriplet>
where
    F: FnMut(char, char, &mut String) -> Result<(), InvalidTriplet>,
{
    let mut output = String::with_capacity(value.len());
    let mut state = ScanState::Any;

    for character in value.chars() {
        state = match state {
            ScanState::Any if character == '%' => ScanState::AfterPercent1,
            ScanState::Any => {
                output.push(character);
                ScanState::Any
            }
            ScanState::AfterPercent1 => ScanState::AfterPercent2(character),
            ScanState::AfterPercent2(first_digit) => {
                on_triplet(first_digit, character, &mut output)?;
                ScanState::Any
            }
        };
    }

    if state == ScanState::Any {
        Ok(output)
    } else {
        Err(InvalidTriplet::Truncated)
    }
}

/// Validates a component against its character map.
///
/// A `'%'` followed by two bytes must be followed by two hex digits. A `'%'` too close to the end
/// of the component is let through; the normalization rules report it as truncated.
pub(crate) fn check_component(value: &[u8], char_map: &[u8; 256]) -> Result<(), InvalidComponent> {
    let mut index = 0;

    while let Some(&byte) = value.get(index) {
        match char_map[byte as usize] {
            0 => return Err(InvalidComponent::InvalidCharacter),
            b'%' => match value.get(index + 1..index + 3) {
                Some(&[byte_1, byte_2])
                    if byte_1.is_ascii_hexdigit() && byte_2.is_ascii_hexdigit() =>
                {
                    index += 3;
                }
                Some(_) => return Err(InvalidComponent::InvalidPercentEncoding),
                None => index += 1,
            },
            _ => index += 1,
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    const TEST_CHAR_MAP: [u8; 256] = {
        let allowed = b"%ab2Ff";
        let mut map = [0; 256];
        let mut index = 0;

        while index < allowed.len() {
            map[allowed[index] as usize] = allowed[index];
            index += 1;
        }

        map
    };

    #[test]
    fn test_get_percent_encoded_value() {
        assert_eq!(get_percent_encoded_value('7', 'e'), Ok(0x7E));
        assert_eq!(get_percent_encoded_value('0', 'A'), Ok(0x0A));
        assert_eq!(get_percent_encoded_value('F', 'f'), Ok(0xFF));
        assert_eq!(
            get_percent_encoded_value('g', '0'),
            Err(InvalidTriplet::InvalidHexDigit)
        );
    }

    #[test]
    fn test_map_triplets() {
        let copy = |first: char, second: char, output: &mut String| {
            output.push('[');
            output.push(first);
            output.push(second);
            output.push(']');
            Ok(())
        };

        assert_eq!(map_triplets("", copy), Ok(String::new()));
        assert_eq!(map_triplets("abc", copy), Ok("abc".to_owned()));
        assert_eq!(map_triplets("a%2fb%%%c", copy), Ok("a[2f]b[%%]c".to_owned()));
        assert_eq!(map_triplets("a%2", copy), Err(InvalidTriplet::Truncated));
        assert_eq!(map_triplets("%", copy), Err(InvalidTriplet::Truncated));
    }

    #[test]
    fn test_map_triplets_propagates_handler_error() {
        let result = map_triplets("a%zz", |_, _, _| Err(InvalidTriplet::InvalidHexDigit));
        assert_eq!(result, Err(InvalidTriplet::InvalidHexDigit));
    }

    #[test]
    fn test_check_component() {
        assert_eq!(check_component(b"", &TEST_CHAR_MAP), Ok(()));
        assert_eq!(check_component(b"ab%2Fa", &TEST_CHAR_MAP), Ok(()));
        assert_eq!(check_component(b"ab%2", &TEST_CHAR_MAP), Ok(()));
        assert_eq!(check_component(b"ab%", &TEST_CHAR_MAP), Ok(()));
        assert_eq!(
            check_component(b"abc", &TEST_CHAR_MAP),
            Err(InvalidComponent::InvalidCharacter)
        );
        assert_eq!(
            check_component(b"a%zzb", &TEST_CHAR_MAP),
            Err(InvalidComponent::InvalidPercentEncoding)
        );
    }
}
