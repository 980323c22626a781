//! Harmonized System code phrases.
//!
//! The phrase depends only on the number of characters in the code:
//!
//! | length | phrase                 |
//! |--------|------------------------|
//! | 0      | (empty)                |
//! | 1-2    | `chapter 03`           |
//! | 3-4    | `heading 0304`         |
//! | 5-6    | `subheading 0304.41`   |
//! | 7+     | `HS0304.41.10`         |

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Formats a classification code as a chapter/heading/subheading/full phrase.
///
/// ```
/// use tariff_psr::formatter::hscode::format_hs_code;
/// assert_eq!(format_hs_code("03"), "chapter 03");
/// assert_eq!(format_hs_code("030441"), "subheading 0304.41");
/// assert_eq!(format_hs_code("03044110"), "HS0304.41.10");
/// ```
pub fn format_hs_code(code: &str) -> String {
    let chars: Vec<char> = code.chars().collect();
    let part = |from: usize, to: usize| -> String {
        chars[from.min(chars.len())..to.min(chars.len())]
            .iter()
            .collect()
    };
    match chars.len() {
        0 => String::new(),
        1 | 2 => format!("chapter {}", code),
        3 | 4 => format!("heading {}", code),
        5 | 6 => format!("subheading {}.{}", part(0, 4), part(4, 6)),
        len => format!("HS{}.{}.{}", part(0, 4), part(4, 6), part(6, len)),
    }
}

/// Levels of the code family that templates can refer to (`{{heading}}` ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum HsLevel {
    Chapter,
    Heading,
    Subheading,
    /// The full code.
    Hscode,
}

impl HsLevel {
    /// Number of leading digits kept at this level, `None` for all of them.
    pub fn digits(self) -> Option<usize> {
        match self {
            HsLevel::Chapter => Some(2),
            HsLevel::Heading => Some(4),
            HsLevel::Subheading => Some(6),
            HsLevel::Hscode => None,
        }
    }

    /// Phrase for this level of `hscode`. Non-digits are ignored.
    pub fn format(self, hscode: &str) -> String {
        let digits: String = hscode.chars().filter(char::is_ascii_digit).collect();
        let kept = match self.digits() {
            Some(n) => digits.chars().take(n).collect(),
            None => digits,
        };
        format_hs_code(&kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_lengths() {
        let cases = [
            ("", ""),
            ("1", "chapter 1"),
            ("01", "chapter 01"),
            ("010", "heading 010"),
            ("0101", "heading 0101"),
            ("01011", "subheading 0101.1"),
            ("050505", "subheading 0505.05"),
            ("0606060", "HS0606.06.0"),
            ("06060607", "HS0606.06.07"),
        ];
        for (code, phrase) in cases {
            assert_eq!(format_hs_code(code), phrase, "{}", code);
        }
    }

    #[test]
    fn test_levels() {
        let hscode = "1234.56.78";
        assert_eq!(HsLevel::Chapter.format(hscode), "chapter 12");
        assert_eq!(HsLevel::Heading.format(hscode), "heading 1234");
        assert_eq!(HsLevel::Subheading.format(hscode), "subheading 1234.56");
        assert_eq!(HsLevel::Hscode.format(hscode), "HS1234.56.78");
        assert_eq!(HsLevel::Heading.format("no digits"), "");
    }

    #[test]
    fn test_level_names() {
        assert_eq!(HsLevel::from_str("subheading").unwrap(), HsLevel::Subheading);
        assert!(HsLevel::from_str("parameter").is_err());
    }
}
