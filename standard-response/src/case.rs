//! Identifier case conventions
//!
//! Field names are declared once (usually in `snake_case`, the Rust way) and
//! rendered in whatever convention the API consumer expects.
//!
//! # Example
//!
//! ```rust
//! use standard_response::case::{convert, CaseConvention};
//!
//! assert_eq!(convert("total_items", CaseConvention::Camel), "totalItems");
//! assert_eq!(convert("total_items", CaseConvention::Pascal), "TotalItems");
//! assert_eq!(convert("totalItems", CaseConvention::Kebab), "total-items");
//! assert_eq!(convert("totalItems", CaseConvention::None), "totalItems");
//! ```

use std::fmt;
use std::str::FromStr;

use convert_case::{Boundary, Case, Converter};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Naming convention applied to output keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseConvention {
    /// `snake_case`
    Snake,
    /// `camelCase`
    Camel,
    /// `PascalCase`
    Pascal,
    /// `kebab-case`
    Kebab,
    /// Keep the identifier as declared
    #[default]
    None,
}

impl CaseConvention {
    /// All conventions, in declaration order
    pub const ALL: [CaseConvention; 5] = [
        Self::Snake,
        Self::Camel,
        Self::Pascal,
        Self::Kebab,
        Self::None,
    ];

    /// Lowercase name used in configuration files
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Snake => "snake",
            Self::Camel => "camel",
            Self::Pascal => "pascal",
            Self::Kebab => "kebab",
            Self::None => "none",
        }
    }

    /// Convert an identifier into this convention
    ///
    /// Shorthand for [`convert`].
    #[must_use]
    pub fn apply(&self, identifier: &str) -> String {
        convert(identifier, *self)
    }
}

impl fmt::Display for CaseConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CaseConvention {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snake" | "snake_case" => Ok(Self::Snake),
            "camel" | "camelcase" => Ok(Self::Camel),
            "pascal" | "pascalcase" => Ok(Self::Pascal),
            "kebab" | "kebab-case" => Ok(Self::Kebab),
            "none" | "" => Ok(Self::None),
            other => Err(Error::InvalidCaseConvention(other.to_string())),
        }
    }
}

/// Convert an identifier between naming conventions
///
/// Words are split on underscores, hyphens and whitespace, and every
/// uppercase letter starts a new word, so `aBC` is the three words
/// `a b c` and `HTTPServer` becomes `h_t_t_p_server` in snake case. Words
/// are lowercased before joining. The function is total and idempotent:
/// `convert(&convert(s, c), c) == convert(s, c)`.
///
/// # Example
///
/// ```rust
/// use standard_response::case::{convert, CaseConvention};
///
/// let once = convert("page_info", CaseConvention::Camel);
/// assert_eq!(once, "pageInfo");
/// assert_eq!(convert(&once, CaseConvention::Camel), once);
///
/// let once = convert("a_b_c", CaseConvention::Camel);
/// assert_eq!(once, "aBC");
/// assert_eq!(convert(&once, CaseConvention::Camel), once);
/// ```
#[must_use]
pub fn convert(identifier: &str, convention: CaseConvention) -> String {
    let case = match convention {
        CaseConvention::Snake => Case::Snake,
        CaseConvention::Camel => Case::Camel,
        CaseConvention::Pascal => Case::Pascal,
        CaseConvention::Kebab => Case::Kebab,
        CaseConvention::None => return identifier.to_string(),
    };

    Converter::new()
        .set_boundaries(&[Boundary::SPACE])
        .to_case(case)
        .convert(split_words(identifier).join(" "))
}

/// Lowercased words of `identifier`
fn split_words(identifier: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut word = String::new();

    for c in identifier.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !word.is_empty() {
                words.push(std::mem::take(&mut word));
            }
            continue;
        }
        if c.is_uppercase() && !word.is_empty() {
            words.push(std::mem::take(&mut word));
        }
        word.extend(c.to_lowercase());
    }
    if !word.is_empty() {
        words.push(word);
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_to_each_convention() {
        assert_eq!(convert("current_page", CaseConvention::Snake), "current_page");
        assert_eq!(convert("current_page", CaseConvention::Camel), "currentPage");
        assert_eq!(convert("current_page", CaseConvention::Pascal), "CurrentPage");
        assert_eq!(convert("current_page", CaseConvention::Kebab), "current-page");
        assert_eq!(convert("current_page", CaseConvention::None), "current_page");
    }

    #[test]
    fn test_camel_and_pascal_inputs() {
        assert_eq!(convert("totalItems", CaseConvention::Snake), "total_items");
        assert_eq!(convert("TotalItems", CaseConvention::Snake), "total_items");
        assert_eq!(convert("total-items", CaseConvention::Camel), "totalItems");
    }

    #[test]
    fn test_single_word() {
        assert_eq!(convert("status", CaseConvention::Camel), "status");
        assert_eq!(convert("status", CaseConvention::Pascal), "Status");
        assert_eq!(convert("status", CaseConvention::Kebab), "status");
    }

    #[test]
    fn test_single_letter_words() {
        assert_eq!(convert("a_b_c", CaseConvention::Camel), "aBC");
        assert_eq!(convert("aBC", CaseConvention::Camel), "aBC");
        assert_eq!(convert("a_b", CaseConvention::Pascal), "AB");
        assert_eq!(convert("AB", CaseConvention::Pascal), "AB");
        assert_eq!(convert("aBC", CaseConvention::Snake), "a_b_c");
        assert_eq!(convert("x_y_z", CaseConvention::Kebab), "x-y-z");
    }

    #[test]
    fn test_separators_collapse() {
        assert_eq!(convert("__page__info", CaseConvention::Snake), "page_info");
        assert_eq!(convert("page info", CaseConvention::Kebab), "page-info");
        assert_eq!(convert("", CaseConvention::Camel), "");
    }

    #[test]
    fn test_none_keeps_identifier() {
        assert_eq!(convert("Mixed_styleName", CaseConvention::None), "Mixed_styleName");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "total_items",
            "pageInfo",
            "OrderBy",
            "expand-able",
            "duration",
            "a_b_c",
            "x_y_z",
            "a_b",
            "aBC",
            "HTTPServer",
            "page2_info",
            "__leading__",
        ];
        for convention in CaseConvention::ALL {
            for input in inputs {
                let once = convert(input, convention);
                assert_eq!(convert(&once, convention), once, "{input} as {convention}");
            }
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("camel".parse::<CaseConvention>().unwrap(), CaseConvention::Camel);
        assert_eq!("SNAKE".parse::<CaseConvention>().unwrap(), CaseConvention::Snake);
        assert_eq!("kebab-case".parse::<CaseConvention>().unwrap(), CaseConvention::Kebab);
        assert_eq!("none".parse::<CaseConvention>().unwrap(), CaseConvention::None);
        assert!("shouting".parse::<CaseConvention>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for convention in CaseConvention::ALL {
            assert_eq!(convention.to_string().parse::<CaseConvention>().unwrap(), convention);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&CaseConvention::Pascal).unwrap();
        assert_eq!(json, "\"pascal\"");
        let parsed: CaseConvention = serde_json::from_str("\"kebab\"").unwrap();
        assert_eq!(parsed, CaseConvention::Kebab);
    }
}
