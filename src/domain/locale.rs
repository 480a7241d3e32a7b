//! Supported locales and their display labels.
//!
//! The set is closed and ordered: `en` first (the default), then `zh`. Every
//! other part of the crate works with [`Locale`] values; free-form codes are
//! only accepted through [`Locale::from_str`], which rejects anything outside
//! the set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// Supported locales in menu order.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Zh];

    /// Locale used when nothing else is known; never encoded in routes.
    pub const DEFAULT: Locale = Locale::En;

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }

    /// Look up a code without building an error.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.as_str() == code)
    }

    /// Label shown on the switch button and menu options.
    pub fn label(self) -> String {
        format_label(self.as_str())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = DomainError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::from_code(code).ok_or_else(|| DomainError::invalid_locale(code))
    }
}

/// Upper-case the first character of `code` and keep the remainder as-is.
pub fn format_label(code: &str) -> String {
    let mut chars = code.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_capitalize_only_the_first_character() {
        assert_eq!(format_label("en"), "En");
        assert_eq!(format_label("zh"), "Zh");
        assert_eq!(format_label("zh-TW"), "Zh-TW");
        assert_eq!(format_label(""), "");
        assert_eq!(Locale::Zh.label(), "Zh");
    }

    #[test]
    fn supported_codes_parse() {
        for locale in Locale::ALL {
            assert_eq!(locale.as_str().parse::<Locale>().unwrap(), locale);
        }
    }

    #[test]
    fn unsupported_codes_are_rejected() {
        for code in ["fr", "EN", " en", "", "en-US"] {
            let err = code.parse::<Locale>().expect_err("code must be rejected");
            assert!(
                matches!(&err, DomainError::InvalidLocale { code: rejected } if rejected == code),
                "unexpected error for `{code}`: {err}"
            );
        }
    }

    #[test]
    fn default_locale_leads_the_menu_order() {
        assert_eq!(Locale::ALL[0], Locale::DEFAULT);
        assert!(Locale::En.is_default());
        assert!(!Locale::Zh.is_default());
        assert_eq!(Locale::default(), Locale::DEFAULT);
    }

    #[test]
    fn serializes_as_the_bare_code() {
        assert_eq!(serde_json::to_string(&Locale::Zh).unwrap(), "\"zh\"");
        assert!(serde_json::from_str::<Locale>("\"fr\"").is_err());
    }
}
