use thiserror::Error;

use super::locale::Locale;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unsupported locale `{code}`")]
    InvalidLocale { code: String },
    #[error("no content available for locale `{locale}`")]
    ContentNotFoundForLocale { locale: Locale },
}

impl DomainError {
    pub fn invalid_locale(code: impl Into<String>) -> Self {
        Self::InvalidLocale { code: code.into() }
    }

    pub fn content_not_found(locale: Locale) -> Self {
        Self::ContentNotFoundForLocale { locale }
    }
}
