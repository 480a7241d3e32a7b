//! Localized content records and locale-based selection.

use serde::Deserialize;

use super::error::DomainError;
use super::locale::Locale;

/// A content record authored for exactly one locale.
pub trait Localized {
    fn locale(&self) -> Locale;
}

/// What selection does when no item matches the requested locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Report `ContentNotFoundForLocale`.
    Strict,
    /// Serve the default-locale item instead.
    #[default]
    DefaultLocale,
}

/// Result of a selection that may have fallen back to another locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a, T> {
    pub item: &'a T,
    pub requested: Locale,
    pub served: Locale,
}

impl<T> Selection<'_, T> {
    pub fn is_fallback(&self) -> bool {
        self.requested != self.served
    }
}

/// First item whose locale tag equals `locale`.
pub fn select_localized<T: Localized>(items: &[T], locale: Locale) -> Result<&T, DomainError> {
    items
        .iter()
        .find(|item| item.locale() == locale)
        .ok_or_else(|| DomainError::content_not_found(locale))
}

/// Select for `locale`, applying `policy` when nothing matches exactly.
///
/// The error always names the requested locale, even when the default-locale
/// fallback was attempted and failed as well.
pub fn select_with_fallback<T: Localized>(
    items: &[T],
    locale: Locale,
    policy: FallbackPolicy,
) -> Result<Selection<'_, T>, DomainError> {
    let exact = select_localized(items, locale);
    let item = match (exact, policy) {
        (Ok(item), _) => item,
        (Err(err), FallbackPolicy::Strict) => return Err(err),
        (Err(err), FallbackPolicy::DefaultLocale) => {
            select_localized(items, Locale::DEFAULT).map_err(|_| err)?
        }
    };

    Ok(Selection {
        item,
        requested: locale,
        served: item.locale(),
    })
}

/// Author record rendered on the About page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthorProfile {
    pub name: String,
    pub lang: Locale,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    /// Markdown body.
    #[serde(default)]
    pub body: String,
}

impl Localized for AuthorProfile {
    fn locale(&self) -> Locale {
        self.lang
    }
}
