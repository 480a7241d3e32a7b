//! Traits describing persistence and content adapters.

use thiserror::Error;

use crate::domain::content::AuthorProfile;
use crate::domain::locale::Locale;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
    #[error("persisted preference is malformed: {0}")]
    Malformed(String),
}

impl StorageError {
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        Self::Unavailable(err.to_string())
    }

    pub fn malformed(err: impl std::fmt::Display) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Locale code exactly as it was read back from storage.
///
/// The code is not validated here; a value written by an older build (or by
/// hand) may name a locale this build does not support.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPreference {
    pub lang: String,
}

/// Durable client-local storage for the locale preference.
pub trait PreferenceStorage: Send + Sync {
    /// Namespace the preference is stored under.
    fn namespace(&self) -> &str;

    /// Read the stored preference; `Ok(None)` when nothing was ever written.
    fn load(&self) -> Result<Option<StoredPreference>, StorageError>;

    /// Durably write `locale`. Returns only after the value is crash-safe.
    fn save(&self, locale: Locale) -> Result<(), StorageError>;
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content source unavailable: {0}")]
    Unavailable(String),
    #[error("content is malformed: {0}")]
    Malformed(String),
}

impl ContentError {
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        Self::Unavailable(err.to_string())
    }

    pub fn malformed(err: impl std::fmt::Display) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Source of author profiles in every locale they were written for.
pub trait AuthorsRepo: Send + Sync {
    fn list_authors(&self) -> Result<Vec<AuthorProfile>, ContentError>;
}
