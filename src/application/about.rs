//! About page content for the active locale.

use std::sync::Arc;

use tracing::{info, warn};

use super::error::AppError;
use super::repos::AuthorsRepo;
use super::store::LocaleStore;
use crate::domain::content::{AuthorProfile, FallbackPolicy, select_with_fallback};
use crate::domain::locale::Locale;
use crate::infra::error::InfraError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutView {
    pub requested: Locale,
    pub served: Locale,
    pub author: AuthorProfile,
}

impl AboutView {
    pub fn is_fallback(&self) -> bool {
        self.requested != self.served
    }
}

#[derive(Clone)]
pub struct AboutService {
    store: Arc<LocaleStore>,
    authors: Arc<dyn AuthorsRepo>,
    fallback: FallbackPolicy,
}

impl AboutService {
    pub fn new(
        store: Arc<LocaleStore>,
        authors: Arc<dyn AuthorsRepo>,
        fallback: FallbackPolicy,
    ) -> Self {
        Self {
            store,
            authors,
            fallback,
        }
    }

    /// Author profile for the store's active locale.
    pub fn about_view(&self) -> Result<AboutView, AppError> {
        self.about_view_for(self.store.active_locale())
    }

    pub fn about_view_for(&self, locale: Locale) -> Result<AboutView, AppError> {
        let authors = self.authors.list_authors().map_err(|err| {
            warn!(error = %err, "Failed to load author profiles");
            AppError::from(InfraError::from(err))
        })?;

        let selection = select_with_fallback(&authors, locale, self.fallback)?;
        if selection.is_fallback() {
            info!(
                requested = %selection.requested,
                served = %selection.served,
                "Serving author profile from fallback locale"
            );
        }

        Ok(AboutView {
            requested: selection.requested,
            served: selection.served,
            author: selection.item.clone(),
        })
    }
}
