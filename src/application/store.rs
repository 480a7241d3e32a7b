//! Locale store: the single source of truth for the active locale.
//!
//! The store is built once at startup around a [`PreferenceStorage`] backend
//! and handed to consumers by reference (or `Arc`). Every write goes to
//! storage before the in-memory value changes hands, and observers are told
//! about the change synchronously afterwards.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use metrics::counter;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use super::lock::{mutex_lock, rw_read, rw_write};
use super::repos::PreferenceStorage;
use crate::domain::error::DomainError;
use crate::domain::locale::Locale;

const SOURCE: &str = "application::store";

pub(crate) const METRIC_LOCALE_SWITCH: &str = "site_locale_switch_total";
pub(crate) const METRIC_PERSIST_FAILURE: &str = "site_locale_persist_failure_total";

/// Monotonic counter ordering the changes of one store.
pub type Epoch = u64;

/// Handle returned by [`LocaleStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Notification delivered to observers after every switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleChange {
    pub previous: Locale,
    pub current: Locale,
    pub epoch: Epoch,
    pub at: OffsetDateTime,
}

impl LocaleChange {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// What a call to [`LocaleStore::set_active_locale`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchOutcome {
    pub previous: Locale,
    pub locale: Locale,
    /// `false` when the durable write failed; the in-memory value still moved.
    pub persisted: bool,
}

type Observer = Arc<dyn Fn(&LocaleChange) + Send + Sync>;

pub struct LocaleStore {
    storage: Arc<dyn PreferenceStorage>,
    active: RwLock<Locale>,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    epoch_counter: AtomicU64,
    subscription_counter: AtomicU64,
}

impl LocaleStore {
    /// Build the store and hydrate it from `storage`.
    ///
    /// A missing, unreadable or unsupported stored value leaves the store on
    /// the default locale.
    pub fn open(storage: Arc<dyn PreferenceStorage>) -> Self {
        let active = hydrate(storage.as_ref());
        Self {
            storage,
            active: RwLock::new(active),
            observers: Mutex::new(Vec::new()),
            epoch_counter: AtomicU64::new(0),
            subscription_counter: AtomicU64::new(0),
        }
    }

    pub fn active_locale(&self) -> Locale {
        *rw_read(&self.active, SOURCE, "active_locale")
    }

    pub fn namespace(&self) -> &str {
        self.storage.namespace()
    }

    /// Make `locale` the active locale.
    ///
    /// The value is written to storage before this returns. A failed write is
    /// logged and reported through [`SwitchOutcome::persisted`]; the next call
    /// writes again, even when it sets the same locale.
    pub fn set_active_locale(&self, locale: Locale) -> SwitchOutcome {
        let mut active = rw_write(&self.active, SOURCE, "set_active_locale");

        let persisted = match self.storage.save(locale) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    namespace = self.storage.namespace(),
                    locale = %locale,
                    error = %err,
                    "Failed to persist locale preference; keeping it in memory"
                );
                counter!(METRIC_PERSIST_FAILURE).increment(1);
                false
            }
        };

        let previous = std::mem::replace(&mut *active, locale);
        drop(active);

        counter!(METRIC_LOCALE_SWITCH, "locale" => locale.as_str()).increment(1);

        let change = LocaleChange {
            previous,
            current: locale,
            epoch: self.epoch_counter.fetch_add(1, Ordering::SeqCst),
            at: OffsetDateTime::now_utc(),
        };

        info!(
            previous = %previous,
            current = %locale,
            epoch = change.epoch,
            persisted,
            "Active locale set"
        );

        self.notify(&change);

        SwitchOutcome {
            previous,
            locale,
            persisted,
        }
    }

    /// Switch using an untrusted locale code.
    ///
    /// Unsupported codes are rejected before any state is touched.
    pub fn switch_to(&self, code: &str) -> Result<SwitchOutcome, DomainError> {
        let locale = code.parse::<Locale>().inspect_err(|err| {
            warn!(code, error = %err, "Rejected locale switch");
        })?;
        Ok(self.set_active_locale(locale))
    }

    /// Register `observer` to be called after every switch.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&LocaleChange) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.subscription_counter.fetch_add(1, Ordering::SeqCst));
        mutex_lock(&self.observers, SOURCE, "subscribe").push((id, Arc::new(observer)));
        debug!(subscription = id.0, "Locale observer subscribed");
        id
    }

    /// Remove an observer; returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = mutex_lock(&self.observers, SOURCE, "unsubscribe");
        let before = observers.len();
        observers.retain(|(candidate, _)| *candidate != id);
        before != observers.len()
    }

    pub fn observer_count(&self) -> usize {
        mutex_lock(&self.observers, SOURCE, "observer_count").len()
    }

    // Observers run without the lock held so they may read the store or
    // (un)subscribe from inside the callback.
    fn notify(&self, change: &LocaleChange) {
        let observers: Vec<Observer> = mutex_lock(&self.observers, SOURCE, "notify")
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in observers {
            observer(change);
        }
    }
}

fn hydrate(storage: &dyn PreferenceStorage) -> Locale {
    match storage.load() {
        Ok(Some(stored)) => match Locale::from_code(&stored.lang) {
            Some(locale) => {
                debug!(
                    namespace = storage.namespace(),
                    locale = %locale,
                    "Hydrated locale preference"
                );
                locale
            }
            None => {
                warn!(
                    namespace = storage.namespace(),
                    stored = %stored.lang,
                    fallback = %Locale::DEFAULT,
                    "Persisted locale is not supported; using default"
                );
                Locale::DEFAULT
            }
        },
        Ok(None) => Locale::DEFAULT,
        Err(err) => {
            warn!(
                namespace = storage.namespace(),
                error = %err,
                fallback = %Locale::DEFAULT,
                "Failed to read locale preference; using default"
            );
            Locale::DEFAULT
        }
    }
}
