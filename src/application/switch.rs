//! Locale switch control: a two-state menu that lists the supported locales
//! and applies the one the user picks.
//!
//! Where the chosen locale goes is decided by the [`SwitchTarget`]:
//! [`StoreTarget`] writes the persisted preference, [`RouteTarget`] rewrites
//! the current route and navigates. An application wires exactly one of them.

use tracing::{debug, info};

use super::store::{LocaleStore, SwitchOutcome};
use crate::domain::error::DomainError;
use crate::domain::locale::Locale;
use crate::domain::route::{active_route_locale, canonical_path, localized_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// Observable result of applying a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchEffect {
    /// The preference store was updated.
    Stored(SwitchOutcome),
    /// A client-side navigation was issued.
    Navigated { to: String },
}

/// Destination of a locale selection.
pub trait SwitchTarget {
    fn active_locale(&self) -> Locale;

    fn apply(&mut self, locale: Locale) -> SwitchEffect;

    /// Side effect run once when the control is mounted.
    fn on_mount(&mut self) -> Option<SwitchEffect> {
        None
    }
}

/// Persisted-preference target: selection updates the store; observers of
/// the store re-render content.
#[derive(Clone, Copy)]
pub struct StoreTarget<'a> {
    store: &'a LocaleStore,
}

impl<'a> StoreTarget<'a> {
    pub fn new(store: &'a LocaleStore) -> Self {
        Self { store }
    }
}

impl SwitchTarget for StoreTarget<'_> {
    fn active_locale(&self) -> Locale {
        self.store.active_locale()
    }

    fn apply(&mut self, locale: Locale) -> SwitchEffect {
        SwitchEffect::Stored(self.store.set_active_locale(locale))
    }
}

/// Sink for client-side navigation.
pub trait Navigator {
    fn push(&mut self, path: &str);
}

/// Navigator that only records the paths it was asked to visit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationLog {
    history: Vec<String>,
}

impl NavigationLog {
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Navigator for NavigationLog {
    fn push(&mut self, path: &str) {
        self.history.push(path.to_string());
    }
}

/// Route-encoded target: selection rewrites the locale segment of the
/// current path and navigates there.
#[derive(Debug, Clone)]
pub struct RouteTarget<N> {
    pathname: String,
    navigator: N,
}

impl<N: Navigator> RouteTarget<N> {
    pub fn new(pathname: impl Into<String>, navigator: N) -> Self {
        Self {
            pathname: pathname.into(),
            navigator,
        }
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    fn navigate(&mut self, to: String) -> SwitchEffect {
        info!(from = %self.pathname, to = %to, "Navigating to localized route");
        self.navigator.push(&to);
        self.pathname.clone_from(&to);
        SwitchEffect::Navigated { to }
    }
}

impl<N: Navigator> SwitchTarget for RouteTarget<N> {
    fn active_locale(&self) -> Locale {
        active_route_locale(&self.pathname)
    }

    fn apply(&mut self, locale: Locale) -> SwitchEffect {
        let to = localized_path(&self.pathname, locale);
        self.navigate(to)
    }

    // A default-locale prefix is redundant; replace it with the bare route.
    fn on_mount(&mut self) -> Option<SwitchEffect> {
        let to = canonical_path(&self.pathname)?;
        Some(self.navigate(to))
    }
}

/// One entry of the open menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub locale: Locale,
    pub label: String,
    pub active: bool,
}

pub struct LocaleSwitch<T> {
    target: T,
    state: MenuState,
}

impl<T: SwitchTarget> LocaleSwitch<T> {
    pub fn new(target: T) -> Self {
        Self {
            target,
            state: MenuState::Closed,
        }
    }

    /// Run the target's mount effect.
    pub fn mount(&mut self) -> Option<SwitchEffect> {
        self.target.on_mount()
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    /// Trigger button activation.
    pub fn toggle(&mut self) -> MenuState {
        self.state = match self.state {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        };
        self.state
    }

    /// Focus left the menu.
    pub fn blur(&mut self) {
        self.state = MenuState::Closed;
    }

    /// Apply `locale` and close the menu.
    ///
    /// Options are only reachable while the menu is open; a selection while
    /// closed is ignored and returns `None`.
    pub fn select(&mut self, locale: Locale) -> Option<SwitchEffect> {
        if self.state == MenuState::Closed {
            debug!(locale = %locale, "Ignoring locale selection while menu is closed");
            return None;
        }
        let effect = self.target.apply(locale);
        self.state = MenuState::Closed;
        Some(effect)
    }

    /// [`select`](Self::select) with an untrusted code.
    pub fn select_code(&mut self, code: &str) -> Result<Option<SwitchEffect>, DomainError> {
        let locale = code.parse::<Locale>()?;
        Ok(self.select(locale))
    }

    pub fn active_locale(&self) -> Locale {
        self.target.active_locale()
    }

    /// Label of the trigger button.
    pub fn current_label(&self) -> String {
        self.active_locale().label()
    }

    pub fn options(&self) -> Vec<MenuOption> {
        let active = self.active_locale();
        Locale::ALL
            .into_iter()
            .map(|locale| MenuOption {
                locale,
                label: locale.label(),
                active: locale == active,
            })
            .collect()
    }

    /// Text rendering: the trigger button, then the options when open.
    pub fn render(&self) -> String {
        let chevron = match self.state {
            MenuState::Closed => '▾',
            MenuState::Open => '▴',
        };
        let mut lines = vec![format!("[{} {chevron}]", self.current_label())];
        if self.is_open() {
            lines.extend(self.options().into_iter().map(|option| {
                let mark = if option.active { '•' } else { ' ' };
                format!(" ({mark}) {}", option.label)
            }));
        }
        lines.join("\n")
    }
}
