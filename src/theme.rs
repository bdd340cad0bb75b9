//! Theme selection.
//!
//! The site has exactly two visual variants, both Catppuccin flavors:
//! latte (light) and mocha (dark). The resolved variant is persisted under
//! the `"theme"` preference key and surfaced to the styling layer as a
//! single marker on the document root — marker present means mocha, absent
//! means latte. The store and the marker can never disagree: every
//! transition writes both in one synchronous step with no yield point in
//! between.
//!
//! Initialization runs once per page load, first match wins:
//!
//! 1. a stored preference naming a valid variant
//! 2. the system dark-mode signal (consulted lazily, only when 1 fails)
//! 3. latte
//!
//! Constructing the machine *is* initialization, so no state read or
//! toggle can precede it. The generator runs this machine over
//! [`UnavailableStore`](crate::prefs::UnavailableStore) to decide the
//! markup default; the script shipped with the site replays the same
//! transitions against the visitor's browser storage.

use crate::prefs::{PreferenceStore, THEME_KEY};

/// Class on the document root the styling layer keys off for the dark
/// variant. Latte is its absence.
pub const DARK_MARKER: &str = "mocha";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Latte,
    Mocha,
}

impl Theme {
    /// The value persisted to the preference store.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Latte => "latte",
            Theme::Mocha => "mocha",
        }
    }

    /// Parse a stored preference value. Anything but the two variant names
    /// reads as absent — the machine admits no third state, so a stale or
    /// corrupted value falls through to the system signal.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "latte" => Some(Theme::Latte),
            "mocha" => Some(Theme::Mocha),
            _ => None,
        }
    }

    /// The other variant.
    pub fn flipped(self) -> Self {
        match self {
            Theme::Latte => Theme::Mocha,
            Theme::Mocha => Theme::Latte,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Mocha
    }
}

/// Where the resolved variant becomes visible.
///
/// The real document root is a CSS class list; pre-rendering and tests
/// record the marker directly via [`MarkerState`].
pub trait ThemeTarget {
    /// Make the dark-variant marker present or absent. Exactly one variant
    /// is active at a time.
    fn set_dark_marker(&mut self, present: bool);
}

/// Target that remembers the last applied marker state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MarkerState {
    pub dark: bool,
}

impl ThemeTarget for MarkerState {
    fn set_dark_marker(&mut self, present: bool) {
        self.dark = present;
    }
}

/// Two-state theme machine over an injectable store and target.
pub struct ThemeMachine<S, T> {
    store: S,
    target: T,
    current: Theme,
}

impl<S: PreferenceStore, T: ThemeTarget> ThemeMachine<S, T> {
    /// Resolve the initial variant, persist it, and apply the marker.
    ///
    /// `system_dark` is only invoked when the store holds no usable value,
    /// so environments without a display never need to answer.
    pub fn initialize(store: S, target: T, system_dark: impl FnOnce() -> bool) -> Self {
        let initial = store
            .get(THEME_KEY)
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or_else(|| {
                if system_dark() {
                    Theme::Mocha
                } else {
                    Theme::Latte
                }
            });
        let mut machine = Self {
            store,
            target,
            current: initial,
        };
        machine.commit(initial);
        machine
    }

    /// Persist and apply in one non-yielding step.
    fn commit(&mut self, theme: Theme) {
        self.store.set(THEME_KEY, theme.as_str());
        self.target.set_dark_marker(theme.is_dark());
        self.current = theme;
    }

    /// Flip latte ↔ mocha. The only transition.
    pub fn toggle(&mut self) -> Theme {
        self.commit(self.current.flipped());
        self.current
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}
