//! System media preferences reflected onto the page.
use serde::{Deserialize, Serialize};

use crate::constants::{DARK_SCHEME_QUERY, REDUCED_MOTION_QUERY};
use crate::state::{A11yState, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaPreference {
    ReducedMotion,
    ColorScheme,
}

impl MediaPreference {
    pub const ALL: [Self; 2] = [Self::ReducedMotion, Self::ColorScheme];

    #[must_use]
    pub const fn query(self) -> &'static str {
        match self {
            Self::ReducedMotion => REDUCED_MOTION_QUERY,
            Self::ColorScheme => DARK_SCHEME_QUERY,
        }
    }

    /// Fold a query's match state into the application state.
    /// Returns whether anything changed.
    pub fn apply(self, state: &mut A11yState, matches: bool) -> bool {
        match self {
            Self::ReducedMotion => {
                let changed = state.reduced_motion != matches;
                state.reduced_motion = matches;
                changed
            }
            Self::ColorScheme => {
                let theme = Some(Theme::from_dark(matches));
                let changed = state.theme != theme;
                state.theme = theme;
                changed
            }
        }
    }
}
