//! Display-state selection after a poll.

use crate::parser::schema::DisplayState;

/// Pick the panel to show from what each fetch returned
///
/// `None` means the fetch failed or was not issued. An answer with no
/// records counts as "no data"; any records at all mean data is available.
pub fn select_display_state<P, D>(profile: Option<&[P]>, details: Option<&[D]>) -> DisplayState {
    match (profile, details) {
        (None, None) => DisplayState::AnalyzeNowPrompt,
        (p, d) if p.is_some_and(|p| !p.is_empty()) || d.is_some_and(|d| !d.is_empty()) => {
            DisplayState::DataAvailable
        }
        _ => DisplayState::NoData,
    }
}
