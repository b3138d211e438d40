//! Non-fatal diagnostics reported alongside computed regressors

use std::fmt;

use serde::{Deserialize, Serialize};

/// A condition worth reporting that does not stop the computation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// Some onsets fall before the start of the high-resolution grid.
    ///
    /// Those events are still sampled, with their onset index clamped to the
    /// first grid sample.
    EarlyOnset {
        /// Grid start, `frame_times[0] + min_onset` (s)
        cutoff: f64,
        /// Number of offending events
        count: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EarlyOnset { cutoff, count } => write!(
                f,
                "{count} stimulus onset(s) earlier than {cutoff}s, before the start of the high-resolution grid"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_early_onset_message() {
        let diagnostic = Diagnostic::EarlyOnset { cutoff: -24.0, count: 2 };
        assert_eq!(
            diagnostic.to_string(),
            "2 stimulus onset(s) earlier than -24s, before the start of the high-resolution grid"
        );
    }
}
