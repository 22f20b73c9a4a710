#![forbid(unsafe_code)]

//! Host-supplied list configuration.

use std::fmt;
use std::time::Duration;

use crate::gesture::CLICK_THRESHOLD;

/// Default duration of delete and sibling transitions.
pub const DEFAULT_TRANSITION_DURATION: Duration = Duration::from_millis(300);

/// Upper bound accepted for [`ListConfig::transition_duration`].
pub const MAX_TRANSITION_DURATION: Duration = Duration::from_secs(10);

/// Behaviour switches for one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ListConfig {
    /// Animate the items below a removed item before finalizing the removal.
    pub enable_delete_transitions: bool,
    /// How long the host's transform transitions run.
    pub transition_duration: Duration,
    /// Allow press-and-hold to start a drag. Clicks work either way.
    pub is_draggable: bool,
    /// Press duration separating a click from a drag (default: 200ms).
    pub click_threshold: Duration,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            enable_delete_transitions: true,
            transition_duration: DEFAULT_TRANSITION_DURATION,
            is_draggable: true,
            click_threshold: CLICK_THRESHOLD,
        }
    }
}

impl ListConfig {
    #[must_use]
    pub fn with_delete_transitions(mut self, enabled: bool) -> Self {
        self.enable_delete_transitions = enabled;
        self
    }

    #[must_use]
    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }

    #[must_use]
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.is_draggable = draggable;
        self
    }

    #[must_use]
    pub fn with_click_threshold(mut self, threshold: Duration) -> Self {
        self.click_threshold = threshold;
        self
    }

    /// Reject configurations the controller cannot honour.
    pub fn validate(&self) -> Result<(), ListConfigError> {
        if self.click_threshold.is_zero() {
            return Err(ListConfigError::ZeroClickThreshold);
        }
        if self.transition_duration > MAX_TRANSITION_DURATION {
            return Err(ListConfigError::TransitionDurationTooLong {
                duration: self.transition_duration,
            });
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListConfigError {
    ZeroClickThreshold,
    TransitionDurationTooLong { duration: Duration },
}

impl fmt::Display for ListConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroClickThreshold => write!(f, "click threshold must be > 0"),
            Self::TransitionDurationTooLong { duration } => write!(
                f,
                "transition duration {}ms exceeds {}ms",
                duration.as_millis(),
                MAX_TRANSITION_DURATION.as_millis()
            ),
        }
    }
}

impl std::error::Error for ListConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = ListConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.click_threshold, Duration::from_millis(200));
        assert!(config.is_draggable);
        assert!(config.enable_delete_transitions);
    }

    #[test]
    fn zero_threshold_rejected() {
        let config = ListConfig::default().with_click_threshold(Duration::ZERO);
        assert_eq!(config.validate(), Err(ListConfigError::ZeroClickThreshold));
    }

    #[test]
    fn long_transition_rejected() {
        let config = ListConfig::default().with_transition_duration(Duration::from_secs(11));
        let err = config.validate().expect_err("too long");
        assert_eq!(err.to_string(), "transition duration 11000ms exceeds 10000ms");
    }

    #[test]
    fn builders() {
        let config = ListConfig::default()
            .with_delete_transitions(false)
            .with_draggable(false)
            .with_transition_duration(Duration::from_millis(150));
        assert!(!config.enable_delete_transitions);
        assert!(!config.is_draggable);
        assert_eq!(config.transition_duration, Duration::from_millis(150));
    }
}
