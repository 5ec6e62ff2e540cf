//! Delays and display durations used by the form

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Quiet period before an implicit save after typing
    pub autosave_delay: Duration,
    /// Delay of an explicit save request
    pub manual_save_delay: Duration,
    /// How long the submission is shown as in flight
    pub submit_delay: Duration,
    /// Lifetime of an assistive-technology announcement
    pub announcement_duration: Duration,
    /// Lifetime of a toast notification
    pub toast_duration: Duration,
    /// Length of a smooth scroll between questions
    pub scroll_duration: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            autosave_delay: Duration::from_millis(800),
            manual_save_delay: Duration::from_millis(100),
            submit_delay: Duration::from_millis(1500),
            announcement_duration: Duration::from_millis(1000),
            toast_duration: Duration::from_millis(2000),
            scroll_duration: Duration::from_millis(300),
        }
    }
}
