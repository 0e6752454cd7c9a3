//! Development diagnostics
//!
//! Non-fatal warnings for malformed references and failed fetches. They are
//! logged through `tracing` and kept for inspection; emitting one never
//! interrupts rendering. Only the most recent [`MAX_RECORDS`] are kept.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;

/// Recorded diagnostics kept before the oldest is dropped
pub const MAX_RECORDS: usize = 256;

/// A single development warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The href was missing or empty
    InvalidHref { href: Option<String> },
    /// The sprite sheet at `url` could not be fetched
    FetchFailed { url: String, reason: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHref { href: Some(href) } => write!(f, "invalid href provided ({href:?})"),
            Self::InvalidHref { href: None } => write!(f, "invalid href provided (none)"),
            Self::FetchFailed { url, reason } => write!(f, "failed to load sprite {url}: {reason}"),
        }
    }
}

/// Diagnostics sink
#[derive(Debug)]
pub struct Diagnostics {
    enabled: bool,
    records: RefCell<VecDeque<Diagnostic>>,
}

impl Diagnostics {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            records: RefCell::new(VecDeque::new()),
        }
    }

    /// Enabled in debug builds only
    pub fn for_build() -> Self {
        Self::new(cfg!(debug_assertions))
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log and record a diagnostic, if enabled
    pub fn emit(&self, diagnostic: Diagnostic) {
        if !self.enabled {
            return;
        }
        tracing::warn!("sprite-polyfill: {}", diagnostic);
        let mut records = self.records.borrow_mut();
        if records.len() == MAX_RECORDS {
            records.pop_front();
        }
        records.push_back(diagnostic);
    }

    /// Recorded diagnostics, oldest first
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.borrow().iter().cloned().collect()
    }

    /// Drain recorded diagnostics
    pub fn take(&self) -> Vec<Diagnostic> {
        self.records.borrow_mut().drain(..).collect()
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::for_build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_records() {
        let diagnostics = Diagnostics::new(true);
        diagnostics.emit(Diagnostic::InvalidHref { href: None });

        assert_eq!(diagnostics.records(), vec![Diagnostic::InvalidHref { href: None }]);
        assert_eq!(diagnostics.take().len(), 1);
        assert!(diagnostics.records().is_empty());
    }

    #[test]
    fn test_records_capped_oldest_dropped() {
        let diagnostics = Diagnostics::new(true);
        for i in 0..MAX_RECORDS + 10 {
            diagnostics.emit(Diagnostic::InvalidHref { href: Some(i.to_string()) });
        }

        let records = diagnostics.records();
        assert_eq!(records.len(), MAX_RECORDS);
        assert_eq!(records[0], Diagnostic::InvalidHref { href: Some("10".into()) });
        assert_eq!(
            records[MAX_RECORDS - 1],
            Diagnostic::InvalidHref { href: Some((MAX_RECORDS + 9).to_string()) }
        );
    }

    #[test]
    fn test_disabled_is_silent() {
        let diagnostics = Diagnostics::disabled();
        diagnostics.emit(Diagnostic::FetchFailed {
            url: "sprite.svg".into(),
            reason: "boom".into(),
        });
        assert!(diagnostics.records().is_empty());
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::FetchFailed { url: "a.svg".into(), reason: "HTTP error: 404".into() };
        assert_eq!(d.to_string(), "failed to load sprite a.svg: HTTP error: 404");
    }
}
