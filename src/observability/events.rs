//! Observable events for remote history fetching
//!
//! Events are explicit and typed. Each maps to a stable
//! SCREAMING_SNAKE name used as the `event` key of a log line.

use std::fmt;

use super::logger::Severity;

/// Observable events emitted while paging remote history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Page fetches
    /// One page returned by the remote cluster
    HistoryPageFetched,
    /// A page fetch failed; the iterator is now terminal
    HistoryFetchFailed,

    // Client directory
    /// Remote admin client registered for a cluster
    RemoteClientRegistered,
    /// Remote admin client removed for a cluster
    RemoteClientDeregistered,
    /// Registration dropped because the directory lock is poisoned
    RemoteClientRegistrationFailed,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::HistoryPageFetched => "HISTORY_PAGE_FETCHED",
            Event::HistoryFetchFailed => "HISTORY_FETCH_FAILED",
            Event::RemoteClientRegistered => "REMOTE_CLIENT_REGISTERED",
            Event::RemoteClientDeregistered => "REMOTE_CLIENT_DEREGISTERED",
            Event::RemoteClientRegistrationFailed => "REMOTE_CLIENT_REGISTRATION_FAILED",
        }
    }

    /// Default severity for this event
    pub fn severity(&self) -> Severity {
        match self {
            Event::HistoryFetchFailed => Severity::Error,
            Event::RemoteClientRegistrationFailed => Severity::Warn,
            Event::HistoryPageFetched => Severity::Trace,
            Event::RemoteClientRegistered | Event::RemoteClientDeregistered => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake() {
        let events = [
            Event::HistoryPageFetched,
            Event::HistoryFetchFailed,
            Event::RemoteClientRegistered,
            Event::RemoteClientDeregistered,
            Event::RemoteClientRegistrationFailed,
        ];
        for event in events {
            let name = event.as_str();
            assert!(name.chars().all(|c| c.is_ascii_uppercase() || c == '_'), "{}", name);
        }
    }

    #[test]
    fn test_fetch_failure_is_error() {
        assert_eq!(Event::HistoryFetchFailed.severity(), Severity::Error);
        assert_eq!(Event::HistoryPageFetched.severity(), Severity::Trace);
    }
}
