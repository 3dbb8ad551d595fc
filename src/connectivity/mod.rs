//! Connectivity probe for the offline indicator
//!
//! Display-only: the review surface shows an OFFLINE badge when the device
//! has no network, but every operation works the same either way.

use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

/// Probed endpoints; reaching any one of them counts as online
const PROBE_ADDRS: [&str; 2] = ["1.1.1.1:443", "8.8.8.8:53"];

/// Per-endpoint dial timeout
const PROBE_TIMEOUT: Duration = Duration::from_millis(400);

/// Boolean "is the device online" signal
pub trait ConnectivitySignal {
    fn is_online(&self) -> bool;
}

/// Reachability check via a bounded TCP dial
#[derive(Default)]
pub struct NetProbe;

impl ConnectivitySignal for NetProbe {
    fn is_online(&self) -> bool {
        PROBE_ADDRS.iter().any(|addr| {
            addr.parse::<SocketAddr>()
                .ok()
                .and_then(|a| TcpStream::connect_timeout(&a, PROBE_TIMEOUT).ok())
                .is_some()
        })
    }
}

/// Polls a signal and reports status changes.
///
/// The first poll always reports a change so callers can render the
/// initial badge.
pub struct ConnectivityMonitor<S: ConnectivitySignal> {
    signal: S,
    last: Option<bool>,
}

impl<S: ConnectivitySignal> ConnectivityMonitor<S> {
    pub fn new(signal: S) -> Self {
        Self { signal, last: None }
    }

    /// Current status, and whether it differs from the previous poll
    pub fn poll(&mut self) -> (bool, bool) {
        let online = self.signal.is_online();
        let changed = self.last != Some(online);
        self.last = Some(online);
        (online, changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted(std::cell::RefCell<Vec<bool>>);

    impl ConnectivitySignal for Scripted {
        fn is_online(&self) -> bool {
            self.0.borrow_mut().remove(0)
        }
    }

    #[test]
    fn monitor_reports_transitions_only() {
        let signal = Scripted(std::cell::RefCell::new(vec![true, true, false, false, true]));
        let mut monitor = ConnectivityMonitor::new(signal);

        assert_eq!(monitor.poll(), (true, true));
        assert_eq!(monitor.poll(), (true, false));
        assert_eq!(monitor.poll(), (false, true));
        assert_eq!(monitor.poll(), (false, false));
        assert_eq!(monitor.poll(), (true, true));
    }
}
