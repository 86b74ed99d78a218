use std::time::{Duration, Instant};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Guards the search against exceeding its configured budgets. Checked at every node boundary.
#[derive(Debug, Clone)]
pub struct Interrupter {
    start_time: Instant,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
    stop_flag: Option<Arc<AtomicBool>>,
}

impl Interrupter {

    /// Creates a new Interrupter.
    /// If `max_seconds` is given, `self.check_interrupt(..)` becomes true after that much
    /// wall-clock time has passed, if `max_nodes` is given, once that many nodes were counted.
    /// An optional shared `stop_flag` interrupts from the outside, for example on ctrl-c.
    pub fn new(
        max_seconds: Option<f64>,
        max_nodes: Option<u64>,
        stop_flag: Option<Arc<AtomicBool>>,
    ) -> Self {
        Interrupter {
            start_time: Instant::now(),
            time_limit: max_seconds.map(|secs| Duration::from_secs_f64(secs.max(0.0))),
            node_limit: max_nodes,
            stop_flag,
        }
    }

    /// Checks if any budget is exhausted or an external stop was requested, given that `nodes`
    /// nodes were counted so far.
    ///
    /// On default this always returns false.
    pub fn check_interrupt(&self, nodes: u64) -> bool {
        if let Some(limit) = self.node_limit {
            if nodes >= limit {
                return true
            }
        }
        if let Some(limit) = self.time_limit {
            if self.start_time.elapsed() >= limit {
                return true
            }
        }
        if let Some(flag) = &self.stop_flag {
            if flag.load(Ordering::Relaxed) {
                return true
            }
        }
        false
    }

    /// Wall-clock time since the interrupter was created.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_limits_test() {
        let interrupter = Interrupter::new(None, None, None);
        assert!(!interrupter.check_interrupt(u64::MAX));
    }

    #[test]
    fn node_limit_test() {
        let interrupter = Interrupter::new(None, Some(5), None);
        assert!(!interrupter.check_interrupt(4));
        assert!(interrupter.check_interrupt(5));
        assert!(interrupter.check_interrupt(6));
    }

    #[test]
    fn zero_time_limit_test() {
        let interrupter = Interrupter::new(Some(0.0), None, None);
        assert!(interrupter.check_interrupt(0));
    }

    #[test]
    fn stop_flag_test() {
        let flag = Arc::new(AtomicBool::new(false));
        let interrupter = Interrupter::new(None, None, Some(flag.clone()));
        assert!(!interrupter.check_interrupt(0));
        flag.store(true, Ordering::Relaxed);
        assert!(interrupter.check_interrupt(0));
    }

}
