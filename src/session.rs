//! The measurement-session collaborator interface. The engine only ever
//! brackets the timed region with these four calls; what gets counted
//! behind them (hardware counters, RAPL, nothing at all) is someone else's
//! concern. Measured values go to stderr, keeping stdout for the primary
//! result stream. A misbehaving session warns and reports zeros; it never
//! aborts the multiplication.

use std::time::Instant;

pub trait Session {
    /// One-time setup, before the run.
    fn init(&mut self);
    /// Begins the measured region.
    fn start(&mut self);
    /// Ends the measured region and emits measured values to the
    /// diagnostic channel.
    fn end(&mut self);
    /// Final cleanup after all measured regions.
    fn finalize(&mut self);
}

/// Wall-clock session: the measured value is elapsed seconds.
#[derive(Default)]
pub struct WallClock {
    inited: bool,
    started: Option<Instant>,
}

impl WallClock {
    pub fn new() -> WallClock {
        WallClock::default()
    }
}

impl Session for WallClock {
    fn init(&mut self) {
        self.inited = true;
    }

    fn start(&mut self) {
        if !self.inited {
            eprintln!("[session][WARN] start before init; continuing unmeasured");
            return;
        }
        self.started = Some(Instant::now());
    }

    fn end(&mut self) {
        match self.started.take() {
            Some(t0) => {
                eprintln!("[session] elapsed_seconds={}", crate::util::dur_seconds(t0))
            }
            None => eprintln!("[session][WARN] end without start; elapsed_seconds=0"),
        }
    }

    fn finalize(&mut self) {
        self.inited = false;
    }
}

/// No-op session for runs where measurement is switched off.
pub struct Disabled;

impl Session for Disabled {
    fn init(&mut self) {}
    fn start(&mut self) {}
    fn end(&mut self) {}
    fn finalize(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_calls_do_not_panic() {
        let mut s = WallClock::new();
        // Out-of-order bracketing warns but must not abort the run.
        s.start();
        s.end();
        s.init();
        s.end();
        s.finalize();
    }

    #[test]
    fn normal_bracketing() {
        let mut s = WallClock::new();
        s.init();
        s.start();
        s.end();
        s.finalize();
    }
}
