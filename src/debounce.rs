//! Trailing-edge debounce.
//!
//! DESIGN
//! ======
//! [`Debouncer`] is the timer-free state machine: each `call` replaces the
//! pending arguments and pushes the deadline to `now + wait`; the host polls
//! `take_due` from its timer callback. [`Debounced`] pairs that state with the
//! callback it guards. In the browser, `web::timer::debounce` polls a
//! [`Debounced`] from a `gloo_timers` `Timeout` that is replaced per call.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

/// Pending-call state for a debounced function taking `A`.
#[derive(Clone, Debug)]
pub struct Debouncer<A> {
    wait_ms: u64,
    pending: Option<(u64, A)>,
}

impl<A> Debouncer<A> {
    #[must_use]
    pub fn new(wait_ms: u64) -> Self {
        Self { wait_ms, pending: None }
    }

    /// Record a call at `now_ms`, superseding any pending one.
    pub fn call(&mut self, now_ms: u64, args: A) {
        self.pending = Some((now_ms.saturating_add(self.wait_ms), args));
    }

    /// Drop the pending call, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Deadline of the pending call.
    #[must_use]
    pub fn pending_deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Hand out the latest arguments once the quiet period has elapsed.
    pub fn take_due(&mut self, now_ms: u64) -> Option<A> {
        match self.pending {
            Some((deadline, _)) if now_ms >= deadline => self.pending.take().map(|(_, args)| args),
            _ => None,
        }
    }
}

/// A callback wrapped so bursts collapse into one trailing invocation.
pub struct Debounced<A, F>
where
    F: FnMut(A),
{
    state: Debouncer<A>,
    func: F,
}

impl<A, F> Debounced<A, F>
where
    F: FnMut(A),
{
    #[must_use]
    pub fn new(wait_ms: u64, func: F) -> Self {
        Self { state: Debouncer::new(wait_ms), func }
    }

    pub fn call(&mut self, now_ms: u64, args: A) {
        self.state.call(now_ms, args);
    }

    pub fn cancel(&mut self) {
        self.state.cancel();
    }

    #[must_use]
    pub fn pending_deadline(&self) -> Option<u64> {
        self.state.pending_deadline()
    }

    /// Run the callback if its deadline has passed. Returns whether it ran.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.state.take_due(now_ms) {
            Some(args) => {
                (self.func)(args);
                true
            }
            None => false,
        }
    }
}
