//! Browser timers for [`Debounced`] callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

use crate::clock::{Clock, SystemClock};
use crate::debounce::Debounced;

/// A debounced callback driven by a gloo [`Timeout`]. Each call replaces the
/// stored timeout, which cancels the previous one.
pub struct DebouncedFn<A: 'static> {
    wait_ms: u32,
    state: Rc<RefCell<Debounced<A, Box<dyn FnMut(A)>>>>,
    timer: RefCell<Option<Timeout>>,
}

/// Wrap `f` so bursts of calls collapse into one trailing call `wait_ms`
/// after the last of them.
pub fn debounce<A: 'static>(wait_ms: u32, f: impl FnMut(A) + 'static) -> DebouncedFn<A> {
    let func: Box<dyn FnMut(A)> = Box::new(f);
    DebouncedFn {
        wait_ms,
        state: Rc::new(RefCell::new(Debounced::new(u64::from(wait_ms), func))),
        timer: RefCell::new(None),
    }
}

impl<A: 'static> DebouncedFn<A> {
    pub fn call(&self, args: A) {
        self.state.borrow_mut().call(SystemClock.now_ms(), args);
        let state = Rc::clone(&self.state);
        let timer = Timeout::new(self.wait_ms, move || {
            let mut state = state.borrow_mut();
            // Only the latest timeout survives, so its deadline is due even
            // if the clock reads a millisecond short.
            if let Some(deadline) = state.pending_deadline() {
                state.poll(deadline);
            }
        });
        *self.timer.borrow_mut() = Some(timer);
    }

    /// Drop the pending call; safe with nothing pending.
    pub fn cancel(&self) {
        self.timer.borrow_mut().take();
        self.state.borrow_mut().cancel();
    }
}
