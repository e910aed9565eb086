//! In-flight guard for controls that issue requests.

/// Per-control in-flight flag.
///
/// Views keep the flag on the element itself (the browser crate uses
/// `aria-busy`), so every copy of a control on the page shares it.
pub trait Busy {
    /// Whether a request is pending.
    fn is_busy(&self) -> bool;
    /// Set or clear the flag.
    fn set_busy(&self, busy: bool);
}

/// Holds a control's busy flag for the duration of one request and
/// releases it on drop, including early returns and errors.
pub struct BusyGuard<'a, B: Busy + ?Sized> {
    target: &'a B,
}

impl<'a, B: Busy + ?Sized> BusyGuard<'a, B> {
    /// `None` when a request for this control is already in flight.
    pub fn acquire(target: &'a B) -> Option<Self> {
        if target.is_busy() {
            return None;
        }
        target.set_busy(true);
        Some(Self {
            target,
        })
    }
}

impl<B: Busy + ?Sized> Drop for BusyGuard<'_, B> {
    fn drop(&mut self) {
        self.target.set_busy(false);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::{Busy, BusyGuard};

    #[derive(Default)]
    struct Flag(Cell<bool>);

    impl Busy for Flag {
        fn is_busy(&self) -> bool {
            self.0.get()
        }

        fn set_busy(&self, busy: bool) {
            self.0.set(busy);
        }
    }

    #[test]
    fn second_acquire_is_refused_until_release() {
        let flag = Flag::default();
        let guard = BusyGuard::acquire(&flag).expect("first acquire");
        assert!(flag.is_busy());
        assert!(BusyGuard::acquire(&flag).is_none());

        drop(guard);
        assert!(!flag.is_busy());
        assert!(BusyGuard::acquire(&flag).is_some());
    }
}
