use crate::*;
use crate::meta::Meta;

use core::alloc::Layout;
use core::cell::Cell;
use core::fmt::{self, Debug, Display, Formatter};



/// Wraps another allocator, counting allocations and frees.
///
/// Typically shared by reference (<code>&amp;[Tracking]&lt;A&gt;</code> is itself an allocator) so that every box, copy,
/// and moved-into box reports to the same counters.  An optional limit on outstanding allocations makes it easy to
/// inject allocation failures at a precise point.
///
/// ## Examples
/// ```
/// use indirect::{allocator::{alloc::Global, debug::Tracking}, Indirect};
/// let tracking = Tracking::new(Global);
/// {
///     let a = Indirect::new_in(1_u32, &tracking);
///     let b = a.clone();
///     assert_eq!(tracking.outstanding(), 2);
/// }
/// assert_eq!(tracking.outstanding(), 0);
///
/// tracking.set_limit(0);
/// assert!(Indirect::try_new_in(2_u32, &tracking).is_err());
/// ```
#[derive(Debug)] pub struct Tracking<A> {
    inner:  A,
    allocs: Cell<usize>,
    frees:  Cell<usize>,
    limit:  Cell<usize>,
}

impl<A> Tracking<A> {
    /// Wrap `inner` with no limit on outstanding allocations.
    pub const fn new(inner: A) -> Self {
        Self { inner, allocs: Cell::new(0), frees: Cell::new(0), limit: Cell::new(usize::MAX) }
    }

    /// The wrapped allocator.
    pub fn inner(&self) -> &A { &self.inner }

    /// Total successful allocations made so far.
    pub fn allocs(&self) -> usize { self.allocs.get() }

    /// Total frees made so far.
    pub fn frees(&self) -> usize { self.frees.get() }

    /// Allocations made but not yet freed.
    pub fn outstanding(&self) -> usize { self.allocs.get() - self.frees.get() }

    /// Refuse allocations that would bring [`outstanding`](Self::outstanding) above `limit`.
    pub fn set_limit(&self, limit: usize) { self.limit.set(limit) }

    fn track<P: Debug>(&self, layout: Layout, alloc: impl FnOnce(&A) -> Result<P, A::Error>) -> Result<P, TrackingError<A::Error>> where A : Meta {
        let limit = self.limit.get();
        if self.outstanding() >= limit {
            log::debug!("Tracking: refusing to allocate {layout:?}, {limit} allocation(s) already outstanding");
            return Err(TrackingError::LimitExceeded { limit });
        }
        let ptr = alloc(&self.inner).map_err(TrackingError::Inner)?;
        self.allocs.set(self.allocs.get() + 1);
        log::trace!("Tracking: allocated {layout:?} at {ptr:?} ({} outstanding)", self.outstanding());
        Ok(ptr)
    }
}



/// A [`Tracking`] allocator refused or failed to allocate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)] pub enum TrackingError<E> {
    /// [`Tracking::set_limit`] outstanding allocations were already live.
    LimitExceeded { limit: usize },

    /// The wrapped allocator failed.
    Inner(E),
}

impl<E: Debug> Display for TrackingError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::LimitExceeded { limit }   => write!(f, "allocation limit of {limit} outstanding allocation(s) reached"),
            Self::Inner(e)                  => write!(f, "underlying allocator failed: {e:?}"),
        }
    }
}

#[cfg(feature = "std")] impl<E: Debug> std::error::Error for TrackingError<E> {}



impl<A: Meta> Meta for Tracking<A> {
    type Error                      = TrackingError<A::Error>;
    const MAX_ALIGN     : Alignment = A::MAX_ALIGN;
    const MAX_SIZE      : usize     = A::MAX_SIZE;
    const ZST_SUPPORTED : bool      = A::ZST_SUPPORTED;
}

// SAFETY: ✔️ forwards to `A`'s allocations untouched.  `Tracking` isn't `Clone` - share it by reference instead.
unsafe impl<A: fat::Alloc> fat::Alloc for Tracking<A> {
    fn alloc_uninit(&self, layout: Layout) -> Result<AllocNN,  Self::Error> { self.track(layout, |a| a.alloc_uninit(layout)) }
    fn alloc_zeroed(&self, layout: Layout) -> Result<AllocNN0, Self::Error> { self.track(layout, |a| a.alloc_zeroed(layout)) }
}

// SAFETY: ✔️ forwards to `A`'s frees untouched
unsafe impl<A: fat::Free> fat::Free for Tracking<A> {
    #[track_caller] unsafe fn free(&self, ptr: AllocNN, layout: Layout) {
        if self.outstanding() == 0 { bug::ub::freed_more_than_allocated(ptr) }
        self.frees.set(self.frees.get() + 1);
        log::trace!("Tracking: freed {layout:?} at {ptr:?} ({} outstanding)", self.outstanding());
        // SAFETY: ✔️ `ptr` belongs to `self.inner` per [`fat::Free::free`]'s documented safety preconditions
        unsafe { self.inner.free(ptr, layout) }
    }
}



#[cfg(test)] mod tests {
    use super::*;
    use crate::allocator::{alloc::Global, debug::Null};
    use fat::{Alloc, Free};

    #[test] fn counts() {
        let tracking = Tracking::new(Global);
        let layout = Layout::new::<u64>();
        let a = tracking.alloc_uninit(layout).unwrap();
        let b = tracking.alloc_zeroed(layout).unwrap();
        assert_eq!((tracking.allocs(), tracking.frees(), tracking.outstanding()), (2, 0, 2));
        // SAFETY: ✔️ both were just allocated by `tracking` with `layout`
        unsafe { tracking.free(a, layout) };
        unsafe { tracking.free(b.cast(), layout) };
        assert_eq!((tracking.allocs(), tracking.frees(), tracking.outstanding()), (2, 2, 0));
    }

    #[test] fn limit() {
        let tracking = Tracking::new(Global);
        let layout = Layout::new::<u64>();
        tracking.set_limit(1);
        let a = tracking.alloc_uninit(layout).unwrap();
        assert_eq!(tracking.alloc_uninit(layout).unwrap_err(), TrackingError::LimitExceeded { limit: 1 });
        // SAFETY: ✔️ `a` was just allocated by `tracking` with `layout`
        unsafe { tracking.free(a, layout) };
        let a = tracking.alloc_uninit(layout).unwrap();
        // SAFETY: ✔️ `a` was just allocated by `tracking` with `layout`
        unsafe { tracking.free(a, layout) };
        assert_eq!(tracking.outstanding(), 0);
    }

    #[test] fn inner_failure_is_not_counted() {
        let tracking = Tracking::new(Null);
        assert_eq!(tracking.alloc_uninit(Layout::new::<u8>()).unwrap_err(), TrackingError::Inner(()));
        assert_eq!(tracking.allocs(), 0);
    }

    #[test] #[should_panic = "would free more allocations than were ever made"] fn overfree_is_a_bug() {
        let tracking = Tracking::new(Global);
        // SAFETY: ❌ intentionally violating `free`'s preconditions to check they're reported
        unsafe { tracking.free(core::ptr::NonNull::dangling(), Layout::new::<u8>()) }
    }
}
