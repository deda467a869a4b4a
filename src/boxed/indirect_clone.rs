use crate::*;
use crate::boxed::Indirect;
use fat::{Alloc, Free};

use core::alloc::Layout;



#[cfg(feature = "panicy-memory")] impl<T: Clone, A: Alloc + Free + Clone> Clone for Indirect<T, A> {
    /// Allocate a new box that clones the contents of `self` using `Indirect::allocator(self).clone()`
    ///
    /// ## Failure Modes
    /// *   [`panic!`]s if `self` is valueless
    /// *   [`panic!`]s when out of memory
    #[track_caller] fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| bug::oom(Layout::new::<T>(), err))
    }

    /// Replace the contents of `self` with a clone of `source`'s contents (and allocator.)
    ///
    /// The clone is fully built before `self` is touched: if cloning panics, `self` is left exactly as it was.
    ///
    /// ## Failure Modes
    /// *   [`panic!`]s if `source` is valueless
    /// *   [`panic!`]s when out of memory
    #[track_caller] fn clone_from(&mut self, source: &Self) {
        self.try_clone_from(source).unwrap_or_else(|err| bug::oom(Layout::new::<T>(), err))
    }
}

/// Non-panicing alternatives to [`Clone`] / support for alternative allocators.
impl<T: Clone, A: Free> Indirect<T, A> {
    /// Allocate a new box that clones the contents of `self` using `Indirect::allocator(self).clone()`.
    ///
    /// The copy is independent of `self`: it has its own storage, and mutating either leaves the other untouched.
    ///
    /// ## Failure Modes
    /// *   [`panic!`]s if `self` is valueless
    /// *   Returns <code>[Err]\(...\)</code> when out of memory
    ///
    /// ## Examples
    /// ```
    /// use indirect::{allocator::c::Malloc, Indirect};
    /// let a = Indirect::new_in('a', Malloc);
    /// let mut b = a.try_clone().unwrap();
    /// *b = 'b';
    /// assert_eq!((*a, *b), ('a', 'b'));
    /// ```
    #[track_caller] pub fn try_clone(&self) -> Result<Self, A::Error> where A : Alloc + Clone {
        self.try_clone_in(Self::allocator(self).clone())
    }

    /// Allocate a new box that clones the contents of `self` using `allocator`.
    ///
    /// ## Failure Modes
    /// *   Fails to compile on impossible alignments (e.g. attempting to allocate 4 KiB alignment pages via 8/16 byte aligned malloc)
    /// *   [`panic!`]s if `self` is valueless
    /// *   Returns <code>[Err]\(...\)</code> when out of memory
    ///
    /// ## Examples
    /// ```
    /// use indirect::{allocator::{alloc::Global, c::Malloc, debug::Null}, Indirect};
    /// let a = Indirect::new_in(42_u32, Malloc);
    /// let b = a.try_clone_in(Global).unwrap();
    /// let err = a.try_clone_in(Null).unwrap_err();
    /// assert_eq!(*b, 42);
    /// ```
    #[track_caller] pub fn try_clone_in<A2: Alloc + Free>(&self, allocator: A2) -> Result<Indirect<T, A2>, A2::Error> {
        let Some(data) = self.data() else { bug::valueless::clone() };
        // SAFETY: ✔️ `data` points to a valid `T` owned by `self`, which we're borrowing
        let value = unsafe { data.as_ref() };
        Indirect::try_new_with_in(|| T::clone(value), allocator)
    }

    /// Replace the contents of `self` with a clone of `source`'s contents (and allocator.)
    ///
    /// This has the strong exception safety guarantee: the clone is built first, and only then swapped into `self`.
    /// If allocation fails or `T::clone` panics, `self` is untouched.  `self` may be valueless beforehand.
    ///
    /// ## Failure Modes
    /// *   [`panic!`]s if `source` is valueless
    /// *   Returns <code>[Err]\(...\)</code> when out of memory
    ///
    /// ## Examples
    /// ```
    /// use indirect::{allocator::c::Malloc, Indirect};
    /// let mut a = Indirect::new_in('a', Malloc);
    /// let     b = Indirect::new_in('b', Malloc);
    /// a.try_clone_from(&b).unwrap();
    /// assert_eq!(*a, 'b');
    /// ```
    #[track_caller] pub fn try_clone_from(&mut self, source: &Self) -> Result<(), A::Error> where A : Alloc + Clone {
        let mut copy = source.try_clone()?;
        Self::swap(self, &mut copy);
        Ok(())
    }
}



#[cfg(test)] mod tests {
    use crate::Indirect;
    use crate::allocator::{alloc::Global, debug::{Tracking, TrackingError}};
    use crate::util::drop::Tester;
    use alloc::{string::String, vec, vec::Vec};

    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test] fn copy_is_independent() {
        let a : Indirect<i32, Global> = Indirect::new(5);
        let mut b = a.clone();
        *b += 1;
        assert_eq!((*a, *b), (5, 6));
    }

    #[test] fn copy_allocates_from_source_allocator() {
        let tracking = Tracking::new(Global);
        let a = Indirect::new_in(Tester::new(31), &tracking);
        let b = a.clone();
        assert!(core::ptr::eq(*Indirect::allocator(&b), &tracking));
        assert_eq!(tracking.outstanding(), 2);
        assert_eq!(Tester::live(31), 2);
        assert_eq!(a, b);
    }

    #[test] #[should_panic = "copy from a valueless Indirect"] fn copy_from_valueless() {
        let mut a : Indirect<i32, Global> = Indirect::new(5);
        let _b = Indirect::take(&mut a);
        let _c = a.clone();
    }

    #[test] fn copy_panic_frees() {
        let tracking = Tracking::new(Global);
        let a = Indirect::new_in(Tester::panicky(32), &tracking);
        let r = catch_unwind(AssertUnwindSafe(|| a.clone()));
        assert!(r.is_err());
        assert_eq!(tracking.outstanding(), 1);
        assert_eq!(Tester::live(32), 1);
    }

    #[test] fn copy_assign() {
        let mut a : Indirect<Vec<u8>, Global> = Indirect::new(vec![1, 2, 3]);
        let     b : Indirect<Vec<u8>, Global> = Indirect::new(vec![4]);
        a.clone_from(&b);
        assert_eq!(*a, [4]);
        assert_eq!(*b, [4]);
        a.push(5);
        assert_eq!(*b, [4]);
    }

    #[test] fn copy_assign_into_valueless() {
        let mut a : Indirect<String, Global> = Indirect::new(String::from("a"));
        let     b : Indirect<String, Global> = Indirect::new(String::from("b"));
        let _c = Indirect::take(&mut a);
        a.clone_from(&b);
        assert!(!Indirect::is_valueless(&a));
        assert_eq!(*a, "b");
    }

    #[test] fn copy_assign_takes_source_allocator() {
        let ta = Tracking::new(Global);
        let tb = Tracking::new(Global);
        let mut a = Indirect::new_in(1_u32, &ta);
        let     b = Indirect::new_in(2_u32, &tb);
        a.clone_from(&b);
        assert!(core::ptr::eq(*Indirect::allocator(&a), &tb));
        assert_eq!((ta.outstanding(), tb.outstanding()), (0, 2));
    }

    #[test] fn copy_assign_panic_is_strongly_safe() {
        let tracking = Tracking::new(Global);
        let mut a = Indirect::new_in(Tester::new(33), &tracking);
        let     b = Indirect::new_in(Tester::panicky(34), &tracking);
        let r = catch_unwind(AssertUnwindSafe(|| a.clone_from(&b)));
        assert!(r.is_err());
        assert_eq!(a.get(), 33);
        assert_eq!(b.get(), 34);
        assert_eq!((Tester::live(33), Tester::live(34)), (1, 1));
        assert_eq!(tracking.outstanding(), 2);
    }

    #[test] fn copy_assign_alloc_failure_is_strongly_safe() {
        let tracking = Tracking::new(Global);
        let mut a = Indirect::new_in(Tester::new(35), &tracking);
        let     b = Indirect::new_in(Tester::new(36), &tracking);
        tracking.set_limit(2);
        assert_eq!(a.try_clone_from(&b), Err(TrackingError::LimitExceeded { limit: 2 }));
        assert_eq!(a.get(), 35);
        assert_eq!((Tester::live(35), Tester::live(36)), (1, 1));
    }
}
