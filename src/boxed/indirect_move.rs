use crate::*;
use crate::boxed::Indirect;
use fat::Free;



impl<T, A: Free> Indirect<T, A> {
    /// Move the value out of `source` into a new box, without allocating.
    ///
    /// The new box takes over `source`'s storage and a clone of its allocator.
    /// `source` is left valueless (see [`Indirect`]'s documentation for what that permits.)
    ///
    /// ## Panics
    /// *   If `source` is valueless
    ///
    /// ## Examples
    /// ```
    /// use indirect::{allocator::alloc::Global, Indirect};
    /// let mut a : Indirect<i32, Global> = Indirect::new(5);
    /// let b = Indirect::take(&mut a);
    /// assert!(Indirect::is_valueless(&a));
    /// assert_eq!(*b, 5);
    /// ```
    #[track_caller] pub fn take(source: &mut Self) -> Self where A : Clone {
        if Self::is_valueless(source) { bug::valueless::take() }
        let allocator = Self::allocator(source).clone();
        let mut target = Self::valueless_in(allocator);
        Self::take_from(&mut target, source);
        target
    }

    /// Destroy the value of `this` (if any), then move the value *and* allocator of `source` into it, without allocating.
    ///
    /// `source` is left valueless, holding whichever allocator `this` previously held.
    ///
    /// ## Panics
    /// *   If `source` is valueless (`this` is untouched in that case)
    ///
    /// ## Examples
    /// ```
    /// use indirect::{allocator::alloc::Global, Indirect};
    /// let mut a : Indirect<i32, Global> = Indirect::new(1);
    /// let mut b : Indirect<i32, Global> = Indirect::new(2);
    /// Indirect::take_from(&mut a, &mut b);
    /// assert_eq!(*a, 2);
    /// assert!(Indirect::is_valueless(&b));
    ///
    /// // valueless boxes can be assigned to again
    /// Indirect::take_from(&mut b, &mut a);
    /// assert_eq!(*b, 2);
    /// ```
    #[track_caller] pub fn take_from(this: &mut Self, source: &mut Self) {
        if Self::is_valueless(source) { bug::valueless::take() }
        this.reset();
        this.swap_allocator(source);
        let data = source.take_data();
        // SAFETY: ✔️ `this` was reset and now holds the allocator that owns `data`, which `source` no longer references
        unsafe { this.set_data(data) };
    }

    /// Exchange the values *and* allocators of `a` and `b`, without allocating, copying, or moving either value.
    ///
    /// Either (or both) may be valueless.  Each box keeps the allocator that owns its (new) storage.
    /// This is equivalent to <code>[core::mem::swap]\(a, b\)</code>.
    ///
    /// ## Examples
    /// ```
    /// use indirect::{allocator::alloc::Global, Indirect};
    /// let mut a : Indirect<&str, Global> = Indirect::new("a");
    /// let mut b : Indirect<&str, Global> = Indirect::new("b");
    /// Indirect::swap(&mut a, &mut b);
    /// assert_eq!((*a, *b), ("b", "a"));
    /// ```
    pub fn swap(a: &mut Self, b: &mut Self) {
        core::mem::swap(a, b)
    }
}



#[cfg(test)] mod tests {
    use crate::Indirect;
    use crate::allocator::{alloc::Global, debug::Tracking};
    use crate::util::drop::Tester;

    #[test] fn take_does_not_allocate() {
        let tracking = Tracking::new(Global);
        let mut a = Indirect::new_in(Tester::new(41), &tracking);
        let b = Indirect::take(&mut a);
        assert!(Indirect::is_valueless(&a));
        assert_eq!(b.get(), 41);
        assert_eq!((tracking.allocs(), tracking.outstanding()), (1, 1));
        assert_eq!(Tester::live(41), 1);
        drop(a);
        assert_eq!(tracking.outstanding(), 1);
        drop(b);
        assert_eq!(tracking.outstanding(), 0);
        assert_eq!(Tester::live(41), 0);
    }

    #[test] #[should_panic = "move from a valueless Indirect"] fn take_from_valueless() {
        let mut a : Indirect<i32, Global> = Indirect::new(5);
        let _b = Indirect::take(&mut a);
        let _c = Indirect::take(&mut a);
    }

    #[test] fn take_from_destroys_previous_value() {
        let ta = Tracking::new(Global);
        let tb = Tracking::new(Global);
        let mut a = Indirect::new_in(Tester::new(42), &ta);
        let mut b = Indirect::new_in(Tester::new(43), &tb);
        Indirect::take_from(&mut a, &mut b);
        assert_eq!(a.get(), 43);
        assert!(Indirect::is_valueless(&b));
        assert!(core::ptr::eq(*Indirect::allocator(&a), &tb));
        assert_eq!((Tester::live(42), Tester::live(43)), (0, 1));
        assert_eq!((ta.outstanding(), tb.outstanding()), (0, 1));
        assert_eq!(tb.allocs(), 1);
    }

    #[test] fn take_from_into_valueless() {
        let mut a : Indirect<i32, Global> = Indirect::new(1);
        let mut b : Indirect<i32, Global> = Indirect::new(2);
        let _c = Indirect::take(&mut a);
        Indirect::take_from(&mut a, &mut b);
        assert_eq!(*a, 2);
        assert!(Indirect::is_valueless(&b));
    }

    #[test] fn take_from_valueless_leaves_target_alone() {
        let mut a : Indirect<i32, Global> = Indirect::new(1);
        let mut b : Indirect<i32, Global> = Indirect::new(2);
        let _c = Indirect::take(&mut b);
        let r = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| Indirect::take_from(&mut a, &mut b)));
        assert!(r.is_err());
        assert_eq!(*a, 1);
    }

    #[test] fn swap_exchanges_allocators() {
        let ta = Tracking::new(Global);
        let tb = Tracking::new(Global);
        let mut a = Indirect::new_in(1_u32, &ta);
        let mut b = Indirect::new_in(2_u32, &tb);
        Indirect::swap(&mut a, &mut b);
        assert_eq!((*a, *b), (2, 1));
        assert!(core::ptr::eq(*Indirect::allocator(&a), &tb));
        assert!(core::ptr::eq(*Indirect::allocator(&b), &ta));
        assert_eq!((ta.allocs(), tb.allocs()), (1, 1));
        drop(a);
        assert_eq!((ta.outstanding(), tb.outstanding()), (1, 0));
    }

    #[test] fn swap_with_valueless() {
        let mut a : Indirect<i32, Global> = Indirect::new(1);
        let mut b : Indirect<i32, Global> = Indirect::new(2);
        let _c = Indirect::take(&mut b);
        Indirect::swap(&mut a, &mut b);
        assert!(Indirect::is_valueless(&a));
        assert_eq!(*b, 1);
        Indirect::swap(&mut a, &mut b);
        assert_eq!(*a, 1);
        assert!(Indirect::is_valueless(&b));
    }
}
