use crate::*;
use crate::boxed::Indirect;
use crate::error::ConstructError;
use crate::util::drop::FreeOnDrop;
use fat::*;

use core::alloc::Layout;
use core::mem::{align_of, size_of};
use core::ptr::NonNull;



impl<T, A: Alloc + Free> Indirect<T, A> {
    /// If you hit this assertion, it's unlikely that `A` can ever successfully allocate an instance of `T` except by happenstance and accident.
    pub(super) const ASSERT_A_CAN_ALLOC_T : () = {
        assert!(align_of::<T>() <= A::MAX_ALIGN.as_usize(), "Alignment::of::<T>() > A::MAX_ALIGN - the allocator cannot allocate memory sufficiently aligned for instances of T on it's own");
        assert!(size_of::<T>() > 0 || A::ZST_SUPPORTED, "T is a ZST but A does not support allocating ZSTs");
    };

    /// Allocate storage for a `T` from `allocator`, then initialize it with `construct()`.
    ///
    /// Storage is requested *before* `construct` runs.  If `construct` panics, the storage is returned to `allocator`
    /// while unwinding, and nothing is leaked.
    ///
    /// ## Failure Modes
    /// *   Fails to compile on impossible alignments (e.g. attempting to allocate 4 KiB alignment pages via 8/16 byte aligned malloc)
    /// *   Fails to compile for ZSTs if unsupported by the allocator
    /// *   Returns <code>[Err]\(...\)</code> when out of memory, in which case `construct` is never called
    ///
    /// ## Examples
    /// ```
    /// use indirect::{allocator::{c::Malloc, debug::Null}, Indirect};
    /// let a = Indirect::try_new_with_in(|| [1_u32, 2, 3], Malloc).unwrap();
    /// assert_eq!(*a, [1, 2, 3]);
    ///
    /// let err = Indirect::try_new_with_in(|| -> u32 { unreachable!() }, Null).unwrap_err();
    /// ```
    pub fn try_new_with_in(construct: impl FnOnce() -> T, allocator: A) -> Result<Self, A::Error> {
        let _ = Self::ASSERT_A_CAN_ALLOC_T;
        let layout = Layout::new::<T>();
        let data : NonNull<T> = allocator.alloc_uninit(layout)?.cast();
        // SAFETY: ✔️ `data` was just allocated by `allocator` with `layout`, and holds no value yet
        let rollback = unsafe { FreeOnDrop::new(&allocator, data.cast(), layout) };
        let value = construct();
        rollback.forget();
        // SAFETY: ✔️ `data` is valid, suitably aligned, uninitialized storage for a `T`
        unsafe { data.as_ptr().write(value) };
        // SAFETY: ✔️ `data` now points to an initialized `T` allocated by `allocator` with `Layout::new::<T>()`, which we hand over exclusively
        Ok(unsafe { Self::from_raw_in(data, allocator) })
    }

    /// Allocate storage for a `T` from `allocator`, then initialize it with `construct()`, which may fail.
    ///
    /// If `construct` returns an error (or panics), the storage is returned to `allocator` before the error (or
    /// panic) reaches the caller.
    ///
    /// ## Examples
    /// ```
    /// use indirect::{allocator::alloc::Global, error::ConstructError, Indirect};
    /// let ok  = Indirect::try_new_fallible_with_in(|| "42".parse::<u32>(), Global).unwrap();
    /// assert_eq!(*ok, 42);
    ///
    /// let err = Indirect::try_new_fallible_with_in(|| "nope".parse::<u32>(), Global).unwrap_err();
    /// assert!(matches!(err, ConstructError::Construct(_)));
    /// ```
    pub fn try_new_fallible_with_in<E>(construct: impl FnOnce() -> Result<T, E>, allocator: A) -> Result<Self, ConstructError<A::Error, E>> {
        let _ = Self::ASSERT_A_CAN_ALLOC_T;
        let layout = Layout::new::<T>();
        let data : NonNull<T> = allocator.alloc_uninit(layout).map_err(ConstructError::Alloc)?.cast();
        // SAFETY: ✔️ `data` was just allocated by `allocator` with `layout`, and holds no value yet
        let rollback = unsafe { FreeOnDrop::new(&allocator, data.cast(), layout) };
        let value = construct().map_err(ConstructError::Construct)?;
        rollback.forget();
        // SAFETY: ✔️ `data` is valid, suitably aligned, uninitialized storage for a `T`
        unsafe { data.as_ptr().write(value) };
        // SAFETY: ✔️ `data` now points to an initialized `T` allocated by `allocator` with `Layout::new::<T>()`, which we hand over exclusively
        Ok(unsafe { Self::from_raw_in(data, allocator) })
    }

    /// Allocate a new box initialized to `value` using `allocator`.
    ///
    /// ## Failure Modes
    /// *   Fails to compile on impossible alignments (e.g. attempting to allocate 4 KiB alignment pages via 8/16 byte aligned malloc)
    /// *   Fails to compile for ZSTs if unsupported by the allocator
    /// *   Returns <code>[Err]\(...\)</code> when out of memory
    ///
    /// ## Examples
    /// ```
    /// use indirect::{allocator::{alloc::Global, c::Malloc}, Indirect};
    /// let a = Indirect::try_new_in(42_u32, Malloc).unwrap();
    /// let a = Indirect::try_new_in((), Global).unwrap();
    /// ```
    ///
    /// ```
    /// // will return Err(...) - Null can't allocate anything
    /// # use indirect::{allocator::debug::Null, Indirect};
    /// let err = Indirect::try_new_in(42_u32, Null).unwrap_err();
    /// ```
    ///
    /// ```compile_fail,E0080
    /// // won't compile - Malloc doesn't support ZSTs
    /// # use indirect::{allocator::c::Malloc, Indirect};
    /// let a = Indirect::try_new_in((), Malloc).unwrap();
    /// ```
    pub fn try_new_in(value: T, allocator: A) -> Result<Self, A::Error> {
        Self::try_new_with_in(move || value, allocator)
    }

    /// Allocate a new box initialized to `value` using `allocator`.
    ///
    /// ## Failure Modes
    /// *   Fails to compile on impossible alignments (e.g. attempting to allocate 4 KiB alignment pages via 8/16 byte aligned malloc)
    /// *   Fails to compile for ZSTs if unsupported by the allocator
    /// *   Panics when out of memory
    ///
    /// ## Examples
    /// ```
    /// use indirect::{allocator::c::Malloc, Indirect};
    /// let a = Indirect::new_in(42_u32, Malloc);
    /// assert_eq!(*a, 42);
    /// ```
    #[cfg(feature = "panicy-memory")] #[track_caller] pub fn new_in(value: T, allocator: A) -> Self {
        Self::try_new_in(value, allocator).unwrap_or_else(|err| bug::oom(Layout::new::<T>(), err))
    }

    /// Allocate storage for a `T` from `allocator`, then initialize it with `construct()`.
    ///
    /// ## Failure Modes
    /// *   Fails to compile on impossible alignments or unsupported ZSTs, like [`try_new_with_in`](Self::try_new_with_in)
    /// *   Panics when out of memory, without calling `construct`
    #[cfg(feature = "panicy-memory")] #[track_caller] pub fn new_with_in(construct: impl FnOnce() -> T, allocator: A) -> Self {
        Self::try_new_with_in(construct, allocator).unwrap_or_else(|err| bug::oom(Layout::new::<T>(), err))
    }
}

impl<T, A: Alloc + Free + Default> Indirect<T, A> {
    /// Allocate a new box initialized to `value` using <code>A::[default](Default::default)()</code>.
    ///
    /// ## Examples
    /// ```
    /// use indirect::{allocator::alloc::Global, Indirect};
    /// let a = Indirect::<_, Global>::try_new(42_u32).unwrap();
    /// ```
    pub fn try_new(value: T) -> Result<Self, A::Error> { Self::try_new_in(value, A::default()) }

    /// Allocate storage for a `T` using <code>A::[default](Default::default)()</code>, then initialize it with `construct()`.
    pub fn try_new_with(construct: impl FnOnce() -> T) -> Result<Self, A::Error> { Self::try_new_with_in(construct, A::default()) }

    /// Allocate a new box initialized to `value` using <code>A::[default](Default::default)()</code>.
    ///
    /// ## Examples
    /// ```
    /// use indirect::{allocator::alloc::Global, Indirect};
    /// let a : Indirect<u32, Global> = Indirect::new(42);
    /// assert_eq!(*a, 42);
    /// ```
    #[cfg(feature = "panicy-memory")] #[track_caller] pub fn new(value: T) -> Self { Self::new_in(value, A::default()) }

    /// Allocate storage for a `T` using <code>A::[default](Default::default)()</code>, then initialize it with `construct()`.
    #[cfg(feature = "panicy-memory")] #[track_caller] pub fn new_with(construct: impl FnOnce() -> T) -> Self { Self::new_with_in(construct, A::default()) }
}



#[cfg(test)] mod tests {
    use super::*;
    use crate::allocator::{alloc::Global, debug::{Null, Tracking, TrackingError}};
    use crate::util::drop::Tester;

    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test] fn construct_exactly_once() {
        let mut calls = 0;
        let a = Indirect::<_, Global>::new_with(|| { calls += 1; 7_i32 });
        assert_eq!(*a, 7);
        assert_eq!(calls, 1);
    }

    #[test] fn alloc_failure_skips_construct() {
        let mut calls = 0;
        let err = Indirect::try_new_with_in(|| { calls += 1; 7_i32 }, Null).unwrap_err();
        assert_eq!(err, ());
        assert_eq!(calls, 0);

        let tracking = Tracking::new(Global);
        tracking.set_limit(0);
        let err = Indirect::try_new_in(Tester::new(21), &tracking).unwrap_err();
        assert_eq!(err, TrackingError::LimitExceeded { limit: 0 });
        assert_eq!(Tester::live(21), 0);
    }

    #[test] fn construct_panic_frees() {
        let tracking = Tracking::new(Global);
        let r = catch_unwind(AssertUnwindSafe(|| Indirect::new_with_in(|| -> Tester { panic!("constructor failed") }, &tracking)));
        assert!(r.is_err());
        assert_eq!(tracking.allocs(), 1);
        assert_eq!(tracking.outstanding(), 0);
    }

    #[test] fn construct_error_frees() {
        let tracking = Tracking::new(Global);
        let err = Indirect::try_new_fallible_with_in(|| Err::<Tester, _>("nope"), &tracking).unwrap_err();
        assert_eq!(err, ConstructError::Construct("nope"));
        assert_eq!(tracking.allocs(), 1);
        assert_eq!(tracking.outstanding(), 0);

        tracking.set_limit(0);
        let err = Indirect::try_new_fallible_with_in(|| Ok::<_, &str>(Tester::new(22)), &tracking).unwrap_err();
        assert_eq!(err, ConstructError::Alloc(TrackingError::LimitExceeded { limit: 0 }));
    }

    #[test] #[should_panic = "unable to allocate"] fn new_oom_panics() {
        let _ = Indirect::new_in(1_u32, Null);
    }
}
