use crate::*;
use crate::boxed::Indirect;
use fat::*;

use bytemuck::Zeroable;

use core::alloc::Layout;



impl<T: Zeroable, A: Alloc + Free> Indirect<T, A> {
    /// Allocate a new box initialized to `0` using `allocator`.
    ///
    /// Uses [`fat::Alloc::alloc_zeroed`], which many allocators can satisfy more cheaply than allocating and then
    /// writing a zeroed `T`.
    ///
    /// ## Failure Modes
    /// *   Fails to compile on impossible alignments (e.g. attempting to allocate 4 KiB alignment pages via 8/16 byte aligned malloc)
    /// *   Fails to compile for ZSTs if unsupported by the allocator
    /// *   Returns <code>[Err]\(...\)</code> when out of memory
    ///
    /// ## Examples
    /// ```
    /// use indirect::{allocator::{alloc::Global, c::Malloc, debug::Null}, Indirect};
    /// let a = Indirect::<[u64; 32], _>::try_new_zeroed_in(Malloc).unwrap();
    /// assert_eq!(*a, [0; 32]);
    /// let a = Indirect::<(), _>::try_new_zeroed_in(Global).unwrap();
    /// let err = Indirect::<u32, _>::try_new_zeroed_in(Null).unwrap_err();
    /// ```
    ///
    /// ```compile_fail,E0080
    /// // won't compile - Malloc doesn't support ZSTs
    /// # use indirect::{allocator::c::Malloc, Indirect};
    /// let a = Indirect::<(), _>::try_new_zeroed_in(Malloc).unwrap();
    /// ```
    pub fn try_new_zeroed_in(allocator: A) -> Result<Self, A::Error> {
        let _ = Self::ASSERT_A_CAN_ALLOC_T;
        let data = allocator.alloc_zeroed(Layout::new::<T>())?.cast();
        // SAFETY: ✔️ `data` was allocated by `allocator` with `Layout::new::<T>()`, and all zeros is a valid `T` per `T: Zeroable`
        Ok(unsafe { Self::from_raw_in(data, allocator) })
    }

    /// Allocate a new box initialized to `0` using `A::default()`.
    pub fn try_new_zeroed() -> Result<Self, A::Error> where A : Default { Self::try_new_zeroed_in(A::default()) }

    /// Allocate a new box initialized to `0` using `allocator`.
    ///
    /// ## Failure Modes
    /// *   Fails to compile on impossible alignments or unsupported ZSTs, like [`try_new_zeroed_in`](Self::try_new_zeroed_in)
    /// *   [`panic!`]s when out of memory
    #[cfg(feature = "panicy-memory")] #[track_caller] pub fn new_zeroed_in(allocator: A) -> Self {
        Self::try_new_zeroed_in(allocator).unwrap_or_else(|err| bug::oom(Layout::new::<T>(), err))
    }

    /// Allocate a new box initialized to `0` using `A::default()`.
    #[cfg(feature = "panicy-memory")] #[track_caller] pub fn new_zeroed() -> Self where A : Default { Self::new_zeroed_in(A::default()) }
}



#[test] fn zeroed() {
    use crate::allocator::{alloc::Global, debug::Tracking};
    let tracking = Tracking::new(Global);
    let a = Indirect::<[u32; 1024], _>::new_zeroed_in(&tracking);
    assert!(a.iter().all(|&x| x == 0));
    assert_eq!(tracking.outstanding(), 1);
    let b = Indirect::<(u8, f64), Global>::new_zeroed();
    assert_eq!(*b, (0, 0.0));
}
