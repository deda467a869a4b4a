use crate::boxed::Indirect;
use crate::fat::{Alloc, Free};



// Allocating traits, falliable counterparts

#[cfg(feature = "panicy-memory")] impl<T: Default, A: Alloc + Free + Default> Default for Indirect<T, A> {
    /// Allocate storage using `A::default()`, then fill it with `T::default()`.
    ///
    /// ## Failure Modes
    /// *   Fails to compile on impossible alignments (e.g. attempting to allocate 4 KiB alignment pages via 8/16 byte aligned malloc)
    /// *   [`panic!`]s when out of memory
    #[track_caller] fn default() -> Self { Self::new_with(T::default) }
}

/// Non-panicing alternatives to [`Default`] / support for alternative allocators.
impl<T: Default, A: Alloc + Free> Indirect<T, A> {
    /// Allocate storage using `A::default()`, then fill it with `T::default()`.
    ///
    /// ## Failure Modes
    /// *   Fails to compile on impossible alignments (e.g. attempting to allocate 4 KiB alignment pages via 8/16 byte aligned malloc)
    /// *   Returns <code>[Err]\(...\)</code> when out of memory
    ///
    /// ## Examples
    /// ```
    /// use indirect::{allocator::{c::Malloc, debug::Null}, Indirect};
    /// let err = Indirect::<u32, Null>::try_default().unwrap_err();
    /// let b = Indirect::<u32, Malloc>::try_default().unwrap();
    /// assert_eq!(*b, 0);
    /// ```
    ///
    /// ```compile_fail,E0080
    /// // won't compile - Malloc doesn't support Page alignment
    /// # use indirect::{allocator::c::Malloc, Indirect};
    /// #[repr(C, align(4096))] pub struct Page([u8; 4096]);
    /// impl Default for Page { fn default() -> Self { Self([0; 4096]) } }
    /// let b = Indirect::<Page, Malloc>::try_default().unwrap();
    /// ```
    pub fn try_default() -> Result<Self, A::Error> where A : Default { Self::try_default_in(A::default()) }

    /// Allocate storage using `allocator`, then fill it with `T::default()`.
    pub fn try_default_in(allocator: A) -> Result<Self, A::Error> { Self::try_new_with_in(T::default, allocator) }

    /// Allocate storage using `allocator`, then fill it with `T::default()`.
    ///
    /// ## Failure Modes
    /// *   [`panic!`]s when out of memory
    #[cfg(feature = "panicy-memory")] #[track_caller] pub fn default_in(allocator: A) -> Self { Self::new_with_in(T::default, allocator) }
}



#[cfg(test)] mod tests {
    use crate::Indirect;
    use crate::allocator::{alloc::Global, debug::{Null, Tracking}};
    use crate::util::drop::Tester;
    use alloc::string::String;

    #[test] fn default() {
        let a : Indirect<String, Global> = Indirect::default();
        assert_eq!(*a, "");
        assert!(!Indirect::is_valueless(&a));

        let t = Indirect::<Tester, Global>::default();
        assert_eq!(t.get(), 0);
    }

    #[test] fn default_in() {
        let tracking = Tracking::new(Global);
        let a = Indirect::<u64, _>::default_in(&tracking);
        assert_eq!(*a, 0);
        assert_eq!(tracking.outstanding(), 1);
        assert!(Indirect::<u64, _>::try_default_in(Null).is_err());
    }
}
