#![allow(unused_variables)]

use crate::*;
use core::alloc::Layout;



/// Never allocates anything, not even ZSTs.
///
/// Useful for exercising allocation failure paths:
///
/// ```
/// use indirect::{allocator::debug::Null, Indirect};
/// let err = Indirect::try_new_in(42_u32, Null).unwrap_err();
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)] pub struct Null;

impl meta::Meta for Null {
    type Error                  = ();
    const MAX_ALIGN : Alignment = Alignment::MAX;
    const MAX_SIZE  : usize     = usize::MAX;
    const ZST_SUPPORTED : bool  = true; // XXX: intentionally claims support for anything, so the compile time checks don't get in the way of testing failure
}



// SAFETY: ✔️ always failing to allocate is a trivally safe implementation of this trait
unsafe impl fat::Alloc for Null {
    fn alloc_uninit(&self, layout: Layout) -> Result<AllocNN, Self::Error> { Err(()) }
    fn alloc_zeroed(&self, layout: Layout) -> Result<AllocNN0, Self::Error> { Err(()) }
}

// SAFETY: ✔️ this trait cannot be safely called, and simply panicing in response is a reasonable response to the caller's UB
unsafe impl fat::Free for Null {
    #[track_caller] #[inline(never)] unsafe fn free(&self, ptr: AllocNN, layout: Layout) {
        bug::ub::invalid_ptr_for_allocator(ptr)
    }
}



#[test] fn always_fails() {
    for layout in [Layout::new::<()>(), Layout::new::<u8>(), Layout::new::<[u64; 64]>()] {
        assert!(fat::Alloc::alloc_uninit(&Null, layout).is_err());
        assert!(fat::Alloc::alloc_zeroed(&Null, layout).is_err());
    }
}

#[test] #[should_panic = "doesn't belong to this allocator"] fn free_is_a_bug() {
    // SAFETY: ❌ intentionally violating `free`'s preconditions to check they're reported
    unsafe { fat::Free::free(&Null, core::ptr::NonNull::dangling(), Layout::new::<u8>()) }
}
