use crate::*;
use crate::meta::*;

use libc::{c_void, calloc, free, malloc};

use core::alloc::Layout;
use core::ptr::NonNull;



#[cfg(target_os = "linux")] use libc::max_align_t;
#[cfg(not(target_os = "linux"))] #[allow(non_camel_case_types)] type max_align_t = f64;

/// [`malloc`](https://en.cppreference.com/w/c/memory/malloc) / [`calloc`](https://en.cppreference.com/w/c/memory/calloc) / [`free`](https://en.cppreference.com/w/c/memory/free)
///
/// Stateless, but doesn't support ZSTs or alignments beyond `max_align_t`.
/// Both are rejected at compile time when used with [`Indirect`](crate::Indirect):
///
/// ```
/// use indirect::{allocator::c::Malloc, Indirect};
/// let b = Indirect::new_in(42_u32, Malloc);
/// assert_eq!(*b, 42);
/// ```
///
/// ```compile_fail,E0080
/// // won't compile - Malloc doesn't support ZSTs
/// # use indirect::{allocator::c::Malloc, Indirect};
/// let b = Indirect::new_in((), Malloc);
/// ```
///
/// ```compile_fail,E0080
/// // won't compile - Malloc doesn't support Page alignment
/// # use indirect::{allocator::c::Malloc, Indirect};
/// #[repr(C, align(4096))] pub struct Page([u8; 4096]);
/// let b = Indirect::new_in(Page([0u8; 4096]), Malloc);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)] #[repr(transparent)] pub struct Malloc;



// meta::*

impl Meta for Malloc {
    type Error = ();

    /// | Platform          | Value     |
    /// | ------------------| ----------|
    /// | Windows 32-bit    | `8`
    /// | Windows 64-bit    | `16`
    /// | Linux             | <code>_Alignof\(max_align_t\)</code>
    /// | Other             | <code>_Alignof\(double\)</code> (conservative)
    const MAX_ALIGN : Alignment = if cfg!(target_env = "msvc") {
        if core::mem::size_of::<usize>() >= 8 { Alignment::constant(16) } else { Alignment::constant(8) }
    } else {
        Alignment::of::<max_align_t>()
    };

    const MAX_SIZE : usize = usize::MAX/2;

    /// `malloc(0)` may return null or a unique pointer depending on the platform, so ZSTs are treated as unsupported.
    const ZST_SUPPORTED : bool = false;
}



// fat::*

// SAFETY: ✔️ `malloc` / `calloc` allocations are suitably aligned for any fundamental alignment (<= `MAX_ALIGN`), which we check
// SAFETY: ✔️ `Malloc` is stateless, so any copy can free any other copy's allocations
unsafe impl fat::Alloc for Malloc {
    fn alloc_uninit(&self, layout: Layout) -> Result<AllocNN, Self::Error> {
        if layout.size() == 0 || layout.size() > Self::MAX_SIZE || layout.align() > Self::MAX_ALIGN.as_usize() { return Err(()) }
        // SAFETY: ✔️ `malloc` is safe to call with any nonzero size
        let alloc = unsafe { malloc(layout.size()) };
        NonNull::new(alloc.cast()).ok_or(())
    }

    fn alloc_zeroed(&self, layout: Layout) -> Result<AllocNN0, Self::Error> {
        if layout.size() == 0 || layout.size() > Self::MAX_SIZE || layout.align() > Self::MAX_ALIGN.as_usize() { return Err(()) }
        // SAFETY: ✔️ `calloc` is safe to call with any nonzero size, and zeroes the memory it returns
        let alloc = unsafe { calloc(1, layout.size()) };
        NonNull::new(alloc.cast()).ok_or(())
    }
}

// SAFETY: ✔️ `free` is compatible with `malloc` / `calloc`
unsafe impl fat::Free for Malloc {
    unsafe fn free(&self, ptr: AllocNN, _layout: Layout) {
        // SAFETY: ✔️ `ptr` belongs to `self` (was allocated by `malloc` / `calloc`) per [`fat::Free::free`]'s documented safety preconditions
        unsafe { free(ptr.as_ptr().cast::<c_void>()) }
    }
}



#[test] fn fat_alignment()          { fat::test::alignment(Malloc) }
#[test] fn fat_zeroed()             { fat::test::zeroed_alloc(Malloc) }
#[test] fn fat_zst_support()        { fat::test::zst_supported_accurate(Malloc) }

#[test] fn over_aligned_rejected() {
    #[repr(C, align(4096))] struct Page([u8; 4096]);
    assert!(fat::Alloc::alloc_uninit(&Malloc, Layout::new::<Page>()).is_err());
}
