//! Rusty [ZST](https://doc.rust-lang.org/nomicon/exotic-sizes.html#zero-sized-types-zsts)-friendly allocator traits operating on [`Layout`]s

use crate::*;

use core::alloc::Layout;
use core::mem::MaybeUninit;
#[cfg(doc)] use core::ptr::NonNull;



/// Allocation functions:<br>
/// <code>[alloc_uninit](Self::alloc_uninit)(layout: [Layout]) -> [Result]&lt;[NonNull]&lt;\_&gt;, \_&gt;</code><br>
/// <code>[alloc_zeroed](Self::alloc_zeroed)(layout: [Layout]) -> [Result]&lt;[NonNull]&lt;\_&gt;, \_&gt;</code><br>
/// <br>
///
/// ## Safety
/// *   Allocations created by this trait must be freeable by this allocator's [`Free`] implementation.
/// *   Returned allocations must obey `layout` alignment and size.
/// *   Cloning the allocator must produce an allocator able to free allocations made by the original (and vice versa.)
pub unsafe trait Alloc : meta::Meta {
    /// Allocate at least `layout.size()` bytes of uninitialized memory aligned to `layout.align()`.
    ///
    /// The resulting allocation can typically be freed with <code>[Free]::[free](Free::free)</code>
    fn alloc_uninit(&self, layout: Layout) -> Result<AllocNN, Self::Error>;

    /// Allocate at least `layout.size()` bytes of zeroed memory aligned to `layout.align()`.
    ///
    /// The resulting allocation can typically be freed with <code>[Free]::[free](Free::free)</code>
    fn alloc_zeroed(&self, layout: Layout) -> Result<AllocNN0, Self::Error> {
        let alloc = self.alloc_uninit(layout)?;
        // SAFETY: ⚠️ `alloc` is non-null by type, `align` is 1/trivial, `layout.size()` was just allocated, size <= isize::MAX by Layout
        let all = unsafe { core::slice::from_raw_parts_mut(alloc.as_ptr(), layout.size()) };
        all.fill(MaybeUninit::new(0u8));
        Ok(alloc.cast())
    }
}

/// Deallocation function:<br>
/// <code>[free](Self::free)(ptr: [NonNull]&lt;\_&gt;, layout: [Layout])</code><br>
/// <br>
///
/// ## Safety
/// *   This trait must be able to free allocations made by this allocator's [`Alloc`] implementation.
pub unsafe trait Free : meta::Meta {
    /// Deallocate an allocation, `ptr`, belonging to `self`.
    ///
    /// ### Safety
    /// *   `ptr` must belong to `self`
    /// *   `ptr` will no longer be accessible after free
    /// *   `layout` must exactly match the [`Layout`] used to successfully allocate `ptr`
    unsafe fn free(&self, ptr: AllocNN, layout: Layout);
}



#[allow(clippy::undocumented_unsafe_blocks)] // SAFETY: ✔️ same trait, same prereqs
unsafe impl<'a, A: Alloc> Alloc for &'a A {
    fn alloc_uninit(&self, layout: Layout) -> Result<AllocNN,  Self::Error> { A::alloc_uninit(self, layout) }
    fn alloc_zeroed(&self, layout: Layout) -> Result<AllocNN0, Self::Error> { A::alloc_zeroed(self, layout) }
}

#[allow(clippy::undocumented_unsafe_blocks)] // SAFETY: ✔️ same trait, same prereqs
unsafe impl<'a, A: Free> Free for &'a A {
    unsafe fn free(&self, ptr: AllocNN, layout: Layout) { unsafe { A::free(self, ptr, layout) } }
}



/// Testing functions to verify implementations of [`fat`] traits.
#[cfg(test)] pub mod test {
    use super::*;

    /// Assert that [`Meta::ZST_SUPPORTED`](meta::Meta::ZST_SUPPORTED) accurately reports if `A` supports ZSTs
    #[track_caller] pub fn zst_supported_accurate<A: Alloc + Free>(allocator: A) {
        let layout = Layout::new::<()>();
        let alloc = allocator.alloc_uninit(layout);
        assert_eq!(alloc.is_ok(), A::ZST_SUPPORTED, "alloc = {alloc:?}, ZST_SUPPORTED = {}", A::ZST_SUPPORTED);
        // SAFETY: ✔️ `alloc` was just allocated by `allocator` with `layout`
        if let Ok(alloc) = alloc { unsafe { allocator.free(alloc, layout) } }
    }

    /// Assert that allocations respect requested alignments up to [`Meta::MAX_ALIGN`](meta::Meta::MAX_ALIGN) (capped at 4 KiB)
    #[track_caller] pub fn alignment<A: Alloc + Free>(allocator: A) {
        let mut align = 1;
        while align <= A::MAX_ALIGN.as_usize().min(4096) {
            for size in [1, align, align+1, 3*align] {
                let Ok(layout) = Layout::from_size_align(size, align) else { continue };
                let alloc = allocator.alloc_uninit(layout).unwrap_or_else(|err| panic!("unable to allocate {layout:?}: {err:?}"));
                assert_eq!(alloc.as_ptr() as usize % align, 0, "{layout:?} allocated at misaligned {alloc:?}");
                // SAFETY: ✔️ `alloc` was just allocated by `allocator` with `layout`
                unsafe { allocator.free(alloc, layout) };
            }
            align *= 2;
        }
    }

    /// Assert that [`Alloc::alloc_zeroed`] actually zeroes memory
    #[track_caller] pub fn zeroed_alloc<A: Alloc + Free>(allocator: A) {
        for size in [1, 7, 64, 4096] {
            let Ok(layout) = Layout::from_size_align(size, 1) else { continue };
            let alloc = allocator.alloc_zeroed(layout).unwrap_or_else(|err| panic!("unable to allocate {layout:?}: {err:?}"));
            // SAFETY: ✔️ `alloc` was just allocated (and zeroed) with `size` bytes
            let bytes = unsafe { core::slice::from_raw_parts(alloc.as_ptr(), size) };
            assert!(bytes.iter().all(|b| *b == 0), "alloc_zeroed({layout:?}) returned nonzero bytes");
            // SAFETY: ✔️ `alloc` was just allocated by `allocator` with `layout`
            unsafe { allocator.free(alloc.cast(), layout) };
        }
    }
}
