//! Bug reporting panics

use core::alloc::Layout;
use core::ffi::c_void;
use core::fmt::Debug;
use core::mem::MaybeUninit;
use core::ptr::NonNull;



pub trait AsPtr : Copy                  { fn as_ptr(self) -> *mut c_void; }
impl AsPtr for NonNull<MaybeUninit<u8>> { fn as_ptr(self) -> *mut c_void { self.as_ptr().cast() } }
impl AsPtr for NonNull<            u8 > { fn as_ptr(self) -> *mut c_void { self.as_ptr().cast() } }

/// Report callers touching a valueless [`Indirect`](crate::Indirect)
///
/// These are contract violations, not recoverable errors.  They're checked in every build.
pub mod valueless {
    #[track_caller] #[inline(never)] pub fn deref() -> ! {
        panic!("bug: precondition violation: dereferenced a valueless Indirect (its value was previously moved out via `Indirect::take` or `take_from`)")
    }

    #[track_caller] #[inline(never)] pub fn clone() -> ! {
        panic!("bug: precondition violation: tried to copy from a valueless Indirect")
    }

    #[track_caller] #[inline(never)] pub fn take() -> ! {
        panic!("bug: precondition violation: tried to move from a valueless Indirect")
    }

    #[track_caller] #[inline(never)] pub fn hash() -> ! {
        panic!("bug: precondition violation: tried to hash a valueless Indirect")
    }
}

/// Report bugs that indicate Undefined Behavior
pub mod ub {
    use super::*;

    #[track_caller] #[inline(never)] pub fn invalid_ptr_for_allocator(ptr: impl AsPtr) -> ! {
        let ptr = ptr.as_ptr();
        panic!("bug: undefined behavior: {ptr:?} doesn't belong to this allocator");
    }

    #[track_caller] #[inline(never)] pub fn freed_more_than_allocated(ptr: impl AsPtr) -> ! {
        let ptr = ptr.as_ptr();
        panic!("bug: undefined behavior: freeing {ptr:?} would free more allocations than were ever made by this allocator");
    }
}

/// Report allocation failure from a `panicy-memory` API that has no way to return an error
#[track_caller] #[inline(never)] pub fn oom(layout: Layout, err: impl Debug) -> ! {
    panic!("unable to allocate {layout:?}: {err:?}")
}
