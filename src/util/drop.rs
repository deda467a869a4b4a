#![allow(dead_code)] // some used for test code

use crate::AllocNN;
use crate::fat::Free;

use core::alloc::Layout;



/// Frees an allocation when dropped (e.g. while unwinding out of a panicking constructor) unless [`forget`](Self::forget)ed first.
pub struct FreeOnDrop<'a, A: Free> {
    allocator:  &'a A,
    ptr:        AllocNN,
    layout:     Layout,
}

impl<'a, A: Free> FreeOnDrop<'a, A> {
    /// ### Safety
    /// *   `ptr` must have been allocated by `allocator` with `layout`
    /// *   Nothing may access `ptr` after the guard drops, and any value written to `ptr` won't be dropped
    pub unsafe fn new(allocator: &'a A, ptr: AllocNN, layout: Layout) -> Self { Self { allocator, ptr, layout } }

    /// Disarm the guard: the allocation now belongs to someone else.
    pub fn forget(self) { core::mem::forget(self) }
}

impl<'a, A: Free> Drop for FreeOnDrop<'a, A> {
    fn drop(&mut self) {
        log::trace!("rolling back {:?} allocation at {:?}", self.layout, self.ptr);
        // SAFETY: ✔️ `ptr` was allocated by `allocator` with `layout` per `FreeOnDrop::new`'s documented safety preconditions
        unsafe { self.allocator.free(self.ptr, self.layout) }
    }
}



#[cfg(test)] std::thread_local! { static TESTER_COUNTS: [core::cell::Cell<usize>; 256] = [(); 256].map(|_| core::cell::Cell::new(0)); }

/// Tracks how many live instances exist per `data` value, and optionally panics when cloned.
#[cfg(test)] #[derive(Debug, PartialEq, Eq, Hash)] pub struct Tester {
    data:           u8,
    panic_on_clone: bool,
}

#[cfg(test)] impl Tester {
    pub fn new(data: u8) -> Self { Self::register(data, false) }
    pub fn panicky(data: u8) -> Self { Self::register(data, true) }
    pub fn get(&self) -> u8 { self.data }
    pub fn live(data: u8) -> usize { TESTER_COUNTS.with(|tc| tc[usize::from(data)].get()) }

    fn register(data: u8, panic_on_clone: bool) -> Self {
        TESTER_COUNTS.with(|tc| tc[usize::from(data)].set(tc[usize::from(data)].get() + 1));
        Self { data, panic_on_clone }
    }
}

#[cfg(test)] impl Drop for Tester {
    fn drop(&mut self) {
        let data = usize::from(self.data);
        TESTER_COUNTS.with(|tc| tc[data].set(tc[data].get().checked_sub(1).expect("count went negative, a util::drop::Tester was presumably dropped multiple times")))
    }
}

#[cfg(test)] impl Clone for Tester {
    fn clone(&self) -> Self {
        if self.panic_on_clone { panic!("Tester({}) refuses to be cloned", self.data) }
        Self::new(self.data)
    }
}

#[cfg(test)] impl Default for Tester {
    fn default() -> Self { Self::new(0) }
}
