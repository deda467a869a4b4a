use crate::*;
use fat::*;

use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem::ManuallyDrop;
use core::ptr::NonNull;



/// A single heap-allocated `T` with value semantics, parameterized by the allocator that owns its storage.
///
/// Copying an [`Indirect`] deep-copies the pointee into fresh storage, comparing or hashing one compares or hashes the
/// pointee, and dropping one destroys the pointee and returns its storage to the very allocator that provided it.
/// This makes it suitable for storing recursive or incomplete types by value:
///
/// ```
/// use indirect::{allocator::alloc::Global, Indirect};
///
/// #[derive(Clone, Debug, PartialEq)] struct Node {
///     value:  i32,
///     next:   Option<Indirect<Node, Global>>,
/// }
///
/// let a = Node { value: 1, next: Some(Indirect::new(Node { value: 2, next: None })) };
/// let mut b = a.clone();
/// b.next.as_mut().unwrap().value = 3;
/// assert_eq!(a.next.as_ref().unwrap().value, 2);
/// assert_eq!(b.next.as_ref().unwrap().value, 3);
/// ```
///
/// ## Valueless
/// Moving the value out with <code>Indirect::[take](Self::take)</code> or <code>Indirect::[take_from](Self::take_from)</code>
/// leaves the source box **valueless**: it owns nothing, and may only be dropped, assigned to, swapped, queried with
/// <code>Indirect::[is_valueless](Self::is_valueless)</code>, or [`Debug`](core::fmt::Debug) formatted.
/// Dereferencing, copying from, moving from, or hashing a valueless box panics in every build.
///
/// ## Notable Differences
/// | Feature           | [`Indirect`]                                      | [`alloc::boxed::Box`]                                 |
/// | ------------------| --------------------------------------------------| ------------------------------------------------------|
/// | `#![no_std]`      | [`core`]-only friendly!                           | requires [`core`] + [`alloc`]
/// | Allocator API     | stable lean [`fat::Free`] (+ [`fat::Alloc`])      | nightly wide [`alloc::alloc::Allocator`]
/// | Moved-from state  | explicit valueless state                          | none (moves are destructive)
/// | Comparisons       | by value, always                                  | by value, always
/// | Zeroed Allocs     | stable [`bytemuck::Zeroable`]-aware               | nightly ugly [`core::mem::MaybeUninit`]
/// | Panic-on-OOM APIs | `--features panicy-memory`                        | unless `-Z build-std --cfg no_global_oom_handling`
/// | Alignment         | compile time checked allocator support            | allocator must be general or fail at runtime
/// | Into Inner        | Explicit (e.g. <code>Indirect::[into_inner](Self::into_inner)\(b\)</code>)  | Magic `DerefMove` (e.g. `*b`)
///
pub struct Indirect<T, A: Free> {
    allocator:  A,
    data:       Option<NonNull<T>>,
    _phantom:   PhantomData<T>,
}

// SAFETY: ✔️ (T, A) are Send
unsafe impl<T: Send, A: Free + Send> Send for Indirect<T, A> {}
// SAFETY: ✔️ (T, A) are Sync
unsafe impl<T: Sync, A: Free + Sync> Sync for Indirect<T, A> {}

impl<T, A: Free> Drop for Indirect<T, A> {
    fn drop(&mut self) { self.reset() }
}

impl<T, A: Free> Indirect<T, A> {
    /// Retrieve the [`fat::Free`] (+ [`fat::Alloc`] + ...) associated with this [`Indirect`].
    ///
    /// A valueless box still has an allocator: whichever one it was last given by construction, assignment, or swap.
    #[inline(always)] pub fn allocator(this: &Self) -> &A { &this.allocator }

    /// Returns `true` if this box's value was moved out by <code>Indirect::[take](Self::take)</code> or <code>Indirect::[take_from](Self::take_from)</code>.
    ///
    /// ## Examples
    /// ```
    /// use indirect::{allocator::alloc::Global, Indirect};
    /// let mut a : Indirect<i32, Global> = Indirect::new(5);
    /// assert!(!Indirect::is_valueless(&a));
    /// let b = Indirect::take(&mut a);
    /// assert!( Indirect::is_valueless(&a));
    /// assert!(!Indirect::is_valueless(&b));
    /// ```
    #[inline(always)] pub fn is_valueless(this: &Self) -> bool { this.data.is_none() }

    /// The owned storage, or [`None`] if valueless.
    #[inline(always)] pub(super) fn data(&self) -> Option<NonNull<T>> { self.data }

    /// Take the owned storage (if any), leaving `self` valueless but keeping its allocator.
    #[inline(always)] pub(super) fn take_data(&mut self) -> Option<NonNull<T>> { self.data.take() }

    /// Replace the owned storage without dropping or freeing the previous storage (if any.)
    ///
    /// ## Safety
    /// *   `data` must be [`None`] or point to a valid `T` that `self`'s allocator can free with <code>[Layout]::new::&lt;T&gt;()</code>
    /// *   `self` takes exclusive ownership over `data`
    #[inline(always)] pub(super) unsafe fn set_data(&mut self, data: Option<NonNull<T>>) { self.data = data; }

    /// Swap allocators with `other` without touching either box's storage.
    #[inline(always)] pub(super) fn swap_allocator(&mut self, other: &mut Self) { core::mem::swap(&mut self.allocator, &mut other.allocator) }

    /// Construct an [`Indirect`] from a pointer to an initialized `T` and an allocator that can free it.
    ///
    /// ## Safety
    /// *   `data` must point to a valid and initialized `T`
    /// *   `data` must be safely freeable via `allocator` with <code>[Layout]::new::&lt;T&gt;()</code>
    /// *   [`Indirect`] takes exclusive ownership over `data`
    #[inline(always)] pub(super) unsafe fn from_raw_in(data: NonNull<T>, allocator: A) -> Self {
        Self { allocator, data: Some(data), _phantom: PhantomData }
    }

    /// Construct a valueless [`Indirect`] holding only `allocator`.
    #[inline(always)] pub(super) fn valueless_in(allocator: A) -> Self {
        Self { allocator, data: None, _phantom: PhantomData }
    }

    /// Destroy the value (if any) and free its storage, leaving `self` valueless.
    pub(super) fn reset(&mut self) {
        let Some(data) = self.data.take() else { return };
        // SAFETY: ✔️ `self.data` was just cleared, nothing else will ever access `*data` again
        unsafe { data.as_ptr().drop_in_place() };
        // SAFETY: ✔️ we previously allocated `*data` with `(self.allocator, Layout::new::<T>())` and will never access that allocation again
        unsafe { self.allocator.free(data.cast(), Layout::new::<T>()) };
    }

    /// Move the value out of the box, freeing its storage.
    ///
    /// ## Panics
    /// *   If `this` is valueless
    ///
    /// ## Examples
    /// ```
    /// use indirect::{allocator::alloc::Global, Indirect};
    /// let b : Indirect<String, Global> = Indirect::new(String::from("hello"));
    /// assert_eq!(Indirect::into_inner(b), "hello");
    /// ```
    #[track_caller] pub fn into_inner(this: Self) -> T { Self::into_inner_with_allocator(this).0 }

    /// Move the value *and* allocator out of the box, freeing its storage.
    ///
    /// ## Panics
    /// *   If `this` is valueless
    #[track_caller] pub fn into_inner_with_allocator(this: Self) -> (T, A) {
        let Some(data) = this.data else { bug::valueless::take() };
        let this = ManuallyDrop::new(this);
        // SAFETY: ✔️ `this` is never dropped nor its `allocator` otherwise accessed again
        let allocator = unsafe { core::ptr::read(&this.allocator) };
        // SAFETY: ✔️ `data` points to a valid `T` that we own, and won't be dropped in place since `this` won't be dropped
        let value = unsafe { data.as_ptr().read() };
        // SAFETY: ✔️ we previously allocated `*data` with `(allocator, Layout::new::<T>())` and just moved the value out
        unsafe { allocator.free(data.cast(), Layout::new::<T>()) };
        (value, allocator)
    }
}
