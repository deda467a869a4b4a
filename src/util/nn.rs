//! [`NonNull`]-related utilities

use core::alloc::Layout;
use core::ptr::NonNull;



/// A well aligned, non-null, dangling pointer suitable for a zero-sized allocation of `layout`.
pub fn dangling<T>(layout: Layout) -> NonNull<T> {
    NonNull::new(layout.align() as *mut T).unwrap_or(NonNull::dangling())
}



#[test] fn dangling_is_aligned() {
    for align in [1, 2, 8, 4096] {
        let Ok(layout) = Layout::from_size_align(0, align) else { continue };
        assert_eq!(dangling::<u8>(layout).as_ptr() as usize % align, 0);
    }
}
