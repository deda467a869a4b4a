//! Allocator traits
//!
//! | Trait                 | Provides |
//! | ----------------------| ---------|
//! | [`meta::Meta`]        | Error type and compile time limits (alignment, size, ZST support)
//! | [`fat::Alloc`]        | Allocate storage for a [`Layout`](core::alloc::Layout)
//! | [`fat::Free`]         | Free storage previously allocated with the same [`Layout`](core::alloc::Layout)
//!
//! Constructing and destroying values inside that storage is *not* an allocator concern:
//! [`Indirect`](crate::Indirect) always uses [`ptr::write`](core::ptr::write) / [`ptr::drop_in_place`](core::ptr::drop_in_place) itself.

pub mod fat;
pub mod meta;
