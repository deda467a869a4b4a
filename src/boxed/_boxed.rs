//! [`Indirect`]: an allocator-aware [`alloc::boxed::Box`] alternative with value semantics

mod indirect;               pub use indirect::*;
mod indirect_alloc;
mod indirect_bytemuck;
mod indirect_clone;
mod indirect_default;
mod indirect_fmt;
mod indirect_move;
mod indirect_traits;
