//! [`Global`]
#![cfg(feature = "alloc")]

mod global;         pub use global::Global;
