#![cfg(feature = "c")]
//! [`Malloc`]
//!
//! | Rust                                      | C         |
//! | ------------------------------------------| ----------|
//! | [`fat::Alloc::alloc_uninit`]              | `malloc`  |
//! | [`fat::Alloc::alloc_zeroed`]              | `calloc`  |
//! | [`fat::Free::free`]                       | `free`    |

#[cfg(doc)] use crate::*;

mod malloc;         pub use malloc::Malloc;
