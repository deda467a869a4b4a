//! Allocator implementations

#[path = "alloc/_alloc.rs"  ] pub mod alloc;
#[path = "c/_c.rs"          ] pub mod c;
#[path = "debug/_debug.rs"  ] pub mod debug;
