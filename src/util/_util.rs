pub mod drop;
pub mod nn;
