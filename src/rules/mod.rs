//! Movement rules of the 4×4 variant: enumeration and in-place mutation.

pub mod apply;
pub mod movegen;
