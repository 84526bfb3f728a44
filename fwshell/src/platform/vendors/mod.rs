//! Built-in platform definitions.

pub mod checkpoint;
pub mod crossbeam;
