//! Library half of the `adf` binary, shared with its integration tests.

pub mod transforms;
