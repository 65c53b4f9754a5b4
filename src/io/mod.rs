//! File formats.

pub mod coo;
