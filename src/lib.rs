//! Incremental, grammar-guided parsing for constrained decoding.
//!
//! This crate is a thin re-export of [`increparse_core`]; everything lives
//! there (`crates/core`). The split mirrors `span`/`diag`: library
//! consumers depend on this crate, the pieces it's assembled from can be
//! depended on independently by anything that only needs a slice of it
//! (e.g. `diag` alone for its report builder).

pub use parser::*;
