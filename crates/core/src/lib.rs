//! Domain types and pure logic for the song library.
//!
//! Nothing in this crate performs I/O, so it can be shared by the
//! repository layer, the HTTP layer, and tests alike.

pub mod error;
pub mod filter;
pub mod lyrics;
pub mod pagination;
pub mod types;
