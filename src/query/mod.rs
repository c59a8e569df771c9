//! Query parameter codec
//!
//! Serializes table state to a flat URL query string and back.
//!
//! # Wire format
//!
//! ```text
//! page=2&pageSize=20&q=acme&sort=name%3Adesc&filters%5Bstatus%5D=active
//! ```
//!
//! - `page`, `pageSize` are always present
//! - `q` only when the search term is non-empty
//! - `sort` as `<key>:<direction>` only when a sort is set
//! - one `filters[<name>]` pair per non-empty filter

mod codec;

pub use codec::{decode, encode, filter_key, filter_name, to_pairs};
