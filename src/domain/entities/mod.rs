//! Core domain entities.
//!
//! - [`ShortLink`] - A stored short id to original URL mapping
//! - [`RedirectHop`] / [`RedirectChain`] - Transient result of tracing a URL
//! - [`Verdict`] - Outcome of URL risk classification
//!
//! As elsewhere in the crate, creation inputs get their own struct
//! ([`NewShortLink`]) separate from the persisted record.

pub mod redirect;
pub mod short_link;
pub mod verdict;

pub use redirect::{RedirectChain, RedirectHop};
pub use short_link::{NewShortLink, ShortLink};
pub use verdict::Verdict;
