//! Compact, URL-safe tokens for a set of visited catalogue items.
//!
//! This crate provides [`VisitedSet`], a fixed-capacity set of 1-based ids
//! (the summits of a hiking catalogue, 112 of them by default) that converts
//! to and from a short token suitable for a share link or a local key-value
//! store.
//!
//! # Features
//!
//! - **Zero allocation** for catalogues of up to 128 ids
//! - **Range safe**: ids outside `1..=capacity` are ignored, never stored
//! - **Deterministic tokens**: equal sets always produce equal tokens
//! - **Tolerant parsing**: a corrupted or missing token degrades to the empty
//!   set instead of failing
//! - **Serialization support** via serde (optional)
//! - **`no_std` support** with `alloc`
//!
//! # Examples
//!
//! ```
//! use summit_stamp::VisitedSet;
//!
//! let mut visited = VisitedSet::empty(112);
//! visited.mark(1);
//! visited.mark(50);
//! visited.mark(112);
//! assert_eq!(visited.count(), 3);
//! assert!(!visited.is_marked(2));
//!
//! // Out-of-range ids are ignored
//! visited.mark(0);
//! visited.mark(113);
//! assert_eq!(visited.count(), 3);
//!
//! let token = visited.serialize();
//! let shared = VisitedSet::parse(Some(&token), 112);
//! assert_eq!(shared, visited);
//!
//! // A mangled link loses its marks, not the session
//! assert!(VisitedSet::parse(Some("!!!garbage!!!"), 112).is_empty());
//! ```
//!
//! # Token format
//!
//! Ids are packed into groups of [`token::GROUP_BITS`], each written as a
//! base-36 literal and joined with [`token::SEPARATOR`]. A full 112-id set
//! fits in 25 characters. See [`token`] for the layout.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

// Module declarations
mod iter;
mod macros;
mod storage;
mod traits;
mod visited;
pub mod token;

#[cfg(feature = "serde")]
pub mod serde;

#[cfg(feature = "std")]
pub mod session;

// Re-exports
pub use iter::Iter;
pub use traits::ParseTokenError;
pub use visited::{DEFAULT_CAPACITY, VisitedSet};
