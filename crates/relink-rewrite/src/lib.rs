//! Prefix-to-destination URL rewriting.
//!
//! This crate holds the pure composition logic behind the relink server's
//! generic redirects: a [`RedirectRule`] pairs a path prefix with a
//! destination base URL, and [`RedirectRule::target`] computes the outbound
//! `Location` for an incoming request path.
//!
//! Rules are constructed once at startup and never mutated, so request
//! handlers can share them freely without locking.

mod rule;

pub use rule::{RedirectRule, RewriteError};
