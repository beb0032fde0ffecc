//! Event delivery to remote messaging destinations.
//!
//! The dispatcher fans one event out to every configured destination
//! concurrently; each destination drives its own retry loop over a
//! timeout-bounded transport. Data flows one direction only:
//! dispatcher → destination → retry → transport → network.
pub mod dispatcher;
pub mod retry;
pub mod telegram;
pub mod transport;
