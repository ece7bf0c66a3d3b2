//! Polls the Riot API for one player and serves the derived rank, session and
//! recent matches to a stream overlay.

pub mod cache;
pub mod config;
pub mod error;
pub mod icons;
pub mod logging;
pub mod poller;
pub mod riot;
pub mod server;
pub mod snapshot;
pub mod stats;

#[cfg(test)]
mod testutils;
