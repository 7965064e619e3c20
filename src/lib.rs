//! # Club Engine
//!
//! Game analytics and player-of-the-match voting for a sports club.
//!
//! ## Architecture
//!
//! - **models**: Store records, ids, the period filter and output rows
//! - **storage**: The `ClubStore` boundary and its JSON Lines implementation
//! - **calculate**: Team standings, player scoring and participation ranking
//! - **voting**: Highlight voting state machine
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod voting;

pub use error::{EngineError, Result};
pub use models::*;
