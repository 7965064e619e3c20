//! Core data models for the club engine.

mod game;
mod highlight;
mod ids;
mod member;
mod period;
mod stats;
mod team;

pub use game::*;
pub use highlight::*;
pub use ids::*;
pub use member::*;
pub use period::*;
pub use stats::*;
pub use team::*;
