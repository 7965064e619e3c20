pub mod highlights;
pub mod stats;
