pub mod input;
pub mod result;
pub mod state;
pub mod stats;
