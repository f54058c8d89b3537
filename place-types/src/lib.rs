pub mod errors;
pub mod payload;
pub mod player;

// Re-export all types
pub use errors::*;
pub use payload::*;
pub use player::*;
