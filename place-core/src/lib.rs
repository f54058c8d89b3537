pub mod battle;
pub mod battle_room;
pub mod classic;
pub mod clock;
pub mod coordinator;
pub mod places;
pub mod ports;
pub mod rules;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main components
pub use battle::*;
pub use battle_room::*;
pub use classic::*;
pub use clock::*;
pub use coordinator::*;
pub use places::*;
pub use ports::*;
pub use rules::*;
pub use settings::*;
