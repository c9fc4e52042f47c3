// Pokemon Campaign Schema - Shared type definitions
// This crate contains the plain data shapes shared between the battle core,
// the roster store and the campaign log, so every layer agrees on how they
// serialize.

// Re-export the main types
pub use battle_data::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod battle_data;
pub mod pokemon_types;
pub mod species_data;
