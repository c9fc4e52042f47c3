// In: src/lib.rs

//! Pokemon Campaign Companion
//!
//! Battle math and bookkeeping for a tabletop Pokemon campaign: additive
//! type bonuses, dice-driven damage exchanges between an attacker and a
//! defender, a saved roster to fill combatants from, and a per-round
//! campaign event log.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod campaign;
pub mod config;
pub mod errors;
pub mod input;
pub mod interface;
pub mod logging;
pub mod roster;
pub mod type_chart;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    AttackMode, BaseStats, DiceMode, EventKind, RosterEntry, Side, TypeChartEntry, TypeName,
    TypeRelation,
};

// --- From this crate's modules (`src/`) ---

// Battle state and the values operations hand back.
pub use battle::dice::{DiceSource, RandomDice, ScriptedDice};
pub use battle::events::{BattleEvent, DamageOutcome};
pub use battle::state::{BattleLog, Combatant, Encounter, RoundPhase, TypeValidation};

// Type chart and bonus aggregation.
pub use type_chart::{MatchupEffect, MatchupTrace, TypeAdvantage, TypeBonus, TypeChart};

// Collaborators.
pub use campaign::{Campaign, EventDetails, GameEvent, NewEvent, Player};
pub use config::{CliArgs, CompanionConfig};
pub use interface::BattleSession;
pub use roster::{
    default_roster, FileStore, KeyValueStore, MemoryStore, PokemonStorage, RosterProvider,
};

// Crate-specific error and result types.
pub use errors::{
    CampaignError, CampaignResult, CompanionError, CompanionResult, ConfigError, RosterError,
    RosterResult, TypeChartError, TypeChartResult,
};
