use schema::TypeName;
use thiserror::Error;

/// Main error type for the campaign companion.
///
/// Battle resolution itself never fails; these errors come from loading
/// data, talking to storage, strict type validation, and campaign
/// bookkeeping preconditions.
#[derive(Debug, Error)]
pub enum CompanionError {
    #[error("type chart error: {0}")]
    TypeChart(#[from] TypeChartError),

    #[error("roster error: {0}")]
    Roster(#[from] RosterError),

    #[error("campaign error: {0}")]
    Campaign(#[from] CampaignError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or validating a type chart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeChartError {
    /// The chart source could not be parsed
    #[error("malformed type chart: {0}")]
    Malformed(String),

    /// The chart file could not be read
    #[error("failed to read type chart {path}: {reason}")]
    Unreadable { path: String, reason: String },

    /// Two entries share a name
    #[error("type {0} is defined more than once")]
    DuplicateType(TypeName),

    /// One attacking type appears in two of a defending type's lists
    #[error("{attacking} appears in both {first} and {second} of {defending}")]
    OverlappingRelation {
        defending: TypeName,
        attacking: TypeName,
        first: &'static str,
        second: &'static str,
    },

    /// A type name is not present in the chart
    #[error("unknown type: {0}")]
    UnknownType(TypeName),

    /// A combatant was given more types than it can hold
    #[error("a combatant holds at most {max} types, got {given}")]
    TooManyTypes { max: usize, given: usize },
}

/// Errors related to the persisted roster.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed bundled roster: {0}")]
    Bundled(String),

    /// A Pokemon must have a name and one or two types
    #[error("invalid roster entry: {0}")]
    InvalidEntry(String),
}

/// Errors related to campaign bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CampaignError {
    #[error("a campaign needs at least one player")]
    NoPlayers,

    #[error("the campaign has not been started")]
    NotStarted,

    #[error("event title must not be blank")]
    BlankTitle,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Malformed(String),
}

/// Type alias for Results using CompanionError
pub type CompanionResult<T> = Result<T, CompanionError>;

/// Type alias for Results using TypeChartError
pub type TypeChartResult<T> = Result<T, TypeChartError>;

/// Type alias for Results using RosterError
pub type RosterResult<T> = Result<T, RosterError>;

/// Type alias for Results using CampaignError
pub type CampaignResult<T> = Result<T, CampaignError>;
