//! # Evolution
//!
//! The generational loop: evaluate, keep the elites, select parents, breed, repeat
//! until a timetable has no hard violations or the generation limit is reached.

pub mod launcher;
pub mod options;

pub use launcher::{
    optimize, optimize_with_seed, EvolutionLauncher, EvolutionResult, EvolutionState, Outcome,
};
pub use options::{
    CacheType, CrossoverType, EvolutionOptions, EvolutionOptionsBuilder, LogLevel, SelectionType,
};
