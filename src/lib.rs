pub mod breeding;
pub mod caching;
pub mod catalog;
pub mod chromosome;
pub mod constraints;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod population;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use catalog::{Catalog, CatalogBuilder};
pub use chromosome::{Chromosome, Gene};
pub use error::{OptionExt, Result, TimetableError};
pub use evolution::{
    optimize, optimize_with_seed, EvolutionLauncher, EvolutionOptions, EvolutionResult, Outcome,
};
pub use fitness::{ConstraintWeights, PenaltyBreakdown, PenaltyScore};
pub use rng::RandomNumberGenerator;
