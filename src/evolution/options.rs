//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the tuning parameters of an optimization run:
//! population size, generation limit, operator rates, selection and crossover
//! flavors, elitism, logging, parallelism and caching.
//!
//! ## Example
//!
//! ```rust
//! use timetabler::evolution::options::{CacheType, EvolutionOptions, LogLevel, SelectionType};
//!
//! let options = EvolutionOptions::builder()
//!     .population_size(80)
//!     .max_generations(300)
//!     .selection_type(SelectionType::Roulette)
//!     .log_level(LogLevel::Minimal)
//!     .cache_type(CacheType::Global)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! assert_eq!(options.tournament_size(), 3);
//! ```
//!
//! ## Defaults
//!
//! | option | default |
//! |---|---|
//! | `population_size` | 50 |
//! | `max_generations` | 100 |
//! | `mutation_rate` | 0.02 |
//! | `crossover_rate` | 0.9 |
//! | `tournament_size` | 3 |
//! | `elite_count` | 1 |
//! | `selection_type` | `Tournament` |
//! | `crossover_type` | `Section` |
//! | `log_level` | `None` |
//! | `parallel_threshold` | 64 |
//! | `cache_type` | `None` |

use crate::error::{Result, TimetableError};

pub use crate::breeding::CrossoverType;

/// How much per-generation progress is logged through `tracing`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Every generation's best score and breakdown.
    Verbose,
    /// Every generation's best score.
    Minimal,
    #[default]
    None,
}

/// Parent selection flavor.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionType {
    #[default]
    Tournament,
    Roulette,
}

/// Memoization of penalty evaluations within a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheType {
    #[default]
    None,
    /// One cache shared by all worker threads.
    Global,
    /// One cache per worker thread.
    ThreadLocal,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    population_size: usize,
    max_generations: usize,
    mutation_rate: f64,
    crossover_rate: f64,
    tournament_size: usize,
    elite_count: usize,
    selection_type: SelectionType,
    crossover_type: CrossoverType,
    log_level: LogLevel,
    /// Minimum population size evaluated and bred on the rayon pool.
    parallel_threshold: usize,
    cache_type: CacheType,
}

impl EvolutionOptions {
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn max_generations(&self) -> usize {
        self.max_generations
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    pub fn selection_type(&self) -> SelectionType {
        self.selection_type
    }

    pub fn crossover_type(&self) -> CrossoverType {
        self.crossover_type
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    pub fn cache_type(&self) -> CacheType {
        self.cache_type
    }

    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    pub fn set_max_generations(&mut self, max_generations: usize) {
        self.max_generations = max_generations;
    }

    pub fn set_mutation_rate(&mut self, mutation_rate: f64) {
        self.mutation_rate = mutation_rate;
    }

    pub fn set_crossover_rate(&mut self, crossover_rate: f64) {
        self.crossover_rate = crossover_rate;
    }

    pub fn set_tournament_size(&mut self, tournament_size: usize) {
        self.tournament_size = tournament_size;
    }

    pub fn set_elite_count(&mut self, elite_count: usize) {
        self.elite_count = elite_count;
    }

    pub fn set_selection_type(&mut self, selection_type: SelectionType) {
        self.selection_type = selection_type;
    }

    pub fn set_crossover_type(&mut self, crossover_type: CrossoverType) {
        self.crossover_type = crossover_type;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    pub fn set_cache_type(&mut self, cache_type: CacheType) {
        self.cache_type = cache_type;
    }

    /// Checks the options for values the evolution loop cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::Configuration`] if the population has fewer than two
    /// chromosomes, the tournament size is 0, a rate is outside `[0, 1]`, or the elite
    /// count is not between 1 and the population size (exclusive).
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(TimetableError::Configuration(format!(
                "Population size must be at least 2, got {}",
                self.population_size
            )));
        }
        if self.tournament_size < 1 {
            return Err(TimetableError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        for (name, rate) in [
            ("Mutation rate", self.mutation_rate),
            ("Crossover rate", self.crossover_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(TimetableError::Configuration(format!(
                    "{} must be within [0, 1], got {}",
                    name, rate
                )));
            }
        }
        if self.elite_count < 1 || self.elite_count >= self.population_size {
            return Err(TimetableError::Configuration(format!(
                "Elite count must be at least 1 and below the population size {}, got {}",
                self.population_size, self.elite_count
            )));
        }
        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    ///
    /// Options that are not set keep their defaults. The builder does not validate;
    /// [`CatalogBuilder::build`](crate::catalog::CatalogBuilder::build) does.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            mutation_rate: 0.02,
            crossover_rate: 0.9,
            tournament_size: 3,
            elite_count: 1,
            selection_type: SelectionType::Tournament,
            crossover_type: CrossoverType::Section,
            log_level: LogLevel::None,
            parallel_threshold: 64,
            cache_type: CacheType::None,
        }
    }
}

/// Builder for `EvolutionOptions`.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    population_size: Option<usize>,
    max_generations: Option<usize>,
    mutation_rate: Option<f64>,
    crossover_rate: Option<f64>,
    tournament_size: Option<usize>,
    elite_count: Option<usize>,
    selection_type: Option<SelectionType>,
    crossover_type: Option<CrossoverType>,
    log_level: Option<LogLevel>,
    parallel_threshold: Option<usize>,
    cache_type: Option<CacheType>,
}

impl EvolutionOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn max_generations(mut self, value: usize) -> Self {
        self.max_generations = Some(value);
        self
    }

    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    pub fn crossover_rate(mut self, value: f64) -> Self {
        self.crossover_rate = Some(value);
        self
    }

    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }

    pub fn elite_count(mut self, value: usize) -> Self {
        self.elite_count = Some(value);
        self
    }

    pub fn selection_type(mut self, value: SelectionType) -> Self {
        self.selection_type = Some(value);
        self
    }

    pub fn crossover_type(mut self, value: CrossoverType) -> Self {
        self.crossover_type = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    /// Sets the minimum population size processed in parallel.
    pub fn parallel_threshold(mut self, value: usize) -> Self {
        self.parallel_threshold = Some(value);
        self
    }

    pub fn cache_type(mut self, value: CacheType) -> Self {
        self.cache_type = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        let defaults = EvolutionOptions::default();
        EvolutionOptions {
            population_size: self.population_size.unwrap_or(defaults.population_size),
            max_generations: self.max_generations.unwrap_or(defaults.max_generations),
            mutation_rate: self.mutation_rate.unwrap_or(defaults.mutation_rate),
            crossover_rate: self.crossover_rate.unwrap_or(defaults.crossover_rate),
            tournament_size: self.tournament_size.unwrap_or(defaults.tournament_size),
            elite_count: self.elite_count.unwrap_or(defaults.elite_count),
            selection_type: self.selection_type.unwrap_or(defaults.selection_type),
            crossover_type: self.crossover_type.unwrap_or(defaults.crossover_type),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(defaults.parallel_threshold),
            cache_type: self.cache_type.unwrap_or(defaults.cache_type),
        }
    }
}
