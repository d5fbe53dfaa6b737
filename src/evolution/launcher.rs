use std::fmt::Display;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::options::{CacheType, EvolutionOptions, LogLevel, SelectionType};
use crate::{
    breeding::breed,
    caching::{CachedEvaluator, ThreadLocalCachedEvaluator},
    catalog::Catalog,
    chromosome::Chromosome,
    constraints::ConstraintManager,
    error::{OptionExt, Result, TimetableError},
    fitness::{Evaluator, FitnessEvaluator, PenaltyBreakdown, PenaltyScore},
    population::Population,
    rng::RandomNumberGenerator,
    selection::{
        best_index, ElitistSelection, ParentPair, RouletteWheelSelection, SelectionStrategy,
        TournamentSelection,
    },
};

/// Where a run is in its lifecycle.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionState {
    Initializing,
    Evaluating { generation: usize },
    /// A chromosome without hard violations was found.
    Converged { generation: usize },
    /// The generation limit was reached first.
    Terminated { generation: usize },
}

impl Display for EvolutionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initializing => write!(f, "initializing"),
            Self::Evaluating { generation } => write!(f, "evaluating generation {}", generation),
            Self::Converged { generation } => write!(f, "converged at generation {}", generation),
            Self::Terminated { generation } => {
                write!(f, "terminated at generation {}", generation)
            }
        }
    }
}

/// How a run ended.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Converged,
    Terminated,
}

/// The best timetable of a run.
///
/// A run that never eliminates all hard violations still returns its best
/// chromosome, with `is_perfect == false` and [`Outcome::Terminated`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    pub chromosome: Chromosome,
    pub breakdown: PenaltyBreakdown,
    pub is_perfect: bool,
    /// Index of the last evaluated generation; the random initial population is 0.
    pub generations_used: usize,
    pub outcome: Outcome,
    /// Best score of every evaluated generation, never increasing.
    pub best_per_generation: Vec<PenaltyScore>,
}

impl EvolutionResult {
    pub fn score(&self) -> PenaltyScore {
        self.breakdown.score()
    }

    pub fn fitness(&self) -> f64 {
        self.breakdown.fitness()
    }
}

/// Runs the generational loop over a catalog.
///
/// Each call to [`run`](Self::run) owns its population and evaluator, so a
/// launcher can be reused and shared across threads.
///
/// # Examples
///
/// ```
/// use timetabler::catalog::CatalogBuilder;
/// use timetabler::evolution::{EvolutionLauncher, EvolutionOptions};
/// use timetabler::rng::RandomNumberGenerator;
///
/// let mut builder = CatalogBuilder::new();
/// let algebra = builder.add_subject("Linear Algebra", "MA201", 3, false);
/// builder.add_faculty("Dr. Rao", [algebra], []);
/// builder.add_room("R-101", 60, false);
/// builder.weekly_grid(5, 6, 3, 1);
/// let section = builder.add_section("CSE-A", 55);
/// builder.require(section, algebra);
/// let catalog = builder.build().unwrap();
///
/// let options = EvolutionOptions::builder().population_size(20).build();
/// let launcher = EvolutionLauncher::new(&catalog).with_options(options);
/// let result = launcher.run(&mut RandomNumberGenerator::from_seed(1)).unwrap();
///
/// assert!(result.is_perfect);
/// assert!(result.chromosome.is_complete(&catalog));
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<'a> {
    catalog: &'a Catalog,
    options: EvolutionOptions,
    constraints: ConstraintManager,
}

impl<'a> EvolutionLauncher<'a> {
    /// A launcher using the catalog's options and the standard constraint set.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            options: catalog.options().clone(),
            constraints: ConstraintManager::standard(),
        }
    }

    pub fn with_options(mut self, options: EvolutionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_constraints(mut self, constraints: ConstraintManager) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    /// Evolves a random population until a chromosome has no hard violations or
    /// the generation limit is reached.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::Configuration`] if the options are invalid or some
    /// session cannot be placed at all. Failing to converge is not an error.
    pub fn run(&self, rng: &mut RandomNumberGenerator) -> Result<EvolutionResult> {
        let options = &self.options;
        options.validate()?;

        let mut state = EvolutionState::Initializing;
        info!(
            sessions = self.catalog.session_count(),
            sections = self.catalog.sections().len(),
            population_size = options.population_size(),
            max_generations = options.max_generations(),
            "starting timetable optimization"
        );

        let mut population =
            Population::initialize(self.catalog, options.population_size(), rng)?;
        let evaluator = self.evaluator();
        let selection = self.selection()?;
        let elitism = ElitistSelection::new(options.elite_count())?;
        let parallel = options.population_size() >= options.parallel_threshold();

        let mut best_per_generation = Vec::new();
        let mut generation = 0;

        let (chromosome, breakdown, outcome) = loop {
            transition(&mut state, EvolutionState::Evaluating { generation });

            let breakdowns = evaluate(evaluator.as_ref(), &population, parallel);
            let scores: Vec<PenaltyScore> =
                breakdowns.iter().map(PenaltyBreakdown::score).collect();
            let best = best_index(&scores).ok_or_else_timetable(|| {
                TimetableError::Evolution(format!("Generation {} has no chromosomes", generation))
            })?;
            best_per_generation.push(scores[best]);
            log_generation(options.log_level(), generation, &breakdowns[best]);

            let finished = if breakdowns[best].is_perfect() {
                Some((EvolutionState::Converged { generation }, Outcome::Converged))
            } else if generation >= options.max_generations() {
                Some((EvolutionState::Terminated { generation }, Outcome::Terminated))
            } else {
                None
            };
            if let Some((final_state, outcome)) = finished {
                transition(&mut state, final_state);
                break (
                    population.chromosomes()[best].clone(),
                    breakdowns[best],
                    outcome,
                );
            }

            population = self.next_generation(
                &population,
                &scores,
                selection.as_ref(),
                &elitism,
                parallel,
                rng,
            )?;
            generation += 1;
        };

        match outcome {
            Outcome::Converged => info!(
                generation,
                soft_penalty = breakdown.soft_penalty,
                "timetable without hard violations found"
            ),
            Outcome::Terminated => warn!(
                generation,
                hard_violations = breakdown.hard_violations(),
                best = %breakdown.score(),
                "generation limit reached before all hard constraints were satisfied"
            ),
        }

        Ok(EvolutionResult {
            chromosome,
            is_perfect: breakdown.is_perfect(),
            breakdown,
            generations_used: generation,
            outcome,
            best_per_generation,
        })
    }

    fn evaluator(&self) -> Box<dyn Evaluator + 'a> {
        let evaluator = FitnessEvaluator::with_constraints(self.catalog, self.constraints.clone());
        match self.options.cache_type() {
            CacheType::None => Box::new(evaluator),
            CacheType::Global => Box::new(CachedEvaluator::new(evaluator)),
            CacheType::ThreadLocal => Box::new(ThreadLocalCachedEvaluator::new(evaluator)),
        }
    }

    fn selection(&self) -> Result<Box<dyn SelectionStrategy>> {
        let selection: Box<dyn SelectionStrategy> = match self.options.selection_type() {
            SelectionType::Tournament => {
                Box::new(TournamentSelection::new(self.options.tournament_size())?)
            }
            SelectionType::Roulette => Box::new(RouletteWheelSelection::new()),
        };
        Ok(selection)
    }

    /// Elites first, then offspring in order. Parents and seeds are drawn from the
    /// run's generator before any offspring is built, so the result does not depend
    /// on how rayon schedules the work.
    fn next_generation(
        &self,
        population: &Population,
        scores: &[PenaltyScore],
        selection: &dyn SelectionStrategy,
        elitism: &ElitistSelection,
        parallel: bool,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population> {
        let parents = population.chromosomes();
        let mut next: Vec<Chromosome> = elitism
            .select(scores)
            .into_iter()
            .map(|idx| parents[idx].clone())
            .collect();

        let plans = (next.len()..parents.len())
            .map(|_| -> Result<(ParentPair, u64)> {
                Ok((selection.select_parents(scores, rng)?, rng.next_seed()))
            })
            .collect::<Result<Vec<_>>>()?;

        let breed_one = |&(pair, seed): &(ParentPair, u64)| {
            let mut child_rng = RandomNumberGenerator::from_seed(seed);
            breed(
                &parents[pair.first],
                &parents[pair.second],
                self.catalog,
                &self.options,
                &mut child_rng,
            )
        };

        if parallel {
            next.par_extend(plans.par_iter().map(&breed_one));
        } else {
            next.extend(plans.iter().map(&breed_one));
        }

        Population::from_chromosomes(next)
    }
}

fn evaluate(
    evaluator: &dyn Evaluator,
    population: &Population,
    parallel: bool,
) -> Vec<PenaltyBreakdown> {
    if parallel {
        population
            .chromosomes()
            .par_iter()
            .map(|chromosome| evaluator.evaluate(chromosome))
            .collect()
    } else {
        population
            .iter()
            .map(|chromosome| evaluator.evaluate(chromosome))
            .collect()
    }
}

fn transition(state: &mut EvolutionState, next: EvolutionState) {
    debug!(from = %state, to = %next, "evolution state change");
    *state = next;
}

fn log_generation(log_level: LogLevel, generation: usize, best: &PenaltyBreakdown) {
    match log_level {
        LogLevel::None => {}
        LogLevel::Minimal => info!(generation, best = %best.score(), "generation evaluated"),
        LogLevel::Verbose => {
            info!(generation, best = %best.score(), "generation evaluated");
            debug!(
                generation,
                faculty_clashes = best.faculty_clashes,
                room_clashes = best.room_clashes,
                section_clashes = best.section_clashes,
                faculty_unavailable = best.faculty_unavailable,
                lab_continuity = best.lab_continuity,
                lunch_intrusions = best.lunch_intrusions,
                load_imbalance = best.load_imbalance,
                "best breakdown"
            );
        }
    }
}

/// Runs the optimizer with the catalog's options.
///
/// # Errors
///
/// See [`EvolutionLauncher::run`].
pub fn optimize(catalog: &Catalog, rng: &mut RandomNumberGenerator) -> Result<EvolutionResult> {
    EvolutionLauncher::new(catalog).run(rng)
}

/// Runs the optimizer from a fixed seed. Equal seeds give equal results.
///
/// # Errors
///
/// See [`EvolutionLauncher::run`].
pub fn optimize_with_seed(catalog: &Catalog, seed: u64) -> Result<EvolutionResult> {
    optimize(catalog, &mut RandomNumberGenerator::from_seed(seed))
}
