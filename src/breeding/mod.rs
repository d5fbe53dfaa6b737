//! # Breeding
//!
//! Builds offspring from two parents. [`crossover`] recombines whole genes of the
//! parents and [`mutate`] redraws single genes among their eligible placements.
//! Both return new chromosomes and leave their inputs untouched, so parents can be
//! shared read-only across worker threads while a generation is bred.
//!
//! Every gene placed by either operator is a complete gene of a parent or a fresh
//! draw from [`Gene::random`](crate::chromosome::Gene::random), so offspring keep
//! one gene per session and labs keep their contiguous period pair.

pub mod crossover;
pub mod mutation;

pub use crossover::{crossover, CrossoverType};
pub use mutation::mutate;

use crate::catalog::Catalog;
use crate::chromosome::Chromosome;
use crate::evolution::options::EvolutionOptions;
use crate::rng::RandomNumberGenerator;

/// Produces one child: crossover with probability `crossover_rate`, otherwise a
/// copy of `first`, followed by mutation at `mutation_rate`.
pub fn breed(
    first: &Chromosome,
    second: &Chromosome,
    catalog: &Catalog,
    options: &EvolutionOptions,
    rng: &mut RandomNumberGenerator,
) -> Chromosome {
    let child = if rng.gen_bool(options.crossover_rate()) {
        crossover(first, second, catalog, options.crossover_type(), rng)
    } else {
        first.clone()
    };
    mutate(&child, catalog, options.mutation_rate(), rng)
}
