//! # Population
//!
//! An ordered, fixed-size generation of chromosomes. The first generation is drawn
//! at random from the catalog's eligibility tables; later generations are assembled
//! by the evolution loop from elites and offspring.

use tracing::debug;

use crate::catalog::Catalog;
use crate::chromosome::Chromosome;
use crate::error::{Result, TimetableError};
use crate::rng::RandomNumberGenerator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    chromosomes: Vec<Chromosome>,
}

impl Population {
    /// Creates `size` random chromosomes.
    ///
    /// Each session gets a uniformly random eligible (slot, room, faculty) triple.
    /// Clashes are allowed here; they keep the first generation diverse and are
    /// penalized during evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`TimetableError::Configuration`] if `size` is zero or the catalog
    /// fails [`Catalog::check_feasibility`].
    pub fn initialize(
        catalog: &Catalog,
        size: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self> {
        if size == 0 {
            return Err(TimetableError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }
        catalog.check_feasibility()?;

        let chromosomes = (0..size)
            .map(|_| Chromosome::random(catalog, rng))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            size,
            genes = catalog.session_count(),
            "initial population drawn"
        );

        Ok(Self { chromosomes })
    }

    pub fn from_chromosomes(chromosomes: Vec<Chromosome>) -> Result<Self> {
        if chromosomes.is_empty() {
            return Err(TimetableError::EmptyPopulation);
        }
        Ok(Self { chromosomes })
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn get(&self, idx: usize) -> Option<&Chromosome> {
        self.chromosomes.get(idx)
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chromosome> {
        self.chromosomes.iter()
    }

    pub fn into_chromosomes(self) -> Vec<Chromosome> {
        self.chromosomes
    }
}
