use crate::catalog::Catalog;
use crate::chromosome::{Chromosome, Gene};
use crate::rng::RandomNumberGenerator;

/// Returns a copy of `chromosome` in which every gene has independently been
/// redrawn with probability `rate`.
///
/// A redrawn gene gets a fresh eligible faculty, room and start slot, with a lab
/// keeping a contiguous second period.
///
/// # Panics
///
/// Panics if `chromosome` does not belong to `catalog`.
pub fn mutate(
    chromosome: &Chromosome,
    catalog: &Catalog,
    rate: f64,
    rng: &mut RandomNumberGenerator,
) -> Chromosome {
    let genes = chromosome
        .genes()
        .iter()
        .enumerate()
        .map(|(idx, gene)| {
            if rng.gen_bool(rate) {
                Gene::random(catalog, idx, rng).unwrap_or(*gene)
            } else {
                *gene
            }
        })
        .collect();

    let mutated = Chromosome::from_genes_unchecked(genes);
    assert!(
        mutated.covers_sessions(catalog),
        "mutant does not cover the catalog's sessions"
    );
    debug_assert!(mutated.is_complete(catalog));
    mutated
}
