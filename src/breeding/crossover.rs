use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::chromosome::Chromosome;
use crate::rng::RandomNumberGenerator;

/// How a child takes its genes from two parents.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CrossoverType {
    /// Each section's whole timetable comes from one parent, chosen by a fair coin.
    #[default]
    Section,
    /// A fair coin per day; a gene comes from the first parent when that parent
    /// places it on a day drawn for it, otherwise from the second parent.
    Day,
}

/// Recombines `first` and `second` into a new chromosome.
///
/// Genes are copied whole, so a lab is never split from its second period.
///
/// # Panics
///
/// Panics if the parents are not chromosomes of `catalog`.
pub fn crossover(
    first: &Chromosome,
    second: &Chromosome,
    catalog: &Catalog,
    crossover_type: CrossoverType,
    rng: &mut RandomNumberGenerator,
) -> Chromosome {
    assert_eq!(first.len(), catalog.session_count(), "parent is incomplete");
    assert_eq!(second.len(), catalog.session_count(), "parent is incomplete");

    let genes = match crossover_type {
        CrossoverType::Section => {
            let mut genes = Vec::with_capacity(first.len());
            for section in catalog.sections() {
                let parent = if rng.gen_bool(0.5) { first } else { second };
                genes.extend_from_slice(parent.section_block(catalog, section.id));
            }
            genes
        }
        CrossoverType::Day => {
            let from_first: HashMap<usize, bool> = catalog
                .days()
                .iter()
                .map(|&day| (day, rng.gen_bool(0.5)))
                .collect();
            first
                .genes()
                .iter()
                .zip(second.genes())
                .map(|(a, b)| {
                    let day = catalog.slot(a.slot).day;
                    if from_first.get(&day).copied().unwrap_or(true) {
                        *a
                    } else {
                        *b
                    }
                })
                .collect()
        }
    };

    let child = Chromosome::from_genes_unchecked(genes);
    assert!(
        child.covers_sessions(catalog),
        "offspring does not cover the catalog's sessions"
    );
    debug_assert!(child.is_complete(catalog));
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogBuilder, SectionId};

    fn catalog() -> Catalog {
        let mut builder = CatalogBuilder::new();
        let theory = builder.add_subject("Networks", "CS305", 3, false);
        let lab = builder.add_subject("Networks Lab", "CS395", 1, true);
        builder.add_faculty("Dr. Iyer", [theory, lab], []);
        builder.add_faculty("Dr. Khan", [theory, lab], []);
        builder.add_room("R-12", 60, false);
        builder.add_room("Lab-3", 60, true);
        builder.weekly_grid(5, 6, 3, 1);
        for name in ["CSE-A", "CSE-B", "CSE-C"] {
            let section = builder.add_section(name, 55);
            builder.require(section, theory).require(section, lab);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_section_crossover_takes_whole_blocks() {
        let catalog = catalog();
        let mut rng = RandomNumberGenerator::from_seed(21);
        let a = Chromosome::random(&catalog, &mut rng).unwrap();
        let b = Chromosome::random(&catalog, &mut rng).unwrap();
        let (a_before, b_before) = (a.clone(), b.clone());

        for _ in 0..20 {
            let child = crossover(&a, &b, &catalog, CrossoverType::Section, &mut rng);
            assert!(child.is_complete(&catalog));
            for section in 0..3 {
                let block = child.section_block(&catalog, SectionId(section));
                assert!(
                    block == a.section_block(&catalog, SectionId(section))
                        || block == b.section_block(&catalog, SectionId(section))
                );
            }
        }

        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_day_crossover_copies_genes_from_a_parent() {
        let catalog = catalog();
        let mut rng = RandomNumberGenerator::from_seed(22);
        let a = Chromosome::random(&catalog, &mut rng).unwrap();
        let b = Chromosome::random(&catalog, &mut rng).unwrap();

        for _ in 0..20 {
            let child = crossover(&a, &b, &catalog, CrossoverType::Day, &mut rng);
            assert!(child.is_complete(&catalog));
            for (idx, gene) in child.genes().iter().enumerate() {
                assert!(*gene == a.genes()[idx] || *gene == b.genes()[idx]);
            }
        }
    }

    #[test]
    #[should_panic(expected = "offspring does not cover the catalog's sessions")]
    fn test_parents_of_another_catalog_are_refused() {
        let catalog = catalog();

        // same session count, but one section holding all twelve sessions
        let mut builder = CatalogBuilder::new();
        let theory = builder.add_subject("Networks", "CS305", 12, false);
        builder.add_faculty("Dr. Iyer", [theory], []);
        builder.add_room("R-12", 60, false);
        builder.weekly_grid(5, 6, 3, 1);
        let section = builder.add_section("CSE-A", 55);
        builder.require(section, theory);
        let other = builder.build().unwrap();

        let mut rng = RandomNumberGenerator::from_seed(24);
        let a = Chromosome::random(&other, &mut rng).unwrap();
        let b = Chromosome::random(&other, &mut rng).unwrap();
        assert_eq!(a.len(), catalog.session_count());

        crossover(&a, &b, &catalog, CrossoverType::Section, &mut rng);
    }

    #[test]
    fn test_identical_parents_give_identical_child() {
        let catalog = catalog();
        let mut rng = RandomNumberGenerator::from_seed(23);
        let a = Chromosome::random(&catalog, &mut rng).unwrap();

        for crossover_type in [CrossoverType::Section, CrossoverType::Day] {
            assert_eq!(crossover(&a, &a, &catalog, crossover_type, &mut rng), a);
        }
    }
}
