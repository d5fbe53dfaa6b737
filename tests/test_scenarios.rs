mod common;

use timetabler::catalog::CatalogBuilder;
use timetabler::evolution::{optimize_with_seed, EvolutionOptions, Outcome};
use timetabler::TimetableError;

use common::{department_catalog, init_tracing, over_constrained_catalog, trivial_catalog};

#[test]
fn test_trivially_satisfiable_catalog_converges() {
    init_tracing();
    let catalog = trivial_catalog();

    let result = optimize_with_seed(&catalog, 42).unwrap();

    assert!(result.is_perfect);
    assert_eq!(result.outcome, Outcome::Converged);
    assert!(result.generations_used <= 50);
    assert_eq!(result.breakdown.hard_penalty, 0);
    assert!(result.chromosome.is_complete(&catalog));

    // the lab holds two contiguous periods and the theory session sits elsewhere
    let genes = result.chromosome.genes();
    let lab = genes.iter().find(|gene| gene.is_lab()).unwrap();
    let theory = genes.iter().find(|gene| !gene.is_lab()).unwrap();
    let lab_slot = lab.lab_slot.unwrap();
    assert_eq!(lab_slot.0, lab.slot.0 + 1);
    assert!(theory.slot != lab.slot && theory.slot != lab_slot);
}

#[test]
fn test_over_constrained_catalog_terminates() {
    init_tracing();
    let catalog = over_constrained_catalog();

    let result = optimize_with_seed(&catalog, 7).unwrap();

    assert_eq!(result.outcome, Outcome::Terminated);
    assert!(!result.is_perfect);
    assert!(result.breakdown.faculty_clashes > 0);
    assert_eq!(result.generations_used, 15);
    assert_eq!(result.best_per_generation.len(), 16);
    assert!(result.chromosome.is_complete(&catalog));
}

#[test]
fn test_best_score_never_gets_worse() {
    init_tracing();
    let options = EvolutionOptions::builder()
        .population_size(30)
        .max_generations(40)
        .build();
    let catalog = department_catalog(options);

    for seed in [1, 2, 3] {
        let result = optimize_with_seed(&catalog, seed).unwrap();
        for pair in result.best_per_generation.windows(2) {
            assert!(pair[1] <= pair[0], "{} followed by {}", pair[0], pair[1]);
        }
        assert_eq!(
            result.score(),
            *result.best_per_generation.last().unwrap()
        );
        assert!(result.chromosome.is_complete(&catalog));
    }
}

#[test]
fn test_unqualified_subject_is_a_configuration_error() {
    let mut builder = CatalogBuilder::new();
    let chemistry = builder.add_subject("Chemistry", "CH101", 2, false);
    let physics = builder.add_subject("Physics", "PH101", 2, false);
    builder.add_faculty("Dr. Joshi", [chemistry], []);
    builder.add_room("R-1", 60, false);
    builder.weekly_grid(5, 6, 3, 1);
    let section = builder.add_section("BSC-A", 40);
    builder.require(section, chemistry).require(section, physics);
    let catalog = builder.build().unwrap();

    let error = optimize_with_seed(&catalog, 1).unwrap_err();
    assert!(matches!(error, TimetableError::Configuration(ref msg) if msg.contains("Physics")));
}

#[test]
fn test_lab_without_contiguous_slots_is_a_configuration_error() {
    let mut builder = CatalogBuilder::new();
    let lab = builder.add_subject("Chemistry Lab", "CH191", 1, true);
    builder.add_faculty("Dr. Joshi", [lab], []);
    builder.add_room("Lab-C", 40, true);
    // one period per day: no two periods are contiguous
    builder.weekly_grid(5, 1, 3, 0);
    let section = builder.add_section("BSC-A", 40);
    builder.require(section, lab);
    let catalog = builder.build().unwrap();

    assert!(matches!(
        optimize_with_seed(&catalog, 1),
        Err(TimetableError::Configuration(_))
    ));
}

#[test]
fn test_too_many_sessions_for_the_week_is_a_configuration_error() {
    let mut builder = CatalogBuilder::new();
    let subject = builder.add_subject("History", "HS201", 7, false);
    builder.add_faculty("Dr. Bhat", [subject], []);
    builder.add_room("R-1", 40, false);
    builder.weekly_grid(1, 6, 3, 0);
    let section = builder.add_section("BA-A", 40);
    builder.require(section, subject);
    let catalog = builder.build().unwrap();

    assert!(matches!(
        optimize_with_seed(&catalog, 1),
        Err(TimetableError::Configuration(_))
    ));
}
