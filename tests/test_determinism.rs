mod common;

use timetabler::evolution::{
    optimize_with_seed, CrossoverType, EvolutionLauncher, EvolutionOptions, SelectionType,
};
use timetabler::RandomNumberGenerator;

use common::{department_catalog, init_tracing};

fn options() -> EvolutionOptions {
    EvolutionOptions::builder()
        .population_size(24)
        .max_generations(25)
        .build()
}

#[test]
fn test_same_seed_same_result() {
    init_tracing();
    let catalog = department_catalog(options());

    let first = optimize_with_seed(&catalog, 2024).unwrap();
    let second = optimize_with_seed(&catalog, 2024).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_every_operator_flavor_is_deterministic() {
    let catalog = department_catalog(options());

    for selection in [SelectionType::Tournament, SelectionType::Roulette] {
        for crossover in [CrossoverType::Section, CrossoverType::Day] {
            let mut options = options();
            options.set_selection_type(selection);
            options.set_crossover_type(crossover);
            let launcher = EvolutionLauncher::new(&catalog).with_options(options);

            let first = launcher.run(&mut RandomNumberGenerator::from_seed(9)).unwrap();
            let second = launcher.run(&mut RandomNumberGenerator::from_seed(9)).unwrap();

            assert_eq!(first, second, "{:?} / {:?}", selection, crossover);
            assert!(first.chromosome.is_complete(&catalog));
        }
    }
}

#[test]
fn test_parallel_and_sequential_runs_agree() {
    init_tracing();
    let catalog = department_catalog(options());

    let mut sequential = options();
    sequential.set_parallel_threshold(usize::MAX);
    let mut parallel = options();
    parallel.set_parallel_threshold(1);

    let a = EvolutionLauncher::new(&catalog)
        .with_options(sequential)
        .run(&mut RandomNumberGenerator::from_seed(77))
        .unwrap();
    let b = EvolutionLauncher::new(&catalog)
        .with_options(parallel)
        .run(&mut RandomNumberGenerator::from_seed(77))
        .unwrap();

    assert_eq!(a, b);
}

#[test]
fn test_concurrent_runs_are_independent() {
    let catalog = department_catalog(options());
    let expected = optimize_with_seed(&catalog, 5).unwrap();

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| optimize_with_seed(&catalog, 5).unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for result in results {
        assert_eq!(result, expected);
    }
}
