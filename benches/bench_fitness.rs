use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use timetabler::{
    caching::CachedEvaluator,
    catalog::{Catalog, CatalogBuilder},
    chromosome::Chromosome,
    fitness::{Evaluator, FitnessEvaluator},
    rng::RandomNumberGenerator,
};

// A department with `sections` sections sharing six teachers and four rooms.
fn department(sections: usize) -> Catalog {
    let mut builder = CatalogBuilder::new();
    let subjects = [
        builder.add_subject("Mathematics", "MA101", 4, false),
        builder.add_subject("Physics", "PH101", 3, false),
        builder.add_subject("Programming", "CS101", 3, false),
        builder.add_subject("English", "HS101", 2, false),
        builder.add_subject("Physics Lab", "PH191", 1, true),
        builder.add_subject("Programming Lab", "CS191", 1, true),
    ];
    let slots = builder.weekly_grid(5, 8, 4, 1);

    for (idx, pair) in subjects.chunks(2).enumerate() {
        builder.add_faculty(format!("Teacher {}", idx * 2), pair.to_vec(), []);
        builder.add_faculty(
            format!("Teacher {}", idx * 2 + 1),
            pair.to_vec(),
            [slots[idx]],
        );
    }
    builder.add_room("R-1", 70, false);
    builder.add_room("R-2", 70, false);
    builder.add_room("Lab-1", 70, true);
    builder.add_room("Lab-2", 70, true);

    for idx in 0..sections {
        let section = builder.add_section(format!("Section {}", idx), 60);
        for &subject in &subjects {
            builder.require(section, subject);
        }
    }
    builder.build().unwrap()
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for sections in [2, 8, 32] {
        let catalog = department(sections);
        let mut rng = RandomNumberGenerator::from_seed(42);
        let chromosome = Chromosome::random(&catalog, &mut rng).unwrap();
        let evaluator = FitnessEvaluator::new(&catalog);

        group.bench_with_input(
            BenchmarkId::new("uncached", sections),
            &chromosome,
            |b, chromosome| b.iter(|| evaluator.evaluate(black_box(chromosome))),
        );

        let cached = CachedEvaluator::new(FitnessEvaluator::new(&catalog));
        group.bench_with_input(
            BenchmarkId::new("cached", sections),
            &chromosome,
            |b, chromosome| b.iter(|| cached.evaluate(black_box(chromosome))),
        );
    }

    group.finish();
}

fn bench_random_chromosome(c: &mut Criterion) {
    let catalog = department(8);
    let mut rng = RandomNumberGenerator::from_seed(7);

    c.bench_function("random_chromosome", |b| {
        b.iter(|| Chromosome::random(black_box(&catalog), &mut rng).unwrap())
    });
}

criterion_group!(benches, bench_evaluate, bench_random_chromosome);
criterion_main!(benches);
