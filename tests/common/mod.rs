#![allow(dead_code)]

use timetabler::catalog::{Catalog, CatalogBuilder};
use timetabler::evolution::EvolutionOptions;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// One section, a theory subject and a lab, one room, one teacher, five periods.
pub fn trivial_catalog() -> Catalog {
    let mut builder = CatalogBuilder::new();
    let theory = builder.add_subject("Digital Logic", "EC201", 1, false);
    let lab = builder.add_subject("Digital Logic Lab", "EC291", 1, true);
    builder.add_faculty("Dr. Menon", [theory, lab], []);
    builder.add_room("Lab-1", 40, true);
    for period in 0..5 {
        builder.add_slot(0, period, false);
    }
    let section = builder.add_section("ECE-A", 40);
    builder.require(section, theory).require(section, lab);
    builder.options(
        EvolutionOptions::builder()
            .population_size(50)
            .max_generations(50)
            .build(),
    );
    builder.build().unwrap()
}

/// Three sections that all need the only teacher six times in two periods.
pub fn over_constrained_catalog() -> Catalog {
    let mut builder = CatalogBuilder::new();
    let subject = builder.add_subject("Ethics", "HS101", 2, false);
    builder.add_faculty("Dr. Kapoor", [subject], []);
    for room in ["R-1", "R-2", "R-3"] {
        builder.add_room(room, 60, false);
    }
    builder.weekly_grid(1, 2, 5, 0);
    for name in ["CSE-A", "ECE-A", "ME-A"] {
        let section = builder.add_section(name, 50);
        builder.require(section, subject);
    }
    builder.options(
        EvolutionOptions::builder()
            .population_size(20)
            .max_generations(15)
            .build(),
    );
    builder.build().unwrap()
}

/// A week for three sections with some tension between teachers and rooms.
pub fn department_catalog(options: EvolutionOptions) -> Catalog {
    let mut builder = CatalogBuilder::new();
    let maths = builder.add_subject("Discrete Mathematics", "MA202", 4, false);
    let os = builder.add_subject("Operating Systems", "CS301", 3, false);
    let dsa = builder.add_subject("Data Structures", "CS201", 3, false);
    let os_lab = builder.add_subject("Operating Systems Lab", "CS391", 1, true);

    let slots = builder.weekly_grid(5, 6, 3, 1);
    builder.add_faculty("Dr. Rao", [maths], [slots[0], slots[6]]);
    builder.add_faculty("Dr. Gupta", [os, os_lab], []);
    builder.add_faculty("Dr. Fernandes", [dsa, os_lab], [slots[29]]);
    builder.add_faculty("Dr. Ali", [maths, dsa], []);

    builder.add_room("R-201", 60, false);
    builder.add_room("R-202", 60, false);
    builder.add_room("Lab-OS", 60, true);

    for name in ["CSE-A", "CSE-B", "CSE-C"] {
        let section = builder.add_section(name, 55);
        builder
            .require(section, maths)
            .require(section, os)
            .require(section, dsa)
            .require(section, os_lab);
    }
    builder.options(options);
    builder.build().unwrap()
}
