pub mod elitist;
pub mod roulette;
pub mod selection_strategy;
pub mod tournament;

pub use elitist::{best_index, elite_indices, ranked_indices, ElitistSelection};
pub use roulette::RouletteWheelSelection;
pub use selection_strategy::{ParentPair, SelectionStrategy};
pub use tournament::TournamentSelection;
