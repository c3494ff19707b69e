//! Selection strategies
//!
//! Policy objects that reduce an oversized candidate pool back to a
//! target size, weighted by fitness. Each strategy optionally reserves an
//! `epsilon` fraction of the target slots for freshly generated
//! offspring of the best pool member.

pub mod elite;
pub mod rank;
pub mod roulette;
pub mod traits;

pub use elite::EliteSelection;
pub use rank::RankSelection;
pub use roulette::RouletteWheelSelection;
pub use traits::{SelectionMethod, MAX_EPSILON};
