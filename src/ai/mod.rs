pub mod negamax;
pub mod weights;

pub use negamax::{EngineConfig, INFINITY, NegamaxPlayer, NegamaxResult, SearchStats, WIN_SCORE};
pub use weights::{DEFAULT_CORNER, WeightMatrix, Weights};
