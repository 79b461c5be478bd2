//! Strategy presets: named weight vectors over the four scoring factors.

use serde::Serialize;

/// Relative weight of each factor in the total score.
///
/// Presets sum to 1.0; nothing enforces that for hand-built weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependencies: f64,
}

impl Weights {
    pub const fn new(urgency: f64, importance: f64, effort: f64, dependencies: f64) -> Self {
        Self {
            urgency,
            importance,
            effort,
            dependencies,
        }
    }

    pub fn sum(&self) -> f64 {
        self.urgency + self.importance + self.effort + self.dependencies
    }
}

/// Name used when a request does not ask for a strategy.
pub const DEFAULT_STRATEGY_NAME: &str = "smart";

/// Preset applied to any name missing from [`STRATEGIES`].
pub const DEFAULT_STRATEGY: (&str, Weights) =
    (DEFAULT_STRATEGY_NAME, Weights::new(0.4, 0.3, 0.2, 0.1));

pub const STRATEGIES: [(&str, Weights); 4] = [
    DEFAULT_STRATEGY,
    ("fastest", Weights::new(0.2, 0.2, 0.5, 0.1)),
    ("impact", Weights::new(0.2, 0.6, 0.1, 0.1)),
    ("deadline", Weights::new(0.7, 0.2, 0.05, 0.05)),
];

/// Look up a preset by exact name. Unknown names get the `smart` weights.
pub fn resolve_weights(name: &str) -> Weights {
    lookup(name).unwrap_or(DEFAULT_STRATEGY.1)
}

/// Exact-name lookup without the fallback.
pub fn lookup(name: &str) -> Option<Weights> {
    STRATEGIES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, w)| *w)
}

pub fn strategy_names() -> impl Iterator<Item = &'static str> {
    STRATEGIES.iter().map(|(n, _)| *n)
}
