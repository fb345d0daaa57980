//! Solver configuration.

/// Knobs for the PCST heuristic.
///
/// Defaults run sequentially and let phase 1 stop on its own (strict
/// non-improvement of the reported tree weight).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverCfg {
    /// Run the per-source Dijkstra searches of the shortest-path index on rayon's pool.
    pub parallel: bool,
    /// Upper bound on STP rounds in phase 1. `None` means no cap.
    pub max_rounds: Option<usize>,
}

impl SolverCfg {
    #[inline]
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_max_rounds(self, rounds: usize) -> Self {
        Self {
            max_rounds: Some(rounds),
            ..self
        }
    }
}
