//! Label overlap avoidance within one render pass

/// Minimum screen distance between two labels on the same axis
pub const MIN_LABEL_SEPARATION: f64 = 50.0;

/// Positions already taken by labels during a single render call
///
/// Created fresh for every pass and dropped with it, so no placement ever
/// leaks into the next redraw.
#[derive(Debug, Clone, Default)]
pub struct LabeledPositions {
    positions: Vec<f64>,
    min_separation: f64,
}

impl LabeledPositions {
    /// Create an empty list with the given separation
    pub fn new(min_separation: f64) -> Self {
        LabeledPositions {
            positions: Vec::new(),
            min_separation,
        }
    }

    /// Whether a label at `position` keeps its distance from all others
    pub fn is_clear(&self, position: f64) -> bool {
        self.positions
            .iter()
            .all(|placed| (placed - position).abs() >= self.min_separation)
    }

    /// Take a position
    pub fn record(&mut self, position: f64) {
        self.positions.push(position);
    }

    /// Pick the first candidate that is visible and clear, and take it
    ///
    /// # Arguments
    /// * `candidates` - Screen positions in priority order
    /// * `visible` - Whether the candidate at an index lies inside the view
    ///
    /// # Returns
    /// Index of the chosen candidate, or `None` when every one is rejected
    pub fn place<F>(&mut self, candidates: &[f64], visible: F) -> Option<usize>
    where
        F: Fn(usize) -> bool,
    {
        let index = (0..candidates.len())
            .find(|&i| visible(i) && self.is_clear(candidates[i]))?;
        self.record(candidates[index]);
        Some(index)
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }
}
