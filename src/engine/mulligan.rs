use serde::Serialize;

/// Most mulligans a scenario may allow
pub const MAX_MULLIGANS: u32 = 20;

/// Cumulative success probability across mulligans.
///
/// Entry `i` is the chance of having found a successful hand within
/// `i + 1` draws, each mulligan being a fresh full-size hand from the full
/// deck with the same single-hand success probability. Deck shrinkage and
/// information carried between mulligans are not modelled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MulliganCurve(Vec<f64>);

impl MulliganCurve {
    pub fn new(single_hand_success: f64, mulligans: u32) -> Self {
        let p = single_hand_success.clamp(0.0, 1.0);
        let miss = 1.0 - p;

        // still_missing == (1 - p)^(i + 1) at entry i
        let mut still_missing = miss;
        let retries = (0..mulligans).map(|_| {
            still_missing *= miss;
            1.0 - still_missing
        });
        MulliganCurve(std::iter::once(p).chain(retries).collect())
    }

    /// Success probability keeping the opening hand
    pub fn opening(&self) -> f64 {
        self.0[0]
    }

    /// Success probability after `mulligans` redraws
    pub fn after(&self, mulligans: usize) -> Option<f64> {
        self.0.get(mulligans).copied()
    }

    /// Success probability using every allowed mulligan
    pub fn last(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
