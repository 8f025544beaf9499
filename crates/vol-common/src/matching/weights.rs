/// Rule-based fallback weights, in percentage points.
/// Personality carries the most weight; the five factors are exhaustive.
pub const FALLBACK_WEIGHTS: Weights = Weights {
    location: 20.0,
    interests: 25.0,
    personality: 30.0,
    time: 15.0,
    department: 10.0,
};

#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub location: f64,
    pub interests: f64,
    pub personality: f64,
    pub time: f64,
    pub department: f64,
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.location + self.interests + self.personality + self.time + self.department
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_hundred() {
        assert!((FALLBACK_WEIGHTS.sum() - 100.0).abs() < 1e-9);
    }
}
