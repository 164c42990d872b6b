//! Query category → fusion weights.

use std::collections::HashMap;

use verity_core::QueryCategory;

/// `(w_lex, w_vec)` applied to reciprocal-rank scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionWeights {
    pub lexical: f64,
    pub vector: f64,
}

impl FusionWeights {
    pub const fn new(lexical: f64, vector: f64) -> Self {
        Self { lexical, vector }
    }
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self::new(0.5, 0.5)
    }
}

/// Keys collapse `Financial { anchored }` into one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum WeightKey {
    BusinessOverview,
    Financial,
    Greeting,
    AnalyticsExclusion,
    Default,
}

impl From<QueryCategory> for WeightKey {
    fn from(c: QueryCategory) -> Self {
        match c {
            QueryCategory::BusinessOverview => Self::BusinessOverview,
            QueryCategory::Financial { .. } => Self::Financial,
            QueryCategory::Greeting => Self::Greeting,
            QueryCategory::AnalyticsExclusion => Self::AnalyticsExclusion,
            QueryCategory::Default => Self::Default,
        }
    }
}

pub struct WeightMatrix {
    weights: HashMap<WeightKey, FusionWeights>,
}

impl WeightMatrix {
    /// Business questions lean on keywords hardest, financial ones slightly
    /// less; everything else is balanced.
    pub fn default_weights() -> Self {
        let mut weights = HashMap::new();
        weights.insert(WeightKey::BusinessOverview, FusionWeights::new(0.8, 0.2));
        weights.insert(WeightKey::Financial, FusionWeights::new(0.7, 0.3));
        Self { weights }
    }

    pub fn for_category(&self, category: QueryCategory) -> FusionWeights {
        self.weights
            .get(&WeightKey::from(category))
            .copied()
            .unwrap_or_default()
    }
}

impl Default for WeightMatrix {
    fn default() -> Self {
        Self::default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table() {
        let m = WeightMatrix::default_weights();
        assert_eq!(
            m.for_category(QueryCategory::BusinessOverview),
            FusionWeights::new(0.8, 0.2)
        );
        assert_eq!(
            m.for_category(QueryCategory::Financial { anchored: false }),
            FusionWeights::new(0.7, 0.3)
        );
        assert_eq!(
            m.for_category(QueryCategory::Greeting),
            FusionWeights::new(0.5, 0.5)
        );
        assert_eq!(
            m.for_category(QueryCategory::Default),
            FusionWeights::new(0.5, 0.5)
        );
    }
}
