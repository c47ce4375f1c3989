use anyhow::ensure;

use crate::error::{OptError, OptResult};

/// Weight contributed by each kind of join filter to the factors it connects.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WeightPolicy {
    /// Equality between two factors.
    pub equi_join: u32,
    /// Non equality comparison between two factors.
    pub comparison: u32,
    /// Anything else relating factors, e.g. both factors on one side of a comparison or a
    /// comparison spanning more than two factors.
    pub cross_product: u32,
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self {
            equi_join: 3,
            comparison: 2,
            cross_product: 1,
        }
    }
}

impl WeightPolicy {
    pub fn validate(&self) -> OptResult<()> {
        ensure!(
            self.equi_join >= self.comparison
                && self.comparison >= self.cross_product
                && self.cross_product > 0,
            OptError::InvalidWeightPolicy(format!(
                "expected equi_join >= comparison >= cross_product > 0, got {:?}",
                self
            ))
        );
        Ok(())
    }
}

/// Configuration of one optimization attempt.
#[derive(Clone, Debug, Default)]
pub struct OptimizerContext {
    pub weight_policy: WeightPolicy,
}
