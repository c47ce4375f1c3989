use std::fmt::{Display, Formatter};

use anyhow::ensure;
use itertools::Itertools;
use log::{debug, trace};
use petgraph::graph::{NodeIndex, UnGraph};
use prettytable::{Cell, Row, Table};

use crate::error::{OptError, OptResult};
use crate::expr::{input_refs, ScalarOperator};
use crate::multijoin::{Bitmap, FactorId, FactorLayout, JoinFilter};
use crate::optimizer::WeightPolicy;

/// Accumulates factor weights from join filters.
///
/// A weight only ever goes up: each filter raises the weight of the factor pairs it connects to
/// its own contribution if that is larger, so the result does not depend on filter order.
pub struct FactorWeightsBuilder<'a> {
    layout: &'a FactorLayout,
    policy: WeightPolicy,
    weights: Vec<u32>,
    factors_ref_by_factor: Vec<Bitmap>,
}

impl<'a> FactorWeightsBuilder<'a> {
    pub fn new(layout: &'a FactorLayout, policy: WeightPolicy) -> Self {
        let factor_count = layout.factor_count();
        Self {
            layout,
            policy,
            weights: vec![0; factor_count * factor_count],
            factors_ref_by_factor: vec![Bitmap::with_capacity(factor_count); factor_count],
        }
    }

    /// Folds one join filter into the weights. Only comparisons contribute.
    pub fn add_filter(&mut self, filter: &JoinFilter) -> OptResult<()> {
        let call = match filter.expr().as_comparison() {
            Some(call) => call,
            None => {
                trace!("Skipping non comparison join filter {}", filter.expr());
                return Ok(());
            }
        };
        ensure!(
            call.operands().len() == 2,
            OptError::MalformedComparison {
                operator: call.op(),
                operands: call.operands().len()
            }
        );

        let factors_ref = filter.factors_ref();
        for factor in factors_ref.iter() {
            self.layout.check_factor(factor)?;
            let refs = &mut self.factors_ref_by_factor[factor];
            refs.union_with(factors_ref);
            refs.remove(factor);
        }

        if let Some((left_factor, right_factor)) = factors_ref.iter().collect_tuple() {
            let left_fields = input_refs(&call.operands()[0], self.layout.total_fields());
            let left_factors = self.layout.factors_of(&left_fields)?;

            // One factor on each side of the operator, otherwise it's no better than a cross
            // product of the two factors.
            let weight = if left_factors.len() == 1 {
                if call.op() == ScalarOperator::Eq {
                    self.policy.equi_join
                } else {
                    self.policy.comparison
                }
            } else {
                self.policy.cross_product
            };
            self.raise_weight(weight, left_factor, right_factor);
        } else {
            let factors = factors_ref.iter().collect_vec();
            for (outer, inner) in factors.into_iter().tuple_combinations() {
                self.raise_weight(self.policy.cross_product, outer, inner);
            }
        }

        Ok(())
    }

    fn raise_weight(&mut self, weight: u32, left: FactorId, right: FactorId) {
        let factor_count = self.layout.factor_count();
        if self.weights[left * factor_count + right] < weight {
            trace!("Raising weight of factors ({}, {}) to {}", left, right, weight);
            self.weights[left * factor_count + right] = weight;
            self.weights[right * factor_count + left] = weight;
        }
    }

    pub fn build(self) -> FactorWeights {
        FactorWeights {
            factor_count: self.layout.factor_count(),
            weights: self.weights,
            factors_ref_by_factor: self.factors_ref_by_factor,
        }
    }
}

/// Symmetric pairwise weights between join factors, plus for each factor the other factors it's
/// compared with in some join filter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FactorWeights {
    factor_count: usize,
    weights: Vec<u32>,
    factors_ref_by_factor: Vec<Bitmap>,
}

impl FactorWeights {
    /// Computes weights from scratch for `filters`.
    pub fn compute<'a, I>(
        layout: &FactorLayout,
        filters: I,
        policy: WeightPolicy,
    ) -> OptResult<FactorWeights>
    where
        I: IntoIterator<Item = &'a JoinFilter>,
    {
        let mut builder = FactorWeightsBuilder::new(layout, policy);
        for filter in filters {
            builder.add_filter(filter)?;
        }
        let weights = builder.build();
        debug!("Factor weights:\n{}", weights);
        Ok(weights)
    }

    pub fn factor_count(&self) -> usize {
        self.factor_count
    }

    /// Weight between factors `left` and `right`, 0 when no join filter relates them.
    ///
    /// # Panics
    ///
    /// Panics if either factor is not a factor of the multi join.
    pub fn weight(&self, left: FactorId, right: FactorId) -> u32 {
        assert!(
            left < self.factor_count && right < self.factor_count,
            "factors ({}, {}) out of range, factor count: {}",
            left,
            right,
            self.factor_count
        );
        self.weights[left * self.factor_count + right]
    }

    /// Weights between `factor` and every factor, indexed by factor.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is not a factor of the multi join.
    pub fn weights_of(&self, factor: FactorId) -> &[u32] {
        let start = factor * self.factor_count;
        &self.weights[start..start + self.factor_count]
    }

    /// Factors compared with `factor` in some join filter.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is not a factor of the multi join.
    pub fn factors_ref_by_factor(&self, factor: FactorId) -> &Bitmap {
        &self.factors_ref_by_factor[factor]
    }

    /// Undirected graph with a node per factor, weighted by factor index, and an edge for each
    /// pair of factors with a positive weight.
    pub fn to_graph(&self) -> UnGraph<FactorId, u32> {
        let mut graph = UnGraph::with_capacity(self.factor_count, 0);
        let nodes: Vec<NodeIndex> = (0..self.factor_count)
            .map(|factor| graph.add_node(factor))
            .collect();
        for (left, right) in (0..self.factor_count).tuple_combinations() {
            let weight = self.weight(left, right);
            if weight > 0 {
                graph.add_edge(nodes[left], nodes[right], weight);
            }
        }
        graph
    }
}

impl Display for FactorWeights {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut table = Table::new();
        let titles = std::iter::once(Cell::new(""))
            .chain((0..self.factor_count).map(|factor| Cell::new(&factor.to_string())))
            .collect();
        table.set_titles(Row::new(titles));
        for left in 0..self.factor_count {
            let cells = std::iter::once(Cell::new(&left.to_string()))
                .chain(
                    self.weights_of(left)
                        .iter()
                        .map(|weight| Cell::new(&weight.to_string())),
                )
                .collect();
            table.add_row(Row::new(cells));
        }
        write!(f, "{}", table)
    }
}
