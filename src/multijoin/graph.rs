use log::debug;
use petgraph::algo::connected_components;

use crate::error::OptResult;
use crate::multijoin::{Bitmap, FactorId, FactorLayout, FactorWeights, JoinFilter, JoinTreeOrder};
use crate::operator::{MultiJoin, TableScan};
use crate::optimizer::OptimizerContext;
use crate::properties::Field;

/// Join factors of a [`MultiJoin`], the join filters over them, and how strongly each pair of
/// factors wants to be joined directly.
///
/// Built once per optimization attempt and read only afterwards. Accessors taking a [`FactorId`]
/// panic on an unknown factor, like slice indexing. Queries over join trees, which come from the
/// search, return [`OptError::FactorOutOfRange`] instead.
///
/// [`OptError::FactorOutOfRange`]: crate::error::OptError::FactorOutOfRange
#[derive(Debug)]
pub struct JoinFactorGraph {
    multi_join: MultiJoin,
    context: OptimizerContext,
    layout: FactorLayout,
    join_filters: Vec<JoinFilter>,
    weights: FactorWeights,
}

impl JoinFactorGraph {
    pub fn try_new(multi_join: MultiJoin, context: OptimizerContext) -> OptResult<Self> {
        context.weight_policy.validate()?;
        let layout = FactorLayout::try_new(multi_join.inputs().iter().map(TableScan::field_count))?;
        let join_filters = JoinFilter::decompose(multi_join.condition(), &layout)?;
        let weights = FactorWeights::compute(&layout, &join_filters, context.weight_policy)?;

        debug!(
            "Built join factor graph with {} factors, {} fields and {} join filters",
            layout.factor_count(),
            layout.total_fields(),
            join_filters.len()
        );

        Ok(Self {
            multi_join,
            context,
            layout,
            join_filters,
            weights,
        })
    }

    pub fn multi_join(&self) -> &MultiJoin {
        &self.multi_join
    }

    pub fn context(&self) -> &OptimizerContext {
        &self.context
    }

    pub fn layout(&self) -> &FactorLayout {
        &self.layout
    }

    pub fn factor_count(&self) -> usize {
        self.layout.factor_count()
    }

    /// Input relation of `factor`.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is not a factor of the multi join.
    pub fn join_factor(&self, factor: FactorId) -> &TableScan {
        &self.multi_join.inputs()[factor]
    }

    pub fn total_fields(&self) -> usize {
        self.layout.total_fields()
    }

    pub fn field_count(&self, factor: FactorId) -> usize {
        self.layout.field_count(factor)
    }

    pub fn join_start(&self, factor: FactorId) -> usize {
        self.layout.join_start(factor)
    }

    /// Fields of the multi join row, indexed by global field ordinal.
    pub fn multi_join_fields(&self) -> Vec<&Field> {
        self.multi_join.fields().collect()
    }

    pub fn join_filters(&self) -> &[JoinFilter] {
        &self.join_filters
    }

    pub fn weights(&self) -> &FactorWeights {
        &self.weights
    }

    pub fn factor_weight(&self, left: FactorId, right: FactorId) -> u32 {
        self.weights.weight(left, right)
    }

    pub fn factors_ref_by_factor(&self, factor: FactorId) -> &Bitmap {
        self.weights.factors_ref_by_factor(factor)
    }

    /// Recomputes factor weights from the join filters, ignoring the ones already computed.
    pub fn compute_weights(&self) -> OptResult<FactorWeights> {
        FactorWeights::compute(
            &self.layout,
            &self.join_filters,
            self.context.weight_policy,
        )
    }

    /// Whether positive weights link all factors together, so some join order avoids cross
    /// products.
    pub fn is_connected(&self) -> bool {
        connected_components(&self.weights.to_graph()) == 1
    }

    pub fn child_factors<T: JoinTreeOrder + ?Sized>(&self, tree: &T) -> OptResult<Bitmap> {
        self.layout.child_factors(tree)
    }

    pub fn has_all_factors<T: JoinTreeOrder + ?Sized>(
        &self,
        tree: &T,
        factors_needed: &Bitmap,
    ) -> OptResult<bool> {
        self.layout.has_all_factors(tree, factors_needed)
    }

    pub fn fields_of_tree<T: JoinTreeOrder + ?Sized>(&self, tree: &T) -> OptResult<Bitmap> {
        self.layout.fields_of_tree(tree)
    }
}
