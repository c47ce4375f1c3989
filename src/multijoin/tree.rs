use std::fmt::{Display, Formatter};

use smallvec::SmallVec;

use crate::error::OptResult;
use crate::multijoin::{Bitmap, FactorId, FactorLayout};

pub type TreeOrder = SmallVec<[FactorId; 8]>;

/// Anything that can list the join factors at its leaves.
///
/// This is all the join graph needs to know about the join trees built by a join order search.
pub trait JoinTreeOrder {
    /// Factors at the leaves, in traversal order.
    fn tree_order(&self) -> TreeOrder;
}

/// Binary join tree over join factors.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum JoinTree {
    Factor(FactorId),
    Join(Box<JoinTree>, Box<JoinTree>),
}

impl JoinTree {
    pub fn factor(factor: FactorId) -> Self {
        JoinTree::Factor(factor)
    }

    /// Joins `self` as left input with `right`.
    pub fn join(self, right: JoinTree) -> Self {
        JoinTree::Join(Box::new(self), Box::new(right))
    }

    /// Left deep tree joining `factors` in order.
    pub fn left_deep<I>(factors: I) -> Option<Self>
    where
        I: IntoIterator<Item = FactorId>,
    {
        factors
            .into_iter()
            .map(JoinTree::factor)
            .reduce(|left, right| left.join(right))
    }

    fn collect_order(&self, order: &mut TreeOrder) {
        match self {
            JoinTree::Factor(factor) => order.push(*factor),
            JoinTree::Join(left, right) => {
                left.collect_order(order);
                right.collect_order(order);
            }
        }
    }
}

impl JoinTreeOrder for JoinTree {
    fn tree_order(&self) -> TreeOrder {
        let mut order = TreeOrder::new();
        self.collect_order(&mut order);
        order
    }
}

impl Display for JoinTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinTree::Factor(factor) => write!(f, "{}", factor),
            JoinTree::Join(left, right) => write!(f, "({} ⋈ {})", left, right),
        }
    }
}

/// Read only queries of join trees against a factor layout. Nothing is cached, the tree may change
/// between calls.
impl FactorLayout {
    /// Factors at the leaves of `tree`.
    pub fn child_factors<T: JoinTreeOrder + ?Sized>(&self, tree: &T) -> OptResult<Bitmap> {
        let mut factors = Bitmap::with_capacity(self.factor_count());
        for factor in tree.tree_order() {
            self.check_factor(factor)?;
            factors.insert(factor);
        }
        Ok(factors)
    }

    /// Tests whether `tree` contains every factor in `factors_needed`.
    pub fn has_all_factors<T: JoinTreeOrder + ?Sized>(
        &self,
        tree: &T,
        factors_needed: &Bitmap,
    ) -> OptResult<bool> {
        Ok(self.child_factors(tree)?.contains_all(factors_needed))
    }

    /// All fields of the factors in `tree`, i.e. the fields of its output row.
    pub fn fields_of_tree<T: JoinTreeOrder + ?Sized>(&self, tree: &T) -> OptResult<Bitmap> {
        let mut fields = Bitmap::with_capacity(self.total_fields());
        for factor in self.child_factors(tree)?.iter() {
            fields.insert_range(self.field_range(factor));
        }
        Ok(fields)
    }

    pub fn fields_of_factor(&self, factor: FactorId) -> OptResult<Bitmap> {
        self.check_factor(factor)?;
        let mut fields = Bitmap::with_capacity(self.total_fields());
        fields.insert_range(self.field_range(factor));
        Ok(fields)
    }
}
