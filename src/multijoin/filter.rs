use log::{debug, trace};

use crate::error::OptResult;
use crate::expr::{decompose_conjunction, input_refs, ScalarExpr};
use crate::multijoin::{Bitmap, FactorLayout};

#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, strum_macros::Display)]
pub enum FilterCategory {
    /// Literal `TRUE`.
    AlwaysTrue,
    /// Call of a comparison operator.
    Comparison,
    Other,
}

impl FilterCategory {
    pub fn of(expr: &ScalarExpr) -> Self {
        if expr.is_always_true() {
            FilterCategory::AlwaysTrue
        } else if expr.as_comparison().is_some() {
            FilterCategory::Comparison
        } else {
            FilterCategory::Other
        }
    }
}

/// One conjunct of a multi join condition, along with the fields and factors it references.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinFilter {
    expr: ScalarExpr,
    category: FilterCategory,
    fields_ref: Bitmap,
    factors_ref: Bitmap,
}

impl JoinFilter {
    pub fn try_new(expr: ScalarExpr, layout: &FactorLayout) -> OptResult<Self> {
        let fields_ref = input_refs(&expr, layout.total_fields());
        let factors_ref = layout.factors_of(&fields_ref)?;
        Ok(Self {
            category: FilterCategory::of(&expr),
            expr,
            fields_ref,
            factors_ref,
        })
    }

    /// Splits `condition` into join filters, in conjunct order.
    ///
    /// Literal `TRUE` conjuncts are dropped.
    pub fn decompose(condition: &ScalarExpr, layout: &FactorLayout) -> OptResult<Vec<JoinFilter>> {
        let mut filters = Vec::new();
        for conjunct in decompose_conjunction(condition) {
            if conjunct.is_always_true() {
                trace!("Dropping always true join filter");
                continue;
            }

            let filter = JoinFilter::try_new(conjunct.clone(), layout)?;
            debug!(
                "Join filter {} references fields {:?}, factors {:?}",
                filter.expr, filter.fields_ref, filter.factors_ref
            );
            filters.push(filter);
        }
        Ok(filters)
    }

    pub fn expr(&self) -> &ScalarExpr {
        &self.expr
    }

    pub fn category(&self) -> FilterCategory {
        self.category
    }

    pub fn fields_ref(&self) -> &Bitmap {
        &self.fields_ref
    }

    pub fn factors_ref(&self) -> &Bitmap {
        &self.factors_ref
    }
}

#[cfg(test)]
mod tests {
    use crate::error::OptError;
    use crate::expr::{and, col, lit};

    use super::*;

    fn layout() -> FactorLayout {
        FactorLayout::try_new(vec![2, 3, 1]).unwrap()
    }

    #[test]
    fn test_category() {
        assert_eq!(FilterCategory::AlwaysTrue, FilterCategory::of(&lit(true)));
        assert_eq!(
            FilterCategory::Comparison,
            FilterCategory::of(&col(0).lt(col(3)))
        );
        assert_eq!(
            FilterCategory::Other,
            FilterCategory::of(&col(0).eq(col(3)).or(col(1).eq(col(4))))
        );
        assert_eq!(FilterCategory::Other, FilterCategory::of(&lit(false)));
    }

    #[test]
    fn test_decompose_drops_always_true() {
        let condition = and(col(0).eq(col(2)), lit(true));
        let filters = JoinFilter::decompose(&condition, &layout()).unwrap();

        assert_eq!(1, filters.len());
        assert_eq!(&col(0).eq(col(2)), filters[0].expr());
        assert_eq!(FilterCategory::Comparison, filters[0].category());
    }

    #[test]
    fn test_decompose_keeps_order() {
        let a = col(5).gt(col(0));
        let b = col(0).eq(col(2));
        let c = col(3).is_null();
        let condition = a.clone().and(lit(true)).and(b.clone().and(c.clone()));
        let exprs: Vec<ScalarExpr> = JoinFilter::decompose(&condition, &layout())
            .unwrap()
            .into_iter()
            .map(|f| f.expr().clone())
            .collect();

        assert_eq!(vec![a, b, c], exprs);
    }

    #[test]
    fn test_factors_derived_from_fields() {
        let layout = layout();
        let condition = and(
            col(0).plus(col(1)).eq(col(4)),
            col(2).plus(col(5)).gt(col(3)),
        );
        for filter in JoinFilter::decompose(&condition, &layout).unwrap() {
            let expected: Bitmap = filter
                .fields_ref()
                .iter()
                .map(|field| layout.factor_of(field).unwrap())
                .collect();
            assert_eq!(&expected, filter.factors_ref());
            assert!(!filter.factors_ref().is_empty());
        }
    }

    #[test]
    fn test_constant_filter_references_nothing() {
        let filter = JoinFilter::try_new(lit(1i64).eq(lit(2i64)), &layout()).unwrap();
        assert!(filter.fields_ref().is_empty());
        assert!(filter.factors_ref().is_empty());
    }

    #[test]
    fn test_unknown_field() {
        let err = JoinFilter::decompose(&col(0).eq(col(6)), &layout()).unwrap_err();
        assert_eq!(
            Some(&OptError::FieldOutOfRange {
                field: 6,
                total_fields: 6
            }),
            err.downcast_ref::<OptError>()
        );
    }
}
