use std::ops::Range;

use anyhow::ensure;

use crate::error::{OptError, OptResult};
use crate::multijoin::{Bitmap, FactorId};

/// Assigns each join factor a contiguous range of global field ordinals.
///
/// Ranges follow input order and partition `[0, total_fields)`; a factor without fields owns an
/// empty range.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FactorLayout {
    join_start: Vec<usize>,
    field_counts: Vec<usize>,
    total_fields: usize,
}

impl FactorLayout {
    pub fn try_new<I>(field_counts: I) -> OptResult<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let field_counts: Vec<usize> = field_counts.into_iter().collect();
        ensure!(!field_counts.is_empty(), OptError::EmptyMultiJoin);

        let mut join_start = Vec::with_capacity(field_counts.len());
        let mut start = 0;
        for count in &field_counts {
            join_start.push(start);
            start += count;
        }

        Ok(Self {
            join_start,
            field_counts,
            total_fields: start,
        })
    }

    pub fn factor_count(&self) -> usize {
        self.field_counts.len()
    }

    pub fn total_fields(&self) -> usize {
        self.total_fields
    }

    /// First global field ordinal of `factor`.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is not a factor of the multi join.
    pub fn join_start(&self, factor: FactorId) -> usize {
        self.join_start[factor]
    }

    /// Number of fields of `factor`.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is not a factor of the multi join.
    pub fn field_count(&self, factor: FactorId) -> usize {
        self.field_counts[factor]
    }

    /// Global field ordinals owned by `factor`.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is not a factor of the multi join.
    pub fn field_range(&self, factor: FactorId) -> Range<usize> {
        let start = self.join_start[factor];
        start..start + self.field_counts[factor]
    }

    /// Finds the factor owning global field ordinal `field`.
    pub fn factor_of(&self, field: usize) -> OptResult<FactorId> {
        ensure!(
            field < self.total_fields,
            OptError::FieldOutOfRange {
                field,
                total_fields: self.total_fields
            }
        );
        // Empty factors share their start with the next factor, so the last start not after
        // `field` always belongs to a non empty factor.
        Ok(self.join_start.partition_point(|start| *start <= field) - 1)
    }

    /// Maps a set of fields to the set of factors owning them.
    pub fn factors_of(&self, fields: &Bitmap) -> OptResult<Bitmap> {
        let mut factors = Bitmap::with_capacity(self.factor_count());
        for field in fields.iter() {
            factors.insert(self.factor_of(field)?);
        }
        Ok(factors)
    }

    pub fn check_factor(&self, factor: FactorId) -> OptResult<()> {
        ensure!(
            factor < self.factor_count(),
            OptError::FactorOutOfRange {
                factor,
                factor_count: self.factor_count()
            }
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        let layout = FactorLayout::try_new(vec![2, 3, 1]).unwrap();
        assert_eq!(3, layout.factor_count());
        assert_eq!(6, layout.total_fields());
        assert_eq!(
            vec![0, 2, 5],
            (0..3).map(|f| layout.join_start(f)).collect::<Vec<_>>()
        );
        assert_eq!(2..5, layout.field_range(1));
    }

    #[test]
    fn test_ranges_partition_fields() {
        for counts in [vec![1], vec![2, 3, 1], vec![0, 4, 0, 0, 2], vec![5, 0], vec![0]] {
            let layout = FactorLayout::try_new(counts.clone()).unwrap();
            let mut next = 0;
            for factor in 0..layout.factor_count() {
                let range = layout.field_range(factor);
                assert_eq!(next, range.start);
                assert_eq!(counts[factor], range.len());
                for field in range.clone() {
                    assert_eq!(factor, layout.factor_of(field).unwrap());
                }
                next = range.end;
            }
            assert_eq!(layout.total_fields(), next);
        }
    }

    #[test]
    fn test_factor_of_out_of_range() {
        let layout = FactorLayout::try_new(vec![2, 3, 1]).unwrap();
        let err = layout.factor_of(6).unwrap_err();
        assert_eq!(
            Some(&OptError::FieldOutOfRange {
                field: 6,
                total_fields: 6
            }),
            err.downcast_ref::<OptError>()
        );
    }

    #[test]
    fn test_empty_layout() {
        let err = FactorLayout::try_new(Vec::new()).unwrap_err();
        assert_eq!(Some(&OptError::EmptyMultiJoin), err.downcast_ref::<OptError>());
    }

    #[test]
    fn test_factors_of() {
        let layout = FactorLayout::try_new(vec![2, 3, 1]).unwrap();
        let fields: Bitmap = [0, 2, 4].into_iter().collect();
        assert_eq!(
            vec![0, 1],
            layout.factors_of(&fields).unwrap().iter().collect::<Vec<_>>()
        );
        assert!(layout.factors_of(&[9].into_iter().collect()).is_err());
    }

    #[test]
    fn test_check_factor() {
        let layout = FactorLayout::try_new(vec![1, 1]).unwrap();
        assert!(layout.check_factor(1).is_ok());
        assert!(layout.check_factor(2).is_err());
    }
}
