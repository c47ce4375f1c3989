use crate::expr::{ScalarExpr, ScalarOperator};
use crate::multijoin::Bitmap;

/// Splits a predicate on its `AND` operators into a flat list of conjuncts, in left to right
/// order.
///
/// Nested conjunctions are flattened. Nothing is removed, in particular a literal `TRUE` conjunct
/// is kept.
pub fn decompose_conjunction(expr: &ScalarExpr) -> Vec<&ScalarExpr> {
    let mut conjuncts = Vec::new();
    decompose_conjunction_impl(expr, &mut conjuncts);
    conjuncts
}

fn decompose_conjunction_impl<'a>(expr: &'a ScalarExpr, conjuncts: &mut Vec<&'a ScalarExpr>) {
    match expr {
        ScalarExpr::Call(call) if call.op() == ScalarOperator::And => {
            for operand in call.operands() {
                decompose_conjunction_impl(operand, conjuncts);
            }
        }
        _ => conjuncts.push(expr),
    }
}

/// Collects ordinals of all fields referenced by expressions it visits.
pub struct InputFinder<'a> {
    fields: &'a mut Bitmap,
}

impl<'a> InputFinder<'a> {
    pub fn new(fields: &'a mut Bitmap) -> Self {
        Self { fields }
    }

    pub fn visit(&mut self, expr: &ScalarExpr) {
        match expr {
            ScalarExpr::InputRef(field) => self.fields.insert(*field),
            ScalarExpr::Literal(_) => {}
            ScalarExpr::Call(call) => {
                for operand in call.operands() {
                    self.visit(operand);
                }
            }
        }
    }
}

/// Returns fields referenced by `expr`, sized for a row of `total_fields` fields.
pub fn input_refs(expr: &ScalarExpr, total_fields: usize) -> Bitmap {
    let mut fields = Bitmap::with_capacity(total_fields);
    InputFinder::new(&mut fields).visit(expr);
    fields
}
