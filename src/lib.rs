//! ## Background
//!
//! Join order is one of the most important decisions a query optimizer makes, and one of the most
//! expensive: the number of possible join trees grows exponentially with the number of joined
//! relations, so beyond a handful of relations the optimizer has to fall back to a heuristic
//! search. Such a search is only as good as the model it is guided by.
//!
//! A common approach, used for example by apache calcite's `LoptOptimizeJoinRule`, first
//! flattens a tree of inner joins into a single multi join operator, then builds a graph over its
//! inputs(join factors) where edges carry how attractive it is to join two factors directly. Equi
//! joins are the most attractive since any physical join operator can execute them efficiently,
//! other comparisons come next, and factors that are merely related by some predicate come last.
//! The search then grows join trees greedily along the heaviest edges.
//!
//! ## Design
//!
//! This crate implements the graph, not the search. [`multijoin::JoinFactorGraph`] is built once
//! per optimization attempt from a [`operator::MultiJoin`] and answers read only queries:
//!
//! * Field layout of join factors within the multi join row.
//! * Conjuncts of the join condition, and the fields and factors each one references.
//! * Pairwise factor weights and, for each factor, the factors it is compared with.
//! * Whether a candidate join tree covers the factors a join filter needs, and which fields it
//!   outputs.
//!
//! Invariant violations, e.g. a field reference outside of the multi join row, abort construction
//! with an [`error::OptError`] instead of producing a wrong graph.

pub mod error;
pub mod expr;
pub mod multijoin;
pub mod operator;
pub mod optimizer;
pub mod properties;
