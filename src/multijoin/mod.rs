//! Join factor graph of a multi join.
//!
//! A multi join flattens a tree of inner joins into one operator with `n` inputs, called join
//! factors, and a single join condition. Before a join order search can rearrange the factors it
//! needs to know:
//!
//! 1. Which global field ordinals belong to which factor ([`FactorLayout`]).
//! 2. Which fields and factors each conjunct of the join condition references ([`JoinFilter`]).
//! 3. How strongly each pair of factors wants to be joined directly ([`FactorWeights`]). Equi
//! joins weigh more than other comparisons, which weigh more than anything merely relating the
//! factors.
//!
//! [`JoinFactorGraph`] builds all three for one multi join. The search's join trees are only seen
//! through [`JoinTreeOrder`].

mod bitmap;
pub use bitmap::*;
mod filter;
pub use filter::*;
mod graph;
pub use graph::*;
mod layout;
pub use layout::*;
mod tree;
pub use tree::*;
mod weights;
pub use weights::*;

/// Index of a join factor, i.e. of an input of the multi join.
pub type FactorId = usize;
