//! Closed-form probabilities that simulations are checked against.
//!
//! Nothing here draws random numbers; every function is deterministic and
//! validates its arguments before computing.

mod binomial;
mod birthday;
mod combinatorics;
mod conditional;

pub use binomial::SumOfDraws;
pub use birthday::{birthday_group_size, birthday_probability};
pub use combinatorics::{
    MAX_ARRANGEMENTS, choose, enumerate_ordered, enumerate_unordered, permutations,
};
pub use conditional::{
    MAX_EVENTS, joint_probability, ordered_draw_probability, ordered_label_probability,
    union_probability,
};
