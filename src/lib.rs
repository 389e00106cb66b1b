//! Training data preparation and link prediction evaluation for multiplex
//! network embedding.

pub mod data;
pub mod error;
pub mod evaluate;
pub mod graph;
pub mod neighbors;
pub mod pairs;
pub mod task;
pub mod types;
pub mod vocab;
pub mod walk;

pub(crate) mod tools;
