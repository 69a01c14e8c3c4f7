pub mod child;
pub mod evaluator;
pub mod instance;
pub mod registry;
pub mod rolled;
pub mod state;
pub mod unrolled;
