pub mod cache;
pub mod evaluation;
pub mod results;
