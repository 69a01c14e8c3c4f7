pub mod cache;
pub mod encoding;
pub mod evaluation;
pub mod results;
pub mod state;

pub use encoding::Encoding;
