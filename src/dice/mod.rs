pub mod chest;
pub mod face;
pub mod multiset;
pub mod roll;
