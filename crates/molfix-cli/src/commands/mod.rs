pub mod bonds;
pub mod counts;
pub mod line;
pub mod repair;
