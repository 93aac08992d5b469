pub mod initialize;
pub mod pool;
pub mod queries;
pub mod stats;
