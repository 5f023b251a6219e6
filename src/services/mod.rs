pub mod chart_builder;
pub mod excel;
pub mod numeric;
pub mod palette;
pub mod profiler;

pub use chart_builder::build;
pub use profiler::{profile, summarize};
