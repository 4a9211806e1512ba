//! Random Source Adapters.

mod fixed_random_source;
mod uniform_random_source;

pub use fixed_random_source::FixedRandomSource;
pub use uniform_random_source::UniformRandomSource;
