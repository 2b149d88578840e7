// Fragment - assemble a configuration file from a directory of fragments

// Assembly pipeline
pub mod apply;
pub mod concat;
pub mod diff;
pub mod engine;
pub mod enumerate;
pub mod options;
pub mod sort;
pub mod validate;

// CLI handling
pub mod cli;

pub use engine::{FragmentAssembler, Outcome};
pub use options::{PartialOptions, RunOptions};
pub use sort::SortMode;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
