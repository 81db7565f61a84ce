pub mod progression;

pub use progression::ProgressionEngine;
