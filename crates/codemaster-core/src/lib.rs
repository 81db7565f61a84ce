pub mod config;
pub mod course;
pub mod error;
pub mod observable;
pub mod progress;

// Re-export common error type
pub use error::CodemasterError;
pub use observable::{Observable, Subscription};
