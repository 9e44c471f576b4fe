pub mod catalog;
pub mod clock;
pub mod scoring;
pub mod sync_machine;
pub mod word_validation;

// Re-export main components
pub use catalog::*;
pub use clock::*;
pub use scoring::*;
pub use sync_machine::*;
pub use word_validation::*;
