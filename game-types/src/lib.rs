pub mod progress;
pub mod messages;
pub mod user;
pub mod errors;

// Re-export all types
pub use progress::*;
pub use messages::*;
pub use user::*;
pub use errors::*;
