// Shared Kernel - Domain Driven Design
// Following Clean Architecture + Hexagonal Architecture patterns

pub mod application; // Shared application layer patterns
pub mod errors; // Shared error types
pub mod infrastructure; // Shared infrastructure (database)
pub mod utils; // Shared utilities (logging)
pub mod validation; // Field validation results

// Re-exports for convenience
pub use infrastructure::database::{Database, DatabaseConfig};
