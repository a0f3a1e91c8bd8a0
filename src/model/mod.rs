//! Core data model: consumption readings, energy types, and the traits
//! connecting the API reader to the reading store.

pub mod reading;
pub mod traits;
pub mod types;

// Re-export commonly used items at the module level
pub use reading::{Page, Reading};
pub use traits::{ReadingSource, ReadingStore};
pub use types::EnergyType;
