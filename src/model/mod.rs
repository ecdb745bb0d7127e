//! Pure data structures shared by all components.
//!
//! - [`Selection`]: what the user picked for the next generation
//! - [`GenerationResult`] / [`HistoryEntry`]: one generated composite
//! - [`HistoryPage`]: one page of past generations
//! - [`BatchResult`]: outcome of a multi-garment try-on
//! - [`UserPhoto`]: a customer's own photo standing in for a model

pub mod generation;
pub mod history;
pub mod ids;
pub mod photo;
pub mod selection;

pub use generation::*;
pub use history::*;
pub use ids::*;
pub use photo::*;
pub use selection::*;
