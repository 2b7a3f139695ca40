//! Output data model.
//!
//! Raw records come straight from worksheet rows; everything else here is
//! the typed shape that gets serialized.

mod dataset;
mod interaction;

pub use dataset::*;
pub use interaction::*;
