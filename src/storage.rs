pub mod catalogue;
mod record;

pub use catalogue::{Catalogue, LoadError, LookupError, SaveError};
pub use record::RecordError;
