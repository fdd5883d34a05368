//! Domain models for sun care.
//!
//! This module contains the pure calculation core: the sunscreen
//! reapplication timer and the product expiration tracker, along with the
//! value types they operate on and the user configuration.

mod config;
pub use config::{ColorChoice, Config};

/// Period-After-Opening expiration tracking.
pub mod expiration;
pub use expiration::{ExpirationReport, ExpirationStatus, expiration_status_of};

mod product;
pub use product::{Product, ProductError};
pub(crate) use product::validate_name;

/// Sunscreen protection ratings.
pub mod protection;
pub use protection::{Protection, ProtectionParseError};

mod skin;
pub use skin::SkinClass;

pub mod timer;
pub use timer::{ReapplicationPlan, compute_reapplication_minutes, plan_reapplication};

/// UV index readings and exposure bands.
pub mod uv;
pub use uv::{InvalidUvIndex, UvBand, UvIndex};
