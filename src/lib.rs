//! Sun care
//!
//! Recommends when to reapply sunscreen from the current UV index, and
//! tracks when opened cosmetic products expire.

pub mod domain;
pub use domain::{
    Config, ExpirationReport, ExpirationStatus, Product, Protection, SkinClass, UvIndex,
    compute_reapplication_minutes, expiration_status_of,
};

/// Plain-text storage for the product catalogue.
pub mod storage;
pub use storage::Catalogue;
