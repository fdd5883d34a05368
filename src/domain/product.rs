use std::num::NonZeroU32;

use chrono::NaiveDate;
use non_empty_string::NonEmptyString;
use uuid::Uuid;

use crate::domain::expiration::{self, ExpirationReport};

/// A cosmetic product being tracked after opening.
///
/// The expiration date is never stored; it is derived from the opening date
/// and the Period After Opening whenever it is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: Uuid,
    name: NonEmptyString,
    opened: NaiveDate,
    pao_days: NonZeroU32,
    owner: Option<String>,
}

/// Errors that can occur when creating or editing a product.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProductError {
    /// The product name was empty or whitespace.
    #[error("Product name must not be empty")]
    EmptyName,

    /// The opening date is after the date the product was entered.
    #[error("Opening date {opened} is in the future (today is {today})")]
    OpenedInFuture {
        /// The rejected opening date.
        opened: NaiveDate,
        /// The date of entry.
        today: NaiveDate,
    },

    /// The Period After Opening was zero.
    #[error("Period after opening must be at least one day")]
    ZeroPao,
}

impl Product {
    /// Creates a new product with a fresh identifier.
    ///
    /// `today` is the date of entry, used to reject opening dates in the
    /// future.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, the product was opened after
    /// `today`, or `pao_days` is zero.
    pub fn new(
        name: impl Into<String>,
        opened: NaiveDate,
        pao_days: u32,
        today: NaiveDate,
    ) -> Result<Self, ProductError> {
        Ok(Self::from_parts(
            Uuid::new_v4(),
            validate_name(name.into())?,
            validate_opened(opened, today)?,
            NonZeroU32::new(pao_days).ok_or(ProductError::ZeroPao)?,
            None,
        ))
    }

    /// Assembles a product from already-validated parts.
    #[must_use]
    pub(crate) const fn from_parts(
        id: Uuid,
        name: NonEmptyString,
        opened: NaiveDate,
        pao_days: NonZeroU32,
        owner: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            opened,
            pao_days,
            owner,
        }
    }

    /// Associates the product with a user.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// The product's unique identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// The product name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The date the product was opened.
    #[must_use]
    pub const fn opened(&self) -> NaiveDate {
        self.opened
    }

    /// The Period After Opening, in days.
    #[must_use]
    pub const fn pao_days(&self) -> NonZeroU32 {
        self.pao_days
    }

    /// The user the product belongs to, if any.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Whether the product is visible to `owner`.
    ///
    /// Products without an owner are visible to everyone.
    #[must_use]
    pub fn is_visible_to(&self, owner: &str) -> bool {
        self.owner.as_deref().is_none_or(|o| o == owner)
    }

    /// The date the product expires.
    #[must_use]
    pub fn expiration_date(&self) -> NaiveDate {
        expiration::expiration_date(self.opened, self.pao_days)
    }

    /// The expiration report for the product as of `today`.
    #[must_use]
    pub fn expiration(&self, today: NaiveDate) -> ExpirationReport {
        expiration::expiration_status_of(self.opened, self.pao_days, today)
    }

    /// Renames the product.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ProductError> {
        self.name = validate_name(name.into())?;
        Ok(())
    }

    /// Changes the opening date.
    ///
    /// # Errors
    ///
    /// Returns an error if `opened` is after `today`.
    pub fn set_opened(&mut self, opened: NaiveDate, today: NaiveDate) -> Result<(), ProductError> {
        self.opened = validate_opened(opened, today)?;
        Ok(())
    }

    /// Changes the Period After Opening.
    ///
    /// # Errors
    ///
    /// Returns an error if `pao_days` is zero.
    pub fn set_pao_days(&mut self, pao_days: u32) -> Result<(), ProductError> {
        self.pao_days = NonZeroU32::new(pao_days).ok_or(ProductError::ZeroPao)?;
        Ok(())
    }
}

pub(crate) fn validate_name(name: String) -> Result<NonEmptyString, ProductError> {
    NonEmptyString::new(name.trim().to_string()).map_err(|_| ProductError::EmptyName)
}

fn validate_opened(opened: NaiveDate, today: NaiveDate) -> Result<NaiveDate, ProductError> {
    if opened > today {
        return Err(ProductError::OpenedInFuture { opened, today });
    }
    Ok(opened)
}
