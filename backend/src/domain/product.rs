//! Catalogue products as seen by the delivery workflow.
//!
//! Products are owned by an external catalogue. The delivery service only
//! reads them, so the type has no mutation API.

use std::fmt;

use super::Error;

/// Positive product identifier.
///
/// # Examples
/// ```
/// use delivery::domain::ProductId;
///
/// let id = ProductId::new(12).expect("positive id");
/// assert_eq!(id.get(), 12);
/// assert!(ProductId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(i64);

impl ProductId {
    /// Validate a raw identifier, rejecting zero and negative values.
    pub fn new(raw: i64) -> Result<Self, Error> {
        if raw <= 0 {
            return Err(Error::incorrect_id(raw));
        }
        Ok(Self(raw))
    }

    /// Raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Physical dimensions of a product.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProductSize {
    pub width: f32,
    pub length: f32,
    pub height: f32,
}

/// Immutable catalogue entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub size: ProductSize,
    pub weight: f32,
    /// Free-text origin address the delivery starts from.
    pub place: String,
}
