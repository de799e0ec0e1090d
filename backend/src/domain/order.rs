//! Delivery orders and their read projections.
//!
//! An order is created exactly once from an [`OrderDraft`] and never changes
//! afterwards. The draft has no identifier: storage assigns one when the row
//! is written and hands back the full [`Order`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, SubsecRound, Timelike, Utc};
use thiserror::Error as ThisError;

use super::{Error, Product, ProductId};

/// Wire layout for scheduled delivery times.
pub const DELIVERY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const DELIVERY_TIME_LEN: usize = "YYYY-MM-DDTHH:MM:SSZ".len();

/// Positive order identifier assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(i64);

impl OrderId {
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

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raised when a scheduled time does not follow [`DELIVERY_TIME_FORMAT`].
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("delivery time {value:?} must match YYYY-MM-DDTHH:MM:SSZ")]
pub struct InvalidDeliveryTime {
    value: String,
}

/// Scheduled delivery time with whole-second precision, held in UTC.
///
/// # Examples
/// ```
/// use delivery::domain::DeliveryTime;
///
/// let time: DeliveryTime = "2021-03-04T05:06:07Z".parse().expect("valid time");
/// assert_eq!(time.to_string(), "2021-03-04T05:06:07Z");
/// assert!("2021-03-04T05:06:07.5Z".parse::<DeliveryTime>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeliveryTime(DateTime<Utc>);

impl DeliveryTime {
    /// Wrap an instant, dropping any fractional seconds.
    pub fn from_utc(at: DateTime<Utc>) -> Self {
        Self(at.trunc_subsecs(0))
    }

    /// The instant in UTC.
    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

impl FromStr for DeliveryTime {
    type Err = InvalidDeliveryTime;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidDeliveryTime {
            value: value.to_owned(),
        };
        if value.len() != DELIVERY_TIME_LEN {
            return Err(invalid());
        }
        let naive =
            NaiveDateTime::parse_from_str(value, DELIVERY_TIME_FORMAT).map_err(|_| invalid())?;
        // chrono encodes a leap second as an overflowing nanosecond field.
        if naive.nanosecond() >= 1_000_000_000 {
            return Err(invalid());
        }
        let time = Self(naive.and_utc());
        // `%Y` and `%d` accept signs and single digits; only the canonical
        // rendering is allowed back in.
        if time.to_string() != value {
            return Err(invalid());
        }
        Ok(time)
    }
}

impl fmt::Display for DeliveryTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DELIVERY_TIME_FORMAT))
    }
}

/// Order contents before persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub product_id: ProductId,
    /// Product name copied at order time.
    pub name: String,
    /// Product origin copied at order time.
    pub from: String,
    pub destination: String,
    pub time: DeliveryTime,
}

impl OrderDraft {
    /// Snapshot the product's name and origin into a new draft.
    pub fn for_product(
        product: &Product,
        destination: impl Into<String>,
        time: DeliveryTime,
    ) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            from: product.place.clone(),
            destination: destination.into(),
            time,
        }
    }
}

/// Persisted order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub product_id: ProductId,
    pub name: String,
    pub from: String,
    pub destination: String,
    pub time: DeliveryTime,
}

impl Order {
    /// Attach the storage-assigned identifier to a draft.
    pub fn from_draft(id: OrderId, draft: OrderDraft) -> Self {
        let OrderDraft {
            product_id,
            name,
            from,
            destination,
            time,
        } = draft;
        Self {
            id,
            product_id,
            name,
            from,
            destination,
            time,
        }
    }
}

/// Redacted list entry. Carries no itinerary fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub id: OrderId,
    pub product_id: ProductId,
    pub name: String,
}

impl From<Order> for OrderSummary {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            product_id: order.product_id,
            name: order.name,
        }
    }
}

/// Order joined with the current product record.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub id: OrderId,
    pub product: Product,
    pub from: String,
    pub destination: String,
    pub time: DeliveryTime,
}
