//! Placeholder delivery pricing.
//!
//! Prices are drawn uniformly from `MIN_UNITS..=MAX_UNITS` and scaled by
//! `UNIT_PRICE`, giving 300 to 2000 in steps of 100. Distance and destination
//! are ignored.

use rand::Rng;

use crate::domain::Product;
use crate::domain::ports::{DeliveryPrice, DeliveryPricing};

const MIN_UNITS: u32 = 3;
const MAX_UNITS: u32 = 20;
const UNIT_PRICE: u32 = 100;

/// Random price in the documented range.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomDeliveryPricing;

impl RandomDeliveryPricing {
    /// Smallest price this implementation can return.
    pub const MIN_PRICE: DeliveryPrice = MIN_UNITS * UNIT_PRICE;
    /// Largest price this implementation can return.
    pub const MAX_PRICE: DeliveryPrice = MAX_UNITS * UNIT_PRICE;
    /// Granularity of returned prices.
    pub const STEP: DeliveryPrice = UNIT_PRICE;
}

impl DeliveryPricing for RandomDeliveryPricing {
    fn price(&self, _product: &Product, _destination: &str) -> DeliveryPrice {
        rand::thread_rng().gen_range(MIN_UNITS..=MAX_UNITS) * UNIT_PRICE
    }
}
