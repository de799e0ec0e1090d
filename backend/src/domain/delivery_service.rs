//! Delivery workflow service.
//!
//! Implements the delivery driving ports on top of the product and order
//! repositories. Each sub-step makes at most one storage call and nothing
//! spans two calls: a product removed between the lookup and the insert in
//! [`DeliveryCommand::create_order`] is not detected.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    CreateOrderRequest, DeliveryCommand, DeliveryPricing, DeliveryQuery, DeliveryQuote,
    DeliveryQuoteRequest, OrderRepository, ProductRepository,
};
use crate::domain::{
    Error, Order, OrderDetails, OrderDraft, OrderId, OrderSummary, Product, ProductId,
    RandomDeliveryPricing,
};

fn product_not_found(id: ProductId) -> Error {
    let message = format!("can't find product with id= {id}");
    Error::not_found(message.clone(), message)
}

fn order_not_found(id: OrderId) -> Error {
    let message = format!("can't find order with id= {id}");
    Error::not_found(message.clone(), message)
}

/// Delivery service implementing [`DeliveryCommand`] and [`DeliveryQuery`].
#[derive(Clone)]
pub struct DeliveryService<P, O> {
    products: Arc<P>,
    orders: Arc<O>,
    pricing: Arc<dyn DeliveryPricing>,
}

impl<P, O> DeliveryService<P, O> {
    /// Create a service with an explicit pricing strategy.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use delivery::domain::ports::{FixtureOrderRepository, FixtureProductRepository};
    /// use delivery::domain::{DeliveryService, RandomDeliveryPricing};
    ///
    /// let _service = DeliveryService::new(
    ///     Arc::new(FixtureProductRepository),
    ///     Arc::new(FixtureOrderRepository),
    ///     Arc::new(RandomDeliveryPricing),
    /// );
    /// ```
    pub fn new(products: Arc<P>, orders: Arc<O>, pricing: Arc<dyn DeliveryPricing>) -> Self {
        Self {
            products,
            orders,
            pricing,
        }
    }

    /// Create a service using [`RandomDeliveryPricing`].
    pub fn with_random_pricing(products: Arc<P>, orders: Arc<O>) -> Self {
        Self::new(products, orders, Arc::new(RandomDeliveryPricing))
    }
}

impl<P, O> DeliveryService<P, O>
where
    P: ProductRepository,
    O: OrderRepository,
{
    async fn require_product(&self, id: ProductId) -> Result<Product, Error> {
        self.products
            .find_by_id(id)
            .await
            .map_err(|err| Error::internal(format!("can't find product with id= {id}: {err}")))?
            .ok_or_else(|| product_not_found(id))
    }
}

#[async_trait]
impl<P, O> DeliveryCommand for DeliveryService<P, O>
where
    P: ProductRepository,
    O: OrderRepository,
{
    async fn quote_delivery(&self, request: DeliveryQuoteRequest) -> Result<DeliveryQuote, Error> {
        let product_id = ProductId::new(request.product_id)?;
        let product = self.require_product(product_id).await?;
        let price = self.pricing.price(&product, &request.destination);

        Ok(DeliveryQuote {
            from: product.place,
            destination: request.destination,
            price,
        })
    }

    async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, Error> {
        let product_id = ProductId::new(request.product_id)?;
        let product = self.require_product(product_id).await?;
        let draft = OrderDraft::for_product(&product, request.destination, request.time);

        self.orders.create(&draft).await.map_err(|err| {
            Error::internal(format!(
                "can't create order with product id= {product_id}: {err}"
            ))
        })
    }
}

#[async_trait]
impl<P, O> DeliveryQuery for DeliveryService<P, O>
where
    P: ProductRepository,
    O: OrderRepository,
{
    async fn get_order(&self, order_id: i64) -> Result<OrderDetails, Error> {
        let order_id = OrderId::new(order_id)?;
        let order = self
            .orders
            .find_by_id(order_id)
            .await
            .map_err(|err| {
                Error::internal(format!("can't find order with id= {order_id}: {err}"))
            })?
            .ok_or_else(|| order_not_found(order_id))?;
        let product = self.require_product(order.product_id).await?;

        Ok(OrderDetails {
            id: order.id,
            product,
            from: order.from,
            destination: order.destination,
            time: order.time,
        })
    }

    async fn list_orders(&self) -> Result<Vec<OrderSummary>, Error> {
        let orders = self
            .orders
            .list_all()
            .await
            .map_err(|err| Error::internal(format!("can't get all orders: {err}")))?;
        Ok(orders.into_iter().map(OrderSummary::from).collect())
    }
}

#[cfg(test)]
#[path = "delivery_service_tests.rs"]
mod tests;
