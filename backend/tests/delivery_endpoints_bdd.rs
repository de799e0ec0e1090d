//! Behavioural tests for the delivery REST endpoints.
//!
//! Requests go through the rate limiter and JSON configuration used in
//! production, backed by in-memory repositories and a hand-driven clock.

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::http::header::{self, HeaderValue};
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use delivery::domain::ports::{
    OrderRepository, OrderRepositoryError, ProductRepository, ProductRepositoryError,
};
use delivery::domain::{
    DeliveryService, Order, OrderDraft, OrderId, Product, ProductId, ProductSize, RateLimitConfig,
    RateLimiter,
};
use delivery::inbound::http::json_config;
use delivery::inbound::http::orders::{get_order, list_orders};
use delivery::inbound::http::products::{cost_of_delivery, create_order};
use delivery::inbound::http::rate_limit::{RateLimit, TOO_MANY_REQUESTS_BODY};
use delivery::inbound::http::state::HttpState;
use mockable::Clock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

const CLIENT_ADDR: &str = "203.0.113.9:40000";
const DELIVERY_TIME: &str = "2020-05-17T09:30:00Z";

struct SteppedClock(Mutex<DateTime<Utc>>);

impl SteppedClock {
    fn new() -> Self {
        let start = DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc);
        Self(Mutex::new(start))
    }

    fn advance(&self, delta: Duration) {
        let mut now = self.0.lock().expect("clock lock");
        *now += chrono::Duration::from_std(delta).expect("delta in range");
    }
}

impl Clock for SteppedClock {
    fn local(&self) -> DateTime<chrono::Local> {
        self.utc().with_timezone(&chrono::Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock lock")
    }
}

#[derive(Default)]
struct InMemoryProducts(Mutex<HashMap<i64, Product>>);

#[async_trait]
impl ProductRepository for InMemoryProducts {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductRepositoryError> {
        Ok(self.0.lock().expect("products lock").get(&id.get()).cloned())
    }
}

#[derive(Default)]
struct InMemoryOrders(Mutex<Vec<Order>>);

#[async_trait]
impl OrderRepository for InMemoryOrders {
    async fn create(&self, draft: &OrderDraft) -> Result<Order, OrderRepositoryError> {
        let mut orders = self.0.lock().expect("orders lock");
        let next = i64::try_from(orders.len()).expect("order count fits") + 1;
        let id = OrderId::new(next).map_err(|err| OrderRepositoryError::query(err.to_string()))?;
        let order = Order::from_draft(id, draft.clone());
        orders.push(order.clone());
        Ok(order)
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderRepositoryError> {
        Ok(self.0.lock().expect("orders lock").clone())
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, OrderRepositoryError> {
        Ok(self
            .0
            .lock()
            .expect("orders lock")
            .iter()
            .find(|order| order.id == id)
            .cloned())
    }
}

#[derive(Debug)]
struct Snapshot {
    status: u16,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl Snapshot {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("json body")
    }
}

struct DeliveryWorld {
    products: Arc<InMemoryProducts>,
    orders: Arc<InMemoryOrders>,
    clock: Arc<SteppedClock>,
    limiter: Arc<RateLimiter>,
    responses: Vec<Snapshot>,
    last_order_id: Option<i64>,
}

impl DeliveryWorld {
    fn new() -> Self {
        let clock = Arc::new(SteppedClock::new());
        let limiter = Arc::new(RateLimiter::new(
            RateLimitConfig::default(),
            clock.clone(),
        ));
        Self {
            products: Arc::default(),
            orders: Arc::default(),
            clock,
            limiter,
            responses: Vec::new(),
            last_order_id: None,
        }
    }

    fn http_state(&self) -> web::Data<HttpState> {
        let service = Arc::new(DeliveryService::with_random_pricing(
            self.products.clone(),
            self.orders.clone(),
        ));
        web::Data::new(HttpState::new(service.clone(), service))
    }

    fn last(&self) -> &Snapshot {
        self.responses.last().expect("a response was recorded")
    }
}

fn run_async<T>(future: impl Future<Output = T>) -> T {
    tokio::runtime::Runtime::new()
        .expect("runtime")
        .block_on(future)
}

fn send(world: &mut DeliveryWorld, request: actix_test::TestRequest) -> &Snapshot {
    let state = world.http_state();
    let limiter = world.limiter.clone();
    let snapshot = run_async(async move {
        let app = actix_test::init_service(
            App::new().app_data(state).app_data(json_config()).service(
                web::scope("/api/v1")
                    .wrap(RateLimit::new(limiter))
                    .service(cost_of_delivery)
                    .service(create_order)
                    .service(list_orders)
                    .service(get_order),
            ),
        )
        .await;
        let peer: SocketAddr = CLIENT_ADDR.parse().expect("valid socket address");
        let res = actix_test::call_service(&app, request.peer_addr(peer).to_request()).await;
        let status = res.status().as_u16();
        let content_type = res
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value: &HeaderValue| value.to_str().ok())
            .map(str::to_owned);
        let body = actix_test::read_body(res).await.to_vec();
        Snapshot {
            status,
            content_type,
            body,
        }
    });
    world.responses.push(snapshot);
    world.last()
}

fn quote_request(id: i64, destination: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri(&format!("/api/v1/products/{id}/cost-of-delivery"))
        .set_json(json!({ "destination": destination }))
}

fn order_request(id: i64, destination: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri(&format!("/api/v1/products/{id}/order"))
        .set_json(json!({ "destination": destination, "time": DELIVERY_TIME }))
}

fn place_order(world: &mut DeliveryWorld, id: i64, destination: &str) {
    let snapshot = send(world, order_request(id, destination));
    if snapshot.status == 200 {
        let order_id = snapshot.json()["id"].as_i64().expect("order id");
        world.last_order_id = Some(order_id);
    }
}

#[fixture]
fn world() -> Mutex<DeliveryWorld> {
    Mutex::new(DeliveryWorld::new())
}

#[given("a catalogue with product {id} stored at \"{place}\"")]
fn a_catalogue_with_product(world: &Mutex<DeliveryWorld>, id: i64, place: String) {
    let world = world.lock().expect("world lock");
    let product = Product {
        id: ProductId::new(id).expect("positive id"),
        name: "wardrobe".to_owned(),
        size: ProductSize {
            width: 1.0,
            length: 0.6,
            height: 2.0,
        },
        weight: 70.0,
        place,
    };
    world
        .products
        .0
        .lock()
        .expect("products lock")
        .insert(id, product);
}

#[given("an empty catalogue")]
fn an_empty_catalogue(world: &Mutex<DeliveryWorld>) {
    let world = world.lock().expect("world lock");
    assert!(world.products.0.lock().expect("products lock").is_empty());
}

#[given("the client has ordered product {id} for delivery to \"{destination}\"")]
fn the_client_has_ordered(world: &Mutex<DeliveryWorld>, id: i64, destination: String) {
    let mut world = world.lock().expect("world lock");
    place_order(&mut world, id, &destination);
    assert_eq!(world.last().status, 200, "order placement should succeed");
}

#[when("the client asks for the cost of delivering product {id} to \"{destination}\"")]
fn the_client_asks_for_a_quote(world: &Mutex<DeliveryWorld>, id: i64, destination: String) {
    let mut world = world.lock().expect("world lock");
    send(&mut world, quote_request(id, &destination));
}

#[when("the client orders product {id} for delivery to \"{destination}\"")]
fn the_client_orders(world: &Mutex<DeliveryWorld>, id: i64, destination: String) {
    let mut world = world.lock().expect("world lock");
    place_order(&mut world, id, &destination);
}

#[when("the client posts a truncated body to the cost of delivery endpoint")]
fn the_client_posts_a_truncated_body(world: &Mutex<DeliveryWorld>) {
    let mut world = world.lock().expect("world lock");
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/products/1/cost-of-delivery")
        .insert_header(header::ContentType::json())
        .set_payload("{\"destination\":");
    send(&mut world, request);
}

#[when("the client lists orders")]
fn the_client_lists_orders(world: &Mutex<DeliveryWorld>) {
    let mut world = world.lock().expect("world lock");
    send(
        &mut world,
        actix_test::TestRequest::get().uri("/api/v1/orders"),
    );
}

#[when("the client fetches the last placed order")]
fn the_client_fetches_the_last_order(world: &Mutex<DeliveryWorld>) {
    let mut world = world.lock().expect("world lock");
    let id = world.last_order_id.expect("an order was placed");
    send(
        &mut world,
        actix_test::TestRequest::get().uri(&format!("/api/v1/orders/{id}")),
    );
}

#[when("the client sends {count} quote requests at once")]
fn the_client_sends_a_burst(world: &Mutex<DeliveryWorld>, count: usize) {
    let mut world = world.lock().expect("world lock");
    for _ in 0..count {
        send(&mut world, quote_request(1, "B"));
    }
}

#[when("one second passes")]
fn one_second_passes(world: &Mutex<DeliveryWorld>) {
    let world = world.lock().expect("world lock");
    world.clock.advance(Duration::from_secs(1));
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &Mutex<DeliveryWorld>, status: u16) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.last().status, status);
}

#[then("the last response status is {status}")]
fn the_last_response_status_is(world: &Mutex<DeliveryWorld>, status: u16) {
    let world = world.lock().expect("world lock");
    let statuses: Vec<u16> = world.responses.iter().map(|r| r.status).collect();
    let (last, earlier) = statuses.split_last().expect("a response was recorded");
    assert_eq!(*last, status);
    assert!(
        earlier.iter().all(|s| *s == 200),
        "earlier requests fit in the burst: {statuses:?}"
    );
}

#[then("the last response is the plain text \"{text}\"")]
fn the_last_response_is_plain_text(world: &Mutex<DeliveryWorld>, text: String) {
    let world = world.lock().expect("world lock");
    let last = world.last();
    assert_eq!(text, TOO_MANY_REQUESTS_BODY);
    assert_eq!(last.body, text.as_bytes());
    assert!(
        last.content_type
            .as_deref()
            .is_some_and(|value| value.starts_with("text/plain")),
        "unexpected content type {:?}",
        last.content_type
    );
}

#[then("the quote is from \"{from}\" to \"{destination}\" with a valid price")]
fn the_quote_is_valid(world: &Mutex<DeliveryWorld>, from: String, destination: String) {
    let world = world.lock().expect("world lock");
    let body = world.last().json();
    assert_eq!(body["from"], Value::String(from));
    assert_eq!(body["destination"], Value::String(destination));
    let price = body["price"].as_u64().expect("numeric price");
    assert!((300..=2000).contains(&price), "price {price} out of range");
    assert_eq!(price % 100, 0, "price {price} is not a multiple of 100");
}

#[then("the error message is \"{message}\"")]
fn the_error_message_is(world: &Mutex<DeliveryWorld>, message: String) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.last().json(), json!({ "error": message }));
}

#[then("the response body is empty")]
fn the_response_body_is_empty(world: &Mutex<DeliveryWorld>) {
    let world = world.lock().expect("world lock");
    assert!(world.last().body.is_empty());
}

#[then("every listed order exposes only its id, product id and name")]
fn every_listed_order_is_redacted(world: &Mutex<DeliveryWorld>) {
    let world = world.lock().expect("world lock");
    let body = world.last().json();
    let orders = body.as_array().expect("orders array");
    assert!(!orders.is_empty(), "at least one order is listed");
    for order in orders {
        let mut keys: Vec<&str> = order
            .as_object()
            .expect("order object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, ["id", "name", "product_id"]);
    }
}

#[then("the order details name product {id} delivered from \"{from}\" to \"{destination}\"")]
fn the_order_details_match(
    world: &Mutex<DeliveryWorld>,
    id: i64,
    from: String,
    destination: String,
) {
    let world = world.lock().expect("world lock");
    let body = world.last().json();
    assert_eq!(body["id"].as_i64(), world.last_order_id);
    assert_eq!(body["product"]["id"].as_i64(), Some(id));
    assert_eq!(body["product"]["place"], Value::String(from.clone()));
    assert_eq!(body["from"], Value::String(from));
    assert_eq!(body["destination"], Value::String(destination));
    assert_eq!(body["time"], Value::String(DELIVERY_TIME.to_owned()));
}

#[scenario(
    path = "tests/features/delivery_endpoints.feature",
    name = "Quoting delivery for a catalogue product"
)]
fn quoting_delivery_for_a_catalogue_product(world: Mutex<DeliveryWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/delivery_endpoints.feature",
    name = "Ordering a product that is not in the catalogue"
)]
fn ordering_a_product_that_is_not_in_the_catalogue(world: Mutex<DeliveryWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/delivery_endpoints.feature",
    name = "Rejecting a non-positive product id"
)]
fn rejecting_a_non_positive_product_id(world: Mutex<DeliveryWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/delivery_endpoints.feature",
    name = "Rejecting a malformed request body"
)]
fn rejecting_a_malformed_request_body(world: Mutex<DeliveryWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/delivery_endpoints.feature",
    name = "Listing orders hides delivery details"
)]
fn listing_orders_hides_delivery_details(world: Mutex<DeliveryWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/delivery_endpoints.feature",
    name = "Reading back a placed order"
)]
fn reading_back_a_placed_order(world: Mutex<DeliveryWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/delivery_endpoints.feature",
    name = "Throttling a burst of requests"
)]
fn throttling_a_burst_of_requests(world: Mutex<DeliveryWorld>) {
    drop(world);
}
