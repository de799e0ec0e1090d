//! Admission middleware backed by [`RateLimiter`].
//!
//! Clients are keyed by the IP of the connection peer. A request whose peer
//! address cannot be determined is refused with a bare 500 rather than being
//! let through unmetered.

use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::ContentType;
use actix_web::{Error as ActixError, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::domain::{Error, RateLimiter};

/// Body written with every 429 response.
pub const TOO_MANY_REQUESTS_BODY: &str = "Too Many Requests";

/// Rate limiting middleware factory.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::App;
/// use delivery::domain::{RateLimitConfig, RateLimiter};
/// use delivery::inbound::http::rate_limit::RateLimit;
/// use mockable::DefaultClock;
///
/// let limiter = Arc::new(RateLimiter::new(RateLimitConfig::default(), Arc::new(DefaultClock)));
/// let _app = App::new().wrap(RateLimit::new(limiter));
/// ```
#[derive(Clone)]
pub struct RateLimit {
    limiter: Arc<RateLimiter>,
}

impl RateLimit {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limiter: Arc::clone(&self.limiter),
        }))
    }
}

/// Service wrapper produced by [`RateLimit`].
pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limiter: Arc<RateLimiter>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(client_key) = req.peer_addr().map(|addr| addr.ip().to_string()) else {
            let response = req
                .error_response(Error::internal("can't determine client address"))
                .map_into_right_body();
            return Box::pin(ready(Ok(response)));
        };

        if !self.limiter.admit(&client_key) {
            let response = req
                .into_response(
                    HttpResponse::TooManyRequests()
                        .insert_header(ContentType::plaintext())
                        .body(TOO_MANY_REQUESTS_BODY),
                )
                .map_into_right_body();
            return Box::pin(ready(Ok(response)));
        }

        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let response = service.call(req).await?;
            Ok(response.map_into_left_body())
        })
    }
}

#[cfg(test)]
#[path = "rate_limit_tests.rs"]
mod tests;
