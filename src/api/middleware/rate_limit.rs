use std::future::{ready, Future, Ready};
use std::net::IpAddr;
use std::num::NonZeroU32;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpResponse,
};
use dashmap::DashMap;
use governor::{Quota, RateLimiter as GovRateLimiter};
use tracing::debug;

use crate::api::models::ErrorResponse;
use crate::config::RateLimitConfig;

type DirectRateLimiter = governor::DefaultDirectRateLimiter;

/// Per-IP request ceiling. The fixed window from the config (e.g. 100
/// requests per 900 seconds) maps onto a token bucket that replenishes one
/// request every `window / max` and bursts up to the full window budget.
pub struct IpRateLimiter {
    limiters: DashMap<IpAddr, DirectRateLimiter>,
    quota: Quota,
}

impl IpRateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        let max = NonZeroU32::new(config.max_requests).unwrap_or(NonZeroU32::new(100).unwrap());
        let window = Duration::from_secs(config.window_secs.max(1));
        let quota = Quota::with_period(window / max.get())
            .unwrap_or_else(|| Quota::per_second(max))
            .allow_burst(max);

        Self {
            limiters: DashMap::new(),
            quota,
        }
    }

    /// Returns `true` if the request is within budget.
    pub fn check(&self, ip: IpAddr) -> bool {
        let limiter = self
            .limiters
            .entry(ip)
            .or_insert_with(|| GovRateLimiter::direct(self.quota));

        let allowed = limiter.check().is_ok();
        if !allowed {
            debug!(ip = %ip, "request rate limit exceeded");
        }
        allowed
    }
}

pub struct RateLimit {
    limiter: Arc<IpRateLimiter>,
}

impl RateLimit {
    /// The limiter is built once at startup and shared across workers so the
    /// ceiling applies per client, not per worker thread.
    pub fn new(limiter: Arc<IpRateLimiter>) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limiter: Arc<IpRateLimiter>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        // Unix sockets and in-process test calls have no peer address
        let allowed = match req.peer_addr() {
            Some(addr) => self.limiter.check(addr.ip()),
            None => true,
        };

        if !allowed {
            return Box::pin(async move {
                let res = req.into_response(HttpResponse::TooManyRequests().json(
                    ErrorResponse::new("too many requests, please try again later"),
                ));
                Ok(res.map_into_right_body())
            });
        }

        Box::pin(async move {
            let res = srv.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
