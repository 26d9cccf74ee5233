use std::collections::HashSet;
use std::future::{ready, Future, Ready};
use std::pin::Pin;
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderValue},
    http::Method,
    Error, HttpResponse,
};
use tracing::warn;

use crate::api::models::ErrorResponse;

/// Origin allow-list enforced ahead of the route handlers.
///
/// Requests without an `Origin` header (curl, server-to-server) pass through
/// untouched. Disallowed origins are rejected with 403 before any handler
/// runs. An empty allow-list disables the policy.
pub struct Cors {
    allowed_origins: Rc<HashSet<String>>,
}

impl Cors {
    pub fn new(origins: &[String]) -> Self {
        let allowed_origins = origins
            .iter()
            .filter(|origin| !origin.is_empty())
            .map(|origin| origin.trim_end_matches('/').to_lowercase())
            .collect();

        Self {
            allowed_origins: Rc::new(allowed_origins),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Cors
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CorsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorsMiddleware {
            service: Rc::new(service),
            allowed_origins: self.allowed_origins.clone(),
        }))
    }
}

pub struct CorsMiddleware<S> {
    service: Rc<S>,
    allowed_origins: Rc<HashSet<String>>,
}

impl<S, B> Service<ServiceRequest> for CorsMiddleware<S>
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

        if self.allowed_origins.is_empty() {
            return Box::pin(async move {
                let res = srv.call(req).await?;
                Ok(res.map_into_left_body())
            });
        }

        let origin = match req.headers().get(header::ORIGIN).cloned() {
            Some(origin) => origin,
            // Not a browser cross-origin request
            None => {
                return Box::pin(async move {
                    let res = srv.call(req).await?;
                    Ok(res.map_into_left_body())
                });
            }
        };

        let normalized = origin
            .to_str()
            .unwrap_or_default()
            .trim_end_matches('/')
            .to_lowercase();

        if !self.allowed_origins.contains(&normalized) {
            warn!("CORS blocked origin: {}", normalized);
            return Box::pin(async move {
                let res = req.into_response(
                    HttpResponse::Forbidden().json(ErrorResponse::new("origin not allowed")),
                );
                Ok(res.map_into_right_body())
            });
        }

        // Answer preflight directly so OPTIONS never reaches the handlers
        if req.method() == Method::OPTIONS {
            return Box::pin(async move {
                let res = req.into_response(
                    HttpResponse::Ok()
                        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, origin))
                        .insert_header((header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"))
                        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"))
                        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
                        .insert_header((header::VARY, "Origin"))
                        .finish(),
                );
                Ok(res.map_into_right_body())
            });
        }

        Box::pin(async move {
            let mut res = srv.call(req).await?;

            let headers = res.headers_mut();
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
            headers.append(header::VARY, HeaderValue::from_static("Origin"));

            Ok(res.map_into_left_body())
        })
    }
}
