#[cfg(test)]
mod tests {
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, web, App, HttpResponse};
    use msgboard::api::middleware::{Cors, IpRateLimiter, RateLimit};
    use msgboard::config::RateLimitConfig;
    use serde_json::json;
    use std::sync::Arc;

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().body("ok")
    }

    fn origins(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[actix_web::test]
    async fn cors_allows_listed_origin_with_credentials() {
        let app = test::init_service(
            App::new()
                .route("/", web::get().to(ok))
                .wrap(Cors::new(&origins(&["http://localhost:5173"]))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:5173"
        );
        assert_eq!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .unwrap(),
            "true"
        );
    }

    #[actix_web::test]
    async fn cors_rejects_unlisted_origin_before_the_handler() {
        let app = test::init_service(
            App::new()
                .route("/", web::get().to(ok))
                .wrap(Cors::new(&origins(&["http://localhost:5173"]))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://evil.example"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "origin not allowed"}));
    }

    #[actix_web::test]
    async fn cors_passes_requests_without_origin() {
        let app = test::init_service(
            App::new()
                .route("/", web::get().to(ok))
                .wrap(Cors::new(&origins(&["http://localhost:5173"]))),
        )
        .await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert!(resp
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[actix_web::test]
    async fn cors_answers_preflight_directly() {
        let app = test::init_service(
            App::new()
                .route("/", web::get().to(ok))
                .wrap(Cors::new(&origins(&["http://localhost:5173"]))),
        )
        .await;

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/messages")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        let methods = resp
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("POST"));
    }

    #[actix_web::test]
    async fn cors_is_disabled_when_allow_list_is_empty() {
        let app = test::init_service(
            App::new()
                .route("/", web::get().to(ok))
                .wrap(Cors::new(&origins(&[]))),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::ORIGIN, "http://anywhere.example"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn rate_limit_returns_429_when_budget_is_exhausted() {
        let config = RateLimitConfig {
            enabled: true,
            max_requests: 2,
            window_secs: 60,
        };
        let limiter = Arc::new(IpRateLimiter::new(&config));
        let app = test::init_service(
            App::new()
                .route("/", web::get().to(ok))
                .wrap(RateLimit::new(limiter)),
        )
        .await;

        let peer = "10.1.2.3:4000".parse().unwrap();
        for _ in 0..2 {
            let req = test::TestRequest::get().uri("/").peer_addr(peer).to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success());
        }

        let req = test::TestRequest::get().uri("/").peer_addr(peer).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({"error": "too many requests, please try again later"})
        );
    }

    #[actix_web::test]
    async fn rate_limit_tracks_clients_independently() {
        let config = RateLimitConfig {
            enabled: true,
            max_requests: 1,
            window_secs: 60,
        };
        let limiter = Arc::new(IpRateLimiter::new(&config));
        let app = test::init_service(
            App::new()
                .route("/", web::get().to(ok))
                .wrap(RateLimit::new(limiter)),
        )
        .await;

        let first = test::TestRequest::get()
            .uri("/")
            .peer_addr("10.0.0.1:4000".parse().unwrap())
            .to_request();
        assert!(test::call_service(&app, first).await.status().is_success());

        let second = test::TestRequest::get()
            .uri("/")
            .peer_addr("10.0.0.2:4000".parse().unwrap())
            .to_request();
        assert!(test::call_service(&app, second).await.status().is_success());
    }

    #[::core::prelude::v1::test]
    fn limiter_allows_exactly_the_configured_burst() {
        let config = RateLimitConfig {
            enabled: true,
            max_requests: 3,
            window_secs: 900,
        };
        let limiter = IpRateLimiter::new(&config);
        let ip = "192.0.2.7".parse().unwrap();

        for _ in 0..3 {
            assert!(limiter.check(ip));
        }
        assert!(!limiter.check(ip));
    }
}
