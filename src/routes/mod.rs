// Route exports
pub mod matches;

use actix_web::web;

/// Mount the address matching API under `/api/v1`
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchOptions;
    use crate::routes::matches::AppState;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_routes_mounted_under_api_v1() {
        let state = AppState {
            options: MatchOptions::default(),
            parallel: true,
            max_candidates: 100,
            max_field_len: 256,
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/health").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/api/v1/addresses/match")
            .set_json(serde_json::json!({
                "input": { "streetLine": "garden close", "city": "kingston", "parish": "st andrew" },
                "candidates": []
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
