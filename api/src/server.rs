use std::sync::Arc;

use axum::{
    Router,
    extract::MatchedPath,
    http::{HeaderName, Method, Request, header},
    routing::any,
};
use mcontrol_common::views::ApiErrorResponse;
use mcontrol_db::storage::Storage;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::info_span;
use utoipa::{
    ToSchema,
    openapi::{Info, License, OpenApi, RefOr, path::Operation},
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{config::McontrolApiConfig, context::ApiContext, handlers};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Routes that answer without a session token.
const PUBLIC_PATHS: [&str; 2] = ["/api/login", "/api/health"];

/// Build the HTTP application around `db`.
pub fn make(cfg: McontrolApiConfig, db: Arc<dyn Storage>) -> Router {
    let (api, _) = api_routes();

    let router = api
        .route("/api", any(handlers::not_found))
        .route("/api/{*rest}", any(handlers::not_found));

    let router = match &cfg.static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).not_found_service(ServeFile::new(dir.join("index.html"))),
        ),
        None => router.fallback(handlers::not_found),
    };

    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            x_request_id.clone(),
            MakeRequestUuid,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request<_>| {
                    // Log the request ID as generated
                    let span = info_span!(
                        "http_request",
                        method = req.method().to_string(),
                        request_id = Option::<&str>::None,
                        path = Option::<&str>::None,
                    );

                    if let Some(request_id) = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                    {
                        span.record("request_id", request_id);
                    };

                    if let Some(path) = req.extensions().get::<MatchedPath>() {
                        span.record("path", path.as_str())
                    } else {
                        span.record("path", req.uri().path())
                    };

                    span
                }),
        )
        .layer(cors_layer(&cfg))
        .layer(PropagateRequestIdLayer::new(x_request_id));

    let context = ApiContext::new(cfg, db);

    router
        .method_not_allowed_fallback(handlers::not_found)
        .layer(middleware)
        .with_state(context)
}

/// The OpenAPI document describing every `/api` route.
pub fn openapi() -> OpenApi {
    api_routes().1
}

fn api_routes() -> (Router<ApiContext>, OpenApi) {
    let openapi = OpenApi::builder()
        .info(
            Info::builder()
                .title("mcontrol API Reference")
                .version(env!("CARGO_PKG_VERSION"))
                .license(Some(
                    License::builder()
                        .name("Apache 2.0 License")
                        .identifier(Some(env!("CARGO_PKG_LICENSE")))
                        .build(),
                )),
        )
        .build();

    let (r, mut a) = OpenApiRouter::with_openapi(openapi)
        .routes(routes!(handlers::auth::auth_login))
        .routes(routes!(handlers::auth::auth_verify))
        .routes(routes!(handlers::state::get_state, handlers::state::put_state))
        .routes(routes!(handlers::health_check))
        .split_for_parts();

    a.paths.paths.iter_mut().for_each(|(path, item)| {
        let protected = !PUBLIC_PATHS.contains(&path.as_str());
        for operation in [
            &mut item.get,
            &mut item.post,
            &mut item.put,
            &mut item.patch,
            &mut item.delete,
        ] {
            apply_default_errors(operation, protected);
        }
    });

    (r, a)
}

fn cors_layer(cfg: &McontrolApiConfig) -> CorsLayer {
    match &cfg.cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.clone())
            .allow_methods([Method::GET, Method::POST, Method::PUT])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    }
}

fn apply_default_errors(item: &mut Option<Operation>, protected: bool) {
    if let Some(item) = item {
        if protected {
            item.responses.responses.insert(
                "401".into(),
                RefOr::Ref(
                    utoipa::openapi::Ref::builder()
                        .summary("Missing token")
                        .ref_location_from_schema_name(ApiErrorResponse::name())
                        .build(),
                ),
            );

            item.responses.responses.insert(
                "403".into(),
                RefOr::Ref(
                    utoipa::openapi::Ref::builder()
                        .summary("Invalid or expired token")
                        .ref_location_from_schema_name(ApiErrorResponse::name())
                        .build(),
                ),
            );
        }

        item.responses.responses.insert(
            "500".into(),
            RefOr::Ref(
                utoipa::openapi::Ref::builder()
                    .summary("Internal server error")
                    .ref_location_from_schema_name(ApiErrorResponse::name())
                    .build(),
            ),
        );
    }
}
