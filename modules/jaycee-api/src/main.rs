use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use jaycee_common::Config;
use jaycee_lending::{KycGate, LoanService, Reconciler};
use jaycee_store::{AuditLog, LoanStore, UserStore};

mod auth;
mod clients;
mod error;
mod jwt;
mod rest;

use clients::{IdAnalyzerVerifier, MonoAccounts, MonoDisburser};
use jwt::JwtService;

/// KYC uploads carry two images; allow up to 10 MiB per request.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub struct AppState {
    pub loans: LoanService,
    pub reconciler: Reconciler,
    pub kyc: KycGate,
    pub users: UserStore,
    pub audit: AuditLog,
    pub jwt: JwtService,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(20)
        .connect(&config.database_url)
        .await?;
    jaycee_store::migrate(&pool).await?;
    info!("Connected to database, migrations complete");

    let mono = Arc::new(mono_client::MonoClient::new(
        &config.mono_base_url,
        &config.mono_api_key,
    ));
    let idanalyzer = Arc::new(idanalyzer_client::IdAnalyzerClient::new(
        &config.idanalyzer_base_url,
        &config.idanalyzer_api_key,
        &config.idanalyzer_profile_id,
    ));

    let users = UserStore::new(pool.clone());
    let loan_store = LoanStore::new(pool.clone());
    let audit = AuditLog::new(pool.clone());

    let state = Arc::new(AppState {
        loans: LoanService::new(
            users.clone(),
            loan_store.clone(),
            audit.clone(),
            Arc::new(MonoDisburser { client: mono.clone() }),
            Arc::new(MonoAccounts { client: mono }),
        ),
        reconciler: Reconciler::new(loan_store),
        kyc: KycGate::new(
            users.clone(),
            Arc::new(IdAnalyzerVerifier { client: idanalyzer }),
            config.kyc_manual_review,
        ),
        users,
        audit,
        jwt: JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()),
    });

    let app = Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        // Lending
        .route("/api/loans/request", post(rest::loans::request_loan))
        .route("/api/loans/approve", post(rest::loans::approve_loan))
        .route("/api/loans/repay", post(rest::loans::repayment_details))
        .route("/api/loans/history", get(rest::loans::history))
        // KYC
        .route("/api/kyc", post(rest::kyc::submit))
        .route("/api/kyc/status", get(rest::kyc::status))
        // Payment provider callbacks
        .route("/api/webhooks/repayment", post(rest::webhook::repayment))
        // Audit trail (admin)
        .route("/api/logs", get(rest::logs::recent))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Logging layer: method + path + status + latency only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.api_host, config.api_port);
    info!("Jaycee lending API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
