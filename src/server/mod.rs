//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::jwt::JwtManager;
use crate::middleware::api_key::api_key_middleware;
use crate::notification::EmailRelayClient;
use crate::repository::{
    business::BusinessRepositoryImpl, employee::EmployeeRepositoryImpl,
    invitation::InvitationRepositoryImpl, password_reset::PasswordResetRepositoryImpl,
    user::UserRepositoryImpl,
};
use crate::service::{
    AuthService, BusinessService, EmployeeService, InvitationService, PasswordResetService,
    UserService,
};
use anyhow::Result;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub jwt_manager: JwtManager,
    pub auth_service: Arc<AuthService<UserRepositoryImpl, EmployeeRepositoryImpl>>,
    pub user_service: Arc<UserService<UserRepositoryImpl>>,
    pub business_service: Arc<BusinessService<BusinessRepositoryImpl>>,
    pub employee_service: Arc<EmployeeService<EmployeeRepositoryImpl, BusinessRepositoryImpl>>,
    pub invitation_service:
        Arc<InvitationService<InvitationRepositoryImpl, BusinessRepositoryImpl>>,
    pub password_reset_service:
        Arc<PasswordResetService<UserRepositoryImpl, PasswordResetRepositoryImpl>>,
}

impl AppState {
    pub fn new(config: Config, db_pool: MySqlPool) -> Self {
        let user_repo = Arc::new(UserRepositoryImpl::new(db_pool.clone()));
        let business_repo = Arc::new(BusinessRepositoryImpl::new(db_pool.clone()));
        let employee_repo = Arc::new(EmployeeRepositoryImpl::new(db_pool.clone()));
        let invitation_repo = Arc::new(InvitationRepositoryImpl::new(db_pool.clone()));
        let reset_repo = Arc::new(PasswordResetRepositoryImpl::new(db_pool.clone()));

        let jwt_manager = JwtManager::new(config.jwt.clone());
        let notifier = Arc::new(EmailRelayClient::new(config.notification.clone()));

        let auth_service = Arc::new(AuthService::new(
            user_repo.clone(),
            employee_repo.clone(),
            jwt_manager.clone(),
            config.jwt.access_token_ttl_secs,
        ));
        let user_service = Arc::new(UserService::new(user_repo.clone()));
        let business_service = Arc::new(BusinessService::new(business_repo.clone()));
        let employee_service = Arc::new(EmployeeService::new(
            employee_repo,
            business_repo.clone(),
        ));
        let invitation_service = Arc::new(InvitationService::new(
            invitation_repo,
            business_repo,
            notifier.clone(),
            config.app_base_url.clone(),
        ));
        let password_reset_service = Arc::new(PasswordResetService::new(
            user_repo,
            reset_repo,
            notifier,
            config.app_base_url.clone(),
        ));

        Self {
            config: Arc::new(config),
            db_pool,
            jwt_manager,
            auth_service,
            user_service,
            business_service,
            employee_service,
            invitation_service,
            password_reset_service,
        }
    }
}

/// Run the HTTP server
pub async fn run(config: Config) -> Result<()> {
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    let http_addr = config.http_addr();
    let state = AppState::new(config, db_pool);
    let app = build_router(state);

    info!("HTTP server listening on {}", http_addr);
    let listener = TcpListener::bind(&http_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/api/v1/auth/login", post(api::auth::login))
        .route(
            "/api/v1/users",
            post(api::user::register).get(api::user::list),
        )
        .route(
            "/api/v1/users/{id}",
            get(api::user::get)
                .put(api::user::update)
                .delete(api::user::delete),
        )
        .route(
            "/api/v1/users/change-password",
            put(api::user::change_password),
        )
        .route(
            "/api/v1/users/password-reset",
            post(api::user::request_password_reset),
        )
        .route(
            "/api/v1/users/password-reset/confirm",
            post(api::user::confirm_password_reset),
        )
        .route(
            "/api/v1/businesses",
            post(api::business::create).get(api::business::list),
        )
        .route(
            "/api/v1/businesses/{id}",
            get(api::business::get)
                .put(api::business::update)
                .delete(api::business::delete),
        )
        .route(
            "/api/v1/businesses/{id}/employees",
            get(api::employee::list_by_business),
        )
        .route(
            "/api/v1/businesses/{id}/invitations",
            get(api::invitation::list_by_business),
        )
        .route("/api/v1/employees", post(api::employee::create))
        .route(
            "/api/v1/employees/{id}",
            get(api::employee::get)
                .put(api::employee::update)
                .delete(api::employee::delete),
        )
        .route("/api/v1/invitations", post(api::invitation::create))
        .route("/api/v1/invitations/accept", post(api::invitation::accept))
        .route("/api/v1/invitations/{id}", get(api::invitation::get))
        .layer(from_fn_with_state(state.clone(), api_key_middleware));

    Router::new()
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
