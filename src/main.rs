//! Mock Banking Backend
//!
//! Serves in-memory banking fixtures to the portal frontend over two API
//! surfaces: the enveloped portal API under `/api` and the header-gated
//! customer, account, transfer and payee verification API.

mod api;
mod auth;
mod config;
mod errors;
mod fixtures;
mod format;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use errors::AppError;
use fixtures::Fixtures;
use store::{MemoryStore, PasswordVault};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub fixtures: Arc<Fixtures>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Load fixtures and seed the store for `config`.
    pub async fn build(config: Config) -> Result<Self, AppError> {
        let fixtures = Fixtures::load()?;
        let vault = match &config.password_file {
            Some(path) => PasswordVault::open(path, &fixtures.seed.password).await,
            None => PasswordVault::in_memory(&fixtures.seed.password),
        };
        let store = MemoryStore::new(&fixtures.seed, vault);

        Ok(Self {
            store: Arc::new(store),
            fixtures: Arc::new(fixtures),
            config: Arc::new(config),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }

    tracing::info!("Starting Mock Banking Backend");
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Error style: {}", config.error_style.as_str());
    if config.portal_requires_headers {
        tracing::info!("Portal routes require session headers");
    }

    let bind_addr = config.bind_addr;
    let state = AppState::build(config).await?;
    tracing::info!(
        "Loaded {} seed messages, {} SOF questions",
        state.fixtures.seed.messages.len(),
        state.fixtures.seed.sof_questions.len()
    );
    if state.store.password_is_persistent().await {
        tracing::info!("Password file: {:?}", state.config.password_file);
    } else {
        tracing::info!("Password kept in memory only");
    }

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let style = state.config.error_style;

    // Portal routes
    let mut portal_routes = Router::new()
        // Reference data
        .route("/accounts", get(api::list_portal_accounts))
        .route("/combispaar", get(api::list_combispaar))
        .route("/combispaar/page-data", get(api::get_combispaar_page))
        .route("/combispaar/account-options", get(api::get_combispaar_options))
        .route("/combispaar/iban-options", get(api::get_combispaar_iban_options))
        .route("/chart-data", get(api::get_chart_data))
        .route("/user", get(api::get_user))
        .route("/user/profile", get(api::get_user_profile))
        .route("/maxispaar/page-data", get(api::get_maxispaar_page))
        .route("/dashboard", get(api::get_dashboard))
        .route("/verification/send-code", get(api::send_verification_code))
        .route("/account/by-iban", get(api::get_account_by_iban))
        .route("/documents/download", get(api::download_document))
        // Messages
        .route(
            "/messages",
            get(api::list_portal_messages).post(api::create_portal_message),
        )
        .route(
            "/messages/{reference}",
            axum::routing::delete(api::delete_portal_message),
        )
        // Personal details
        .route(
            "/personal-details",
            get(api::get_personal_details).put(api::update_personal_details),
        )
        .route("/personal-details/phone", get(api::get_phone_number))
        .route(
            "/personal-details/password",
            axum::routing::put(api::update_password),
        )
        .route(
            "/personal-details/validate-password",
            post(api::validate_password),
        )
        .route(
            "/sof-questions",
            get(api::get_sof_questions).put(api::replace_sof_questions),
        )
        // Statements and transfers
        .route(
            "/accounts/statement/{account_number}",
            get(api::get_portal_statement),
        )
        .route(
            "/transfers/payment/{customer_id}/{source_account}",
            get(api::simulate_portal_transfer),
        );

    if state.config.portal_requires_headers {
        portal_routes = portal_routes.layer(middleware::from_fn(move |req, next| {
            auth::session_headers_layer(style, req, next)
        }));
    }

    // Banking routes (always gated)
    let banking_routes = Router::new()
        // Customer profile
        .route(
            "/customer/profile/phone/{customer_id}",
            get(api::get_customer_phone).put(api::update_customer_phone),
        )
        .route(
            "/customer/profile/identification/{customer_id}",
            get(api::get_customer_identification).put(api::update_customer_identification),
        )
        .route(
            "/customer/profile/email/{customer_id}",
            get(api::get_customer_email).put(api::update_customer_email),
        )
        .route(
            "/customer/profile/address/{customer_id}",
            get(api::get_customer_address).put(api::update_customer_address),
        )
        .route(
            "/customer/profile/validateNetBankingUser",
            post(api::validate_net_banking_user),
        )
        .route("/customer/profile/login", post(api::customer_login))
        .route("/customer/profile/appStatus", post(api::get_app_status))
        .route(
            "/customer/profile/resolveAddress/{customer_id}/{post_code}",
            get(api::resolve_address_by_postcode),
        )
        .route(
            "/customer/profile/resolveAddress/{customer_id}/{post_code}/{house_no}",
            get(api::resolve_address_by_house_number),
        )
        .route(
            "/customer/profile/isNetBankingUserActive/{customer_id}",
            get(api::is_net_banking_user_active),
        )
        .route(
            "/customer/profile/fullProfile/{customer_id}",
            get(api::get_full_profile),
        )
        // Customer messages
        .route(
            "/customer/messages/{customer_id}",
            post(api::create_customer_message),
        )
        .route(
            "/customer/messages/{customer_id}/{reference}",
            get(api::get_customer_message).delete(api::delete_customer_message),
        )
        .route(
            "/customer/messages/unread/{customer_id}",
            get(api::count_unread_messages),
        )
        .route(
            "/customer/messages/list/{customer_id}",
            get(api::list_customer_messages),
        )
        // Customer downloads and campaigns
        .route(
            "/customer/downloads/financialAnnualOverview/{customer_id}",
            get(api::list_annual_overviews),
        )
        .route(
            "/customer/downloads/financialAnnualOverview/print/{customer_id}/{id}",
            get(api::print_annual_overview),
        )
        .route(
            "/customer/downloads/contracts/{customer_id}",
            get(api::list_contracts),
        )
        .route(
            "/customer/downloads/contracts/print/{customer_id}/{id}",
            get(api::print_contract),
        )
        .route(
            "/customer/campaigns/list/{customer_id}",
            get(api::list_campaigns),
        )
        // Accounts
        .route(
            "/accounts/saving/modification/{customer_id}/{account_number}",
            get(api::get_saving_modification),
        )
        .route(
            "/accounts/saving/new/{customer_id}",
            get(api::get_new_saving_products),
        )
        .route(
            "/accounts/utilities/customerMatchByAccount/{customer_id}/{account_number}",
            get(api::match_customer_by_account),
        )
        .route(
            "/accounts/targetAccounts/{customer_id}/{account_number}/{transaction_type}",
            get(api::list_target_accounts),
        )
        .route(
            "/accounts/saving/transactions/receipt/{account_number}",
            get(api::get_transaction_receipt),
        )
        .route(
            "/accounts/saving/statement/{account_number}/{page_index}/{page_size}",
            get(api::get_saving_statement),
        )
        .route(
            "/accounts/saving/statement/print/{account_number}",
            get(api::print_statement),
        )
        .route(
            "/accounts/saving/rates/{customer_id}",
            get(api::get_saving_rates),
        )
        .route(
            "/accounts/saving/history/{account_number}",
            get(api::get_saving_history),
        )
        .route(
            "/accounts/saving/history/print/{account_number}",
            get(api::print_saving_history),
        )
        .route(
            "/accounts/saving/calculate/{customer_id}",
            get(api::calculate_saving),
        )
        .route("/accounts/list/{customer_id}", get(api::list_accounts))
        // Transfers
        .route(
            "/transfers/payment/{customer_id}/{source_account}",
            get(api::simulate_transfer),
        )
        .route(
            "/transfers/ownAccountTransfer/{customer_id}/{source_account}",
            get(api::get_own_account_transfer),
        )
        .route("/transfers/utilities/holidays", get(api::list_holidays))
        .route("/transfers/utilities/bankDate", get(api::get_bank_date))
        .route(
            "/transfers/payment/futurePayment/list/{customer_id}",
            get(api::list_future_payments),
        )
        // Payee verification
        .route(
            "/vop/requestPayeeVerification",
            post(api::request_payee_verification),
        )
        // Apply session header gate
        .layer(middleware::from_fn(move |req, next| {
            auth::session_headers_layer(style, req, next)
        }));

    // Health check (no headers required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", portal_routes)
        .merge(banking_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
