//! Server lifecycle management helpers.
//!
//! This module encapsulates the heavy lifting kept out of `main.rs`:
//! building stores and services, seeding the root account and default
//! roles, wiring the HTTP server, and coordinating graceful shutdown.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Result;
use log::{debug, info};

use atrium_accounts::{
    AccountService, LoginSettingsService, MemoryAccountStore, MemoryDictStore, PermissionCache,
    RoleDirectory, StoreUserLookup,
};
use atrium_accounts::store::AccountStore;
use atrium_api::handlers::{SETTINGS_MANAGE, SYSTEM_MANAGE, USERS_MANAGE};
use atrium_api::routes;
use atrium_auth::{init_jwt_config, password, UserLookup};
use atrium_commons::constants::AuthConstants;
use atrium_commons::{Role, User, UserId, UserStatus};
use atrium_configs::{AuthSettings, ServerConfig};
use atrium_supervisor::{RestartCoordinator, SystemProcessControl};

use crate::middleware;

/// Aggregated application components shared across the HTTP server and
/// shutdown handling.
pub struct ApplicationComponents {
    pub accounts: Arc<AccountService>,
    pub settings: Arc<LoginSettingsService>,
    pub coordinator: Arc<RestartCoordinator>,
    pub user_lookup: Arc<dyn UserLookup>,
    pub roles: Arc<RoleDirectory>,
}

/// Initialize stores, services and the restart coordinator, then seed
/// the default roles and the root account.
pub async fn bootstrap(config: &ServerConfig) -> Result<ApplicationComponents> {
    // Shared JWT configuration must exist before the first request
    init_jwt_config(&config.auth.jwt_secret);

    let store: Arc<MemoryAccountStore> = Arc::new(MemoryAccountStore::new());
    let roles = Arc::new(RoleDirectory::new());
    seed_default_roles(&roles);

    let cache = Arc::new(PermissionCache::new(roles.clone()));
    let accounts = Arc::new(AccountService::new(store.clone(), cache));
    let settings = Arc::new(LoginSettingsService::new(Arc::new(MemoryDictStore::new())));
    let coordinator = Arc::new(RestartCoordinator::new(Arc::new(SystemProcessControl::new())));
    let user_lookup: Arc<dyn UserLookup> = Arc::new(StoreUserLookup::new(store.clone()));

    create_default_root_user(store.as_ref(), &config.auth).await?;
    debug!("application components initialized");

    Ok(ApplicationComponents {
        accounts,
        settings,
        coordinator,
        user_lookup,
        roles,
    })
}

/// Bootstrap application components for tests.
///
/// Unlike [`bootstrap`], the process-control seam and the restart delay
/// are injected so a test never terminates its own runner, and bcrypt
/// runs at a low cost factor to keep suites fast.
///
/// **Warning**: only use this in tests; production code uses [`bootstrap`].
pub async fn bootstrap_isolated(
    config: &ServerConfig,
    control: Arc<dyn atrium_supervisor::ProcessControl>,
    restart_delay: std::time::Duration,
) -> Result<ApplicationComponents> {
    init_jwt_config(&config.auth.jwt_secret);

    let store: Arc<MemoryAccountStore> = Arc::new(MemoryAccountStore::new());
    let roles = Arc::new(RoleDirectory::new());
    seed_default_roles(&roles);

    let cache = Arc::new(PermissionCache::new(roles.clone()));
    let accounts = Arc::new(AccountService::new(store.clone(), cache).with_bcrypt_cost(4));
    let settings = Arc::new(LoginSettingsService::new(Arc::new(MemoryDictStore::new())));
    let coordinator = Arc::new(RestartCoordinator::new(control).with_delay(restart_delay));
    let user_lookup: Arc<dyn UserLookup> = Arc::new(StoreUserLookup::new(store.clone()));

    create_default_root_user_with_cost(store.as_ref(), &config.auth, Some(4)).await?;

    Ok(ApplicationComponents {
        accounts,
        settings,
        coordinator,
        user_lookup,
        roles,
    })
}

/// Register shared state and routes on an Actix service config.
///
/// Used by both the production server and the integration tests so the
/// two always run the same wiring.
pub fn register(
    cfg: &mut web::ServiceConfig,
    components: &ApplicationComponents,
    auth: &AuthSettings,
) {
    cfg.app_data(web::Data::new(components.accounts.clone()))
        .app_data(web::Data::new(components.settings.clone()))
        .app_data(web::Data::new(components.coordinator.clone()))
        .app_data(web::Data::new(components.user_lookup.clone()))
        .app_data(web::Data::new(auth.clone()))
        .configure(routes::configure);
}

/// Start the HTTP server and manage graceful shutdown.
pub async fn run(config: &ServerConfig, components: ApplicationComponents) -> Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting HTTP server on {}", bind_addr);

    let auth_settings = config.auth.clone();
    let cors_config = config.clone();
    let components = Arc::new(components);
    let components_for_app = components.clone();

    let server = HttpServer::new(move || {
        let components = components_for_app.clone();
        let auth = auth_settings.clone();
        App::new()
            .wrap(middleware::request_logger())
            .wrap(middleware::build_cors_from_config(&cors_config))
            .configure(move |cfg| register(cfg, &components, &auth))
    })
    .bind(&bind_addr)?
    .workers(if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    })
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            if let Err(e) = result {
                log::error!("Server task failed: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
            server_handle.stop(true).await;
            debug!("Graceful shutdown complete");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// A running HTTP server instance intended for integration tests.
///
/// Starts the same Actix app wiring as the production server (middleware
/// stack, route registration, app_data) but binds to an ephemeral port
/// and provides an explicit shutdown handle.
pub struct RunningTestHttpServer {
    pub base_url: String,
    server_handle: actix_web::dev::ServerHandle,
    server_task: tokio::task::JoinHandle<std::io::Result<()>>,
}

impl RunningTestHttpServer {
    pub async fn shutdown(self) {
        self.server_handle.stop(false).await;
        let _ = self.server_task.await;
    }
}

/// Start the HTTP server for integration tests on a random available port.
///
/// Notes:
/// - Does not install Ctrl+C handling.
/// - Caller must invoke `shutdown()` to stop the server.
pub async fn run_for_tests(
    config: &ServerConfig,
    components: ApplicationComponents,
) -> Result<RunningTestHttpServer> {
    let listener = std::net::TcpListener::bind(("127.0.0.1", 0))?;
    let bind_addr = listener.local_addr()?;

    let auth_settings = config.auth.clone();
    let cors_config = config.clone();
    let components = Arc::new(components);

    let server = HttpServer::new(move || {
        let components = components.clone();
        let auth = auth_settings.clone();
        App::new()
            .wrap(middleware::request_logger())
            .wrap(middleware::build_cors_from_config(&cors_config))
            .configure(move |cfg| register(cfg, &components, &auth))
    })
    .listen(listener)?
    .workers(1)
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);
    let base_url = format!("http://{}", bind_addr);

    Ok(RunningTestHttpServer {
        base_url,
        server_handle,
        server_task,
    })
}

/// Seed the built-in roles the console ships with.
///
/// The directory is in-memory; a relaunch reseeds the same set, so the
/// role ids are stable identifiers, not generated.
fn seed_default_roles(roles: &RoleDirectory) {
    roles.upsert_role(Role::new(
        "r_admin",
        "Administrators",
        vec![
            USERS_MANAGE.to_string(),
            SETTINGS_MANAGE.to_string(),
            SYSTEM_MANAGE.to_string(),
        ],
    ));
    roles.upsert_role(Role::new(
        "r_support",
        "Support",
        vec![USERS_MANAGE.to_string()],
    ));
    debug!("default roles seeded");
}

/// Create the root account on first startup.
///
/// The password comes from configuration (ATRIUM_ROOT_PASSWORD wins over
/// config.toml); with neither set, a random credential is generated and
/// printed exactly once for the administrator to save.
async fn create_default_root_user(store: &dyn AccountStore, auth: &AuthSettings) -> Result<()> {
    create_default_root_user_with_cost(store, auth, None).await
}

async fn create_default_root_user_with_cost(
    store: &dyn AccountStore,
    auth: &AuthSettings,
    bcrypt_cost: Option<u32>,
) -> Result<()> {
    if store
        .get_by_username(AuthConstants::ROOT_USERNAME)
        .await
        .map_err(|e| anyhow::anyhow!("root lookup failed: {}", e))?
        .is_some()
    {
        debug!(
            "root account '{}' already exists, skipping initialization",
            AuthConstants::ROOT_USERNAME
        );
        return Ok(());
    }

    let (root_password, generated) = if auth.root_password.is_empty() {
        (password::generate_password(), true)
    } else {
        (auth.root_password.clone(), false)
    };

    let password_hash = password::hash_password(&root_password, bcrypt_cost)
        .await
        .map_err(|e| anyhow::anyhow!("failed to hash root password: {}", e))?;
    let now = chrono::Utc::now().timestamp_millis();

    let root = User {
        user_id: UserId::root(),
        username: AuthConstants::ROOT_USERNAME.into(),
        password_hash,
        email: None,
        display_name: Some("Administrator".to_string()),
        is_root: true,
        status: UserStatus::Enabled,
        balance: rust_decimal::Decimal::ZERO,
        role_ids: vec![],
        external_identity: None,
        created_at: now,
        updated_at: now,
        last_login_at: None,
    };

    store
        .insert(root)
        .await
        .map_err(|e| anyhow::anyhow!("failed to create root account: {}", e))?;

    if generated {
        info!("Created root account '{}'", AuthConstants::ROOT_USERNAME);
        info!("  Generated password: {}", root_password);
        info!("  This password is shown once; change it after first login.");
    } else {
        info!(
            "Created root account '{}' (password from configuration)",
            AuthConstants::ROOT_USERNAME
        );
    }

    Ok(())
}
