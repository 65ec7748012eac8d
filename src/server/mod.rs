pub mod config;

use crate::{
    auth::middleware::auth_middleware,
    config::Config,
    database::{DatabaseManager, DatabaseManagerImpl},
    error::AppError,
    health::HealthService,
    middleware::{request_id_middleware, request_response_logger},
    routes::{create_docs_routes, create_health_routes, create_property_space_routes},
    shutdown::ShutdownCoordinator,
};
use axum::{Router, middleware};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Clone)]
pub struct Server {
    pub config: Arc<Config>,
    pub database: Arc<dyn DatabaseManager>,
    pub health_service: Arc<HealthService>,
    pub shutdown_coordinator: Arc<ShutdownCoordinator>,
}

impl Server {
    pub async fn new(config: Config) -> Result<Self, AppError> {
        // Initialize database
        let database_impl = Arc::new(
            DatabaseManagerImpl::new_from_config(&config)
                .await
                .map_err(AppError::Database)?,
        );
        let database: Arc<dyn DatabaseManager> = database_impl.clone();

        // Initialize health service
        let health_service = Arc::new(HealthService::new());
        health_service.register(database_impl).await;

        let shutdown_coordinator = Arc::new(ShutdownCoordinator::new());

        Ok(Self {
            config: Arc::new(config),
            database,
            health_service,
            shutdown_coordinator,
        })
    }

    pub async fn run(&self) -> Result<(), AppError> {
        // Run database migrations on startup to ensure tables exist
        info!("Running database migrations");
        self.database.migrate().await.map_err(AppError::Database)?;
        info!("Database migrations completed successfully");

        let app = self.create_app();

        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

        info!("Server listening on http://{}", addr);

        // Spawn shutdown signal handler
        let shutdown_coordinator = self.shutdown_coordinator.clone();
        tokio::spawn(async move {
            shutdown_coordinator.wait_for_shutdown_signal().await;
        });

        // Run server with graceful shutdown
        let mut shutdown_rx = self.shutdown_coordinator.subscribe();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
                info!("Graceful shutdown initiated");
            })
            .await
            .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

        info!("Server shutdown complete");

        Ok(())
    }

    // Creates an application router
    pub fn create_app(&self) -> Router {
        let mut app = Router::new()
            // API routes
            .nest("/api/v1", self.api_routes())
            // Health check routes
            .nest("/health", create_health_routes())
            // OpenAPI docs
            .merge(create_docs_routes())
            // All routes use Server as state
            .with_state(self.clone());

        if self.config.logging.log_request {
            app = app.layer(middleware::from_fn(request_response_logger));
        }

        // Request IDs are assigned outermost so every later layer sees them
        app.layer(middleware::from_fn(request_id_middleware))
    }

    /// Helper method for bearer-authenticated API routes
    fn api_routes(&self) -> Router<Server> {
        create_property_space_routes().layer(middleware::from_fn_with_state(
            self.clone(),
            auth_middleware,
        ))
    }
}
