//! Server state: singleton references to every service
//!
//! `ServerState` is cheap to clone (all service fields are `Arc`s or
//! handles) and is the axum state type for every route.

use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::orders::{OrderService, RetentionSweeper};
use crate::realtime::{self, NotificationDispatcher, RealtimeHub};

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// Realtime hub (sessions + connection registry)
    pub hub: Arc<RealtimeHub>,
    /// Broadcast/targeted notification routing
    pub dispatcher: Arc<NotificationDispatcher>,
    /// Order workflow orchestration
    pub orders: Arc<OrderService>,
    /// JWT validation service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Initialize the server state from configuration.
    ///
    /// # Panics
    ///
    /// Panics when the work directory or database cannot be initialized;
    /// the server is unusable without storage.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("canteen.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        Self::with_db(config.clone(), db_service.db)
    }

    /// Assemble the state around an existing database handle.
    ///
    /// Tests use this with the in-memory engine.
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let hub = Arc::new(RealtimeHub::new());
        let dispatcher = Arc::new(NotificationDispatcher::new(hub.clone()));
        let orders = Arc::new(OrderService::new(db.clone(), dispatcher.clone()));
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));

        Self {
            config,
            db,
            hub,
            dispatcher,
            orders,
            jwt_service,
        }
    }

    /// Start background tasks; call before serving requests.
    ///
    /// - realtime TCP accept loop
    /// - order retention sweeper
    ///
    /// Both stop when the hub's shutdown token is cancelled.
    pub fn start_background_tasks(&self) {
        let hub = self.hub.clone();
        let addr = format!("0.0.0.0:{}", self.config.realtime_tcp_port);
        tokio::spawn(async move {
            if let Err(e) = realtime::tcp_server::serve(hub, &addr).await {
                tracing::error!("Realtime TCP server failed: {}", e);
            }
        });

        let sweeper = RetentionSweeper::new(
            self.db.clone(),
            self.config.retention_hours,
            self.config.retention_sweep_secs,
        );
        let shutdown = self.hub.shutdown_token().clone();
        tokio::spawn(sweeper.run(shutdown));
    }

    /// Get the database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Signal every background task to stop
    pub fn shutdown(&self) {
        self.hub.shutdown();
    }
}
