use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::OrderRepository;
use crate::notify::OrderFeed;
use crate::orders::OrderCoordinator;

/// Server state - shared references to all services
///
/// Cloned into every handler; all fields are cheap shallow copies.
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | feed | OrderFeed | 订单广播通道 |
/// | coordinator | Arc<OrderCoordinator> | 订单状态协调器 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// Order feed fan-out
    pub feed: OrderFeed,
    /// Order coordinator (transition engine entry point)
    pub coordinator: Arc<OrderCoordinator>,
}

impl ServerState {
    /// Initialize server state
    ///
    /// Opens the database under `work_dir`, builds the feed, and wires the
    /// coordinator with the SurrealDB-backed store and the injected feed.
    ///
    /// # Panics
    ///
    /// Panics if the database cannot be opened.
    pub async fn initialize(config: &Config) -> Self {
        std::fs::create_dir_all(&config.work_dir)
            .expect("Failed to create work directory");

        let db_path = config.database_path();
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");
        let db = db_service.db;

        let feed = OrderFeed::with_capacity(config.feed_capacity);
        let store = Arc::new(OrderRepository::new(db.clone()));
        let coordinator = Arc::new(OrderCoordinator::new(store, feed.clone()));

        Self {
            config: config.clone(),
            db,
            feed,
            coordinator,
        }
    }

    /// Get the database instance
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Get the order feed
    pub fn order_feed(&self) -> &OrderFeed {
        &self.feed
    }
}
