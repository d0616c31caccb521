use crate::catalog::BookCatalog;
use crate::orders::OrderPlacementService;
use record_store::StoreActor;
use tracing::{error, info};

/// Configuration for a [`ShopSystem`].
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Capacity of the store actor's request channel. Callers wait when it is full.
    pub store_buffer: usize,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self { store_buffer: 32 }
    }
}

/// The runtime orchestrator of the bookshop.
///
/// `ShopSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the store actor
/// - **Dependency Wiring**: Handing the store client to the catalog and the placement service
///
/// # Example
///
/// ```ignore
/// let system = ShopSystem::new();
///
/// let book_id = system.catalog.add_book(book).await?;
/// let placed = system.orders.place_order(Some(order)).await?;
///
/// system.shutdown().await?;
/// ```
pub struct ShopSystem {
    /// Client for the book catalog
    pub catalog: BookCatalog,

    /// Service placing orders against the catalog's stock
    pub orders: OrderPlacementService,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ShopSystem {
    /// Creates a `ShopSystem` with the default [`ShopConfig`]. Must be called inside a Tokio
    /// runtime.
    pub fn new() -> Self {
        Self::with_config(ShopConfig::default())
    }

    /// Spawns the store actor and wires the catalog and the placement service to it.
    pub fn with_config(config: ShopConfig) -> Self {
        let (store_actor, store) = StoreActor::new(config.store_buffer);
        let store_handle = tokio::spawn(store_actor.run());
        info!(store_buffer = config.store_buffer, "Shop started");

        Self {
            catalog: BookCatalog::new(store.clone()),
            orders: OrderPlacementService::new(store),
            handles: vec![store_handle],
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the clients closes the store channel; the actor then exits its loop once every
    /// other clone of those clients has been dropped too.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if every actor shut down cleanly
    /// - `Err(String)` if an actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.catalog);
        drop(self.orders);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for ShopSystem {
    fn default() -> Self {
        Self::new()
    }
}
