use bookshop::lifecycle::{setup_tracing, ShopSystem};
use bookshop::model::{BookCreate, Order};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    info!("Starting bookshop demo");

    let system = ShopSystem::new();

    let span = tracing::info_span!("catalog_setup");
    let (dune, emma) = async {
        info!("Adding books");
        let dune = system
            .catalog
            .add_book(BookCreate {
                title: "Dune".to_string(),
                available: 2,
            })
            .await?;
        let emma = system
            .catalog
            .add_book(BookCreate {
                title: "Emma".to_string(),
                available: 1,
            })
            .await?;
        Ok::<_, bookshop::catalog::CatalogError>((dune, emma))
    }
    .instrument(span)
    .await?;

    // Accepted: one of each.
    let mut first = Order::new();
    first.add_item(dune, 1)?;
    first.add_item(emma, 1)?;

    // Rejected: Emma is sold out by now, so Dune's decrement is rolled back.
    let mut second = Order::new();
    second.add_item(dune, 1)?;
    second.add_item(emma, 1)?;

    let span = tracing::info_span!("order_processing");
    async {
        for order in [first, second] {
            match system.orders.place_order(Some(order)).await {
                Ok(placed) => info!(order_id = %placed.id, size = placed.size(), "Order accepted"),
                Err(e) => error!(error = %e, "Order rejected"),
            }
        }
    }
    .instrument(span)
    .await;

    let dune_left = system.catalog.check_stock(dune).await?;
    let emma_left = system.catalog.check_stock(emma).await?;
    let placed = system.orders.find_all().await?;
    info!(dune = dune_left, emma = emma_left, orders = placed.len(), "Final state");

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
