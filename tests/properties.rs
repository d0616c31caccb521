//! Property tests: placement against the real store agrees with a sequential model of the
//! rules, and a rejected order never changes stock or writes an order.

use bookshop::lifecycle::ShopSystem;
use bookshop::model::{BookCreate, BookId, Order};
use bookshop::orders::{OrderError, MAX_ORDER_SIZE};
use proptest::prelude::*;

/// What placing an order should do, computed without the store.
fn expected_outcome(
    stocks: &[u32],
    items: &[(usize, u32)],
) -> Result<Vec<u32>, (Option<usize>, OrderError)> {
    let size: u64 = items.iter().map(|&(_, quantity)| u64::from(quantity)).sum();
    if size == 0 {
        return Err((None, OrderError::EmptyOrder));
    }
    if size > MAX_ORDER_SIZE {
        return Err((
            None,
            OrderError::TooLargeOrder {
                size,
                max: MAX_ORDER_SIZE,
            },
        ));
    }

    let mut remaining = stocks.to_vec();
    for &(book, quantity) in items {
        if remaining[book] < quantity {
            // Book ids are only known at run time; the caller fills them in.
            return Err((
                Some(book),
                OrderError::OutOfStock {
                    book_id: BookId::default(),
                    requested: quantity,
                    available: remaining[book],
                },
            ));
        }
        remaining[book] -= quantity;
    }
    Ok(remaining)
}

fn scenario() -> impl Strategy<Value = (Vec<u32>, Vec<(usize, u32)>)> {
    prop::collection::vec(0u32..=3, 1..=4).prop_flat_map(|stocks| {
        let books = stocks.len();
        let items = prop::collection::vec((0..books, 1u32..=3), 0..=4);
        (Just(stocks), items)
    })
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build runtime")
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Placement matches the sequential model, and is all-or-nothing.
    #[test]
    fn placement_matches_sequential_model((stocks, items) in scenario()) {
        let expected = expected_outcome(&stocks, &items);

        let (result, after, placed) = runtime().block_on(async {
            let system = ShopSystem::new();
            let mut ids = Vec::new();
            for (n, &available) in stocks.iter().enumerate() {
                let id = system
                    .catalog
                    .add_book(BookCreate { title: format!("Book {n}"), available })
                    .await
                    .unwrap();
                ids.push(id);
            }

            let mut order = Order::new();
            for &(book, quantity) in &items {
                order.add_item(ids[book], quantity).unwrap();
            }

            let result = system.orders.place_order(Some(order)).await;

            let mut after = Vec::new();
            for id in &ids {
                after.push(system.catalog.check_stock(*id).await.unwrap());
            }
            let placed = system.orders.find_all().await.unwrap().len();
            system.shutdown().await.unwrap();

            (result.map(|_| ()).map_err(|e| (ids, e)), after, placed)
        });

        match (expected, result) {
            (Ok(remaining), Ok(())) => {
                prop_assert_eq!(after, remaining);
                prop_assert_eq!(placed, 1);
            }
            (Err((book, expected)), Err((ids, actual))) => {
                let expected = match (book, expected) {
                    (Some(book), OrderError::OutOfStock { requested, available, .. }) => {
                        OrderError::OutOfStock { book_id: ids[book], requested, available }
                    }
                    (_, other) => other,
                };
                prop_assert_eq!(actual, expected);
                prop_assert_eq!(after, stocks);
                prop_assert_eq!(placed, 0);
            }
            (expected, actual) => {
                prop_assert!(
                    false,
                    "model and store disagree: expected {:?}, got {:?}",
                    expected,
                    actual.map_err(|(_, e)| e)
                );
            }
        }
    }

    /// Placing the same rejected order twice gives the same error and leaves stock alone.
    #[test]
    fn rejection_is_idempotent(available in 0u32..=2, extra in 1u32..=2) {
        let requested = (available + extra).min(3);
        prop_assume!(requested > available);

        let (first, second, left) = runtime().block_on(async {
            let system = ShopSystem::new();
            let id = system
                .catalog
                .add_book(BookCreate { title: "Scarce".to_string(), available })
                .await
                .unwrap();

            let mut order = Order::new();
            order.add_item(id, requested).unwrap();

            let first = system.orders.place_order(Some(order.clone())).await;
            let second = system.orders.place_order(Some(order)).await;
            let left = system.catalog.check_stock(id).await.unwrap();
            system.shutdown().await.unwrap();
            (first, second, left)
        });

        let out_of_stock = matches!(first, Err(OrderError::OutOfStock { .. }));
        prop_assert!(out_of_stock, "expected OutOfStock, got {:?}", first);
        prop_assert_eq!(first, second);
        prop_assert_eq!(left, available);
    }
}
