use bookshop::model::{Book, Order};
use bookshop::orders::{OrderError, OrderPlacementService};
use record_store::mock::MockStore;
use record_store::StoreError;

/// Service under test with a mocked store.
///
/// These tests pin down the exact sequence of store requests a placement makes, and inject
/// store failures that are hard to provoke with the real actor.
fn service(mock: &MockStore) -> OrderPlacementService {
    OrderPlacementService::new(mock.client())
}

#[tokio::test]
async fn test_size_rejections_never_touch_the_store() {
    let mock = MockStore::new();
    let orders = service(&mock);
    let book = Book::new("Any", 100);

    let mut too_large = Order::new();
    too_large.add_item(book.id, 3).unwrap();
    too_large.add_item(book.id, 1).unwrap();

    assert_eq!(
        orders.place_order(Some(too_large)).await,
        Err(OrderError::TooLargeOrder { size: 4, max: 3 })
    );
    assert_eq!(
        orders.place_order(Some(Order::new())).await,
        Err(OrderError::EmptyOrder)
    );
    assert_eq!(orders.place_order(None).await, Err(OrderError::EmptyOrder));

    mock.verify();
}

#[tokio::test]
async fn test_accepted_order_decrements_and_inserts_in_one_transaction() {
    let mut mock = MockStore::new();
    let first = Book::new("First", 2);
    let second = Book::new("Second", 1);

    mock.expect_begin().return_ok(());
    mock.expect_find::<Book>(&first.id).return_ok(Some(first.clone()));
    mock.expect_save::<Book>(&first.id).return_ok(());
    mock.expect_find::<Book>(&second.id).return_ok(Some(second.clone()));
    mock.expect_save::<Book>(&second.id).return_ok(());
    mock.expect_insert::<Order>().return_ok(());
    mock.expect_commit().return_ok(());

    let mut order = Order::new();
    order.add_item(first.id, 2).unwrap();
    order.add_item(second.id, 1).unwrap();

    let placed = service(&mock).place_order(Some(order)).await.unwrap();
    assert!(placed.created_at().is_some());

    let saved = mock.saved::<Book>();
    assert_eq!(saved.len(), 2);
    assert_eq!((saved[0].id, saved[0].available), (first.id, 0));
    assert_eq!((saved[1].id, saved[1].available), (second.id, 0));

    // The timestamp is part of the inserted row.
    assert_eq!(mock.inserted::<Order>(), vec![placed]);
    mock.verify();
}

#[tokio::test]
async fn test_out_of_stock_stops_the_scan_and_rolls_back() {
    let mut mock = MockStore::new();
    let first = Book::new("First", 5);
    let empty = Book::new("Empty", 0);
    let never_read = Book::new("Never Read", 5);

    mock.expect_begin().return_ok(());
    mock.expect_find::<Book>(&first.id).return_ok(Some(first.clone()));
    mock.expect_save::<Book>(&first.id).return_ok(());
    mock.expect_find::<Book>(&empty.id).return_ok(Some(empty.clone()));
    mock.expect_rollback().return_ok(());

    let mut order = Order::new();
    order.add_item(first.id, 1).unwrap();
    order.add_item(empty.id, 1).unwrap();
    order.add_item(never_read.id, 1).unwrap();

    let result = service(&mock).place_order(Some(order)).await;

    assert_eq!(
        result,
        Err(OrderError::OutOfStock {
            book_id: empty.id,
            requested: 1,
            available: 0
        })
    );
    assert!(mock.inserted::<Order>().is_empty());
    mock.verify();
}

#[tokio::test]
async fn test_missing_book_is_unknown_and_rolls_back() {
    let mut mock = MockStore::new();
    let ghost = Book::new("Ghost", 1);

    mock.expect_begin().return_ok(());
    mock.expect_find::<Book>(&ghost.id).return_ok(None);
    mock.expect_rollback().return_ok(());

    let mut order = Order::new();
    order.add_item(ghost.id, 1).unwrap();

    let result = service(&mock).place_order(Some(order)).await;

    assert_eq!(result, Err(OrderError::UnknownBook(ghost.id)));
    mock.verify();
}

#[tokio::test]
async fn test_store_failure_propagates_unchanged_and_rolls_back() {
    let mut mock = MockStore::new();
    let book = Book::new("Flaky", 3);
    let failure = StoreError::Codec("corrupt row".to_string());

    mock.expect_begin().return_ok(());
    mock.expect_find::<Book>(&book.id).return_err(failure.clone());
    mock.expect_rollback().return_ok(());

    let mut order = Order::new();
    order.add_item(book.id, 1).unwrap();

    let result = service(&mock).place_order(Some(order)).await;

    assert_eq!(result, Err(OrderError::Store(failure)));
    mock.verify();
}

#[tokio::test]
async fn test_insert_failure_rolls_back_decrements() {
    let mut mock = MockStore::new();
    let book = Book::new("Dup", 3);

    mock.expect_begin().return_ok(());
    mock.expect_find::<Book>(&book.id).return_ok(Some(book.clone()));
    mock.expect_save::<Book>(&book.id).return_ok(());
    mock.expect_insert::<Order>().return_err(StoreError::DuplicateKey {
        table: "orders",
        id: "taken".to_string(),
    });
    mock.expect_rollback().return_ok(());

    let mut order = Order::new();
    order.add_item(book.id, 1).unwrap();

    let result = service(&mock).place_order(Some(order)).await;

    assert!(matches!(
        result,
        Err(OrderError::Store(StoreError::DuplicateKey { .. }))
    ));
    mock.verify();
}

#[tokio::test]
async fn test_commit_failure_is_reported() {
    let mut mock = MockStore::new();
    let book = Book::new("Doomed", 1);

    mock.expect_begin().return_ok(());
    mock.expect_find::<Book>(&book.id).return_ok(Some(book.clone()));
    mock.expect_save::<Book>(&book.id).return_ok(());
    mock.expect_insert::<Order>().return_ok(());
    mock.expect_commit().return_err(StoreError::ActorDropped);

    let mut order = Order::new();
    order.add_item(book.id, 1).unwrap();

    let result = service(&mock).place_order(Some(order)).await;

    assert_eq!(result, Err(OrderError::Store(StoreError::ActorDropped)));
    mock.verify();
}

#[tokio::test]
async fn test_begin_failure_is_reported() {
    let mut mock = MockStore::new();
    let book = Book::new("Unreachable", 1);

    mock.expect_begin().return_err(StoreError::ActorClosed);

    let mut order = Order::new();
    order.add_item(book.id, 1).unwrap();

    let result = service(&mock).place_order(Some(order)).await;

    assert_eq!(result, Err(OrderError::Store(StoreError::ActorClosed)));
    mock.verify();
}
