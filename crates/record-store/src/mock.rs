//! # Mock Store & Testing Guide
//!
//! `MockStore` hands out a real [`StoreClient`] whose requests are answered from a queue of
//! expectations instead of a [`StoreActor`](crate::StoreActor). It lets you test code that
//! drives the store (such as a service running a transaction) deterministically, inject store
//! failures, and check exactly which requests were made and in what order.
//!
//! ## When to use the Mock vs the Real Store
//!
//! | Feature | MockStore | StoreActor |
//! |---------|-----------|------------|
//! | **State** | None (expectations) | Real rows, undo log |
//! | **Use Case** | Asserting the request sequence | Testing outcomes end to end |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Example
//!
//! ```rust
//! use record_store::mock::MockStore;
//! use record_store::{Record, StoreError};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
//! struct Shelf { id: u32, items: u32 }
//!
//! impl Record for Shelf {
//!     type Id = u32;
//!     const TABLE: &'static str = "shelves";
//!     fn id(&self) -> &u32 { &self.id }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::new();
//!     mock.expect_begin().return_ok(());
//!     mock.expect_find::<Shelf>(&1).return_ok(Some(Shelf { id: 1, items: 4 }));
//!     mock.expect_save::<Shelf>(&1).return_err(StoreError::ActorClosed);
//!     mock.expect_rollback().return_ok(());
//!
//!     let store = mock.client();
//!     let tx = store.begin().await.unwrap();
//!     let mut shelf: Shelf = tx.find_by_id(&1).await.unwrap().unwrap();
//!     shelf.items -= 1;
//!     assert_eq!(tx.save(&shelf).await, Err(StoreError::ActorClosed));
//!     tx.rollback().await.unwrap();
//!
//!     assert_eq!(mock.saved::<Shelf>(), vec![Shelf { id: 1, items: 3 }]);
//!     mock.verify();
//! }
//! ```

use crate::error::StoreError;
use crate::message::{StoreRequest, TxGrant, TxId};
use crate::record::{Record, RowKey};
use crate::StoreClient;
use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// An expected request and the response to return for it.
enum Expectation {
    Begin {
        response: Result<(), StoreError>,
    },
    Find {
        key: RowKey,
        response: Result<Option<Value>, StoreError>,
    },
    Save {
        key: RowKey,
        response: Result<(), StoreError>,
    },
    Insert {
        table: &'static str,
        response: Result<(), StoreError>,
    },
    Commit {
        response: Result<(), StoreError>,
    },
    Rollback {
        response: Result<(), StoreError>,
    },
    Get {
        key: RowKey,
        response: Result<Option<Value>, StoreError>,
    },
    List {
        table: &'static str,
        response: Result<Vec<Value>, StoreError>,
    },
}

impl Expectation {
    fn describe(&self) -> String {
        match self {
            Expectation::Begin { .. } => "Begin".to_string(),
            Expectation::Find { key, .. } => format!("Find {key}"),
            Expectation::Save { key, .. } => format!("Save {key}"),
            Expectation::Insert { table, .. } => format!("Insert into {table}"),
            Expectation::Commit { .. } => "Commit".to_string(),
            Expectation::Rollback { .. } => "Rollback".to_string(),
            Expectation::Get { key, .. } => format!("Get {key}"),
            Expectation::List { table, .. } => format!("List {table}"),
        }
    }
}

#[derive(Default)]
struct Journal {
    saved: Vec<(RowKey, Value)>,
    inserted: Vec<(RowKey, Value)>,
    failures: Vec<String>,
}

type Expectations = Arc<Mutex<VecDeque<Expectation>>>;

/// A mock store with expectation tracking for fluent testing.
///
/// Requests must arrive in the order the expectations were registered. A request that does not
/// match the next expectation is recorded as a failure and left unanswered, so the caller sees
/// [`StoreError::ActorDropped`]; [`verify`](Self::verify) then panics with the details.
pub struct MockStore {
    client: StoreClient,
    expectations: Expectations,
    journal: Arc<Mutex<Journal>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    /// Creates a new mock store with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest>(100);
        let expectations: Expectations = Arc::new(Mutex::new(VecDeque::new()));
        let journal = Arc::new(Mutex::new(Journal::default()));

        let pending = expectations.clone();
        let recorded = journal.clone();
        let handle = tokio::spawn(async move {
            let mut next_tx = 1;
            while let Some(request) = receiver.recv().await {
                let expectation = pending.lock().unwrap().pop_front();
                let mut log = recorded.lock().unwrap();

                match (request, expectation) {
                    (StoreRequest::Begin { respond_to }, Some(Expectation::Begin { response })) => {
                        let id = TxId(next_tx);
                        next_tx += 1;
                        let _ = respond_to.send(response.map(|()| {
                            let (guard, _abandoned) = oneshot::channel();
                            TxGrant { id, guard }
                        }));
                    }
                    (
                        StoreRequest::Find {
                            key, respond_to, ..
                        },
                        Some(Expectation::Find {
                            key: expected,
                            response,
                        }),
                    )
                    | (
                        StoreRequest::Get { key, respond_to },
                        Some(Expectation::Get {
                            key: expected,
                            response,
                        }),
                    ) => {
                        if key != expected {
                            log.failures
                                .push(format!("read {key}, expected read of {expected}"));
                        }
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Save {
                            key,
                            row,
                            respond_to,
                            ..
                        },
                        Some(Expectation::Save {
                            key: expected,
                            response,
                        }),
                    ) => {
                        if key != expected {
                            log.failures
                                .push(format!("saved {key}, expected save of {expected}"));
                        }
                        log.saved.push((key, row));
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Insert {
                            key,
                            row,
                            respond_to,
                            ..
                        },
                        Some(Expectation::Insert { table, response }),
                    ) => {
                        if key.table != table {
                            log.failures
                                .push(format!("inserted {key}, expected insert into {table}"));
                        }
                        log.inserted.push((key, row));
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::Commit { respond_to, .. },
                        Some(Expectation::Commit { response }),
                    )
                    | (
                        StoreRequest::Rollback { respond_to, .. },
                        Some(Expectation::Rollback { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StoreRequest::List { table, respond_to },
                        Some(Expectation::List {
                            table: expected,
                            response,
                        }),
                    ) => {
                        if table != expected {
                            log.failures
                                .push(format!("listed {table}, expected list of {expected}"));
                        }
                        let _ = respond_to.send(response);
                    }
                    (request, Some(expectation)) => {
                        log.failures.push(format!(
                            "unexpected request {request:?}, expected {}",
                            expectation.describe()
                        ));
                    }
                    (request, None) => {
                        log.failures
                            .push(format!("unexpected request {request:?}, none expected"));
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            journal,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StoreClient {
        self.client.clone()
    }

    /// Expects a `begin`.
    pub fn expect_begin(&mut self) -> ExpectationBuilder<()> {
        self.builder(|response| Expectation::Begin { response })
    }

    /// Expects a transactional read of the given record.
    pub fn expect_find<R: Record>(&mut self, id: &R::Id) -> ExpectationBuilder<Option<R>> {
        let key = RowKey::of::<R>(id);
        self.builder(move |response: Result<Option<R>, StoreError>| Expectation::Find {
            key,
            response: response.map(|row| row.as_ref().map(encode)),
        })
    }

    /// Expects a `save` of the given record.
    pub fn expect_save<R: Record>(&mut self, id: &R::Id) -> ExpectationBuilder<()> {
        let key = RowKey::of::<R>(id);
        self.builder(move |response| Expectation::Save { key, response })
    }

    /// Expects an `insert` into `R`'s table. The id is not checked, it is usually generated.
    pub fn expect_insert<R: Record>(&mut self) -> ExpectationBuilder<()> {
        self.builder(|response| Expectation::Insert {
            table: R::TABLE,
            response,
        })
    }

    /// Expects a `commit`.
    pub fn expect_commit(&mut self) -> ExpectationBuilder<()> {
        self.builder(|response| Expectation::Commit { response })
    }

    /// Expects a `rollback`.
    pub fn expect_rollback(&mut self) -> ExpectationBuilder<()> {
        self.builder(|response| Expectation::Rollback { response })
    }

    /// Expects a committed read of the given record.
    pub fn expect_get<R: Record>(&mut self, id: &R::Id) -> ExpectationBuilder<Option<R>> {
        let key = RowKey::of::<R>(id);
        self.builder(move |response: Result<Option<R>, StoreError>| Expectation::Get {
            key,
            response: response.map(|row| row.as_ref().map(encode)),
        })
    }

    /// Expects a committed scan of `R`'s table.
    pub fn expect_list<R: Record>(&mut self) -> ExpectationBuilder<Vec<R>> {
        self.builder(|response: Result<Vec<R>, StoreError>| Expectation::List {
            table: R::TABLE,
            response: response.map(|rows| rows.iter().map(encode).collect()),
        })
    }

    /// Records of type `R` passed to `save`, in request order.
    pub fn saved<R: Record>(&self) -> Vec<R> {
        let journal = self.journal.lock().unwrap();
        decode_rows(&journal.saved, R::TABLE)
    }

    /// Records of type `R` passed to `insert`, in request order.
    pub fn inserted<R: Record>(&self) -> Vec<R> {
        let journal = self.journal.lock().unwrap();
        decode_rows(&journal.inserted, R::TABLE)
    }

    /// Verifies that all expectations were met and no unexpected request arrived.
    pub fn verify(&self) {
        let journal = self.journal.lock().unwrap();
        if !journal.failures.is_empty() {
            panic!("Mock store failures:\n{}", journal.failures.join("\n"));
        }
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            let remaining: Vec<String> = exps.iter().map(Expectation::describe).collect();
            panic!(
                "Not all expectations were met. {} remaining: {}",
                exps.len(),
                remaining.join(", ")
            );
        }
    }

    fn builder<T>(
        &mut self,
        make: impl FnOnce(Result<T, StoreError>) -> Expectation + Send + 'static,
    ) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            make: Box::new(make),
            _response: PhantomData,
        }
    }
}

/// Builder that completes an expectation with its response.
pub struct ExpectationBuilder<T> {
    expectations: Expectations,
    make: Box<dyn FnOnce(Result<T, StoreError>) -> Expectation + Send>,
    _response: PhantomData<fn() -> T>,
}

impl<T> ExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, StoreError>) {
        let expectation = (self.make)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

fn encode<R: Serialize>(record: &R) -> Value {
    serde_json::to_value(record).expect("mock records must serialize")
}

fn decode_rows<R: Record>(rows: &[(RowKey, Value)], table: &str) -> Vec<R> {
    rows.iter()
        .filter(|(key, _)| key.table == table)
        .map(|(_, row)| serde_json::from_value(row.clone()).expect("mock rows must decode"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Shelf {
        id: u32,
        items: u32,
    }

    impl Record for Shelf {
        type Id = u32;
        const TABLE: &'static str = "shelves";

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    #[tokio::test]
    async fn test_mock_store_answers_in_order() {
        let mut mock = MockStore::new();
        mock.expect_get::<Shelf>(&7).return_ok(Some(Shelf { id: 7, items: 2 }));
        mock.expect_list::<Shelf>().return_ok(vec![]);

        let store = mock.client();
        let shelf: Option<Shelf> = store.get(&7).await.unwrap();
        assert_eq!(shelf, Some(Shelf { id: 7, items: 2 }));
        assert!(store.list::<Shelf>().await.unwrap().is_empty());

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_store_records_inserts() {
        let mut mock = MockStore::new();
        mock.expect_begin().return_ok(());
        mock.expect_insert::<Shelf>().return_ok(());
        mock.expect_commit().return_ok(());

        let store = mock.client();
        let tx = store.begin().await.unwrap();
        tx.insert(&mut Shelf { id: 3, items: 9 }).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(mock.inserted::<Shelf>(), vec![Shelf { id: 3, items: 9 }]);
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "unexpected request")]
    async fn test_mock_store_flags_unexpected_requests() {
        let mock = MockStore::new();
        let store = mock.client();

        let result = store.begin().await;
        assert_eq!(result.err(), Some(StoreError::ActorDropped));

        mock.verify();
    }
}
