// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(target_arch = "wasm32", no_main)]

mod state;

use std::sync::Arc;

use async_graphql::{EmptySubscription, Object, Request, Response, Schema};
use counter_ledger::CounterOperation;
use linera_sdk::{
    linera_base_types::WithServiceAbi, views::View, Service, ServiceRuntime,
};

use self::state::CounterState;

pub struct CounterLedgerService {
    state: Arc<CounterState>,
    runtime: Arc<ServiceRuntime<Self>>,
}

linera_sdk::service!(CounterLedgerService);

impl WithServiceAbi for CounterLedgerService {
    type Abi = counter_ledger::CounterLedgerAbi;
}

impl Service for CounterLedgerService {
    type Parameters = ();

    async fn new(runtime: ServiceRuntime<Self>) -> Self {
        let state = CounterState::load(runtime.root_view_storage_context())
            .await
            .expect("Failed to load state");
        CounterLedgerService {
            state: Arc::new(state),
            runtime: Arc::new(runtime),
        }
    }

    async fn handle_query(&self, request: Request) -> Response {
        let schema = Schema::build(
            QueryRoot {
                count: *self.state.count.get(),
            },
            MutationRoot {
                runtime: self.runtime.clone(),
            },
            EmptySubscription,
        )
        .finish();
        schema.execute(request).await
    }
}

struct QueryRoot {
    count: u64,
}

#[Object]
impl QueryRoot {
    /// The current value of the counter.
    async fn count(&self) -> &u64 {
        &self.count
    }
}

struct MutationRoot {
    runtime: Arc<ServiceRuntime<CounterLedgerService>>,
}

#[Object]
impl MutationRoot {
    /// Schedules an operation that increases the count by one.
    async fn increment(&self) -> [u8; 0] {
        self.runtime
            .schedule_operation(&CounterOperation::Increment);
        []
    }

    /// Schedules an operation that decreases the count by one.
    async fn decrement(&self) -> [u8; 0] {
        self.runtime
            .schedule_operation(&CounterOperation::Decrement);
        []
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_graphql::{Request, Response, Value};
    use futures::FutureExt as _;
    use linera_sdk::{util::BlockingWait, views::View, Service, ServiceRuntime};
    use serde_json::json;

    use super::{CounterLedgerService, CounterState};

    #[test]
    fn query_returns_current_count() {
        let count = 61_098_721_u64;
        let runtime = Arc::new(ServiceRuntime::<CounterLedgerService>::new());
        let mut state = CounterState::load(runtime.root_view_storage_context())
            .blocking_wait()
            .expect("Failed to read from mock key value store");
        state.count.set(count);

        let service = CounterLedgerService {
            state: Arc::new(state),
            runtime,
        };
        let request = Request::new("{ count }");

        let response = service
            .handle_query(request)
            .now_or_never()
            .expect("Query should not await anything");

        let expected =
            Response::new(Value::from_json(json!({"count": 61098721})).unwrap());
        assert_eq!(response, expected)
    }

    #[test]
    fn fresh_state_reads_zero() {
        let runtime = Arc::new(ServiceRuntime::<CounterLedgerService>::new());
        let state = CounterState::load(runtime.root_view_storage_context())
            .blocking_wait()
            .expect("Failed to read from mock key value store");

        let service = CounterLedgerService {
            state: Arc::new(state),
            runtime,
        };

        let response = service
            .handle_query(Request::new("{ count }"))
            .now_or_never()
            .expect("Query should not await anything");

        let expected = Response::new(Value::from_json(json!({"count": 0})).unwrap());
        assert_eq!(response, expected)
    }
}
