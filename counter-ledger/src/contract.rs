// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(target_arch = "wasm32", no_main)]

mod state;

use counter_ledger::{CountChange, CounterOperation, COUNT_CHANGES_STREAM_NAME, GUARD_MESSAGE};
use linera_sdk::{
    linera_base_types::{StreamName, WithContractAbi},
    views::{RootView, View},
    Contract, ContractRuntime,
};

use self::state::CounterState;

pub struct CounterLedgerContract {
    state: CounterState,
    runtime: ContractRuntime<Self>,
}

linera_sdk::contract!(CounterLedgerContract);

impl WithContractAbi for CounterLedgerContract {
    type Abi = counter_ledger::CounterLedgerAbi;
}

impl Contract for CounterLedgerContract {
    type Message = ();
    type InstantiationArgument = ();
    type Parameters = ();
    type EventValue = CountChange;

    async fn load(runtime: ContractRuntime<Self>) -> Self {
        let state = CounterState::load(runtime.root_view_storage_context())
            .await
            .expect("Failed to load state");
        CounterLedgerContract { state, runtime }
    }

    async fn instantiate(&mut self, _argument: ()) {
        // Validate that the application parameters were configured correctly.
        self.runtime.application_parameters();
        // The ledger always starts at zero.
        self.state.count.set(0);
    }

    async fn execute_operation(&mut self, operation: CounterOperation) -> u64 {
        let count = *self.state.count.get();
        let new_count = match operation {
            CounterOperation::Increment => count + 1,
            CounterOperation::Decrement => {
                // Rejecting here aborts the whole operation: no state change
                // is committed and no event is recorded.
                assert!(count > 0, "{GUARD_MESSAGE}");
                count - 1
            }
        };
        self.state.count.set(new_count);
        self.runtime.emit(
            StreamName::from(COUNT_CHANGES_STREAM_NAME.to_vec()),
            &CountChange { new_count },
        );
        new_count
    }

    async fn execute_message(&mut self, _message: ()) {
        panic!("CounterLedger application doesn't support any cross-chain messages");
    }

    async fn store(mut self) {
        self.state.save().await.expect("Failed to save state");
    }
}
