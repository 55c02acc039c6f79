// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the Counter Ledger application.

#![cfg(not(target_arch = "wasm32"))]

use counter_ledger::{CounterLedgerAbi, CounterOperation};
use linera_sdk::test::{QueryOutcome, TestValidator};

/// Tests the full lifecycle on a single microchain.
///
/// Deploys a fresh ledger, checks that it reads 0, increments it to 1,
/// decrements it back to 0, and verifies that a further decrement is
/// rejected without changing the state.
#[tokio::test]
async fn single_chain_test() {
    let (_validator, application_id, chain) =
        TestValidator::with_current_application::<CounterLedgerAbi, (), ()>((), ()).await;

    let QueryOutcome { response, .. } =
        chain.graphql_query(application_id, "query { count }").await;
    assert_eq!(response["count"].as_u64(), Some(0));

    chain
        .add_block(|block| {
            block.with_operation(application_id, CounterOperation::Increment);
        })
        .await;

    let QueryOutcome { response, .. } =
        chain.graphql_query(application_id, "query { count }").await;
    assert_eq!(response["count"].as_u64(), Some(1));

    chain
        .add_block(|block| {
            block.with_operation(application_id, CounterOperation::Decrement);
        })
        .await;

    let QueryOutcome { response, .. } =
        chain.graphql_query(application_id, "query { count }").await;
    assert_eq!(response["count"].as_u64(), Some(0));

    // Decrementing at zero must reject the whole block.
    let result = chain
        .try_add_block(|block| {
            block.with_operation(application_id, CounterOperation::Decrement);
        })
        .await;
    assert!(result.is_err());

    let QueryOutcome { response, .. } =
        chain.graphql_query(application_id, "query { count }").await;
    assert_eq!(response["count"].as_u64(), Some(0));
}

/// Tests that mutations scheduled through the GraphQL service are applied.
#[tokio::test]
async fn graphql_mutations() {
    let (_validator, application_id, chain) =
        TestValidator::with_current_application::<CounterLedgerAbi, (), ()>((), ()).await;

    chain
        .graphql_mutation(application_id, "mutation { increment }")
        .await;
    chain
        .graphql_mutation(application_id, "mutation { increment }")
        .await;
    chain
        .graphql_mutation(application_id, "mutation { decrement }")
        .await;

    let QueryOutcome { response, .. } =
        chain.graphql_query(application_id, "query { count }").await;
    assert_eq!(response["count"].as_u64(), Some(1));
}
