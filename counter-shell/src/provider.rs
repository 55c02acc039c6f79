// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use url::Url;

/// Identifier of the wallet this shell knows how to drive.
pub const RECOGNIZED_WALLET_ID: &str = "io.linera";

/// A wallet provider visible to the shell, addressed by its node service.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WalletProvider {
    pub id: String,
    pub name: String,
    pub url: Url,
}

/// Returns the recognized wallet provider, when exactly one is present.
///
/// With no recognized provider the connect affordance stays disabled; this
/// is an informational state, not an error.
pub fn recognized(providers: &[WalletProvider]) -> Option<&WalletProvider> {
    let mut matches = providers
        .iter()
        .filter(|provider| provider.id == RECOGNIZED_WALLET_ID);
    match (matches.next(), matches.next()) {
        (Some(provider), None) => Some(provider),
        _ => None,
    }
}
