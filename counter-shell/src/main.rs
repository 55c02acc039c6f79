// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write as _};

use anyhow::Result;
use clap::Parser;
use counter_ledger::CounterOperation;
use counter_shell::{
    client::NodeServiceClient,
    notification::{Notification, NotificationSink},
    provider::{recognized, WalletProvider, RECOGNIZED_WALLET_ID},
    Shell,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "Counter Shell",
    about = "A terminal front end for the Counter Ledger application."
)]
struct Opt {
    /// Wallet providers available to the shell, as `id=name=url` triples.
    #[arg(long = "wallet", value_parser = parse_provider)]
    wallets: Vec<WalletProvider>,

    /// Chain hosting the deployed ledger.
    #[arg(long)]
    chain_id: String,

    /// Application ID of the deployed ledger.
    #[arg(long)]
    application_id: String,
}

fn parse_provider(value: &str) -> Result<WalletProvider, String> {
    let mut parts = value.splitn(3, '=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(id), Some(name), Some(url)) => {
            let url = Url::parse(url).map_err(|error| error.to_string())?;
            Ok(WalletProvider {
                id: id.to_owned(),
                name: name.to_owned(),
                url,
            })
        }
        _ => Err("expected `id=name=url`".to_owned()),
    }
}

struct TerminalNotifier;

impl NotificationSink for TerminalNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification {
            Notification::Success(message) => println!("[ok] {message}"),
            Notification::Failure(message) => println!("[failed] {message}"),
        }
    }
}

type TerminalShell = Shell<NodeServiceClient, TerminalNotifier>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let opt = Opt::parse();
    let provider = recognized(&opt.wallets).cloned();
    let mut shell = provider.as_ref().map(|provider| {
        Shell::new(
            NodeServiceClient::new(
                provider.url.clone(),
                opt.chain_id.clone(),
                opt.application_id.clone(),
            ),
            TerminalNotifier,
        )
    });

    println!("Counter dApp — type `help` for commands, `exit` to quit.");
    render(shell.as_ref(), provider.as_ref());

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            break;
        }
        match input.trim() {
            "exit" => break,
            "help" => {
                println!("commands: connect, disconnect, read, + (inc), - (dec), exit");
                continue;
            }
            "connect" => match &mut shell {
                Some(shell) => report(shell.connect().await),
                None => println!("[unavailable] {RECOGNIZED_WALLET_ID} wallet not found"),
            },
            "disconnect" => {
                if let Some(shell) = &mut shell {
                    shell.disconnect();
                }
            }
            "read" | "r" => {
                if let Some(shell) = &mut shell {
                    shell.refresh_count().await;
                }
            }
            "+" | "inc" => {
                if let Some(shell) = &mut shell {
                    report(shell.submit(CounterOperation::Increment).await);
                }
            }
            "-" | "dec" => {
                if let Some(shell) = &mut shell {
                    report(shell.submit(CounterOperation::Decrement).await);
                }
            }
            "" => {}
            other => println!("unknown command: {other}"),
        }
        render(shell.as_ref(), provider.as_ref());
    }

    Ok(())
}

fn report<E: std::fmt::Display>(result: Result<(), E>) {
    if let Err(error) = result {
        println!("[disabled] {error}");
    }
}

fn render(shell: Option<&TerminalShell>, provider: Option<&WalletProvider>) {
    let Some(shell) = shell else {
        println!("count: ...  |  {RECOGNIZED_WALLET_ID} wallet not found; connect disabled");
        return;
    };
    let session = shell.session();
    let connection = match session.address() {
        Some(address) => format!("connected as {address}"),
        None => match provider {
            Some(provider) => format!("disconnected; `connect` uses {}", provider.name),
            None => "disconnected".to_owned(),
        },
    };
    let buttons = if session.mutations_enabled() {
        format!(
            "[{}] [{}]",
            session.mutation_label(CounterOperation::Decrement),
            session.mutation_label(CounterOperation::Increment),
        )
    } else {
        format!(
            "[{}] [{}] (disabled)",
            session.mutation_label(CounterOperation::Decrement),
            session.mutation_label(CounterOperation::Increment),
        )
    };
    println!(
        "count: {}  |  {}  |  {}",
        shell.displayed_count(),
        connection,
        buttons,
    );
}
