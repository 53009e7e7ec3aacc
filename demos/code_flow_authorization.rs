//! Walks Intuit's OAuth 2 authorization-code flow end to end: prints the
//! consent URL, receives the redirect on a local server, exchanges the code,
//! and runs a first query against the connected company.
//!
//! Requires `QB_CLIENT_ID` and `QB_CLIENT_SECRET` in the environment, with
//! `http://localhost:5000/callback` registered as a redirect URI for the app.

#[macro_use]
extern crate tracing;

use std::str::FromStr;

use anyhow::Result;
use serde::Deserialize;
use url::Url;
use warp::Filter;

use quickbooks_rs::entities::Customer;
use quickbooks_rs::{Environment, KeyPair, Query, QueryOptions, QuickBooks, Scope};

#[derive(Clone, Debug, Deserialize)]
struct CallbackArgs {
    code: String,
    state: Option<String>,
    #[serde(rename = "realmId")]
    realm_id: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Local server to catch the OAuth redirect.
    let (callback_tx, mut callback_rx) = tokio::sync::mpsc::channel::<CallbackArgs>(1);
    let callback = warp::get()
        .and(warp::path("callback"))
        .and(warp::query::<CallbackArgs>())
        .map(move |args: CallbackArgs| {
            let callback_tx = callback_tx.clone();
            tokio::spawn(async move {
                let _ = callback_tx.send(args).await;
            });
            warp::reply::html("Connected to QuickBooks. You can close this tab.")
        });
    tokio::spawn(warp::serve(callback).run(([127, 0, 0, 1], 5000)));

    let key_pair = KeyPair::from_env();
    let redirect_url = Url::from_str("http://localhost:5000/callback")?;

    let (authorize_url, csrf_token) = QuickBooks::authorize_url(
        key_pair.clone(),
        redirect_url.clone(),
        &Scope::accounting_only(),
    );
    info!("Connect to QuickBooks: {authorize_url}");

    info!("waiting for the OAuth callback...");
    let args = callback_rx.recv().await.expect("callback channel closed");
    assert_eq!(args.state.as_deref(), Some(csrf_token.secret().as_str()));

    // The callback carries the company (realm) id selected during consent.
    let qb = QuickBooks::from_authorization_code(
        key_pair,
        redirect_url,
        args.code,
        args.realm_id,
        Environment::Sandbox,
    )
    .await?;

    let customers = Customer::all(&qb, &QueryOptions::default()).await?;
    info!("found {} customers", customers.len());

    Ok(())
}
