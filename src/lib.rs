//! # quickbooks-rs
//!
//! A Rust client library for the QuickBooks Online API.
//!
//! Entity types (`Customer`, `Invoice`, `Bill`, …) are plain serde structs.
//! Remote operations are provided by small capability traits ([`Read`],
//! [`Query`], [`Save`], [`Delete`], [`SendEmail`], [`Void`], [`DownloadPdf`]),
//! each attached to an entity with an empty `impl` block, so a type carries
//! exactly the operations the API supports for it.
//!
//! ```ignore
//! use quickbooks_rs::{Environment, QuickBooks, Query, QueryOptions, Save};
//! use quickbooks_rs::entities::Customer;
//!
//! let qb = QuickBooks::new(access_token, realm_id, Environment::Sandbox);
//!
//! // SELECT * FROM Customer MAXRESULTS 100
//! let customers = Customer::all(&qb, &QueryOptions::default()).await?;
//!
//! let mut customer = Customer::default();
//! customer.display_name = Some("Acme Consulting".into());
//! let saved = customer.save(&qb, None).await?;
//! assert_eq!(customer.id, saved.id);
//! ```
//!
//! Authentication uses Intuit's OAuth 2 authorization-code flow via
//! [`QuickBooks::authorize_url`] and [`QuickBooks::from_authorization_code`];
//! see `demos/code_flow_authorization.rs` for the full walk-through.

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)]

#[macro_use]
extern crate tracing;

pub mod client;
pub mod endpoints;
pub mod entities;
pub mod error;
pub mod oauth;
pub mod operations;
pub mod query;
pub mod scope;
pub mod serialization;
pub mod utils;

pub use client::{QuickBooks, generate_request_id};
pub use endpoints::Environment;
pub use entities::*;
pub use error::{Error, Result};
pub use oauth::KeyPair;
pub use operations::{
    Delete, DeleteNoId, DownloadPdf, Preference, QBEntity, QBObject, Query, QueryOptions, Read,
    Save, SaveNoId, SendEmail, Void,
};
pub use query::{FilterValue, build_choose_clause, build_where_clause};
pub use scope::Scope;
pub use serialization::JsonCodec;
