//! Capability traits providing the remote operations an entity type supports.
//!
//! Each trait is a narrow bundle of operations with default method bodies;
//! an entity type opts in with an empty `impl` block:
//!
//! ```ignore
//! impl Read for Customer {}
//! impl Query for Customer {}
//! impl Save for Customer {}
//! ```
//!
//! Every method takes an explicit [`QuickBooks`] transport handle; the
//! traits own no state and issue no retries of their own.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::client::QuickBooks;
use crate::error::{Error, Result};
use crate::query::{FilterValue, build_choose_clause, build_where_clause};
use crate::serialization::{self, JsonCodec};

/// `MAXRESULTS` applied by [`Query::all`] when the caller does not override it.
const DEFAULT_MAX_RESULTS: u32 = 100;

/// Name bindings every remotely-accessible entity type declares.
pub trait QBObject: JsonCodec {
    /// The vendor's name for this entity type, as used in URLs and select
    /// statements.
    const OBJECT_NAME: &'static str;

    /// The wrapper key under which API responses nest this entity, when it
    /// differs from [`Self::OBJECT_NAME`].
    const JSON_OBJECT_NAME: Option<&'static str> = None;

    /// The key to unwrap from response payloads.
    #[must_use]
    fn response_key() -> &'static str {
        Self::JSON_OBJECT_NAME.unwrap_or(Self::OBJECT_NAME)
    }
}

/// An entity carrying the server-assigned `Id` and optimistic-concurrency
/// `SyncToken`. An entity whose `id()` is `None` has never been persisted.
pub trait QBEntity: QBObject {
    fn id(&self) -> Option<&str>;

    fn sync_token(&self) -> Option<&str>;

    fn set_id(&mut self, id: String);

    /// Whether the entity carries a positive, server-assigned id.
    fn has_persisted_id(&self) -> bool {
        self.id()
            .and_then(|id| id.parse::<i64>().ok())
            .is_some_and(|id| id > 0)
    }

    /// The id, or [`Error::UnsavedObject`] when it is absent or empty.
    fn require_id(&self, operation: &'static str) -> Result<&str> {
        self.id()
            .filter(|id| !id.is_empty())
            .ok_or(Error::UnsavedObject {
                operation,
                entity: Self::OBJECT_NAME,
            })
    }
}

/// Pulls the entity out of its response wrapper key.
pub(crate) fn unwrap_object<T: DeserializeOwned>(mut data: Value, key: &str) -> Result<T> {
    match data.get_mut(key) {
        Some(value) => serialization::from_value(value.take()),
        None => Err(Error::UnexpectedResponse {
            expected: key.to_owned(),
        }),
    }
}

macro_rules! qb_object {
    ($ty:ty, $name:literal) => {
        impl $crate::operations::QBObject for $ty {
            const OBJECT_NAME: &'static str = $name;
        }
    };
    ($ty:ty, $name:literal, json = $json:literal) => {
        impl $crate::operations::QBObject for $ty {
            const OBJECT_NAME: &'static str = $name;
            const JSON_OBJECT_NAME: Option<&'static str> = Some($json);
        }
    };
}

macro_rules! qb_entity {
    ($ty:ty, $name:literal $(, json = $json:literal)?) => {
        $crate::operations::qb_object!($ty, $name $(, json = $json)?);

        impl $crate::operations::QBEntity for $ty {
            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }

            fn sync_token(&self) -> Option<&str> {
                self.sync_token.as_deref()
            }

            fn set_id(&mut self, id: String) {
                self.id = Some(id);
            }
        }
    };
}

pub(crate) use {qb_entity, qb_object};

/// Fetch a single record by id.
pub trait Read: QBObject {
    async fn get(qb: &QuickBooks, id: &str) -> Result<Self> {
        trace!(entity = Self::OBJECT_NAME, id, "fetching object");
        let data = qb.get_single_object(Self::OBJECT_NAME, id, &[]).await?;
        unwrap_object(data, Self::response_key())
    }
}

/// Optional clauses appended to a select statement.
///
/// `start_position` and `max_results` are options so that an explicit zero
/// still renders its clause.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub order_by: Option<String>,
    pub start_position: Option<u32>,
    pub max_results: Option<u32>,
}

impl QueryOptions {
    #[must_use]
    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    #[must_use]
    pub fn with_start_position(mut self, start_position: u32) -> Self {
        self.start_position = Some(start_position);
        self
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

fn append_clauses(
    select: &mut String,
    where_clause: &str,
    order_by: Option<&str>,
    start_position: Option<u32>,
    max_results: Option<u32>,
) {
    use std::fmt::Write;

    if !where_clause.is_empty() {
        let _ = write!(select, " WHERE {where_clause}");
    }
    if let Some(order_by) = order_by.filter(|order_by| !order_by.is_empty()) {
        let _ = write!(select, " ORDERBY {order_by}");
    }
    if let Some(start_position) = start_position {
        let _ = write!(select, " STARTPOSITION {start_position}");
    }
    if let Some(max_results) = max_results {
        let _ = write!(select, " MAXRESULTS {max_results}");
    }
}

/// List and query operations, all funneling into one select statement sent
/// through the query endpoint.
pub trait Query: QBObject {
    /// Fields appended to `SELECT *` in [`Query::all`]. `Item` overrides this
    /// with `Sku`, which the vendor omits from the default field set.
    const EXTRA_SELECT_FIELDS: &'static [&'static str] = &[];

    /// The select statement issued by [`Query::all`].
    #[must_use]
    fn all_statement(options: &QueryOptions) -> String {
        let mut select = String::from("SELECT *");
        for field in Self::EXTRA_SELECT_FIELDS {
            select.push_str(", ");
            select.push_str(field);
        }
        select.push_str(" FROM ");
        select.push_str(Self::OBJECT_NAME);
        append_clauses(
            &mut select,
            "",
            options.order_by.as_deref(),
            options.start_position,
            Some(options.max_results.unwrap_or(DEFAULT_MAX_RESULTS)),
        );
        select
    }

    /// The select statement issued by [`Query::select_where`]. The where
    /// clause is inserted verbatim, without the `WHERE` keyword.
    #[must_use]
    fn where_statement(where_clause: &str, options: &QueryOptions) -> String {
        let mut select = format!("SELECT * FROM {}", Self::OBJECT_NAME);
        append_clauses(
            &mut select,
            where_clause,
            options.order_by.as_deref(),
            options.start_position,
            options.max_results,
        );
        select
    }

    /// The statement issued by [`Query::count`].
    #[must_use]
    fn count_statement(where_clause: &str) -> String {
        let mut select = format!("SELECT COUNT(*) FROM {}", Self::OBJECT_NAME);
        if !where_clause.is_empty() {
            select.push_str(" WHERE ");
            select.push_str(where_clause);
        }
        select
    }

    /// Execute a raw select statement and decode the nested result list.
    /// A response without the entity's result collection decodes as empty.
    async fn query(qb: &QuickBooks, select: &str) -> Result<Vec<Self>> {
        trace!(entity = Self::OBJECT_NAME, select, "running query");
        let mut data: Value = qb.query(select).await?;
        match data
            .get_mut("QueryResponse")
            .and_then(|response| response.get_mut(Self::response_key()))
        {
            Some(items) => serialization::from_value(items.take()),
            None => Ok(Vec::new()),
        }
    }

    /// All records of this type, capped at 100 results unless overridden.
    async fn all(qb: &QuickBooks, options: &QueryOptions) -> Result<Vec<Self>> {
        Self::query(qb, &Self::all_statement(options)).await
    }

    /// Records matching a raw where clause (without the `WHERE` keyword).
    async fn select_where(
        qb: &QuickBooks,
        where_clause: &str,
        options: &QueryOptions,
    ) -> Result<Vec<Self>> {
        Self::query(qb, &Self::where_statement(where_clause, options)).await
    }

    /// Records matching field/value filters, built with
    /// [`build_where_clause`].
    async fn filter<'a, I>(qb: &QuickBooks, filters: I, options: &QueryOptions) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = (&'a str, FilterValue)>,
    {
        Self::select_where(qb, &build_where_clause(filters), options).await
    }

    /// Records whose `field` matches one of the candidate values.
    async fn choose<I>(qb: &QuickBooks, choices: I, field: &str) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = FilterValue>,
    {
        Self::select_where(qb, &build_choose_clause(choices, field), &QueryOptions::default())
            .await
    }

    /// The server-reported total for a where clause, or `None` if the
    /// response omits it.
    async fn count(qb: &QuickBooks, where_clause: &str) -> Result<Option<i64>> {
        let data: Value = qb.query(&Self::count_statement(where_clause)).await?;
        Ok(data
            .get("QueryResponse")
            .and_then(|response| response.get("totalCount"))
            .and_then(Value::as_i64))
    }
}

/// Create-or-update. An entity with a positive id is updated; anything else
/// is created.
pub trait Save: QBEntity {
    /// Saves the entity and returns the server's refreshed copy.
    ///
    /// Only `Id` is copied back onto `self`; callers wanting the refreshed
    /// `SyncToken` and server-computed fields must use the returned instance.
    /// Existing callers depend on `self` being otherwise untouched.
    async fn save(&mut self, qb: &QuickBooks, request_id: Option<&str>) -> Result<Self> {
        let body = self.to_json()?;
        let data = if self.has_persisted_id() {
            trace!(entity = Self::OBJECT_NAME, id = ?self.id(), "updating object");
            qb.update_object(Self::OBJECT_NAME, &body, request_id)
                .await?
        } else {
            trace!(entity = Self::OBJECT_NAME, "creating object");
            qb.create_object(Self::OBJECT_NAME, &body, request_id)
                .await?
        };

        let saved: Self = unwrap_object(data, Self::response_key())?;
        if let Some(id) = saved.id() {
            self.set_id(id.to_owned());
        }
        Ok(saved)
    }
}

/// Update for singleton-style resources that carry no usable id of their
/// own; always issues the update call and copies nothing back.
pub trait SaveNoId: QBObject {
    async fn save(&self, qb: &QuickBooks, request_id: Option<&str>) -> Result<Self> {
        let data = qb
            .update_object(Self::OBJECT_NAME, &self.to_json()?, request_id)
            .await?;
        unwrap_object(data, Self::response_key())
    }
}

/// Deletion via the sparse `{Id, SyncToken}` payload.
pub trait Delete: QBEntity {
    async fn delete(&self, qb: &QuickBooks, request_id: Option<&str>) -> Result<Value> {
        let id = self.require_id("delete")?;
        let payload = json!({
            "Id": id,
            "SyncToken": self.sync_token().unwrap_or("0"),
        });
        qb.delete_object(
            Self::OBJECT_NAME,
            &serialization::to_json(&payload)?,
            request_id,
        )
        .await
    }
}

/// Deletion for parent-keyed child resources that lack their own id; the
/// full encoded body is sent instead of the sparse payload.
pub trait DeleteNoId: QBObject {
    async fn delete(&self, qb: &QuickBooks, request_id: Option<&str>) -> Result<Value> {
        qb.delete_object(Self::OBJECT_NAME, &self.to_json()?, request_id)
            .await
    }
}

/// Dispatch the vendor's "send" action, e.g. emailing an invoice.
pub trait SendEmail: QBEntity {
    /// Sends the document, optionally overriding the recipient address.
    async fn send(&self, qb: &QuickBooks, send_to: Option<&str>) -> Result<Value> {
        let id = self.require_id("send")?;
        let mut end_point = format!("{}/{}/send", Self::OBJECT_NAME.to_lowercase(), id);
        if let Some(address) = send_to {
            end_point = format!("{end_point}?sendTo={}", urlencoding::encode(address));
        }
        qb.misc_operation(&end_point, None, "application/octet-stream")
            .await
    }
}

/// Operation parameters and payload for voiding, by entity type. Payments
/// are voided through a sparse update; everything else through the void
/// operation with a plain `{Id, SyncToken}` payload.
fn void_request(
    object_name: &str,
    id: &str,
    sync_token: &str,
) -> (&'static [(&'static str, &'static str)], Value) {
    match object_name {
        "Payment" | "SalesReceipt" | "BillPayment" => (
            &[("operation", "update"), ("include", "void")],
            json!({"Id": id, "SyncToken": sync_token, "sparse": true}),
        ),
        _ => (
            &[("operation", "void")],
            json!({"Id": id, "SyncToken": sync_token}),
        ),
    }
}

/// Void a posted transaction.
pub trait Void: QBEntity {
    async fn void(&self, qb: &QuickBooks) -> Result<Value> {
        let id = self.require_id("void")?;
        let (params, payload) =
            void_request(Self::OBJECT_NAME, id, self.sync_token().unwrap_or("0"));
        let url = qb.company_endpoint(&Self::OBJECT_NAME.to_lowercase())?;
        qb.post(
            url,
            Some(serialization::to_json(&payload)?),
            "application/json",
            params,
        )
        .await
    }
}

/// Download the entity rendered as PDF.
pub trait DownloadPdf: QBEntity {
    async fn download_pdf(&self, qb: &QuickBooks) -> Result<Vec<u8>> {
        match self.id() {
            Some(id) if self.has_persisted_id() => qb.download_pdf(Self::OBJECT_NAME, id).await,
            _ => Err(Error::UnsavedObject {
                operation: "download",
                entity: Self::OBJECT_NAME,
            }),
        }
    }
}

/// Singleton fetch against the fixed `company/<realm>/preferences` endpoint.
pub trait Preference: QBObject {
    async fn get(qb: &QuickBooks) -> Result<Self> {
        let url = qb.company_endpoint("preferences")?;
        let data: Value = qb.get(url, &[]).await?;
        unwrap_object(data, Self::response_key())
    }
}
