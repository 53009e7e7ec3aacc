//! Exercises the capability traits against a local mock of the QuickBooks
//! API, asserting the exact paths, query parameters, and payloads sent.

use std::sync::{Arc, Mutex, Once};

use serde_json::{Value, json};
use url::Url;
use warp::Filter;

use quickbooks_rs::entities::{Customer, Department, Invoice, Payment, Preferences, SalesReceipt};
use quickbooks_rs::{
    Delete, DownloadPdf, Environment, Error, FilterValue, Preference, Query, QueryOptions,
    QuickBooks, Read, Save, SendEmail, Void,
};

#[derive(Clone, Debug)]
struct Recorded {
    method: String,
    path: String,
    query: String,
    content_type: Option<String>,
    body: String,
}

type Requests = Arc<Mutex<Vec<Recorded>>>;

static LOGGING_CONFIGURED: Once = Once::new();

fn do_setup() {
    LOGGING_CONFIGURED.call_once(|| tracing_subscriber::fmt().with_test_writer().init());
}

/// Starts a single-response mock server and returns a client pointed at it
/// plus the log of received requests.
fn spawn_server(status: u16, response_body: Vec<u8>, content_type: &'static str) -> (QuickBooks, Requests) {
    let requests: Requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);

    let route = warp::any()
        .and(warp::method())
        .and(warp::path::full())
        .and(
            warp::query::raw()
                .or(warp::any().map(String::new))
                .unify(),
        )
        .and(warp::header::optional::<String>("content-type"))
        .and(warp::body::bytes())
        .map(
            move |method: warp::http::Method,
                  path: warp::path::FullPath,
                  query: String,
                  request_content_type: Option<String>,
                  body: bytes::Bytes| {
                recorded.lock().unwrap().push(Recorded {
                    method: method.to_string(),
                    path: path.as_str().to_string(),
                    query,
                    content_type: request_content_type,
                    body: String::from_utf8_lossy(&body).to_string(),
                });
                warp::http::Response::builder()
                    .status(status)
                    .header("content-type", content_type)
                    .body(response_body.clone())
            },
        );

    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    let mut qb = QuickBooks::new("test-access-token", "9130350000000", Environment::Sandbox);
    qb.set_base_url(Url::parse(&format!("http://{addr}")).unwrap());
    (qb, requests)
}

fn spawn_json_server(response: &Value) -> (QuickBooks, Requests) {
    spawn_server(200, response.to_string().into_bytes(), "application/json")
}

fn single_request(requests: &Requests) -> Recorded {
    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests[0].clone()
}

#[tokio::test]
async fn all_sends_select_statement_to_query_endpoint() {
    do_setup();
    let response = json!({
        "QueryResponse": {
            "Department": [
                {"Id": "1", "Name": "Garden Services"},
                {"Id": "2", "Name": "Landscaping"}
            ],
            "startPosition": 1,
            "maxResults": 2
        },
        "time": "2026-08-05T10:35:08-07:00"
    });
    let (qb, requests) = spawn_json_server(&response);

    let departments = Department::all(&qb, &QueryOptions::default()).await.unwrap();

    assert_eq!(departments.len(), 2);
    assert_eq!(departments[0].name.as_deref(), Some("Garden Services"));

    let request = single_request(&requests);
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/v3/company/9130350000000/query");
    assert_eq!(request.body, "SELECT * FROM Department MAXRESULTS 100");
    assert_eq!(request.content_type.as_deref(), Some("application/text"));
    assert!(request.query.contains("minorversion=75"));
}

#[tokio::test]
async fn filter_builds_where_clause_with_order_by() {
    do_setup();
    let response = json!({
        "QueryResponse": {"Customer": [{"Id": "1", "DisplayName": "Acme Consulting"}]}
    });
    let (qb, requests) = spawn_json_server(&response);

    let customers = Customer::filter(
        &qb,
        [("Active", FilterValue::from(true))],
        &QueryOptions::default().with_order_by("DisplayName"),
    )
    .await
    .unwrap();

    assert_eq!(customers.len(), 1);
    let request = single_request(&requests);
    assert_eq!(
        request.body,
        "SELECT * FROM Customer WHERE Active = True ORDERBY DisplayName"
    );
}

#[tokio::test]
async fn query_decodes_empty_result_collection_as_empty() {
    do_setup();
    let (qb, _requests) = spawn_json_server(&json!({"QueryResponse": {}}));

    let departments = Department::select_where(&qb, "Active=False", &QueryOptions::default())
        .await
        .unwrap();

    assert!(departments.is_empty());
}

#[tokio::test]
async fn count_returns_server_reported_total() {
    do_setup();
    let (qb, requests) = spawn_json_server(&json!({"QueryResponse": {"totalCount": 12}}));

    let count = Department::count(&qb, "Active=True").await.unwrap();

    assert_eq!(count, Some(12));
    let request = single_request(&requests);
    assert_eq!(request.body, "SELECT COUNT(*) FROM Department WHERE Active=True");
}

#[tokio::test]
async fn count_is_none_when_response_omits_total() {
    do_setup();
    let (qb, _requests) = spawn_json_server(&json!({"QueryResponse": {}}));

    let count = Department::count(&qb, "").await.unwrap();

    assert_eq!(count, None);
}

#[tokio::test]
async fn get_unwraps_entity_from_response_key() {
    do_setup();
    let response = json!({
        "Department": {"Id": "7", "SyncToken": "0", "Name": "Garden Services"},
        "time": "2026-08-05T10:35:08-07:00"
    });
    let (qb, requests) = spawn_json_server(&response);

    let department = Department::get(&qb, "7").await.unwrap();

    assert_eq!(department.id.as_deref(), Some("7"));
    assert_eq!(department.name.as_deref(), Some("Garden Services"));

    let request = single_request(&requests);
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/v3/company/9130350000000/department/7");
}

#[tokio::test]
async fn save_without_id_posts_create_and_copies_id_back() {
    do_setup();
    let response = json!({
        "Department": {"Id": "42", "SyncToken": "0", "Name": "Garden Services"}
    });
    let (qb, requests) = spawn_json_server(&response);

    let mut department = Department {
        name: Some("Garden Services".to_string()),
        ..Department::default()
    };
    let saved = department.save(&qb, None).await.unwrap();

    assert_eq!(saved.id.as_deref(), Some("42"));
    assert_eq!(department.id.as_deref(), Some("42"));
    // Only Id comes back onto the original; the refreshed copy carries the rest.
    assert_eq!(department.sync_token, None);
    assert_eq!(saved.sync_token.as_deref(), Some("0"));

    let request = single_request(&requests);
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/v3/company/9130350000000/department");
    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body.get("Id"), None);
    assert_eq!(body["Name"], "Garden Services");
}

#[tokio::test]
async fn save_with_positive_id_posts_update_with_full_body() {
    do_setup();
    let response = json!({
        "Department": {"Id": "42", "SyncToken": "1", "Name": "Garden Services"}
    });
    let (qb, requests) = spawn_json_server(&response);

    let mut department = Department {
        id: Some("42".to_string()),
        sync_token: Some("0".to_string()),
        name: Some("Garden Services".to_string()),
        ..Department::default()
    };
    let saved = department.save(&qb, None).await.unwrap();

    assert_eq!(saved.sync_token.as_deref(), Some("1"));

    let request = single_request(&requests);
    assert_eq!(request.path, "/v3/company/9130350000000/department");
    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["Id"], "42");
    assert_eq!(body["SyncToken"], "0");
}

#[tokio::test]
async fn save_forwards_request_id_for_idempotency() {
    do_setup();
    let response = json!({"Department": {"Id": "42"}});
    let (qb, requests) = spawn_json_server(&response);

    let request_id = quickbooks_rs::generate_request_id();
    let mut department = Department::default();
    department.save(&qb, Some(&request_id)).await.unwrap();

    let request = single_request(&requests);
    assert!(request.query.contains(&format!("requestid={request_id}")));
}

#[tokio::test]
async fn delete_sends_sparse_payload_with_operation_param() {
    do_setup();
    let response = json!({"Department": {"Id": "42", "status": "Deleted"}});
    let (qb, requests) = spawn_json_server(&response);

    let department = Department {
        id: Some("42".to_string()),
        sync_token: Some("3".to_string()),
        name: Some("Garden Services".to_string()),
        ..Department::default()
    };
    department.delete(&qb, None).await.unwrap();

    let request = single_request(&requests);
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/v3/company/9130350000000/department");
    assert!(request.query.contains("operation=delete"));

    // Sparse payload: exactly Id and SyncToken, not the full body.
    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["Id"], "42");
    assert_eq!(body["SyncToken"], "3");
    assert_eq!(body.as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn void_invoice_uses_void_operation_with_plain_payload() {
    do_setup();
    let response = json!({"Invoice": {"Id": "129", "SyncToken": "1"}});
    let (qb, requests) = spawn_json_server(&response);

    let invoice = Invoice {
        id: Some("129".to_string()),
        sync_token: Some("0".to_string()),
        ..Invoice::default()
    };
    invoice.void(&qb).await.unwrap();

    let request = single_request(&requests);
    assert_eq!(request.path, "/v3/company/9130350000000/invoice");
    assert!(request.query.contains("operation=void"));
    assert!(!request.query.contains("include=void"));

    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["Id"], "129");
    assert_eq!(body["SyncToken"], "0");
    assert_eq!(body.get("sparse"), None);
}

#[tokio::test]
async fn void_payment_uses_sparse_update_operation() {
    do_setup();
    let response = json!({"Payment": {"Id": "73", "SyncToken": "1"}});
    let (qb, requests) = spawn_json_server(&response);

    let payment = Payment {
        id: Some("73".to_string()),
        sync_token: Some("0".to_string()),
        ..Payment::default()
    };
    payment.void(&qb).await.unwrap();

    let request = single_request(&requests);
    assert_eq!(request.path, "/v3/company/9130350000000/payment");
    assert!(request.query.contains("operation=update"));
    assert!(request.query.contains("include=void"));

    let body: Value = serde_json::from_str(&request.body).unwrap();
    assert_eq!(body["Id"], "73");
    assert_eq!(body["SyncToken"], "0");
    assert_eq!(body["sparse"], true);
}

#[tokio::test]
async fn void_sales_receipt_uses_sparse_update_operation() {
    do_setup();
    let response = json!({"SalesReceipt": {"Id": "88"}});
    let (qb, requests) = spawn_json_server(&response);

    let receipt = SalesReceipt {
        id: Some("88".to_string()),
        sync_token: Some("2".to_string()),
        ..SalesReceipt::default()
    };
    receipt.void(&qb).await.unwrap();

    let request = single_request(&requests);
    assert!(request.query.contains("operation=update"));
    assert!(request.query.contains("include=void"));
}

#[tokio::test]
async fn send_posts_octet_stream_to_send_endpoint() {
    do_setup();
    let response = json!({"Invoice": {"Id": "2", "EmailStatus": "EmailSent"}});
    let (qb, requests) = spawn_json_server(&response);

    let invoice = Invoice {
        id: Some("2".to_string()),
        ..Invoice::default()
    };
    invoice.send(&qb, None).await.unwrap();

    let request = single_request(&requests);
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/v3/company/9130350000000/invoice/2/send");
    assert_eq!(
        request.content_type.as_deref(),
        Some("application/octet-stream")
    );
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn send_percent_encodes_recipient_address() {
    do_setup();
    let response = json!({"Invoice": {"Id": "2"}});
    let (qb, requests) = spawn_json_server(&response);

    let invoice = Invoice {
        id: Some("2".to_string()),
        ..Invoice::default()
    };
    invoice.send(&qb, Some("test@email.com")).await.unwrap();

    let request = single_request(&requests);
    assert_eq!(request.path, "/v3/company/9130350000000/invoice/2/send");
    assert!(request.query.contains("sendTo=test%40email.com"));
}

#[tokio::test]
async fn download_pdf_returns_raw_bytes() {
    do_setup();
    let (qb, requests) = spawn_server(200, b"%PDF-1.7 fake".to_vec(), "application/pdf");

    let invoice = Invoice {
        id: Some("129".to_string()),
        ..Invoice::default()
    };
    let pdf = invoice.download_pdf(&qb).await.unwrap();

    assert_eq!(pdf, b"%PDF-1.7 fake");
    let request = single_request(&requests);
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/v3/company/9130350000000/invoice/129/pdf");
}

#[tokio::test]
async fn preferences_get_uses_fixed_singleton_endpoint() {
    do_setup();
    let response = json!({
        "Preferences": {
            "Id": "1",
            "SyncToken": "4",
            "CurrencyPrefs": {"MultiCurrencyEnabled": false}
        }
    });
    let (qb, requests) = spawn_json_server(&response);

    let preferences = Preferences::get(&qb).await.unwrap();

    assert_eq!(preferences.id.as_deref(), Some("1"));
    assert_eq!(
        preferences
            .currency_prefs
            .as_ref()
            .and_then(|prefs| prefs.multi_currency_enabled),
        Some(false)
    );
    let request = single_request(&requests);
    assert_eq!(request.path, "/v3/company/9130350000000/preferences");
}

#[tokio::test]
async fn fault_responses_decode_into_typed_error() {
    do_setup();
    let fault = json!({
        "Fault": {
            "Error": [{
                "Message": "Stale Object Error",
                "Detail": "You and someone else edited the same record",
                "code": "5010",
                "element": ""
            }],
            "type": "ValidationFault"
        },
        "time": "2026-08-05T10:35:08-07:00"
    });
    let (qb, _requests) = spawn_server(400, fault.to_string().into_bytes(), "application/json");

    let department = Department {
        id: Some("42".to_string()),
        ..Department::default()
    };
    match department.delete(&qb, None).await {
        Err(Error::Fault(fault)) => {
            assert_eq!(fault.fault.fault_type.as_deref(), Some("ValidationFault"));
            assert_eq!(fault.fault.errors[0].code.as_deref(), Some("5010"));
        }
        other => panic!("expected fault error, got {other:?}"),
    }
}

// Precondition failures must never reach the network; no server is running.
#[tokio::test]
async fn operations_requiring_an_id_fail_locally_without_one() {
    do_setup();
    let qb = QuickBooks::new("test-access-token", "9130350000000", Environment::Sandbox);

    let invoice = Invoice::default();

    let deleted = invoice.delete(&qb, None).await;
    assert!(matches!(
        deleted,
        Err(Error::UnsavedObject { operation: "delete", .. })
    ));

    let voided = invoice.void(&qb).await;
    assert!(matches!(
        voided,
        Err(Error::UnsavedObject { operation: "void", .. })
    ));

    let sent = invoice.send(&qb, None).await;
    assert!(matches!(
        sent,
        Err(Error::UnsavedObject { operation: "send", .. })
    ));

    let downloaded = invoice.download_pdf(&qb).await;
    assert!(matches!(
        downloaded,
        Err(Error::UnsavedObject { operation: "download", .. })
    ));
}

#[tokio::test]
async fn download_pdf_rejects_non_positive_id() {
    do_setup();
    let qb = QuickBooks::new("test-access-token", "9130350000000", Environment::Sandbox);

    let invoice = Invoice {
        id: Some("0".to_string()),
        ..Invoice::default()
    };

    let result = invoice.download_pdf(&qb).await;
    assert!(matches!(result, Err(Error::UnsavedObject { .. })));
}
