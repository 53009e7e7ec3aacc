use quickbooks_rs::entities::{
    Address, Customer, JournalEntry, Line, LineDetail, PhoneNumber, PostingType, Ref,
};
use quickbooks_rs::{Error, JsonCodec};
use rust_decimal_macros::dec;

#[test]
fn encodes_single_field_object_with_four_space_indent() {
    let phone = PhoneNumber {
        free_form_number: Some("555-555-5555".to_string()),
    };

    let json = phone.to_json().unwrap();

    assert_eq!(json, "{\n    \"FreeFormNumber\": \"555-555-5555\"\n}");
}

#[test]
fn encodes_keys_in_sorted_order_and_omits_absent_fields() {
    let mut customer = Customer::default();
    customer.display_name = Some("Acme Consulting".to_string());
    customer.active = Some(true);
    customer.balance = Some(dec!(100.50));

    let json = customer.to_json().unwrap();

    let active = json.find("\"Active\"").unwrap();
    let balance = json.find("\"Balance\"").unwrap();
    let display_name = json.find("\"DisplayName\"").unwrap();
    assert!(active < balance && balance < display_name);

    // None fields are omitted entirely, not rendered as null.
    assert!(!json.contains("GivenName"));
    assert!(!json.contains("null"));
}

#[test]
fn encodes_decimals_as_exact_strings() {
    let mut customer = Customer::default();
    customer.balance = Some(dec!(8849.1019));

    let json = customer.to_json().unwrap();

    assert!(json.contains("\"Balance\": \"8849.1019\""));
}

#[test]
fn round_trips_nested_entities() {
    let mut customer = Customer::default();
    customer.id = Some("42".to_string());
    customer.sync_token = Some("3".to_string());
    customer.display_name = Some("Acme Consulting".to_string());
    customer.active = Some(true);
    customer.balance = Some(dec!(250.00));
    customer.primary_phone = Some(PhoneNumber {
        free_form_number: Some("555-555-5555".to_string()),
    });
    customer.bill_addr = Some(Address {
        line1: Some("123 Main St".to_string()),
        city: Some("Mountain View".to_string()),
        country_sub_division_code: Some("CA".to_string()),
        postal_code: Some("94042".to_string()),
        ..Address::default()
    });
    customer.parent_ref = Some(Ref::from_id("7"));

    let decoded = Customer::from_json(&customer.to_json().unwrap()).unwrap();

    assert_eq!(decoded, customer);
}

#[test]
fn projects_to_plain_value_tree() {
    let mut customer = Customer::default();
    customer.display_name = Some("Acme Consulting".to_string());
    customer.primary_phone = Some(PhoneNumber {
        free_form_number: Some("555-555-5555".to_string()),
    });

    let value = customer.to_value().unwrap();

    assert_eq!(value["DisplayName"], "Acme Consulting");
    assert_eq!(value["PrimaryPhone"]["FreeFormNumber"], "555-555-5555");
}

#[test]
fn retains_unknown_keys_through_decode_and_encode() {
    let json = r#"{
        "DisplayName": "Acme Consulting",
        "domain": "QBO",
        "sparse": false,
        "SomeFutureField": {"Nested": 1}
    }"#;

    let customer = Customer::from_json(json).unwrap();

    assert_eq!(customer.display_name.as_deref(), Some("Acme Consulting"));
    assert_eq!(customer.extra["domain"], "QBO");
    assert_eq!(customer.extra["SomeFutureField"]["Nested"], 1);

    let encoded = customer.to_json().unwrap();
    assert!(encoded.contains("SomeFutureField"));
}

#[test]
fn parses_metadata_timestamps_and_plain_dates() {
    let json = r#"{
        "DisplayName": "Acme Consulting",
        "OpenBalanceDate": "2015-07-24",
        "MetaData": {
            "CreateTime": "2015-07-24T10:35:08-07:00",
            "LastUpdatedTime": "2016-01-01T00:00:00Z"
        }
    }"#;

    let customer = Customer::from_json(json).unwrap();

    let create_time = customer.meta_data.as_ref().unwrap().create_time.unwrap();
    assert_eq!(create_time.year(), 2015);
    assert_eq!(create_time.offset().whole_hours(), -7);

    let date = customer.open_balance_date.unwrap();
    assert_eq!(
        (date.year(), u8::from(date.month()), date.day()),
        (2015, 7, 24)
    );

    let encoded = customer.to_json().unwrap();
    assert!(encoded.contains("\"OpenBalanceDate\": \"2015-07-24\""));
    assert!(encoded.contains("\"CreateTime\": \"2015-07-24T10:35:08-07:00\""));
}

#[test]
fn malformed_json_surfaces_the_parse_error() {
    let result = Customer::from_json("{\"DisplayName\": ");

    assert!(matches!(
        result,
        Err(Error::DeserializationError(_, Some(_)))
    ));
}

static JOURNAL_ENTRY_JSON: &str = r#"{
    "DocNumber": "123",
    "TotalAmt": 100,
    "Line": [
        {
            "Id": "0",
            "Description": "Test",
            "Amount": 25.54,
            "DetailType": "JournalEntryLineDetail",
            "JournalEntryLineDetail": {
                "PostingType": "Debit"
            }
        }
    ]
}"#;

#[test]
fn decodes_line_detail_by_discriminator() {
    let entry = JournalEntry::from_json(JOURNAL_ENTRY_JSON).unwrap();

    assert_eq!(entry.doc_number.as_deref(), Some("123"));
    assert_eq!(entry.total_amt, Some(dec!(100)));

    let line = &entry.line[0];
    assert_eq!(line.id.as_deref(), Some("0"));
    assert_eq!(line.description.as_deref(), Some("Test"));
    assert_eq!(line.amount, Some(dec!(25.54)));

    let LineDetail::JournalEntry(detail) = &line.detail else {
        panic!("expected journal entry detail, got {:?}", line.detail);
    };
    assert_eq!(detail.posting_type, Some(PostingType::Debit));
}

#[test]
fn line_detail_round_trips_with_discriminator() {
    let entry = JournalEntry::from_json(JOURNAL_ENTRY_JSON).unwrap();

    let encoded = entry.to_json().unwrap();
    assert!(encoded.contains("\"DetailType\": \"JournalEntryLineDetail\""));

    let decoded = JournalEntry::from_json(&encoded).unwrap();
    assert_eq!(decoded, entry);
}

#[test]
fn unknown_discriminator_falls_back_to_raw_detail() {
    let json = r#"{
        "Amount": 10,
        "DetailType": "SomethingBrandNew",
        "SomethingBrandNew": {"Field": "kept"}
    }"#;

    let line: Line = Line::from_json(json).unwrap();

    let LineDetail::Raw(raw) = &line.detail else {
        panic!("expected raw fallback, got {:?}", line.detail);
    };
    assert_eq!(raw["DetailType"], "SomethingBrandNew");
    assert_eq!(raw["SomethingBrandNew"]["Field"], "kept");
}

#[test]
fn line_without_detail_type_decodes_as_raw() {
    let json = r#"{"Amount": 35.00, "LinkedTxn": [{"TxnId": "145", "TxnType": "Invoice"}]}"#;

    let line: Line = Line::from_json(json).unwrap();

    assert_eq!(line.amount, Some(dec!(35.00)));
    assert_eq!(line.linked_txn[0].txn_id.as_deref(), Some("145"));
    assert_eq!(line.detail, LineDetail::Raw(serde_json::Map::new()));
}
