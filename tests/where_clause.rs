use quickbooks_rs::{FilterValue, build_choose_clause, build_where_clause};
use rust_decimal_macros::dec;

#[test]
fn renders_booleans_unquoted_and_strings_quoted() {
    let clause = build_where_clause([
        ("Active", FilterValue::from(true)),
        ("DisplayName", FilterValue::from("Acme Consulting")),
    ]);

    assert_eq!(clause, "Active = True AND DisplayName = 'Acme Consulting'");
}

#[test]
fn preserves_input_order() {
    let clause = build_where_clause([
        ("FamilyName", FilterValue::from("King")),
        ("GivenName", FilterValue::from("Martin")),
        ("Active", FilterValue::from(false)),
    ]);

    assert_eq!(
        clause,
        "FamilyName = 'King' AND GivenName = 'Martin' AND Active = False"
    );
}

#[test]
fn renders_numbers_unquoted() {
    let clause = build_where_clause([
        ("Level", FilterValue::from(2)),
        ("Balance", FilterValue::from(dec!(100.50))),
    ]);

    assert_eq!(clause, "Level = 2 AND Balance = 100.50");
}

#[test]
fn escapes_embedded_quotes() {
    let clause = build_where_clause([("DisplayName", FilterValue::from("O'Brien"))]);

    assert_eq!(clause, r"DisplayName = 'O\'Brien'");
}

#[test]
fn suffix_selects_comparison_operator() {
    let clause = build_where_clause([
        ("Balance__gt", FilterValue::from(dec!(100))),
        ("Balance__lte", FilterValue::from(dec!(500))),
        ("DisplayName__like", FilterValue::from("Acme%")),
    ]);

    assert_eq!(
        clause,
        "Balance > 100 AND Balance <= 500 AND DisplayName LIKE 'Acme%'"
    );
}

#[test]
fn empty_filters_render_empty_clause() {
    assert_eq!(build_where_clause([]), "");
}

#[test]
fn choose_clause_quotes_each_string_candidate() {
    let clause = build_choose_clause(
        [FilterValue::from("name1"), FilterValue::from("name2")],
        "Name",
    );

    assert_eq!(clause, "Name in ('name1', 'name2')");
}

#[test]
fn choose_clause_renders_numbers_unquoted() {
    let clause = build_choose_clause([FilterValue::from(1), FilterValue::from(2)], "Id");

    assert_eq!(clause, "Id in (1, 2)");
}

#[test]
fn choose_clause_is_empty_for_no_candidates() {
    assert_eq!(build_choose_clause([], "Name"), "");
}
