use quickbooks_rs::entities::{Customer, Department, Item};
use quickbooks_rs::{FilterValue, Query, QueryOptions, build_where_clause};

#[test]
fn all_defaults_to_one_hundred_results() {
    let select = Department::all_statement(&QueryOptions::default());

    assert_eq!(select, "SELECT * FROM Department MAXRESULTS 100");
}

#[test]
fn all_renders_order_by_and_start_position() {
    let options = QueryOptions::default()
        .with_order_by("Name")
        .with_start_position(5)
        .with_max_results(25);

    let select = Department::all_statement(&options);

    assert_eq!(
        select,
        "SELECT * FROM Department ORDERBY Name STARTPOSITION 5 MAXRESULTS 25"
    );
}

#[test]
fn item_select_list_requests_sku_explicitly() {
    let select = Item::all_statement(&QueryOptions::default());

    assert_eq!(select, "SELECT *, Sku FROM Item MAXRESULTS 100");
}

#[test]
fn where_renders_clauses_in_fixed_order() {
    let options = QueryOptions::default()
        .with_start_position(1)
        .with_max_results(10);

    let select = Department::where_statement("Active=True", &options);

    assert_eq!(
        select,
        "SELECT * FROM Department WHERE Active=True STARTPOSITION 1 MAXRESULTS 10"
    );
}

#[test]
fn start_position_zero_still_renders() {
    let options = QueryOptions::default()
        .with_start_position(0)
        .with_max_results(10);

    let select = Department::where_statement("Active=True", &options);

    assert_eq!(
        select,
        "SELECT * FROM Department WHERE Active=True STARTPOSITION 0 MAXRESULTS 10"
    );
}

#[test]
fn where_without_clauses_is_a_bare_select() {
    let select = Department::where_statement("", &QueryOptions::default());

    assert_eq!(select, "SELECT * FROM Department");
}

#[test]
fn filter_composes_where_clause_and_order_by() {
    let where_clause = build_where_clause([("Active", FilterValue::from(true))]);
    let options = QueryOptions::default().with_order_by("DisplayName");

    let select = Customer::where_statement(&where_clause, &options);

    assert_eq!(
        select,
        "SELECT * FROM Customer WHERE Active = True ORDERBY DisplayName"
    );
}

#[test]
fn count_statement_wraps_where_clause() {
    assert_eq!(
        Department::count_statement("Active=True"),
        "SELECT COUNT(*) FROM Department WHERE Active=True"
    );
    assert_eq!(
        Department::count_statement(""),
        "SELECT COUNT(*) FROM Department"
    );
}
