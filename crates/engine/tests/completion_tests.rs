// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Completion behaviour against the standard test schema

use pretty_assertions::assert_eq;
use sqlsense_catalog::build_foreign_keys;
use sqlsense_engine::{CompletionEngine, CompletionRequest, EngineConfig, SchemaFilter};
use sqlsense_ir::{Candidate, CandidateKind, ColumnDescriptor, DialectId, SchemaSnapshot, TableDescriptor};
use sqlsense_test_utils::{BufferFixtures, CandidateAssertions, MockSnapshotBuilder, split_cursor};

fn standard() -> SchemaSnapshot {
    MockSnapshotBuilder::new().with_standard_schema().build()
}

fn complete_with(engine: &CompletionEngine, snapshot: &SchemaSnapshot, marked: &str, explicit: bool) -> Vec<Candidate> {
    let (buffer, cursor) = split_cursor(marked);
    let mut request = CompletionRequest::new(buffer, cursor);
    request.explicit = explicit;
    engine.complete(&request, snapshot, &build_foreign_keys(snapshot))
}

fn complete(marked: &str) -> Vec<Candidate> {
    let engine = CompletionEngine::for_dialect(DialectId::PostgreSQL);
    complete_with(&engine, &standard(), marked, true)
}

fn typed(marked: &str) -> Vec<Candidate> {
    let engine = CompletionEngine::for_dialect(DialectId::PostgreSQL);
    complete_with(&engine, &standard(), marked, false)
}

// ===== Table position =====

#[test]
fn test_prefix_match_ranks_above_substring_match() {
    let snapshot = SchemaSnapshot::new()
        .with_table(TableDescriptor::new("public", "customers"), vec![])
        .with_table(TableDescriptor::new("public", "orders"), vec![]);
    let engine = CompletionEngine::for_dialect(DialectId::PostgreSQL);

    let items = complete_with(&engine, &snapshot, "SELECT * FROM ord|", false);
    assert_eq!(CandidateAssertions::labels(&items), vec!["orders"]);

    let items = complete_with(&engine, &snapshot, "SELECT * FROM o|", false);
    CandidateAssertions::assert_ranked_before(&items, "orders", "customers");
}

#[test]
fn test_from_lists_every_table_when_explicit() {
    let items = complete(BufferFixtures::after_from());
    assert_eq!(items.len(), 5);
    CandidateAssertions::assert_all_kind(&items, CandidateKind::Table);
    CandidateAssertions::assert_unique(&items);
}

#[test]
fn test_from_without_partial_stays_quiet_unless_explicit() {
    assert!(typed(BufferFixtures::after_from()).is_empty());
}

#[test]
fn test_join_target_prefers_same_schema() {
    let items = complete(BufferFixtures::join_target());
    CandidateAssertions::assert_ranked_before(&items, "products", "events");
    let events = CandidateAssertions::find(&items, "events", CandidateKind::Table).unwrap();
    assert_eq!(events.detail.as_deref(), Some("table in analytics"));
}

#[test]
fn test_duplicate_table_names_are_schema_qualified() {
    let snapshot = MockSnapshotBuilder::new()
        .with_standard_schema()
        .with_table(
            TableDescriptor::new("analytics", "customers"),
            vec![ColumnDescriptor::new("id", "bigint")],
        )
        .build();
    let engine = CompletionEngine::for_dialect(DialectId::PostgreSQL);
    let items = complete_with(&engine, &snapshot, "SELECT * FROM cust|", false);
    assert_eq!(
        CandidateAssertions::labels(&items),
        vec!["analytics.customers", "public.customers"]
    );
}

#[test]
fn test_identifiers_needing_quotes() {
    let snapshot = SchemaSnapshot::new().with_table(
        TableDescriptor::new("public", "Order Details"),
        vec![ColumnDescriptor::new("Unit Price", "numeric")],
    );
    let engine = CompletionEngine::for_dialect(DialectId::PostgreSQL);

    let items = complete_with(&engine, &snapshot, "SELECT * FROM Ord|", false);
    assert_eq!(items[0].insert_text, "\"Order Details\"");

    let items = complete_with(&engine, &snapshot, "SELECT d.| FROM \"Order Details\" d", false);
    assert_eq!(items[0].label, "Unit Price");
    assert_eq!(items[0].insert_text, "\"Unit Price\"");
}

// ===== Dot access =====

#[test]
fn test_alias_dot_offers_only_bound_columns() {
    let items = typed(BufferFixtures::alias_dot());
    assert_eq!(
        CandidateAssertions::labels(&items),
        vec!["created_at", "customer_id", "id", "total"]
    );
    CandidateAssertions::assert_all_kind(&items, CandidateKind::Column);
}

#[test]
fn test_dot_partial_filters_columns() {
    let items = typed("SELECT o.cu| FROM orders o");
    assert_eq!(CandidateAssertions::labels(&items), vec!["customer_id"]);
    assert_eq!(
        items[0].detail.as_deref(),
        Some("bigint (public.orders) references public.customers.id")
    );
}

#[test]
fn test_unbound_table_name_qualifier() {
    let items = typed("SELECT products.| FROM orders");
    assert_eq!(CandidateAssertions::labels(&items), vec!["id", "name", "price"]);
}

#[test]
fn test_schema_qualifier_lists_schema_tables() {
    let items = typed("SELECT * FROM analytics.|");
    assert_eq!(CandidateAssertions::labels(&items), vec!["events"]);
}

#[test]
fn test_unknown_qualifier_offers_nothing() {
    assert!(typed("SELECT zz.| FROM orders o").is_empty());
}

// ===== Join conditions =====

#[test]
fn test_join_on_offers_foreign_key_conditions() {
    let items = complete(BufferFixtures::join_condition());
    assert_eq!(items[0].label, "o.customer_id = c.id");
    assert_eq!(items[0].kind, CandidateKind::Snippet);

    // One side referenced: the other side is named by its table
    CandidateAssertions::assert_contains(&items, "order_items.order_id = o.id");
    CandidateAssertions::assert_contains(&items, "events.customer_id = c.id");
    CandidateAssertions::assert_ranked_before(&items, "events.customer_id = c.id", "c.email");
    CandidateAssertions::assert_ranked_before(&items, "o.total", "AND");
}

#[test]
fn test_aliases_are_inserted_as_written() {
    let items = complete("SELECT * FROM orders O JOIN customers C ON |");
    assert_eq!(items[0].label, "O.customer_id = C.id");
    assert_eq!(items[0].insert_text, "O.customer_id = C.id");
    let column = CandidateAssertions::find(&items, "C.id", CandidateKind::Column).unwrap();
    assert_eq!(column.insert_text, "C.id");

    let items = complete("SELECT * FROM orders \"Ord\" JOIN customers c ON |");
    assert_eq!(items[0].label, "Ord.customer_id = c.id");
    assert_eq!(items[0].insert_text, "\"Ord\".customer_id = c.id");
}

#[test]
fn test_join_on_after_and() {
    let items = complete("SELECT * FROM orders o JOIN customers c ON o.customer_id = c.id AND |");
    assert_eq!(items[0].label, "o.customer_id = c.id");
}

// ===== Expressions =====

#[test]
fn test_where_prefix_prefers_columns() {
    let items = typed("SELECT * FROM orders WHERE to|");
    assert_eq!(items[0].label, "total");
    CandidateAssertions::assert_contains(&items, "TO_CHAR");
}

#[test]
fn test_operator_position() {
    let items = complete("SELECT * FROM orders o WHERE o.total > |");
    CandidateAssertions::assert_ranked_before(&items, "created_at", "COUNT");
    CandidateAssertions::assert_lacks(&items, "email");
    CandidateAssertions::assert_unique(&items);
}

#[test]
fn test_second_statement_uses_its_own_tables() {
    let items = complete(BufferFixtures::second_statement());
    CandidateAssertions::assert_contains(&items, "total");
    CandidateAssertions::assert_lacks(&items, "email");
}

#[test]
fn test_literals_yield_nothing() {
    assert!(complete(BufferFixtures::inside_string()).is_empty());
    assert!(complete("SELECT 1 -- FROM |").is_empty());
}

#[test]
fn test_separator_in_string_does_not_split() {
    let items = complete(BufferFixtures::separator_in_string());
    CandidateAssertions::assert_contains(&items, "customer_id");
}

// ===== Top level and snippets =====

#[test]
fn test_snippets_rank_first() {
    let engine = CompletionEngine::for_dialect(DialectId::Generic);
    let items = complete_with(&engine, &standard(), "sel|", false);
    assert_eq!(items[0].label, "sel");
    assert_eq!(items[0].kind, CandidateKind::Snippet);
    let select = CandidateAssertions::find(&items, "SELECT", CandidateKind::Keyword).unwrap();
    assert_eq!(select.insert_text, "select");
}

#[test]
fn test_snippets_match_in_any_position() {
    let items = typed("SELECT * FROM orders WHERE id = cn|");
    assert_eq!((items[0].label.as_str(), items[0].kind), ("cnt", CandidateKind::Snippet));

    let items = typed("SELECT * FROM orders o JOIN customers c ON cn|");
    assert_eq!((items[0].label.as_str(), items[0].kind), ("cnt", CandidateKind::Snippet));

    // Member access after a dot never offers snippets
    CandidateAssertions::assert_lacks(&typed("SELECT o.cn| FROM orders o"), "cnt");
}

#[test]
fn test_create_index_offers_tables() {
    let items = complete("CREATE INDEX idx_orders ON |");
    assert_eq!(items.len(), 5);
    CandidateAssertions::assert_all_kind(&items, CandidateKind::Table);
}

#[test]
fn test_config_toggles() {
    let mut config = EngineConfig::new(DialectId::Generic);
    config.include_snippets = false;
    config.include_functions = false;
    let engine = CompletionEngine::new(config);

    let items = complete_with(&engine, &standard(), "sel|", false);
    CandidateAssertions::assert_lacks(&items, "sel");
    let items = complete_with(&engine, &standard(), "SELECT * FROM orders WHERE co|", false);
    CandidateAssertions::assert_lacks(&items, "COUNT");
}

#[test]
fn test_schema_filter_applies_everywhere() {
    let mut config = EngineConfig::new(DialectId::PostgreSQL);
    config.schema_filter = SchemaFilter::new().allow_schema("public").exclude_table("items");
    let engine = CompletionEngine::new(config);

    let items = complete_with(&engine, &standard(), BufferFixtures::after_from(), true);
    assert_eq!(
        CandidateAssertions::labels(&items),
        vec!["customers", "orders", "products"]
    );

    let items = complete_with(&engine, &standard(), BufferFixtures::join_condition(), true);
    CandidateAssertions::assert_lacks(&items, "order_items.order_id = o.id");
    CandidateAssertions::assert_lacks(&items, "events.customer_id = c.id");
}

// ===== Key-value and document languages =====

#[test]
fn test_redis_commands_and_keys() {
    let snapshot = MockSnapshotBuilder::new()
        .with_key_patterns(&["user:*", "session:*"])
        .build();
    let engine = CompletionEngine::for_dialect(DialectId::Redis);

    let items = complete_with(&engine, &snapshot, BufferFixtures::redis_command(), false);
    assert_eq!(&CandidateAssertions::labels(&items)[..2], &["SELECT", "SET"]);
    CandidateAssertions::assert_contains(&items, "HSET");

    let items = complete_with(&engine, &snapshot, BufferFixtures::redis_key(), false);
    assert_eq!(CandidateAssertions::labels(&items), vec!["user:*"]);
    assert_eq!(items[0].insert_text, "user:");

    let items = complete_with(&engine, &snapshot, "SET k v |", true);
    CandidateAssertions::assert_contains(&items, "EX");
    CandidateAssertions::assert_lacks(&items, "user:*");
}

#[test]
fn test_mongo_positions() {
    let snapshot = MockSnapshotBuilder::new()
        .with_collection("shop", "users", &["name", "email", "age"])
        .with_collection("shop", "orders", &["total"])
        .build();
    let engine = CompletionEngine::for_dialect(DialectId::MongoDB);

    let items = complete_with(&engine, &snapshot, BufferFixtures::mongo_collection(), false);
    assert_eq!(CandidateAssertions::labels(&items), vec!["orders", "users"]);
    assert_eq!(items[0].detail.as_deref(), Some("collection in shop"));

    let items = complete_with(&engine, &snapshot, BufferFixtures::mongo_method(), false);
    assert_eq!(CandidateAssertions::labels(&items), vec!["find", "findOne"]);
    CandidateAssertions::assert_all_kind(&items, CandidateKind::Function);

    let items = complete_with(&engine, &snapshot, BufferFixtures::mongo_field(), true);
    assert_eq!(&CandidateAssertions::labels(&items)[..3], &["age", "email", "name"]);
    CandidateAssertions::assert_ranked_before(&items, "$gt", "ObjectId");

    let items = complete_with(&engine, &snapshot, "db.users.find({ \"na|", false);
    assert_eq!(CandidateAssertions::labels(&items), vec!["name"]);
}

#[test]
fn test_mongo_commands_on_later_lines() {
    let snapshot = MockSnapshotBuilder::new()
        .with_collection("shop", "users", &["name"])
        .with_collection("shop", "orders", &["total"])
        .build();
    let engine = CompletionEngine::for_dialect(DialectId::MongoDB);

    let items = complete_with(&engine, &snapshot, "db.users.find({})\ndb.|", false);
    assert_eq!(CandidateAssertions::labels(&items), vec!["orders", "users"]);

    let items = complete_with(&engine, &snapshot, "db.users.find({})\n|", true);
    CandidateAssertions::assert_contains(&items, "db");
    CandidateAssertions::assert_contains(&items, "show");
    CandidateAssertions::assert_lacks(&items, "users");

    let items = complete_with(&engine, &snapshot, "use shop\ndb.orders.agg|", false);
    assert_eq!(CandidateAssertions::labels(&items), vec!["aggregate"]);
}
