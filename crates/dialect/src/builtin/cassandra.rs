// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Cassandra Query Language profile
//!
//! CQL reuses the relational surface; keyspaces play the role of schemas.
//! Only the untagged `$$ ... $$` block string is recognized.

use crate::profile::{
    BlockComment, CommandSpec, DialectProfile, DialectProfileBuilder, EscapeStyle, ExtendedQuote,
    FunctionSpec, QuoteRule, Snippet,
};
use sqlsense_ir::DialectId;

const KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "AND", "IN", "CONTAINS", "KEY", "INSERT", "INTO", "VALUES",
    "UPDATE", "SET", "DELETE", "USING", "TTL", "TIMESTAMP", "IF", "NOT", "EXISTS", "CREATE",
    "ALTER", "DROP", "KEYSPACE", "TABLE", "TYPE", "INDEX", "MATERIALIZED", "VIEW", "PRIMARY",
    "WITH", "CLUSTERING", "ORDER", "BY", "ASC", "DESC", "LIMIT", "ALLOW", "FILTERING", "BATCH",
    "APPLY", "BEGIN", "TRUNCATE", "USE", "GRANT", "REVOKE", "REPLICATION", "PER", "PARTITION",
    "DISTINCT", "AS", "NULL", "TOKEN",
];

const FUNCTIONS: &[FunctionSpec] = &[
    FunctionSpec::new("NOW", "now()", "Time-based UUID for the current time"),
    FunctionSpec::new("UUID", "uuid()", "Random UUID"),
    FunctionSpec::new("TOTIMESTAMP", "toTimestamp(timeuuid)", "Convert to timestamp"),
    FunctionSpec::new("WRITETIME", "writetime(column)", "Write timestamp of a cell"),
    FunctionSpec::new("TTL", "ttl(column)", "Remaining time-to-live of a cell"),
    FunctionSpec::new("TOKEN", "token(partition_key)", "Partitioner token"),
    FunctionSpec::new("COUNT", "count(*)", "Count the number of rows"),
];

const STATEMENT_STARTERS: &[CommandSpec] = &[
    CommandSpec::new("SELECT", "Query rows"),
    CommandSpec::new("INSERT", "Insert a row"),
    CommandSpec::new("UPDATE", "Update a row"),
    CommandSpec::new("DELETE", "Delete rows"),
    CommandSpec::new("BEGIN", "Start a batch"),
    CommandSpec::new("CREATE", "Create a keyspace, table or index"),
    CommandSpec::new("ALTER", "Alter a keyspace or table"),
    CommandSpec::new("DROP", "Drop an object"),
    CommandSpec::new("TRUNCATE", "Empty a table"),
    CommandSpec::new("USE", "Switch keyspace"),
];

pub fn profile() -> DialectProfile {
    DialectProfileBuilder::new(DialectId::Cassandra, "Cassandra CQL")
        .keywords(KEYWORDS)
        .functions(FUNCTIONS)
        .top_level(STATEMENT_STARTERS)
        .snippets(&[
            Snippet::new("sel", "SELECT * FROM ", "Select all columns"),
            Snippet::new("batch", "BEGIN BATCH\n\nAPPLY BATCH;", "Logged batch"),
        ])
        .separators(&[';'])
        .quote(QuoteRule::string('\'', EscapeStyle::Doubled))
        .quote(QuoteRule::identifier('"', '"'))
        .extended_quote(Some(ExtendedQuote::DollarTagged { tagged: false }))
        .line_comment("--")
        .line_comment("//")
        .block_comment(Some(BlockComment {
            open: "/*",
            close: "*/",
            nested: false,
        }))
        .table_markers(&["FROM", "INTO", "UPDATE", "TABLE", "TRUNCATE"])
        .clause_markers(&["SELECT", "WHERE", "SET", "USING", "ORDER", "LIMIT", "VALUES", "IF"])
        .definition_keywords(&["CREATE"])
        .identifier_quote(Some(('"', '"')))
        .build()
}
