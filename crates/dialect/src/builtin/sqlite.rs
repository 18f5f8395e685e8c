// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! SQLite profile

use super::sql;
use crate::profile::{CommandSpec, DialectProfile, FunctionSpec, QuoteRule};
use sqlsense_ir::DialectId;

const KEYWORDS: &[&str] = &[
    "PRAGMA", "VACUUM", "ATTACH", "DETACH", "AUTOINCREMENT", "WITHOUT", "ROWID", "GLOB",
    "REPLACE", "CONFLICT", "ABORT", "FAIL", "IGNORE", "RETURNING", "EXPLAIN",
];

const FUNCTIONS: &[FunctionSpec] = &[
    FunctionSpec::new("IFNULL", "IFNULL(x, y)", "Alternative for NULL"),
    FunctionSpec::new("GROUP_CONCAT", "GROUP_CONCAT(x, sep)", "Concatenate values from multiple rows"),
    FunctionSpec::new("STRFTIME", "STRFTIME(format, time)", "Format a date/time"),
    FunctionSpec::new("DATETIME", "DATETIME(time, modifier...)", "Date and time as text"),
    FunctionSpec::new("JSON_EXTRACT", "JSON_EXTRACT(json, path)", "Extract a value from JSON"),
    FunctionSpec::new("TYPEOF", "TYPEOF(x)", "Storage class of a value"),
    FunctionSpec::new("LENGTH", "LENGTH(x)", "String length"),
];

pub fn profile() -> DialectProfile {
    sql::base(DialectId::SQLite, "SQLite")
        .keywords(KEYWORDS)
        .functions(FUNCTIONS)
        .top_level(&[
            CommandSpec::new("PRAGMA", "Query or change a setting"),
            CommandSpec::new("VACUUM", "Rebuild the database file"),
            CommandSpec::new("ATTACH", "Attach another database"),
        ])
        .quote(QuoteRule::identifier('`', '`'))
        .quote(QuoteRule::identifier('[', ']'))
        .build()
}
