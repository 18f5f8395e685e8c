// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! MySQL and MariaDB profiles

use super::sql;
use crate::profile::{
    CommandSpec, DialectProfile, DialectProfileBuilder, EscapeStyle, FunctionSpec, QuoteRule,
};
use sqlsense_ir::DialectId;

const KEYWORDS: &[&str] = &[
    "SHOW", "DATABASES", "TABLES", "COLUMNS", "DESCRIBE", "USE", "REPLACE", "IGNORE",
    "DUPLICATE", "AUTO_INCREMENT", "ENGINE", "CHARSET", "COLLATE", "STRAIGHT_JOIN", "REGEXP",
    "RLIKE", "UNSIGNED", "ZEROFILL", "LOCK", "UNLOCK", "EXPLAIN",
];

const FUNCTIONS: &[FunctionSpec] = &[
    FunctionSpec::new("GROUP_CONCAT", "GROUP_CONCAT(expr SEPARATOR sep)", "Concatenate values from multiple rows"),
    FunctionSpec::new("CONCAT", "CONCAT(str, ...)", "Concatenate strings"),
    FunctionSpec::new("CONCAT_WS", "CONCAT_WS(sep, str, ...)", "Concatenate with separator"),
    FunctionSpec::new("IFNULL", "IFNULL(expr, alt)", "Alternative for NULL"),
    FunctionSpec::new("IF", "IF(cond, then, else)", "Inline conditional"),
    FunctionSpec::new("NOW", "NOW()", "Current date and time"),
    FunctionSpec::new("DATE_FORMAT", "DATE_FORMAT(date, format)", "Format a date"),
    FunctionSpec::new("DATEDIFF", "DATEDIFF(a, b)", "Days between two dates"),
    FunctionSpec::new("JSON_EXTRACT", "JSON_EXTRACT(doc, path)", "Extract a value from JSON"),
    FunctionSpec::new("LENGTH", "LENGTH(str)", "String length in bytes"),
];

const STATEMENT_STARTERS: &[CommandSpec] = &[
    CommandSpec::new("SHOW", "List server objects"),
    CommandSpec::new("DESCRIBE", "Describe a table"),
    CommandSpec::new("USE", "Switch database"),
    CommandSpec::new("REPLACE", "Insert or replace rows"),
];

fn builder(id: DialectId, name: &'static str) -> DialectProfileBuilder {
    sql::base(id, name)
        .keywords(KEYWORDS)
        .functions(FUNCTIONS)
        .top_level(STATEMENT_STARTERS)
        .clear_quotes()
        .quote(QuoteRule::string('\'', EscapeStyle::DoubledOrBackslash))
        .quote(QuoteRule::string('"', EscapeStyle::DoubledOrBackslash))
        .quote(QuoteRule::identifier('`', '`'))
        .line_comment("#")
        .table_markers(&["DESCRIBE", "DESC"])
        .identifier_quote(Some(('`', '`')))
}

pub fn profile() -> DialectProfile {
    builder(DialectId::MySQL, "MySQL").build()
}

pub fn mariadb_profile() -> DialectProfile {
    builder(DialectId::MariaDB, "MariaDB")
        .keywords(&["RETURNING", "SEQUENCE"])
        .build()
}
