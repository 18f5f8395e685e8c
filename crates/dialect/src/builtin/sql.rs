// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! ANSI SQL base profile
//!
//! Every relational dialect extends [`base`]. The generic profile used for
//! unknown dialect identifiers is the base itself.

use crate::profile::{
    BlockComment, CommandSpec, DialectProfile, DialectProfileBuilder, EscapeStyle, FunctionSpec,
    QuoteRule, Snippet,
};
use sqlsense_ir::DialectId;

pub const KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "AND", "OR", "NOT", "IN", "IS", "NULL", "LIKE", "BETWEEN",
    "EXISTS", "AS", "DISTINCT", "ALL", "ANY", "JOIN", "INNER", "LEFT", "RIGHT", "FULL", "OUTER",
    "CROSS", "NATURAL", "ON", "USING", "GROUP", "BY", "HAVING", "ORDER", "ASC", "DESC", "LIMIT",
    "OFFSET", "UNION", "INTERSECT", "EXCEPT", "INSERT", "INTO", "VALUES", "UPDATE", "SET",
    "DELETE", "CREATE", "ALTER", "DROP", "TABLE", "VIEW", "INDEX", "PRIMARY", "FOREIGN", "KEY",
    "REFERENCES", "DEFAULT", "CONSTRAINT", "UNIQUE", "CHECK", "CASE", "WHEN", "THEN", "ELSE",
    "END", "WITH", "RECURSIVE", "TRUE", "FALSE", "TRUNCATE", "BEGIN", "COMMIT", "ROLLBACK",
    "GRANT", "REVOKE", "CAST",
];

pub const FUNCTIONS: &[FunctionSpec] = &[
    FunctionSpec::new("COUNT", "COUNT(expr)", "Count the number of rows"),
    FunctionSpec::new("SUM", "SUM(expr)", "Sum of values"),
    FunctionSpec::new("AVG", "AVG(expr)", "Average of values"),
    FunctionSpec::new("MIN", "MIN(expr)", "Minimum value"),
    FunctionSpec::new("MAX", "MAX(expr)", "Maximum value"),
    FunctionSpec::new("COALESCE", "COALESCE(value, ...)", "First non-null argument"),
    FunctionSpec::new("NULLIF", "NULLIF(a, b)", "NULL when both arguments are equal"),
    FunctionSpec::new("ABS", "ABS(x)", "Absolute value"),
    FunctionSpec::new("ROUND", "ROUND(x, digits)", "Round to nearest decimal"),
    FunctionSpec::new("UPPER", "UPPER(text)", "Convert to uppercase"),
    FunctionSpec::new("LOWER", "LOWER(text)", "Convert to lowercase"),
    FunctionSpec::new("TRIM", "TRIM(text)", "Remove leading and trailing whitespace"),
    FunctionSpec::new("SUBSTRING", "SUBSTRING(text, start, len)", "Extract substring"),
    FunctionSpec::new("CURRENT_DATE", "CURRENT_DATE", "Current date"),
    FunctionSpec::new("CURRENT_TIMESTAMP", "CURRENT_TIMESTAMP", "Current date and time"),
];

pub const STATEMENT_STARTERS: &[CommandSpec] = &[
    CommandSpec::new("SELECT", "Query rows"),
    CommandSpec::new("INSERT", "Insert rows"),
    CommandSpec::new("UPDATE", "Modify rows"),
    CommandSpec::new("DELETE", "Remove rows"),
    CommandSpec::new("WITH", "Common table expression"),
    CommandSpec::new("CREATE", "Create an object"),
    CommandSpec::new("ALTER", "Change an object"),
    CommandSpec::new("DROP", "Remove an object"),
    CommandSpec::new("TRUNCATE", "Empty a table"),
    CommandSpec::new("BEGIN", "Start a transaction"),
    CommandSpec::new("COMMIT", "Commit the transaction"),
    CommandSpec::new("ROLLBACK", "Abort the transaction"),
];

pub const SNIPPETS: &[Snippet] = &[
    Snippet::new("sel", "SELECT * FROM ", "Select all columns"),
    Snippet::new("selw", "SELECT * FROM  WHERE ", "Select with filter"),
    Snippet::new("ins", "INSERT INTO  () VALUES ()", "Insert a row"),
    Snippet::new("upd", "UPDATE  SET  WHERE ", "Update rows"),
    Snippet::new("del", "DELETE FROM  WHERE ", "Delete rows"),
    Snippet::new("cnt", "SELECT COUNT(*) FROM ", "Count rows"),
];

pub const TABLE_MARKERS: &[&str] = &["FROM", "JOIN", "INTO", "UPDATE", "TABLE", "TRUNCATE"];

pub const JOIN_MARKERS: &[&str] = &["ON"];

pub const CLAUSE_MARKERS: &[&str] = &[
    "SELECT", "WHERE", "SET", "GROUP", "ORDER", "HAVING", "LIMIT", "OFFSET", "VALUES", "USING",
    "UNION", "INTERSECT", "EXCEPT", "RETURNING",
];

pub const DEFINITION_KEYWORDS: &[&str] = &["CREATE"];

/// ANSI base builder shared by the relational dialects
pub fn base(id: DialectId, name: &'static str) -> DialectProfileBuilder {
    DialectProfileBuilder::new(id, name)
        .keywords(KEYWORDS)
        .functions(FUNCTIONS)
        .top_level(STATEMENT_STARTERS)
        .snippets(SNIPPETS)
        .separators(&[';'])
        .quote(QuoteRule::string('\'', EscapeStyle::Doubled))
        .quote(QuoteRule::identifier('"', '"'))
        .line_comment("--")
        .block_comment(Some(BlockComment {
            open: "/*",
            close: "*/",
            nested: false,
        }))
        .table_markers(TABLE_MARKERS)
        .join_markers(JOIN_MARKERS)
        .clause_markers(CLAUSE_MARKERS)
        .definition_keywords(DEFINITION_KEYWORDS)
        .identifier_quote(Some(('"', '"')))
}

/// Generic fallback profile
pub fn profile() -> DialectProfile {
    base(DialectId::Generic, "Generic SQL").build()
}
