// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! SQL Server (T-SQL) profile
//!
//! Bracketed identifiers escape `]` by doubling it. Block comments nest.

use super::sql;
use crate::profile::{BlockComment, CommandSpec, DialectProfile, FunctionSpec, QuoteRule};
use sqlsense_ir::DialectId;

const KEYWORDS: &[&str] = &[
    "TOP", "NOLOCK", "OUTPUT", "MERGE", "MATCHED", "APPLY", "PIVOT", "UNPIVOT", "DECLARE",
    "EXEC", "EXECUTE", "PROCEDURE", "IDENTITY", "NVARCHAR", "GO", "TRY", "CATCH", "OFFSET",
    "FETCH", "NEXT", "ROWS", "ONLY",
];

const FUNCTIONS: &[FunctionSpec] = &[
    FunctionSpec::new("ISNULL", "ISNULL(expr, replacement)", "Replace NULL"),
    FunctionSpec::new("GETDATE", "GETDATE()", "Current date and time"),
    FunctionSpec::new("DATEADD", "DATEADD(part, n, date)", "Add an interval to a date"),
    FunctionSpec::new("DATEDIFF", "DATEDIFF(part, start, end)", "Difference between dates"),
    FunctionSpec::new("LEN", "LEN(text)", "String length"),
    FunctionSpec::new("CONVERT", "CONVERT(type, expr, style)", "Convert between types"),
    FunctionSpec::new("STRING_AGG", "STRING_AGG(expr, sep)", "Concatenate values with a separator"),
];

pub fn profile() -> DialectProfile {
    sql::base(DialectId::SqlServer, "SQL Server")
        .keywords(KEYWORDS)
        .functions(FUNCTIONS)
        .top_level(&[
            CommandSpec::new("DECLARE", "Declare a variable"),
            CommandSpec::new("EXEC", "Execute a procedure"),
            CommandSpec::new("MERGE", "Merge rows into a target"),
        ])
        .quote(QuoteRule::identifier('[', ']'))
        .block_comment(Some(BlockComment {
            open: "/*",
            close: "*/",
            nested: true,
        }))
        .table_markers(&["MERGE"])
        .identifier_quote(Some(('[', ']')))
        .build()
}
