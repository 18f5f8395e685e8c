// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! PostgreSQL profile
//!
//! Adds dollar-quoted block strings (`$body$ ... $body$`) and nested block
//! comments on top of the ANSI base.

use super::sql;
use crate::profile::{BlockComment, DialectProfile, ExtendedQuote, FunctionSpec, Snippet};
use sqlsense_ir::DialectId;

const KEYWORDS: &[&str] = &[
    "RETURNING", "ILIKE", "SIMILAR", "LATERAL", "MATERIALIZED", "CONCURRENTLY", "SCHEMA",
    "EXTENSION", "SEQUENCE", "FUNCTION", "LANGUAGE", "RETURNS", "DO", "CONFLICT", "NOTHING",
    "ONLY", "FETCH", "NEXT", "ROWS", "WINDOW", "OVER", "PARTITION", "FILTER", "VACUUM",
    "ANALYZE", "EXPLAIN", "COPY", "NULLS", "FIRST", "LAST",
];

const FUNCTIONS: &[FunctionSpec] = &[
    FunctionSpec::new("STRING_AGG", "STRING_AGG(expr, delimiter)", "Concatenate values with a delimiter"),
    FunctionSpec::new("ARRAY_AGG", "ARRAY_AGG(expr)", "Collect values into an array"),
    FunctionSpec::new("JSONB_BUILD_OBJECT", "JSONB_BUILD_OBJECT(key, value, ...)", "Build a JSONB object"),
    FunctionSpec::new("JSONB_AGG", "JSONB_AGG(expr)", "Aggregate values into a JSONB array"),
    FunctionSpec::new("TO_CHAR", "TO_CHAR(value, format)", "Format a value as text"),
    FunctionSpec::new("DATE_TRUNC", "DATE_TRUNC(field, source)", "Truncate a timestamp to precision"),
    FunctionSpec::new("NOW", "NOW()", "Current transaction timestamp"),
    FunctionSpec::new("GENERATE_SERIES", "GENERATE_SERIES(start, stop, step)", "Set-returning series"),
    FunctionSpec::new("ROW_NUMBER", "ROW_NUMBER() OVER (...)", "Sequential row number in a window"),
    FunctionSpec::new("LENGTH", "LENGTH(text)", "String length"),
];

const SNIPPETS: &[Snippet] = &[
    Snippet::new("upsert", "INSERT INTO  () VALUES () ON CONFLICT () DO UPDATE SET ", "Insert or update"),
    Snippet::new("fn", "CREATE FUNCTION () RETURNS  AS $$\n\n$$ LANGUAGE plpgsql;", "Function skeleton"),
];

pub fn profile() -> DialectProfile {
    sql::base(DialectId::PostgreSQL, "PostgreSQL")
        .keywords(KEYWORDS)
        .functions(FUNCTIONS)
        .snippets(SNIPPETS)
        .extended_quote(Some(ExtendedQuote::DollarTagged { tagged: true }))
        .block_comment(Some(BlockComment {
            open: "/*",
            close: "*/",
            nested: true,
        }))
        .build()
}
