// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! MongoDB shell profile

use crate::profile::{
    BlockComment, CommandSpec, DialectProfile, DialectProfileBuilder, EscapeStyle, FunctionSpec,
    QuoteRule, Snippet,
};
use sqlsense_ir::DialectId;

const SHELL_COMMANDS: &[CommandSpec] = &[
    CommandSpec::new("db", "Current database handle"),
    CommandSpec::new("use", "Switch database"),
    CommandSpec::new("show", "List databases or collections"),
];

const METHODS: &[CommandSpec] = &[
    CommandSpec::new("find", "Select documents"),
    CommandSpec::new("findOne", "Select a single document"),
    CommandSpec::new("insertOne", "Insert a document"),
    CommandSpec::new("insertMany", "Insert several documents"),
    CommandSpec::new("updateOne", "Update a single document"),
    CommandSpec::new("updateMany", "Update matching documents"),
    CommandSpec::new("replaceOne", "Replace a single document"),
    CommandSpec::new("deleteOne", "Delete a single document"),
    CommandSpec::new("deleteMany", "Delete matching documents"),
    CommandSpec::new("aggregate", "Run an aggregation pipeline"),
    CommandSpec::new("countDocuments", "Count matching documents"),
    CommandSpec::new("distinct", "Distinct values of a field"),
    CommandSpec::new("createIndex", "Create an index"),
    CommandSpec::new("drop", "Drop the collection"),
];

const OPERATORS: &[&str] = &[
    "$eq", "$ne", "$gt", "$gte", "$lt", "$lte", "$in", "$nin", "$and", "$or", "$not", "$nor",
    "$exists", "$regex", "$elemMatch", "$size", "$set", "$unset", "$inc", "$push", "$pull",
    "$match", "$group", "$project", "$sort", "$limit", "$skip", "$lookup", "$unwind",
];

const KEYWORDS: &[&str] = &["true", "false", "null", "dbs", "collections"];

const FUNCTIONS: &[FunctionSpec] = &[
    FunctionSpec::new("ObjectId", "ObjectId(hex)", "Document identifier"),
    FunctionSpec::new("ISODate", "ISODate(text)", "Date from an ISO-8601 string"),
    FunctionSpec::new("NumberLong", "NumberLong(n)", "64-bit integer"),
    FunctionSpec::new("NumberDecimal", "NumberDecimal(text)", "128-bit decimal"),
];

pub fn profile() -> DialectProfile {
    DialectProfileBuilder::new(DialectId::MongoDB, "MongoDB")
        .keywords(KEYWORDS)
        .functions(FUNCTIONS)
        .top_level(SHELL_COMMANDS)
        .methods(METHODS)
        .operators(OPERATORS)
        .snippets(&[
            Snippet::new("find", "db..find({})", "Find documents"),
            Snippet::new("agg", "db..aggregate([{ $match: {} }])", "Aggregation pipeline"),
        ])
        .separators(&[';'])
        .quote(QuoteRule::string('\'', EscapeStyle::Backslash))
        .quote(QuoteRule::string('"', EscapeStyle::Backslash))
        .quote(QuoteRule::string('`', EscapeStyle::Backslash))
        .line_comment("//")
        .block_comment(Some(BlockComment {
            open: "/*",
            close: "*/",
            nested: false,
        }))
        .build()
}
