// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Redis command language profile
//!
//! One command per line. The first word is the verb; commands flagged
//! `key_arg` take a key as their first argument, which is where key patterns
//! from the snapshot are offered.

use crate::profile::{CommandSpec, DialectProfile, DialectProfileBuilder, EscapeStyle, QuoteRule};
use sqlsense_ir::DialectId;

const COMMANDS: &[CommandSpec] = &[
    CommandSpec::keyed("GET", "Get the value of a key"),
    CommandSpec::keyed("SET", "Set the string value of a key"),
    CommandSpec::keyed("DEL", "Delete a key"),
    CommandSpec::keyed("EXISTS", "Determine if a key exists"),
    CommandSpec::keyed("EXPIRE", "Set a key's time to live in seconds"),
    CommandSpec::keyed("TTL", "Get the time to live for a key"),
    CommandSpec::keyed("TYPE", "Determine the type stored at key"),
    CommandSpec::keyed("INCR", "Increment the integer value of a key"),
    CommandSpec::keyed("DECR", "Decrement the integer value of a key"),
    CommandSpec::keyed("APPEND", "Append a value to a key"),
    CommandSpec::keyed("HGET", "Get the value of a hash field"),
    CommandSpec::keyed("HSET", "Set the value of a hash field"),
    CommandSpec::keyed("HGETALL", "Get all fields and values in a hash"),
    CommandSpec::keyed("HDEL", "Delete hash fields"),
    CommandSpec::keyed("LPUSH", "Prepend values to a list"),
    CommandSpec::keyed("RPUSH", "Append values to a list"),
    CommandSpec::keyed("LPOP", "Remove and get the first element of a list"),
    CommandSpec::keyed("RPOP", "Remove and get the last element of a list"),
    CommandSpec::keyed("LRANGE", "Get a range of elements from a list"),
    CommandSpec::keyed("SADD", "Add members to a set"),
    CommandSpec::keyed("SMEMBERS", "Get all the members in a set"),
    CommandSpec::keyed("SREM", "Remove members from a set"),
    CommandSpec::keyed("ZADD", "Add members to a sorted set"),
    CommandSpec::keyed("ZRANGE", "Return a range of members in a sorted set"),
    CommandSpec::keyed("ZSCORE", "Get the score of a sorted set member"),
    CommandSpec::keyed("XADD", "Append an entry to a stream"),
    CommandSpec::keyed("XRANGE", "Return a range of stream entries"),
    CommandSpec::new("KEYS", "Find all keys matching a pattern"),
    CommandSpec::new("SCAN", "Incrementally iterate the key space"),
    CommandSpec::new("PING", "Ping the server"),
    CommandSpec::new("INFO", "Get server information"),
    CommandSpec::new("SELECT", "Change the selected database"),
    CommandSpec::new("DBSIZE", "Number of keys in the database"),
    CommandSpec::new("FLUSHDB", "Remove all keys from the current database"),
    CommandSpec::new("MULTI", "Start a transaction"),
    CommandSpec::new("EXEC", "Execute queued commands"),
    CommandSpec::new("PUBLISH", "Post a message to a channel"),
    CommandSpec::new("SUBSCRIBE", "Listen for messages on channels"),
];

/// Argument keywords offered after the key position
const OPTIONS: &[&str] = &[
    "EX", "PX", "NX", "XX", "KEEPTTL", "GET", "MATCH", "COUNT", "TYPE", "WITHSCORES", "LIMIT",
    "REV", "BYSCORE", "BYLEX",
];

pub fn profile() -> DialectProfile {
    DialectProfileBuilder::new(DialectId::Redis, "Redis")
        .keywords(OPTIONS)
        .top_level(COMMANDS)
        .separators(&['\n'])
        .quote(QuoteRule::string('"', EscapeStyle::Backslash))
        .quote(QuoteRule::string('\'', EscapeStyle::Backslash))
        .line_comment("#")
        .build()
}
