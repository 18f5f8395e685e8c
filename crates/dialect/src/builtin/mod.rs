// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Builtin dialect profiles
//!
//! One module per query language. Relational dialects start from the ANSI
//! base in [`sql`] and layer their own vocabulary and quoting on top.

pub mod cassandra;
pub mod mongodb;
pub mod mysql;
pub mod postgresql;
pub mod redis;
pub mod sql;
pub mod sqlite;
pub mod sqlserver;
