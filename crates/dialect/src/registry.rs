// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

use crate::builtin;
use crate::profile::DialectProfile;
use sqlsense_ir::DialectId;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Registry of builtin dialect profiles
///
/// Profiles are built once and never mutated. Lookup is total: a dialect
/// without an entry falls back to the generic ANSI profile.
#[derive(Debug, Clone)]
pub struct DialectRegistry {
    /// Profiles organized by dialect
    profiles: HashMap<DialectId, DialectProfile>,
    generic: DialectProfile,
}

impl DialectRegistry {
    /// Create a registry with every builtin profile loaded
    pub fn new() -> Self {
        let mut registry = Self {
            profiles: HashMap::new(),
            generic: builtin::sql::profile(),
        };

        registry.insert(builtin::postgresql::profile());
        registry.insert(builtin::mysql::profile());
        registry.insert(builtin::mysql::mariadb_profile());
        registry.insert(builtin::sqlite::profile());
        registry.insert(builtin::sqlserver::profile());
        registry.insert(builtin::redis::profile());
        registry.insert(builtin::mongodb::profile());
        registry.insert(builtin::cassandra::profile());

        registry
    }

    fn insert(&mut self, profile: DialectProfile) {
        self.profiles.insert(profile.id, profile);
    }

    /// Profile for a dialect, generic when none is registered
    pub fn get(&self, dialect: DialectId) -> &DialectProfile {
        self.profiles.get(&dialect).unwrap_or(&self.generic)
    }

    /// Profile for a host-supplied identifier such as `"postgres"`
    pub fn get_by_name(&self, name: &str) -> &DialectProfile {
        self.get(DialectId::parse(name))
    }

    /// Number of distinct profiles, generic included
    pub fn len(&self) -> usize {
        self.profiles.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide registry, built on first use
pub fn registry() -> &'static DialectRegistry {
    static REGISTRY: OnceLock<DialectRegistry> = OnceLock::new();
    REGISTRY.get_or_init(DialectRegistry::new)
}

/// Look up the profile for a dialect
///
/// # Examples
///
/// ```
/// use sqlsense_dialect::profile_for;
/// use sqlsense_ir::DialectId;
///
/// let profile = profile_for(DialectId::MySQL);
/// assert_eq!(profile.identifier_quote, Some(('`', '`')));
/// ```
pub fn profile_for(dialect: DialectId) -> &'static DialectProfile {
    registry().get(dialect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ExtendedQuote, QuoteKind};
    use sqlsense_ir::LanguageFamily;

    #[test]
    fn test_every_dialect_has_a_profile_with_its_own_id() {
        let registry = DialectRegistry::new();
        for id in DialectId::ALL {
            assert_eq!(registry.get(id).id, id, "profile mismatch for {id}");
        }
        assert_eq!(registry.len(), DialectId::ALL.len());
    }

    #[test]
    fn test_unknown_name_falls_back_to_generic() {
        let profile = registry().get_by_name("oracle");
        assert_eq!(profile.id, DialectId::Generic);
        assert!(profile.is_keyword("select"));
    }

    #[test]
    fn test_postgres_quoting() {
        let pg = profile_for(DialectId::PostgreSQL);
        assert_eq!(
            pg.extended_quote,
            Some(ExtendedQuote::DollarTagged { tagged: true })
        );
        assert!(pg.block_comment.is_some_and(|c| c.nested));
        assert!(pg.is_keyword("RETURNING"));
    }

    #[test]
    fn test_mysql_double_quote_is_a_string() {
        let mysql = profile_for(DialectId::MySQL);
        let rule = mysql.quote_opened_by('"').unwrap();
        assert_eq!(rule.kind, QuoteKind::String);
        assert_eq!(mysql.quote_opened_by('`').unwrap().kind, QuoteKind::Identifier);
        assert!(mysql.line_comments.contains(&"#"));
        assert!(mysql.is_table_marker("describe"));
    }

    #[test]
    fn test_sqlserver_brackets() {
        let mssql = profile_for(DialectId::SqlServer);
        let rule = mssql.quote_opened_by('[').unwrap();
        assert_eq!(rule.close, ']');
        assert_eq!(mssql.quote_identifier("Order Details"), "[Order Details]");
    }

    #[test]
    fn test_command_languages() {
        let redis = profile_for(DialectId::Redis);
        assert_eq!(redis.family(), LanguageFamily::KeyValue);
        assert!(redis.is_separator('\n'));
        assert!(!redis.is_separator(';'));
        assert!(redis.command("hgetall").is_some_and(|c| c.key_arg));
        assert!(redis.block_comment.is_none());

        let mongo = profile_for(DialectId::MongoDB);
        assert!(mongo.methods.iter().any(|m| m.verb == "find"));
        assert!(mongo.operators.contains(&"$gt"));
    }

    #[test]
    fn test_cassandra_untagged_dollar_quotes() {
        let cql = profile_for(DialectId::Cassandra);
        assert_eq!(
            cql.extended_quote,
            Some(ExtendedQuote::DollarTagged { tagged: false })
        );
        assert!(cql.line_comments.contains(&"//"));
        assert!(!cql.is_table_marker("JOIN"));
    }
}
