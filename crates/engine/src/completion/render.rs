// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Completion rendering
//!
//! This module turns schema metadata and dialect vocabulary into
//! [`Candidate`] values. Boosts are assigned later by the generator; every
//! candidate leaves here with a boost of zero.

use sqlsense_dialect::{CommandSpec, DialectProfile, FunctionSpec, Snippet};
use sqlsense_ir::{Candidate, CandidateKind, ColumnDescriptor, TableDescriptor};

/// The name written before a `.` in inserted text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier<'a> {
    /// An alias or table name taken from the statement, inserted as written
    Written { name: &'a str, quoted: bool },
    /// A table name taken from the schema, quoted when the dialect needs it
    Schema(&'a str),
}

impl<'a> Qualifier<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            Qualifier::Written { name, .. } | Qualifier::Schema(name) => name,
        }
    }
}

/// Candidate renderer
///
/// Schema-derived identifiers are quoted with the dialect's identifier quote
/// whenever the bare name would not lex back as the same identifier. Names
/// the user typed keep the form they were typed in.
pub struct CandidateRenderer<'p> {
    profile: &'p DialectProfile,
}

impl<'p> CandidateRenderer<'p> {
    pub fn new(profile: &'p DialectProfile) -> Self {
        Self { profile }
    }

    /// Render a table, optionally labelled with its schema
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlsense_dialect::profile_for;
    /// use sqlsense_engine::completion::render::CandidateRenderer;
    /// use sqlsense_ir::{DialectId, TableDescriptor};
    ///
    /// let renderer = CandidateRenderer::new(profile_for(DialectId::PostgreSQL));
    /// let item = renderer.table(&TableDescriptor::new("sales", "Order Items"), true);
    /// assert_eq!(item.label, "sales.Order Items");
    /// assert_eq!(item.insert_text, "sales.\"Order Items\"");
    /// ```
    pub fn table(&self, table: &TableDescriptor, show_schema: bool) -> Candidate {
        let (label, insert) = if show_schema && !table.schema.is_empty() {
            (
                format!("{}.{}", table.schema, table.name),
                format!(
                    "{}.{}",
                    self.profile.quote_identifier(&table.schema),
                    self.profile.quote_identifier(&table.name)
                ),
            )
        } else {
            (
                table.name.clone(),
                self.profile.quote_identifier(&table.name),
            )
        };
        Candidate::new(label, CandidateKind::Table)
            .with_detail(Self::format_table_detail(table))
            .with_insert_text(insert)
    }

    /// Render a column, optionally qualified (`o.customer_id`)
    pub fn column(
        &self,
        column: &ColumnDescriptor,
        table: &TableDescriptor,
        qualifier: Option<Qualifier<'_>>,
    ) -> Candidate {
        let quoted = self.profile.quote_identifier(&column.name);
        let (label, insert) = match qualifier {
            Some(q) => (
                format!("{}.{}", q.name(), column.name),
                format!("{}.{}", self.qualifier_text(q), quoted),
            ),
            None => (column.name.clone(), quoted),
        };
        Candidate::new(label, CandidateKind::Column)
            .with_detail(Self::format_column_detail(column, table))
            .with_insert_text(insert)
    }

    /// Render a `left = right` join condition from a foreign key
    pub fn join_condition(
        &self,
        source: (Qualifier<'_>, &str),
        target: (Qualifier<'_>, &str),
        detail: String,
    ) -> Candidate {
        let side = |(qualifier, column): (Qualifier<'_>, &str)| {
            format!(
                "{}.{}",
                self.qualifier_text(qualifier),
                self.profile.quote_identifier(column)
            )
        };
        let label = format!(
            "{}.{} = {}.{}",
            source.0.name(),
            source.1,
            target.0.name(),
            target.1
        );
        Candidate::new(label, CandidateKind::Snippet)
            .with_detail(detail)
            .with_insert_text(format!("{} = {}", side(source), side(target)))
    }

    /// Render a keyword, matching the case the user is typing in
    pub fn keyword(&self, keyword: &str, partial: &str) -> Candidate {
        let insert = if !partial.is_empty() && partial.chars().all(|c| !c.is_uppercase()) {
            keyword.to_lowercase()
        } else {
            keyword.to_string()
        };
        Candidate::new(keyword, CandidateKind::Keyword)
            .with_detail("keyword")
            .with_insert_text(insert)
    }

    /// Render a statement starter or command verb
    pub fn verb(&self, command: &CommandSpec, partial: &str) -> Candidate {
        let mut item = self.keyword(command.verb, partial);
        item.detail = Some(command.summary.to_string());
        item
    }

    pub fn function(&self, function: &FunctionSpec) -> Candidate {
        Candidate::new(function.name, CandidateKind::Function)
            .with_detail(format!("{}: {}", function.signature, function.description))
            .with_insert_text(format!("{}(", function.name))
    }

    /// Render a collection method (`find`, `aggregate`, ...)
    pub fn method(&self, method: &CommandSpec) -> Candidate {
        Candidate::new(method.verb, CandidateKind::Function)
            .with_detail(method.summary)
            .with_insert_text(format!("{}(", method.verb))
    }

    /// Render a document query operator such as `$gt`
    pub fn operator(&self, operator: &str) -> Candidate {
        Candidate::new(operator, CandidateKind::Keyword).with_detail("operator")
    }

    /// Render a key pattern; the trailing wildcard is not inserted
    pub fn key_pattern(&self, pattern: &str) -> Candidate {
        let insert = pattern.trim_end_matches('*');
        Candidate::new(pattern, CandidateKind::Table)
            .with_detail("key pattern")
            .with_insert_text(insert)
    }

    pub fn snippet(&self, snippet: &Snippet) -> Candidate {
        Candidate::new(snippet.trigger, CandidateKind::Snippet)
            .with_detail(snippet.description)
            .with_insert_text(snippet.body)
    }

    /// Render a document field
    pub fn field(&self, column: &ColumnDescriptor, collection: &TableDescriptor) -> Candidate {
        Candidate::new(column.name.clone(), CandidateKind::Column)
            .with_detail(format!("field of {}", collection.name))
    }

    fn qualifier_text(&self, qualifier: Qualifier<'_>) -> String {
        match qualifier {
            Qualifier::Written { name, quoted: false } => name.to_string(),
            Qualifier::Written { name, quoted: true } => self.profile.delimit_identifier(name),
            Qualifier::Schema(name) => self.profile.quote_identifier(name),
        }
    }

    /// Format the detail string for a table
    ///
    /// Shows the schema name and table kind
    fn format_table_detail(table: &TableDescriptor) -> String {
        if table.schema.is_empty() {
            table.kind.label().to_string()
        } else {
            format!("{} in {}", table.kind.label(), table.schema)
        }
    }

    /// Format the detail string for a column
    ///
    /// Shows the data type and the owning table
    fn format_column_detail(column: &ColumnDescriptor, table: &TableDescriptor) -> String {
        let mut detail = if column.data_type.is_empty() {
            table.qualified_name()
        } else {
            format!("{} ({})", column.data_type, table.qualified_name())
        };
        if let Some(reference) = column
            .foreign_key_ref
            .as_deref()
            .filter(|_| column.is_foreign_key)
        {
            detail.push_str(" references ");
            detail.push_str(reference);
        }
        detail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sqlsense_dialect::profile_for;
    use sqlsense_ir::DialectId;

    #[test]
    fn test_table_detail_and_quoting() {
        let renderer = CandidateRenderer::new(profile_for(DialectId::MySQL));
        let item = renderer.table(&TableDescriptor::new("shop", "order"), false);
        assert_eq!(item.label, "order");
        // ORDER is a keyword
        assert_eq!(item.insert_text, "`order`");
        assert_eq!(item.detail.as_deref(), Some("table in shop"));
    }

    #[test]
    fn test_column_detail() {
        let renderer = CandidateRenderer::new(profile_for(DialectId::PostgreSQL));
        let table = TableDescriptor::new("public", "orders");
        let column = ColumnDescriptor::new("customer_id", "int").with_foreign_key("customers.id");
        let item = renderer.column(&column, &table, Some(Qualifier::Written { name: "o", quoted: false }));
        assert_eq!(item.label, "o.customer_id");
        assert_eq!(item.insert_text, "o.customer_id");
        assert_eq!(
            item.detail.as_deref(),
            Some("int (public.orders) references customers.id")
        );
    }

    #[test]
    fn test_keyword_follows_typed_case() {
        let renderer = CandidateRenderer::new(profile_for(DialectId::Generic));
        assert_eq!(renderer.keyword("SELECT", "sel").insert_text, "select");
        assert_eq!(renderer.keyword("SELECT", "SEL").insert_text, "SELECT");
        assert_eq!(renderer.keyword("SELECT", "").insert_text, "SELECT");
    }

    #[test]
    fn test_key_pattern_drops_wildcard() {
        let renderer = CandidateRenderer::new(profile_for(DialectId::Redis));
        let item = renderer.key_pattern("user:*");
        assert_eq!(item.label, "user:*");
        assert_eq!(item.insert_text, "user:");
    }

    #[test]
    fn test_join_condition_quotes_each_side() {
        let renderer = CandidateRenderer::new(profile_for(DialectId::SqlServer));
        let item = renderer.join_condition(
            (Qualifier::Written { name: "o", quoted: false }, "Customer Id"),
            (Qualifier::Schema("Customers"), "id"),
            "foreign key".to_string(),
        );
        assert_eq!(item.label, "o.Customer Id = Customers.id");
        assert_eq!(item.insert_text, "o.[Customer Id] = [Customers].id");
        assert_eq!(item.kind, CandidateKind::Snippet);
    }

    #[test]
    fn test_written_qualifier_keeps_its_form() {
        let renderer = CandidateRenderer::new(profile_for(DialectId::PostgreSQL));
        let table = TableDescriptor::new("public", "orders");
        let column = ColumnDescriptor::new("id", "int");

        let bare = renderer.column(&column, &table, Some(Qualifier::Written { name: "O", quoted: false }));
        assert_eq!(bare.insert_text, "O.id");

        let quoted = renderer.column(&column, &table, Some(Qualifier::Written { name: "o", quoted: true }));
        assert_eq!(quoted.label, "o.id");
        assert_eq!(quoted.insert_text, "\"o\".id");
    }
}
