// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Table-scoped read queries.
//!
//! A `Query` is backend-neutral: the REST client renders it as a PostgREST
//! query string, the fixture store evaluates it in memory.

use serde_json::Value;

/// Comparison applied by a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lt,
    /// Identity check, used for `null`.
    Is,
}

impl FilterOp {
    fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Gte => "gte",
            FilterOp::Lt => "lt",
            FilterOp::Is => "is",
        }
    }
}

/// `column <op> value`
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Self {
            column: column.to_string(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn is_null(column: &str) -> Self {
        Self {
            column: column.to_string(),
            op: FilterOp::Is,
            value: Value::Null,
        }
    }

    /// PostgREST form: (`column`, `eq.value`).
    pub fn to_param(&self) -> (String, String) {
        (
            self.column.clone(),
            format!("{}.{}", self.op.as_str(), value_to_param(&self.value)),
        )
    }
}

/// Sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// How an embedded relation is joined to its parent row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Join {
    /// Single row whose `id` equals the parent's `local_column`.
    ToOne { local_column: String },
    /// Rows whose `foreign_column` equals the parent's `id`.
    ToMany { foreign_column: String },
}

/// A related table embedded under `alias` in every result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub alias: String,
    pub table: String,
    /// Foreign-key constraint name used to disambiguate the join.
    pub hint: Option<String>,
    pub join: Join,
    pub nested: Vec<Embed>,
}

impl Embed {
    /// `alias:table(*)` resolved through the parent's `local_column`.
    pub fn to_one(alias: &str, table: &str, local_column: &str) -> Self {
        Self {
            alias: alias.to_string(),
            table: table.to_string(),
            hint: None,
            join: Join::ToOne {
                local_column: local_column.to_string(),
            },
            nested: Vec::new(),
        }
    }

    /// `table(*)` of rows pointing back at the parent through `foreign_column`.
    pub fn to_many(table: &str, foreign_column: &str) -> Self {
        Self {
            alias: table.to_string(),
            table: table.to_string(),
            hint: None,
            join: Join::ToMany {
                foreign_column: foreign_column.to_string(),
            },
            nested: Vec::new(),
        }
    }

    pub fn hint(mut self, constraint: &str) -> Self {
        self.hint = Some(constraint.to_string());
        self
    }

    pub fn with(mut self, nested: Embed) -> Self {
        self.nested.push(nested);
        self
    }

    fn to_select(&self) -> String {
        let mut out = String::new();
        if self.alias != self.table {
            out.push_str(&self.alias);
            out.push(':');
        }
        out.push_str(&self.table);
        if let Some(hint) = &self.hint {
            out.push('!');
            out.push_str(hint);
        }
        out.push('(');
        out.push_str(&select_list(&self.nested));
        out.push(')');
        out
    }
}

fn select_list(embeds: &[Embed]) -> String {
    std::iter::once("*".to_string())
        .chain(embeds.iter().map(Embed::to_select))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a JSON scalar the way PostgREST expects it in a filter.
pub fn value_to_param(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// A filtered read against one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    pub embeds: Vec<Embed>,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn from(table: &str) -> Self {
        Self {
            table: table.to_string(),
            embeds: Vec::new(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    pub fn gte(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            op: FilterOp::Gte,
            value: value.into(),
        });
        self
    }

    pub fn lt(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            op: FilterOp::Lt,
            value: value.into(),
        });
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order.push(Order {
            column: column.to_string(),
            ascending,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The `select=` column list including embedded relations.
    pub fn select_clause(&self) -> String {
        select_list(&self.embeds)
    }

    /// PostgREST query-string parameters for this query.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.select_clause())];
        params.extend(self.filters.iter().map(Filter::to_param));
        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|o| {
                    format!(
                        "{}.{}",
                        o.column,
                        if o.ascending { "asc" } else { "desc" }
                    )
                })
                .collect::<Vec<_>>()
                .join(",");
            params.push(("order".to_string(), order));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}
