//! Column rules for each record source.
//!
//! A [`TableRules`] describes one source's fixed schema: the semantic type of
//! every column, the natural key used for deduplication, and the per-column
//! repair policy. The drop-vs-flag decision lives here as data so the
//! routines stay free of scattered conventions.

use crate::models::SourceId;
use polars::prelude::DataType;

/// Canonical semantic types recognised by the type normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticType {
    /// Signed 32-bit integer; narrowed only when observed min and max fit.
    Int32,
    /// Signed 16-bit integer; narrowed only when observed min and max fit.
    Int16,
    /// UTF-8 string.
    Text,
    /// String drawn from a small reusable value set.
    Category,
    /// Calendar date, no time component. A `format` of `None` means the
    /// permissive parser infers the layout.
    Date,
    Float64,
}

impl SemanticType {
    /// The polars dtype this semantic type materialises as.
    pub fn dtype(&self) -> DataType {
        match self {
            SemanticType::Int32 => DataType::Int32,
            SemanticType::Int16 => DataType::Int16,
            SemanticType::Text => DataType::String,
            SemanticType::Category => DataType::Categorical(None, Default::default()),
            SemanticType::Date => DataType::Date,
            SemanticType::Float64 => DataType::Float64,
        }
    }
}

/// What a parse-check anchor parses into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalParse {
    Date,
    Time,
}

/// Remediation applied when a column's value is detected invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairPolicy {
    /// The column is an anchor: an invalid value implies the whole row is
    /// corrupt, so the row is dropped (and counted).
    DropRow,
    /// Like [`RepairPolicy::DropRow`], but validity is a parse check against
    /// the given format without retyping the column.
    DropRowUnparseable {
        format: &'static str,
        kind: TemporalParse,
    },
    /// The rest of the row remains trustworthy: annotate with a boolean
    /// column instead of removing. The predicate is routine-specific.
    FlagRow { flag_column: &'static str },
}

/// One column's rule: its target type and optional repair policy.
#[derive(Debug, Clone)]
pub struct ColumnRule {
    pub name: &'static str,
    pub ty: SemanticType,
    pub policy: Option<RepairPolicy>,
}

impl ColumnRule {
    pub const fn typed(name: &'static str, ty: SemanticType) -> Self {
        Self {
            name,
            ty,
            policy: None,
        }
    }

    pub const fn with_policy(name: &'static str, ty: SemanticType, policy: RepairPolicy) -> Self {
        Self {
            name,
            ty,
            policy: Some(policy),
        }
    }
}

/// The fixed schema and repair rules for one source.
#[derive(Debug, Clone)]
pub struct TableRules {
    pub source: SourceId,
    /// Business-meaningful column used for deduplication, if the source
    /// declares one.
    pub natural_key: Option<&'static str>,
    pub columns: Vec<ColumnRule>,
}

impl TableRules {
    pub fn new(
        source: SourceId,
        natural_key: Option<&'static str>,
        columns: Vec<ColumnRule>,
    ) -> Self {
        Self {
            source,
            natural_key,
            columns,
        }
    }

    /// Look up a column's rule by name.
    pub fn rule(&self, name: &str) -> Option<&ColumnRule> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The anchor column driving the drop policy, if any.
    pub fn anchor(&self) -> Option<&ColumnRule> {
        self.columns.iter().find(|c| {
            matches!(
                c.policy,
                Some(RepairPolicy::DropRow) | Some(RepairPolicy::DropRowUnparseable { .. })
            )
        })
    }
}
