use std::fmt;
use std::str::FromStr;

use sqlx::{QueryBuilder, Sqlite};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SearchParseError {
    #[error("search clause {0:?} is not of the form field==value")]
    MalformedClause(String),
    #[error("search field {0:?} is not supported")]
    UnknownField(String),
    #[error("search clause for {0} has an empty value")]
    EmptyValue(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Activity,
    Type,
    Participants,
    Price,
    Accessibility,
    Link,
}

impl SearchField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "activity" => Some(Self::Activity),
            "type" => Some(Self::Type),
            "participants" => Some(Self::Participants),
            "price" => Some(Self::Price),
            "accessibility" => Some(Self::Accessibility),
            "link" => Some(Self::Link),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Type => "type",
            Self::Participants => "participants",
            Self::Price => "price",
            Self::Accessibility => "accessibility",
            Self::Link => "link",
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Type => "activity_type",
            Self::Participants => "participants",
            Self::Price => "price",
            Self::Accessibility => "accessibility",
            Self::Link => "link",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchClause {
    pub field: SearchField,
    pub value: String,
}

impl SearchClause {
    fn is_wildcard(&self) -> bool {
        self.value.contains('*')
    }

    fn like_pattern(&self) -> String {
        let mut out = String::with_capacity(self.value.len());
        for c in self.value.chars() {
            match c {
                '\\' | '%' | '_' => {
                    out.push('\\');
                    out.push(c);
                }
                '*' => out.push('%'),
                _ => out.push(c),
            }
        }
        out
    }
}

/// A conjunction of `field==value` clauses, written `a==x;b==y`.
/// A `*` in a value matches any run of characters.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilter {
    clauses: Vec<SearchClause>,
}

impl SearchFilter {
    pub fn clauses(&self) -> &[SearchClause] {
        &self.clauses
    }

    /// Appends ` WHERE ...` with bound values to `builder`.
    pub fn push_where(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        for (i, clause) in self.clauses.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            builder.push(clause.field.column());
            if clause.is_wildcard() {
                builder.push(" LIKE ");
                builder.push_bind(clause.like_pattern());
                builder.push(" ESCAPE '\\'");
            } else {
                builder.push(" = ");
                builder.push_bind(clause.value.clone());
            }
        }
    }
}

impl FromStr for SearchFilter {
    type Err = SearchParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut clauses = Vec::new();
        for part in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let Some((name, value)) = part.split_once("==") else {
                return Err(SearchParseError::MalformedClause(part.to_string()));
            };
            let name = name.trim();
            let field = SearchField::parse(name)
                .ok_or_else(|| SearchParseError::UnknownField(name.to_string()))?;
            let value = value.trim();
            if value.is_empty() {
                return Err(SearchParseError::EmptyValue(field.name()));
            }
            // Types are stored lowercased.
            let value = match field {
                SearchField::Type => value.to_lowercase(),
                _ => value.to_string(),
            };
            clauses.push(SearchClause { field, value });
        }
        if clauses.is_empty() {
            return Err(SearchParseError::MalformedClause(raw.to_string()));
        }
        Ok(Self { clauses })
    }
}

impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{}=={}", clause.field.name(), clause.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_clause() {
        let filter: SearchFilter = "type==busywork".parse().unwrap();
        assert_eq!(
            filter.clauses(),
            &[SearchClause {
                field: SearchField::Type,
                value: "busywork".to_string()
            }]
        );
    }

    #[test]
    fn type_value_is_lowercased_like_stored_types() {
        let filter: SearchFilter = "type==Music;activity==Learn Guitar".parse().unwrap();
        assert_eq!(filter.clauses()[0].value, "music");
        assert_eq!(filter.clauses()[1].value, "Learn Guitar");
    }

    #[test]
    fn parses_conjunction_and_ignores_stray_separators() {
        let filter: SearchFilter = " type==social ; participants==2;".parse().unwrap();
        assert_eq!(filter.clauses().len(), 2);
        assert_eq!(filter.to_string(), "type==social;participants==2");
    }

    #[test]
    fn rejects_unknown_field() {
        let err = "color==red".parse::<SearchFilter>().unwrap_err();
        assert_eq!(err, SearchParseError::UnknownField("color".to_string()));
    }

    #[test]
    fn rejects_clause_without_operator() {
        let err = "type=busywork".parse::<SearchFilter>().unwrap_err();
        assert!(matches!(err, SearchParseError::MalformedClause(_)));
    }

    #[test]
    fn rejects_empty_value() {
        let err = "activity==".parse::<SearchFilter>().unwrap_err();
        assert_eq!(err, SearchParseError::EmptyValue("activity"));
    }

    #[test]
    fn wildcard_escapes_like_metacharacters() {
        let filter: SearchFilter = "activity==100%_*".parse().unwrap();
        assert_eq!(filter.clauses()[0].like_pattern(), "100\\%\\_%");
    }

    #[test]
    fn where_clause_binds_every_value() {
        let filter: SearchFilter = "type==music;activity==Learn*".parse().unwrap();
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM activities");
        filter.push_where(&mut builder);
        assert_eq!(
            builder.sql(),
            "SELECT * FROM activities WHERE activity_type = ? AND activity LIKE ? ESCAPE '\\'"
        );
    }
}
