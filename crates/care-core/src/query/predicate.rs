//! Structured filter predicates

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A typed value a column is compared against
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Int(i64),
    Bool(bool),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
}

impl FilterValue {
    /// Order two values of the same kind; mixed kinds are incomparable
    fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Uuid(a), Self::Uuid(b)) => Some(a.cmp(b)),
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Range comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gte,
    Lte,
}

impl Comparison {
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Gte => ">=",
            Self::Lte => "<=",
        }
    }

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Gte => ordering != Ordering::Less,
            Self::Lte => ordering != Ordering::Greater,
        }
    }
}

/// Relations a predicate can reach through an existence check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// doctor -> doctor_specialties -> specialties (inner columns are specialty columns)
    DoctorSpecialties,
    /// schedule -> doctor_schedules (inner columns are doctor_schedule columns)
    DoctorSchedules,
}

/// Boolean condition over one resource's columns
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches every record
    All,
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    /// Case-insensitive substring match
    Contains { column: &'static str, term: String },
    Equals { column: &'static str, value: FilterValue },
    Compare {
        column: &'static str,
        op: Comparison,
        value: FilterValue,
    },
    /// At least one related record satisfies the inner predicate
    Related {
        relation: Relation,
        predicate: Box<Predicate>,
    },
}

impl Predicate {
    pub fn contains(column: &'static str, term: impl Into<String>) -> Self {
        Self::Contains {
            column,
            term: term.into(),
        }
    }

    pub fn equals(column: &'static str, value: FilterValue) -> Self {
        Self::Equals { column, value }
    }

    pub fn related(relation: Relation, predicate: Predicate) -> Self {
        Self::Related {
            relation,
            predicate: Box::new(predicate),
        }
    }

    /// Disjunction with one substring clause per searchable column
    pub fn search(columns: &[&'static str], term: &str) -> Self {
        Self::Or(
            columns
                .iter()
                .map(|column| Self::contains(*column, term))
                .collect(),
        )
    }

    /// Conjunction of `conditions`; empty input yields [`Predicate::All`]
    pub fn all_of(mut conditions: Vec<Predicate>) -> Self {
        conditions.retain(|c| !c.is_unconditional());
        match conditions.len() {
            0 => Self::All,
            1 => conditions.remove(0),
            _ => Self::And(conditions),
        }
    }

    /// Conjoin another condition, keeping the tree flat
    #[must_use]
    pub fn and(self, other: Predicate) -> Self {
        match self {
            Self::All => other,
            Self::And(mut conditions) => {
                if !other.is_unconditional() {
                    conditions.push(other);
                }
                Self::And(conditions)
            }
            current => Self::all_of(vec![current, other]),
        }
    }

    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    #[inline]
    pub fn is_unconditional(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Evaluate the predicate against an in-memory record
    pub fn matches<M: Matchable + ?Sized>(&self, record: &M) -> bool {
        match self {
            Self::All => true,
            Self::And(conditions) => conditions.iter().all(|c| c.matches(record)),
            Self::Or(conditions) => conditions.iter().any(|c| c.matches(record)),
            Self::Not(inner) => !inner.matches(record),
            Self::Contains { column, term } => match record.column_value(column) {
                Some(FilterValue::Text(text)) => {
                    text.to_lowercase().contains(&term.to_lowercase())
                }
                _ => false,
            },
            Self::Equals { column, value } => record.column_value(column).as_ref() == Some(value),
            Self::Compare { column, op, value } => record
                .column_value(column)
                .and_then(|actual| actual.compare(value))
                .is_some_and(|ordering| op.holds(ordering)),
            Self::Related {
                relation,
                predicate,
            } => record.matches_related(*relation, predicate),
        }
    }
}

/// A record whose columns can be read for in-memory predicate evaluation
pub trait Matchable {
    /// Value of `column`, or `None` when the column is unknown or null
    fn column_value(&self, column: &str) -> Option<FilterValue>;

    /// Whether any record reachable through `relation` satisfies `predicate`
    fn matches_related(&self, _relation: Relation, _predicate: &Predicate) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
        fee: i64,
    }

    impl Matchable for Row {
        fn column_value(&self, column: &str) -> Option<FilterValue> {
            match column {
                "name" => Some(FilterValue::Text(self.name.to_string())),
                "fee" => Some(FilterValue::Int(self.fee)),
                _ => None,
            }
        }
    }

    #[test]
    fn test_all_matches_everything() {
        let row = Row { name: "x", fee: 0 };
        assert!(Predicate::All.matches(&row));
        assert!(Predicate::all_of(vec![]).is_unconditional());
    }

    #[test]
    fn test_search_has_one_clause_per_column() {
        let predicate = Predicate::search(&["name", "email", "contact_number"], "ann");
        match predicate {
            Predicate::Or(clauses) => {
                assert_eq!(clauses.len(), 3);
                assert_eq!(clauses[1], Predicate::contains("email", "ann"));
            }
            other => panic!("expected Or, got {other:?}"),
        }
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let row = Row {
            name: "Dr. Annabel",
            fee: 10,
        };
        assert!(Predicate::contains("name", "ANNA").matches(&row));
        assert!(!Predicate::contains("name", "bob").matches(&row));
        assert!(!Predicate::contains("fee", "10").matches(&row));
    }

    #[test]
    fn test_compare_and_equals() {
        let row = Row { name: "x", fee: 50 };
        let gte = Predicate::Compare {
            column: "fee",
            op: Comparison::Gte,
            value: FilterValue::Int(50),
        };
        let lte = Predicate::Compare {
            column: "fee",
            op: Comparison::Lte,
            value: FilterValue::Int(49),
        };
        assert!(gte.matches(&row));
        assert!(!lte.matches(&row));
        assert!(Predicate::equals("fee", FilterValue::Int(50)).matches(&row));
        assert!(!Predicate::equals("fee", FilterValue::Text("50".into())).matches(&row));
    }

    #[test]
    fn test_and_flattens() {
        let p = Predicate::All
            .and(Predicate::equals("fee", FilterValue::Int(1)))
            .and(Predicate::contains("name", "a"))
            .and(Predicate::All);
        match p {
            Predicate::And(clauses) => assert_eq!(clauses.len(), 2),
            other => panic!("expected And, got {other:?}"),
        }
    }

    #[test]
    fn test_negate() {
        let row = Row { name: "x", fee: 1 };
        assert!(!Predicate::All.negate().matches(&row));
    }
}
