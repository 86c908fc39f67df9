//! Rendering of domain predicates and paging into SQL
//!
//! Column and table names come from `&'static str` constants in the domain
//! filter definitions, never from request input. Every value is bound.

use care_core::{FilterValue, PageRequest, Predicate, Relation};
use sqlx::{Postgres, QueryBuilder};

/// Escape LIKE metacharacters so a search term matches literally
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn push_value(qb: &mut QueryBuilder<'_, Postgres>, value: &FilterValue) {
    match value {
        FilterValue::Text(text) => qb.push_bind(text.clone()),
        FilterValue::Int(n) => qb.push_bind(*n),
        FilterValue::Bool(b) => qb.push_bind(*b),
        FilterValue::Uuid(id) => qb.push_bind(*id),
        FilterValue::Timestamp(at) => qb.push_bind(*at),
    };
}

fn push_joined(
    qb: &mut QueryBuilder<'_, Postgres>,
    predicates: &[Predicate],
    separator: &str,
    scope: &str,
) {
    qb.push("(");
    for (i, predicate) in predicates.iter().enumerate() {
        if i > 0 {
            qb.push(separator);
        }
        push_predicate(qb, predicate, scope);
    }
    qb.push(")");
}

/// Append `predicate` as a boolean SQL expression with columns qualified by `scope`
pub fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate, scope: &str) {
    match predicate {
        Predicate::All => {
            qb.push("TRUE");
        }
        Predicate::And(conditions) if conditions.is_empty() => {
            qb.push("TRUE");
        }
        Predicate::Or(conditions) if conditions.is_empty() => {
            qb.push("FALSE");
        }
        Predicate::And(conditions) => push_joined(qb, conditions, " AND ", scope),
        Predicate::Or(conditions) => push_joined(qb, conditions, " OR ", scope),
        Predicate::Not(inner) => {
            qb.push("NOT (");
            push_predicate(qb, inner, scope);
            qb.push(")");
        }
        Predicate::Contains { column, term } => {
            qb.push(format_args!("{scope}.{column} ILIKE "));
            qb.push_bind(escape_like(term));
        }
        Predicate::Equals { column, value } => {
            qb.push(format_args!("{scope}.{column} = "));
            push_value(qb, value);
        }
        Predicate::Compare { column, op, value } => {
            qb.push(format_args!("{scope}.{column} {} ", op.as_sql()));
            push_value(qb, value);
        }
        Predicate::Related {
            relation,
            predicate,
        } => {
            match relation {
                Relation::DoctorSpecialties => qb.push(format_args!(
                    "EXISTS (SELECT 1 FROM doctor_specialties rel \
                     JOIN specialties ON specialties.id = rel.specialty_id \
                     WHERE rel.doctor_id = {scope}.id AND "
                )),
                Relation::DoctorSchedules => qb.push(format_args!(
                    "EXISTS (SELECT 1 FROM doctor_schedules \
                     WHERE doctor_schedules.schedule_id = {scope}.id AND "
                )),
            };
            push_predicate(qb, predicate, relation_scope(*relation));
            qb.push(")");
        }
    }
}

/// Table whose columns the inner predicate of a relation refers to
fn relation_scope(relation: Relation) -> &'static str {
    match relation {
        Relation::DoctorSpecialties => "specialties",
        Relation::DoctorSchedules => "doctor_schedules",
    }
}

/// Append ORDER BY / LIMIT / OFFSET. Ties are broken by id so pages are stable.
pub fn push_page(qb: &mut QueryBuilder<'_, Postgres>, page: &PageRequest, scope: &str) {
    qb.push(format_args!(
        " ORDER BY {scope}.{} {}, {scope}.id ASC LIMIT ",
        page.sort_column,
        page.sort_order.as_sql()
    ));
    qb.push_bind(page.limit);
    qb.push(" OFFSET ");
    qb.push_bind(page.skip);
}

/// `SELECT {columns} FROM {table} WHERE ... ORDER BY ... LIMIT ... OFFSET ...`
pub fn select_page<'a>(
    columns: &str,
    table: &str,
    predicate: &Predicate,
    page: &PageRequest,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {columns} FROM {table} WHERE "));
    push_predicate(&mut qb, predicate, table);
    push_page(&mut qb, page, table);
    qb
}

/// `SELECT COUNT(*) FROM {table} WHERE ...`
pub fn select_count<'a>(table: &str, predicate: &Predicate) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {table} WHERE "));
    push_predicate(&mut qb, predicate, table);
    qb
}
