mod delim;
use delim::Comma;

mod ident;
use ident::Ident;

use crate::stmt::{self, Statement};

use std::fmt::Write;

/// Serializes statements to SQL text using the neutral `?` placeholder.
///
/// The text is translated to a driver's native parameter syntax by
/// [`rewrite_placeholders`](crate::rewrite_placeholders) right before
/// execution.
#[derive(Debug, Default)]
pub struct Serializer {
    _priv: (),
}

impl Serializer {
    pub fn new() -> Serializer {
        Serializer::default()
    }

    pub fn serialize(&self, stmt: &Statement) -> String {
        let mut dst = String::new();

        match stmt {
            Statement::CreateTable(stmt) => create_table(&mut dst, stmt),
            Statement::Delete(stmt) => delete(&mut dst, stmt),
            Statement::Insert(stmt) => insert(&mut dst, stmt),
            Statement::Select(stmt) => select(&mut dst, stmt),
            Statement::Update(stmt) => update(&mut dst, stmt),
        }

        dst
    }
}

// Writing to a `String` cannot fail, so the `fmt::Result`s below are
// discarded.

fn create_table(dst: &mut String, stmt: &stmt::CreateTable) {
    dst.push_str("create table ");
    if stmt.if_not_exists {
        dst.push_str("if not exists ");
    }
    let _ = writeln!(dst, "{} (", Ident(&stmt.name));

    for column in &stmt.columns {
        let _ = write!(dst, "  {} {}", Ident(&column.name), column.ddl);
        if !column.nullable {
            dst.push_str(" not null");
        }
        dst.push_str(",\n");
    }

    let _ = write!(dst, "  primary key({})\n);", Ident(&stmt.primary_key));
}

fn insert(dst: &mut String, stmt: &stmt::Insert) {
    if stmt.columns.is_empty() {
        let _ = write!(dst, "insert into {} default values", Ident(&stmt.table));
        return;
    }

    let _ = write!(
        dst,
        "insert into {} ({}) values ({})",
        Ident(&stmt.table),
        Comma::new(stmt.columns.iter().map(Ident)),
        Comma::new(stmt.columns.iter().map(|_| "?")),
    );
}

fn update(dst: &mut String, stmt: &stmt::Update) {
    let _ = write!(
        dst,
        "update {} set {} where {}=?",
        Ident(&stmt.table),
        Comma::new(stmt.assignments.iter().map(|name| Assign(Ident(name)))),
        Ident(&stmt.key),
    );
}

fn delete(dst: &mut String, stmt: &stmt::Delete) {
    let _ = write!(
        dst,
        "delete from {} where {}=?",
        Ident(&stmt.table),
        Ident(&stmt.key)
    );
}

fn select(dst: &mut String, stmt: &stmt::Select) {
    dst.push_str("select ");
    match &stmt.projection {
        stmt::Projection::All => dst.push('*'),
        stmt::Projection::Count(column) => {
            let _ = write!(dst, "count({})", Ident(column));
        }
    }
    let _ = write!(dst, " from {}", Ident(&stmt.table));

    match &stmt.filter {
        stmt::Filter::None => {}
        stmt::Filter::Key(key) => {
            let _ = write!(dst, " where {}=?", Ident(key));
        }
        stmt::Filter::Raw(clause) => {
            dst.push(' ');
            dst.push_str(clause);
        }
    }
}

/// `<column>=?`
struct Assign<'a>(Ident<'a>);

impl std::fmt::Display for Assign<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}=?", self.0)
    }
}
