use tests::*;
use transwarp::{sqlite::Sqlite, Db, Field, Model};

transwarp::model! {
    pub struct Item {
        id: i64 = Field::integer().primary_key(),
        qty: i64 = Field::integer(),
    }
}

transwarp::model! {
    table = "users",
    pub struct User {
        id: String = Field::string().primary_key().ddl("varchar(50)"),
        name: String = Field::string().name("full_name"),
        score: f64 = Field::float().nullable(true),
    }
}

#[test]
fn ddl_follows_declaration_order() {
    let schema = assert_ok!(User::schema());

    pretty_assertions::assert_eq!(
        schema.sql(),
        "create table `users` (\n  \
         `id` varchar(50) not null,\n  \
         `full_name` varchar(255) not null,\n  \
         `score` real,\n  \
         primary key(`id`)\n);"
    );
    pretty_assertions::assert_eq!(
        schema.check_sql(),
        "create table if not exists `users` (\n  \
         `id` varchar(50) not null,\n  \
         `full_name` varchar(255) not null,\n  \
         `score` real,\n  \
         primary key(`id`)\n);"
    );
}

#[test]
fn create_schema_is_idempotent() {
    let setup = setup!(Item, User);
    let (db, log) = (&setup.db, &setup.log);

    assert_ok!(db.create_schema(None));
    assert_ok!(db.create_schema(Some(&["users"])));

    // One connection for the whole batch.
    assert_eq!(log.connects(), 2);
    assert_eq!(log.statements().len(), 3);
    assert!(log
        .statements()
        .iter()
        .all(|sql| sql.starts_with("create table if not exists")));
}

#[test]
fn plain_create_fails_on_existing_table() {
    let setup = setup!(Item);
    let db = &setup.db;

    let err = assert_err!(db.create_schema_with(None, false));
    assert!(err.is_driver_operation_failed(), "{err}");
}

#[test]
fn unknown_table_fails_before_anything_runs() {
    let setup = setup!(Item, User);
    let (db, log) = (&setup.db, &setup.log);

    let err = assert_err!(db.create_schema(Some(&["item", "missing"])));
    assert!(err.is_schema_not_found(), "{err}");
    assert_eq!(err.to_string(), "no model registered for table `missing`");

    assert!(log.is_empty());
    assert_eq!(log.connects(), 0);
}

#[test]
fn create_table_without_registration() {
    let setup = setup!(Item);
    let db = &setup.db;

    assert_ok!(User::create_table(db));
    assert_ok!(User::create_table(db));

    assert_ok!(User::new()
        .with_id("u1")
        .with_name("Alice")
        .with_score(1.5)
        .insert(db));

    let user = assert_some!(assert_ok!(User::get(db, "u1")));
    assert_eq!(user.name().unwrap(), "Alice");
    assert_eq!(user.score().unwrap(), 1.5);
}

#[test]
fn table_collision_fails_at_build() {
    transwarp::model! {
        table = "item",
        pub struct Shadow {
            id: i64 = Field::integer().primary_key(),
        }
    }

    let dir = assert_ok!(tempfile::tempdir());

    let err = assert_err!(Db::builder()
        .register::<Item>()
        .register::<Shadow>()
        .build(Sqlite::open(dir.path().join("test.db"))));
    assert!(err.is_invalid_schema(), "{err}");

    // The same model twice is fine.
    assert_ok!(Db::builder()
        .register::<Item>()
        .register::<Item>()
        .build(Sqlite::in_memory()));
}

#[test]
fn model_without_primary_key_fails_at_build() {
    transwarp::model! {
        pub struct Loose {
            name: String = Field::string(),
        }
    }

    let err = assert_err!(Loose::schema());
    assert!(err.is_invalid_schema(), "{err}");

    let err = assert_err!(Db::builder()
        .register::<Loose>()
        .build(Sqlite::in_memory()));
    assert!(err.is_invalid_schema(), "{err}");
    assert_eq!(err.to_string(), "invalid schema: no primary key in model `Loose`");
}
