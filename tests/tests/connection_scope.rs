use tests::*;
use transwarp::{params, sqlite::Sqlite, Db, Field, Model};

transwarp::model! {
    pub struct Item {
        id: i64 = Field::integer().primary_key(),
        qty: i64 = Field::integer(),
    }
}

#[test]
fn connection_is_opened_lazily() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    let scope = db.connection();
    assert!(scope.is_owner());
    assert!(db.in_connection_scope());
    assert!(!db.is_connected());
    assert_eq!(log.connects(), 0);

    assert_ok!(Item::count_all(db));
    assert!(db.is_connected());
    assert_eq!(log.connects(), 1);

    drop(scope);
    assert!(!db.in_connection_scope());
    assert_eq!(log.closes(), 1);
}

#[test]
fn empty_scope_never_connects() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    assert_ok!(db.with_connection(|_| Ok(())));

    assert_eq!(log.connects(), 0);
    assert_eq!(log.closes(), 0);
}

#[test]
fn nested_scopes_share_one_connection() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    let outer = db.connection();
    assert_ok!(Item::new().with_id(1).insert(db));

    {
        let inner = db.connection();
        assert!(!inner.is_owner());
        assert_ok!(Item::new().with_id(2).insert(db));
    }

    // Leaving the inner scope keeps the connection open.
    assert!(db.is_connected());
    assert_eq!(log.closes(), 0);

    assert_eq!(assert_ok!(Item::count_all(db)), 2);
    drop(outer);

    assert_eq!(log.connects(), 1);
    assert_eq!(log.closes(), 1);
}

#[test]
fn each_call_outside_a_scope_uses_its_own_connection() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    assert_ok!(Item::new().with_id(1).insert(db));
    assert_ok!(Item::count_all(db));

    assert!(!db.in_connection_scope());
    assert_eq!(log.connects(), 2);
    assert_eq!(log.closes(), 2);
}

#[test]
fn clones_share_the_thread_context() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    let other = db.clone();
    let _scope = db.connection();

    assert!(other.in_connection_scope());
    assert!(!other.connection().is_owner());

    assert_ok!(Item::count_all(&other));
    assert!(db.is_connected());
    assert_eq!(log.connects(), 1);
}

#[test]
fn threads_have_independent_contexts() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    let tx = assert_ok!(db.begin());
    assert_ok!(Item::new().with_id(1).insert(db));

    let handles = (0..2)
        .map(|_| {
            let db = db.clone();
            std::thread::spawn(move || {
                assert!(!db.in_connection_scope());
                assert_eq!(db.transaction_depth(), 0);

                db.with_connection(|db| Ok((db.is_connected(), Item::count_all(db)?)))
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let (connected, count) = assert_ok!(handle.join().unwrap());
        assert!(!connected);
        assert_eq!(count, 0);
    }

    assert_eq!(db.transaction_depth(), 1);
    assert_ok!(tx.commit());

    // One connection per thread.
    assert_eq!(log.connects(), 3);
    assert_eq!(log.closes(), 3);
}

#[test]
fn in_memory_database_lives_as_long_as_the_scope() {
    init_tracing();

    let mut builder = Db::builder();
    builder.register::<Item>();
    let db = assert_ok!(builder.connect("sqlite::memory:"));

    let count = assert_ok!(db.with_connection(|db| {
        db.create_schema(None)?;
        Item::new().with_id(1).with_qty(2).insert(db)?;
        db.select_int("select qty from item where id=?", params![1])
    }));
    assert_eq!(count, 2);

    // A new scope gets a new, empty database.
    let err = assert_err!(Item::count_all(&db));
    assert!(err.is_driver_operation_failed(), "{err}");
}

#[test]
fn connect_failure_leaves_no_context() {
    let dir = assert_ok!(tempfile::tempdir());
    let driver = LoggingDriver::new(Sqlite::open(dir.path().join("missing/test.db")));

    let db = assert_ok!(Db::builder().register::<Item>().build(driver));

    let err = assert_err!(Item::count_all(&db));
    assert!(err.is_connection_failed(), "{err}");
    assert!(!db.in_connection_scope());

    let err = assert_err!(db.transaction(|db| Item::count_all(db)));
    assert!(err.is_connection_failed(), "{err}");
    assert_eq!(db.transaction_depth(), 0);
    assert!(!db.in_connection_scope());
}
