use tests::*;
use transwarp::{params, Error, Field, Model, Result};

transwarp::model! {
    pub struct Item {
        id: i64 = Field::integer().primary_key(),
        qty: i64 = Field::integer(),
    }
}

fn boom() -> Error {
    Error::from_args(format_args!("boom"))
}

fn insert(db: &transwarp::Db, id: i64) -> Result<()> {
    Item::new().with_id(id).insert(db)?;
    Ok(())
}

#[test]
fn nested_scopes_commit_once() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    let outer = assert_ok!(db.begin());
    let inner = assert_ok!(db.begin());
    assert_eq!(db.transaction_depth(), 2);

    assert_ok!(insert(db, 1));

    assert_ok!(inner.commit());
    assert_eq!(db.transaction_depth(), 1);
    assert_eq!(log.commits(), 0);

    assert_ok!(outer.commit());
    assert_eq!(db.transaction_depth(), 0);
    assert_eq!(log.begins(), 1);
    assert_eq!(log.commits(), 1);
    assert_eq!(log.rollbacks(), 0);

    assert_eq!(assert_ok!(Item::count_all(db)), 1);
}

#[test]
fn closure_scopes_commit_once() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    let depth = assert_ok!(db.transaction(|db| {
        insert(db, 1)?;
        db.transaction(|db| {
            insert(db, 2)?;
            Ok(db.transaction_depth())
        })
    }));

    assert_eq!(depth, 2);
    assert_eq!(log.begins(), 1);
    assert_eq!(log.commits(), 1);
    assert_eq!(assert_ok!(Item::count_all(db)), 2);
}

#[test]
fn inner_failure_rolls_back_once() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    let err = assert_err!(db.transaction(|db| {
        insert(db, 1)?;
        db.transaction(|db| {
            insert(db, 2)?;
            Err::<(), _>(boom())
        })?;
        insert(db, 3)
    }));

    // The original failure reaches the caller unchanged.
    assert_eq!(err.to_string(), "boom");
    assert_eq!(db.transaction_depth(), 0);
    assert_eq!(log.rollbacks(), 1);
    assert_eq!(log.commits(), 0);
    assert_eq!(assert_ok!(Item::count_all(db)), 0);
}

#[test]
fn swallowed_inner_failure_still_rolls_back() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    let err = assert_err!(db.transaction(|db| {
        insert(db, 1)?;
        let inner = db.transaction(|_| Err::<(), _>(boom()));
        assert!(inner.is_err());
        Ok(())
    }));

    assert!(err.is_transaction_rollback(), "{err}");
    assert_eq!(log.rollbacks(), 1);
    assert_eq!(log.commits(), 0);
    assert_eq!(assert_ok!(Item::count_all(db)), 0);

    // The mark does not leak into the next transaction.
    assert_ok!(db.transaction(|db| insert(db, 2)));
    assert_eq!(assert_ok!(Item::count_all(db)), 1);
}

#[test]
fn dropped_guard_rolls_back() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    {
        let _tx = assert_ok!(db.begin());
        assert_ok!(insert(db, 1));
        assert!(db.is_connected());
    }

    assert_eq!(db.transaction_depth(), 0);
    assert!(!db.in_connection_scope());
    assert_eq!(log.rollbacks(), 1);
    assert_eq!(log.closes(), 1);
    assert_eq!(assert_ok!(Item::count_all(db)), 0);
}

#[test]
fn panic_rolls_back() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        db.transaction(|db| -> Result<()> {
            insert(db, 1)?;
            panic!("interrupted")
        })
    }));

    assert!(res.is_err());
    assert_eq!(db.transaction_depth(), 0);
    assert!(!db.in_connection_scope());
    assert_eq!(log.rollbacks(), 1);
    assert_eq!(assert_ok!(Item::count_all(db)), 0);
}

#[test]
fn explicit_rollback() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    let tx = assert_ok!(db.begin());
    assert_ok!(insert(db, 1));
    assert_ok!(tx.rollback());

    assert_eq!(log.rollbacks(), 1);
    assert_eq!(assert_ok!(Item::count_all(db)), 0);
}

#[test]
fn commit_failure_rolls_back_and_reports() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    log.fail_next_commit();

    let err = assert_err!(db.transaction(|db| insert(db, 1)));

    assert!(err.is_transaction_failed(), "{err}");
    assert!(err.root_cause().is_driver_operation_failed());
    assert_eq!(
        err.to_string(),
        "transaction commit failed: injected commit failure"
    );

    assert_eq!(log.commits(), 1);
    assert_eq!(log.rollbacks(), 1);
    assert_eq!(db.transaction_depth(), 0);
    assert!(!db.in_connection_scope());
    assert_eq!(assert_ok!(Item::count_all(db)), 0);
}

#[test]
fn statements_inside_transaction_are_not_auto_committed() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    let tx = assert_ok!(db.begin());
    assert_ok!(db.execute("insert into item (id, qty) values (?, ?)", params![1, 1]));
    assert_ok!(db.execute("update item set qty=qty+1 where id=?", params![1]));
    assert_eq!(log.commits(), 0);

    // Another thread has its own connection and sees only committed rows.
    let other = db.clone();
    let seen = std::thread::spawn(move || other.select_int("select count(*) from item", params![]))
        .join()
        .unwrap();
    assert_eq!(assert_ok!(seen), 0);

    assert_ok!(tx.commit());
    assert_eq!(log.commits(), 1);
    assert_eq!(
        assert_ok!(db.select_int("select qty from item where id=?", params![1])),
        2
    );
}
