use tests::*;
use transwarp::{params, Field, Model, Row, Value};

transwarp::model! {
    pub struct Item {
        id: i64 = Field::integer().primary_key(),
        qty: i64 = Field::integer(),
        label: String = Field::string().ddl("varchar(20)"),
    }
}

fn seed(db: &transwarp::Db) {
    for (id, qty, label) in [(1, 10, "a"), (2, 20, "b"), (3, 30, "c")] {
        assert_ok!(Item::new()
            .with_id(id)
            .with_qty(qty)
            .with_label(label)
            .insert(db));
    }
}

#[test]
fn select_one_returns_first_row() {
    let setup = setup!(Item);
    let db = &setup.db;

    assert_none!(assert_ok!(db.select_one("select * from item", params![])));

    seed(db);

    let row = assert_some!(assert_ok!(db.select_one(
        "select id, label from item order by id desc",
        params![]
    )));
    assert_eq!(row.keys().collect::<Vec<_>>(), ["id", "label"]);
    assert_eq!(row["id"], Value::I64(3));
    assert_eq!(row["label"], Value::from("c"));
}

#[test]
fn select_one_reads_only_the_first_row() {
    let setup = setup!(Item);
    let db = &setup.db;

    for (id, qty) in [(1, 0), (2, i64::MIN)] {
        assert_ok!(Item::new().with_id(id).with_qty(qty).with_label("x").insert(db));
    }

    // `abs` overflows once the second row is read.
    let sql = "select id, abs(qty) as qty from item";

    let err = assert_err!(db.select_many(sql, params![]));
    assert!(err.is_driver_operation_failed(), "{err}");

    let row = assert_some!(assert_ok!(db.select_one(sql, params![])));
    assert_eq!(row["id"], Value::I64(1));
    assert_eq!(row["qty"], Value::I64(0));

    assert_eq!(
        assert_ok!(db.select_int("select id from item where abs(qty) >= 0", params![])),
        1
    );
}

#[test]
fn select_many_binds_parameters() {
    let setup = setup!(Item);
    let db = &setup.db;
    seed(db);

    let rows = assert_ok!(db.select_many(
        "select label from item where qty>=? and label<>? order by id",
        params![20, "c"]
    ));
    assert_eq!(rows, [Row::from_pairs(["label"], ["b"])]);
}

#[test]
fn select_scalar() {
    let setup = setup!(Item);
    let db = &setup.db;

    assert_eq!(
        assert_ok!(db.select_scalar("select qty from item where id=?", params![1])),
        Value::Null
    );

    seed(db);

    assert_eq!(
        assert_ok!(db.select_scalar("select label from item where id=?", params![2])),
        Value::from("b")
    );

    let err = assert_err!(db.select_scalar("select id, qty from item", params![]));
    assert!(err.is_multi_column(), "{err}");
}

#[test]
fn select_int() {
    let setup = setup!(Item);
    let db = &setup.db;
    seed(db);

    assert_eq!(
        assert_ok!(db.select_int("select sum(qty) from item", params![])),
        60
    );

    let err = assert_err!(db.select_int("select label from item where id=?", params![1]));
    assert!(err.is_type_conversion(), "{err}");
}

#[test]
fn queries_do_not_commit() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    assert_ok!(db.select_many("select * from item", params![]));
    assert_ok!(db.select_int("select count(*) from item", params![]));

    assert_eq!(log.commits(), 0);
}

#[test]
fn execute_auto_commits() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);
    seed(db);
    log.clear();

    let _scope = db.connection();

    let count = assert_ok!(db.execute("update item set qty=qty+1 where qty>?", params![15]));
    assert_eq!(count, 2);
    assert_eq!(log.commits(), 1);

    // Visible to a separate connection while this one is still open.
    let other = db.clone();
    let total = std::thread::spawn(move || other.select_int("select sum(qty) from item", params![]))
        .join()
        .unwrap();
    assert_eq!(assert_ok!(total), 62);
}

#[test]
fn insert_row() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    let row = Row::from_pairs(
        ["id", "qty", "label"],
        [Value::from(7), Value::from(3), Value::from("seven")],
    );
    assert_eq!(assert_ok!(db.insert_row("item", &row)), 1);

    assert_eq!(
        log.statements(),
        ["insert into `item` (`id`, `qty`, `label`) values (?1, ?2, ?3)"]
    );

    let item = assert_some!(assert_ok!(Item::get(db, 7)));
    assert_eq!(item.label().unwrap(), "seven");
    assert_eq!(item.qty().unwrap(), 3);
}

#[test]
fn insert_row_missing_required_column() {
    let setup = setup!(Item);
    let db = &setup.db;

    // `qty` is declared `not null`.
    let row = Row::from_pairs(["id", "label"], [Value::from(8), Value::from("eight")]);
    let err = assert_err!(db.insert_row("item", &row));
    assert!(err.is_integrity_violation(), "{err}");
}

#[test]
fn placeholder_count_mismatch_fails_before_connecting() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    let err = assert_err!(db.execute("delete from item where id=? and qty=?", params![1]));
    assert!(err.is_invalid_statement(), "{err}");

    let err = assert_err!(db.select_many("select * from item", params![1]));
    assert!(err.is_invalid_statement(), "{err}");

    assert_eq!(log.connects(), 0);
    assert!(log.is_empty());
}

#[test]
fn question_marks_in_literals_are_not_parameters() {
    let setup = setup!(Item);
    let (db, log) = (&setup.db, &setup.log);

    assert_ok!(db.execute(
        "insert into item (id, qty, label) values (?, ?, 'why?')",
        params![1, 2]
    ));

    assert_eq!(
        log.statements(),
        ["insert into item (id, qty, label) values (?1, ?2, 'why?')"]
    );
    assert_eq!(
        assert_ok!(db.select_scalar("select label from item where id=?", params![1])),
        Value::from("why?")
    );
}
