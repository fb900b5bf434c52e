use tests::*;
use transwarp::{Field, Hooks, Model, Result};

transwarp::model! {
    hooks = custom,
    pub struct Post {
        id: i64 = Field::integer().primary_key(),
        slug: String = Field::string(),
        locked: bool = Field::boolean(),
        edits: i64 = Field::integer(),
    }
}

transwarp::model! {
    hooks = custom,
    table = "drafts",
    pub struct Draft {
        id: i64 = Field::integer().primary_key(),
        title: String = Field::string(),
    }
}

impl Hooks for Draft {
    fn pre_insert(&mut self) -> Result<()> {
        self.set_title("untitled");
        Ok(())
    }
}

impl Hooks for Post {
    fn pre_insert(&mut self) -> Result<()> {
        if self.record().contains("slug") {
            return Ok(());
        }

        let slug = format!("post-{}", self.id()?);
        self.set_slug(slug);
        Ok(())
    }

    fn pre_update(&mut self) -> Result<()> {
        let edits = self.edits().unwrap_or_default();
        self.set_edits(edits + 1);
        Ok(())
    }

    fn pre_delete(&mut self) -> Result<()> {
        if self.locked().unwrap_or_default() {
            transwarp::bail!("post {} is locked", self.id()?);
        }
        Ok(())
    }
}

#[test]
fn pre_insert_fills_fields() {
    let setup = setup!(Post);
    let db = &setup.db;

    assert_ok!(Post::new().with_id(4).insert(db));

    let post = assert_some!(assert_ok!(Post::get(db, 4)));
    assert_eq!(post.slug().unwrap(), "post-4");
}

#[test]
fn pre_insert_error_aborts_insert() {
    let setup = setup!(Post);
    let (db, log) = (&setup.db, &setup.log);

    // No id, so the hook fails reading it.
    let err = assert_err!(Post::new().insert(db));
    assert!(err.is_unknown_column(), "{err}");
    assert!(log.is_empty());
}

#[test]
fn pre_update_runs_before_each_update() {
    let setup = setup!(Post);
    let db = &setup.db;

    let mut post = Post::new().with_id(1);
    assert_ok!(post.insert(db));
    assert_ok!(post.update(db));
    assert_ok!(post.update(db));

    let stored = assert_some!(assert_ok!(Post::get(db, 1)));
    assert_eq!(stored.edits().unwrap(), 2);
}

#[test]
fn pre_delete_error_aborts_delete() {
    let setup = setup!(Post);
    let (db, log) = (&setup.db, &setup.log);

    let mut post = Post::new().with_id(1).with_locked(true);
    assert_ok!(post.insert(db));
    log.clear();

    let err = assert_err!(post.delete(db));
    assert_eq!(err.to_string(), "post 1 is locked");
    assert!(log.is_empty());
    assert_some!(assert_ok!(Post::get(db, 1)));

    post.set_locked(false);
    assert_ok!(post.delete(db));
    assert_none!(assert_ok!(Post::get(db, 1)));
}

#[test]
fn custom_hooks_with_table_name() {
    let setup = setup!(Draft);
    let (db, log) = (&setup.db, &setup.log);

    assert_ok!(Draft::new().with_id(1).insert(db));
    assert_eq!(
        log.statements(),
        ["insert into `drafts` (`id`, `title`) values (?1, ?2)"]
    );

    let draft = assert_some!(assert_ok!(Draft::get(db, 1)));
    assert_eq!(draft.title().unwrap(), "untitled");
}
