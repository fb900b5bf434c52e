mod models;

use models::{Blog, Comment, User};
use transwarp::{params, Db, Model};
use tracing_subscriber::EnvFilter;

fn main() -> transwarp::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut builder = Db::builder();
    builder
        .register::<User>()
        .register::<Blog>()
        .register::<Comment>();

    // Keeps the fallback database file alive until the end of `main`.
    let mut _dir: Option<tempfile::TempDir> = None;

    let db = match std::env::var("DATABASE_URL") {
        Ok(url) => builder.connect(&url)?,
        Err(_) => {
            cfg_if::cfg_if! {
                if #[cfg(feature = "sqlite")] {
                    let dir = _dir.insert(tempfile::tempdir()?);
                    builder.build(transwarp::sqlite::Sqlite::open(dir.path().join("hello.db")))?
                } else {
                    drop(builder);
                    panic!("set `DATABASE_URL` or enable the `sqlite` feature")
                }
            }
        }
    };

    tracing::info!(?db, "connected");
    db.create_schema(None)?;

    println!("==> insert users");
    let mut alice = User::new()
        .with_name("Alice")
        .with_email("Alice@Example.com")
        .with_password("1234567890")
        .with_image("about:blank");
    alice.insert(&db)?;

    let mut bob = User::new()
        .with_name("Bob")
        .with_email("bob@example.com")
        .with_password("1234567890")
        .with_image("about:blank");
    bob.insert(&db)?;
    println!("new user ids: {}, {}", alice.id()?, bob.id()?);

    let found = User::find_first(&db, "where email=?", params!["alice@example.com"])?;
    println!("found by email: {:?}", found.map(|user| user.name()));

    println!("==> publish a blog with comments in one transaction");
    let blog = db.transaction(|db| {
        let mut blog = Blog::by(&alice)?
            .with_name("Hello, transwarp")
            .with_summary("First post")
            .with_content("Thread-scoped connections and nested transactions.");
        blog.insert(db)?;

        // Joins the outer transaction; nothing commits until it ends.
        db.transaction(|db| {
            Comment::on(&blog, &bob, "Nice!")?.insert(db)?;
            Comment::on(&blog, &alice, "Thanks")?.insert(db)?;
            Ok(())
        })?;

        Ok(blog)
    })?;

    let comments = db.select_int(
        "select count(*) from comments where blog_id=?",
        params![blog.id()?],
    )?;
    println!("blog {} has {comments} comments", blog.id()?);

    println!("==> a failed transaction leaves no trace");
    let res = db.transaction(|db| -> transwarp::Result<()> {
        Comment::on(&blog, &bob, "This will be rolled back")?.insert(db)?;
        transwarp::bail!("changed my mind");
    });
    println!("transaction result: {res:?}");
    let comments = Comment::count_by(&db, "where blog_id=?", params![blog.id()?])?;
    println!("comments: {comments}");

    println!("==> update and delete");
    bob.set_name("Robert").set_email("ignored@example.com");
    bob.update(&db)?;

    let stored = User::get(&db, bob.id()?)?;
    println!("updated user: {stored:#?}");

    bob.delete(&db)?;
    println!("users left: {}", User::count_all(&db)?);

    for user in User::find_all(&db)? {
        println!("USER = {:?} <{}>", user.name()?, user.email()?);
    }

    Ok(())
}
