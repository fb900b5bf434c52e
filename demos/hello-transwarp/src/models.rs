use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};
use transwarp::{Field, Hooks, Result, Value};

/// Seconds since the epoch, as stored in `created_at` columns.
pub fn now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or_default()
}

/// A sortable, process-unique string id.
pub fn next_id() -> Value {
    static SEQ: AtomicU64 = AtomicU64::new(0);

    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_micros())
        .unwrap_or_default();
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);

    Value::from(format!("{micros:016}{seq:06}"))
}

transwarp::model! {
    table = "users",
    hooks = custom,
    /// A registered account.
    pub struct User {
        id: String = Field::string().primary_key().default_with(next_id).ddl("varchar(50)"),
        email: String = Field::string().updatable(false).ddl("varchar(50)"),
        password: String = Field::string().ddl("varchar(50)"),
        admin: bool = Field::boolean(),
        name: String = Field::string().ddl("varchar(50)"),
        image: String = Field::string().ddl("varchar(500)"),
        created_at: f64 = Field::float().updatable(false).default_with(|| now().into()),
    }
}

impl Hooks for User {
    fn pre_insert(&mut self) -> Result<()> {
        let email = self.email()?.to_lowercase();
        self.set_email(email);
        Ok(())
    }
}

transwarp::model! {
    table = "blogs",
    pub struct Blog {
        id: String = Field::string().primary_key().default_with(next_id).ddl("varchar(50)"),
        user_id: String = Field::string().updatable(false).ddl("varchar(50)"),
        user_name: String = Field::string().ddl("varchar(50)"),
        user_image: String = Field::string().ddl("varchar(500)"),
        name: String = Field::string().ddl("varchar(50)"),
        summary: String = Field::string().ddl("varchar(200)"),
        content: String = Field::text(),
        created_at: f64 = Field::float().updatable(false).default_with(|| now().into()),
    }
}

transwarp::model! {
    table = "comments",
    pub struct Comment {
        id: String = Field::string().primary_key().default_with(next_id).ddl("varchar(50)"),
        blog_id: String = Field::string().updatable(false).ddl("varchar(50)"),
        user_id: String = Field::string().updatable(false).ddl("varchar(50)"),
        user_name: String = Field::string().ddl("varchar(50)"),
        user_image: String = Field::string().ddl("varchar(500)"),
        content: String = Field::text(),
        created_at: f64 = Field::float().updatable(false).default_with(|| now().into()),
    }
}

impl Blog {
    /// Starts a blog post written by `author`.
    pub fn by(author: &User) -> Result<Blog> {
        Ok(Blog::new()
            .with_user_id(author.id()?)
            .with_user_name(author.name()?)
            .with_user_image(author.image()?))
    }
}

impl Comment {
    pub fn on(blog: &Blog, author: &User, content: &str) -> Result<Comment> {
        Ok(Comment::new()
            .with_blog_id(blog.id()?)
            .with_user_id(author.id()?)
            .with_user_name(author.name()?)
            .with_user_image(author.image()?)
            .with_content(content))
    }
}
