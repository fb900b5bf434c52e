#[derive(Debug)]
pub struct Capability {
    /// Short name of the storage engine, used in log output.
    pub name: &'static str,

    /// How the engine spells positional statement parameters.
    pub placeholder: Placeholder,
}

/// Native positional-parameter syntax of a storage engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `?`
    Question,

    /// `?1`, `?2`, ...
    QuestionNumbered,

    /// `$1`, `$2`, ...
    DollarNumbered,

    /// `%s`
    Format,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        name: "sqlite",
        placeholder: Placeholder::QuestionNumbered,
    };

    /// PostgreSQL capabilities.
    pub const POSTGRESQL: Self = Self {
        name: "postgresql",
        placeholder: Placeholder::DollarNumbered,
    };

    /// MySQL capabilities, as exposed by format-style client libraries.
    pub const MYSQL: Self = Self {
        name: "mysql",
        placeholder: Placeholder::Format,
    };
}
