/// Declares a model type.
///
/// Each field names its Rust type and its [`Field`](crate::Field)
/// descriptor. The table defaults to the lowercased type name.
///
/// ```
/// use transwarp::{Field, Model};
///
/// transwarp::model! {
///     table = "users",
///     pub struct User {
///         id: String = Field::string().primary_key().ddl("varchar(50)"),
///         /// Never changes once the account exists.
///         email: String = Field::string().updatable(false).ddl("varchar(50)"),
///         admin: bool = Field::boolean(),
///     }
/// }
///
/// let mut user = User::new().with_id("u1").with_email("bob@example.com");
/// user.set_admin(true);
///
/// assert_eq!(user.email().unwrap(), "bob@example.com");
/// assert_eq!(User::schema().unwrap().table(), "users");
/// ```
///
/// The generated type implements [`Hooks`](crate::Hooks) with no-op
/// callbacks. Write `hooks = custom,` before the struct to provide your
/// own implementation instead.
///
/// For every field `x` the type gets a getter `x()`, a setter `set_x()` and
/// a builder-style `with_x()`. Getters fail with an `unknown_column` error
/// while the field is unset.
#[macro_export]
macro_rules! model {
    (@table $name:ident $table:literal) => {
        ::std::string::String::from($table)
    };
    (@table $name:ident) => {
        stringify!($name).to_lowercase()
    };
    (@hooks $name:ident custom) => {};
    (@hooks $name:ident) => {
        impl $crate::Hooks for $name {}
    };
    (
        @define [$($table:literal)?] [$($hooks:ident)?]
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty = $field_def:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            record: $crate::Row,
        }

        impl $name {
            /// Creates an instance with every field unset.
            pub fn new() -> Self {
                Self::default()
            }

            $crate::paste::paste! {
                $(
                    $(#[$field_meta])*
                    pub fn $field(&self) -> $crate::Result<$ty> {
                        self.record.get_as(stringify!($field))
                    }

                    pub fn [<set_ $field>](&mut self, value: impl ::std::convert::Into<$ty>) -> &mut Self {
                        let value: $ty = value.into();
                        self.record.set(stringify!($field), value);
                        self
                    }

                    pub fn [<with_ $field>](mut self, value: impl ::std::convert::Into<$ty>) -> Self {
                        self.[<set_ $field>](value);
                        self
                    }
                )+
            }
        }

        impl $crate::Model for $name {
            fn schema() -> $crate::Result<::std::sync::Arc<$crate::ModelSchema>> {
                static SCHEMA: ::std::sync::OnceLock<
                    $crate::Result<::std::sync::Arc<$crate::ModelSchema>>,
                > = ::std::sync::OnceLock::new();

                SCHEMA
                    .get_or_init(|| {
                        $crate::ModelSchema::compile(
                            stringify!($name),
                            $crate::model!(@table $name $($table)?),
                            [$((stringify!($field), $field_def)),+],
                        )
                        .map(::std::sync::Arc::new)
                    })
                    .clone()
            }

            fn from_record(record: $crate::Row) -> Self {
                Self { record }
            }

            fn record(&self) -> &$crate::Row {
                &self.record
            }

            fn record_mut(&mut self) -> &mut $crate::Row {
                &mut self.record
            }
        }

        $crate::model!(@hooks $name $($hooks)?);
    };

    // Options come before the struct. `vis` may be empty, so they are peeled
    // off here instead of being optional groups in the arm above.
    (table = $table:literal, hooks = $hooks:ident, $($rest:tt)*) => {
        $crate::model!(@define [$table] [$hooks] $($rest)*);
    };
    (hooks = $hooks:ident, table = $table:literal, $($rest:tt)*) => {
        $crate::model!(@define [$table] [$hooks] $($rest)*);
    };
    (table = $table:literal, $($rest:tt)*) => {
        $crate::model!(@define [$table] [] $($rest)*);
    };
    (hooks = $hooks:ident, $($rest:tt)*) => {
        $crate::model!(@define [] [$hooks] $($rest)*);
    };
    ($($rest:tt)*) => {
        $crate::model!(@define [] [] $($rest)*);
    };
}
