/// A table or column identifier.
///
/// Identifiers are interpolated into SQL text rather than bound as
/// parameters, so they must come from trusted sources such as model
/// declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name(value.to_string())
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name(value)
    }
}

impl From<&String> for Name {
    fn from(value: &String) -> Self {
        Name(value.clone())
    }
}
