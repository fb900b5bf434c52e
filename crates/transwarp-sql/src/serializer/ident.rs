use crate::stmt::Name;

use std::fmt;

/// A backtick-quoted identifier. Embedded backticks are doubled.
pub(super) struct Ident<'a>(pub(super) &'a Name);

impl fmt::Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.0 .0;
        if name.contains('`') {
            write!(f, "`{}`", name.replace('`', "``"))
        } else {
            write!(f, "`{name}`")
        }
    }
}
