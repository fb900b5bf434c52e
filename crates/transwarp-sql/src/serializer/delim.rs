use std::{cell::Cell, fmt};

/// Comma delimited
///
/// Wraps an iterator so it can be formatted once with `{}`.
pub(super) struct Comma<L>(Cell<Option<L>>);

impl<L> Comma<L> {
    pub(super) fn new(items: L) -> Comma<L> {
        Comma(Cell::new(Some(items)))
    }
}

impl<L> fmt::Display for Comma<L>
where
    L: Iterator,
    L::Item: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(items) = self.0.take() else {
            return Ok(());
        };

        let mut s = "";
        for item in items {
            write!(f, "{s}{item}")?;
            s = ", ";
        }
        Ok(())
    }
}
