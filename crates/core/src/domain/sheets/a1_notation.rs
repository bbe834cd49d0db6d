use std::fmt::Formatter;

/// A range reference in A1 notation, e.g. `'Staff Biodata'!A1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Notation(pub String);

impl A1Notation {
    /// Every cell of the sheet. Used for reads.
    pub fn whole_sheet(sheet_title: &str) -> Self {
        A1Notation(quote_sheet_title(sheet_title))
    }

    /// The sheet's first cell. Appends search for the table starting here.
    pub fn sheet_origin(sheet_title: &str) -> Self {
        A1Notation(format!("{}!A1", quote_sheet_title(sheet_title)))
    }
}

/// Sheet titles are always single-quoted; embedded quotes are doubled.
fn quote_sheet_title(sheet_title: &str) -> String {
    format!("'{}'", sheet_title.replace('\'', "''"))
}

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
