use std::fmt;

use serde::Serialize;

/// Business category of a source file. Each category owns one output sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Invoices to registered recipients.
    B2b,
    /// Large-value invoices to unregistered recipients.
    B2cl,
    /// Small-value supplies to unregistered recipients.
    B2cs,
    /// Export invoices.
    Export,
    /// Nil-rated, exempt and non-GST supplies.
    Exempt,
    /// Credit and debit notes issued to registered recipients.
    Cdnr,
    /// Credit and debit notes issued to unregistered recipients.
    Cdnur,
    /// HSN-wise summary of outward supplies.
    Hsn,
    /// Summary of documents issued during the period.
    DocsIssued,
}

impl Category {
    /// Every category, in output sheet order.
    pub const ALL: [Category; 9] = [
        Category::B2b,
        Category::B2cl,
        Category::B2cs,
        Category::Cdnr,
        Category::Cdnur,
        Category::Export,
        Category::Exempt,
        Category::Hsn,
        Category::DocsIssued,
    ];

    /// Name of the worksheet holding this category's rows.
    pub fn sheet_name(self) -> &'static str {
        match self {
            Category::B2b => "b2b",
            Category::B2cl => "b2cl",
            Category::B2cs => "b2cs",
            Category::Export => "exp",
            Category::Exempt => "exemp",
            Category::Cdnr => "cdnr",
            Category::Cdnur => "cdnur",
            Category::Hsn => "hsn",
            Category::DocsIssued => "docs",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

/// How a keyword has to appear in the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Match {
    /// Anywhere, as a substring.
    Anywhere,
    /// As a whole alphanumeric token (`exp.csv`, not `expenses.csv`).
    Token,
}

/// Ordered keyword table, evaluated top-down against the uppercased file name.
/// A keyword must appear before any shorter keyword it contains.
const KEYWORDS: &[(&str, Match, Category)] = &[
    ("CDNUR", Match::Anywhere, Category::Cdnur),
    ("CDNR", Match::Anywhere, Category::Cdnr),
    ("B2CL", Match::Anywhere, Category::B2cl),
    ("B2CS", Match::Anywhere, Category::B2cs),
    ("B2C", Match::Anywhere, Category::B2cs),
    ("B2B", Match::Anywhere, Category::B2b),
    ("EXEMP", Match::Anywhere, Category::Exempt),
    ("NIL", Match::Anywhere, Category::Exempt),
    ("EXPORT", Match::Anywhere, Category::Export),
    ("EXP", Match::Token, Category::Export),
    ("HSN", Match::Anywhere, Category::Hsn),
    ("DOCUMENT", Match::Anywhere, Category::DocsIssued),
    ("DOCS", Match::Anywhere, Category::DocsIssued),
];

/// Maps a file name to its category. Returns `None` for files that do not
/// carry any known keyword.
pub fn classify(file_name: &str) -> Option<Category> {
    let name = file_name.to_uppercase();
    KEYWORDS
        .iter()
        .find(|(keyword, rule, _)| match rule {
            Match::Anywhere => name.contains(keyword),
            Match::Token => name
                .split(|c: char| !c.is_ascii_alphanumeric())
                .any(|token| token == *keyword),
        })
        .map(|(_, _, category)| *category)
}

/// Reduces a storage key to the original upload name.
///
/// Keys may carry a directory path and a `<timestamp>_` prefix added at upload
/// time: `uploads/2024/1700000000_b2b.csv` becomes `b2b.csv`.
pub fn strip_upload_prefix(key: &str) -> &str {
    let name = key.rsplit(['/', '\\']).next().unwrap_or(key);
    match name.split_once('_') {
        Some((prefix, rest))
            if !prefix.is_empty()
                && !rest.is_empty()
                && prefix.bytes().all(|byte| byte.is_ascii_digit()) =>
        {
            rest
        }
        _ => name,
    }
}
