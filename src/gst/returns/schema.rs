//! Canonical column layout of every category sheet, with the alternate header
//! names accepted from accounting exports (Tally, Zoho Books, SAP, Busy) and
//! hand-built spreadsheets.

use crate::gst::returns::classify::Category;
use crate::gst::returns::model::Record;

/// One canonical column and the source headers accepted in its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

impl ColumnSpec {
    const fn new(canonical: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { canonical, aliases }
    }

    /// Finds the value for this column in `record`.
    ///
    /// Lookup order: the canonical name, then each alias in declaration order,
    /// then a trimmed case-insensitive match on any of those names.
    pub fn resolve<'r>(&self, record: &'r Record) -> Option<&'r str> {
        record
            .get(self.canonical)
            .or_else(|| self.aliases.iter().find_map(|alias| record.get(alias)))
            .or_else(|| self.names().find_map(|name| record.get_ignore_case(name)))
    }

    fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.canonical).chain(self.aliases.iter().copied())
    }
}

const GSTIN: &[&str] = &[
    "Party GSTIN/UIN",
    "Customer GSTIN",
    "GSTIN_PARTNER",
    "Party GSTIN",
    "GSTIN",
];
const RECEIVER_NAME: &[&str] = &["Party Name", "Customer Name"];
const INVOICE_NUMBER: &[&str] = &["Voucher No.", "Invoice No", "BELNR", "Bill No."];
const INVOICE_DATE: &[&str] = &["Voucher Date", "Invoice Date", "BUDAT", "Bill Date"];
const INVOICE_VALUE: &[&str] = &["Invoice Amount", "Bill Amount"];
const PLACE_OF_SUPPLY: &[&str] = &["Place of Supply", "POS"];
const RATE: &[&str] = &["GST Rate", "Tax Rate", "MWSKZ", "GST%"];
const TAXABLE_VALUE: &[&str] = &["Taxable Amount", "Sub Total", "DMBTR", "Taxable Amt"];
const IGST: &[&str] = &["IGST Amount", "IGST"];
const CGST: &[&str] = &["CGST Amount", "CGST"];
const SGST: &[&str] = &["SGST Amount", "SGST"];
const CESS: &[&str] = &["Cess"];
const NOTE_NUMBER: &[&str] = &["Note No.", "Credit Note No", "Debit Note No"];
const NOTE_DATE: &[&str] = &["Note Date", "Credit Note Date", "Debit Note Date"];
const NONE: &[&str] = &[];

const B2B: &[ColumnSpec] = &[
    ColumnSpec::new("GSTIN/UIN of Recipient", GSTIN),
    ColumnSpec::new("Receiver Name", RECEIVER_NAME),
    ColumnSpec::new("Invoice Number", INVOICE_NUMBER),
    ColumnSpec::new("Invoice date", INVOICE_DATE),
    ColumnSpec::new("Invoice Value", INVOICE_VALUE),
    ColumnSpec::new("Place Of Supply", PLACE_OF_SUPPLY),
    ColumnSpec::new("Reverse Charge", NONE),
    ColumnSpec::new("Applicable % of Tax Rate", NONE),
    ColumnSpec::new("Invoice Type", NONE),
    ColumnSpec::new("E-Commerce GSTIN", NONE),
    ColumnSpec::new("Rate", RATE),
    ColumnSpec::new("Taxable Value", TAXABLE_VALUE),
    ColumnSpec::new("Integrated Tax Amount", IGST),
    ColumnSpec::new("Central Tax Amount", CGST),
    ColumnSpec::new("State/UT Tax Amount", SGST),
    ColumnSpec::new("Cess Amount", CESS),
];

const B2CL: &[ColumnSpec] = &[
    ColumnSpec::new("Invoice Number", INVOICE_NUMBER),
    ColumnSpec::new("Invoice date", INVOICE_DATE),
    ColumnSpec::new("Invoice Value", INVOICE_VALUE),
    ColumnSpec::new("Place Of Supply", PLACE_OF_SUPPLY),
    ColumnSpec::new("Applicable % of Tax Rate", NONE),
    ColumnSpec::new("Rate", RATE),
    ColumnSpec::new("Taxable Value", TAXABLE_VALUE),
    ColumnSpec::new("Integrated Tax Amount", IGST),
    ColumnSpec::new("Cess Amount", CESS),
    ColumnSpec::new("E-Commerce GSTIN", NONE),
];

const B2CS: &[ColumnSpec] = &[
    ColumnSpec::new("Type", NONE),
    ColumnSpec::new("Place Of Supply", PLACE_OF_SUPPLY),
    ColumnSpec::new("Applicable % of Tax Rate", NONE),
    ColumnSpec::new("Rate", RATE),
    ColumnSpec::new("Taxable Value", TAXABLE_VALUE),
    ColumnSpec::new("Integrated Tax Amount", IGST),
    ColumnSpec::new("Central Tax Amount", CGST),
    ColumnSpec::new("State/UT Tax Amount", SGST),
    ColumnSpec::new("Cess Amount", CESS),
    ColumnSpec::new("E-Commerce GSTIN", NONE),
];

const EXPORT: &[ColumnSpec] = &[
    ColumnSpec::new("Export Type", NONE),
    ColumnSpec::new("Invoice Number", INVOICE_NUMBER),
    ColumnSpec::new("Invoice date", INVOICE_DATE),
    ColumnSpec::new("Invoice Value", INVOICE_VALUE),
    ColumnSpec::new("Port Code", &["Port"]),
    ColumnSpec::new("Shipping Bill Number", &["Shipping Bill No.", "SB No"]),
    ColumnSpec::new("Shipping Bill Date", &["SB Date"]),
    ColumnSpec::new("Applicable % of Tax Rate", NONE),
    ColumnSpec::new("Rate", RATE),
    ColumnSpec::new("Taxable Value", TAXABLE_VALUE),
    ColumnSpec::new("Cess Amount", CESS),
];

const EXEMPT: &[ColumnSpec] = &[
    ColumnSpec::new("Description", NONE),
    ColumnSpec::new("Nil Rated Supplies", &["Nil Rated"]),
    ColumnSpec::new(
        "Exempted (other than nil rated/non GST supply)",
        &["Exempted", "Exempt Supplies"],
    ),
    ColumnSpec::new("Non-GST Supplies", &["Non-GST supplies", "Non GST"]),
];

const CDNR: &[ColumnSpec] = &[
    ColumnSpec::new("GSTIN/UIN of Recipient", GSTIN),
    ColumnSpec::new("Receiver Name", RECEIVER_NAME),
    ColumnSpec::new("Note Number", NOTE_NUMBER),
    ColumnSpec::new("Note date", NOTE_DATE),
    ColumnSpec::new("Note Type", &["Document Type"]),
    ColumnSpec::new("Place Of Supply", PLACE_OF_SUPPLY),
    ColumnSpec::new("Reverse Charge", NONE),
    ColumnSpec::new("Note Supply Type", NONE),
    ColumnSpec::new("Note Value", &["Note Amount"]),
    ColumnSpec::new("Applicable % of Tax Rate", NONE),
    ColumnSpec::new("Rate", RATE),
    ColumnSpec::new("Taxable Value", TAXABLE_VALUE),
    ColumnSpec::new("Integrated Tax Amount", IGST),
    ColumnSpec::new("Central Tax Amount", CGST),
    ColumnSpec::new("State/UT Tax Amount", SGST),
    ColumnSpec::new("Cess Amount", CESS),
];

const CDNUR: &[ColumnSpec] = &[
    ColumnSpec::new("UR Type", NONE),
    ColumnSpec::new("Note Number", NOTE_NUMBER),
    ColumnSpec::new("Note date", NOTE_DATE),
    ColumnSpec::new("Note Type", &["Document Type"]),
    ColumnSpec::new("Place Of Supply", PLACE_OF_SUPPLY),
    ColumnSpec::new("Note Value", &["Note Amount"]),
    ColumnSpec::new("Applicable % of Tax Rate", NONE),
    ColumnSpec::new("Rate", RATE),
    ColumnSpec::new("Taxable Value", TAXABLE_VALUE),
    ColumnSpec::new("Integrated Tax Amount", IGST),
    ColumnSpec::new("Cess Amount", CESS),
];

const HSN: &[ColumnSpec] = &[
    ColumnSpec::new("HSN", &["HSN Code", "HSN/SAC"]),
    ColumnSpec::new("Description", NONE),
    ColumnSpec::new("UQC", &["Unit"]),
    ColumnSpec::new("Total Quantity", &["Quantity", "Qty"]),
    ColumnSpec::new("Total Value", NONE),
    ColumnSpec::new("Rate", RATE),
    ColumnSpec::new("Taxable Value", TAXABLE_VALUE),
    ColumnSpec::new("Integrated Tax Amount", IGST),
    ColumnSpec::new("Central Tax Amount", CGST),
    ColumnSpec::new("State/UT Tax Amount", SGST),
    ColumnSpec::new("Cess Amount", CESS),
];

const DOCS_ISSUED: &[ColumnSpec] = &[
    ColumnSpec::new("Nature of Document", NONE),
    ColumnSpec::new("Sr. No. From", &["Sr.No.From"]),
    ColumnSpec::new("Sr. No. To", &["Sr.No.To"]),
    ColumnSpec::new("Total Number", NONE),
    ColumnSpec::new("Cancelled", NONE),
];

/// Column specifications for `category`, in canonical column order.
pub fn aliases_for(category: Category) -> &'static [ColumnSpec] {
    match category {
        Category::B2b => B2B,
        Category::B2cl => B2CL,
        Category::B2cs => B2CS,
        Category::Export => EXPORT,
        Category::Exempt => EXEMPT,
        Category::Cdnr => CDNR,
        Category::Cdnur => CDNUR,
        Category::Hsn => HSN,
        Category::DocsIssued => DOCS_ISSUED,
    }
}

/// Canonical headers of `category`, in column order.
pub fn columns_for(category: Category) -> impl Iterator<Item = &'static str> {
    aliases_for(category).iter().map(|spec| spec.canonical)
}

/// Looks up the specification whose canonical name matches `header`,
/// ignoring case and surrounding whitespace.
pub fn column_spec(category: Category, header: &str) -> Option<&'static ColumnSpec> {
    let header = header.trim();
    aliases_for(category)
        .iter()
        .find(|spec| spec.canonical.eq_ignore_ascii_case(header))
}
