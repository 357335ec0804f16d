//! Minimal xlsx workbook writer
//!
//! An `.xlsx` file is a ZIP container of OOXML parts. The export needs
//! exactly one worksheet with a fixed 15-column schema and inline strings,
//! so the workbook is assembled directly with the `zip` crate instead of
//! pulling in a spreadsheet library.
//!
//! # Parts written
//!
//! | Part | Purpose |
//! |------|---------|
//! | `[Content_Types].xml` | Part type declarations |
//! | `_rels/.rels` | Package -> workbook relationship |
//! | `xl/workbook.xml` | Workbook with the single `Orders` sheet |
//! | `xl/_rels/workbook.xml.rels` | Workbook -> sheet/styles relationships |
//! | `xl/styles.xml` | Minimal stylesheet (required by strict readers) |
//! | `xl/worksheets/sheet1.xml` | Header row + one row per order |

use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::export::ExportCounter;
use crate::orders::Order;

/// Spreadsheet column schema, in exact output order
pub const COLUMNS: [&str; 15] = [
    "Package_Serial",
    "Description",
    "Total_Weight",
    "Package_volume",
    "COD_Value",
    "Item_Special_Notes",
    "Customer_Name",
    "Mobile_No",
    "Street",
    "City",
    "Package_Ref",
    "Merchant_Name",
    "Warehouse_Name",
    "HasPOD",
    "SellerName",
];

/// Column letters A..O, matching [`COLUMNS`]
const COLUMN_REFS: [&str; 15] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O",
];

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No orders to export")]
    Empty,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Handle to a written export artifact
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub path: PathBuf,
    pub file_name: String,
}

/// Renders the current order set into `Orders_<N>.xlsx`
#[derive(Clone)]
pub struct ExportGenerator {
    export_dir: PathBuf,
    counter: ExportCounter,
}

impl ExportGenerator {
    pub fn new(export_dir: impl Into<PathBuf>, counter: ExportCounter) -> Self {
        Self {
            export_dir: export_dir.into(),
            counter,
        }
    }

    /// Write all orders to the next numbered workbook.
    ///
    /// Fails with [`ExportError::Empty`] when `orders` is empty - no file
    /// is produced and no number is consumed. The counter advances only
    /// after the file has been written successfully.
    pub fn export_all(&self, orders: &[Order]) -> ExportResult<ExportFile> {
        if orders.is_empty() {
            return Err(ExportError::Empty);
        }

        let file_name = format!("Orders_{}.xlsx", self.counter.current());
        let path = self.export_dir.join(&file_name);
        write_workbook(&path, orders)?;
        self.counter.next()?;

        tracing::info!(file = %file_name, rows = orders.len(), "Export written");
        Ok(ExportFile { path, file_name })
    }
}

fn write_workbook(path: &Path, orders: &[Order]) -> ExportResult<()> {
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(PACKAGE_RELS.as_bytes())?;

    zip.start_file("xl/workbook.xml", options)?;
    zip.write_all(WORKBOOK.as_bytes())?;

    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    zip.write_all(WORKBOOK_RELS.as_bytes())?;

    zip.start_file("xl/styles.xml", options)?;
    zip.write_all(STYLES.as_bytes())?;

    zip.start_file("xl/worksheets/sheet1.xml", options)?;
    zip.write_all(sheet_xml(orders).as_bytes())?;

    zip.finish()?;
    Ok(())
}

/// Render the worksheet: header row, then one row per order in submission
/// order. All strings are inline (no shared-strings table); `Total_Weight`
/// is a numeric cell.
fn sheet_xml(orders: &[Order]) -> String {
    let mut xml = String::with_capacity(1024 + orders.len() * 512);
    xml.push_str(XML_DECL);
    xml.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    xml.push_str(r#"<row r="1">"#);
    for (col, header) in COLUMNS.iter().enumerate() {
        push_text_cell(&mut xml, col, 1, header);
    }
    xml.push_str("</row>");

    for (i, order) in orders.iter().enumerate() {
        let row = i + 2;
        let _ = write!(xml, r#"<row r="{row}">"#);
        push_text_cell(&mut xml, 0, row, &order.serial);
        push_text_cell(&mut xml, 1, row, &order.description);
        push_number_cell(&mut xml, 2, row, order.total_weight);
        push_text_cell(&mut xml, 3, row, &order.package_volume);
        push_text_cell(&mut xml, 4, row, &order.cod_value);
        push_text_cell(&mut xml, 5, row, &order.special_notes);
        push_text_cell(&mut xml, 6, row, &order.customer_name);
        push_text_cell(&mut xml, 7, row, &order.mobile_no);
        push_text_cell(&mut xml, 8, row, &order.street);
        push_text_cell(&mut xml, 9, row, &order.city);
        push_text_cell(&mut xml, 10, row, &order.package_ref);
        push_text_cell(&mut xml, 11, row, &order.merchant_name);
        push_text_cell(&mut xml, 12, row, &order.warehouse_name);
        push_text_cell(&mut xml, 13, row, &order.has_pod);
        push_text_cell(&mut xml, 14, row, &order.seller_name);
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn push_text_cell(xml: &mut String, col: usize, row: usize, value: &str) {
    let _ = write!(
        xml,
        r#"<c r="{}{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
        COLUMN_REFS[col],
        row,
        xml_escape(value)
    );
}

fn push_number_cell(xml: &mut String, col: usize, row: usize, value: f64) {
    let _ = write!(xml, r#"<c r="{}{}"><v>{}</v></c>"#, COLUMN_REFS[col], row, value);
}

fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
    r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
    r#"</Types>"#
);

const PACKAGE_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
    r#"</Relationships>"#
);

const WORKBOOK: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    r#"<sheets><sheet name="Orders" sheetId="1" r:id="rId1"/></sheets>"#,
    r#"</workbook>"#
);

const WORKBOOK_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
    r#"</Relationships>"#
);

const STYLES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    r#"<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>"#,
    r#"<fills count="1"><fill><patternFill patternType="none"/></fill></fills>"#,
    r#"<borders count="1"><border/></borders>"#,
    r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
    r#"<cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>"#,
    r#"</styleSheet>"#
);
