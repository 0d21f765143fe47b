//! Multi-page tabular document extractor
//!
//! Two document layouts are read:
//! - PDF files (detected by their `%PDF` signature). The text layer is
//!   extracted and read as a whitespace-separated table, one row per line,
//!   with the header taken from the first line and repeated page headers
//!   skipped. Table borders, merged cells or rows wrapped over several lines
//!   are not reconstructed.
//! - Text files holding one or more pages separated by form feeds (`\x0c`),
//!   each a CSV block with its own header row, so pages may differ in their
//!   column sets.

use super::Location;
use super::parse::parse_csv;
use crate::etl::Extractor;
use crate::table::{Cell, Table};
use eyre::{Context, Result, eyre};

const PAGE_BREAK: char = '\x0c';
const PDF_SIGNATURE: &[u8] = b"%PDF";

/// Extracts all pages of a tabular document as one table
///
/// # Example
/// ```no_run
/// use sales_data_etl::extract::DocumentExtractor;
/// use sales_data_etl::etl::Extractor;
///
/// # async fn example() -> eyre::Result<()> {
/// let extractor = DocumentExtractor::new("https://example.com/card_details.pdf")?
///     .with_wide_column("card_provider");
/// let cards = extractor.extract().await?;
/// # Ok(())
/// # }
/// ```
pub struct DocumentExtractor {
    location: Location,
    wide_column: Option<String>,
}

impl DocumentExtractor {
    pub fn new(reference: &str) -> Result<Self> {
        Ok(Self {
            location: Location::parse(reference)?,
            wide_column: None,
        })
    }

    /// Column whose values may contain spaces in a PDF text layer.
    ///
    /// Surplus words on a row are joined into this column.
    pub fn with_wide_column(mut self, name: impl Into<String>) -> Self {
        self.wide_column = Some(name.into());
        self
    }
}

/// Split a document into pages and concatenate them in order.
///
/// Blank pages are skipped.
pub fn read_pages(text: &str) -> Result<Table> {
    let pages = text
        .split(PAGE_BREAK)
        .filter(|page| !page.trim().is_empty())
        .enumerate()
        .map(|(i, page)| {
            parse_csv(page.trim_start_matches(['\r', '\n']))
                .with_context(|| format!("Failed to parse page {}", i + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Read {} page(s)", pages.len());
    Ok(Table::concat(pages))
}

/// Read a whitespace-separated text table.
///
/// The first non-blank line is the header; later lines equal to it are
/// repeated page headers and are skipped. A row with more words than
/// columns joins the surplus into `wide_column`; any other mismatch fails.
pub fn read_text_table(text: &str, wide_column: Option<&str>) -> Result<Table> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.split_whitespace().collect::<Vec<_>>()))
        .filter(|(_, words)| !words.is_empty());

    let Some((_, header)) = lines.next() else {
        return Ok(Table::new());
    };
    let width = header.len();
    let wide = match wide_column {
        Some(name) => Some(
            header
                .iter()
                .position(|h| *h == name)
                .ok_or_else(|| eyre!("Column '{}' not found in document header", name))?,
        ),
        None => None,
    };

    let mut rows = Vec::new();
    for (number, words) in lines {
        if words == header {
            continue;
        }
        let row: Vec<Cell> = match (words.len(), wide) {
            (n, _) if n == width => words.iter().map(|w| Cell::infer(w)).collect(),
            (n, Some(wide)) if n > width => {
                let tail = width - wide - 1;
                let mut row: Vec<Cell> = words[..wide].iter().map(|w| Cell::infer(w)).collect();
                row.push(Cell::Text(words[wide..n - tail].join(" ")));
                row.extend(words[n - tail..].iter().map(|w| Cell::infer(w)));
                row
            }
            (n, _) => eyre::bail!("Line {} has {} field(s), expected {}", number, n, width),
        };
        rows.push(row);
    }

    log::debug!("Read {} row(s) from document text", rows.len());
    Ok(Table::from_rows(
        header.into_iter().map(String::from).collect(),
        rows,
    )?)
}

/// Extract the text layer of a PDF file
async fn pdf_text(bytes: Vec<u8>) -> Result<String> {
    // pdf-extract is CPU bound and may panic on malformed input
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| eyre!("PDF text extraction aborted: {}", e))?
        .map_err(|e| eyre!("Failed to extract PDF text: {:?}", e))
}

impl Extractor for DocumentExtractor {
    async fn extract(&self) -> Result<Table> {
        log::debug!("Reading document {}", self.location);
        let bytes = self.location.read_bytes().await?;

        let table = if bytes.starts_with(PDF_SIGNATURE) {
            let text = pdf_text(bytes).await?;
            read_text_table(&text, self.wide_column.as_deref())
        } else {
            let text = String::from_utf8(bytes)
                .with_context(|| format!("{} is neither PDF nor UTF-8 text", self.location))?;
            read_pages(&text)
        };
        table.with_context(|| format!("Failed to read document {}", self.location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const DOCUMENT: &str = "card_number,expiry_date,card_provider,date_payment_confirmed\n\
        30060773296197,09/26,Diners Club / Carte Blanche,2015-11-25\n\
        NULL,NULL,NULL,NULL\n\
        \x0c\n\
        card_number,expiry_date,card_provider,date_payment_confirmed\n\
        ?4971858637664481,10/23,VISA 16 digit,2001-06-18\n\
        \x0c\n";

    const PDF_TEXT: &str = "\
card_number expiry_date card_provider date_payment_confirmed
30060773296197 09/26 Diners Club / Carte Blanche 2015-11-25
NULL NULL NULL NULL

\x0c
card_number expiry_date card_provider date_payment_confirmed
?4971858637664481 10/23 VISA 16 digit 2001-06-18
";

    #[test]
    fn test_read_pages() {
        let table = read_pages(DOCUMENT).unwrap();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.num_columns(), 4);
        assert_eq!(table.cell("card_number", 0).unwrap(), &Cell::Int(30060773296197));
        assert_eq!(
            table.cell("card_number", 2).unwrap(),
            &Cell::from("?4971858637664481")
        );
    }

    #[test]
    fn test_pages_with_different_columns() {
        let text = "a,b\n1,2\n\x0ca,c\n3,4\n";
        let table = read_pages(text).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b", "c"]);
        assert_eq!(table.cell("b", 1).unwrap(), &Cell::Null);
        assert_eq!(table.cell("c", 0).unwrap(), &Cell::Null);
    }

    #[test]
    fn test_read_text_table() {
        let table = read_text_table(PDF_TEXT, Some("card_provider")).unwrap();
        assert_eq!(
            table.column_names(),
            vec!["card_number", "expiry_date", "card_provider", "date_payment_confirmed"]
        );
        assert_eq!(table.num_rows(), 3);
        assert_eq!(
            table.cell("card_provider", 0).unwrap(),
            &Cell::from("Diners Club / Carte Blanche")
        );
        assert_eq!(table.cell("expiry_date", 2).unwrap(), &Cell::from("10/23"));
        assert_eq!(table.cell("card_provider", 2).unwrap(), &Cell::from("VISA 16 digit"));
        assert_eq!(
            table.cell("date_payment_confirmed", 2).unwrap(),
            &Cell::from("2001-06-18")
        );
    }

    #[test]
    fn test_read_text_table_rejects_ragged_rows() {
        assert!(read_text_table(PDF_TEXT, None).is_err());
        assert!(read_text_table("a b c\n1 2\n", Some("b")).is_err());
        assert!(read_text_table("a b\n1 2\n", Some("c")).is_err());
        assert!(read_text_table("\n\n", None).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_extract_remote_document() {
        let server = MockServer::start();
        server
            .mock(|when, then| {
                when.method(GET).path("/card_details.txt");
                then.status(200).body(DOCUMENT);
            });

        let extractor = DocumentExtractor::new(&server.url("/card_details.txt")).unwrap();
        let table = extractor.extract().await.unwrap();
        assert_eq!(table.num_rows(), 3);
    }

    #[tokio::test]
    async fn test_extract_corrupt_pdf() {
        let server = MockServer::start();
        server
            .mock(|when, then| {
                when.method(GET).path("/card_details.pdf");
                then.status(200).body("%PDF-1.4 truncated");
            });

        let extractor = DocumentExtractor::new(&server.url("/card_details.pdf")).unwrap();
        assert!(extractor.extract().await.is_err());
    }

    #[tokio::test]
    async fn test_extract_missing_document() {
        let server = MockServer::start();
        server
            .mock(|when, then| {
                when.method(GET).path("/missing.txt");
                then.status(404);
            });

        let extractor = DocumentExtractor::new(&server.url("/missing.txt")).unwrap();
        assert!(extractor.extract().await.is_err());
    }
}
