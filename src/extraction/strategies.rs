//! Extraction strategy implementations
//!
//! Each strategy is one attempt at turning document bytes into text. A
//! strategy reports failure as a plain reason string; the fallback chain
//! decides what to do next. Strategies never gate their own output length,
//! that is the chain's job.

use quick_xml::events::Event;
use std::io::{Cursor, Read};
use std::path::Path;
use std::process::Command;

/// Input handed to every strategy attempt
///
/// The scratch path points at a temporary on-disk copy of the payload for
/// strategies that shell out to path-based tools; it is owned and cleaned
/// up by the chain.
pub struct StrategyInput<'a> {
    /// Raw document bytes
    pub bytes: &'a [u8],

    /// Temporary on-disk copy of the same bytes
    pub scratch_path: &'a Path,
}

/// One uniform extraction attempt
///
/// Implementations must be stateless and safe to share across scans.
pub trait TextStrategy: Send + Sync {
    /// Stable identifier, surfaced in [`ExtractionOutcome::strategy_used`]
    /// and in failure reports
    ///
    /// [`ExtractionOutcome::strategy_used`]: crate::domain::ExtractionOutcome
    fn id(&self) -> &'static str;

    /// Try to extract text; the reason string is kept for the failure report
    fn extract(&self, input: &StrategyInput<'_>) -> Result<String, String>;
}

/// Structured PDF extraction via the pure-Rust `pdf-extract` crate
pub struct PdfStructured;

impl TextStrategy for PdfStructured {
    fn id(&self) -> &'static str {
        "pdf-structured"
    }

    fn extract(&self, input: &StrategyInput<'_>) -> Result<String, String> {
        pdf_extract::extract_text_from_mem(input.bytes).map_err(|e| e.to_string())
    }
}

/// Lenient per-page PDF extraction via lopdf
///
/// Tolerates pages that fail individually; only a document with no
/// extractable page at all is a failure.
pub struct PdfLenient;

impl TextStrategy for PdfLenient {
    fn id(&self) -> &'static str {
        "pdf-lenient"
    }

    fn extract(&self, input: &StrategyInput<'_>) -> Result<String, String> {
        let doc = lopdf::Document::load_mem(input.bytes).map_err(|e| e.to_string())?;
        let mut pages_text = Vec::new();
        for page_number in doc.get_pages().keys() {
            match doc.extract_text(&[*page_number]) {
                Ok(text) => pages_text.push(text),
                Err(e) => {
                    tracing::debug!(page = page_number, error = %e, "Page extraction failed");
                }
            }
        }
        if pages_text.is_empty() {
            return Err("no page yielded text".to_string());
        }
        Ok(pages_text.join("\n\n"))
    }
}

/// Last-resort PDF extraction by shelling out to poppler's pdftotext
pub struct PdfToText;

impl TextStrategy for PdfToText {
    fn id(&self) -> &'static str {
        "pdf-pdftotext"
    }

    fn extract(&self, input: &StrategyInput<'_>) -> Result<String, String> {
        let output = Command::new("pdftotext")
            .args(["-layout", "-nopgbrk", "-enc", "UTF-8"])
            .arg(input.scratch_path)
            .arg("-")
            .output();
        match output {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err("pdftotext not installed".to_string())
            }
            Err(e) => Err(format!("failed to spawn pdftotext: {e}")),
            Ok(out) if !out.status.success() => {
                Err(format!("pdftotext exited with {}", out.status))
            }
            Ok(out) => Ok(String::from_utf8_lossy(&out.stdout).into_owned()),
        }
    }
}

/// DOCX extraction by reading word/document.xml out of the archive
pub struct DocxXml;

impl TextStrategy for DocxXml {
    fn id(&self) -> &'static str {
        "docx-xml"
    }

    fn extract(&self, input: &StrategyInput<'_>) -> Result<String, String> {
        let mut archive =
            zip::ZipArchive::new(Cursor::new(input.bytes)).map_err(|e| e.to_string())?;
        let mut entry = archive
            .by_name("word/document.xml")
            .map_err(|e| e.to_string())?;
        let mut xml = Vec::new();
        entry.read_to_end(&mut xml).map_err(|e| e.to_string())?;
        xml_text(&xml)
    }
}

/// PPTX extraction by reading every slide's XML out of the archive
pub struct PptxXml;

impl TextStrategy for PptxXml {
    fn id(&self) -> &'static str {
        "pptx-xml"
    }

    fn extract(&self, input: &StrategyInput<'_>) -> Result<String, String> {
        let mut archive =
            zip::ZipArchive::new(Cursor::new(input.bytes)).map_err(|e| e.to_string())?;

        let mut slide_names: Vec<String> = archive
            .file_names()
            .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
            .map(|n| n.to_string())
            .collect();
        slide_names.sort();
        if slide_names.is_empty() {
            return Err("archive contains no slides".to_string());
        }

        let mut slides_text = Vec::new();
        for name in slide_names {
            let mut entry = archive.by_name(&name).map_err(|e| e.to_string())?;
            let mut xml = Vec::new();
            entry.read_to_end(&mut xml).map_err(|e| e.to_string())?;
            slides_text.push(xml_text(&xml)?);
        }
        Ok(slides_text.join("\n\n"))
    }
}

/// Pull runs of text out of WordprocessingML/DrawingML markup
///
/// Text lives in `<w:t>`/`<a:t>` elements; paragraph ends become newlines.
/// Matching on the local name covers both vocabularies.
fn xml_text(xml: &[u8]) -> Result<String, String> {
    let mut reader = quick_xml::Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text_run = true,
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text_run => {
                let run = e.unescape().map_err(|e| e.to_string())?;
                text.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(format!("malformed XML: {e}")),
        }
        buf.clear();
    }
    Ok(text)
}

/// Spreadsheet extraction via calamine (xlsx, xls, ods)
pub struct SheetCalamine;

impl TextStrategy for SheetCalamine {
    fn id(&self) -> &'static str {
        "sheet-calamine"
    }

    fn extract(&self, input: &StrategyInput<'_>) -> Result<String, String> {
        use calamine::Reader;

        let cursor = Cursor::new(input.bytes.to_vec());
        let mut workbook =
            calamine::open_workbook_auto_from_rs(cursor).map_err(|e| e.to_string())?;

        let mut lines = Vec::new();
        for (_name, range) in workbook.worksheets() {
            for row in range.rows() {
                let cells: Vec<String> = row
                    .iter()
                    .filter(|c| !matches!(c, calamine::Data::Empty))
                    .map(|c| c.to_string())
                    .collect();
                if !cells.is_empty() {
                    lines.push(cells.join(" "));
                }
            }
        }
        if lines.is_empty() {
            return Err("workbook contains no cell data".to_string());
        }
        Ok(lines.join("\n"))
    }
}

/// CSV extraction: cells joined per record
pub struct CsvTable;

impl TextStrategy for CsvTable {
    fn id(&self) -> &'static str {
        "csv-table"
    }

    fn extract(&self, input: &StrategyInput<'_>) -> Result<String, String> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input.bytes);

        let mut lines = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| e.to_string())?;
            let fields: Vec<&str> = record.iter().map(str::trim).collect();
            lines.push(fields.join(", "));
        }
        Ok(lines.join("\n"))
    }
}

/// Plain text decoding, strict UTF-8 first, lossy when nearly valid
pub struct TextUtf8;

impl TextStrategy for TextUtf8 {
    fn id(&self) -> &'static str {
        "text-utf8"
    }

    fn extract(&self, input: &StrategyInput<'_>) -> Result<String, String> {
        match std::str::from_utf8(input.bytes) {
            Ok(text) => Ok(text.to_string()),
            Err(_) => {
                let lossy = String::from_utf8_lossy(input.bytes);
                let replaced = lossy.chars().filter(|&c| c == '\u{FFFD}').count();
                let total = lossy.chars().count().max(1);
                if replaced * 10 > total {
                    Err("content is not text".to_string())
                } else {
                    Ok(lossy.into_owned())
                }
            }
        }
    }
}

/// Printable-run scavenge for legacy binary formats (.doc) and damaged files
pub struct PrintableScavenge;

impl TextStrategy for PrintableScavenge {
    fn id(&self) -> &'static str {
        "printable-scavenge"
    }

    fn extract(&self, input: &StrategyInput<'_>) -> Result<String, String> {
        let text = scavenge_printable(input.bytes, 4);
        if text.is_empty() {
            return Err("no printable runs found".to_string());
        }
        Ok(text)
    }
}

/// Generic best-effort extraction for unknown kinds
///
/// Valid UTF-8 is taken as-is; anything else falls back to a printable-run
/// scavenge. This is the single catch-all route for unmapped kinds.
pub struct Generic;

impl TextStrategy for Generic {
    fn id(&self) -> &'static str {
        "generic"
    }

    fn extract(&self, input: &StrategyInput<'_>) -> Result<String, String> {
        if let Ok(text) = std::str::from_utf8(input.bytes) {
            return Ok(text.to_string());
        }
        let text = scavenge_printable(input.bytes, 4);
        if text.is_empty() {
            return Err("no text recoverable from binary content".to_string());
        }
        Ok(text)
    }
}

/// Collect runs of at least `min_run` printable ASCII characters
fn scavenge_printable(bytes: &[u8], min_run: usize) -> String {
    let mut out = String::new();
    let mut run = String::new();
    for &b in bytes {
        let c = b as char;
        if (' '..='~').contains(&c) || c == '\t' {
            run.push(c);
        } else {
            flush_run(&mut out, &mut run, min_run);
        }
    }
    flush_run(&mut out, &mut run, min_run);
    out
}

fn flush_run(out: &mut String, run: &mut String, min_run: usize) {
    if run.trim().chars().count() >= min_run {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(run.trim());
    }
    run.clear();
}
