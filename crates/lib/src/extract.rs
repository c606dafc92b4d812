//! # Text Extraction
//!
//! Converts a stored file into plain text, dispatching on the file
//! extension (with the declared media type as a secondary hint). Extraction
//! is best-effort and never fatal: every reader degrades to the next option
//! on failure, and the final fallback is a lossy UTF-8 decode. An
//! unsupported or unreadable file yields an empty string.

use crate::types::SupportedFormats;
use std::path::Path;
use tracing::warn;

/// Extracts plain text from a file. Never fails; returns `""` when nothing
/// can be read.
pub async fn extract_text(path: &Path, media_type: Option<&str>) -> String {
    let text = match format_for(path, media_type) {
        Format::Plain => read_plain(path).await,
        #[cfg(feature = "pdf")]
        Format::Pdf => read_pdf(path).await,
        #[cfg(feature = "office")]
        Format::Word => read_office(path, OfficeKind::Word).await,
        #[cfg(feature = "office")]
        Format::Slides => read_office(path, OfficeKind::Slides).await,
        Format::Unknown => None,
    };

    match text {
        Some(text) => text,
        None => read_lossy(path).await.unwrap_or_default(),
    }
}

/// Which formats this build can read, for status reporting.
pub fn supported_formats() -> SupportedFormats {
    SupportedFormats {
        text: true,
        pdf: cfg!(feature = "pdf"),
        word: cfg!(feature = "office"),
        slides: cfg!(feature = "office"),
    }
}

enum Format {
    Plain,
    #[cfg(feature = "pdf")]
    Pdf,
    #[cfg(feature = "office")]
    Word,
    #[cfg(feature = "office")]
    Slides,
    Unknown,
}

fn format_for(path: &Path, media_type: Option<&str>) -> Format {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "txt" | "md" | "rst" => Format::Plain,
        #[cfg(feature = "pdf")]
        "pdf" => Format::Pdf,
        #[cfg(feature = "office")]
        "docx" => Format::Word,
        #[cfg(feature = "office")]
        "pptx" => Format::Slides,
        // No recognized extension: fall back to the declared media type.
        "" => match media_type.unwrap_or_default() {
            t if t.starts_with("text/") => Format::Plain,
            #[cfg(feature = "pdf")]
            "application/pdf" => Format::Pdf,
            #[cfg(feature = "office")]
            t if t.contains("wordprocessingml") => Format::Word,
            #[cfg(feature = "office")]
            t if t.contains("presentationml") => Format::Slides,
            _ => Format::Unknown,
        },
        _ => Format::Unknown,
    }
}

async fn read_plain(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Some(text),
        Err(err) => {
            warn!("plain-text read failed for {}: {err}", path.display());
            None
        }
    }
}

async fn read_lossy(path: &Path) -> Option<String> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) => {
            warn!("best-effort read failed for {}: {err}", path.display());
            None
        }
    }
}

/// Extracts text from every page of a PDF. Parsing is CPU-bound, so the
/// walk runs on the blocking pool.
#[cfg(feature = "pdf")]
async fn read_pdf(path: &Path) -> Option<String> {
    use pdf::file::FileOptions;

    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(err) => {
            warn!("PDF read failed for {}: {err}", path.display());
            return None;
        }
    };

    let result = tokio::task::spawn_blocking(move || -> Result<String, pdf::error::PdfError> {
        let file = FileOptions::cached().load(&data[..])?;
        let resolver = file.resolver();
        let mut full_text = String::new();

        for page_num in 0..file.num_pages() {
            let page = file.get_page(page_num)?;
            if let Some(content) = &page.contents {
                let operations = content.operations(&resolver)?;
                for op in operations.iter() {
                    match op {
                        pdf::content::Op::TextDraw { text } => {
                            full_text.push_str(&text.to_string_lossy());
                        }
                        pdf::content::Op::TextDrawAdjusted { array } => {
                            for item in array.iter() {
                                if let pdf::content::TextDrawAdjusted::Text(text) = item {
                                    full_text.push_str(&text.to_string_lossy());
                                }
                            }
                        }
                        _ => {}
                    }
                }
                full_text.push_str("\n\n");
            }
        }
        Ok(full_text)
    })
    .await;

    match result {
        Ok(Ok(text)) => Some(text),
        Ok(Err(err)) => {
            warn!("PDF extraction failed: {err}");
            None
        }
        Err(err) => {
            warn!("PDF extraction task failed: {err}");
            None
        }
    }
}

#[cfg(feature = "office")]
#[derive(Clone, Copy)]
enum OfficeKind {
    Word,
    Slides,
}

/// Extracts the text runs from an Office Open XML package: `w:t` elements
/// of `word/document.xml` for Word, `a:t` elements of each slide for
/// presentations.
#[cfg(feature = "office")]
async fn read_office(path: &Path, kind: OfficeKind) -> Option<String> {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(err) => {
            warn!("office document read failed for {}: {err}", path.display());
            return None;
        }
    };

    let result = tokio::task::spawn_blocking(move || -> anyhow::Result<String> {
        let cursor = std::io::Cursor::new(data);
        let mut archive = zip::ZipArchive::new(cursor)?;

        let entries: Vec<String> = match kind {
            OfficeKind::Word => vec!["word/document.xml".to_string()],
            OfficeKind::Slides => {
                let mut slides: Vec<String> = archive
                    .file_names()
                    .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
                    .map(str::to_string)
                    .collect();
                slides.sort();
                slides
            }
        };

        let mut text = String::new();
        for entry in entries {
            let file = archive.by_name(&entry)?;
            let xml = std::io::read_to_string(file)?;
            text.push_str(&scan_text_runs(&xml)?);
            text.push('\n');
        }
        Ok(text)
    })
    .await;

    match result {
        Ok(Ok(text)) => Some(text),
        Ok(Err(err)) => {
            warn!("office document extraction failed: {err}");
            None
        }
        Err(err) => {
            warn!("office document extraction task failed: {err}");
            None
        }
    }
}

#[cfg(feature = "office")]
fn scan_text_runs(xml: &str) -> anyhow::Result<String> {
    use quick_xml::events::Event;

    let mut reader = quick_xml::Reader::from_reader(xml.as_bytes());
    let mut buf = Vec::new();
    let mut runs = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:t" | b"a:t" => in_text = true,
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" | b"a:t" => in_text = false,
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                runs.push(e.unescape().unwrap_or_default().to_string());
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(anyhow::anyhow!("XML parsing error: {err}")),
            _ => {}
        }
        buf.clear();
    }

    Ok(runs.join(" "))
}
