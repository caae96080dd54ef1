//! CSV file reading with explicit label-row and encoding configuration.

use std::borrow::Cow;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Character encoding of a source file.
///
/// A byte-order mark, when present, takes precedence over this setting, and
/// input that is valid UTF-8 is always read as UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceEncoding {
    #[default]
    Utf8,
    /// ISO-8859-1 / Windows-1252, as used by the library survey files.
    Latin1,
}

impl SourceEncoding {
    fn encoding(self) -> &'static Encoding {
        match self {
            Self::Utf8 => UTF_8,
            Self::Latin1 => WINDOWS_1252,
        }
    }
}

/// How a source file is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CsvOptions {
    /// Rows between the header and the first data row.
    ///
    /// Census extracts carry one human-readable label row under the
    /// field-code header.
    pub label_rows: usize,
    pub encoding: SourceEncoding,
}

impl CsvOptions {
    /// Layout of an ACS extract: field codes, then one label row.
    pub fn census() -> Self {
        Self {
            label_rows: 1,
            encoding: SourceEncoding::Utf8,
        }
    }

    /// Layout of a library survey file: single header, latin-1 text.
    pub fn survey() -> Self {
        Self {
            label_rows: 0,
            encoding: SourceEncoding::Latin1,
        }
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Decodes source bytes: BOM first, then strict UTF-8, then the configured
/// fallback encoding.
fn decode(bytes: &[u8], encoding: SourceEncoding) -> (Cow<'_, str>, &'static Encoding, bool) {
    if let Some((bom_encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = bom_encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (text, bom_encoding, had_errors);
    }
    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        return (text, UTF_8, false);
    }
    let fallback = encoding.encoding();
    let (text, had_errors) = fallback.decode_without_bom_handling(bytes);
    (text, fallback, had_errors)
}

/// Reads a CSV file into a DataFrame with every column typed as `String`.
///
/// Type coercion is left to the source loaders, which know the field
/// conventions; letting Polars infer types would turn `"250,000+"` or
/// `"06001"` into something else before the normalizer sees it.
pub fn read_csv_table(path: &Path, options: &CsvOptions) -> Result<DataFrame> {
    let bytes = read_bytes(path)?;

    let (text, used, had_errors) = decode(&bytes, options.encoding);
    if had_errors {
        tracing::warn!(
            path = %path.display(),
            encoding = used.name(),
            "source contains byte sequences invalid for its encoding; replaced"
        );
    }
    let utf8 = text.into_owned().into_bytes();

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_skip_rows_after_header(options.label_rows)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(utf8))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read source table"
    );
    Ok(df)
}

/// Reads several extracts of the same table and stacks them vertically.
///
/// Later files may order their columns differently but must carry every
/// column of the first file; extra columns are dropped.
pub fn read_csv_tables(paths: &[PathBuf], options: &CsvOptions) -> Result<DataFrame> {
    let Some((first, rest)) = paths.split_first() else {
        return Err(IngestError::NoInputFiles {
            source_name: "table",
        });
    };
    let mut stacked = read_csv_table(first, options)?;
    let names: Vec<PlSmallStr> = stacked.get_column_names().into_iter().cloned().collect();

    for path in rest {
        let next = read_csv_table(path, options)?;
        let aligned = next
            .select(names.iter().cloned())
            .map_err(|e| IngestError::SchemaMismatch {
                path: path.clone(),
                message: e.to_string(),
            })?;
        stacked.vstack_mut(&aligned)?;
    }

    Ok(stacked)
}
