//! Input format types and the extension allow-list
//!
//! The external converter infers the source format from the file extension,
//! so the extension is the only signal used here as well. No content
//! sniffing.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Input document format accepted for conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InputFormat {
    /// Microsoft Word 97-2003 document (.doc)
    Doc,
    /// Microsoft Word document (.docx)
    Docx,
    /// Microsoft `PowerPoint` 97-2003 presentation (.ppt)
    Ppt,
    /// Microsoft `PowerPoint` presentation (.pptx)
    Pptx,
    /// Microsoft Excel 97-2003 spreadsheet (.xls)
    Xls,
    /// Microsoft Excel spreadsheet (.xlsx)
    Xlsx,
    /// `OpenDocument` Text (.odt)
    Odt,
    /// `OpenDocument` Spreadsheet (.ods)
    Ods,
    /// `OpenDocument` Presentation (.odp)
    Odp,
    /// Rich Text Format (.rtf)
    Rtf,
    /// Plain text (.txt)
    Txt,
    /// HTML document (.html, .htm)
    Html,
}

impl InputFormat {
    /// All formats the converter accepts, in display order.
    #[must_use = "returns the list of supported formats"]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Doc,
            Self::Docx,
            Self::Ppt,
            Self::Pptx,
            Self::Xls,
            Self::Xlsx,
            Self::Odt,
            Self::Ods,
            Self::Odp,
            Self::Rtf,
            Self::Txt,
            Self::Html,
        ]
    }

    /// Detect format from a file extension (without the leading dot).
    #[inline]
    #[must_use = "detects format from file extension"]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "doc" => Some(Self::Doc),
            "docx" => Some(Self::Docx),
            "ppt" => Some(Self::Ppt),
            "pptx" => Some(Self::Pptx),
            "xls" => Some(Self::Xls),
            "xlsx" => Some(Self::Xlsx),
            "odt" => Some(Self::Odt),
            "ods" => Some(Self::Ods),
            "odp" => Some(Self::Odp),
            "rtf" => Some(Self::Rtf),
            "txt" => Some(Self::Txt),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }

    /// Get file extensions associated with this format
    #[inline]
    #[must_use = "returns file extensions for this format"]
    pub const fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Doc => &["doc"],
            Self::Docx => &["docx"],
            Self::Ppt => &["ppt"],
            Self::Pptx => &["pptx"],
            Self::Xls => &["xls"],
            Self::Xlsx => &["xlsx"],
            Self::Odt => &["odt"],
            Self::Ods => &["ods"],
            Self::Odp => &["odp"],
            Self::Rtf => &["rtf"],
            Self::Txt => &["txt"],
            Self::Html => &["html", "htm"],
        }
    }

    /// Check if this is a word-processing format
    #[inline]
    #[must_use = "returns whether this is a word-processing format"]
    pub const fn is_word_processing(&self) -> bool {
        matches!(
            self,
            Self::Doc | Self::Docx | Self::Odt | Self::Rtf | Self::Txt | Self::Html
        )
    }

    /// Check if this is a presentation format
    #[inline]
    #[must_use = "returns whether this is a presentation format"]
    pub const fn is_presentation(&self) -> bool {
        matches!(self, Self::Ppt | Self::Pptx | Self::Odp)
    }

    /// Check if this is a spreadsheet format
    #[inline]
    #[must_use = "returns whether this is a spreadsheet format"]
    pub const fn is_spreadsheet(&self) -> bool {
        matches!(self, Self::Xls | Self::Xlsx | Self::Ods)
    }
}

impl std::fmt::Display for InputFormat {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Doc => "DOC",
            Self::Docx => "DOCX",
            Self::Ppt => "PPT",
            Self::Pptx => "PPTX",
            Self::Xls => "XLS",
            Self::Xlsx => "XLSX",
            Self::Odt => "ODT",
            Self::Ods => "ODS",
            Self::Odp => "ODP",
            Self::Rtf => "RTF",
            Self::Txt => "TXT",
            Self::Html => "HTML",
        };
        write!(f, "{s}")
    }
}

/// Allow-list of input file extensions.
///
/// The default list covers every [`InputFormat`]; callers can substitute
/// their own list to narrow or widen what the scanner picks up. Extensions
/// are stored lower-cased with their leading dot and matched
/// case-insensitively.
#[derive(Debug, Clone)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        let extensions = InputFormat::all()
            .iter()
            .flat_map(|format| format.extensions())
            .map(|ext| format!(".{ext}"))
            .collect();
        Self { extensions }
    }
}

impl ExtensionFilter {
    /// Build a filter from an explicit extension list (leading dots optional).
    #[must_use = "returns the configured filter"]
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref().to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
        Self { extensions }
    }

    /// Check if a filename has a supported extension.
    ///
    /// Filenames without an extension test false; there is no error case.
    #[must_use = "returns whether the filename is supported"]
    pub fn is_supported(&self, filename: &str) -> bool {
        let Some(ext) = Path::new(filename).extension() else {
            return false;
        };
        let ext = format!(".{}", ext.to_string_lossy().to_lowercase());
        self.extensions.iter().any(|allowed| *allowed == ext)
    }

    /// The configured allow-list, dots included.
    #[must_use = "returns the configured extension list"]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(InputFormat::from_extension("docx"), Some(InputFormat::Docx));
        assert_eq!(InputFormat::from_extension("DOCX"), Some(InputFormat::Docx));
        assert_eq!(InputFormat::from_extension("htm"), Some(InputFormat::Html));
        assert_eq!(InputFormat::from_extension("exe"), None);
        assert_eq!(InputFormat::from_extension(""), None);
    }

    #[test]
    fn test_extensions_round_trip() {
        for format in InputFormat::all() {
            for ext in format.extensions() {
                assert_eq!(InputFormat::from_extension(ext), Some(*format));
            }
        }
    }

    #[test]
    fn test_category_predicates_partition() {
        for format in InputFormat::all() {
            let categories = usize::from(format.is_word_processing())
                + usize::from(format.is_presentation())
                + usize::from(format.is_spreadsheet());
            assert_eq!(categories, 1, "{format} should be in exactly one category");
        }
    }

    #[test]
    fn test_default_filter_supports_office_formats() {
        let filter = ExtensionFilter::default();
        assert!(filter.is_supported("report.docx"));
        assert!(filter.is_supported("slides.pptx"));
        assert!(filter.is_supported("notes.txt"));
        assert!(filter.is_supported("page.htm"));
        assert!(!filter.is_supported("tool.exe"));
        assert!(!filter.is_supported("archive.zip"));
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let filter = ExtensionFilter::default();
        assert!(filter.is_supported("A.DOCX"));
        assert!(filter.is_supported("a.docx"));
        assert!(filter.is_supported("c.PPTX"));
    }

    #[test]
    fn test_filter_no_extension() {
        let filter = ExtensionFilter::default();
        assert!(!filter.is_supported("README"));
        assert!(!filter.is_supported(""));
        // A leading dot with no stem is not an extension.
        assert!(!filter.is_supported(".docx"));
    }

    #[test]
    fn test_custom_allow_list() {
        let filter = ExtensionFilter::new(["pdf", ".DOCX"]);
        assert!(filter.is_supported("out.pdf"));
        assert!(filter.is_supported("in.docx"));
        assert!(!filter.is_supported("slides.pptx"));
    }
}
