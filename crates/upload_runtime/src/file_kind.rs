//! Filename-extension classification used for display only.
//!
//! Nothing here rejects a file: every name maps to some category, with
//! [`FileCategory::GenericBinary`] as the fallback.

use serde::{Deserialize, Serialize};

const ICON_BASE: &str = "https://fonts.gstatic.com/s/i/materialicons";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Coarse file category used to pick a list icon.
pub enum FileCategory {
    /// `pdf`
    Document,
    /// `png`, `jpg`, `jpeg`, `gif`
    Image,
    /// `doc`, `docx`
    WordDocument,
    /// `xls`, `xlsx`
    Spreadsheet,
    /// `txt`
    PlainText,
    /// Anything else.
    GenericBinary,
}

impl FileCategory {
    /// Classifies a filename by its extension, case-insensitively.
    pub fn from_file_name(name: &str) -> Self {
        match file_extension(name).as_deref() {
            Some("pdf") => Self::Document,
            Some("png" | "jpg" | "jpeg" | "gif") => Self::Image,
            Some("doc" | "docx") => Self::WordDocument,
            Some("xls" | "xlsx") => Self::Spreadsheet,
            Some("txt") => Self::PlainText,
            _ => Self::GenericBinary,
        }
    }

    /// Stable kebab-case token, used as a CSS/data attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Image => "image",
            Self::WordDocument => "word-document",
            Self::Spreadsheet => "spreadsheet",
            Self::PlainText => "plain-text",
            Self::GenericBinary => "generic-binary",
        }
    }

    /// Material icon name for the category.
    pub const fn icon_name(self) -> &'static str {
        match self {
            Self::Document => "picture_as_pdf",
            Self::Image => "image",
            Self::WordDocument => "description",
            Self::Spreadsheet => "table_chart",
            Self::PlainText => "text_snippet",
            Self::GenericBinary => "insert_drive_file",
        }
    }

    /// Hosted SVG for [`Self::icon_name`].
    pub fn icon_url(self) -> String {
        material_icon_url(self.icon_name())
    }
}

/// Lowercased text after the last `.`, if the name has one.
pub fn file_extension(name: &str) -> Option<String> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// MIME type inferred from the filename extension.
pub fn mime_type_for(name: &str) -> String {
    let extension = file_extension(name).unwrap_or_default();
    match FileCategory::from_file_name(name) {
        FileCategory::Document => "application/pdf".to_string(),
        FileCategory::Image => format!("image/{extension}"),
        FileCategory::WordDocument => "application/msword".to_string(),
        FileCategory::Spreadsheet => "application/vnd.ms-excel".to_string(),
        FileCategory::PlainText => "text/plain".to_string(),
        FileCategory::GenericBinary => "application/octet-stream".to_string(),
    }
}

/// Hosted SVG URL for a material icon name.
pub fn material_icon_url(icon_name: &str) -> String {
    format!("{ICON_BASE}/{icon_name}/v1/24px.svg")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn extension_table_maps_every_row() {
        let cases = [
            ("report.pdf", FileCategory::Document),
            ("a.png", FileCategory::Image),
            ("b.JPG", FileCategory::Image),
            ("c.jpeg", FileCategory::Image),
            ("d.gif", FileCategory::Image),
            ("e.doc", FileCategory::WordDocument),
            ("f.DOCX", FileCategory::WordDocument),
            ("g.xls", FileCategory::Spreadsheet),
            ("h.xlsx", FileCategory::Spreadsheet),
            ("notes.txt", FileCategory::PlainText),
            ("archive.tar.gz", FileCategory::GenericBinary),
            ("README", FileCategory::GenericBinary),
            ("trailing.", FileCategory::GenericBinary),
        ];
        for (name, expected) in cases {
            assert_eq!(FileCategory::from_file_name(name), expected, "{name}");
        }
    }

    #[test]
    fn mime_types_follow_extension() {
        assert_eq!(mime_type_for("a.PNG"), "image/png");
        assert_eq!(mime_type_for("scan.pdf"), "application/pdf");
        assert_eq!(mime_type_for("budget.xlsx"), "application/vnd.ms-excel");
        assert_eq!(mime_type_for("letter.docx"), "application/msword");
        assert_eq!(mime_type_for("bin"), "application/octet-stream");
    }

    #[test]
    fn icon_urls_point_at_material_icons() {
        assert_eq!(
            FileCategory::Image.icon_url(),
            "https://fonts.gstatic.com/s/i/materialicons/image/v1/24px.svg"
        );
        assert_eq!(FileCategory::GenericBinary.as_str(), "generic-binary");
    }
}
