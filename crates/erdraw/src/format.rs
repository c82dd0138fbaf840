//! Output formats and their detection from file names.

use std::{fmt, path::Path};

use crate::ErdrawError;

/// A diagram output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Png,
    Jpg,
    Svg,
    Pdf,
    /// Graphviz DOT source.
    Dot,
    /// The plain-text ER markdown format (`[table]` blocks and relation lines).
    Markdown,
}

impl Format {
    /// Detects the format from the extension of `path`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`ErdrawError::UnsupportedFormat`] if the path has no
    /// extension or the extension is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use erdraw::Format;
    ///
    /// assert_eq!(Format::from_path("diagram.png").unwrap(), Format::Png);
    /// assert_eq!(Format::from_path("out/schema.ER").unwrap(), Format::Markdown);
    /// assert!(Format::from_path("diagram").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ErdrawError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| {
                ErdrawError::UnsupportedFormat(format!(
                    "`{}` has no file extension",
                    path.display()
                ))
            })?;

        match extension.as_str() {
            "png" => Ok(Format::Png),
            "jpg" | "jpeg" => Ok(Format::Jpg),
            "svg" => Ok(Format::Svg),
            "pdf" => Ok(Format::Pdf),
            "dot" | "gv" => Ok(Format::Dot),
            "er" | "md" => Ok(Format::Markdown),
            other => Err(ErdrawError::UnsupportedFormat(format!(
                "`.{other}` (expected one of png, jpg, svg, pdf, dot, er)"
            ))),
        }
    }

    /// Returns `true` for formats that can only be produced by running
    /// Graphviz.
    pub fn needs_graphviz(self) -> bool {
        matches!(self, Format::Png | Format::Jpg | Format::Pdf)
    }

    /// Returns `true` for formats whose output is text.
    pub fn is_text(self) -> bool {
        matches!(self, Format::Svg | Format::Dot | Format::Markdown)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Png => "png",
            Format::Jpg => "jpg",
            Format::Svg => "svg",
            Format::Pdf => "pdf",
            Format::Dot => "dot",
            Format::Markdown => "er",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Format::from_path("diagram.png").unwrap(), Format::Png);
        assert_eq!(Format::from_path("a/b/diagram.JPEG").unwrap(), Format::Jpg);
        assert_eq!(Format::from_path("diagram.svg").unwrap(), Format::Svg);
        assert_eq!(Format::from_path("diagram.pdf").unwrap(), Format::Pdf);
        assert_eq!(Format::from_path("diagram.gv").unwrap(), Format::Dot);
        assert_eq!(Format::from_path("diagram.md").unwrap(), Format::Markdown);
    }

    #[test]
    fn test_from_path_rejects_unknown() {
        let err = Format::from_path("diagram.bmp").unwrap_err();
        assert!(matches!(err, ErdrawError::UnsupportedFormat(_)));
        assert!(err.to_string().contains(".bmp"));

        assert!(Format::from_path("diagram").is_err());
    }

    #[test]
    fn test_format_properties() {
        assert!(Format::Png.needs_graphviz());
        assert!(!Format::Svg.needs_graphviz());
        assert!(Format::Markdown.is_text());
        assert!(!Format::Pdf.is_text());
    }
}
