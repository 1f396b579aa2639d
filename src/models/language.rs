//! Editor language inferred from a file name's extension.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Html,
    Css,
    JavaScript,
    Json,
    Markdown,
    Plaintext,
}

impl Language {
    /// Unmapped extensions (and names without one) are plain text.
    pub fn from_name(name: &str) -> Self {
        match name.rsplit_once('.').map(|(_, ext)| ext) {
            Some("html") => Self::Html,
            Some("css") => Self::Css,
            Some("js") => Self::JavaScript,
            Some("json") => Self::Json,
            Some("md") => Self::Markdown,
            _ => Self::Plaintext,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::JavaScript => "javascript",
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Plaintext => "plaintext",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::JavaScript => "JavaScript",
            Self::Json => "JSON",
            Self::Markdown => "Markdown",
            Self::Plaintext => "Plain Text",
        }
    }
}
