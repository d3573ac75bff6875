use std::path::PathBuf;

/// Error raised while loading a single post file.
///
/// Repositories log these and skip the offending file; they never abort a
/// whole collection load.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// File could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// File has no leading `---` front-matter block.
    #[error("missing front matter")]
    MissingFrontMatter,
    /// Front matter is not valid YAML or lacks required fields.
    #[error("invalid front matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),
    /// A date field could not be parsed.
    #[error("invalid date in {field}: {value:?}")]
    InvalidDate { field: &'static str, value: String },
}
