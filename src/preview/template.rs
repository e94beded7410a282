//! Head and foot template fragments.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::PreviewError;
use crate::Config;

const EMBEDDED_TEMPLATES: [(&str, &str); 3] = [
    ("head.html", include_str!("../../resources/templates/head.html")),
    ("foot.html", include_str!("../../resources/templates/foot.html")),
    ("style.css", include_str!("../../resources/templates/style.css")),
];

/// Locations of the two template files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePaths {
    pub head: PathBuf,
    pub foot: PathBuf,
}

impl TemplatePaths {
    pub fn new(head: impl Into<PathBuf>, foot: impl Into<PathBuf>) -> Self {
        Self {
            head: head.into(),
            foot: foot.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.start_html_template_file.clone(),
            config.end_html_template_file.clone(),
        )
    }
}

/// Read a whole template file. The file is closed before returning.
pub fn read_template(path: &Path) -> Result<String, PreviewError> {
    fs::read_to_string(path).map_err(|source| PreviewError::TemplateRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the built-in templates into `dir`, skipping files that already exist
/// so user modifications survive. Returns the files that were created.
pub fn write_default_templates(dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create template directory: {}", dir.display()))?;

    let mut created = Vec::new();
    for (name, content) in EMBEDDED_TEMPLATES {
        let path = dir.join(name);
        if path.exists() {
            continue;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write template: {}", path.display()))?;
        log::info!("Created template file: {:?}", path);
        created.push(path);
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_template_names_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("head.html");

        let err = read_template(&missing).unwrap_err();
        match &err {
            PreviewError::TemplateRead { path, .. } => assert_eq!(path, &missing),
            other => panic!("Expected template read error, got {other:?}"),
        }
        assert!(err.to_string().contains("head.html"));
    }

    #[test]
    fn test_write_default_templates_keeps_user_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("head.html"), "<custom>").expect("write head");

        let created = write_default_templates(dir.path()).expect("write templates");
        assert_eq!(
            created,
            vec![dir.path().join("foot.html"), dir.path().join("style.css")]
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("head.html")).expect("read head"),
            "<custom>"
        );

        let again = write_default_templates(dir.path()).expect("write templates");
        assert!(again.is_empty());
    }

    #[test]
    fn test_embedded_head_links_stylesheet() {
        let (_, head) = EMBEDDED_TEMPLATES[0];
        assert!(head.contains("href=\"style.css\""));
    }
}
