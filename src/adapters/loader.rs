use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Read a JSON or YAML document, picking the parser from the extension.
/// Anything that is not `.yaml`/`.yml` is parsed as JSON.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, anyhow::Error> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let document = if matches!(ext, "yaml" | "yml") {
        serde_yaml::from_str(&content)
            .with_context(|| format!("YAML parse error in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("JSON parse error in {}", path.display()))?
    };

    tracing::debug!("Loaded {}", path.display());
    Ok(document)
}

/// Like [`load_document`] but yields `T::default()` when no path is given
pub fn load_optional<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T, anyhow::Error> {
    match path {
        Some(path) => load_document(path),
        None => Ok(T::default()),
    }
}
