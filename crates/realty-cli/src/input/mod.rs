pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve a typed command input: `--input` file first, then JSON piped on
/// stdin. `None` means the caller should fall back to its flags.
pub fn resolve<T: DeserializeOwned>(
    path: &Option<String>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    match stdin::read_stdin()? {
        Some(value) => {
            tracing::debug!("using JSON input from stdin");
            Ok(Some(serde_json::from_value(value)?))
        }
        None => Ok(None),
    }
}
