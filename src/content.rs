use include_dir::{include_dir, Dir};
use serde::de::DeserializeOwned;
use std::error::Error;

static CONTENT_DIR: Dir = include_dir!("src/content");

/// Parse one of the JSON copy tables bundled into the binary
pub fn read_content<T: DeserializeOwned>(file_name: &str) -> Result<T, Box<dyn Error>> {
    let file = CONTENT_DIR
        .get_file(file_name)
        .ok_or_else(|| format!("content file not found: {file_name}"))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or("unable to interpret content file as a string")?;

    Ok(serde_json::from_str(file_as_str)?)
}
