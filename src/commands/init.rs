use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory and writes a template `config.json` with placeholder credentials.
/// The user must replace the bracketed placeholders before `export` will run.
///
/// # Errors
/// - Returns an error if a config file already exists or any file operation fails.
pub async fn init(base800_home: &Path) -> Result<Out<()>> {
    let config = Config::create(base800_home)
        .await
        .context("Unable to create the data directory and config")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Created '{}', fill in your company credentials before running 'base800 export'",
        config.config_path().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_template() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("base800_home");
        let out = init(&home).await.unwrap();
        assert!(out.message().contains("config.json"));
        assert!(home.join("config.json").is_file());
    }

    #[tokio::test]
    async fn test_init_twice_fails() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("base800_home");
        init(&home).await.unwrap();
        let err = init(&home).await.unwrap_err();
        assert_eq!(err.to_string(), "Configuration error");
    }
}
