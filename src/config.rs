//! Configuration file handling for base800.
//!
//! The configuration file is stored at `$BASE800_HOME/config.json` and contains one credential
//! record per company: the authentication endpoint, the data endpoint, and the login fields the
//! partner API expects. The file is loaded once at startup and never written by the export path.

use crate::error::{ErrorType, IntoResult};
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "base800";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$BASE800_HOME` and from there it loads `$BASE800_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory and writes a template `config.json` with placeholder
    /// credentials for the known companies. Errors if a config file already exists so that a
    /// filled-in file is never clobbered.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the base800 home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.is_file() {
            bail!(
                "A config file already exists at '{}', refusing to overwrite it",
                config_path.display()
            );
        }

        let config_file = ConfigFile::template();
        config_file.save(&config_path).await?;

        Ok(Self {
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that `base800_home` exists and that the config file exists
    /// - load and validate the config file
    /// - return the loaded configuration object
    pub async fn load(base800_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = base800_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .pub_result(ErrorType::Config)?;

        // Validate that the home directory exists.
        let _ = utils::read_dir(&root)
            .await
            .context("base800 home is missing")
            .pub_result(ErrorType::Config)?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            return Err(anyhow::anyhow!(
                "The config file is missing '{}', run 'base800 init' to create it",
                config_path.display()
            ))
            .pub_result(ErrorType::Config);
        }
        let config_file = ConfigFile::load(&config_path)
            .await
            .pub_result(ErrorType::Config)?;

        Ok(Self {
            config_path,
            config_file,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// All configured companies, keyed by the company key used on the command line.
    pub fn companies(&self) -> &BTreeMap<String, CompanyCredential> {
        &self.config_file.companies
    }

    /// Returns the credential record for `key`, validating that its fields have been filled in.
    ///
    /// # Errors
    /// Returns a configuration error if the company is unknown or any credential field still
    /// holds a bracketed placeholder from the template.
    pub fn company(&self, key: &str) -> Result<&CompanyCredential> {
        let credential = self
            .config_file
            .companies
            .get(key)
            .with_context(|| {
                format!(
                    "Company '{key}' not found in {}, known companies: {}",
                    self.config_path.display(),
                    self.config_file
                        .companies
                        .keys()
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
            .pub_result(ErrorType::Config)?;
        credential.validate().pub_result(ErrorType::Config)?;
        Ok(credential)
    }
}

/// The credential record for one company: where to log in, where to fetch data, and the login
/// fields the partner API expects in the auth request body.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct CompanyCredential {
    /// Display label, e.g. "2003 - Unimed". The part before the first space is the company code
    /// written into the remittance header.
    label: String,

    /// URL of the login endpoint.
    auth_url: String,

    /// URL of the overdue-operations endpoint.
    data_url: String,

    /// Login user, a CNPJ.
    usuario: String,

    /// Login password.
    senha: String,

    /// API client id issued by the partner.
    client_id: String,
}

impl CompanyCredential {
    pub fn new(
        label: impl Into<String>,
        auth_url: impl Into<String>,
        data_url: impl Into<String>,
        usuario: impl Into<String>,
        senha: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            auth_url: auth_url.into(),
            data_url: data_url.into(),
            usuario: usuario.into(),
            senha: senha.into(),
            client_id: client_id.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The company code written into the remittance control header, taken from the label
    /// (e.g. "2003" from "2003 - Unimed").
    pub fn code(&self) -> &str {
        self.label.split(' ').next().unwrap_or(&self.label)
    }

    /// The company name used in the output filename, taken from the label (e.g. "Unimed" from
    /// "2003 - Unimed"). Falls back to "BASE" when the label has no " - " separator.
    pub fn name(&self) -> &str {
        match self.label.split_once(" - ") {
            Some((_, name)) => name,
            None => "BASE",
        }
    }

    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    pub fn usuario(&self) -> &str {
        &self.usuario
    }

    pub fn senha(&self) -> &str {
        &self.senha
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Checks that the template placeholders have been replaced and the endpoints are URLs.
    fn validate(&self) -> Result<()> {
        let fields = [
            ("label", &self.label),
            ("auth_url", &self.auth_url),
            ("data_url", &self.data_url),
            ("usuario", &self.usuario),
            ("senha", &self.senha),
            ("client_id", &self.client_id),
        ];
        for (name, value) in fields {
            if value.starts_with('[') {
                bail!(
                    "The '{name}' field for '{}' still holds the template placeholder '{value}', \
                    fill in your real credentials in config.json",
                    self.label
                );
            }
        }
        let _ = url::Url::parse(&self.auth_url)
            .with_context(|| format!("auth_url '{}' is not a valid URL", self.auth_url))?;
        let _ = url::Url::parse(&self.data_url)
            .with_context(|| format!("data_url '{}' is not a valid URL", self.data_url))?;
        Ok(())
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "base800",
///   "config_version": 1,
///   "companies": {
///     "unimed": {
///       "label": "2003 - Unimed",
///       "auth_url": "https://api.example.com.br/usuarios/auth/login",
///       "data_url": "https://api.example.com.br/financeiro/executiva/vencimento",
///       "usuario": "00000000000000",
///       "senha": "hunter2",
///       "client_id": "abc123"
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "base800"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Credential records keyed by company key.
    companies: BTreeMap<String, CompanyCredential>,
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    /// A template with placeholder credentials for the known companies. The bracketed values
    /// must be replaced by the user before the export command will run.
    fn template() -> Self {
        let companies = [
            ("unimed", "2003 - Unimed"),
            ("intermed", "2004 - Intermed"),
        ]
        .into_iter()
        .map(|(key, label)| {
            (
                key.to_string(),
                CompanyCredential::new(
                    label,
                    "[URL_DE_AUTENTICACAO]",
                    "[URL_DE_DADOS]",
                    "[USUARIO]",
                    "[SENHA]",
                    "[CLIENT_ID]",
                ),
            )
        })
        .collect();
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            companies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn filled_credential() -> CompanyCredential {
        CompanyCredential::new(
            "2003 - Unimed",
            "https://api.example.com.br/usuarios/auth/login",
            "https://api.example.com.br/financeiro/executiva/vencimento",
            "01976180000104",
            "s3cret",
            "f6acf37c",
        )
    }

    #[tokio::test]
    async fn test_config_create_and_load() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("base800_home");

        let created = Config::create(&home_dir).await.unwrap();
        assert!(created.config_path().is_file());
        assert_eq!(created.companies().len(), 2);

        let loaded = Config::load(&home_dir).await.unwrap();
        assert!(loaded.companies().contains_key("unimed"));
        assert!(loaded.companies().contains_key("intermed"));
    }

    #[tokio::test]
    async fn test_config_create_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("base800_home");
        Config::create(&home_dir).await.unwrap();
        let result = Config::create(&home_dir).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path().join("nope")).await;
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Configuration error");
    }

    #[tokio::test]
    async fn test_company_placeholder_rejected() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("base800_home");
        Config::create(&home_dir).await.unwrap();
        let config = Config::load(&home_dir).await.unwrap();

        // The template still holds placeholders, so the lookup must fail as a config error.
        let err = config.company("unimed").unwrap_err();
        assert_eq!(err.to_string(), "Configuration error");
        assert!(format!("{err:#}").contains("placeholder"));
    }

    #[tokio::test]
    async fn test_company_unknown_key() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("base800_home");
        Config::create(&home_dir).await.unwrap();
        let config = Config::load(&home_dir).await.unwrap();

        let err = config.company("acme").unwrap_err();
        assert!(format!("{err:#}").contains("not found"));
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");
        let json = r#"{
            "app_name": "wrong_app",
            "config_version": 1,
            "companies": {}
        }"#;
        tokio::fs::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[test]
    fn test_credential_code_and_name() {
        let credential = filled_credential();
        assert_eq!(credential.code(), "2003");
        assert_eq!(credential.name(), "Unimed");

        let no_separator = CompanyCredential::new(
            "banco",
            "https://a.example.com",
            "https://b.example.com",
            "u",
            "s",
            "c",
        );
        assert_eq!(no_separator.code(), "banco");
        assert_eq!(no_separator.name(), "BASE");
    }

    #[test]
    fn test_credential_validate() {
        assert!(filled_credential().validate().is_ok());

        let mut bad = filled_credential();
        bad.senha = "[SENHA]".to_string();
        assert!(bad.validate().is_err());

        let mut bad_url = filled_credential();
        bad_url.auth_url = "not a url".to_string();
        assert!(bad_url.validate().is_err());
    }
}
