use crate::commands::Out;
use crate::{Config, Result};
use serde::Serialize;

/// One configured company, as shown by `base800 companies`.
#[derive(Debug, Clone, Serialize)]
pub struct CompanySummary {
    key: String,
    label: String,
    code: String,
}

/// Lists the companies configured in config.json.
pub fn companies(config: &Config) -> Result<Out<Vec<CompanySummary>>> {
    let summaries: Vec<CompanySummary> = config
        .companies()
        .iter()
        .map(|(key, credential)| CompanySummary {
            key: key.clone(),
            label: credential.label().to_string(),
            code: credential.code().to_string(),
        })
        .collect();
    let message = format!(
        "{} compan{} configured",
        summaries.len(),
        if summaries.len() == 1 { "y" } else { "ies" }
    );
    Ok(Out::new(message, summaries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_companies_lists_template_entries() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("base800_home");
        Config::create(&home).await.unwrap();
        let config = Config::load(&home).await.unwrap();

        let out = companies(&config).unwrap();
        assert_eq!(out.message(), "2 companies configured");
        let summaries = out.structure().unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].key, "intermed");
        assert_eq!(summaries[0].code, "2004");
        assert_eq!(summaries[1].key, "unimed");
        assert_eq!(summaries[1].label, "2003 - Unimed");
    }
}
