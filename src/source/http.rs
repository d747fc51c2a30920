use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

use super::SheetSource;
use crate::record::RawSheet;

/// Sheet source fetching CSV bodies over HTTP. The URL is derived from a
/// template by substituting `{sheet}` with the sheet name.
#[derive(Debug, Clone)]
pub struct HttpSheetSource {
    client: Client,
    url_template: String,
}

impl HttpSheetSource {
    pub fn new(url_template: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent("eleitorado/0.1")
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, url_template: url_template.into() })
    }

    fn url_for(&self, name: &str) -> String {
        self.url_template.replace("{sheet}", name)
    }
}

impl SheetSource for HttpSheetSource {
    fn fetch(&self, name: &str) -> Result<RawSheet> {
        let url = self.url_for(name);
        let body = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("GET {url}"))?
            .error_for_status()
            .with_context(|| format!("GET {url} returned error status"))?
            .text()
            .with_context(|| format!("Failed to read body of {url}"))?;

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(body.as_bytes());

        let header: Vec<String> = reader
            .headers()
            .with_context(|| format!("Failed to read header of {url}"))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let Ok(record) = record else { continue };
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(RawSheet::new(name, header, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::HttpSheetSource;

    #[test]
    fn url_template_substitutes_sheet_name() {
        let source = HttpSheetSource::new("https://example.test/data/{sheet}.csv").unwrap();
        assert_eq!(
            source.url_for("perfil_f"),
            "https://example.test/data/perfil_f.csv"
        );
    }
}
