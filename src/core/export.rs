use crate::domain::model::{BriefResponse, ReferralSource};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, SleftError};

pub const BRIEF_FILENAME: &str = "brief.json";
pub const SOURCES_FILENAME: &str = "sources.csv";

/// Renders the ranked sources as CSV with a header row.
pub fn sources_to_csv(sources: &[ReferralSource]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "rank",
        "name",
        "adjacent_specialty",
        "fit_score",
        "rating",
        "review_count",
        "address",
        "phone",
        "website",
    ])?;

    for (rank, source) in sources.iter().enumerate() {
        writer.write_record([
            (rank + 1).to_string(),
            source.name.clone(),
            source.adjacent_specialty.clone(),
            source.fit_score.to_string(),
            format!("{:.1}", source.rating),
            source.review_count.to_string(),
            source.address.clone(),
            source.phone.clone().unwrap_or_default(),
            source.website.clone().unwrap_or_default(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| SleftError::ProcessingError {
        message: format!("Failed to flush CSV: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| SleftError::ProcessingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

/// Writes `brief.json` and `sources.csv`; returns the written names.
pub async fn export_brief<S: Storage>(storage: &S, brief: &BriefResponse) -> Result<Vec<String>> {
    let json = serde_json::to_string_pretty(brief)?;
    storage.write_file(BRIEF_FILENAME, json.as_bytes()).await?;

    let csv_output = sources_to_csv(&brief.sources)?;
    storage
        .write_file(SOURCES_FILENAME, csv_output.as_bytes())
        .await?;

    tracing::debug!(
        "Exported brief with {} sources ({} bytes JSON)",
        brief.sources.len(),
        json.len()
    );
    Ok(vec![BRIEF_FILENAME.to_string(), SOURCES_FILENAME.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::BriefSummary;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn brief() -> BriefResponse {
        BriefResponse {
            specialty: "Chiropractic".to_string(),
            location: "Austin, TX".to_string(),
            practice_name: "Spine Works".to_string(),
            sources: vec![ReferralSource {
                name: "Core, Physical Therapy".to_string(),
                address: "1 Main St".to_string(),
                phone: Some("(512) 555-0100".to_string()),
                website: None,
                rating: 4.7,
                review_count: 40,
                category: None,
                adjacent_specialty: "Physical Therapy".to_string(),
                fit_score: 97,
            }],
            summary: BriefSummary {
                total_sources: 1,
                avg_fit_score: 97,
                top_specialty: Some("Physical Therapy".to_string()),
                radius_miles: 10,
                specialty_breakdown: vec![],
            },
            events: None,
            generated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_sources_to_csv_quotes_commas() {
        let csv_output = sources_to_csv(&brief().sources).unwrap();
        let lines: Vec<&str> = csv_output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "rank,name,adjacent_specialty,fit_score,rating,review_count,address,phone,website"
        );
        assert_eq!(
            lines[1],
            "1,\"Core, Physical Therapy\",Physical Therapy,97,4.7,40,1 Main St,(512) 555-0100,"
        );
    }

    #[test]
    fn test_sources_to_csv_empty_has_header_only() {
        let csv_output = sources_to_csv(&[]).unwrap();
        assert_eq!(csv_output.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_export_writes_both_files() {
        let storage = MockStorage::default();

        let written = export_brief(&storage, &brief()).await.unwrap();

        assert_eq!(written, vec!["brief.json", "sources.csv"]);
        let json = storage.get_file("brief.json").await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed["practiceName"], "Spine Works");
        assert_eq!(parsed["sources"][0]["fitScore"], 97);
        assert!(storage.get_file("sources.csv").await.is_some());
    }
}
