//! Non-interactive analysis: the same admission, pre-flight and reduction
//! as the dashboard, run sequentially.

use std::path::Path;

use anyhow::Result;
use cvlens_core::analysis::{AnalysisOutcome, ScoreTier, run_attempt};
use cvlens_core::config::Config;
use cvlens_core::credentials::FileCredentialStore;
use cvlens_core::service::{AnalysisResult, ServiceClient};
use cvlens_core::upload::{AdmissionSource, CandidateFile, admit};

pub async fn run(config: &Config, file: &Path, json: bool) -> Result<()> {
    let candidate = CandidateFile::from_path(file)?;
    let pending = admit(candidate, AdmissionSource::Picker).map_err(|r| r.to_workflow_error())?;
    tracing::info!(name = %pending.name, size = %pending.display_size(), "file admitted");

    let client = ServiceClient::from_config(config)?;
    let store = FileCredentialStore::default_location();

    match run_attempt(&client, &store, Some(&pending)).await {
        AnalysisOutcome::Succeeded(result) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", format_report(&result));
            }
            Ok(())
        }
        AnalysisOutcome::SessionInvalid(err) | AnalysisOutcome::Failed(err) => Err(err.into()),
    }
}

fn format_report(result: &AnalysisResult) -> String {
    let tier = ScoreTier::of(result.score);
    let mut out = format!("ATS score: {}/100 ({})\n", result.score, tier.label());
    out.push_str(&format!(
        "ATS ready: {}\n",
        if result.ready { "yes" } else { "no" }
    ));

    for (title, items) in [
        ("Strengths", &result.strengths),
        ("Improvements", &result.improvements),
    ] {
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{title}:\n"));
        for item in items {
            out.push_str(&format!("  - {item}\n"));
        }
    }
    if !result.skills.is_empty() {
        out.push_str(&format!("\nSkills: {}\n", result.skills.join(", ")));
    }
    out.push_str(&format!("\nExperience: {}\n", result.experience_summary));
    out.push_str(&format!("Recommendation: {}\n", result.recommendation));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_includes_tier_and_sections() {
        let result = AnalysisResult {
            score: 65,
            strengths: vec!["Clear layout".to_string()],
            improvements: vec![],
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            experience_summary: "5y".to_string(),
            recommendation: "Add metrics".to_string(),
            ready: false,
        };

        let report = format_report(&result);
        assert!(report.starts_with("ATS score: 65/100 (fair)\n"));
        assert!(report.contains("ATS ready: no"));
        assert!(report.contains("  - Clear layout"));
        assert!(!report.contains("Improvements"));
        assert!(report.contains("Skills: Rust, SQL"));
    }
}
