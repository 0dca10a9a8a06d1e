//! Wire types for the analysis/authentication service.

use serde::{Deserialize, Deserializer, Serialize};

/// Authenticated user as reported by `GET /me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(rename = "is_active")]
    pub active: bool,
}

/// Successful `POST /login` or `POST /register` body.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Result of one successful analysis call.
///
/// Field names follow the service's JSON (`ats_score`, `experience`, `ats_ready`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall score, clamped to 0..=100 on receipt.
    #[serde(rename = "ats_score", deserialize_with = "clamped_score")]
    pub score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub skills: Vec<String>,
    #[serde(rename = "experience")]
    pub experience_summary: String,
    pub recommendation: String,
    #[serde(rename = "ats_ready")]
    pub ready: bool,
}

fn clamped_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, 100) as u8)
}

/// A file ready to be sent as the multipart `resume` field.
#[derive(Debug, Clone)]
pub struct UploadPayload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_result_from_service_json() {
        let json = r#"{
            "ats_score": 92,
            "strengths": ["X"],
            "improvements": [],
            "skills": ["Y"],
            "experience": "5y",
            "recommendation": "Strong",
            "ats_ready": true
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.score, 92);
        assert_eq!(result.strengths, vec!["X"]);
        assert!(result.improvements.is_empty());
        assert_eq!(result.experience_summary, "5y");
        assert!(result.ready);
    }

    #[test]
    fn test_score_is_clamped() {
        let json = r#"{"ats_score": 140, "strengths": [], "improvements": [], "skills": [],
            "experience": "", "recommendation": "", "ats_ready": false}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let json = r#"{"ats_score": 50, "strengths": []}"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn test_user_from_me_payload() {
        let user: User =
            serde_json::from_str(r#"{"id":1,"email":"a@b.com","is_active":true}"#).unwrap();
        assert_eq!(
            user,
            User {
                id: 1,
                email: "a@b.com".to_string(),
                active: true,
            }
        );
    }
}
