//! Typed schema for the structured extraction.
//!
//! Every field is `#[serde(default)]` so a sparse model response still
//! deserializes; a field of the wrong *type* is a hard parse error. That is
//! the contract: lenient about omissions, strict about shape.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedResume {
    pub personal_info: PersonalInfo,
    pub skills: Vec<ExtractedSkill>,
    pub languages: Vec<ExtractedLanguage>,
    pub experience: Vec<ExtractedExperience>,
    pub education: Vec<ExtractedEducation>,
    pub certificates: Vec<ExtractedCertificate>,
    pub projects: Vec<ExtractedProject>,
    pub links: ExtractedLinks,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedSkill {
    pub name: Option<String>,
    /// Raw proficiency as returned by the model. Prompts ask for 1-100 but
    /// 1-5 scale values show up; canonicalized in `normalize`.
    pub level: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedLanguage {
    pub name: Option<String>,
    pub proficiency: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedExperience {
    pub company: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedEducation {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedCertificate {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub credential_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedLinks {
    pub portfolio: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_sparse_response() {
        // A model that only found skills must not fail the parse.
        let json = r#"{"skills": [{"name": "Rust", "level": 90}]}"#;
        let parsed: ExtractedResume = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.skills.len(), 1);
        assert_eq!(parsed.skills[0].name.as_deref(), Some("Rust"));
        assert!(parsed.experience.is_empty());
        assert!(parsed.personal_info.full_name.is_none());
    }

    #[test]
    fn test_deserializes_full_fixture() {
        let json = r#"{
            "personal_info": {"full_name": "Ada Lovelace", "title": "Engineer", "bio": "Pioneer.", "location": "London", "phone": null, "email": "ada@example.com"},
            "skills": [{"name": "Analysis", "level": 95}],
            "languages": [{"name": "English", "proficiency": "Native"}],
            "experience": [{
                "company": "Analytical Engines Ltd", "title": "Programmer",
                "location": null, "start_date": "1842-01", "end_date": null,
                "current": true, "description": "Wrote the first program.",
                "skills": ["mathematics"]
            }],
            "education": [{"institution": "Home tutoring", "degree": "Mathematics", "start_date": "1833", "end_date": "1842", "description": null}],
            "certificates": [],
            "projects": [{"title": "Note G", "description": "Bernoulli numbers", "link": null, "technologies": ["Analytical Engine"]}],
            "links": {"portfolio": null, "github": null, "linkedin": null, "twitter": null}
        }"#;
        let parsed: ExtractedResume = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.experience[0].company.as_deref(), Some("Analytical Engines Ltd"));
        assert_eq!(parsed.experience[0].current, Some(true));
        assert!(parsed.certificates.is_empty());
    }

    #[test]
    fn test_wrong_shape_is_a_parse_error() {
        // skills as a string instead of an array must be rejected,
        // not silently coerced.
        let json = r#"{"skills": "Rust, Python"}"#;
        assert!(serde_json::from_str::<ExtractedResume>(json).is_err());
    }
}
