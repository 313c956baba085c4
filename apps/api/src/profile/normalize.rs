//! Normalization pass: extracted (stringly, optional-everything) resume →
//! storage-shaped profile with canonical dates and required fields enforced.
//!
//! Entries missing their identifying fields are dropped here, not stored
//! with blanks. Dates stay `Option<NaiveDate>` through this layer; required
//! start columns are only materialized in the upsert step.

use chrono::NaiveDate;

use crate::profile::dates::{normalize_opt, DateRole};
use crate::profile::models::{ExtractedLinks, ExtractedResume};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedProfile {
    pub bio: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub links: NormalizedLinks,
    pub skills: Vec<SkillItem>,
    pub languages: Vec<LanguageItem>,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub certificates: Vec<CertificateItem>,
    pub projects: Vec<ProjectItem>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedLinks {
    pub portfolio: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillItem {
    pub name: String,
    pub level: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageItem {
    pub name: String,
    pub proficiency: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceItem {
    pub company: String,
    pub title: String,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    /// `None` means current position; `current` is kept consistent with it.
    pub end_date: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EducationItem {
    pub institution: String,
    pub degree: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CertificateItem {
    pub name: String,
    pub issuer: String,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub credential_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectItem {
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub technologies: Vec<String>,
}

/// Maps a whole extraction to its storage shape, dropping entries that lack
/// required identifying fields.
pub fn normalize_resume(extracted: &ExtractedResume) -> NormalizedProfile {
    NormalizedProfile {
        bio: clean(extracted.personal_info.bio.as_deref()),
        title: clean(extracted.personal_info.title.as_deref()),
        location: clean(extracted.personal_info.location.as_deref()),
        phone: clean(extracted.personal_info.phone.as_deref()),
        links: normalize_links(&extracted.links),
        skills: extracted
            .skills
            .iter()
            .filter_map(|s| {
                Some(SkillItem {
                    name: clean(s.name.as_deref())?,
                    level: canonical_skill_level(s.level),
                })
            })
            .collect(),
        languages: extracted
            .languages
            .iter()
            .filter_map(|l| {
                Some(LanguageItem {
                    name: clean(l.name.as_deref())?,
                    proficiency: clean(l.proficiency.as_deref()),
                })
            })
            .collect(),
        experience: extracted
            .experience
            .iter()
            .filter_map(|e| {
                let end_date = normalize_opt(e.end_date.as_deref(), DateRole::End);
                // An open-ended range means current, whichever way the
                // model signalled it; current forces end_date to null.
                let current =
                    e.current.unwrap_or(false) || (e.end_date.is_some() && end_date.is_none());
                Some(ExperienceItem {
                    company: clean(e.company.as_deref())?,
                    title: clean(e.title.as_deref())?,
                    location: clean(e.location.as_deref()),
                    start_date: normalize_opt(e.start_date.as_deref(), DateRole::Start),
                    end_date: if current { None } else { end_date },
                    current,
                    description: clean(e.description.as_deref()),
                    skills: clean_list(&e.skills),
                })
            })
            .collect(),
        education: extracted
            .education
            .iter()
            .filter_map(|e| {
                Some(EducationItem {
                    institution: clean(e.institution.as_deref())?,
                    degree: clean(e.degree.as_deref())?,
                    start_date: normalize_opt(e.start_date.as_deref(), DateRole::Start),
                    end_date: normalize_opt(e.end_date.as_deref(), DateRole::End),
                    description: clean(e.description.as_deref()),
                })
            })
            .collect(),
        certificates: extracted
            .certificates
            .iter()
            .filter_map(|c| {
                Some(CertificateItem {
                    name: clean(c.name.as_deref())?,
                    issuer: clean(c.issuer.as_deref())?,
                    issue_date: normalize_opt(c.issue_date.as_deref(), DateRole::Start),
                    expiry_date: normalize_opt(c.expiry_date.as_deref(), DateRole::End),
                    credential_id: clean(c.credential_id.as_deref()),
                })
            })
            .collect(),
        projects: extracted
            .projects
            .iter()
            .filter_map(|p| {
                Some(ProjectItem {
                    title: clean(p.title.as_deref())?,
                    description: clean(p.description.as_deref()),
                    link: clean(p.link.as_deref()),
                    technologies: clean_list(&p.technologies),
                })
            })
            .collect(),
    }
}

/// Canonical skill scale is 1-100. Values at or below 5 are read as the
/// legacy 1-5 scale and multiplied up; a missing level lands mid-scale.
pub fn canonical_skill_level(raw: Option<f64>) -> i32 {
    let raw = match raw {
        Some(v) if v.is_finite() => v,
        _ => return 50,
    };
    let scaled = if raw <= 5.0 { raw * 20.0 } else { raw };
    (scaled.round() as i32).clamp(1, 100)
}

fn normalize_links(links: &ExtractedLinks) -> NormalizedLinks {
    NormalizedLinks {
        portfolio: clean(links.portfolio.as_deref()),
        github: clean(links.github.as_deref()),
        linkedin: clean(links.linkedin.as_deref()),
        twitter: clean(links.twitter.as_deref()),
    }
}

/// Trims and maps empty strings to `None`, so the upsert's COALESCE never
/// sees a populated-looking blank.
fn clean(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}

fn clean_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::models::{
        ExtractedCertificate, ExtractedExperience, ExtractedSkill,
    };
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn experience(company: Option<&str>, title: Option<&str>) -> ExtractedExperience {
        ExtractedExperience {
            company: company.map(String::from),
            title: title.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_experience_missing_company_is_dropped() {
        let extracted = ExtractedResume {
            experience: vec![
                experience(None, Some("Engineer")),
                experience(Some("Acme Corp"), Some("Engineer")),
            ],
            ..Default::default()
        };
        let normalized = normalize_resume(&extracted);
        assert_eq!(normalized.experience.len(), 1);
        assert_eq!(normalized.experience[0].company, "Acme Corp");
    }

    #[test]
    fn test_experience_missing_title_is_dropped() {
        let extracted = ExtractedResume {
            experience: vec![experience(Some("Acme Corp"), None)],
            ..Default::default()
        };
        assert!(normalize_resume(&extracted).experience.is_empty());
    }

    #[test]
    fn test_blank_company_counts_as_missing() {
        let extracted = ExtractedResume {
            experience: vec![experience(Some("   "), Some("Engineer"))],
            ..Default::default()
        };
        assert!(normalize_resume(&extracted).experience.is_empty());
    }

    #[test]
    fn test_bare_year_and_present_scenario() {
        // "Acme Corp" / "Engineer", start "2019", end "Present" must yield
        // start 2019-01-01, end null, current true.
        let extracted = ExtractedResume {
            experience: vec![ExtractedExperience {
                company: Some("Acme Corp".into()),
                title: Some("Engineer".into()),
                start_date: Some("2019".into()),
                end_date: Some("Present".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let normalized = normalize_resume(&extracted);
        let exp = &normalized.experience[0];
        assert_eq!(exp.start_date, Some(d(2019, 1, 1)));
        assert_eq!(exp.end_date, None);
        assert!(exp.current);
    }

    #[test]
    fn test_current_flag_forces_null_end_date() {
        let extracted = ExtractedResume {
            experience: vec![ExtractedExperience {
                company: Some("Acme Corp".into()),
                title: Some("Engineer".into()),
                end_date: Some("2022-03".into()),
                current: Some(true),
                ..Default::default()
            }],
            ..Default::default()
        };
        let exp = &normalize_resume(&extracted).experience[0];
        assert!(exp.current);
        assert_eq!(exp.end_date, None);
    }

    #[test]
    fn test_finished_role_keeps_end_date() {
        let extracted = ExtractedResume {
            experience: vec![ExtractedExperience {
                company: Some("Acme Corp".into()),
                title: Some("Engineer".into()),
                start_date: Some("2019-04".into()),
                end_date: Some("2022-03-15".into()),
                current: Some(false),
                ..Default::default()
            }],
            ..Default::default()
        };
        let exp = &normalize_resume(&extracted).experience[0];
        assert!(!exp.current);
        assert_eq!(exp.start_date, Some(d(2019, 4, 1)));
        assert_eq!(exp.end_date, Some(d(2022, 3, 15)));
    }

    #[test]
    fn test_open_ended_end_date_reads_as_current() {
        // An end date that was present but normalizes to null leaves an
        // open-ended range, which reads as a current role.
        let extracted = ExtractedResume {
            experience: vec![ExtractedExperience {
                company: Some("Acme Corp".into()),
                title: Some("Engineer".into()),
                end_date: Some("sometime in spring".into()),
                current: Some(false),
                ..Default::default()
            }],
            ..Default::default()
        };
        let exp = &normalize_resume(&extracted).experience[0];
        assert_eq!(exp.end_date, None);
        assert!(exp.current, "open-ended range reads as current");
    }

    #[test]
    fn test_skill_level_canonical_scale() {
        assert_eq!(canonical_skill_level(Some(80.0)), 80);
        assert_eq!(canonical_skill_level(Some(3.0)), 60); // 1-5 scale
        assert_eq!(canonical_skill_level(Some(5.0)), 100);
        assert_eq!(canonical_skill_level(Some(150.0)), 100);
        assert_eq!(canonical_skill_level(Some(0.0)), 1);
        assert_eq!(canonical_skill_level(None), 50);
    }

    #[test]
    fn test_skill_without_name_is_dropped() {
        let extracted = ExtractedResume {
            skills: vec![
                ExtractedSkill {
                    name: None,
                    level: Some(90.0),
                },
                ExtractedSkill {
                    name: Some("Rust".into()),
                    level: None,
                },
            ],
            ..Default::default()
        };
        let normalized = normalize_resume(&extracted);
        assert_eq!(
            normalized.skills,
            vec![SkillItem {
                name: "Rust".into(),
                level: 50
            }]
        );
    }

    #[test]
    fn test_certificate_requires_name_and_issuer() {
        let extracted = ExtractedResume {
            certificates: vec![
                ExtractedCertificate {
                    name: Some("CKA".into()),
                    issuer: None,
                    ..Default::default()
                },
                ExtractedCertificate {
                    name: Some("CKA".into()),
                    issuer: Some("CNCF".into()),
                    expiry_date: Some("2026-01".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let normalized = normalize_resume(&extracted);
        assert_eq!(normalized.certificates.len(), 1);
        assert_eq!(normalized.certificates[0].expiry_date, Some(d(2026, 1, 1)));
    }

    #[test]
    fn test_empty_strings_become_none_on_profile_fields() {
        let extracted = ExtractedResume {
            personal_info: crate::profile::models::PersonalInfo {
                bio: Some("  ".into()),
                title: Some("Engineer".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let normalized = normalize_resume(&extracted);
        assert_eq!(normalized.bio, None);
        assert_eq!(normalized.title.as_deref(), Some("Engineer"));
    }

    #[test]
    fn test_skills_used_list_cleaned() {
        let extracted = ExtractedResume {
            experience: vec![ExtractedExperience {
                company: Some("Acme Corp".into()),
                title: Some("Engineer".into()),
                skills: vec!["Rust".into(), "  ".into(), " Postgres ".into()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let exp = &normalize_resume(&extracted).experience[0];
        assert_eq!(exp.skills, vec!["Rust".to_string(), "Postgres".to_string()]);
    }
}
