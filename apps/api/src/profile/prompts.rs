// Resume extraction LLM prompt templates.
// All prompts for the profile module are defined here.

pub const RESUME_EXTRACT_SYSTEM: &str = "\
You are a precise resume data extractor. \
Parse raw resume text into structured JSON. \
You MUST respond with valid JSON only — no markdown fences, no explanations. \
Never invent information that is not present in the source text. \
Use null for absent scalar fields and [] for absent lists.";

pub const RESUME_EXTRACT_PROMPT: &str = r#"Extract the following resume text into a structured JSON object.

RESUME TEXT:
{resume_text}

OUTPUT SCHEMA (return exactly this structure):
{
  "personal_info": {
    "full_name": "string" | null,
    "title": "string" | null,
    "bio": "string (2-3 sentence professional summary drawn from the text)" | null,
    "location": "string" | null,
    "phone": "string" | null,
    "email": "string" | null
  },
  "skills": [{"name": "string", "level": number (1-100 proficiency estimate)}],
  "languages": [{"name": "string", "proficiency": "Basic" | "Conversational" | "Fluent" | "Native" | null}],
  "experience": [{
    "company": "string", "title": "string", "location": "string" | null,
    "start_date": "YYYY-MM" | "YYYY-MM-DD",
    "end_date": "YYYY-MM" | "YYYY-MM-DD" | null (null = current position),
    "current": boolean,
    "description": "string" | null,
    "skills": ["string"]
  }],
  "education": [{
    "institution": "string", "degree": "string",
    "start_date": "YYYY-MM" | "YYYY-MM-DD" | null,
    "end_date": "YYYY-MM" | "YYYY-MM-DD" | null (null = ongoing),
    "description": "string" | null
  }],
  "certificates": [{
    "name": "string", "issuer": "string",
    "issue_date": "YYYY-MM" | "YYYY-MM-DD" | null,
    "expiry_date": "YYYY-MM" | "YYYY-MM-DD" | null (null = no expiration),
    "credential_id": "string" | null
  }],
  "projects": [{
    "title": "string", "description": "string" | null,
    "link": "string" | null, "technologies": ["string"]
  }],
  "links": {
    "portfolio": "string" | null, "github": "string" | null,
    "linkedin": "string" | null, "twitter": "string" | null
  }
}

RULES:
1. Extract ONLY information present in the text. Never fabricate employers, dates, or skills.
2. Absent scalar fields are null; absent lists are [].
3. Dates must be "YYYY-MM" or "YYYY-MM-DD". If only a year is given, return the bare year string.
4. skill level is your best 1-100 estimate from context (years used, seniority); use 50 when unclear.
5. Return ONLY the JSON object — nothing else, no code fences."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_has_resume_text_placeholder() {
        assert!(RESUME_EXTRACT_PROMPT.contains("{resume_text}"));
    }

    #[test]
    fn test_system_prompt_forbids_invention() {
        assert!(RESUME_EXTRACT_SYSTEM.contains("Never invent"));
    }
}
