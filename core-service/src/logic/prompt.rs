//! Prompt templates
//!
//! Only the decision-governing instructions live here; everything else in a
//! prompt is the job description and candidate data verbatim.

use crate::constants::SCORING_JOB_DESCRIPTION_CHARS;
use crate::logic::candidate::CandidateRecord;

/// Fields (and labels) of the compact description fed to the surrogate
pub const SURROGATE_FIELDS: [(&str, &str); 4] = [
    ("skills", "Skills"),
    ("experience", "Experience"),
    ("education", "Education"),
    ("years_of_experience", "Years of experience"),
];

fn candidate_json(candidate: &CandidateRecord) -> String {
    serde_json::to_string_pretty(candidate).unwrap_or_else(|_| "{}".to_string())
}

/// Free-form yes/no evaluation
pub fn basic_prompt(job_description: &str, candidate: &CandidateRecord) -> String {
    format!(
        "Job Description:\n{job}\n\n\
         Candidate Information:\n{candidate}\n\n\
         Evaluate if this candidate is suitable for the position based on the job description.\n\
         Provide a yes/no recommendation and brief explanation.\n",
        job = job_description,
        candidate = candidate_json(candidate),
    )
}

/// Bias-aware multi-step evaluation with a structured answer
pub fn advanced_prompt(job_description: &str, candidate: &CandidateRecord) -> String {
    format!(
        "I need to make an unbiased hiring decision. I will use a multi-step process:\n\n\
         Step 1: Let me identify and set aside potential sources of bias in hiring such as:\n\
         - Age bias\n\
         - Gender bias\n\
         - Name-based bias\n\
         - Cultural or ethnic bias\n\n\
         Step 2: I will focus exclusively on relevant qualifications, skills, and experience:\n\
         - Job-specific skills and technical abilities\n\
         - Relevant education and certifications\n\
         - Work experience and achievements\n\
         - Problem-solving abilities\n\n\
         Step 3: Now, given the job description and candidate information below, I will evaluate only the relevant qualifications:\n\n\
         Job Description:\n{job}\n\n\
         Candidate Information:\n{candidate}\n\n\
         Step 4: I will provide a final recommendation with three components:\n\
         1. A yes/no decision based only on relevant qualifications\n\
         2. A confidence score from 0-100%\n\
         3. A brief explanation referencing specific qualifications that match or don't match the job requirements\n\n\
         Structure your response as:\n\n\
         DECISION: [yes/no]\n\
         CONFIDENCE: [0-100]%\n\
         EXPLANATION: [Your explanation here]\n",
        job = job_description,
        candidate = candidate_json(candidate),
    )
}

/// Single-number suitability score for one (possibly perturbed) description
pub fn scoring_prompt(job_description: &str, candidate_text: &str) -> String {
    let job: String = job_description.chars().take(SCORING_JOB_DESCRIPTION_CHARS).collect();
    format!(
        "Job Description: {job}...\n\n\
         Candidate Information: {candidate_text}\n\n\
         Rate how suitable this candidate is for the job on a scale of 0 to 1, where 0 is completely unsuitable and 1 is perfectly suitable.\n\n\
         Respond with ONLY a single number between 0 and 1. Do not include any explanation or additional text.\n"
    )
}

/// One "Label: value" segment per surrogate field
///
/// A field is included whenever its column exists, even if empty.
pub fn surrogate_segments(candidate: &CandidateRecord) -> Vec<String> {
    SURROGATE_FIELDS
        .iter()
        .filter(|(field, _)| candidate.contains(field))
        .map(|(field, label)| format!("{}: {}", label, candidate.get(field).unwrap_or("")))
        .collect()
}
