//! Prompt templates for resume analysis.

const ANALYST_FRAMING: &str =
    "As an expert ATS (Applicant Tracking System) analyst and career coach, please analyze";

const SECTION_ANALYSIS: &str = "## SECTION ANALYSIS:
### Contact Information: [Score/10]
[Analysis and recommendations]

### Professional Summary/Objective: [Score/10]
[Analysis and recommendations]

### Work Experience: [Score/10]
[Analysis and recommendations]

### Skills Section: [Score/10]
[Analysis and recommendations]

### Education: [Score/10]
[Analysis and recommendations]";

const STRENGTHS_AND_IMPROVEMENTS: &str = "## STRENGTHS:
- [List key strengths]

## AREAS FOR IMPROVEMENT:
- [List specific improvement areas]

## ATS OPTIMIZATION RECOMMENDATIONS:
- [Specific actionable recommendations]";

const OVERALL_ASSESSMENT: &str = "## OVERALL ASSESSMENT:
[Comprehensive summary and next steps]";

/// Builds the analysis prompt.
///
/// With a job description the model is asked to match the resume against it
/// and list matched and missing keywords; without one it is asked for general
/// ATS compatibility plus keyword suggestions.
pub fn analysis_prompt(resume_text: &str, job_description: Option<&str>) -> String {
    match job_description {
        Some(job_description) => format!(
            "{ANALYST_FRAMING} this resume against the provided job description. \
Provide a comprehensive assessment covering:

RESUME TEXT:
{resume_text}

JOB DESCRIPTION:
{job_description}

Please provide analysis in the following format:

## ATS COMPATIBILITY SCORE: [X/10]

## KEYWORD MATCHING:
- [List matched keywords]
- [List missing important keywords]

{SECTION_ANALYSIS}

{STRENGTHS_AND_IMPROVEMENTS}

{OVERALL_ASSESSMENT}
"
        ),
        None => format!(
            "{ANALYST_FRAMING} this resume for general ATS compatibility and optimization. \
Provide a comprehensive assessment covering:

RESUME TEXT:
{resume_text}

Please provide analysis in the following format:

## ATS COMPATIBILITY SCORE: [X/10]

{SECTION_ANALYSIS}

{STRENGTHS_AND_IMPROVEMENTS}

## KEYWORD OPTIMIZATION:
- [Suggestions for industry-relevant keywords]

{OVERALL_ASSESSMENT}
"
        ),
    }
}
