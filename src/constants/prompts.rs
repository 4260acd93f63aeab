//! Prompt templates sent to the text-generation collaborator.

pub fn question_prompt(topic: &str, difficulty: &str) -> String {
    format!(
        "Create an SAT-style math question for the topic: {topic} at difficulty level: {difficulty}.

The question should:
1. Be clear and unambiguous
2. Match authentic SAT question style
3. Include 4 multiple-choice options labeled A, B, C, D
4. Have only one correct answer

Format:
Question: [question text]
A. [option A]
B. [option B]
C. [option C]
D. [option D]
Correct: [correct letter]
Explanation: [step-by-step solution]"
    )
}

pub fn flashcards_prompt(topic: &str, count: u32) -> String {
    format!(
        "Create {count} SAT math flashcards for the topic: {topic}.

Each flashcard should have:
1. A front side with a key concept, formula, or rule
2. A back side with explanation, application, or example

Format your response as valid JSON with this structure:
[
  {{ \"front\": \"Concept or Formula\", \"back\": \"Explanation or Example\" }}
]"
    )
}

pub fn tutor_prompt(context: &str, question: &str) -> String {
    format!(
        "You are a helpful SAT preparation tutor. The student is asking: {question}

Consider the following context from previous conversations if available:
{context}

Provide a clear, step-by-step response that helps the student understand the concept and improve their SAT preparation."
    )
}

pub fn essay_feedback_prompt(essay: &str) -> String {
    format!(
        "As an expert in college application essays, provide detailed feedback on the following essay:

ESSAY:
{essay}

Please evaluate:
1. Structure and organization
2. Clarity and coherence
3. Use of evidence and examples
4. Grammar and style
5. Overall effectiveness

For each area, highlight strengths and provide constructive suggestions for improvement."
    )
}

pub fn cv_feedback_prompt(cv: &str) -> String {
    format!(
        "As an expert in college and job applications, review the following CV/resume:

CV:
{cv}

Please evaluate:
1. Format and presentation
2. Content completeness
3. Relevance to academic/job applications
4. Impact of achievements described
5. Language and professionalism

For each area, provide specific improvement suggestions to make this CV/resume more effective for college applications."
    )
}

pub fn improvements_prompt(essay: &str, feedback: &str) -> String {
    format!(
        "Based on this essay:

{essay}

And the previous feedback:

{feedback}

Provide 5 specific, actionable improvements the writer can make to strengthen this essay.
For each suggestion, provide an example of how to implement the change."
    )
}

pub fn essay_score_prompt(essay: &str, criteria: &[&str], max_score: u32) -> String {
    format!(
        "Score the following essay based on these criteria (scale 1-{max_score}):

ESSAY:
{essay}

CRITERIA:
{criteria}

For each criterion give a score (1-{max_score}) and specific feedback with examples from the essay.
Return JSON with \"overall_score\" (average of all scores), \"detailed_scores\" (criterion name to {{\"score\", \"feedback\"}}) and \"summary\".",
        criteria = criteria.join(", ")
    )
}

pub fn recommendations_prompt(average_score: f64, strengths: &[String], weaknesses: &[String]) -> String {
    let list = |items: &[String]| {
        if items.is_empty() {
            "None identified".to_string()
        } else {
            items.join(", ")
        }
    };
    format!(
        "Based on this quiz performance data:
- Average score: {average_score:.1}
- Strengths: {strengths}
- Weaknesses: {weaknesses}

Provide 3-5 specific study recommendations for this SAT student.
Each recommendation should be focused, actionable, and help improve their score.

Format as JSON:
{{ \"recommendations\": [ {{ \"topic\": \"(topic name)\", \"action\": \"(specific study action)\", \"resource\": \"(suggested resource or practice method)\" }} ] }}",
        strengths = list(strengths),
        weaknesses = list(weaknesses),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_prompt_states_reply_contract() {
        let prompt = question_prompt("Circles in geometry", "hard");

        assert!(prompt.contains("Circles in geometry"));
        assert!(prompt.contains("difficulty level: hard"));
        for field in ["Question:", "A.", "D.", "Correct:", "Explanation:"] {
            assert!(prompt.contains(field), "missing {}", field);
        }
    }

    #[test]
    fn recommendations_prompt_handles_empty_lists() {
        let prompt = recommendations_prompt(650.0, &[], &["geometry".to_string()]);

        assert!(prompt.contains("Average score: 650.0"));
        assert!(prompt.contains("Strengths: None identified"));
        assert!(prompt.contains("Weaknesses: geometry"));
    }
}
