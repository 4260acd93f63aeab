use std::collections::{BTreeMap, HashMap};

use crate::models::domain::Question;

pub const BASE_SCORE: u32 = 600;
pub const SCORE_RANGE: u32 = 200;
pub const CORRECT_FEEDBACK: &str = "Correct!";
pub const INCORRECT_FEEDBACK_PREFIX: &str = "Incorrect. The correct answer is: ";

/// Outcome of grading one submission against a quiz's questions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreSummary {
    pub score: u32,
    pub total: u32,
    pub correct: u32,
    pub correct_answers: BTreeMap<String, usize>,
    pub feedback: BTreeMap<String, String>,
    /// Submitted questions skipped because their stored answer index is unusable.
    pub flagged: Vec<String>,
}

/// SAT-style band: 600 with no correct answers, 800 with all of them.
pub fn sat_score(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return BASE_SCORE;
    }
    let correct = correct.min(total) as u64;
    BASE_SCORE + (correct * SCORE_RANGE as u64 / total as u64) as u32
}

/// Grades `answers` (question id -> selected choice index) against `questions`.
///
/// `total` counts every question in the quiz, answered or not. Answers for ids
/// outside the quiz are ignored. A question whose stored correct index does not
/// point at one of its choices is skipped and reported in `flagged`.
pub fn score_submission(questions: &[Question], answers: &HashMap<String, usize>) -> ScoreSummary {
    let by_id: HashMap<&str, &Question> = questions.iter().map(|q| (q.id.as_str(), q)).collect();

    let mut summary = ScoreSummary {
        total: questions.len() as u32,
        ..Default::default()
    };

    for (question_id, &selected) in answers {
        let Some(question) = by_id.get(question_id.as_str()) else {
            log::debug!("Ignoring answer for unknown question '{}'", question_id);
            continue;
        };

        let Some(correct_choice) = question.correct_choice() else {
            log::error!(
                "Question '{}' has correct index {} but only {} choices; skipping",
                question.id,
                question.correct_index,
                question.choices.len()
            );
            summary.flagged.push(question_id.clone());
            continue;
        };

        summary
            .correct_answers
            .insert(question_id.clone(), question.correct_index);

        let feedback = if selected == question.correct_index {
            summary.correct += 1;
            CORRECT_FEEDBACK.to_string()
        } else {
            format!("{}{}", INCORRECT_FEEDBACK_PREFIX, correct_choice)
        };
        summary.feedback.insert(question_id.clone(), feedback);
    }

    summary.flagged.sort();
    summary.score = sat_score(summary.correct, summary.total);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Tier;

    fn question(id: &str, correct_index: usize) -> Question {
        let mut q = Question::new(
            format!("Question {}", id),
            vec!["w".into(), "x".into(), "y".into(), "z".into()],
            correct_index,
            "algebra",
            Tier::Medium,
        );
        q.id = id.to_string();
        q
    }

    fn answers(pairs: &[(&str, usize)]) -> HashMap<String, usize> {
        pairs.iter().map(|(id, idx)| (id.to_string(), *idx)).collect()
    }

    #[test]
    fn empty_quiz_scores_base() {
        let summary = score_submission(&[], &answers(&[("q1", 0)]));

        assert_eq!(summary.total, 0);
        assert_eq!(summary.score, 600);
        assert!(summary.feedback.is_empty());
    }

    #[test]
    fn half_correct_scores_seven_hundred() {
        let questions = vec![question("q1", 1), question("q2", 2)];
        let summary = score_submission(&questions, &answers(&[("q1", 1), ("q2", 0)]));

        assert_eq!(summary.correct, 1);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.score, 700);
        assert_eq!(summary.feedback["q1"], "Correct!");
        assert!(summary.feedback["q2"].starts_with("Incorrect. The correct answer is:"));
        assert_eq!(summary.feedback["q2"], "Incorrect. The correct answer is: y");
        assert_eq!(summary.correct_answers["q1"], 1);
        assert_eq!(summary.correct_answers["q2"], 2);
    }

    #[test]
    fn all_correct_scores_eight_hundred_and_all_wrong_six_hundred() {
        let questions = vec![question("q1", 0), question("q2", 3), question("q3", 1)];

        let perfect = score_submission(&questions, &answers(&[("q1", 0), ("q2", 3), ("q3", 1)]));
        assert_eq!(perfect.score, 800);

        let wrong = score_submission(&questions, &answers(&[("q1", 1), ("q2", 0), ("q3", 2)]));
        assert_eq!(wrong.score, 600);
    }

    #[test]
    fn empty_submission_on_three_questions() {
        let questions = vec![question("q1", 0), question("q2", 1), question("q3", 2)];
        let summary = score_submission(&questions, &HashMap::new());

        assert!(summary.correct_answers.is_empty());
        assert!(summary.feedback.is_empty());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.score, 600);
    }

    #[test]
    fn unknown_question_ids_do_not_affect_result() {
        let questions = vec![question("q1", 1), question("q2", 2)];
        let base = score_submission(&questions, &answers(&[("q1", 1)]));
        let noisy = score_submission(&questions, &answers(&[("q1", 1), ("ghost", 1)]));

        assert_eq!(base, noisy);
        assert!(!noisy.feedback.contains_key("ghost"));
        assert!(!noisy.correct_answers.contains_key("ghost"));
    }

    #[test]
    fn score_truncates_toward_floor() {
        // 1/3 of 200 is 66.67
        assert_eq!(sat_score(1, 3), 666);
        assert_eq!(sat_score(2, 3), 733);
    }

    #[test]
    fn score_is_monotonic_in_correct_answers() {
        for total in 1..=30 {
            let mut previous = sat_score(0, total);
            for correct in 1..=total {
                let current = sat_score(correct, total);
                assert!(current >= previous, "{}/{} decreased", correct, total);
                previous = current;
            }
            assert_eq!(previous, 800);
        }
    }

    #[test]
    fn out_of_range_correct_index_is_flagged_not_fatal() {
        let questions = vec![question("q1", 7), question("q2", 2)];
        let summary = score_submission(&questions, &answers(&[("q1", 0), ("q2", 2)]));

        assert_eq!(summary.flagged, vec!["q1".to_string()]);
        assert!(!summary.feedback.contains_key("q1"));
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.score, 700);
    }
}
