use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

static OPTION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-D])\.(.*)$").expect("OPTION_LINE is a valid regex pattern"));

/// Question fields extracted from a generated reply, before topic tagging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedQuestion {
    pub prompt: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QuestionParseError {
    #[error("missing '{0}' line")]
    MissingField(&'static str),

    #[error("'{found}' appeared where '{expected}' was expected")]
    OutOfOrder {
        expected: &'static str,
        found: String,
    },

    #[error("question text is empty")]
    EmptyPrompt,

    #[error("'Correct:' holds '{0}', expected one of A-D")]
    InvalidCorrectLetter(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Expect {
    Question,
    Option(usize),
    Correct,
    Explanation,
}

impl Expect {
    fn label(&self) -> &'static str {
        match self {
            Expect::Question => "Question:",
            Expect::Option(0) => "A.",
            Expect::Option(1) => "B.",
            Expect::Option(2) => "C.",
            Expect::Option(_) => "D.",
            Expect::Correct => "Correct:",
            Expect::Explanation => "Explanation:",
        }
    }
}

/// Recognised field prefix on a line, if any.
fn field_of(line: &str) -> Option<String> {
    if line.starts_with("Question:") {
        return Some("Question:".to_string());
    }
    if line.starts_with("Correct:") {
        return Some("Correct:".to_string());
    }
    if line.starts_with("Explanation:") {
        return Some("Explanation:".to_string());
    }
    OPTION_LINE
        .captures(line)
        .map(|caps| format!("{}.", &caps[1]))
}

/// Parses the reply format requested by the question prompt:
///
/// ```text
/// Question: ...
/// A. ...
/// B. ...
/// C. ...
/// D. ...
/// Correct: <letter>
/// Explanation: ...   (this and every following line)
/// ```
///
/// Fields must appear once each, in this order. Lines carrying no field prefix
/// are ignored.
pub fn parse_generated_question(reply: &str) -> Result<ParsedQuestion, QuestionParseError> {
    let lines: Vec<&str> = reply.trim().lines().collect();

    let mut expect = Expect::Question;
    let mut prompt = String::new();
    let mut choices = Vec::with_capacity(OPTION_LABELS.len());
    let mut correct_index = None;

    for (i, raw) in lines.iter().enumerate() {
        let line = raw.trim_start();
        let Some(field) = field_of(line) else {
            continue;
        };

        if field != expect.label() {
            return Err(QuestionParseError::OutOfOrder {
                expected: expect.label(),
                found: field,
            });
        }

        match expect {
            Expect::Question => {
                prompt = line["Question:".len()..].trim().to_string();
                if prompt.is_empty() {
                    return Err(QuestionParseError::EmptyPrompt);
                }
                expect = Expect::Option(0);
            }
            Expect::Option(n) => {
                choices.push(line[2..].trim().to_string());
                expect = if n + 1 < OPTION_LABELS.len() {
                    Expect::Option(n + 1)
                } else {
                    Expect::Correct
                };
            }
            Expect::Correct => {
                let letter = line["Correct:".len()..].trim();
                let index = letter
                    .chars()
                    .next()
                    .filter(|_| letter.chars().count() == 1)
                    .and_then(|c| OPTION_LABELS.iter().position(|label| *label == c))
                    .ok_or_else(|| QuestionParseError::InvalidCorrectLetter(letter.to_string()))?;
                correct_index = Some(index);
                expect = Expect::Explanation;
            }
            Expect::Explanation => {
                let mut body = vec![line["Explanation:".len()..].trim()];
                body.extend(lines[i + 1..].iter().map(|l| l.trim_end()));
                let explanation = body.join("\n").trim().to_string();

                return Ok(ParsedQuestion {
                    prompt,
                    choices,
                    correct_index: correct_index
                        .ok_or(QuestionParseError::MissingField("Correct:"))?,
                    explanation: (!explanation.is_empty()).then_some(explanation),
                });
            }
        }
    }

    Err(QuestionParseError::MissingField(expect.label()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "Question: If 2x + 3 = 11, what is x?
A. 3
B. 4
C. 5
D. 7
Correct: B
Explanation: Subtract 3 from both sides to get 2x = 8.
Then divide by 2.";

    #[test]
    fn parses_well_formed_reply() {
        let parsed = parse_generated_question(WELL_FORMED).unwrap();

        assert_eq!(parsed.prompt, "If 2x + 3 = 11, what is x?");
        assert_eq!(parsed.choices, vec!["3", "4", "5", "7"]);
        assert_eq!(parsed.correct_index, 1);
        assert_eq!(
            parsed.explanation.as_deref(),
            Some("Subtract 3 from both sides to get 2x = 8.\nThen divide by 2.")
        );
    }

    #[test]
    fn ignores_preamble_and_indentation() {
        let reply = format!(
            "Sure! Here is your question.\n\n{}",
            WELL_FORMED
                .lines()
                .map(|l| format!("    {}", l))
                .collect::<Vec<_>>()
                .join("\n")
        );
        let parsed = parse_generated_question(&reply).unwrap();

        assert_eq!(parsed.correct_index, 1);
        assert_eq!(parsed.choices.len(), 4);
    }

    #[test]
    fn maps_every_letter_to_its_index() {
        for (letter, expected) in [("A", 0), ("B", 1), ("C", 2), ("D", 3)] {
            let reply = WELL_FORMED.replace("Correct: B", &format!("Correct: {}", letter));
            assert_eq!(parse_generated_question(&reply).unwrap().correct_index, expected);
        }
    }

    #[test]
    fn missing_option_fails() {
        let reply = WELL_FORMED.replace("C. 5\n", "");
        assert_eq!(
            parse_generated_question(&reply),
            Err(QuestionParseError::OutOfOrder {
                expected: "C.",
                found: "D.".to_string()
            })
        );
    }

    #[test]
    fn reordered_fields_fail() {
        let reply = "A. 3
Question: What is x?
B. 4
C. 5
D. 7
Correct: A
Explanation: none";
        assert!(matches!(
            parse_generated_question(reply),
            Err(QuestionParseError::OutOfOrder { expected: "Question:", .. })
        ));
    }

    #[test]
    fn missing_explanation_fails() {
        let reply = WELL_FORMED.split("Explanation:").next().unwrap();
        assert_eq!(
            parse_generated_question(reply),
            Err(QuestionParseError::MissingField("Explanation:"))
        );
    }

    #[test]
    fn invalid_correct_letter_fails() {
        let reply = WELL_FORMED.replace("Correct: B", "Correct: E");
        assert_eq!(
            parse_generated_question(&reply),
            Err(QuestionParseError::InvalidCorrectLetter("E".to_string()))
        );

        let reply = WELL_FORMED.replace("Correct: B", "Correct: B and C");
        assert!(matches!(
            parse_generated_question(&reply),
            Err(QuestionParseError::InvalidCorrectLetter(_))
        ));
    }

    #[test]
    fn empty_reply_fails() {
        assert_eq!(
            parse_generated_question(""),
            Err(QuestionParseError::MissingField("Question:"))
        );
    }

    #[test]
    fn empty_explanation_body_is_none() {
        let reply = WELL_FORMED.split("Explanation:").next().unwrap().to_string() + "Explanation:";
        let parsed = parse_generated_question(&reply).unwrap();
        assert_eq!(parsed.explanation, None);
    }
}
