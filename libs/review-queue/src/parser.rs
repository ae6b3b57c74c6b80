//! Markdown deck parser, the source of a new queue's items.
//!
//! # Format
//! ```markdown
//! # Capitals
//!
//! Q: What is the capital of France?
//! A: Paris
//!
//! Q: Explain ownership
//! A: Every value has a single owner.
//! Multiple lines are supported.
//! ```
//!
//! Lines starting with `#` are headings. They are skipped and close the
//! field being read, so text after a heading is ignored until the next
//! `Q:` or `A:`.

use crate::error::{ParseError, ParseResult as Result};
use crate::types::Question;

/// Parse markdown content into questions, in file order.
pub fn parse(content: &str) -> Result<Vec<Question>> {
    let mut parser = Parser::default();
    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }
    parser.finish()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Question,
    Answer,
}

struct CardBuilder {
    question: Vec<String>,
    question_line: usize,
    answer: Option<Vec<String>>,
    answer_line: usize,
}

impl CardBuilder {
    fn new(text: &str, line_num: usize) -> Self {
        Self {
            question: vec![text.to_string()],
            question_line: line_num,
            answer: None,
            answer_line: line_num,
        }
    }

    fn build(self) -> Result<Question> {
        let answer = self.answer.ok_or(ParseError::MissingAnswer {
            line: self.question_line,
        })?;

        let prompt = self.question.join("\n").trim().to_string();
        if prompt.is_empty() {
            return Err(ParseError::EmptyField {
                line: self.question_line,
            });
        }
        let answer = answer.join("\n").trim().to_string();
        if answer.is_empty() {
            return Err(ParseError::EmptyField {
                line: self.answer_line,
            });
        }

        Ok(Question { prompt, answer })
    }
}

#[derive(Default)]
struct Parser {
    cards: Vec<Question>,
    current: Option<CardBuilder>,
    field: Option<Field>,
}

impl Parser {
    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        match Self::parse_line(line) {
            LineType::Question(text) => {
                self.finish_card()?;
                self.current = Some(CardBuilder::new(text, line_num));
                self.field = Some(Field::Question);
            }
            LineType::Answer(text) => {
                let card = match self.current.as_mut() {
                    Some(card) if card.answer.is_none() => card,
                    _ => return Err(ParseError::MissingQuestion { line: line_num }),
                };
                card.answer = Some(vec![text.to_string()]);
                card.answer_line = line_num;
                self.field = Some(Field::Answer);
            }
            LineType::Heading => self.field = None,
            LineType::Text(text) => self.push_text(text),
        }
        Ok(())
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("Q:") {
            LineType::Question(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("A:") {
            LineType::Answer(rest.trim())
        } else if trimmed.starts_with('#') {
            LineType::Heading
        } else {
            LineType::Text(line)
        }
    }

    fn push_text(&mut self, text: &str) {
        let Some(card) = self.current.as_mut() else {
            return;
        };
        match self.field {
            Some(Field::Question) => card.question.push(text.to_string()),
            Some(Field::Answer) => {
                if let Some(answer) = card.answer.as_mut() {
                    answer.push(text.to_string());
                }
            }
            None => {}
        }
    }

    fn finish_card(&mut self) -> Result<()> {
        if let Some(card) = self.current.take() {
            self.cards.push(card.build()?);
        }
        self.field = None;
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Question>> {
        self.finish_card()?;
        Ok(self.cards)
    }
}

enum LineType<'a> {
    Question(&'a str),
    Answer(&'a str),
    Heading,
    Text(&'a str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_single_card() {
        let cards = parse("Q: What is Rust?\nA: A systems programming language.").unwrap();
        assert_eq!(
            cards,
            vec![Question::new("What is Rust?", "A systems programming language.")]
        );
    }

    #[test]
    fn parse_multiple_cards_in_order() {
        let input = "Q: Q1\nA: A1\n\nQ: Q2\nA: A2\n\nQ: Q3\nA: A3";
        let cards = parse(input).unwrap();
        let prompts: Vec<_> = cards.iter().map(|c| c.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["Q1", "Q2", "Q3"]);
    }

    #[test]
    fn parse_multiline_answer() {
        let input = "Q: Explain\nA: Line 1\nLine 2\n\nLine 4\n\n";
        let cards = parse(input).unwrap();
        assert_eq!(cards[0].answer, "Line 1\nLine 2\n\nLine 4");
    }

    #[test]
    fn parse_multiline_question() {
        let input = "Q: Translate:\n  le chat\nA: the cat";
        let cards = parse(input).unwrap();
        assert_eq!(cards[0].prompt, "Translate:\n  le chat");
    }

    #[test]
    fn headings_are_skipped() {
        let input = "# Deck\nintro text\n\nQ: Q1\nA: A1\n\n## Part two\nnotes\nQ: Q2\nA: A2";
        let cards = parse(input).unwrap();
        assert_eq!(cards[0], Question::new("Q1", "A1"));
        assert_eq!(cards[1], Question::new("Q2", "A2"));
    }

    #[test]
    fn reject_answer_without_question() {
        let result = parse("A: Answer only");
        assert!(matches!(result, Err(ParseError::MissingQuestion { line: 1 })));
    }

    #[test]
    fn reject_second_answer() {
        let result = parse("Q: Q1\nA: A1\nA: again");
        assert!(matches!(result, Err(ParseError::MissingQuestion { line: 3 })));
    }

    #[test]
    fn reject_missing_answer() {
        let result = parse("Q: Q1\nA: A1\n\nQ: Question only\n\nQ: Q3\nA: A3");
        assert!(matches!(result, Err(ParseError::MissingAnswer { line: 4 })));
    }

    #[test]
    fn reject_empty_answer() {
        let result = parse("Q: Q1\nA:   \n\n");
        assert!(matches!(result, Err(ParseError::EmptyField { line: 2 })));
    }

    #[test]
    fn parse_empty_content() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("# only a heading\n\n").unwrap().is_empty());
    }
}
