//! Stdin answer entry for the interview loop.
//!
//! Maps typed input to the current question's declared answer type.
//! Number questions pass unparsable text through raw; the engine's
//! evaluators parse defensively and never escalate on it.

use anyhow::{bail, Result};
use console::style;
use sana_core::{AnswerValue, Question, QuestionType};
use std::io::{self, Write};

pub fn read_answer(question: &Question) -> Result<AnswerValue> {
    match question.kind {
        QuestionType::YesNo => loop {
            let line = prompt_line("[y/n] ")?;
            match line.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(AnswerValue::Bool(true)),
                "n" | "no" => return Ok(AnswerValue::Bool(false)),
                _ => eprintln!("please answer y or n"),
            }
        },
        QuestionType::Text => Ok(AnswerValue::Text(prompt_line("> ")?)),
        QuestionType::Number => {
            let line = prompt_line("> ")?;
            Ok(match line.trim().parse::<f64>() {
                Ok(n) => AnswerValue::Number(n),
                Err(_) => AnswerValue::Text(line),
            })
        }
        QuestionType::Choice => {
            print_options(question);
            loop {
                let line = prompt_line("> ")?;
                if let Some(value) = option_for(question, line.trim()) {
                    return Ok(AnswerValue::Choice(value));
                }
                eprintln!("pick one of the listed options");
            }
        }
        QuestionType::Multiselect => {
            print_options(question);
            loop {
                let line = prompt_line("(comma-separated, empty for none) > ")?;
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    return Ok(AnswerValue::multi(Vec::<String>::new()));
                }
                match parse_multi(question, trimmed) {
                    Some(values) => return Ok(AnswerValue::multi(values)),
                    None => eprintln!("pick from the listed options"),
                }
            }
        }
    }
}

/// Resolve typed input to an option value, by 1-based index or by value.
fn option_for(question: &Question, input: &str) -> Option<String> {
    if let Ok(n) = input.parse::<usize>() {
        return question
            .options
            .get(n.checked_sub(1)?)
            .map(|o| o.value.clone());
    }
    question
        .options
        .iter()
        .find(|o| o.value.eq_ignore_ascii_case(input))
        .map(|o| o.value.clone())
}

fn parse_multi(question: &Question, input: &str) -> Option<Vec<String>> {
    input
        .split(',')
        .map(|part| option_for(question, part.trim()))
        .collect()
}

fn print_options(question: &Question) {
    for (i, option) in question.options.iter().enumerate() {
        println!("  [{}] {}", i + 1, option.label);
    }
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", style(prompt).dim());
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        bail!("input closed");
    }
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sana_core::ChoiceOption;

    fn question() -> Question {
        Question::choice(
            "appearance",
            "What does it look like?",
            vec![
                ChoiceOption::new("normal", "Normal"),
                ChoiceOption::new("blood", "Bright red or bloody"),
            ],
        )
    }

    #[test]
    fn test_option_by_index_and_value() {
        let q = question();
        assert_eq!(option_for(&q, "1"), Some("normal".to_string()));
        assert_eq!(option_for(&q, "BLOOD"), Some("blood".to_string()));
        assert_eq!(option_for(&q, "0"), None);
        assert_eq!(option_for(&q, "purple"), None);
    }

    #[test]
    fn test_parse_multi_rejects_unknown() {
        let q = question();
        assert_eq!(
            parse_multi(&q, "1, blood"),
            Some(vec!["normal".to_string(), "blood".to_string()])
        );
        assert_eq!(parse_multi(&q, "1, purple"), None);
    }
}
