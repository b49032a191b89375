//! Quick entry: classify a guest from a single line of free text.
//!
//! The line is split into words and integers, then an ordered rule table
//! is applied; the first rule that matches wins:
//!
//! 1. a word equal to a courtesy keyword → Courtesy (name = whole line)
//! 2. an integer → Child, age = first integer (name = remaining words)
//! 3. anything else → Adult
//!
//! Keywords match whole words only, so "Staffordshire" is not staff.
//! A name that really contains a number ("Luis 2") still reads as a child.

use crate::errors::{AppError, AppResult};
use crate::models::guest::GuestEntry;
use regex::Regex;
use std::sync::LazyLock;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{L}+|\d+").expect("static token pattern"));

/// Words that only describe the age and are dropped from a child's name.
const AGE_UNITS: &[&str] = &["years", "year", "yrs", "yo", "y", "anos", "ano"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Number(u32),
}

pub fn tokenize(text: &str) -> Vec<Token> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| {
            let s = m.as_str();
            match s.parse::<u32>() {
                Ok(n) if s.chars().all(|c| c.is_ascii_digit()) => Token::Number(n),
                _ => Token::Word(s.to_string()),
            }
        })
        .collect()
}

struct QuickInput<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    keywords: &'a [String],
}

type Rule = fn(&QuickInput) -> Option<GuestEntry>;

const RULES: &[(&str, Rule)] = &[
    ("courtesy-keyword", courtesy_rule),
    ("age-number", child_rule),
    ("adult-fallback", adult_rule),
];

fn courtesy_rule(input: &QuickInput) -> Option<GuestEntry> {
    let hit = input.tokens.iter().any(|t| match t {
        Token::Word(w) => {
            let w = w.to_lowercase();
            input.keywords.iter().any(|k| k.to_lowercase() == w)
        }
        Token::Number(_) => false,
    });
    hit.then(|| GuestEntry::courtesy(input.text.trim()))
}

fn child_rule(input: &QuickInput) -> Option<GuestEntry> {
    let age = input.tokens.iter().find_map(|t| match t {
        Token::Number(n) => Some(*n),
        Token::Word(_) => None,
    })?;

    let name = input
        .tokens
        .iter()
        .filter_map(|t| match t {
            Token::Word(w) if !AGE_UNITS.contains(&w.to_lowercase().as_str()) => {
                Some(w.as_str())
            }
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ");

    Some(GuestEntry::child(name, age))
}

fn adult_rule(input: &QuickInput) -> Option<GuestEntry> {
    Some(GuestEntry::adult(input.text.trim()))
}

/// Parse a quick-entry line; `keywords` are the courtesy words from the config.
pub fn parse_quick_entry(text: &str, keywords: &[String]) -> AppResult<GuestEntry> {
    let input = QuickInput {
        text,
        tokens: tokenize(text),
        keywords,
    };

    RULES
        .iter()
        .find_map(|(_, rule)| rule(&input))
        .ok_or_else(|| AppError::Validation(format!("cannot read entry '{}'", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_courtesy_keywords;
    use crate::models::category::Category;

    fn parse(s: &str) -> GuestEntry {
        parse_quick_entry(s, &default_courtesy_keywords()).unwrap()
    }

    #[test]
    fn tokenizer_splits_letters_and_digits() {
        assert_eq!(
            tokenize("Staff1 João, 7anos"),
            vec![
                Token::Word("Staff".into()),
                Token::Number(1),
                Token::Word("João".into()),
                Token::Number(7),
                Token::Word("anos".into()),
            ]
        );
    }

    #[test]
    fn keyword_wins_over_number() {
        let e = parse("Staff1");
        assert_eq!(e.category, Category::Courtesy);
        assert_eq!(e.name, "Staff1");

        let e = parse("Maria FAMÍLIA");
        assert_eq!(e.category, Category::Courtesy);
    }

    #[test]
    fn number_makes_a_child() {
        let e = parse("Leo 5 anos");
        assert_eq!(e.category, Category::Child);
        assert_eq!(e.age, Some(5));
        assert_eq!(e.name, "Leo");
    }

    #[test]
    fn plain_text_is_an_adult() {
        let e = parse("  Ana Souza ");
        assert_eq!(e, GuestEntry::adult("Ana Souza"));
    }

    #[test]
    fn keywords_are_whole_words() {
        let e = parse("Staffordshire Bull");
        assert_eq!(e.category, Category::Adult);
    }
}
