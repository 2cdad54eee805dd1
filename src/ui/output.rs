use crate::normalize::NormalizedWord;
use crate::ui::{theme, Icons, Theme};
use owo_colors::OwoColorize;
use serde_json::Value;

pub fn header(text: &str) {
    println!("{} {}", Icons::BOOKS, text.style(theme().title.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().ok.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().problem.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().caution.clone()));
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().title.clone()));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

pub fn group_header(group: &str, count: usize) {
    println!();
    println!(
        "{} {} {}",
        Icons::FOLDER,
        group.style(theme().group.clone()),
        format!("({})", count).style(theme().count.clone())
    );
}

/// One word per line: headword, transliteration, part of speech, meanings
pub fn word_line(word: &NormalizedWord) {
    println!("{}", render_word(word, theme()));
}

fn render_word(word: &NormalizedWord, theme: &Theme) -> String {
    let mut line = format!("  {} {}", Icons::BULLET, word.word.style(theme.headword.clone()));
    if let Some(translit) = &word.transliteration {
        line.push_str(&format!(" ({})", field_text(translit)));
    }
    if let Some(pos) = &word.part_of_speech {
        line.push_str(&format!(" {}", field_text(pos).style(theme.grammar.clone())));
    }
    line.push_str(&format!(" - {}", word.meanings.join("; ").style(theme.meaning.clone())));
    line
}

/// Strings print bare; anything else prints as compact JSON
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}
