//! Test fixtures and factory functions for creating test data.

use serde_json::{json, Value};

use farsiflow_backend::models::Word;
use farsiflow_core::Example;

/// Five-word catalog. `car` has two accepted answers, `water` an alternate.
pub fn sample_words() -> Vec<Word> {
    let mut cat = Word::new("cat", "گربه", "katt");
    cat.translit = Some("gorbe".to_string());
    cat.examples = vec![Example {
        fa: "گربه خواب است".to_string(),
        sv: "Katten sover".to_string(),
        translit: Some("gorbe khâb ast".to_string()),
    }];

    let mut water = Word::new("water", "آب", "vatten");
    water.alt = vec!["vattnet".to_string()];

    vec![
        cat,
        Word::new("car", "ماشین", "bil/automobil"),
        Word::new("dog", "سگ", "hund"),
        water,
        Word::new("bread", "نان", "bröd"),
    ]
}

/// Fixture word by id.
pub fn word(id: &str) -> Word {
    sample_words()
        .into_iter()
        .find(|w| w.id == id)
        .unwrap_or_else(|| panic!("no fixture word {id}"))
}

/// First accepted Swedish answer for a fixture word id.
pub fn answer_for(word_id: &str) -> String {
    word(word_id).sv.split('/').next().unwrap_or_default().to_string()
}

pub fn grade_request(grade: u8) -> Value {
    json!({ "grade": grade })
}

pub fn custom_session_request(ids: &[&str]) -> Value {
    json!({ "word_ids": ids })
}

pub fn submit_request(answer: &str) -> Value {
    json!({ "answer": answer })
}
