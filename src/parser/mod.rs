pub mod fields;
pub mod lines;
pub mod paragraphs;
pub mod rules;

use tracing::debug;

use crate::model::{Document, ExtractionResult};
use fields::{Field, FieldValues};

/// Two-pass pipeline: `key: value` lines → field values, blank-line blocks →
/// cast, sequences and topic fallbacks. Line values win over paragraph values.
pub fn extract(raw: &str, document: &Document) -> ExtractionResult {
    if raw.trim().is_empty() {
        return ExtractionResult::default();
    }

    let text = normalize_line_endings(raw);
    let mut values = lines::classify_lines(&text);
    let line_count = values.len();
    let found = paragraphs::classify_paragraphs(&text);
    values.fill_from(found.values);

    debug!(
        line_fields = line_count,
        total_fields = values.len(),
        characters = found.characters.len(),
        sequences = found.sequences.len(),
        "extracted notes"
    );

    emit(values, found.characters, found.sequences, document)
}

pub fn normalize_line_endings(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

fn emit(
    mut values: FieldValues,
    characters: Vec<crate::model::Character>,
    sequences: Vec<crate::model::Sequence>,
    document: &Document,
) -> ExtractionResult {
    ExtractionResult {
        cinematography: values.overlay(&document.cinematography),
        audio: values.overlay(&document.audio),
        continuity: values.overlay(&document.continuity),
        directives: values.overlay(&document.directives),
        delivery: values.overlay(&document.delivery),
        characters: non_empty(characters),
        sequences: non_empty(sequences),
        title: values.take(Field::Title),
        logline: values.take(Field::Logline),
        tone: values.take(Field::Tone),
        theme: values.take(Field::Theme),
        brand_keywords: values.take(Field::BrandKeywords),
        reference_films: values.take(Field::ReferenceFilms),
        notes: values.take(Field::Notes),
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

// ── Tests ──
