use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::fields::{Field, FieldValues};
use crate::model::{Character, Sequence};

static BLANK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

const CAST_KEYWORDS: &[&str] = &["character", "protagonist", "antagonist", "hero", "villain"];
/// Any of these in a block suppresses cast detection.
const CAST_VETO_KEYWORDS: &[&str] = &["scene", "sequence", "shot", "beat"];
const SCENE_KEYWORDS: &[&str] = &["scene", "sequence", "beat", "montage", "shot"];

/// A cast heading that is only one of these words is a label, not a name.
const CAST_LABELS: &[&str] = CAST_KEYWORDS;
const SCENE_LABELS: &[&str] = &["sequence", "scene"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    /// Later blocks replace earlier ones.
    Overwrite,
    /// The first block on the topic wins.
    FillIfAbsent,
}

#[derive(Debug, Clone, Copy)]
pub struct TopicRule {
    pub target: Field,
    pub keywords: &'static [&'static str],
    pub policy: WritePolicy,
}

pub const TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        target: Field::Lighting,
        keywords: &["lighting", "chiaroscuro", "exposure"],
        policy: WritePolicy::Overwrite,
    },
    TopicRule {
        target: Field::CameraLanguage,
        keywords: &["camera", "framing", "lense", "lens", "shot style"],
        policy: WritePolicy::FillIfAbsent,
    },
    TopicRule {
        target: Field::Movement,
        keywords: &["movement", "tracking", "steadicam", "drone"],
        policy: WritePolicy::Overwrite,
    },
    TopicRule {
        target: Field::ColorPalette,
        keywords: &["color", "palette", "grading", "lut"],
        policy: WritePolicy::Overwrite,
    },
    TopicRule {
        target: Field::Vfx,
        keywords: &["vfx", "effects", "particles", "hologram"],
        policy: WritePolicy::Overwrite,
    },
    TopicRule {
        target: Field::Soundtrack,
        keywords: &["music", "score", "soundtrack"],
        policy: WritePolicy::FillIfAbsent,
    },
    TopicRule {
        target: Field::Rhythm,
        keywords: &["rhythm", "pace", "tempo"],
        policy: WritePolicy::FillIfAbsent,
    },
    TopicRule {
        target: Field::SoundDesign,
        keywords: &["sound design", "foley", "audio texture"],
        policy: WritePolicy::FillIfAbsent,
    },
    TopicRule {
        target: Field::Dialogue,
        keywords: &["voice", "dialogue", "narration"],
        policy: WritePolicy::FillIfAbsent,
    },
];

#[derive(Debug, Clone, Default)]
pub struct ParagraphFindings {
    pub characters: Vec<Character>,
    pub sequences: Vec<Sequence>,
    pub values: FieldValues,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Cast,
    Scene,
    Topic,
}

pub fn split_blocks(text: &str) -> Vec<&str> {
    BLANK_LINE_RE
        .split(text)
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .collect()
}

/// Scene vocabulary wins over cast vocabulary.
pub fn block_kind(lower: &str) -> BlockKind {
    if contains_any(lower, CAST_KEYWORDS) && !contains_any(lower, CAST_VETO_KEYWORDS) {
        BlockKind::Cast
    } else if contains_any(lower, SCENE_KEYWORDS) {
        BlockKind::Scene
    } else {
        BlockKind::Topic
    }
}

pub fn classify_paragraphs(text: &str) -> ParagraphFindings {
    let mut found = ParagraphFindings::default();

    for block in split_blocks(text) {
        let lower = block.to_lowercase();

        match block_kind(&lower) {
            BlockKind::Cast => {
                let name = block_heading(block, CAST_LABELS)
                    .unwrap_or_else(|| format!("Character {}", found.characters.len() + 1));
                trace!(%name, "cast block");
                found.characters.push(Character::new(name, block));
            }
            BlockKind::Scene => {
                let title = block_heading(block, SCENE_LABELS)
                    .unwrap_or_else(|| format!("Sequence {}", found.sequences.len() + 1));
                trace!(%title, "sequence block");
                found.sequences.push(Sequence::new(title, block));
            }
            BlockKind::Topic => {
                for rule in TOPIC_RULES.iter().filter(|r| contains_any(&lower, r.keywords)) {
                    let wrote = match rule.policy {
                        WritePolicy::Overwrite => {
                            found.values.set(rule.target, block);
                            true
                        }
                        WritePolicy::FillIfAbsent => found.values.set_if_absent(rule.target, block),
                    };
                    trace!(field = %rule.target, wrote, "topic block");
                }
            }
        }
    }

    found
}

/// Name or title announced on a block's first line, e.g. `"Mara: courier"` or
/// `"Character - Mara: courier"`. A leading entity label is skipped.
pub fn block_heading(block: &str, labels: &[&str]) -> Option<String> {
    let first = block.lines().next()?;
    let (head, rest) = split_at_delimiter(first)?;
    let head = head.trim();

    if labels.iter().any(|l| head.eq_ignore_ascii_case(l)) {
        let (named, _) = split_at_delimiter(rest)?;
        return non_empty(named);
    }
    non_empty(head)
}

/// Split at the first `:` or `-`, dropping the delimiter.
fn split_at_delimiter(line: &str) -> Option<(&str, &str)> {
    let idx = line.find([':', '-'])?;
    Some((&line[..idx], &line[idx + 1..]))
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_split_on_blank_lines() {
        let blocks = split_blocks("one\nstill one\n\n  \n\ntwo\n\n\n");
        assert_eq!(blocks, vec!["one\nstill one", "two"]);
    }

    #[test]
    fn whitespace_only_lines_separate_blocks() {
        let blocks = split_blocks("alpha\n   \t\nbeta");
        assert_eq!(blocks, vec!["alpha", "beta"]);
    }

    #[test]
    fn scene_vocabulary_vetoes_cast() {
        assert_eq!(block_kind("the protagonist opens the sequence"), BlockKind::Scene);
        assert_eq!(block_kind("the villain lurks"), BlockKind::Cast);
        assert_eq!(block_kind("slow montage of city lights"), BlockKind::Scene);
        assert_eq!(block_kind("warm color grading"), BlockKind::Topic);
    }

    #[test]
    fn montage_does_not_veto_cast() {
        assert_eq!(block_kind("hero montage"), BlockKind::Cast);
    }

    #[test]
    fn heading_from_label_and_name() {
        let block = "Character - Mara: A fierce courier racing against curfew.";
        assert_eq!(block_heading(block, CAST_LABELS).as_deref(), Some("Mara"));
    }

    #[test]
    fn heading_skips_any_cast_word_label() {
        let block = "Protagonist - Avery: visionary, never raises a voice.";
        assert_eq!(block_heading(block, CAST_LABELS).as_deref(), Some("Avery"));
        assert_eq!(block_heading("HERO - Sol: quiet", CAST_LABELS).as_deref(), Some("Sol"));
        assert!(block_heading("Antagonist: cold and precise", CAST_LABELS).is_none());
    }

    #[test]
    fn heading_plain_name() {
        assert_eq!(
            block_heading("Avery Cole: visionary protagonist", CAST_LABELS).as_deref(),
            Some("Avery Cole")
        );
        assert_eq!(
            block_heading("Launch reveal - hero shot of the product", SCENE_LABELS).as_deref(),
            Some("Launch reveal")
        );
    }

    #[test]
    fn heading_only_reads_first_line() {
        let block = "The hero is quiet\nand walks: alone";
        assert!(block_heading(block, CAST_LABELS).is_none());
    }

    #[test]
    fn heading_bare_label_falls_back() {
        assert!(block_heading("Character: a shy hero", CAST_LABELS).is_none());
        assert!(block_heading(": nameless villain", CAST_LABELS).is_none());
    }

    #[test]
    fn placeholder_numbering_counts_per_kind() {
        let found = classify_paragraphs(
            "a nameless hero\n\nopening scene in the rain\n\nthe villain waits",
        );
        let names: Vec<_> = found.characters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Character 1", "Character 2"]);
        assert_eq!(found.sequences[0].title, "Sequence 1");
    }

    #[test]
    fn cast_block_keeps_raw_text_as_essence() {
        let found = classify_paragraphs("Villain - Rook: cold, precise.\nAlways in grey.");
        let rook = &found.characters[0];
        assert_eq!(rook.name, "Rook");
        assert_eq!(rook.essence, "Villain - Rook: cold, precise.\nAlways in grey.");
        assert!(rook.wardrobe.is_empty());
        assert!(found.values.is_empty());
    }

    #[test]
    fn sequence_block_fills_narrative_beat() {
        let found = classify_paragraphs("Sequence - Launch reveal: drone orbit over the skyline.");
        let seq = &found.sequences[0];
        assert_eq!(seq.title, "Launch reveal");
        assert_eq!(seq.narrative_beat, "Sequence - Launch reveal: drone orbit over the skyline.");
        assert!(seq.location.is_empty());
        // consumed blocks never feed topics, even with "drone" in them
        assert!(found.values.get(Field::Movement).is_none());
    }

    #[test]
    fn overwrite_topics_last_block_wins() {
        let found = classify_paragraphs("Soft lighting A.\n\nHarsh lighting B.");
        assert_eq!(found.values.get(Field::Lighting), Some("Harsh lighting B."));
    }

    #[test]
    fn fill_topics_first_block_wins() {
        let found = classify_paragraphs("Music A block\n\nMusic B block");
        assert_eq!(found.values.get(Field::Soundtrack), Some("Music A block"));
    }

    #[test]
    fn block_feeds_several_topics() {
        let found = classify_paragraphs("Drone tracking with teal LUT and slow tempo.");
        let block = "Drone tracking with teal LUT and slow tempo.";
        assert_eq!(found.values.get(Field::Movement), Some(block));
        assert_eq!(found.values.get(Field::ColorPalette), Some(block));
        assert_eq!(found.values.get(Field::Rhythm), Some(block));
        assert!(found.values.get(Field::Lighting).is_none());
    }
}
