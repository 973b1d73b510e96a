use super::fields::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    StartsWith(&'static str),
    Contains(&'static str),
}

impl Trigger {
    pub fn matches(self, key: &str) -> bool {
        match self {
            Trigger::StartsWith(s) => key.starts_with(s),
            Trigger::Contains(s) => key.contains(s),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LineRule {
    pub target: Field,
    pub triggers: &'static [Trigger],
}

impl LineRule {
    pub fn matches(&self, key: &str) -> bool {
        self.triggers.iter().any(|t| t.matches(key))
    }
}

use Trigger::{Contains, StartsWith};

/// Key routing table, evaluated top to bottom; the first match wins.
///
/// `brandRules` sits directly above `brandKeywords` so "Brand rules:" is not
/// taken by the starts-with "brand" trigger. The other continuity rules stay
/// below the directives: "Must include props:" is a directive.
pub const LINE_RULES: &[LineRule] = &[
    LineRule { target: Field::Title, triggers: &[StartsWith("title")] },
    LineRule { target: Field::Logline, triggers: &[StartsWith("logline")] },
    LineRule { target: Field::Tone, triggers: &[StartsWith("tone")] },
    LineRule { target: Field::Theme, triggers: &[StartsWith("theme")] },
    LineRule {
        target: Field::BrandRules,
        triggers: &[Contains("brand rule"), Contains("governance")],
    },
    LineRule {
        target: Field::BrandKeywords,
        triggers: &[Contains("keyword"), StartsWith("brand")],
    },
    LineRule {
        target: Field::ReferenceFilms,
        triggers: &[Contains("reference"), Contains("film")],
    },
    LineRule {
        target: Field::MustInclude,
        triggers: &[Contains("must include"), Contains("must-have")],
    },
    LineRule {
        target: Field::Avoid,
        triggers: &[StartsWith("avoid"), StartsWith("don't"), StartsWith("do not")],
    },
    LineRule {
        target: Field::CreativeRisks,
        triggers: &[Contains("risk"), Contains("experiment")],
    },
    LineRule { target: Field::ColorContinuity, triggers: &[Contains("color continuity")] },
    LineRule {
        target: Field::PropsContinuity,
        triggers: &[Contains("props"), Contains("set continuity")],
    },
    LineRule { target: Field::AspectRatio, triggers: &[Contains("aspect")] },
    LineRule {
        target: Field::Duration,
        triggers: &[Contains("duration"), Contains("length")],
    },
    LineRule { target: Field::RenderFormat, triggers: &[Contains("format")] },
    LineRule { target: Field::Fps, triggers: &[Contains("frame"), Contains("fps")] },
    LineRule { target: Field::NegativePrompts, triggers: &[Contains("negative prompt")] },
    LineRule { target: Field::Notes, triggers: &[StartsWith("notes"), StartsWith("note")] },
    LineRule {
        target: Field::Soundtrack,
        triggers: &[Contains("soundtrack"), Contains("music")],
    },
    LineRule { target: Field::Rhythm, triggers: &[Contains("rhythm"), Contains("pace")] },
    LineRule {
        target: Field::SoundDesign,
        triggers: &[Contains("sound design"), Contains("foley")],
    },
    LineRule {
        target: Field::Dialogue,
        triggers: &[Contains("dialogue"), Contains("voice")],
    },
    LineRule { target: Field::MixingNotes, triggers: &[Contains("mix")] },
    LineRule { target: Field::CameraLanguage, triggers: &[Contains("camera")] },
    LineRule { target: Field::Lensing, triggers: &[Contains("lens")] },
    LineRule { target: Field::Movement, triggers: &[Contains("movement")] },
    LineRule { target: Field::Lighting, triggers: &[Contains("lighting")] },
    LineRule { target: Field::ColorPalette, triggers: &[Contains("color")] },
    LineRule { target: Field::Vfx, triggers: &[Contains("vfx"), Contains("effects")] },
];

/// Route a lower-cased key to its target field.
pub fn classify_key(key: &str) -> Option<Field> {
    LINE_RULES.iter().find(|r| r.matches(key)).map(|r| r.target)
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trigger::StartsWith(s) => write!(f, "starts-with \"{s}\""),
            Trigger::Contains(s) => write!(f, "contains \"{s}\""),
        }
    }
}

// ── Tests ──
