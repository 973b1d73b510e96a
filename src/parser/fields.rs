use std::collections::BTreeMap;
use std::fmt;

use crate::model::FieldGroup;

/// Every document attribute the extractor can route a value to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Logline,
    Tone,
    Theme,
    BrandKeywords,
    ReferenceFilms,
    Notes,
    MustInclude,
    Avoid,
    CreativeRisks,
    ColorContinuity,
    PropsContinuity,
    BrandRules,
    AspectRatio,
    Duration,
    RenderFormat,
    Fps,
    NegativePrompts,
    Soundtrack,
    Rhythm,
    SoundDesign,
    Dialogue,
    MixingNotes,
    CameraLanguage,
    Lensing,
    Movement,
    Lighting,
    ColorPalette,
    Vfx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Cinematography,
    Audio,
    Continuity,
    Directives,
    Delivery,
}

impl Field {
    /// Owning field group, `None` for top-level scalars.
    pub fn group(self) -> Option<Group> {
        use Field::*;
        match self {
            Title | Logline | Tone | Theme | BrandKeywords | ReferenceFilms | Notes => None,
            MustInclude | Avoid | CreativeRisks => Some(Group::Directives),
            ColorContinuity | PropsContinuity | BrandRules => Some(Group::Continuity),
            AspectRatio | Duration | RenderFormat | Fps | NegativePrompts => Some(Group::Delivery),
            Soundtrack | Rhythm | SoundDesign | Dialogue | MixingNotes => Some(Group::Audio),
            CameraLanguage | Lensing | Movement | Lighting | ColorPalette | Vfx => {
                Some(Group::Cinematography)
            }
        }
    }

    /// Dotted JSON path, e.g. `cinematography.colorPalette`.
    pub fn path(self) -> &'static str {
        use Field::*;
        match self {
            Title => "title",
            Logline => "logline",
            Tone => "tone",
            Theme => "theme",
            BrandKeywords => "brandKeywords",
            ReferenceFilms => "referenceFilms",
            Notes => "notes",
            MustInclude => "directives.mustInclude",
            Avoid => "directives.avoid",
            CreativeRisks => "directives.creativeRisks",
            ColorContinuity => "continuity.colorContinuity",
            PropsContinuity => "continuity.propsContinuity",
            BrandRules => "continuity.brandRules",
            AspectRatio => "delivery.aspectRatio",
            Duration => "delivery.duration",
            RenderFormat => "delivery.renderFormat",
            Fps => "delivery.fps",
            NegativePrompts => "delivery.negativePrompts",
            Soundtrack => "audio.soundtrack",
            Rhythm => "audio.rhythm",
            SoundDesign => "audio.soundDesign",
            Dialogue => "audio.dialogue",
            MixingNotes => "audio.mixingNotes",
            CameraLanguage => "cinematography.cameraLanguage",
            Lensing => "cinematography.lensing",
            Movement => "cinematography.movement",
            Lighting => "cinematography.lighting",
            ColorPalette => "cinematography.colorPalette",
            Vfx => "cinematography.vfx",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path())
    }
}

impl Group {
    pub fn name(self) -> &'static str {
        match self {
            Group::Cinematography => "cinematography",
            Group::Audio => "audio",
            Group::Continuity => "continuity",
            Group::Directives => "directives",
            Group::Delivery => "delivery",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Values assigned during one extraction pass, keyed by target field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: BTreeMap<Field, String>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Assign only while `field` is still unset in this pass. Returns whether it wrote.
    pub fn set_if_absent(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.values.contains_key(&field) {
            return false;
        }
        self.values.insert(field, value.into());
        true
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn take(&mut self, field: Field) -> Option<String> {
        self.values.remove(&field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn touches(&self, group: Group) -> bool {
        self.values.keys().any(|f| f.group() == Some(group))
    }

    /// Fill every field still unset here from `other`; values already present win.
    pub fn fill_from(&mut self, other: FieldValues) {
        for (field, value) in other.values {
            self.set_if_absent(field, value);
        }
    }

    /// `previous` with this pass's values for `G` written on top, or `None`
    /// when no attribute of the group was assigned.
    pub fn overlay<G: FieldGroup>(&self, previous: &G) -> Option<G> {
        if !self.touches(G::GROUP) {
            return None;
        }
        let mut group = previous.clone();
        for (field, value) in &self.values {
            if let Some(slot) = group.slot_mut(*field) {
                slot.clone_from(value);
            }
        }
        Some(group)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Audio, Cinematography};

    #[test]
    fn set_overwrites() {
        let mut values = FieldValues::new();
        values.set(Field::Lighting, "first");
        values.set(Field::Lighting, "second");
        assert_eq!(values.get(Field::Lighting), Some("second"));
    }

    #[test]
    fn set_if_absent_keeps_first() {
        let mut values = FieldValues::new();
        assert!(values.set_if_absent(Field::Soundtrack, "first"));
        assert!(!values.set_if_absent(Field::Soundtrack, "second"));
        assert_eq!(values.get(Field::Soundtrack), Some("first"));
    }

    #[test]
    fn set_if_absent_respects_explicit_empty() {
        let mut values = FieldValues::new();
        values.set(Field::Title, "");
        assert!(!values.set_if_absent(Field::Title, "later"));
        assert_eq!(values.get(Field::Title), Some(""));
    }

    #[test]
    fn fill_from_prefers_existing() {
        let mut lines = FieldValues::new();
        lines.set(Field::Lighting, "line");
        let mut paragraphs = FieldValues::new();
        paragraphs.set(Field::Lighting, "paragraph");
        paragraphs.set(Field::Vfx, "particles");
        lines.fill_from(paragraphs);
        assert_eq!(lines.get(Field::Lighting), Some("line"));
        assert_eq!(lines.get(Field::Vfx), Some("particles"));
    }

    #[test]
    fn overlay_keeps_untouched_attributes() {
        let previous = Cinematography {
            camera_language: "Steadicam".into(),
            lensing: "Anamorphic".into(),
            movement: "Orbit".into(),
            lighting: "Chiaroscuro".into(),
            color_palette: "Gunmetal".into(),
            vfx: "Bloom".into(),
        };
        let mut values = FieldValues::new();
        values.set(Field::Lighting, "Neon rim");
        values.set(Field::Title, "ignored by group");
        let merged = values.overlay(&previous).unwrap();
        assert_eq!(merged.lighting, "Neon rim");
        assert_eq!(merged.camera_language, "Steadicam");
        assert_eq!(merged.vfx, "Bloom");
    }

    #[test]
    fn overlay_untouched_group_is_none() {
        let mut values = FieldValues::new();
        values.set(Field::Lighting, "Neon rim");
        assert!(values.overlay(&Audio::default()).is_none());
    }

    #[test]
    fn every_group_field_has_a_path_under_its_group() {
        let fields = [
            Field::MustInclude,
            Field::BrandRules,
            Field::Fps,
            Field::MixingNotes,
            Field::Vfx,
        ];
        for field in fields {
            let group = field.group().unwrap();
            assert!(field.path().starts_with(group.name()), "{field}");
        }
        assert!(Field::Notes.group().is_none());
    }
}
