use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::parser::fields::{Field, Group};

/// Opaque identity for characters and sequences. Stable until the entity is removed.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub essence: String,
    pub visual_traits: String,
    pub wardrobe: String,
    pub motivations: String,
    pub consistency_notes: String,
}

impl Character {
    pub fn new(name: impl Into<String>, essence: impl Into<String>) -> Self {
        Character {
            id: new_id(),
            name: name.into(),
            essence: essence.into(),
            ..Default::default()
        }
    }

    pub fn attr_mut(&mut self, attr: CharacterAttr) -> &mut String {
        match attr {
            CharacterAttr::Name => &mut self.name,
            CharacterAttr::Essence => &mut self.essence,
            CharacterAttr::VisualTraits => &mut self.visual_traits,
            CharacterAttr::Wardrobe => &mut self.wardrobe,
            CharacterAttr::Motivations => &mut self.motivations,
            CharacterAttr::ConsistencyNotes => &mut self.consistency_notes,
        }
    }
}

/// Editable [`Character`] attributes; the id is not one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterAttr {
    Name,
    Essence,
    VisualTraits,
    Wardrobe,
    Motivations,
    ConsistencyNotes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sequence {
    pub id: String,
    pub title: String,
    pub narrative_beat: String,
    pub location: String,
    pub time_of_day: String,
    pub mood: String,
    pub key_shots: String,
    pub transitions: String,
}

impl Sequence {
    pub fn new(title: impl Into<String>, narrative_beat: impl Into<String>) -> Self {
        Sequence {
            id: new_id(),
            title: title.into(),
            narrative_beat: narrative_beat.into(),
            ..Default::default()
        }
    }

    pub fn attr_mut(&mut self, attr: SequenceAttr) -> &mut String {
        match attr {
            SequenceAttr::Title => &mut self.title,
            SequenceAttr::NarrativeBeat => &mut self.narrative_beat,
            SequenceAttr::Location => &mut self.location,
            SequenceAttr::TimeOfDay => &mut self.time_of_day,
            SequenceAttr::Mood => &mut self.mood,
            SequenceAttr::KeyShots => &mut self.key_shots,
            SequenceAttr::Transitions => &mut self.transitions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceAttr {
    Title,
    NarrativeBeat,
    Location,
    TimeOfDay,
    Mood,
    KeyShots,
    Transitions,
}

// ── Field groups ──

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cinematography {
    pub camera_language: String,
    pub lensing: String,
    pub movement: String,
    pub lighting: String,
    pub color_palette: String,
    pub vfx: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Audio {
    pub soundtrack: String,
    pub rhythm: String,
    pub sound_design: String,
    pub dialogue: String,
    pub mixing_notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Continuity {
    pub color_continuity: String,
    pub props_continuity: String,
    pub brand_rules: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Directives {
    pub must_include: String,
    pub avoid: String,
    pub creative_risks: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Delivery {
    pub aspect_ratio: String,
    pub duration: String,
    pub render_format: String,
    pub fps: String,
    pub negative_prompts: String,
}

/// A fixed-shape record of named string attributes addressed by [`Field`].
pub trait FieldGroup: Clone {
    const GROUP: Group;

    /// Mutable slot for `field`, or `None` when the field lives in another group.
    fn slot_mut(&mut self, field: Field) -> Option<&mut String>;
}

impl FieldGroup for Cinematography {
    const GROUP: Group = Group::Cinematography;

    fn slot_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::CameraLanguage => Some(&mut self.camera_language),
            Field::Lensing => Some(&mut self.lensing),
            Field::Movement => Some(&mut self.movement),
            Field::Lighting => Some(&mut self.lighting),
            Field::ColorPalette => Some(&mut self.color_palette),
            Field::Vfx => Some(&mut self.vfx),
            _ => None,
        }
    }
}

impl FieldGroup for Audio {
    const GROUP: Group = Group::Audio;

    fn slot_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Soundtrack => Some(&mut self.soundtrack),
            Field::Rhythm => Some(&mut self.rhythm),
            Field::SoundDesign => Some(&mut self.sound_design),
            Field::Dialogue => Some(&mut self.dialogue),
            Field::MixingNotes => Some(&mut self.mixing_notes),
            _ => None,
        }
    }
}

impl FieldGroup for Continuity {
    const GROUP: Group = Group::Continuity;

    fn slot_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::ColorContinuity => Some(&mut self.color_continuity),
            Field::PropsContinuity => Some(&mut self.props_continuity),
            Field::BrandRules => Some(&mut self.brand_rules),
            _ => None,
        }
    }
}

impl FieldGroup for Directives {
    const GROUP: Group = Group::Directives;

    fn slot_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::MustInclude => Some(&mut self.must_include),
            Field::Avoid => Some(&mut self.avoid),
            Field::CreativeRisks => Some(&mut self.creative_risks),
            _ => None,
        }
    }
}

impl FieldGroup for Delivery {
    const GROUP: Group = Group::Delivery;

    fn slot_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::AspectRatio => Some(&mut self.aspect_ratio),
            Field::Duration => Some(&mut self.duration),
            Field::RenderFormat => Some(&mut self.render_format),
            Field::Fps => Some(&mut self.fps),
            Field::NegativePrompts => Some(&mut self.negative_prompts),
            _ => None,
        }
    }
}

// ── Document ──

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub title: String,
    pub logline: String,
    pub tone: String,
    pub theme: String,
    pub brand_keywords: String,
    pub reference_films: String,
    pub characters: Vec<Character>,
    pub sequences: Vec<Sequence>,
    pub cinematography: Cinematography,
    pub audio: Audio,
    pub continuity: Continuity,
    pub directives: Directives,
    pub delivery: Delivery,
    pub notes: String,
}

impl Document {
    /// Shallow merge: every field present in `result` replaces the document's
    /// value wholesale, absent fields are left as they were.
    pub fn apply(&mut self, result: ExtractionResult) {
        let ExtractionResult {
            title,
            logline,
            tone,
            theme,
            brand_keywords,
            reference_films,
            characters,
            sequences,
            cinematography,
            audio,
            continuity,
            directives,
            delivery,
            notes,
        } = result;

        replace(&mut self.title, title);
        replace(&mut self.logline, logline);
        replace(&mut self.tone, tone);
        replace(&mut self.theme, theme);
        replace(&mut self.brand_keywords, brand_keywords);
        replace(&mut self.reference_films, reference_films);
        replace(&mut self.characters, characters);
        replace(&mut self.sequences, sequences);
        replace(&mut self.cinematography, cinematography);
        replace(&mut self.audio, audio);
        replace(&mut self.continuity, continuity);
        replace(&mut self.directives, directives);
        replace(&mut self.delivery, delivery);
        replace(&mut self.notes, notes);
    }

    /// Append a blank character with a fresh id and return it for editing.
    pub fn add_character(&mut self) -> &mut Character {
        self.characters.push(Character::new("New Character", ""));
        let last = self.characters.len() - 1;
        &mut self.characters[last]
    }

    pub fn add_sequence(&mut self) -> &mut Sequence {
        self.sequences.push(Sequence::new("New Sequence", ""));
        let last = self.sequences.len() - 1;
        &mut self.sequences[last]
    }

    /// Set one attribute of the character with `id`. Returns `false` when no
    /// character has that id.
    pub fn update_character(
        &mut self,
        id: &str,
        attr: CharacterAttr,
        value: impl Into<String>,
    ) -> bool {
        match self.characters.iter_mut().find(|c| c.id == id) {
            Some(c) => {
                *c.attr_mut(attr) = value.into();
                true
            }
            None => false,
        }
    }

    pub fn update_sequence(
        &mut self,
        id: &str,
        attr: SequenceAttr,
        value: impl Into<String>,
    ) -> bool {
        match self.sequences.iter_mut().find(|s| s.id == id) {
            Some(s) => {
                *s.attr_mut(attr) = value.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_character(&mut self, id: &str) -> Option<Character> {
        let idx = self.characters.iter().position(|c| c.id == id)?;
        Some(self.characters.remove(idx))
    }

    pub fn remove_sequence(&mut self, id: &str) -> Option<Sequence> {
        let idx = self.sequences.iter().position(|s| s.id == id)?;
        Some(self.sequences.remove(idx))
    }
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

/// Partial [`Document`]: only fields the extractor positively identified are `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_films: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<Vec<Character>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequences: Option<Vec<Sequence>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cinematography: Option<Cinematography>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuity: Option<Continuity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directives: Option<Directives>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Delivery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        *self == ExtractionResult::default()
    }

    /// Groups carried by this result, in declaration order.
    pub fn touched_groups(&self) -> Vec<Group> {
        let mut groups = Vec::new();
        if self.cinematography.is_some() {
            groups.push(Group::Cinematography);
        }
        if self.audio.is_some() {
            groups.push(Group::Audio);
        }
        if self.continuity.is_some() {
            groups.push(Group::Continuity);
        }
        if self.directives.is_some() {
            groups.push(Group::Directives);
        }
        if self.delivery.is_some() {
            groups.push(Group::Delivery);
        }
        groups
    }
}

// ── Tests ──
