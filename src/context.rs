//! Caller-side state for spelling the notes of a score in order.

use crate::accidental::Accidental;
use crate::edo::{EdoStep, SpellingOption, NUM_STEPS};
use crate::key::{self, KeySignature, KeySignatureError};
use crate::math;
use crate::note::NoteIdentity;
use crate::spelling::{self, PreviousAccidentals};
use std::fmt::{self, Display, Formatter};

/// An event of a score traversal, in score order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScoreEvent {
    /// A bar line. Accidentals written before it no longer apply.
    Measure,

    /// A text annotation. It might be a custom key signature.
    Annotation(String),

    /// A note at an absolute 31-EDO pitch, i.e. `octave * 31 + step`.
    Note { pitch: i32 },
}

impl ScoreEvent {
    pub fn note(octave: i32, step: EdoStep) -> Self {
        ScoreEvent::Note {
            pitch: octave * i32::from(NUM_STEPS) + i32::from(step.get()),
        }
    }
}

/// A note together with the spelling chosen for it.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SpelledNote {
    pub pitch: i32,
    pub spelling: SpellingOption,
    /// The octave the note is written in, which differs from the sounding octave for e.g. Cb or B#.
    pub written_octave: i32,
}

impl SpelledNote {
    pub fn note_identity(&self) -> NoteIdentity {
        NoteIdentity::new(self.spelling.note_name, self.written_octave)
    }
}

impl Display for SpelledNote {
    /// ```
    /// # use edo31::context::SpellingContext;
    /// let mut context = SpellingContext::default();
    /// context.apply_annotation(".b.....").unwrap();
    ///
    /// let spelled_note = context.spell(3 * 31 + 29);
    /// assert_eq!(spelled_note.to_string(), "Cb4");
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&format!(
            "{}{}{}",
            self.spelling.note_name,
            self.spelling.accidental.default_glyph(),
            self.written_octave
        ))
    }
}

/// The key signature and measure accidentals in effect at the current position of a traversal.
#[derive(Clone, Debug, Default)]
pub struct SpellingContext {
    key_signature: KeySignature,
    previous_accidentals: PreviousAccidentals,
}

impl SpellingContext {
    pub fn key_signature(&self) -> &KeySignature {
        &self.key_signature
    }

    pub fn previous_accidentals(&self) -> &PreviousAccidentals {
        &self.previous_accidentals
    }

    /// Forgets the key signature and all accidentals.
    pub fn reset(&mut self) {
        self.key_signature.clear();
        self.previous_accidentals.clear();
    }

    pub fn start_measure(&mut self) {
        self.previous_accidentals.clear();
    }

    /// Applies `annotation` if it is a key signature. Returns whether it was one.
    ///
    /// A key signature with an unknown token resets the key signature and is reported as an error.
    pub fn apply_annotation(&mut self, annotation: &str) -> Result<bool, KeySignatureError> {
        self.key_signature
            .apply_annotation(annotation)
            .inspect_err(|err| log::warn!("Key signature reset: {err}"))
    }

    /// Spells the note at the absolute `pitch` and records its accidental for the rest of the measure.
    pub fn spell(&mut self, pitch: i32) -> SpelledNote {
        let (octave, step) = math::div_mod_i32(pitch, u32::from(NUM_STEPS));
        let step = EdoStep::new(step as i32);

        let spelling =
            spelling::choose_spelling(step, &self.key_signature, &self.previous_accidentals);

        let letter_offset = i32::from(step.get())
            - i32::from(spelling.note_name.base_step())
            - i32::from(spelling.accidental.offset());
        let written_octave = octave + letter_offset.div_euclid(i32::from(NUM_STEPS));

        let spelled_note = SpelledNote {
            pitch,
            spelling,
            written_octave,
        };

        if spelling.accidental != Accidental::None {
            self.previous_accidentals
                .record(spelled_note.note_identity(), spelling.accidental);
        }

        spelled_note
    }

    /// Advances the traversal by one event. Returns the spelled note for note events.
    ///
    /// Use [`SpellingContext::apply_annotation`] directly to learn about rejected key signatures.
    pub fn process(&mut self, event: &ScoreEvent) -> Option<SpelledNote> {
        match event {
            ScoreEvent::Measure => {
                self.start_measure();
                None
            }
            ScoreEvent::Annotation(text) => {
                let _ = self.apply_annotation(text);
                None
            }
            &ScoreEvent::Note { pitch } => Some(self.spell(pitch)),
        }
    }

    /// Reconstructs the context in effect right before `events[index]`, discarding the current one.
    ///
    /// The search walks backward to the start of the measure containing `index`, then further
    /// backward to the last key signature before that measure. The measure is then replayed up to
    /// `index`. Both searches stop at the beginning of `events`.
    pub fn resume_at(&mut self, events: &[ScoreEvent], index: usize) {
        self.reset();

        let index = index.min(events.len());
        if index == 0 {
            log::trace!("Starting from the beginning, no need to back search accidentals");
            return;
        }
        log::info!("Back searching accidentals from event {index}");

        let measure_start = events[..index]
            .iter()
            .rposition(|event| *event == ScoreEvent::Measure)
            .unwrap_or(0);

        let key_signature = events[..measure_start]
            .iter()
            .rev()
            .find_map(|event| match event {
                ScoreEvent::Annotation(text) => match key::parse_key_signature(text) {
                    Err(KeySignatureError::NotAKeySignature) => None,
                    result => Some(result.unwrap_or_default()),
                },
                _ => None,
            });
        if let Some(key_signature) = key_signature {
            log::trace!("Key signature at start of measure: {key_signature}");
            self.key_signature = key_signature;
        }

        for event in &events[measure_start..index] {
            self.process(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::note::NoteName;

    use super::*;

    fn annotation(text: &str) -> ScoreEvent {
        ScoreEvent::Annotation(text.to_owned())
    }

    fn score() -> Vec<ScoreEvent> {
        vec![
            annotation("......b"),
            ScoreEvent::Measure,
            ScoreEvent::note(4, EdoStep::new(28)),
            ScoreEvent::note(4, EdoStep::new(26)),
            ScoreEvent::Measure,
            ScoreEvent::note(4, EdoStep::new(2)),
            annotation("Allegro"),
            ScoreEvent::note(4, EdoStep::new(18)),
            ScoreEvent::note(5, EdoStep::new(2)),
        ]
    }

    fn spell_all(context: &mut SpellingContext, events: &[ScoreEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|event| context.process(event))
            .map(|spelled_note| spelled_note.to_string())
            .collect()
    }

    #[test]
    fn spell_score() {
        let mut context = SpellingContext::default();

        assert_eq!(
            spell_all(&mut context, &score()),
            ["Bh4", "Bb4", "C#4", "Gh4", "C#5"]
        );
        assert_eq!(
            context.previous_accidentals().iter().collect::<Vec<_>>(),
            [
                (NoteIdentity::new(NoteName::C, 4), Accidental::Sharp),
                (NoteIdentity::new(NoteName::C, 5), Accidental::Sharp),
                (NoteIdentity::new(NoteName::G, 4), Accidental::Natural),
            ]
        );
    }

    #[test]
    fn measures_clear_previous_accidentals() {
        let mut context = SpellingContext::default();
        context.spell(4 * 31 + 2);
        assert!(!context.previous_accidentals().is_empty());

        context.process(&ScoreEvent::Measure);
        assert!(context.previous_accidentals().is_empty());
    }

    #[test]
    fn naturals_without_sign_are_not_recorded() {
        let mut context = SpellingContext::default();
        context.spell(4 * 31);
        context.spell(4 * 31 + 18);
        assert!(context.previous_accidentals().is_empty());
    }

    #[test]
    fn written_octave_follows_the_letter() {
        let mut context = SpellingContext::default();
        context.apply_annotation(".b.....").unwrap();
        let c_flat = context.spell(3 * 31 + 29);
        assert_eq!(c_flat.note_identity(), NoteIdentity::new(NoteName::C, 4));

        let mut context = SpellingContext::default();
        context.apply_annotation("......x").unwrap();
        let b_double_sharp = context.spell(5 * 31 + 1);
        assert_eq!(
            b_double_sharp.spelling,
            SpellingOption::new(NoteName::B, Accidental::Sharp2)
        );
        assert_eq!(b_double_sharp.written_octave, 4);
    }

    #[test]
    fn spell_extreme_pitches() {
        let mut context = SpellingContext::default();
        let lowest = context.spell(i32::MIN);
        assert_eq!(
            lowest.spelling,
            SpellingOption::new(NoteName::B, Accidental::SharpSlash)
        );
        assert_eq!(lowest.written_octave, -69273667);

        let mut context = SpellingContext::default();
        context.apply_annotation(".b.....").unwrap();
        let c_flat = context.spell(i32::MIN);
        assert_eq!(c_flat.spelling, SpellingOption::new(NoteName::C, Accidental::Flat));
        assert_eq!(c_flat.written_octave, -69273666);

        let mut context = SpellingContext::default();
        context.apply_annotation("......x").unwrap();
        let b_double_sharp = context.spell(i32::MAX);
        assert_eq!(
            b_double_sharp.spelling,
            SpellingOption::new(NoteName::B, Accidental::Sharp2)
        );
        assert_eq!(b_double_sharp.written_octave, 69273665);

        let mut context = SpellingContext::default();
        let highest = context.spell(i32::MAX);
        assert_eq!(
            highest.spelling,
            SpellingOption::new(NoteName::C, Accidental::SharpSlash)
        );
        assert_eq!(highest.written_octave, 69273666);
    }

    #[test]
    fn unknown_key_signature_tokens_are_reported() {
        let mut context = SpellingContext::default();
        assert_eq!(context.apply_annotation("#......"), Ok(true));
        assert_eq!(context.apply_annotation("Allegro"), Ok(false));
        assert_eq!(context.key_signature().get(NoteName::F), Some(Accidental::Sharp));

        assert!(matches!(
            context.apply_annotation("#.?....."),
            Err(KeySignatureError::UnknownAccidentalToken { note_name: NoteName::C, .. })
        ));
        assert!(context.key_signature().is_empty());
    }

    #[test]
    fn resume_in_the_middle_of_a_measure() {
        let events = score();

        let mut forward = SpellingContext::default();
        for event in &events[..7] {
            forward.process(event);
        }

        let mut resumed = SpellingContext::default();
        resumed.apply_annotation("#.#.#.#.#.#.#").unwrap();
        resumed.resume_at(&events, 7);

        assert_eq!(resumed.key_signature(), forward.key_signature());
        assert_eq!(resumed.previous_accidentals(), forward.previous_accidentals());
        assert_eq!(spell_all(&mut resumed, &events[7..]), ["Gh4", "C#5"]);
    }

    #[test]
    fn resume_at_a_bar_line() {
        let events = score();

        let mut context = SpellingContext::default();
        context.resume_at(&events, 4);

        assert_eq!(context.key_signature().to_string(), "......b");
        assert_eq!(
            context.previous_accidentals().iter().collect::<Vec<_>>(),
            [(NoteIdentity::new(NoteName::B, 4), Accidental::Flat)]
        );
    }

    #[test]
    fn resume_at_the_beginning() {
        let events = score();

        let mut context = SpellingContext::default();
        context.apply_annotation("#......").unwrap();
        context.spell(4 * 31 + 2);

        context.resume_at(&events, 0);
        assert!(context.key_signature().is_empty());
        assert!(context.previous_accidentals().is_empty());
    }

    #[test]
    fn resume_within_the_first_measure() {
        let events = vec![
            annotation("#......"),
            ScoreEvent::note(4, EdoStep::new(15)),
            ScoreEvent::note(4, EdoStep::new(13)),
        ];

        let mut context = SpellingContext::default();
        context.resume_at(&events, 2);
        assert_eq!(context.key_signature().get(NoteName::F), Some(Accidental::Sharp));
        assert_eq!(spell_all(&mut context, &events[2..]), ["Fh4"]);
    }

    #[test]
    fn resume_after_an_invalid_key_signature() {
        let events = vec![
            annotation("#......"),
            ScoreEvent::Measure,
            annotation("z......"),
            ScoreEvent::Measure,
            ScoreEvent::note(4, EdoStep::new(13)),
        ];

        let mut context = SpellingContext::default();
        context.resume_at(&events, 4);
        assert!(context.key_signature().is_empty());
        assert_eq!(spell_all(&mut context, &events[4..]), ["F4"]);
    }

    #[test]
    fn resume_beyond_the_end() {
        let events = score();

        let mut context = SpellingContext::default();
        context.resume_at(&events, 100);
        assert_eq!(
            context.previous_accidentals().get(NoteIdentity::new(NoteName::C, 5)),
            Some(Accidental::Sharp)
        );
    }
}
