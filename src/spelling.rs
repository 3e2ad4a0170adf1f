//! Choose the spelling of a 31-EDO step from its musical context.

use crate::accidental::{Accidental, Direction};
use crate::edo::{self, EdoStep, SpellingOption};
use crate::key::KeySignature;
use crate::note::NoteIdentity;
use std::collections::BTreeMap;

/// Accidentals written earlier in the current measure, per [`NoteIdentity`].
///
/// Owned by the caller. It is cleared at every bar line and filled as notes are spelled.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PreviousAccidentals {
    accidentals: BTreeMap<NoteIdentity, Accidental>,
}

impl PreviousAccidentals {
    /// Records `accidental` as the last one written for `note_identity`.
    pub fn record(&mut self, note_identity: NoteIdentity, accidental: Accidental) {
        self.accidentals.insert(note_identity, accidental);
    }

    pub fn get(&self, note_identity: NoteIdentity) -> Option<Accidental> {
        self.accidentals.get(&note_identity).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.accidentals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NoteIdentity, Accidental)> + '_ {
        self.accidentals
            .iter()
            .map(|(&note_identity, &accidental)| (note_identity, accidental))
    }

    pub fn clear(&mut self) {
        self.accidentals.clear();
    }
}

impl FromIterator<(NoteIdentity, Accidental)> for PreviousAccidentals {
    fn from_iter<T: IntoIterator<Item = (NoteIdentity, Accidental)>>(iter: T) -> Self {
        Self {
            accidentals: iter.into_iter().collect(),
        }
    }
}

#[derive(Default)]
struct FoundDirections {
    sharp: bool,
    flat: bool,
}

impl FoundDirections {
    fn observe(&mut self, accidental: Accidental) {
        match accidental.direction() {
            Direction::Sharp => self.sharp = true,
            Direction::Flat => self.flat = true,
            Direction::Neutral => {}
        }
    }

    fn matches(&self, accidental: Accidental) -> bool {
        match accidental.direction() {
            Direction::Sharp => self.sharp,
            Direction::Flat => self.flat,
            Direction::Neutral => false,
        }
    }
}

/// Chooses the most appropriate spelling of `step` given the key signature and the accidentals
/// already written in the current measure.
///
/// The decision is made in three stages:
///
/// 1. The first option (simplest first) whose accidental is exactly the one the key signature or
///    a previous accidental assigns to its letter wins. Octaves of previous accidentals are ignored.
/// 2. Otherwise, the natural spelling is used if there is one. It is written with an explicit
///    [`Accidental::Natural`] if the letter is altered by the key signature or if any accidental
///    other than a natural was written earlier in the measure. Without a natural spelling, the
///    simplest option pointing in a direction (sharp or flat) seen in the context is used.
/// 3. Otherwise, the simplest option is used.
///
/// ```
/// # use edo31::{accidental::Accidental, edo::{EdoStep, SpellingOption}, key::KeySignature};
/// # use edo31::{note::NoteName, spelling::{self, PreviousAccidentals}};
/// let key_signature = KeySignature::default().with(NoteName::F, Accidental::Sharp);
/// let previous_accidentals = PreviousAccidentals::default();
///
/// assert_eq!(
///     spelling::choose_spelling(EdoStep::new(15), &key_signature, &previous_accidentals),
///     SpellingOption::new(NoteName::F, Accidental::Sharp)
/// );
/// assert_eq!(
///     spelling::choose_spelling(EdoStep::new(13), &key_signature, &previous_accidentals),
///     SpellingOption::new(NoteName::F, Accidental::Natural)
/// );
/// ```
pub fn choose_spelling(
    step: EdoStep,
    key_signature: &KeySignature,
    previous_accidentals: &PreviousAccidentals,
) -> SpellingOption {
    let options = edo::options_for_step(step);
    assert!(!options.is_empty(), "No spelling options for step {step}");

    let mut found = FoundDirections::default();

    for &option in options {
        if let Some(key_accidental) = key_signature.get(option.note_name) {
            found.observe(key_accidental);
            if key_accidental == option.accidental {
                log::trace!("Step {step}: {option} taken from the key signature");
                return option;
            }
        }

        for (note_identity, previous_accidental) in previous_accidentals.iter() {
            found.observe(previous_accidental);
            if note_identity.note_name == option.note_name
                && previous_accidental == option.accidental
            {
                log::trace!("Step {step}: {option} taken from {note_identity} in this measure");
                return option;
            }
        }
    }

    if let Some(option) = best_guess(options, key_signature, previous_accidentals, &found) {
        log::trace!("Step {step}: best guess {option}");
        return option;
    }

    // Simplest, i.e. smallest magnitude, first
    let option = options[0];
    log::trace!("Step {step}: falling back to {option}");
    option
}

fn best_guess(
    options: &[SpellingOption],
    key_signature: &KeySignature,
    previous_accidentals: &PreviousAccidentals,
    found: &FoundDirections,
) -> Option<SpellingOption> {
    if let Some(natural) = options
        .iter()
        .find(|option| option.accidental == Accidental::None)
    {
        // TODO: Any non-natural accidental in the measure forces a natural sign, even on unrelated
        // letters. Restrict this to accidentals of the same letter once existing scores allow it.
        let needs_natural_sign = key_signature.get(natural.note_name).is_some()
            || previous_accidentals
                .iter()
                .any(|(_, accidental)| accidental != Accidental::Natural);

        return Some(if needs_natural_sign {
            SpellingOption::new(natural.note_name, Accidental::Natural)
        } else {
            *natural
        });
    }

    // Options are sorted by magnitude, so the first match is the smallest.
    options
        .iter()
        .copied()
        .find(|option| found.matches(option.accidental))
}
