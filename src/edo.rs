//! The 31-EDO tuning model: step sizes and the enharmonic spellings of every step.

use crate::accidental::Accidental;
use crate::math;
use crate::note::NoteName;
use std::fmt::{self, Display, Formatter};
use std::sync::LazyLock;

/// Number of steps per octave.
pub const NUM_STEPS: u16 = 31;

/// Size of one EDO step in cents.
pub const STEP_SIZE_CENTS: f64 = 1200.0 / NUM_STEPS as f64;

/// Difference in cents between a 12-EDO fifth and a 31-EDO fifth (18 steps).
///
/// Only of interest for retuning purposes. Spelling decisions never depend on it.
pub const FIFTH_DEVIATION_CENTS: f64 = 700.0 - 18.0 * STEP_SIZE_CENTS;

/// The position of a pitch within one octave of 31-EDO, always in `[0, 31)`.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EdoStep(u16);

impl EdoStep {
    /// Creates an [`EdoStep`] from an arbitrary number of steps, wrapping it into the octave.
    ///
    /// ```
    /// # use edo31::edo::EdoStep;
    /// assert_eq!(EdoStep::new(15).get(), 15);
    /// assert_eq!(EdoStep::new(31).get(), 0);
    /// assert_eq!(EdoStep::new(-2).get(), 29);
    /// ```
    pub fn new(num_steps: i32) -> Self {
        Self(math::i32_rem_u(num_steps, NUM_STEPS))
    }

    /// The step reached by applying `accidental` to `note_name`.
    pub fn of(note_name: NoteName, accidental: Accidental) -> Self {
        Self::new(i32::from(note_name.base_step()) + i32::from(accidental.offset()))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn as_cents(self) -> f64 {
        f64::from(self.0) * STEP_SIZE_CENTS
    }

    /// Iterates over all steps of the octave in ascending order.
    pub fn all() -> impl Iterator<Item = EdoStep> {
        (0..NUM_STEPS).map(EdoStep)
    }

    /// Shortcut for [`options_for_step`].
    pub fn options(self) -> &'static [SpellingOption] {
        options_for_step(self)
    }
}

impl Display for EdoStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// One way of writing an [`EdoStep`]: a letter plus an accidental.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct SpellingOption {
    pub note_name: NoteName,
    pub accidental: Accidental,
}

impl SpellingOption {
    pub fn new(note_name: NoteName, accidental: Accidental) -> Self {
        Self {
            note_name,
            accidental,
        }
    }

    pub fn edo_step(self) -> EdoStep {
        EdoStep::of(self.note_name, self.accidental)
    }

    fn sort_key(self) -> (i16, usize, NoteName) {
        (
            self.accidental.offset().abs(),
            self.accidental.simplicity_rank().unwrap_or(usize::MAX),
            self.note_name,
        )
    }
}

impl Display for SpellingOption {
    /// ```
    /// # use edo31::{accidental::Accidental, edo::SpellingOption, note::NoteName};
    /// assert_eq!(SpellingOption::new(NoteName::F, Accidental::Sharp).to_string(), "F SHARP");
    /// assert_eq!(SpellingOption::new(NoteName::G, Accidental::None).to_string(), "G");
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.accidental {
            Accidental::None => f.pad(&self.note_name.to_string()),
            accidental => f.pad(&format!("{} {}", self.note_name, accidental)),
        }
    }
}

static ENHARMONIC_EQUIVALENTS: LazyLock<[Vec<SpellingOption>; NUM_STEPS as usize]> =
    LazyLock::new(|| {
        let mut equivalents: [Vec<SpellingOption>; NUM_STEPS as usize] =
            std::array::from_fn(|_| Vec::new());

        for note_name in NoteName::ALL {
            for accidental in Accidental::ENHARMONIC {
                let option = SpellingOption::new(note_name, accidental);
                equivalents[usize::from(option.edo_step().get())].push(option);
            }
        }
        for options in &mut equivalents {
            options.sort_by_key(|&option| option.sort_key());
        }

        equivalents
    });

/// Every spelling of `step`, simplest first.
///
/// Options are ordered by the magnitude of their accidental. Options with accidentals of equal
/// magnitude are ordered as in [`Accidental::ENHARMONIC`], i.e. flats first.
///
/// ```
/// # use edo31::{accidental::Accidental, edo::{self, EdoStep, SpellingOption}, note::NoteName};
/// let options = edo::options_for_step(EdoStep::new(15));
/// assert_eq!(
///     options,
///     [
///         SpellingOption::new(NoteName::F, Accidental::Sharp),
///         SpellingOption::new(NoteName::G, Accidental::MirroredFlat2),
///     ]
/// );
/// ```
pub fn options_for_step(step: EdoStep) -> &'static [SpellingOption] {
    &ENHARMONIC_EQUIVALENTS[usize::from(step.get())]
}
