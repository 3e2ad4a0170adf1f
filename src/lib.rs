//! Spell pitches of the 31-tone equal temperament with the right accidentals.
//!
//! The crate picks, for every note of a score, the letter and accidental a reader expects, given the
//! key signature and the accidentals already written in the current measure.
//!
//! ```
//! use edo31::context::SpellingContext;
//!
//! let mut context = SpellingContext::default();
//! context.apply_annotation("#.#.....").unwrap();
//!
//! // F# is taken from the key signature, F needs a natural sign
//! assert_eq!(context.spell(4 * 31 + 15).to_string(), "F#4");
//! assert_eq!(context.spell(4 * 31 + 13).to_string(), "Fh4");
//! ```

pub mod accidental;
pub mod context;
pub mod edo;
pub mod key;
pub mod math;
pub mod note;
pub mod settings;
pub mod spelling;
