//! Custom key signatures written as annotations, e.g. `"#.#.t...."`.
//!
//! A key signature consists of seven `.`-separated fields, one per letter in the order F C G D A E B.
//! Each field holds one of the tokens
//!
//! | Token | Accidental |
//! |---|---|
//! | *(empty)*, `h` | none |
//! | `b` | [`Accidental::Flat`] |
//! | `bb` | [`Accidental::Flat2`] |
//! | `d` | [`Accidental::MirroredFlat`] |
//! | `db` | [`Accidental::MirroredFlat2`] |
//! | `#` | [`Accidental::Sharp`] |
//! | `x` | [`Accidental::Sharp2`] |
//! | `t` | [`Accidental::SharpSlash`] |
//! | `t#` | [`Accidental::SharpSlash4`] |

use crate::accidental::Accidental;
use crate::note::NoteName;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

const FIELD_SEPARATOR: char = '.';

/// The persistent alteration of every letter in a section of music.
///
/// Letters without an entry are natural. [`KeySignature::default`] is the empty key signature.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct KeySignature {
    accidentals: BTreeMap<NoteName, Accidental>,
}

impl KeySignature {
    /// Sets the alteration of `note_name`. [`Accidental::None`] removes the entry.
    pub fn with(mut self, note_name: NoteName, accidental: Accidental) -> Self {
        match accidental {
            Accidental::None => self.accidentals.remove(&note_name),
            accidental => self.accidentals.insert(note_name, accidental),
        };
        self
    }

    pub fn get(&self, note_name: NoteName) -> Option<Accidental> {
        self.accidentals.get(&note_name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.accidentals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NoteName, Accidental)> + '_ {
        self.accidentals
            .iter()
            .map(|(&note_name, &accidental)| (note_name, accidental))
    }

    pub fn clear(&mut self) {
        self.accidentals.clear();
    }

    /// Applies a score annotation that might be a key signature.
    ///
    /// - A valid key signature replaces `self` entirely and `Ok(true)` is returned.
    /// - Text that is not a key signature leaves `self` untouched and `Ok(false)` is returned.
    /// - A key signature containing an unknown token resets `self` to the empty key signature.
    ///
    /// ```
    /// # use edo31::{accidental::Accidental, key::KeySignature, note::NoteName};
    /// let mut key_signature = KeySignature::default();
    ///
    /// assert!(matches!(key_signature.apply_annotation("#......"), Ok(true)));
    /// assert_eq!(key_signature.get(NoteName::F), Some(Accidental::Sharp));
    ///
    /// assert!(matches!(key_signature.apply_annotation("Allegro"), Ok(false)));
    /// assert_eq!(key_signature.get(NoteName::F), Some(Accidental::Sharp));
    ///
    /// assert!(key_signature.apply_annotation("#.#.?....").is_err());
    /// assert!(key_signature.is_empty());
    /// ```
    pub fn apply_annotation(&mut self, annotation: &str) -> Result<bool, KeySignatureError> {
        match parse_key_signature(annotation) {
            Ok(key_signature) => {
                log::info!("Applying custom key signature: {key_signature}");
                *self = key_signature;
                Ok(true)
            }
            Err(KeySignatureError::NotAKeySignature) => Ok(false),
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }
}

impl Display for KeySignature {
    /// Writes the key signature in the same syntax [`parse_key_signature`] accepts.
    ///
    /// ```
    /// # use edo31::{accidental::Accidental, key::KeySignature, note::NoteName};
    /// assert_eq!(KeySignature::default().to_string(), "......");
    ///
    /// let key_signature = KeySignature::default()
    ///     .with(NoteName::B, Accidental::Flat)
    ///     .with(NoteName::F, Accidental::SharpSlash);
    /// assert_eq!(key_signature.to_string(), "t......b");
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, note_name) in NoteName::KEY_SIGNATURE_ORDER.into_iter().enumerate() {
            if index > 0 {
                write!(f, "{FIELD_SEPARATOR}")?;
            }
            if let Some(accidental) = self.get(note_name) {
                match token_of(accidental) {
                    Some(token) => write!(f, "{token}")?,
                    None => write!(f, "{accidental}")?,
                }
            }
        }
        Ok(())
    }
}

impl FromStr for KeySignature {
    type Err = KeySignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_key_signature(s)
    }
}

/// Error reported when an annotation cannot be used as a [`KeySignature`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KeySignatureError {
    /// The text does not have the shape of a key signature. Most annotations are of this kind.
    NotAKeySignature,

    /// The text has the shape of a key signature but one of its fields is not a known token.
    UnknownAccidentalToken { note_name: NoteName, token: String },
}

impl Display for KeySignatureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            KeySignatureError::NotAKeySignature => write!(f, "Text not valid as a key signature"),
            KeySignatureError::UnknownAccidentalToken { note_name, token } => write!(
                f,
                "Unsupported accidental in the custom key signature: {token} (note {note_name})"
            ),
        }
    }
}

/// Parses a custom key signature annotation.
///
/// Whitespace is ignored. The result is always a complete, fresh [`KeySignature`], so callers can
/// replace their current key signature without ever observing a partially applied one.
///
/// ```
/// # use edo31::{accidental::Accidental, key::{self, KeySignatureError}, note::NoteName};
/// let key_signature = key::parse_key_signature("#. #. t. . . . ").unwrap();
/// assert_eq!(key_signature.get(NoteName::F), Some(Accidental::Sharp));
/// assert_eq!(key_signature.get(NoteName::C), Some(Accidental::Sharp));
/// assert_eq!(key_signature.get(NoteName::G), Some(Accidental::SharpSlash));
/// assert_eq!(key_signature.get(NoteName::D), None);
///
/// assert_eq!(key::parse_key_signature("abc"), Err(KeySignatureError::NotAKeySignature));
/// ```
pub fn parse_key_signature(text: &str) -> Result<KeySignature, KeySignatureError> {
    let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    let fields: Vec<_> = text.split(FIELD_SEPARATOR).collect();
    if fields.len() != NoteName::KEY_SIGNATURE_ORDER.len() {
        log::trace!("Text not valid as a key signature: {text}");
        return Err(KeySignatureError::NotAKeySignature);
    }

    let mut key_signature = KeySignature::default();
    for (note_name, token) in NoteName::KEY_SIGNATURE_ORDER.into_iter().zip(fields) {
        let accidental = accidental_of(token).ok_or_else(|| {
            let err = KeySignatureError::UnknownAccidentalToken {
                note_name,
                token: token.to_owned(),
            };
            log::error!("{err}");
            err
        })?;
        log::trace!("Note: {note_name}; Accidental: {accidental}");
        key_signature = key_signature.with(note_name, accidental);
    }

    Ok(key_signature)
}

fn accidental_of(token: &str) -> Option<Accidental> {
    Some(match token {
        "" | "h" => Accidental::None,
        "b" => Accidental::Flat,
        "bb" => Accidental::Flat2,
        "d" => Accidental::MirroredFlat,
        "db" => Accidental::MirroredFlat2,
        "#" => Accidental::Sharp,
        "x" => Accidental::Sharp2,
        "t" => Accidental::SharpSlash,
        "t#" => Accidental::SharpSlash4,
        _ => return None,
    })
}

fn token_of(accidental: Accidental) -> Option<&'static str> {
    Some(match accidental {
        Accidental::None => "",
        Accidental::Flat => "b",
        Accidental::Flat2 => "bb",
        Accidental::MirroredFlat => "d",
        Accidental::MirroredFlat2 => "db",
        Accidental::Sharp => "#",
        Accidental::Sharp2 => "x",
        Accidental::SharpSlash => "t",
        Accidental::SharpSlash4 => "t#",
        _ => return None,
    })
}
