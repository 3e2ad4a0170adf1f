use std::io::Read;

use edo31::{context::ScoreEvent, edo::NUM_STEPS};
use serde::{Deserialize, Serialize};

use crate::{error::ResultExt, CliError, CliResult};

#[derive(Debug, Deserialize, Serialize)]
pub struct ScoreDto {
    pub events: Vec<ScoreEventDto>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ScoreEventDto {
    Measure,
    Annotation { text: String },
    Note { octave: i32, step: i32 },
}

impl ScoreDto {
    pub fn read(input: impl Read) -> CliResult<ScoreDto> {
        serde_yaml::from_reader(input).handle_error::<CliError>("Could not parse score file")
    }

    pub fn to_events(&self) -> CliResult<Vec<ScoreEvent>> {
        self.events
            .iter()
            .enumerate()
            .map(|(index, event)| match event {
                ScoreEventDto::Measure => Ok(ScoreEvent::Measure),
                ScoreEventDto::Annotation { text } => Ok(ScoreEvent::Annotation(text.clone())),
                &ScoreEventDto::Note { octave, step } => octave
                    .checked_mul(i32::from(NUM_STEPS))
                    .and_then(|pitch| pitch.checked_add(step))
                    .map(|pitch| ScoreEvent::Note { pitch })
                    .ok_or_else(|| {
                        CliError::CommandError(format!(
                            "Event {index}: pitch out of range (octave {octave}, step {step})"
                        ))
                    }),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_are_converted_to_absolute_pitches() {
        let score = ScoreDto::read(
            "events:\n\
             - type: Measure\n\
             - type: Note\n  octave: 4\n  step: 15\n\
             - type: Note\n  octave: -1\n  step: 30\n\
             - type: Note\n  octave: 0\n  step: -2\n"
                .as_bytes(),
        )
        .unwrap();

        assert_eq!(
            score.to_events().unwrap(),
            [
                ScoreEvent::Measure,
                ScoreEvent::Note { pitch: 139 },
                ScoreEvent::Note { pitch: -1 },
                ScoreEvent::Note { pitch: -2 },
            ]
        );
    }

    #[test]
    fn reject_pitches_out_of_range() {
        let score = ScoreDto {
            events: vec![
                ScoreEventDto::Measure,
                ScoreEventDto::Note {
                    octave: 100_000_000,
                    step: 0,
                },
            ],
        };
        assert!(matches!(
            score.to_events(),
            Err(CliError::CommandError(message))
                if message == "Event 1: pitch out of range (octave 100000000, step 0)"
        ));

        let score = ScoreDto {
            events: vec![ScoreEventDto::Note {
                octave: 69_273_666,
                step: 2,
            }],
        };
        assert!(score.to_events().is_err());

        let score = ScoreDto {
            events: vec![ScoreEventDto::Note {
                octave: 69_273_666,
                step: 1,
            }],
        };
        assert_eq!(
            score.to_events().unwrap(),
            [ScoreEvent::Note { pitch: i32::MAX }]
        );
    }
}
