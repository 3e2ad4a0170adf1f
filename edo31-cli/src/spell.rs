use std::{fs::File, path::PathBuf};

use clap::Parser;
use edo31::{
    context::{ScoreEvent, SpelledNote, SpellingContext},
    settings::{AccidentalGlyphs, Settings},
};

use crate::{dto::ScoreDto, App, CliResult};

#[derive(Parser)]
pub(crate) struct SpellOptions {
    /// Location of the YAML score. If omitted, the score is read from stdin
    score_file_location: Option<PathBuf>,

    /// Index of the first event to spell. The context in effect at this event is reconstructed
    #[arg(long = "resume-at", default_value = "0")]
    resume_at: usize,

    /// Location of a TSV file mapping accidental identifiers to custom glyphs
    #[arg(long = "glyphs", env = "EDO31_GLYPHS")]
    glyphs_file_location: Option<PathBuf>,
}

impl SpellOptions {
    pub fn run(&self, app: &mut App) -> CliResult<()> {
        let score = match &self.score_file_location {
            Some(score_file_location) => {
                let file = File::open(score_file_location)
                    .map_err(|io_err| format!("Could not read score file: {io_err}"))?;
                ScoreDto::read(file)?
            }
            None => ScoreDto::read(app.read())?,
        };

        let glyphs = match &self.glyphs_file_location {
            Some(glyphs_file_location) => {
                let file = File::open(glyphs_file_location)
                    .map_err(|io_err| format!("Could not read glyph file: {io_err}"))?;
                AccidentalGlyphs::from_settings(&Settings::import(file)?)
            }
            None => AccidentalGlyphs::default(),
        };

        let events = score.to_events()?;

        let mut context = SpellingContext::default();
        context.resume_at(&events, self.resume_at);

        for (index, event) in events.iter().enumerate().skip(self.resume_at) {
            if let ScoreEvent::Annotation(text) = event {
                if let Err(err) = context.apply_annotation(text) {
                    app.errln(format!("Event {index}: {err}"))?;
                }
            } else if let Some(spelled_note) = context.process(event) {
                app.writeln(format!(
                    "{index:>3}. {} ({})",
                    render(&glyphs, &spelled_note),
                    spelled_note.spelling
                ))?;
            }
        }

        Ok(())
    }
}

fn render(glyphs: &AccidentalGlyphs, spelled_note: &SpelledNote) -> String {
    format!(
        "{}{}{}",
        spelled_note.spelling.note_name,
        glyphs.glyph(spelled_note.spelling.accidental),
        spelled_note.written_octave
    )
}
