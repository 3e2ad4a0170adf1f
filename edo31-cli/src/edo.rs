use std::io;

use clap::Parser;
use edo31::{
    edo::{self, EdoStep, SpellingOption},
    key::{self, KeySignatureError},
    note::NoteName,
};

use crate::{App, CliError, CliResult};

#[derive(Parser)]
pub(crate) struct OptionsOptions {
    /// EDO step, wrapped into the octave, e.g. 15
    #[arg(allow_negative_numbers = true)]
    step: i32,
}

impl OptionsOptions {
    pub fn run(&self, app: &mut App) -> CliResult<()> {
        let step = EdoStep::new(self.step);
        app.writeln(format!("---- Spelling options of step {step} ----"))?;
        for option in step.options() {
            app.writeln(format!(
                "{:<20} ({:+} EDO steps)",
                option,
                option.accidental.offset()
            ))?;
        }
        Ok(())
    }
}

#[derive(Parser)]
pub(crate) struct KeyOptions {
    /// Key signature with one field per letter in the order F C G D A E B, e.g. "#.#....."
    text: String,
}

impl KeyOptions {
    pub fn run(&self, app: &mut App) -> CliResult<()> {
        let key_signature = key::parse_key_signature(&self.text).map_err(|err| match err {
            KeySignatureError::NotAKeySignature => {
                CliError::CommandError(format!("Not a key signature: {}", self.text))
            }
            err => CliError::CommandError(format!("Invalid key signature ({err})")),
        })?;

        app.writeln(format!("---- Key signature {key_signature} ----"))?;
        if key_signature.is_empty() {
            app.writeln("No alterations")?;
        }
        for note_name in NoteName::KEY_SIGNATURE_ORDER {
            if let Some(accidental) = key_signature.get(note_name) {
                app.writeln(format!(
                    "{note_name}: {accidental} ({:+} EDO steps)",
                    accidental.offset()
                ))?;
            }
        }
        Ok(())
    }
}

pub fn print_info(mut dst: impl io::Write) -> io::Result<()> {
    writeln!(dst, "---- Properties of {}-EDO ----", edo::NUM_STEPS)?;
    writeln!(dst)?;
    writeln!(dst, "1 EDO step = {:.3}c", edo::STEP_SIZE_CENTS)?;
    writeln!(
        dst,
        "1 fifth = 18 EDO steps = {:.3}c = 12-EDO fifth {:+.3}c",
        EdoStep::new(18).as_cents(),
        -edo::FIFTH_DEVIATION_CENTS
    )?;
    writeln!(dst)?;

    writeln!(dst, "-- Spelling options --")?;
    for step in EdoStep::all() {
        let options: Vec<_> = step.options().iter().map(|&o| render(o)).collect();
        writeln!(dst, "{:>3}. {}", step, options.join(", "))?;
    }

    Ok(())
}

fn render(option: SpellingOption) -> String {
    format!("{}{}", option.note_name, option.accidental.default_glyph())
}
