/// Implementation of `tokpress strip-fillers`.
///
/// Applies the preset's rule list and prints the stripped text. The
/// `--report` JSON carries the preset name and the patterns of every
/// rule that fired, in application order.
use anyhow::Result;
use tokpress_estimate::Model;
use tokpress_passes::{FillerOptions, strip_fillers};
use tokpress_types::Preset;

use crate::report::Report;
use crate::{StripFillersArgs, read_input, write_output};

pub fn run(args: &StripFillersArgs) -> Result<i32> {
    let input = read_input(args.file.as_deref())?;
    let preset = Preset::parse(&args.preset);

    let stripped = strip_fillers(
        &input,
        &FillerOptions {
            preset,
            keep_eol: args.keep_eol,
            ..FillerOptions::default()
        },
    )?;

    if args.report {
        let mut report = Report::from_texts(&input, &stripped.text, Model::Generic);
        report.preset = Some(preset.to_string());
        report.rules = stripped.meta.rules.iter().map(ToString::to_string).collect();
        if stripped.meta.changed {
            report.strategies.push("strip-fillers".to_owned());
        }
        report.emit()?;
    }
    write_output(None, &stripped.text)?;
    Ok(0)
}
