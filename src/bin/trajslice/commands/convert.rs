use std::fs::File;
use std::io::{BufRead, BufReader, Write};

use anyhow::{Context as _, Result, bail};

use trajslice::{Format, Selection, Summary, convert_frames, detect_format};

use crate::cli::Cli;
use crate::display::{Context as DisplayContext, Progress, print_summary};
use crate::io::{create_output, stdin_is_tty, stdout_is_tty};

pub fn run_convert(cli: Cli, ctx: DisplayContext) -> Result<()> {
    if cli.input.is_none() && stdin_is_tty() {
        bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: trajslice -i <INPUT> [-o <OUTPUT>] or pipe data via stdin."
        );
    }
    if cli.output.is_none() && stdout_is_tty() {
        bail!(
            "No output file specified and stdout is a terminal.\n\nUsage: trajslice -i <INPUT> -o <OUTPUT> or pipe output."
        );
    }

    let selection = super::build_selection(&cli.selection)?;
    let output = create_output(cli.output.as_deref())?;

    let summary = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            let mut reader = BufReader::new(file);
            let format = match cli.input_format {
                Some(fmt) => fmt.into(),
                None => detect_format(&mut reader).context("Failed to detect input format")?,
            };
            run_stream(reader, output, format, &selection, &cli, ctx)?
        }
        None => {
            let Some(fmt) = cli.input_format else {
                bail!("Reading from stdin requires --infmt");
            };
            let reader = BufReader::new(std::io::stdin());
            run_stream(reader, output, fmt.into(), &selection, &cli, ctx)?
        }
    };

    if ctx.interactive {
        print_summary(&summary);
    }
    Ok(())
}

fn run_stream<R: BufRead>(
    input: R,
    output: Box<dyn Write>,
    format: Format,
    selection: &Selection,
    cli: &Cli,
    ctx: DisplayContext,
) -> Result<Summary> {
    if format == Format::Xyz {
        super::warn_dump_only_options(&cli.selection, ctx);
    }

    let mut progress = Progress::new(ctx.interactive);
    let summary = convert_frames(input, output, format, selection, |frame, written| {
        progress.frame(frame.index, written)
    })
    .context("Conversion failed")?;
    progress.finish();

    Ok(summary)
}
