//! Subcommand implementations.
//!
//! Each command reads its input, calls into `nkrn-proto`, writes its summary
//! to `out`, and returns a typed error. Nothing here exits the process.

use std::{fs, io::Write, path::Path};

use nkrn_proto::{Image, Report, inspect};

use crate::{
    cli::{Cli, Command, PackArgs, VerifyArgs},
    error::{Result, ToolError},
    report::{write_pack_summary, write_report},
};

/// Run the selected subcommand.
///
/// # Errors
///
/// Any [`ToolError`] from the subcommand.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    match &cli.command {
        Command::Pack(args) => pack(args, out).map(drop),
        Command::Verify(args) => verify(args, out).map(drop),
    }
}

/// Pack `args.input` into `args.output`.
///
/// # Errors
///
/// [`ToolError::InputNotFound`] or [`ToolError::Read`] if the input cannot be
/// read, [`ToolError::Image`] if the payload is too large for the header, and
/// [`ToolError::Write`] if the output cannot be written.
pub fn pack(args: &PackArgs, out: &mut impl Write) -> Result<Image> {
    let raw = read_file(&args.input)?;
    let meta = args.meta();

    tracing::debug!(
        input = %args.input.display(),
        payload_size = raw.len(),
        name = %meta.name,
        version = %meta.version,
        load_addr = format_args!("{:#010x}", meta.load_addr),
        entry_addr = format_args!("{:#010x}", meta.entry_addr),
        "Packing kernel image"
    );

    if meta.name.len() > nkrn_proto::KernelHeader::NAME_MAX {
        tracing::warn!(
            name = %meta.name,
            len = meta.name.len(),
            max = nkrn_proto::KernelHeader::NAME_MAX,
            "Kernel name will be truncated"
        );
    }

    let image = Image::pack(raw, &meta)?;
    let bytes = image.to_bytes();
    fs::write(&args.output, &bytes).map_err(|e| ToolError::write(&args.output, e))?;

    tracing::debug!(
        output = %args.output.display(),
        total_size = bytes.len(),
        crc32 = format_args!("{:#010x}", image.header().crc32()),
        "Wrote kernel image"
    );

    write_pack_summary(out, &args.output, &image).map_err(|e| ToolError::write("<stdout>", e))?;
    Ok(image)
}

/// Verify the image at `args.input`, printing the report before the verdict.
///
/// # Errors
///
/// [`ToolError::InputNotFound`] or [`ToolError::Read`] if the image cannot be
/// read, [`ToolError::Image`] if it is too small, malformed, or corrupt.
pub fn verify(args: &VerifyArgs, out: &mut impl Write) -> Result<Report> {
    writeln!(out, "Verifying {} ...", args.input.display())
        .map_err(|e| ToolError::write("<stdout>", e))?;

    let data = read_file(&args.input)?;
    let config = args.config();

    tracing::debug!(
        input = %args.input.display(),
        image_len = data.len(),
        min_payload_size = config.min_payload_size,
        max_payload_size = config.max_payload_size,
        "Verifying kernel image"
    );

    let report = inspect(&data)?;
    write_report(out, &report).map_err(|e| ToolError::write("<stdout>", e))?;
    report.check(&config)?;

    tracing::debug!(crc32 = format_args!("{:#010x}", report.computed_crc), "Image verified");
    Ok(report)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| ToolError::read(path, e))
}
