//! Human-readable summaries printed by the subcommands.

use std::{io, path::Path};

use nkrn_proto::{Image, KernelHeader, Report};

/// Print what `nkrn pack` wrote.
pub fn write_pack_summary(out: &mut impl io::Write, path: &Path, image: &Image) -> io::Result<()> {
    let header = image.header();
    writeln!(out, "Packed kernel image written to: {}", path.display())?;
    writeln!(out, "  Name       : {}", header.name())?;
    writeln!(out, "  Version    : {}", header.version())?;
    writeln!(out, "  Load addr  : {:#x}", header.load_addr())?;
    writeln!(out, "  Entry addr : {:#x}", header.entry_addr())?;
    writeln!(out, "  Payload    : {} bytes", header.payload_size())?;
    writeln!(out, "  CRC32      : 0x{:08X}", header.crc32())?;
    writeln!(
        out,
        "  Total size : {} bytes  (header={} + payload={})",
        image.len(),
        KernelHeader::SIZE,
        image.payload().len()
    )?;
    Ok(())
}

/// Print every parsed field of an image, valid or not.
pub fn write_report(out: &mut impl io::Write, report: &Report) -> io::Result<()> {
    let header = &report.header;
    writeln!(out, "  Magic      : 0x{:08X}  {}", header.magic(), status(report.magic_ok(), "BAD"))?;
    writeln!(out, "  Version    : {}", header.version())?;
    writeln!(out, "  Name       : {}", header.name())?;
    writeln!(out, "  Load addr  : 0x{:08X}", header.load_addr())?;
    writeln!(out, "  Entry addr : 0x{:08X}", header.entry_addr())?;
    writeln!(out, "  Payload    : {} bytes", header.payload_size())?;
    if report.is_truncated() {
        writeln!(out, "  Available  : {} bytes  TRUNCATED!", report.payload_available)?;
    }
    if report.trailing_bytes() > 0 {
        writeln!(out, "  Trailing   : {} bytes (ignored)", report.trailing_bytes())?;
    }
    writeln!(out, "  CRC32 exp  : 0x{:08X}", header.crc32())?;
    writeln!(
        out,
        "  CRC32 calc : 0x{:08X}  {}",
        report.computed_crc,
        status(report.crc_ok(), "MISMATCH!")
    )?;
    Ok(())
}

fn status(ok: bool, bad: &'static str) -> &'static str {
    if ok { "OK" } else { bad }
}
