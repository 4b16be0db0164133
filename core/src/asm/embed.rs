//! Assembly text appended to an executable image.
//!
//! Layout: `[host image][assembly text][text length: u64 BE][MAGIC]`.

use std::io::{self, Read, Seek, SeekFrom, Write};

use anyhow::{Context, Result, ensure};
use tracing::debug;

use crate::vm::Program;

use super::{Metadata, parse_str};

pub const MAGIC: &[u8; 16] = b"embeddedcodecode";
const SUFFIX_LEN: u64 = 8 + MAGIC.len() as u64;

/// Copy `host`, then `source`, then the length/magic suffix into `out`.
///
/// Returns the number of source bytes embedded.
pub fn embed_payload<H, S, W>(host: &mut H, source: &mut S, out: &mut W) -> Result<u64>
where
    H: Read + ?Sized,
    S: Read + ?Sized,
    W: Write + ?Sized,
{
    let host_len = io::copy(host, out).context("failed to copy host image")?;
    let len = io::copy(source, out).context("failed to append assembly source")?;
    out.write_all(&len.to_be_bytes()).context("failed to write payload length")?;
    out.write_all(MAGIC).context("failed to write payload magic")?;
    out.flush()?;
    debug!(target: "imp::asm", host_len, payload_len = len, "embedded payload");
    Ok(len)
}

/// Extract the embedded assembly text, or `None` when `reader` carries no payload.
pub fn read_payload<R: Read + Seek + ?Sized>(reader: &mut R) -> Result<Option<String>> {
    let total = reader.seek(SeekFrom::End(0))?;
    if total < SUFFIX_LEN {
        return Ok(None);
    }
    reader.seek(SeekFrom::Start(total - SUFFIX_LEN))?;
    let mut suffix = [0u8; SUFFIX_LEN as usize];
    reader.read_exact(&mut suffix).context("failed to read payload suffix")?;
    if &suffix[8..] != MAGIC {
        return Ok(None);
    }

    let mut len_bytes = [0u8; 8];
    len_bytes.copy_from_slice(&suffix[..8]);
    let len = u64::from_be_bytes(len_bytes);
    ensure!(
        len <= total - SUFFIX_LEN,
        "embedded payload length {len} exceeds image size {total}"
    );

    reader.seek(SeekFrom::Start(total - SUFFIX_LEN - len))?;
    let capacity = usize::try_from(len).context("embedded payload too large")?;
    let mut buf = Vec::with_capacity(capacity);
    Read::take(&mut *reader, len).read_to_end(&mut buf)?;
    ensure!(buf.len() as u64 == len, "embedded payload truncated");
    let text = String::from_utf8(buf).context("embedded payload is not valid UTF-8")?;
    Ok(Some(text))
}

/// Read and assemble the embedded program, if any.
pub fn load_embedded<R: Read + Seek + ?Sized>(reader: &mut R) -> Result<Option<(Program, Metadata)>> {
    let Some(src) = read_payload(reader)? else {
        return Ok(None);
    };
    let assembled = parse_str(&src).context("failed to assemble embedded program")?;
    Ok(Some(assembled))
}
