use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};
use tracing::{debug, trace};

use crate::vm::Program;

use super::{
    AsmError, Metadata,
    args::{expect_end, op_name},
    families::{MnemonicParser, default_parsers},
    meta::parse_directive,
};

/// Assemble line-oriented source from `reader` using `parsers` in order.
///
/// Comment lines (`;`) at the top of the file form the header, where
/// `@param` directives are recognised. The header ends at the first
/// instruction; later comment lines are skipped. Parsing stops at the first
/// error and no partial program is returned.
pub fn parse_assembly<R: BufRead>(
    reader: R,
    parsers: &[Box<dyn MnemonicParser>],
) -> Result<(Program, Metadata), AsmError> {
    let mut program = Program::new();
    let mut meta = Metadata::new();
    let mut in_header = true;

    for (idx, text) in reader.lines().enumerate() {
        let text = text?;
        let line = idx + 1;
        let trimmed = text.trim_start();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(comment) = trimmed.strip_prefix(';') {
            if in_header && let Some(param) = parse_directive(comment, line)? {
                trace!(target: "imp::asm", line, name = %param.name, address = param.address, "parameter");
                meta.params.push(param);
            }
            continue;
        }

        let Some((name, name_len)) = op_name(&text) else {
            return Err(AsmError::syntax(line, "expected an opcode"));
        };
        let rest = &text[name_len..];

        let mut claimed = None;
        for parser in parsers {
            if let Some(parsed) = parser.parse(&name, rest, line)? {
                trace!(target: "imp::asm", line, family = parser.family(), inst = %parsed.instruction);
                claimed = Some(parsed);
                break;
            }
        }
        let Some(parsed) = claimed else {
            return Err(AsmError::UnknownOpcode { name, line });
        };
        expect_end(rest.get(parsed.consumed..).unwrap_or_default(), line)?;

        program.push(parsed.instruction);
        in_header = false;
    }

    debug!(target: "imp::asm", instructions = program.len(), params = meta.len(), "assembled");
    Ok((program, meta))
}

/// [`parse_assembly`] with the [`default_parsers`] chain.
pub fn parse_default<R: BufRead>(reader: R) -> Result<(Program, Metadata), AsmError> {
    parse_assembly(reader, &default_parsers())
}

pub fn parse_str(src: &str) -> Result<(Program, Metadata), AsmError> {
    parse_default(src.as_bytes())
}

/// Open and assemble a source file with the default parsers.
pub fn parse_assembly_file(path: impl AsRef<Path>) -> Result<(Program, Metadata)> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    parse_default(BufReader::new(file)).with_context(|| format!("failed to assemble {}", path.display()))
}
