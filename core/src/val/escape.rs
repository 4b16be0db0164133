//! Double-quoted string literals with backslash escapes.

/// Decode the body of a double-quoted literal (without the surrounding quotes).
///
/// Accepts `\a \b \f \n \r \t \v \\ \' \"`, `\xHH`, `\uHHHH`, `\UHHHHHHHH` and
/// three-digit octal `\ooo` escapes.
pub fn unquote(body: &str) -> Result<String, String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(esc) = chars.next() else {
            return Err("unterminated escape sequence".to_string());
        };
        match esc {
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'x' => out.push(read_code_point(&mut chars, 2, 16)?),
            'u' => out.push(read_code_point(&mut chars, 4, 16)?),
            'U' => out.push(read_code_point(&mut chars, 8, 16)?),
            '0'..='7' => {
                let rest: String = chars.by_ref().take(2).collect();
                let digits = format!("{esc}{rest}");
                if digits.len() != 3 {
                    return Err(format!("invalid octal escape \\{digits}"));
                }
                let code = u32::from_str_radix(&digits, 8).map_err(|_| format!("invalid octal escape \\{digits}"))?;
                if code > 0xFF {
                    return Err(format!("octal escape \\{digits} out of range"));
                }
                out.push(char::from_u32(code).ok_or_else(|| format!("invalid octal escape \\{digits}"))?);
            }
            other => return Err(format!("unknown escape sequence \\{other}")),
        }
    }
    Ok(out)
}

fn read_code_point(chars: &mut std::str::Chars<'_>, len: usize, radix: u32) -> Result<char, String> {
    let digits: String = chars.by_ref().take(len).collect();
    if digits.len() != len || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(format!("expected {len} hex digits in escape, got '{digits}'"));
    }
    let code = u32::from_str_radix(&digits, radix).map_err(|e| e.to_string())?;
    char::from_u32(code).ok_or_else(|| format!("invalid code point {code:#x}"))
}

/// Inverse of [`unquote`]: wrap `text` in double quotes, escaping what the
/// assembler would otherwise misread.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7F}' => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
