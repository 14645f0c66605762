use crate::model::FormattedCode;

/// Raw length at which a code is considered bare digits and gets a separator.
pub const RAW_CODE_LEN: usize = 8;
/// Number of leading characters before the separator.
pub const SEPARATOR_AT: usize = 5;
pub const SEPARATOR: char = '-';

/// Normalize a raw code into the `NNNNN-NNN` shape the providers expect.
///
/// Length-only rule: an 8-character input gets `-` after its 5th character,
/// anything else passes through unchanged. Content is never validated.
///
/// Length is counted in characters, not bytes: `"ã123456"` is 8 bytes but
/// 7 characters and is left as is. For ASCII digits the two agree.
pub fn format_code(raw: &str) -> FormattedCode {
    if raw.chars().count() != RAW_CODE_LEN {
        return FormattedCode::new(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len() + 1);
    for (i, c) in raw.chars().enumerate() {
        if i == SEPARATOR_AT {
            out.push(SEPARATOR);
        }
        out.push(c);
    }
    FormattedCode::new(out)
}
