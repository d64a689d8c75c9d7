/// Reads a leading integer the lenient way: surrounding whitespace is skipped, an optional
/// sign is honoured and parsing stops at the first non-digit (`"50 guests"` is `50`,
/// `"12.9"` is `12`). Values beyond `i64` saturate.
///
/// Returns `None` when no digit follows the optional sign.
#[must_use]
pub fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = unsigned.bytes().position(|b| !b.is_ascii_digit()).unwrap_or(unsigned.len());
    if end == 0 {
        return None;
    }

    let magnitude = unsigned[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
