/// Estimated rendered width of a label, rounded up to a whole pixel.
///
/// Uses per-character width classes (as a fraction of the font size) for a
/// typical sans-serif face. No font files are consulted, so the estimate is
/// identical on every machine.
pub(super) fn label_width(text: &str, font_size: f32) -> f32 {
    text.lines()
        .map(|line| line.trim().chars().map(char_width_factor).sum::<f32>() * font_size)
        .fold(0.0, f32::max)
        .ceil()
}

fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.31,
        '.' | ',' | ':' | ';' | '|' | '!' | '\'' | 'i' | 'j' | 'l' | 'I' => 0.26,
        '(' | ')' | '[' | ']' | '{' | '}' | 'f' | 'r' | 't' => 0.34,
        'm' | 'w' | 'M' | 'W' => 0.90,
        '@' | '#' | '%' | '&' => 0.95,
        'A'..='Z' => 0.68,
        'a'..='z' | '0'..='9' => 0.57,
        c if c.is_ascii() => 0.57,
        // CJK and other wide scripts
        _ => 1.0,
    }
}
