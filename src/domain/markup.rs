//! Conversions between user text and page markup.
//!
//! User text is never treated as markup. When it has to appear inside an HTML
//! document it goes through [`escape_html`], and [`decode_character_references`]
//! turns the rendered form back into the original text.

/// Escapes the five HTML-significant characters.
///
/// The result is safe both as element content and inside a quoted attribute
/// value.
///
/// # Examples
///
/// ```
/// use pollcalc::domain::escape_html;
///
/// assert_eq!(escape_html("<b>\"hi\" & 'bye'</b>"),
///            "&lt;b&gt;&quot;hi&quot; &amp; &#39;bye&#39;&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Decodes character references back into text.
///
/// Handles the named references emitted by [`escape_html`] plus `apos` and
/// `nbsp`, and decimal or hexadecimal numeric references. Anything that is not
/// a complete, known reference is copied through unchanged.
pub fn decode_character_references(src: &str) -> String {
    if !src.contains('&') {
        return src.to_string();
    }

    // Digits only: `from_str_radix` alone would also take a leading '+'.
    fn decode_numeric(value: &str) -> Option<char> {
        let codepoint = if let Some(hex) = value.strip_prefix('x').or_else(|| value.strip_prefix('X')) {
            if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            u32::from_str_radix(hex, 16).ok()?
        } else {
            if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            value.parse::<u32>().ok()?
        };
        match codepoint {
            0 => Some(char::REPLACEMENT_CHARACTER),
            _ => char::from_u32(codepoint),
        }
    }

    fn decode_named(value: &str) -> Option<char> {
        match value {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some('\u{00A0}'),
            _ => None,
        }
    }

    let mut out = String::with_capacity(src.len());
    let mut rest = src;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp + 1..];

        let decoded = candidate.find(';').and_then(|end| {
            let name = &candidate[..end];
            let ch = match name.strip_prefix('#') {
                Some(numeric) => decode_numeric(numeric),
                None => decode_named(name),
            }?;
            Some((ch, end + 1))
        });

        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &candidate[consumed..];
            }
            None => {
                out.push('&');
                rest = candidate;
            }
        }
    }

    out.push_str(rest);
    out
}
