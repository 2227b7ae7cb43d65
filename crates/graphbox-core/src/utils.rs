use std::fmt::Write as _;

/// Formats a coordinate or weight the way it is written to GraphML.
///
/// The shortest text that parses back to the same value; `-0` and non-finite values print as
/// `0`.
pub fn fmt_number(v: f64) -> String {
    let mut out = String::new();
    fmt_number_into(&mut out, v);
    out
}

pub fn fmt_number_into(out: &mut String, v: f64) {
    if !v.is_finite() || v == 0.0 {
        out.push('0');
        return;
    }
    let _ = write!(out, "{v}");
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

/// Escapes text for both element content and double/single quoted attribute values.
pub fn escape_xml_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut last = 0usize;
    for (i, b) in bytes.iter().enumerate() {
        let repl = match *b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        out.push_str(&text[last..i]);
        out.push_str(repl);
        last = i + 1;
    }
    out.push_str(&text[last..]);
}

/// Prefixes `#` when the color does not already start with one.
pub fn normalize_color(color: &str) -> String {
    let color = color.trim();
    if color.starts_with('#') {
        color.to_string()
    } else {
        format!("#{color}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_drop_integral_fractions() {
        assert_eq!(fmt_number(20.0), "20");
        assert_eq!(fmt_number(-0.0), "0");
        assert_eq!(fmt_number(12.5), "12.5");
        assert_eq!(fmt_number(f64::NAN), "0");
    }

    #[test]
    fn numbers_parse_back_exactly() {
        for v in [1e-10, 1e19, 100.000_000_000_5, -2.5e-300, f64::MAX, 0.1 + 0.2] {
            assert_eq!(fmt_number(v).parse::<f64>().unwrap(), v);
        }
        assert_eq!(fmt_number(1e19), "10000000000000000000");
    }

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            escape_xml(r#"a<b> & "c" 'd'"#),
            "a&lt;b&gt; &amp; &quot;c&quot; &#39;d&#39;"
        );
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn colors_get_a_leading_hash() {
        assert_eq!(normalize_color("ff0000"), "#ff0000");
        assert_eq!(normalize_color("#00ff00"), "#00ff00");
    }
}
