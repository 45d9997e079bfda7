use serde_json::ser::Formatter;
use std::io;

/// 控制 HTML 敏感字符转义的 JSON 输出格式
///
/// 输出紧凑 JSON。`escape_html` 为 false 时 `<`、`>`、`&` 原样写出；
/// 为 true 时分别写为 `\u003c`、`\u003e`、`\u0026`
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscapeFormatter {
    escape_html: bool,
}

impl HtmlEscapeFormatter {
    pub fn new(escape_html: bool) -> Self {
        Self { escape_html }
    }
}

impl Formatter for HtmlEscapeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if !self.escape_html {
            return writer.write_all(fragment.as_bytes());
        }

        let bytes = fragment.as_bytes();
        let mut start = 0;
        for (i, byte) in bytes.iter().enumerate() {
            let escaped: &[u8] = match byte {
                b'<' => b"\\u003c",
                b'>' => b"\\u003e",
                b'&' => b"\\u0026",
                _ => continue,
            };
            writer.write_all(&bytes[start..i])?;
            writer.write_all(escaped)?;
            start = i + 1;
        }
        writer.write_all(&bytes[start..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    fn encode<T: Serialize>(value: &T, escape_html: bool) -> String {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, HtmlEscapeFormatter::new(escape_html));
        value.serialize(&mut ser).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_html_characters_kept_raw() {
        let out = encode(&"<script>&</script>", false);
        assert_eq!(out, r#""<script>&</script>""#);
    }

    #[test]
    fn test_html_characters_escaped_when_enabled() {
        let out = encode(&"<a href=\"x\">&</a>", true);
        assert_eq!(out, r#""\u003ca href=\"x\"\u003e\u0026\u003c/a\u003e""#);
    }

    #[test]
    fn test_standard_escapes_still_applied() {
        let out = encode(&"line\n\"quoted\"\t\\", false);
        assert_eq!(out, r#""line\n\"quoted\"\t\\""#);
    }

    #[test]
    fn test_output_is_compact() {
        let out = encode(&serde_json::json!({"k": [1, 2], "m": {"n": null}}), false);
        assert_eq!(out, r#"{"k":[1,2],"m":{"n":null}}"#);
    }
}
