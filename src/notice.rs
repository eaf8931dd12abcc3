//! Inline error notice rendering
//!
//! A failed embed still has to produce markup for the host page, so errors are
//! turned into a small script that prepends a visible banner to the body once
//! the DOM has loaded.

use crate::error::EmbedError;
use tracing::error;

const NOTICE_HEAD: &str = r#"<script>window.addEventListener("DOMContentLoaded", function () {
  var notice = document.createElement("div");
  notice.setAttribute("role", "alert");
  notice.style.cssText = "background:#dc2626;color:#fee2e2;padding:1rem;margin:1rem;border-radius:8px;font-family:system-ui,-apple-system,'Segoe UI',Roboto,sans-serif;font-size:1rem";
  var label = document.createElement("span");
  label.style.cssText = "font-size:.875rem;text-transform:uppercase;font-weight:700;margin-right:.5rem";
  label.append("Error:");
  notice.append(label);
  notice.append(""#;

const NOTICE_TAIL: &str = r#"");
  document.body.prepend(notice);
});
</script>
"#;

/// Log `err` and render it as an embeddable notice.
pub fn render_notice(err: EmbedError) -> String {
    let url = err.url().to_string();
    let message = format!("{:#}", anyhow::Error::new(err));
    error!(%url, "{}", message);

    let escaped = escape_js_string(&message);
    let mut out = String::with_capacity(NOTICE_HEAD.len() + escaped.len() + NOTICE_TAIL.len());
    out.push_str(NOTICE_HEAD);
    out.push_str(&escaped);
    out.push_str(NOTICE_TAIL);
    out
}

/// Escape `s` for a quoted JavaScript string inside an HTML `<script>`.
pub fn escape_js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '<' => out.push_str("\\u003C"),
            '>' => out.push_str("\\u003E"),
            '&' => out.push_str("\\u0026"),
            '=' => out.push_str("\\u003D"),
            c if c.is_control() || c == '\u{2028}' || c == '\u{2029}' => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}
