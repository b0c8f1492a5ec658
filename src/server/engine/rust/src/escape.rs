/* src/server/engine/rust/src/escape.rs */

/// Rewrite compact JSON text into the byte form existing Inertia clients
/// expect inside `data-page`: forward slashes in strings become `\/` and
/// non-ASCII codepoints become `\uXXXX` (surrogate pairs outside the BMP).
///
/// Walks the text tracking whether the cursor is inside a JSON string,
/// passing existing escape sequences through untouched.
pub fn escape_json_text(json: &str) -> String {
  let mut out = String::with_capacity(json.len() + json.len() / 8);
  let mut in_string = false;
  let mut chars = json.chars();

  while let Some(ch) = chars.next() {
    if !in_string {
      if ch == '"' {
        in_string = true;
      }
      out.push(ch);
      continue;
    }
    match ch {
      '\\' => {
        out.push(ch);
        if let Some(next) = chars.next() {
          out.push(next);
        }
      }
      '"' => {
        in_string = false;
        out.push(ch);
      }
      '/' => out.push_str("\\/"),
      c if (c as u32) > 0x7F => push_unicode_escape(&mut out, c),
      c => out.push(c),
    }
  }
  out
}

fn push_unicode_escape(out: &mut String, ch: char) {
  let mut units = [0u16; 2];
  for unit in ch.encode_utf16(&mut units) {
    out.push_str(&format!("\\u{unit:04x}"));
  }
}

/// Encode `&`, `<`, `>`, `"` and `'` as HTML entities, for attribute values.
pub fn escape_html_attr(text: &str) -> String {
  let mut out = String::with_capacity(text.len() + text.len() / 4);
  for ch in text.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#039;"),
      c => out.push(c),
    }
  }
  out
}

#[cfg(test)]
pub(crate) fn unescape_html_attr(text: &str) -> String {
  text
    .replace("&quot;", "\"")
    .replace("&#039;", "'")
    .replace("&lt;", "<")
    .replace("&gt;", ">")
    .replace("&amp;", "&")
}
