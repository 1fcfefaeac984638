//! Server-rendered page: one text box, one button, one result line.

/// Shown instead of a prediction when the submitted text is empty or
/// whitespace-only.
pub const EMPTY_PROMPT: &str = "Please enter some text to classify.";

/// Result line for a successful prediction. The label is escaped before
/// interpolation.
pub fn prediction_line(label: &str) -> String {
    format!(
        "The predicted emotion is: <strong>{}</strong>",
        escape(label)
    )
}

/// Render the page. `result` is trusted markup placed below the form;
/// `text` is the user's submission, escaped and echoed back into the box.
pub fn render(result: Option<&str>, text: &str) -> String {
    let result_html = match result {
        Some(line) => format!("<p class=\"result\">{line}</p>"),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Text Emotion Classification</title>
</head>
<body>
  <h1>Text Emotion Classification</h1>
  <form method="post" action="/predict">
    <label for="text">Enter text to classify its emotion:</label><br>
    <textarea id="text" name="text" rows="4" cols="60">{text}</textarea><br>
    <button type="submit">Predict Emotion</button>
  </form>
  {result}
  <p class="footer">Text Emotion App v{version}</p>
</body>
</html>
"#,
        text = escape(text),
        result = result_html,
        version = env!("CARGO_PKG_VERSION"),
    )
}

/// Minimal HTML escaping for text interpolated into the page.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
