//! Markup packaging: wraps snippets into complete preview documents.
//!
//! Every document returned here is self-contained (doctype, head, body) so
//! the sandboxed preview surface needs no additional context.

use super::{ExecutionResult, Language};

const HTML_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>HTML Output</title>
  <style>
    body {
      font-family: Arial, sans-serif;
      padding: 20px;
      background-color: #f9f9ff;
    }
  </style>
</head>
<body>
  "#;

const HTML_TAIL: &str = r#"
</body>
</html>"#;

const CSS_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>CSS Output</title>
  <style>
    body {
      font-family: Arial, sans-serif;
      padding: 20px;
      background-color: #f9f9ff;
    }
    "#;

const CSS_TAIL: &str = r#"
  </style>
</head>
<body>
  <div class="demo">
    <h1>CSS Output Preview</h1>
    <p>This is a demo paragraph styled by your CSS.</p>
    <button class="btn">Sample Button</button>
  </div>
</body>
</html>"#;

/// Wrap an HTML or CSS snippet into a full preview document. HTML lands
/// verbatim in the body; CSS lands in a style block over a fixed demo body
/// so the learner can see their rules take effect.
pub fn package_markup(language: Language, source: &str) -> ExecutionResult {
    match language {
        Language::Html => {
            ExecutionResult::markup(language, format!("{HTML_HEAD}{source}{HTML_TAIL}"))
        }
        Language::Css => ExecutionResult::markup(language, format!("{CSS_HEAD}{source}{CSS_TAIL}")),
        other => ExecutionResult::plain(
            other,
            "Language not supported in the local preview runner".to_string(),
        ),
    }
}

const COMBINED_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Web Page Output</title>
  <style>
    body {
      font-family: Arial, sans-serif;
      padding: 20px;
      background-color: #f9f9ff;
    }
    "#;

const COMBINED_BODY: &str = r#"
  </style>
</head>
<body>
  "#;

// The embedded script mirrors console output into a visible panel: it saves
// the page console bindings, collects lines in call order, runs the user
// script inside try/catch, renders the panel, then restores the bindings.
const COMBINED_SCRIPT_HEAD: &str = r#"
  <script>
    const originalConsole = {
      log: console.log,
      error: console.error
    };
    const logs = [];

    console.log = (...args) => {
      logs.push(args.join(' '));
      originalConsole.log(...args);
    };

    console.error = (...args) => {
      logs.push('[ERROR]: ' + args.join(' '));
      originalConsole.error(...args);
    };

    try {
      "#;

const COMBINED_SCRIPT_TAIL: &str = r#"
    } catch (error) {
      logs.push('[EXECUTION ERROR]: ' + error.message);
    }

    if (logs.length > 0) {
      const logDiv = document.createElement('div');
      logDiv.style.cssText = 'background: #f0f0f0; padding: 10px; margin-top: 20px; border-radius: 5px; font-family: monospace; border: 1px solid #ddd;';
      logDiv.innerHTML = '<h3 style="margin-top:0;">Console Output:</h3>' +
        logs.map(log => '<div style="margin: 5px 0;">' + log + '</div>').join('');
      document.body.appendChild(logDiv);
    }

    console.log = originalConsole.log;
    console.error = originalConsole.error;
  </script>
</body>
</html>"#;

/// Combine a three-file bundle into one document: CSS in the style block,
/// HTML in the body, JS in a script that captures its own console output
/// and keeps rendering even when the script throws.
pub fn combine_bundle(html_code: &str, css_code: &str, js_code: &str) -> ExecutionResult {
    let document = format!(
        "{COMBINED_HEAD}{css_code}{COMBINED_BODY}{html_code}{COMBINED_SCRIPT_HEAD}{js_code}{COMBINED_SCRIPT_TAIL}"
    );
    ExecutionResult::markup(Language::Html, document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_document_is_self_contained() {
        let result = package_markup(Language::Html, "<h1>Hi</h1>");
        assert!(result.success);
        assert!(result.is_markup);
        assert!(result.output.starts_with("<!DOCTYPE html>"));
        assert!(result.output.contains("<h1>Hi</h1>"));
        assert!(result.output.ends_with("</html>"));
    }

    #[test]
    fn css_document_carries_demo_body() {
        let result = package_markup(Language::Css, "h1{color:red}");
        assert!(result.is_markup);
        assert!(result.output.contains("h1{color:red}"));
        assert!(result.output.contains("Sample Button"));
    }
}
