//! Bundle handler: combine html/css/js files into one preview page.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _, Result};

use crate::runner::markup;

pub async fn run(
    html_path: Option<&Path>,
    css_path: Option<&Path>,
    js_path: Option<&Path>,
    output_path: Option<&Path>,
) -> Result<()> {
    if html_path.is_none() && css_path.is_none() && js_path.is_none() {
        bail!("--combined needs at least one of --html, --css, --js");
    }

    let html = read_or_empty(html_path)?;
    let css = read_or_empty(css_path)?;
    let js = read_or_empty(js_path)?;

    let result = markup::combine_bundle(&html, &css, &js);
    super::emit(&result, output_path)
}

fn read_or_empty(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => fs::read_to_string(p).with_context(|| format!("could not read {}", p.display())),
        None => Ok(String::new()),
    }
}
