//! Preview synthesis: turns the flat file list into one self-contained
//! HTML document with local scripts and stylesheets inlined.
//!
//! Composition is a pure function of file names and contents; identical
//! input always yields byte-identical output. Missing references never
//! fail the composition, they degrade into visible comment markers.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{path, FileView, Language};

use super::shim::CONSOLE_SHIM;

pub const PLACEHOLDER_DOCUMENT: &str =
    "<!DOCTYPE html>\n<html><body><h1>No HTML file found</h1></body></html>";

fn script_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)<script\s+src\s*=\s*["']([^"']+)["'][^>]*></script>"#).unwrap()
    })
}

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)<link\s+[^>]*href\s*=\s*["']([^"']+)["'][^>]*>"#).unwrap())
}

pub fn compose(files: &[FileView]) -> String {
    let Some(entry) = select_entry(files) else {
        return PLACEHOLDER_DOCUMENT.to_string();
    };

    let html = inline_scripts(&entry.content, &entry.path, files);
    let html = inline_styles(&html, &entry.path, files);
    inject_shim(html)
}

/// `index.html` wins; otherwise the first HTML file in flatten order.
fn select_entry(files: &[FileView]) -> Option<&FileView> {
    files
        .iter()
        .find(|f| f.name == "index.html")
        .or_else(|| files.iter().find(|f| f.language == Language::Html))
}

fn is_external(reference: &str) -> bool {
    reference.starts_with("http://")
        || reference.starts_with("https://")
        || reference.starts_with("//")
}

fn inline_scripts(html: &str, entry_path: &str, files: &[FileView]) -> String {
    script_re()
        .replace_all(html, |caps: &regex::Captures| {
            let src = &caps[1];
            if is_external(src) {
                return caps[0].to_string();
            }
            let resolved = path::resolve(entry_path, src);
            match path::lookup(files, &resolved) {
                Some(file) => format!("<script>\n{}\n</script>", file.content),
                None => format!("<!-- Script not found: {src} -->"),
            }
        })
        .into_owned()
}

fn inline_styles(html: &str, entry_path: &str, files: &[FileView]) -> String {
    link_re()
        .replace_all(html, |caps: &regex::Captures| {
            let href = &caps[1];
            // Non-stylesheet links (icons, manifests) stay as they are.
            if !href.ends_with(".css") || is_external(href) {
                return caps[0].to_string();
            }
            let resolved = path::resolve(entry_path, href);
            match path::lookup(files, &resolved) {
                Some(file) => format!("<style>\n{}\n</style>", file.content),
                None => format!("<!-- Stylesheet not found: {href} -->"),
            }
        })
        .into_owned()
}

/// Injects the console shim right after the opening `<body>` tag so it
/// executes before any user script; with no body tag it is appended at
/// the end. The tag may carry attributes.
fn inject_shim(html: String) -> String {
    match body_open_end(&html) {
        Some(split) => {
            let mut out = String::with_capacity(html.len() + CONSOLE_SHIM.len() + 1);
            out.push_str(&html[..split]);
            out.push('\n');
            out.push_str(CONSOLE_SHIM);
            out.push_str(&html[split..]);
            out
        }
        None => {
            let mut out = html;
            out.push_str(CONSOLE_SHIM);
            out
        }
    }
}

/// Byte offset just past the `>` of the opening body tag, if any.
fn body_open_end(html: &str) -> Option<usize> {
    let mut search_from = 0;
    while let Some(rel) = html[search_from..].find("<body") {
        let start = search_from + rel;
        let after = start + "<body".len();
        let next = html[after..].chars().next();
        // "<bodyguard>" is not a body tag.
        if next.is_some_and(|c| c == '>' || c.is_ascii_whitespace()) {
            let close = html[after..].find('>')?;
            return Some(after + close + 1);
        }
        search_from = after;
    }
    None
}
