use std::sync::Arc;

use regex::Regex;

use crate::{
    foundation::error::{CardError, CardResult},
    markup::capability::{MarkdownRenderer, MarkupCapability, escape_html},
};

const LINK_SCHEMES: [&str; 3] = ["http://", "https://", "mailto:"];

/// Small markdown renderer covering the inline subset used by card descriptions.
///
/// Input is HTML-escaped first, so the only markup in the output is what this renderer emits.
#[derive(Debug)]
pub struct InlineMarkdown {
    strong: Regex,
    strong_alt: Regex,
    strike: Regex,
    em: Regex,
    em_alt: Regex,
    link: Regex,
}

impl InlineMarkdown {
    /// Compile the renderer's patterns.
    pub fn new() -> CardResult<Self> {
        let re = |p: &str| Regex::new(p).map_err(|e| CardError::Other(anyhow::Error::new(e)));
        Ok(Self {
            strong: re(r"\*\*([^*]+?)\*\*")?,
            strong_alt: re(r"__([^_]+?)__")?,
            strike: re(r"~~([^~]+?)~~")?,
            em: re(r"\*([^*]+?)\*")?,
            em_alt: re(r"\b_([^_]+?)_\b")?,
            link: re(r"\[([^\]]+)\]\(([^)\s]+)\)")?,
        })
    }

    /// Capability that acquires an `InlineMarkdown` on first use.
    pub fn capability() -> MarkupCapability {
        MarkupCapability::lazy(|| match InlineMarkdown::new() {
            Ok(r) => Some(Arc::new(r) as Arc<dyn MarkdownRenderer>),
            Err(e) => {
                tracing::warn!(error = %e, "failed to build markdown renderer");
                None
            }
        })
    }

    /// Links are matched first; emphasis then runs on the surrounding text and the link label,
    /// never on the URL.
    fn inline(&self, text: &str) -> String {
        let s = escape_html(text);
        let mut out = String::with_capacity(s.len());
        let mut last = 0;
        for caps in self.link.captures_iter(&s) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&self.emphasis(&s[last..whole.start()]));
            out.push_str(&render_link(&self.emphasis(&caps[1]), &caps[2]));
            last = whole.end();
        }
        out.push_str(&self.emphasis(&s[last..]));
        out.replace('\n', "<br>")
    }

    fn emphasis(&self, text: &str) -> String {
        let s = self.strong.replace_all(text, "<strong>${1}</strong>");
        let s = self.strong_alt.replace_all(&s, "<strong>${1}</strong>");
        let s = self.strike.replace_all(&s, "<del>${1}</del>");
        let s = self.em.replace_all(&s, "<em>${1}</em>");
        self.em_alt.replace_all(&s, "<em>${1}</em>").into_owned()
    }
}

fn render_link(label: &str, url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if LINK_SCHEMES.iter().any(|s| lower.starts_with(s)) {
        format!(r#"<a href="{url}" target="_blank" rel="noopener noreferrer">{label}</a>"#)
    } else {
        label.to_string()
    }
}

impl MarkdownRenderer for InlineMarkdown {
    fn render(&self, text: &str) -> String {
        let text = text.replace("\r\n", "\n");
        let mut out = String::new();
        let mut para = Vec::<&str>::new();
        for line in text.lines().chain(std::iter::once("")) {
            if line.trim().is_empty() {
                if !para.is_empty() {
                    out.push_str("<p>");
                    out.push_str(&self.inline(&para.join("\n")));
                    out.push_str("</p>");
                    para.clear();
                }
                continue;
            }
            para.push(line);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/markup/inline.rs"]
mod tests;
