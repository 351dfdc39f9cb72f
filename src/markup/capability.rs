use std::sync::{Arc, OnceLock};

/// Renders markdown text into sanitized markup.
pub trait MarkdownRenderer: Send + Sync {
    /// Render `text`; the result must be safe to insert as markup.
    fn render(&self, text: &str) -> String;
}

type Loader = Box<dyn Fn() -> Option<Arc<dyn MarkdownRenderer>> + Send + Sync>;

/// Injected markdown capability with acquire-once memoization.
///
/// The loader runs at most once, on first use. When it yields nothing the capability degrades
/// to escaped plain text with `<br>` line breaks.
pub struct MarkupCapability {
    loader: Loader,
    renderer: OnceLock<Option<Arc<dyn MarkdownRenderer>>>,
}

impl std::fmt::Debug for MarkupCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkupCapability")
            .field("acquired", &self.renderer.get().map(|r| r.is_some()))
            .finish()
    }
}

impl MarkupCapability {
    /// Capability whose renderer is produced lazily by `loader`.
    pub fn lazy<F>(loader: F) -> Self
    where
        F: Fn() -> Option<Arc<dyn MarkdownRenderer>> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            renderer: OnceLock::new(),
        }
    }

    /// Capability backed by an already-built renderer.
    pub fn with_renderer(renderer: Arc<dyn MarkdownRenderer>) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(Some(renderer));
        Self {
            loader: Box::new(|| None),
            renderer: cell,
        }
    }

    /// Capability that always uses the plain-text fallback.
    pub fn plain_text() -> Self {
        Self::lazy(|| None)
    }

    /// Render `text` with the acquired renderer, or the plain-text fallback.
    pub fn render(&self, text: &str) -> String {
        let renderer = self.renderer.get_or_init(|| {
            let acquired = (self.loader)();
            if acquired.is_none() {
                tracing::warn!("markdown renderer unavailable; using plain text");
            }
            acquired
        });
        match renderer {
            Some(r) => r.render(text),
            None => plain_text(text),
        }
    }

    /// Whether a renderer has been acquired (`None` until first use).
    pub fn is_acquired(&self) -> Option<bool> {
        self.renderer.get().map(|r| r.is_some())
    }
}

/// Escape `&`, `<`, `>`, `"` and `'` for safe insertion into markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Plain-text fallback: escaped text with newlines turned into `<br>`.
pub fn plain_text(text: &str) -> String {
    escape_html(text.trim_end())
        .replace("\r\n", "\n")
        .replace('\n', "<br>")
}

#[cfg(test)]
#[path = "../../tests/unit/markup/capability.rs"]
mod tests;
