//! Math typesetting for chart annotations.
//!
//! Expressions are handed to KaTeX with `throwOnError` disabled, so a
//! malformed expression comes back as KaTeX's own red error markup. The two
//! public wrappers also absorb failures of the engine itself and never return
//! an error to the caller.

use once_cell::sync::Lazy;
use tracing::warn;

use crate::error::{DisplayError, Result};

/// Inline (`$...$`) or block (`$$...$$`) layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Inline,
    Display,
}

/// Something that turns a TeX expression into HTML markup.
pub trait MathRenderer {
    fn render(&self, expression: &str, layout: LayoutMode) -> Result<String>;
}

/// Renders through the bundled KaTeX engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct KatexRenderer;

fn katex_opts(display_mode: bool) -> std::result::Result<katex::Opts, String> {
    katex::Opts::builder()
        // `colorIsTextColor`: `\color{c}{x}` only colours its argument.
        .add_macro("\\color".to_owned(), "\\textcolor".to_owned())
        .display_mode(display_mode)
        .throw_on_error(false)
        .build()
        .map_err(|e| e.to_string())
}

static INLINE_OPTS: Lazy<std::result::Result<katex::Opts, String>> =
    Lazy::new(|| katex_opts(false));
static DISPLAY_OPTS: Lazy<std::result::Result<katex::Opts, String>> =
    Lazy::new(|| katex_opts(true));

impl MathRenderer for KatexRenderer {
    fn render(&self, expression: &str, layout: LayoutMode) -> Result<String> {
        let opts = match layout {
            LayoutMode::Inline => &*INLINE_OPTS,
            LayoutMode::Display => &*DISPLAY_OPTS,
        };
        let opts = opts
            .as_ref()
            .map_err(|e| DisplayError::MathOptions(e.clone()))?;
        Ok(katex::render_with_opts(expression, opts)?)
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Markup shown in place of an expression the engine could not handle.
/// Mirrors what KaTeX itself emits for a parse error.
pub fn fallback_markup(expression: &str, reason: &str) -> String {
    format!(
        "<span class=\"katex-error\" title=\"{}\" style=\"color:#cc0000\">{}</span>",
        escape_html(reason),
        escape_html(expression)
    )
}

fn render_or_fallback<R: MathRenderer + ?Sized>(
    renderer: &R,
    expression: &str,
    layout: LayoutMode,
) -> String {
    match renderer.render(expression, layout) {
        Ok(markup) => markup,
        Err(e) => {
            warn!(?layout, expression, error = %e, "math rendering failed, using fallback markup");
            fallback_markup(expression, &e.to_string())
        }
    }
}

pub fn render_inline_math_with<R: MathRenderer + ?Sized>(renderer: &R, expression: &str) -> String {
    render_or_fallback(renderer, expression, LayoutMode::Inline)
}

pub fn render_display_math_with<R: MathRenderer + ?Sized>(
    renderer: &R,
    expression: &str,
) -> String {
    render_or_fallback(renderer, expression, LayoutMode::Display)
}

/// Render `expression` for use inside running text.
pub fn render_inline_math(expression: &str) -> String {
    render_inline_math_with(&KatexRenderer, expression)
}

/// Render `expression` as a centred block.
pub fn render_display_math(expression: &str) -> String {
    render_display_math_with(&KatexRenderer, expression)
}
