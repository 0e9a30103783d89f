//! # Inline Rendering
//!
//! Resolves the three emphasis forms inside a single line of text and makes
//! the rest of the line HTML-safe.
//!
//! ## Resolution order
//!
//! 1. `\*` is protected so it never opens or closes a span
//! 2. `***text***` becomes `<strong><em>text</em></strong>`
//! 3. `**text**` becomes `<strong>text</strong>`
//! 4. `*text*` becomes `<em>text</em>`
//! 5. `&`, `<` and `>` in the user text are escaped
//! 6. generated tags and protected asterisks are restored
//!
//! Every layer matches non-greedily, so several spans can share a line.
//! Markers that never find a closing partner stay as literal asterisks.
//! Tags are represented by private-use placeholders until after escaping,
//! which is what keeps the generated markup from being escaped a second time.

mod sentinel;

use std::sync::OnceLock;

use regex::{Captures, Regex};

use sentinel::Sentinel;

/// One emphasis layer: its pattern and the placeholders wrapped around the
/// captured content.
struct EmphasisLayer {
    pattern: &'static str,
    open: Sentinel,
    close: Sentinel,
}

const LAYERS: [EmphasisLayer; 3] = [
    EmphasisLayer {
        pattern: r"\*\*\*(.+?)\*\*\*",
        open: Sentinel::StrongEmOpen,
        close: Sentinel::StrongEmClose,
    },
    EmphasisLayer {
        pattern: r"\*\*(.+?)\*\*",
        open: Sentinel::StrongOpen,
        close: Sentinel::StrongClose,
    },
    EmphasisLayer {
        pattern: r"\*(.+?)\*",
        open: Sentinel::EmOpen,
        close: Sentinel::EmClose,
    },
];

fn layer_regexes() -> &'static [Regex; 3] {
    static REGEXES: OnceLock<[Regex; 3]> = OnceLock::new();
    REGEXES.get_or_init(|| {
        LAYERS.map(|layer| Regex::new(layer.pattern).expect("Invalid emphasis regex"))
    })
}

/// Render one line of inline Markdown to HTML.
///
/// Total over all inputs: unmatched markers are left as text and nothing
/// here can fail. The empty string renders to the empty string.
///
/// ```
/// use markdown_press_engine::inline::render_inline;
///
/// assert_eq!(render_inline("**bold** & *it*"), "<strong>bold</strong> &amp; <em>it</em>");
/// assert_eq!(render_inline(r"\*lit\*"), "*lit*");
/// ```
pub fn render_inline(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut s = text.replace(r"\*", &Sentinel::EscapedStar.as_char().to_string());

    for (layer, re) in LAYERS.iter().zip(layer_regexes()) {
        s = re
            .replace_all(&s, |caps: &Captures| {
                format!(
                    "{}{}{}",
                    layer.open.as_char(),
                    &caps[1],
                    layer.close.as_char()
                )
            })
            .into_owned();
    }

    let mut out = html_escape::encode_text(&s).into_owned();

    for tag in Sentinel::TAGS {
        restore(&mut out, tag);
    }
    restore(&mut out, Sentinel::EscapedStar);

    out
}

fn restore(s: &mut String, sentinel: Sentinel) {
    let c = sentinel.as_char();
    if s.contains(c) {
        *s = s.replace(c, sentinel.restore());
    }
}
