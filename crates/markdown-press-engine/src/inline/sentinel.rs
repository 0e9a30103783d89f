/// Placeholder characters standing in for generated markup while the
/// surrounding text is still being escaped.
///
/// Each sentinel is a single private-use code point, so it can never collide
/// with an emphasis marker or an HTML metacharacter and survives escaping
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Sentinel {
    /// A backslash-escaped `\*`.
    EscapedStar,
    StrongEmOpen,
    StrongEmClose,
    StrongOpen,
    StrongClose,
    EmOpen,
    EmClose,
}

impl Sentinel {
    /// Tag sentinels in the order they are swapped back for real markup.
    pub(crate) const TAGS: [Sentinel; 6] = [
        Sentinel::StrongEmOpen,
        Sentinel::StrongEmClose,
        Sentinel::StrongOpen,
        Sentinel::StrongClose,
        Sentinel::EmOpen,
        Sentinel::EmClose,
    ];

    pub(crate) const fn as_char(self) -> char {
        match self {
            Sentinel::EscapedStar => '\u{E000}',
            Sentinel::StrongEmOpen => '\u{E001}',
            Sentinel::StrongEmClose => '\u{E002}',
            Sentinel::StrongOpen => '\u{E003}',
            Sentinel::StrongClose => '\u{E004}',
            Sentinel::EmOpen => '\u{E005}',
            Sentinel::EmClose => '\u{E006}',
        }
    }

    /// The text that replaces this sentinel in the final output.
    pub(crate) const fn restore(self) -> &'static str {
        match self {
            Sentinel::EscapedStar => "*",
            Sentinel::StrongEmOpen => "<strong><em>",
            Sentinel::StrongEmClose => "</em></strong>",
            Sentinel::StrongOpen => "<strong>",
            Sentinel::StrongClose => "</strong>",
            Sentinel::EmOpen => "<em>",
            Sentinel::EmClose => "</em>",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_are_distinct_and_outside_markup_alphabet() {
        let mut chars: Vec<char> = Sentinel::TAGS.iter().map(|s| s.as_char()).collect();
        chars.push(Sentinel::EscapedStar.as_char());
        for c in &chars {
            assert!(!matches!(c, '*' | '&' | '<' | '>' | '\\'));
        }
        chars.sort_unstable();
        chars.dedup();
        assert_eq!(chars.len(), 7);
    }
}
