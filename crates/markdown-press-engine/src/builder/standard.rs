use super::{BuildError, FALLBACK_TITLE, HtmlBuilder, StateError, wrap_page};

const LIST_OPEN: &str = "<ul>\n";
const LIST_CLOSE: &str = "</ul>\n";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lifecycle {
    #[default]
    NotStarted,
    Open,
    Ended,
}

/// The default [`HtmlBuilder`]: accumulates plain HTML fragments.
///
/// Text handed to the `add_*` methods is inserted verbatim, so it must
/// already be HTML-safe (the block parser runs it through
/// [`render_inline`](crate::inline::render_inline) first).
#[derive(Debug, Clone, Default)]
pub struct StandardHtmlBuilder {
    lifecycle: Lifecycle,
    fragments: Vec<String>,
    list_open: bool,
    explicit_title: Option<String>,
    first_h1_title: Option<String>,
}

impl StandardHtmlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_list_open(&self) -> bool {
        self.list_open
    }

    /// The title the full page would carry right now.
    ///
    /// An explicit title wins over the first level-1 heading, which wins over
    /// [`FALLBACK_TITLE`].
    pub fn resolved_title(&self) -> &str {
        self.explicit_title
            .as_deref()
            .or(self.first_h1_title.as_deref())
            .unwrap_or(FALLBACK_TITLE)
    }

    fn ensure_open(&self) -> Result<(), StateError> {
        match self.lifecycle {
            Lifecycle::NotStarted => Err(StateError::NotStarted),
            Lifecycle::Ended => Err(StateError::AlreadyEnded),
            Lifecycle::Open => Ok(()),
        }
    }

    fn ensure_started(&self) -> Result<(), StateError> {
        match self.lifecycle {
            Lifecycle::NotStarted => Err(StateError::NotStarted),
            Lifecycle::Open | Lifecycle::Ended => Ok(()),
        }
    }

    fn close_list_if_open(&mut self) {
        if self.list_open {
            log::debug!("auto-closing open list");
            self.fragments.push(LIST_CLOSE.to_string());
            self.list_open = false;
        }
    }
}

impl HtmlBuilder for StandardHtmlBuilder {
    fn start(&mut self, title: Option<&str>) {
        if self.lifecycle == Lifecycle::Open {
            log::debug!("restarting an open document; discarding {} fragments", self.fragments.len());
        }
        *self = Self {
            lifecycle: Lifecycle::Open,
            explicit_title: title.map(str::to_string),
            ..Self::default()
        };
        log::debug!("document started (explicit title: {:?})", self.explicit_title);
    }

    fn end(&mut self) -> Result<(), BuildError> {
        self.ensure_open()?;
        self.close_list_if_open();
        self.lifecycle = Lifecycle::Ended;
        log::debug!("document ended with {} fragments", self.fragments.len());
        Ok(())
    }

    fn add_heading(&mut self, text: &str, level: u8) -> Result<(), BuildError> {
        self.ensure_open()?;
        if !(1..=6).contains(&level) {
            return Err(BuildError::HeadingLevelOutOfRange { level });
        }

        if level == 1 && self.explicit_title.is_none() && self.first_h1_title.is_none() {
            self.first_h1_title = Some(text.to_string());
        }

        self.close_list_if_open();
        self.fragments.push(format!("<h{level}>{text}</h{level}>\n"));
        Ok(())
    }

    fn start_list(&mut self) -> Result<(), BuildError> {
        self.ensure_open()?;
        if self.list_open {
            return Err(StateError::ListAlreadyOpen.into());
        }
        self.fragments.push(LIST_OPEN.to_string());
        self.list_open = true;
        Ok(())
    }

    fn add_list_item(&mut self, text: &str) -> Result<(), BuildError> {
        self.ensure_open()?;
        if !self.list_open {
            return Err(StateError::NoListForItem.into());
        }
        self.fragments.push(format!("<li>{text}</li>\n"));
        Ok(())
    }

    fn end_list(&mut self) -> Result<(), BuildError> {
        self.ensure_open()?;
        if !self.list_open {
            return Err(StateError::NoListToEnd.into());
        }
        self.fragments.push(LIST_CLOSE.to_string());
        self.list_open = false;
        Ok(())
    }

    fn add_paragraph(&mut self, text: &str) -> Result<(), BuildError> {
        self.ensure_open()?;
        self.close_list_if_open();
        self.fragments.push(format!("<p>{text}</p>\n"));
        Ok(())
    }

    fn body(&self) -> Result<String, BuildError> {
        self.ensure_started()?;
        Ok(self.fragments.concat())
    }

    fn full_page(&self) -> Result<String, BuildError> {
        let body = self.body()?;
        Ok(wrap_page(self.resolved_title(), &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn open_builder() -> StandardHtmlBuilder {
        let mut b = StandardHtmlBuilder::new();
        b.start(None);
        b
    }

    fn ended_builder() -> StandardHtmlBuilder {
        let mut b = open_builder();
        b.end().unwrap();
        b
    }

    #[test]
    fn new_builder_is_not_started() {
        let b = StandardHtmlBuilder::new();
        assert_eq!(b.lifecycle(), Lifecycle::NotStarted);
        assert!(!b.is_list_open());
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(5)]
    #[case(6)]
    fn heading_fragment_for_each_level(#[case] level: u8) {
        let mut b = open_builder();
        b.add_heading("Hello", level).unwrap();
        let body = b.body().unwrap();
        assert!(body.ends_with(&format!("<h{level}>Hello</h{level}>\n")));
    }

    #[rstest]
    #[case(0)]
    #[case(7)]
    #[case(255)]
    fn heading_level_out_of_range(#[case] level: u8) {
        let mut b = open_builder();
        let err = b.add_heading("x", level).unwrap_err();
        assert_eq!(err, BuildError::HeadingLevelOutOfRange { level });
        assert!(err.is_range());
        assert_eq!(b.body().unwrap(), "");
    }

    #[test]
    fn state_is_checked_before_level() {
        let mut b = StandardHtmlBuilder::new();
        let err = b.add_heading("x", 9).unwrap_err();
        assert_eq!(err, StateError::NotStarted.into());

        let mut b = ended_builder();
        let err = b.add_heading("x", 0).unwrap_err();
        assert_eq!(err, StateError::AlreadyEnded.into());
    }

    #[test]
    fn list_items_in_order() {
        let mut b = open_builder();
        b.start_list().unwrap();
        b.add_list_item("a").unwrap();
        b.add_list_item("").unwrap();
        b.end_list().unwrap();
        assert_eq!(b.body().unwrap(), "<ul>\n<li>a</li>\n<li></li>\n</ul>\n");
        assert!(!b.is_list_open());
    }

    #[test]
    fn nested_list_rejected() {
        let mut b = open_builder();
        b.start_list().unwrap();
        let err = b.start_list().unwrap_err();
        assert_eq!(err, StateError::ListAlreadyOpen.into());
        assert_eq!(b.body().unwrap(), "<ul>\n");
    }

    #[test]
    fn list_item_without_list() {
        let mut b = open_builder();
        let err = b.add_list_item("a").unwrap_err();
        assert_eq!(err.to_string(), "no open list to add item");
    }

    #[test]
    fn end_list_is_not_idempotent() {
        let mut b = open_builder();
        b.start_list().unwrap();
        b.end_list().unwrap();
        let err = b.end_list().unwrap_err();
        assert_eq!(err.to_string(), "no open list to end");
        assert_eq!(b.body().unwrap(), "<ul>\n</ul>\n");
    }

    #[rstest]
    #[case::heading(|b: &mut StandardHtmlBuilder| b.add_heading("H", 2).unwrap(), "<h2>H</h2>\n")]
    #[case::paragraph(|b: &mut StandardHtmlBuilder| b.add_paragraph("P").unwrap(), "<p>P</p>\n")]
    #[case::end(|b: &mut StandardHtmlBuilder| b.end().unwrap(), "")]
    fn open_list_closed_exactly_once(
        #[case] trigger: fn(&mut StandardHtmlBuilder),
        #[case] tail: &str,
    ) {
        let mut b = open_builder();
        b.start_list().unwrap();
        b.add_list_item("a").unwrap();
        trigger(&mut b);

        let body = b.body().unwrap();
        assert_eq!(body, format!("<ul>\n<li>a</li>\n</ul>\n{tail}"));
        assert_eq!(body.matches("</ul>").count(), 1);
        assert!(!b.is_list_open());
    }

    #[test]
    fn repeated_triggers_do_not_duplicate_close() {
        let mut b = open_builder();
        b.start_list().unwrap();
        b.add_list_item("a").unwrap();
        b.add_paragraph("one").unwrap();
        b.add_paragraph("two").unwrap();
        b.add_heading("three", 3).unwrap();
        b.end().unwrap();
        assert_eq!(
            b.body().unwrap(),
            "<ul>\n<li>a</li>\n</ul>\n<p>one</p>\n<p>two</p>\n<h3>three</h3>\n"
        );
    }

    #[test]
    fn empty_paragraph_allowed() {
        let mut b = open_builder();
        b.add_paragraph("").unwrap();
        assert_eq!(b.body().unwrap(), "<p></p>\n");
    }

    #[test]
    fn body_is_read_only_and_idempotent() {
        let mut b = open_builder();
        b.start_list().unwrap();
        b.add_list_item("a").unwrap();

        let first = b.body().unwrap();
        let second = b.body().unwrap();
        assert_eq!(first, second);
        // An unterminated list is reported as-is.
        assert_eq!(first, "<ul>\n<li>a</li>\n");
        assert!(b.is_list_open());
    }

    #[test]
    fn end_twice_fails() {
        let mut b = ended_builder();
        assert_eq!(b.end().unwrap_err(), StateError::AlreadyEnded.into());
    }

    #[test]
    fn end_before_start_fails() {
        let mut b = StandardHtmlBuilder::new();
        assert_eq!(b.end().unwrap_err(), StateError::NotStarted.into());
    }

    #[rstest]
    #[case::not_started(StandardHtmlBuilder::new(), StateError::NotStarted)]
    #[case::ended(ended_builder(), StateError::AlreadyEnded)]
    fn content_operations_rejected_outside_open(
        #[case] builder: StandardHtmlBuilder,
        #[case] expected: StateError,
    ) {
        let expected = BuildError::from(expected);

        let mut b = builder.clone();
        assert_eq!(b.add_heading("h", 1).unwrap_err(), expected);
        let mut b = builder.clone();
        assert_eq!(b.start_list().unwrap_err(), expected);
        let mut b = builder.clone();
        assert_eq!(b.add_list_item("i").unwrap_err(), expected);
        let mut b = builder.clone();
        assert_eq!(b.end_list().unwrap_err(), expected);
        let mut b = builder.clone();
        assert_eq!(b.add_paragraph("p").unwrap_err(), expected);
        assert!(expected.is_invalid_state());
    }

    #[test]
    fn readers_fail_before_start() {
        let b = StandardHtmlBuilder::new();
        assert_eq!(b.body().unwrap_err(), StateError::NotStarted.into());
        assert_eq!(b.full_page().unwrap_err(), StateError::NotStarted.into());
    }

    #[test]
    fn readers_work_before_and_after_end() {
        let mut b = open_builder();
        b.add_paragraph("x").unwrap();
        let before = b.full_page().unwrap();
        b.end().unwrap();
        let after = b.full_page().unwrap();
        assert_eq!(before, after);
        assert_eq!(b.body().unwrap(), "<p>x</p>\n");
    }

    #[test]
    fn explicit_title_wins() {
        let mut b = StandardHtmlBuilder::new();
        b.start(Some("Explicit"));
        b.add_heading("First", 1).unwrap();
        b.end().unwrap();
        assert_eq!(b.resolved_title(), "Explicit");
        assert!(b.full_page().unwrap().contains("<title>Explicit</title>"));
    }

    #[test]
    fn first_h1_captured_once() {
        let mut b = open_builder();
        b.add_heading("Sub", 2).unwrap();
        b.add_heading("First", 1).unwrap();
        b.add_heading("Second", 1).unwrap();
        assert_eq!(b.resolved_title(), "First");
    }

    #[test]
    fn fallback_title_without_h1() {
        let mut b = open_builder();
        b.add_heading("Only a subheading", 2).unwrap();
        b.end().unwrap();
        assert!(b.full_page().unwrap().contains("<title>Document</title>"));
    }

    #[test]
    fn empty_document_is_balanced() {
        let b = ended_builder();
        assert_eq!(b.body().unwrap(), "");
        let page = b.full_page().unwrap();
        assert!(page.starts_with("<!DOCTYPE html>\n"));
        assert!(page.contains("<meta charset=\"utf-8\">"));
        assert!(page.contains("<title>Document</title>"));
        assert!(page.contains("<body>\n</body>"));
    }

    #[test]
    fn restart_while_open_resets_everything() {
        let mut b = StandardHtmlBuilder::new();
        b.start(Some("Old"));
        b.start_list().unwrap();
        b.add_list_item("stale").unwrap();

        b.start(None);
        assert_eq!(b.lifecycle(), Lifecycle::Open);
        assert!(!b.is_list_open());
        assert_eq!(b.body().unwrap(), "");
        assert_eq!(b.resolved_title(), FALLBACK_TITLE);
    }

    #[test]
    fn restart_after_end_reopens() {
        let mut b = open_builder();
        b.add_heading("Old", 1).unwrap();
        b.end().unwrap();

        b.start(None);
        b.add_paragraph("fresh").unwrap();
        b.end().unwrap();
        assert_eq!(b.body().unwrap(), "<p>fresh</p>\n");
        assert_eq!(b.resolved_title(), FALLBACK_TITLE);
    }
}
