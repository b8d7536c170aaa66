//! Chapter (unit pages) state

use crate::api::{ApiError, Page, UnitId};

use super::{Load, ScrollState};

/// State of a chapter view (`/chapter/:id`)
#[derive(Debug, Clone)]
pub struct ChapterView {
    pub unit_id: UnitId,
    /// Pages in ascending `page_number` order
    pub pages: Load<Vec<Page>>,
    pub scroll: ScrollState,
}

impl ChapterView {
    pub const LOADING: &'static str = "Loading pages...";
    pub const FAILED: &'static str = "Failed to load pages";

    pub fn new(unit_id: UnitId) -> Self {
        Self { unit_id, pages: Load::Loading, scroll: ScrollState::default() }
    }

    /// Store the outcome of `GET /unit-pages/{id}`
    pub fn apply(&mut self, result: Result<Vec<Page>, ApiError>) {
        self.pages = match result {
            Ok(mut pages) => {
                // Stable, so equal page numbers keep server order
                pages.sort_by_key(|p| p.page_number);
                tracing::info!(unit = %self.unit_id, count = pages.len(), "pages loaded");
                Load::Ready(pages)
            }
            Err(e) => {
                tracing::warn!(unit = %self.unit_id, status = ?e.status(), error = %e, "failed to load pages");
                Load::Failed(Self::FAILED)
            }
        };
        self.scroll = ScrollState::default();
    }

    /// Text to read aloud: all page contents joined by a space
    ///
    /// `None` when there is nothing to say.
    pub fn speech_text(&self) -> Option<String> {
        let pages = self.pages.ready()?;
        let text = pages.iter().map(|p| p.content.as_str()).collect::<Vec<_>>().join(" ");
        if text.is_empty() { None } else { Some(text) }
    }

    pub fn heading(&self) -> String {
        format!("Chapter Content (Unit {})", self.unit_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn loaded(pages: Vec<Page>) -> ChapterView {
        let mut view = ChapterView::new(UnitId(1));
        view.apply(Ok(pages));
        view
    }

    #[test]
    fn pages_are_sorted_by_number() {
        let view = loaded(vec![Page::new(1, 3, "c"), Page::new(2, 1, "a"), Page::new(3, 2, "b")]);
        let numbers: Vec<i64> = view.pages.ready().unwrap().iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn failure_hides_content() {
        let mut view = ChapterView::new(UnitId(9));
        view.apply(Err(ApiError::MissingQuestions { detail: None }));
        assert_eq!(view.pages.error(), Some(ChapterView::FAILED));
        assert!(view.pages.ready().is_none());
        assert_eq!(view.speech_text(), None);
    }

    #[test]
    fn speech_text_joins_with_space() {
        let view = loaded(vec![Page::new(1, 1, "Hello"), Page::new(2, 2, "world.")]);
        assert_eq!(view.speech_text().as_deref(), Some("Hello world."));
    }

    #[test]
    fn speech_text_empty_is_none() {
        assert_eq!(loaded(vec![]).speech_text(), None);
        assert_eq!(loaded(vec![Page::new(1, 1, "")]).speech_text(), None);
    }

    #[test]
    fn speech_text_while_loading_is_none() {
        assert_eq!(ChapterView::new(UnitId(1)).speech_text(), None);
    }

    #[test]
    fn heading_names_unit() {
        assert_eq!(ChapterView::new(UnitId(4)).heading(), "Chapter Content (Unit 4)");
    }

    proptest! {
        #[test]
        fn any_page_set_renders_ascending_and_verbatim(
            raw in prop::collection::vec((0i64..50, "[ a-z\\n\\t]{0,12}"), 0..20)
        ) {
            let pages: Vec<Page> = raw
                .iter()
                .enumerate()
                .map(|(i, (n, content))| Page::new(i as i64, *n, content.clone()))
                .collect();
            let view = loaded(pages.clone());
            let sorted = view.pages.ready().unwrap();

            prop_assert_eq!(sorted.len(), pages.len());
            prop_assert!(sorted.windows(2).all(|w| w[0].page_number <= w[1].page_number));
            for page in sorted {
                let original = pages.iter().find(|p| p.id == page.id).unwrap();
                prop_assert_eq!(&page.content, &original.content);
            }
        }
    }
}
