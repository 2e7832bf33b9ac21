/// Which map areas carry the "highlighted" class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Highlight {
    #[default]
    None,
    Region(String),
    All,
}

/// Active region plus highlight mode. The two are independent: highlight-all
/// leaves the active region alone, and selecting a region replaces both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    active: Option<String>,
    highlight: Highlight,
}

impl Selection {
    pub fn select(&mut self, id: &str) {
        self.active = Some(id.to_string());
        self.highlight = Highlight::Region(id.to_string());
    }

    pub fn highlight_all(&mut self) {
        self.highlight = Highlight::All;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    pub fn is_highlighted(&self, id: &str) -> bool {
        match &self.highlight {
            Highlight::None => false,
            Highlight::Region(region) => region == id,
            Highlight::All => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Highlight, Selection};

    #[test]
    fn selecting_replaces_previous_region() {
        let mut selection = Selection::default();
        selection.select("a");
        selection.select("b");
        assert_eq!(selection.active(), Some("b"));
        assert!(!selection.is_active("a"));
        assert!(selection.is_highlighted("b"));
        assert!(!selection.is_highlighted("a"));
    }

    #[test]
    fn highlight_all_keeps_active_region() {
        let mut selection = Selection::default();
        selection.select("a");
        selection.highlight_all();
        assert_eq!(selection.active(), Some("a"));
        assert!(selection.is_highlighted("a"));
        assert!(selection.is_highlighted("z"));
    }

    #[test]
    fn select_after_highlight_all_narrows_highlight() {
        let mut selection = Selection::default();
        selection.highlight_all();
        selection.select("c");
        assert_eq!(selection.highlight(), &Highlight::Region("c".to_string()));
    }

    #[test]
    fn clear_drops_everything() {
        let mut selection = Selection::default();
        selection.select("a");
        selection.highlight_all();
        selection.clear();
        assert_eq!(selection.active(), None);
        assert_eq!(selection.highlight(), &Highlight::None);
    }
}
