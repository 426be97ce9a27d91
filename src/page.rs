use crate::data_source::{DataOrigin, LoadedPools};
use log::warn;
use pool_structures::Pool;

/// Everything the page displays. Pools are replaced as a whole, never edited.
#[derive(Debug)]
pub struct Page {
    loading: bool,
    today: Vec<Pool>,
    yesterday: Vec<Pool>,
    origin: Option<DataOrigin>,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            loading: true,
            today: Vec::new(),
            yesterday: Vec::new(),
            origin: None,
        }
    }
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the outcome of the load and stops loading. Only the first outcome counts.
    pub fn finish_loading(&mut self, loaded: LoadedPools) {
        if !self.loading {
            warn!("Pools already loaded, ignoring a second outcome");
            return;
        }
        self.today = loaded.today;
        self.yesterday = loaded.yesterday;
        self.origin = Some(loaded.origin);
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn today(&self) -> &[Pool] {
        &self.today
    }

    pub fn yesterday(&self) -> &[Pool] {
        &self.yesterday
    }

    pub fn origin(&self) -> Option<DataOrigin> {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;

    fn loaded(origin: DataOrigin) -> LoadedPools {
        LoadedPools {
            today: fallback::today(),
            yesterday: Vec::new(),
            origin,
        }
    }

    #[test]
    fn starts_loading() {
        let page = Page::new();
        assert!(page.is_loading());
        assert!(page.today().is_empty());
        assert_eq!(None, page.origin());
    }

    #[test]
    fn loading_stops_once() {
        let mut page = Page::new();
        page.finish_loading(loaded(DataOrigin::Fallback));
        assert!(!page.is_loading());
        assert_eq!("pool-001", page.today()[0].id);
        assert!(page.yesterday().is_empty());

        page.finish_loading(LoadedPools {
            today: Vec::new(),
            yesterday: fallback::yesterday(),
            origin: DataOrigin::Live,
        });
        assert!(!page.is_loading());
        assert_eq!(Some(DataOrigin::Fallback), page.origin());
        assert_eq!(1, page.today().len());
        assert!(page.yesterday().is_empty());
    }
}
