//! The ordered list of page surfaces a book is built from.

use std::fmt;

/// Opaque key of one page surface (an image name without extension).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Front,
    Back,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Front => "Front",
            Side::Back => "Back",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageContent {
    pub front: ContentId,
    pub back: ContentId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentManifest {
    pages: Vec<PageContent>,
}

/// Photo set shipped with the portfolio.
pub const PORTFOLIO_PICTURES: &[&str] = &[
    "DSC00680", "DSC00933", "DSC00966", "DSC00983", "DSC01011", "DSC01040", "DSC01064",
    "DSC01071", "DSC01103", "DSC01145", "DSC01420", "DSC01461", "DSC01489", "DSC02031",
    "DSC02064", "DSC02069",
];

impl ContentManifest {
    pub fn new(pages: Vec<PageContent>) -> Self {
        Self { pages }
    }

    /// Lay out a book: the cover backs onto `first`, `second` backs onto the
    /// first picture, the remaining pictures pair up front/back, and the last
    /// picture backs onto `back_cover`.
    pub fn from_pictures(
        cover: &str,
        first: &str,
        second: &str,
        pictures: &[&str],
        back_cover: &str,
    ) -> Self {
        let mut pages = vec![PageContent {
            front: cover.into(),
            back: first.into(),
        }];
        let Some((last, _)) = pictures.split_last() else {
            pages.push(PageContent {
                front: second.into(),
                back: back_cover.into(),
            });
            return Self { pages };
        };
        pages.push(PageContent {
            front: second.into(),
            back: pictures[0].into(),
        });
        let mut i = 1;
        while i + 1 < pictures.len() {
            pages.push(PageContent {
                front: pictures[i].into(),
                back: pictures[i + 1].into(),
            });
            i += 2;
        }
        pages.push(PageContent {
            front: (*last).into(),
            back: back_cover.into(),
        });
        Self { pages }
    }

    pub fn portfolio() -> Self {
        Self::from_pictures("bmw-cover", "bmw-01", "bmw-02", PORTFOLIO_PICTURES, "book-back")
    }

    pub fn pages(&self) -> &[PageContent] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portfolio_layout() {
        let m = ContentManifest::portfolio();
        // cover, second, 7 pairs from pictures[1..15], last
        assert_eq!(m.len(), 10);
        let p = m.pages();
        assert_eq!(p[0].front.as_str(), "bmw-cover");
        assert_eq!(p[0].back.as_str(), "bmw-01");
        assert_eq!(p[1].back.as_str(), "DSC00680");
        assert_eq!(p[2].front.as_str(), "DSC00933");
        assert_eq!(p[2].back.as_str(), "DSC00966");
        assert_eq!(p[8].front.as_str(), "DSC02031");
        assert_eq!(p[8].back.as_str(), "DSC02064");
        assert_eq!(p[9].front.as_str(), "DSC02069");
        assert_eq!(p[9].back.as_str(), "book-back");
    }

    #[test]
    fn no_pictures_still_closes_the_book() {
        let m = ContentManifest::from_pictures("c", "f", "s", &[], "b");
        assert_eq!(m.len(), 2);
        assert_eq!(m.pages()[1].back.as_str(), "b");
    }
}
