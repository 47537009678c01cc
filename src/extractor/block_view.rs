use std::ops::Deref;

//=====================================================================
// Non-owning view of one block of the XSS array. Keeps track of where
// in XSS the block starts so locators stored in the block can be
// related back to the full array.
//=====================================================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockView<'a> {
    offset: usize,
    data: &'a [f64],
}

impl<'a> Deref for BlockView<'a> {
    type Target = [f64];
    fn deref(&self) -> &Self::Target {
        self.data
    }
}

impl<'a> BlockView<'a> {
    // View of `length` entries of `xss` starting at `offset`. The range
    // is clipped to the array, so a view never reaches past its end.
    pub(crate) fn new(xss: &'a [f64], offset: usize, length: usize) -> Self {
        let start = offset.min(xss.len());
        let end = offset.saturating_add(length).min(xss.len());
        Self { offset: start, data: &xss[start..end] }
    }

    pub fn empty() -> Self {
        Self { offset: 0, data: &[] }
    }

    // 0-based index of the first entry in the XSS array
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    // 0-based index one past the last entry in the XSS array
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.data.len()
    }

    #[inline]
    pub fn data(&self) -> &'a [f64] {
        self.data
    }

    // A narrower view, `start` is relative to this view
    pub fn sub_view(&self, start: usize, length: usize) -> BlockView<'a> {
        let start = start.min(self.data.len());
        let end = start.saturating_add(length).min(self.data.len());
        BlockView { offset: self.offset + start, data: &self.data[start..end] }
    }
}

impl<'a> std::fmt::Display for BlockView<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BlockView([{}, {}))", self.offset, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_is_clipped() {
        let xss = [0.0, 1.0, 2.0, 3.0, 4.0];
        let view = BlockView::new(&xss, 3, 10);
        assert_eq!(view.offset(), 3);
        assert_eq!(view.len(), 2);
        assert_eq!(view.end(), xss.len());

        let view = BlockView::new(&xss, 7, 1);
        assert!(view.is_empty());
        assert!(view.end() <= xss.len());
    }

    #[test]
    fn test_sub_view() {
        let xss = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let view = BlockView::new(&xss, 1, 4);
        let sub = view.sub_view(1, 2);
        assert_eq!(sub.offset(), 2);
        assert_eq!(&*sub, &[2.0, 3.0]);
        assert!(view.sub_view(4, 2).is_empty());
    }
}
