/// Tolerance for float comparisons against the page bottom.
const EPSILON: f32 = 0.01;

/// Vertical write position and active page index for one layout run.
///
/// `y` is measured downward from the top of the printable area. It only grows within a
/// page; `new_page` is the only way back to zero.
#[derive(Debug, Clone)]
pub struct LayoutCursor {
    y: f32,
    page_index: usize,
    printable_height: f32,
}

impl LayoutCursor {
    pub fn new(printable_height: f32) -> Self {
        Self {
            y: 0.0,
            page_index: 0,
            printable_height,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn remaining(&self) -> f32 {
        (self.printable_height - self.y).max(0.0)
    }

    pub fn at_page_top(&self) -> bool {
        self.y <= EPSILON
    }

    /// True if a block of `height` placed now would end inside the printable area.
    pub fn fits(&self, height: f32) -> bool {
        self.y + height <= self.printable_height + EPSILON
    }

    pub fn advance(&mut self, height: f32) {
        debug_assert!(height >= 0.0, "cursor must not move upward");
        self.y += height;
    }

    pub fn new_page(&mut self) {
        self.y = 0.0;
        self.page_index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cursor_is_at_top_of_first_page() {
        let c = LayoutCursor::new(100.0);
        assert_eq!(c.page_index(), 0);
        assert!(c.at_page_top());
        assert_eq!(c.remaining(), 100.0);
    }

    #[test]
    fn test_fits_is_inclusive_of_bottom_edge() {
        let mut c = LayoutCursor::new(100.0);
        c.advance(60.0);
        assert!(c.fits(40.0));
        assert!(!c.fits(41.0));
    }

    #[test]
    fn test_new_page_resets_position_and_increments_index() {
        let mut c = LayoutCursor::new(100.0);
        c.advance(90.0);
        c.new_page();
        assert_eq!(c.page_index(), 1);
        assert_eq!(c.y(), 0.0);
        assert!(c.at_page_top());
    }
}
