/// Wrap-around cursor over a fixed number of options
///
/// Up from the first option goes to the last and down from the last goes
/// back to the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selector {
    len: usize,
    index: usize,
}

impl Selector {
    pub fn new(len: usize) -> Self {
        Selector { len, index: 0 }
    }

    /// Move selection up (wraps to bottom)
    pub fn select_previous(&mut self) {
        if self.len == 0 {
            return;
        }
        if self.index == 0 {
            self.index = self.len - 1;
        } else {
            self.index -= 1;
        }
    }

    /// Move selection down (wraps to top)
    pub fn select_next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_both_ways() {
        let mut s = Selector::new(3);
        s.select_previous();
        assert_eq!(s.index(), 2);
        s.select_next();
        assert_eq!(s.index(), 0);
        s.select(1);
        s.select(7);
        assert_eq!(s.index(), 1);
    }

    #[test]
    fn test_empty_selector_stays_put() {
        let mut s = Selector::new(0);
        s.select_next();
        s.select_previous();
        assert_eq!(s.index(), 0);
        assert!(s.is_empty());
    }
}
