//! Text metrics providers

mod estimated;
pub mod mock;

pub use estimated::EstimatedMetrics;
pub use mock::MockMetrics;

/// Greedy line filling shared by the built-in providers.
///
/// Widths are in whatever unit the provider measures in; words wider than
/// the line wrap onto as many lines as they need.
#[derive(Debug)]
pub(crate) struct LineFiller {
    line_width: f32,
    space_width: f32,
    current: f32,
    lines: u32,
}

impl LineFiller {
    pub(crate) fn new(line_width: f32, space_width: f32) -> Self {
        Self {
            line_width: line_width.max(f32::EPSILON),
            space_width,
            current: 0.0,
            lines: 0,
        }
    }

    pub(crate) fn push_word(&mut self, width: f32) {
        if self.lines == 0 {
            self.lines = 1;
        } else if self.current + self.space_width + width <= self.line_width {
            self.current += self.space_width + width;
            return;
        } else {
            self.lines += 1;
        }

        if width <= self.line_width {
            self.current = width;
            return;
        }

        let full = (width / self.line_width).floor();
        let rest = width - full * self.line_width;
        if rest > 0.0 {
            self.lines += full as u32;
            self.current = rest;
        } else {
            self.lines += full as u32 - 1;
            self.current = self.line_width;
        }
    }

    pub(crate) fn lines(&self) -> u32 {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_filler_wraps_greedily() {
        let mut filler = LineFiller::new(10.0, 1.0);
        for w in [3.0, 3.0, 3.0, 3.0] {
            filler.push_word(w);
        }
        // "aaa bbb" (7) + " ccc" would be 11 -> wrap; "ccc ddd" fits.
        assert_eq!(filler.lines(), 2);
    }

    #[test]
    fn test_line_filler_oversized_word() {
        let mut filler = LineFiller::new(10.0, 1.0);
        filler.push_word(25.0);
        assert_eq!(filler.lines(), 3);
        filler.push_word(4.0);
        // 5 units left on the third line: " dddd" fits exactly.
        assert_eq!(filler.lines(), 3);
    }

    #[test]
    fn test_line_filler_exact_multiple() {
        let mut filler = LineFiller::new(10.0, 1.0);
        filler.push_word(20.0);
        assert_eq!(filler.lines(), 2);
        filler.push_word(1.0);
        assert_eq!(filler.lines(), 3);
    }

    #[test]
    fn test_line_filler_empty() {
        let filler = LineFiller::new(10.0, 1.0);
        assert_eq!(filler.lines(), 0);
    }
}
