//! Screen: a grid of styled cells representing one frame.
//!
//! Cells are stored in a contiguous `Vec` in row-major order. The renderer
//! writes a full frame into the grid; the terminal layer turns it into ANSI
//! in a single flush.

use bitflags::bitflags;

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

bitflags! {
    /// Cell display attributes.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellAttrs: u8 {
        /// Reversed colors (used for the drawn cursor).
        const REVERSE = 0b0000_0001;
        /// Bold text.
        const BOLD = 0b0000_0010;
        /// Dim/faint text.
        const DIM = 0b0000_0100;
    }
}

impl std::fmt::Debug for CellAttrs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A single screen cell: one character with its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The character to display.
    pub ch: char,
    /// Foreground color.
    pub fg: Rgb,
    /// Display attributes.
    pub attrs: CellAttrs,
}

impl Cell {
    /// An empty cell (space, white, no attributes).
    pub const EMPTY: Self = Self {
        ch: ' ',
        fg: Rgb::WHITE,
        attrs: CellAttrs::empty(),
    };

    /// Create a cell with the given character and color.
    pub const fn new(ch: char, fg: Rgb) -> Self {
        Self {
            ch,
            fg,
            attrs: CellAttrs::empty(),
        }
    }

    /// Return the cell with attributes added.
    #[must_use]
    pub const fn with_attrs(mut self, attrs: CellAttrs) -> Self {
        self.attrs = attrs;
        self
    }
}

/// A frame-sized grid of cells.
#[derive(Debug, Clone)]
pub struct Screen {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Screen {
    /// Create a cleared screen with the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![Cell::EMPTY; width * height],
            width,
            height,
        }
    }

    /// Screen width in columns.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Screen height in rows.
    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Get a cell; `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Set a cell. Writes outside the grid are silently clipped.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    /// Add attributes to the cell at (x, y), if in bounds.
    pub fn add_attrs(&mut self, x: usize, y: usize, attrs: CellAttrs) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x].attrs |= attrs;
        }
    }

    /// Write a string starting at (x, y), clipping at the right edge.
    ///
    /// Returns the column after the last written cell. Wide characters
    /// advance by their display width.
    pub fn put_str(&mut self, x: usize, y: usize, text: &str, fg: Rgb, attrs: CellAttrs) -> usize {
        let mut col = x;
        for ch in text.chars() {
            if col >= self.width {
                break;
            }
            let width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1).max(1);
            self.set(col, y, Cell::new(ch, fg).with_attrs(attrs));
            col += width;
        }
        col
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Resize the grid, clearing its contents.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::EMPTY; width * height];
    }

    /// Iterate over rows of cells.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Reconstruct a row as a string (testing aid).
    #[cfg(test)]
    pub fn row_text(&self, y: usize) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y).map(|cell| cell.ch))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_new_is_clear() {
        let screen = Screen::new(10, 2);
        assert_eq!(screen.get(0, 0), Some(&Cell::EMPTY));
        assert_eq!(screen.get(9, 1), Some(&Cell::EMPTY));
        assert_eq!(screen.get(10, 0), None);
    }

    #[test]
    fn test_put_str_clips_at_edge() {
        let mut screen = Screen::new(4, 1);
        let next = screen.put_str(2, 0, "abcdef", Rgb::WHITE, CellAttrs::empty());
        assert_eq!(next, 4);
        assert_eq!(screen.row_text(0), "  ab");
    }

    #[test]
    fn test_put_str_wide_char_advances_two() {
        let mut screen = Screen::new(10, 1);
        let next = screen.put_str(0, 0, "日x", Rgb::WHITE, CellAttrs::empty());
        assert_eq!(next, 3);
        assert_eq!(screen.get(2, 0).unwrap().ch, 'x');
    }

    #[test]
    fn test_out_of_bounds_set_is_clipped() {
        let mut screen = Screen::new(2, 2);
        screen.set(5, 5, Cell::new('x', Rgb::WHITE));
        assert_eq!(screen.get(1, 1), Some(&Cell::EMPTY));
    }

    #[test]
    fn test_add_attrs() {
        let mut screen = Screen::new(2, 1);
        screen.add_attrs(0, 0, CellAttrs::REVERSE);
        assert!(screen.get(0, 0).unwrap().attrs.contains(CellAttrs::REVERSE));
    }

    #[test]
    fn test_resize_clears() {
        let mut screen = Screen::new(2, 2);
        screen.set(0, 0, Cell::new('x', Rgb::WHITE));
        screen.resize(3, 3);
        assert_eq!(screen.get(0, 0), Some(&Cell::EMPTY));
        assert_eq!(screen.width(), 3);
    }
}
