//! Off-screen grid of styled cells that views draw into.
//!
//! A cell holds one display cluster: a base character plus the marks that
//! attach to it (variation selectors, joiners, the second half of a flag).
//! Two-column clusters put an empty continuation cell to their right, which
//! the renderer never prints.

use arrayvec::ArrayString;
use unicode_width::UnicodeWidthChar;

/// Bytes available for one cell's cluster. Longer clusters keep their head.
pub const SYMBOL_CAP: usize = 16;

pub type Symbol = ArrayString<SYMBOL_CAP>;

const ZWJ: char = '\u{200D}';
const VS16: char = '\u{FE0F}';

/// Truecolor value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Colors and weight applied to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        }
    }
}

impl CellStyle {
    pub const fn fg(fg: Rgb) -> Self {
        Self {
            fg,
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dimmed(self) -> Self {
        Self { dim: true, ..self }
    }
}

/// One terminal column: a display cluster or the right half of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub symbol: Symbol,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(' ', CellStyle::default())
    }
}

impl Cell {
    pub fn new(ch: char, style: CellStyle) -> Self {
        let mut symbol = Symbol::new();
        symbol.push(ch);
        Self { symbol, style }
    }

    /// Right half of a two-column cluster.
    pub fn continuation(style: CellStyle) -> Self {
        Self {
            symbol: Symbol::new(),
            style,
        }
    }

    pub fn is_continuation(&self) -> bool {
        self.symbol.is_empty()
    }

    pub fn symbol(&self) -> &str {
        self.symbol.as_str()
    }

    /// Base character of the cluster (a space for continuation cells).
    pub fn ch(&self) -> char {
        self.symbol.chars().next().unwrap_or(' ')
    }
}

fn is_regional_indicator(ch: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&ch)
}

fn is_zero_width(ch: char) -> bool {
    ch.width() == Some(0)
}

/// Split `s` into display clusters.
///
/// Zero-width marks stay with the preceding base character, a joiner pulls
/// in the character after it, and regional indicators pair into one flag.
pub fn clusters(s: &str) -> Clusters<'_> {
    Clusters { rest: s }
}

#[derive(Debug, Clone)]
pub struct Clusters<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Clusters<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest: &'a str = self.rest;
        let mut it = rest.char_indices();
        let (_, base) = it.next()?;
        let mut end = base.len_utf8();
        let mut prev = base;
        let mut flag_open = is_regional_indicator(base);

        for (i, ch) in it {
            let joined = prev == ZWJ;
            if flag_open && is_regional_indicator(ch) {
                flag_open = false;
            } else if !(joined || is_zero_width(ch)) {
                break;
            }
            end = i + ch.len_utf8();
            prev = ch;
        }

        let (head, tail) = rest.split_at(end);
        self.rest = tail;
        Some(head)
    }
}

/// Display width of one cluster in terminal columns (0, 1 or 2).
///
/// Emoji presentation selectors, joined sequences and flags are two
/// columns wide; anything else uses the base character's Unicode width.
pub fn cluster_width(cluster: &str) -> u16 {
    let Some(base) = cluster.chars().next() else {
        return 0;
    };
    if is_zero_width(base) {
        return 0;
    }
    if is_regional_indicator(base) || cluster.contains(VS16) || cluster.contains(ZWJ) {
        return 2;
    }
    base.width().unwrap_or(0).min(2) as u16
}

/// Display width of a string in terminal columns.
pub fn str_width(s: &str) -> u16 {
    clusters(s).fold(0u16, |acc, c| acc.saturating_add(cluster_width(c)))
}

/// Row-major grid of cells, one per terminal column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer, keeping the allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell::new(ch, style));
    }

    /// Write a string starting at `(x, y)`, clipped to the buffer width.
    ///
    /// Returns the column after the last written cluster. A wide cluster
    /// that would straddle the right edge is not written.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        let mut cx = x;
        for cluster in clusters(s) {
            let w = cluster_width(cluster);
            if w == 0 {
                continue;
            }
            if cx.saturating_add(w) > self.width {
                break;
            }
            let mut symbol = Symbol::new();
            for ch in cluster.chars() {
                if symbol.try_push(ch).is_err() {
                    break;
                }
            }
            self.set(cx, y, Cell { symbol, style });
            if w == 2 {
                self.set(cx + 1, y, Cell::continuation(style));
            }
            cx += w;
        }
        cx
    }

    /// Write a decimal number without allocating.
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) -> u16 {
        let mut digits = [0u8; 10];
        let mut n = value;
        let mut len = 0;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            len += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        let mut cx = x;
        for &d in digits[..len].iter().rev() {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, d as char, style);
            cx += 1;
        }
        cx
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }
}
