//! Character canvas the matrix view draws into.

/// What a cell depicts. The renderer picks colors per tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Background,
    LedOn,
    LedOff,
    Bezel,
    Label,
    Hint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub tone: Tone,
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            tone: Tone::Background,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Glyph>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Glyph::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize in place, keeping the allocation when it is large enough.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells
            .resize(width as usize * height as usize, Glyph::default());
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn put(&mut self, x: u16, y: u16, ch: char, tone: Tone) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Glyph { ch, tone };
        }
    }

    /// Write `s` from `(x, y)`, clipped at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, tone: Tone) {
        for (i, ch) in s.chars().enumerate() {
            let Some(cx) = x.checked_add(i as u16) else {
                break;
            };
            if cx >= self.width {
                break;
            }
            self.put(cx, y, ch, tone);
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Glyph::default());
    }

    /// Visible characters of row `y`, for tests.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|g| g.ch)
            .collect()
    }
}
