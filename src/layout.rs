//! Grow-to-fit text areas.
//!
//! A text area is sized by clearing its height and then setting it to the
//! height its content needs. Areas are passed in explicitly; nothing here
//! looks anything up globally.

pub trait TextArea {
    fn id(&self) -> &str;

    /// `None` clears any explicit height.
    fn set_height(&mut self, height: Option<u32>);

    /// Height the content needs at the current width.
    fn scroll_height(&self) -> u32;

    /// Called before resizing when the viewport width changes.
    fn reflow(&mut self, _viewport_width: usize) {}
}

pub fn resize_text_area<A: TextArea + ?Sized>(area: &mut A) {
    area.set_height(None);
    let height = area.scroll_height();
    area.set_height(Some(height));
    tracing::trace!(id = area.id(), height, "text area resized");
}

pub fn resize_text_areas<A: TextArea>(areas: &mut [A]) {
    for area in areas.iter_mut() {
        resize_text_area(area);
    }
}

/// Re-applies sizing to every registered area whenever the viewport changes.
pub struct ResizeListener<A> {
    areas: Vec<A>,
    viewport_width: usize,
}

impl<A: TextArea> ResizeListener<A> {
    pub fn new(areas: Vec<A>, viewport_width: usize) -> Self {
        let mut listener = Self {
            areas,
            viewport_width: 0,
        };
        listener.viewport_resized(viewport_width);
        listener
    }

    pub fn viewport_resized(&mut self, width: usize) {
        self.viewport_width = width;
        for area in self.areas.iter_mut() {
            area.reflow(width);
        }
        resize_text_areas(&mut self.areas);
    }

    pub fn areas(&self) -> &[A] {
        &self.areas
    }
}

/// A text block drawn in the terminal, one row per wrapped line.
#[derive(Debug, Clone)]
pub struct TerminalTextArea {
    id: String,
    content: String,
    width: usize,
    height: Option<u32>,
}

impl TerminalTextArea {
    pub fn new(id: impl Into<String>, content: impl Into<String>, width: usize) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            width: width.max(1),
            height: None,
        }
    }

    fn wrapped_lines(&self) -> Vec<String> {
        let mut rows = Vec::new();
        for line in self.content.lines() {
            let chars: Vec<char> = line.chars().collect();
            if chars.is_empty() {
                rows.push(String::new());
                continue;
            }
            for chunk in chars.chunks(self.width) {
                rows.push(chunk.iter().collect());
            }
        }
        rows
    }

    /// Rows to draw: exactly `height` of them once sized, padded or cut.
    pub fn rows(&self) -> Vec<String> {
        let mut rows = self.wrapped_lines();
        if let Some(height) = self.height {
            rows.resize(height as usize, String::new());
        }
        rows
    }

    /// Draw the area framed by a left gutter.
    pub fn render(&self) -> String {
        self.rows()
            .iter()
            .map(|row| format!("│ {row}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TextArea for TerminalTextArea {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_height(&mut self, height: Option<u32>) {
        self.height = height;
    }

    fn scroll_height(&self) -> u32 {
        self.wrapped_lines().len() as u32
    }

    fn reflow(&mut self, viewport_width: usize) {
        // two columns go to the gutter
        self.width = viewport_width.saturating_sub(2).max(1);
    }
}
