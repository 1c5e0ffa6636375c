use serde::{Deserialize, Serialize};

pub const PAD_SIZE: f32 = 400.0;
pub const LINE_WIDTH: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Straight segment drawn between two pointer samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub segments: Vec<Segment>,
}

/// Practice paper for tracing characters. Mouse and touch input both come
/// in as pad-relative points.
#[derive(Debug, Clone)]
pub struct WritingPad {
    pub width: f32,
    pub height: f32,
    pub line_width: f32,
    strokes: Vec<Stroke>,
    pen: Option<Point>,
}

impl Default for WritingPad {
    fn default() -> Self {
        Self {
            width: PAD_SIZE,
            height: PAD_SIZE,
            line_width: LINE_WIDTH,
            strokes: Vec::new(),
            pen: None,
        }
    }
}

impl WritingPad {
    pub fn pen_down(&mut self, at: Point) {
        self.pen = Some(at);
        self.strokes.push(Stroke::default());
    }

    /// Extend the current stroke. Ignored while the pen is up.
    pub fn pen_move(&mut self, to: Point) -> Option<Segment> {
        let from = self.pen?;
        let segment = Segment { from, to };
        if let Some(stroke) = self.strokes.last_mut() {
            stroke.segments.push(segment);
        }
        self.pen = Some(to);
        Some(segment)
    }

    pub fn pen_up(&mut self) {
        self.pen = None;
        if self
            .strokes
            .last()
            .map(|stroke| stroke.segments.is_empty())
            .unwrap_or(false)
        {
            self.strokes.pop();
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.pen.is_some()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.pen = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_segments_between_samples() {
        let mut pad = WritingPad::default();
        pad.pen_down(Point::new(10.0, 10.0));
        pad.pen_move(Point::new(20.0, 10.0));
        let last = pad.pen_move(Point::new(20.0, 30.0)).unwrap();
        pad.pen_up();

        assert_eq!(last.from, Point::new(20.0, 10.0));
        assert_eq!(pad.strokes().len(), 1);
        assert_eq!(pad.strokes()[0].segments.len(), 2);
        assert!(!pad.is_drawing());
    }

    #[test]
    fn moves_without_pen_are_ignored() {
        let mut pad = WritingPad::default();
        assert!(pad.pen_move(Point::new(5.0, 5.0)).is_none());
        pad.pen_down(Point::new(1.0, 1.0));
        pad.pen_up();
        assert!(pad.strokes().is_empty());
    }

    #[test]
    fn clear_wipes_paper() {
        let mut pad = WritingPad::default();
        pad.pen_down(Point::new(0.0, 0.0));
        pad.pen_move(Point::new(1.0, 1.0));
        pad.clear();
        assert!(pad.strokes().is_empty());
        assert!(!pad.is_drawing());
        assert_eq!(pad.line_width, 12.0);
    }
}
