use super::{DrawCmd, LinesCmd, PointsCmd, TrianglesCmd};

/// Recorded draw stream for one frame, painted in insertion order.
///
/// `clear()` keeps the outer allocation so a warmed list does not reallocate
/// its item vector each frame.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    /// Pushes a command; empty commands are dropped.
    pub fn push(&mut self, cmd: DrawCmd) {
        if cmd.vertex_count() == 0 {
            return;
        }
        self.items.push(cmd);
    }

    pub fn lines(&mut self, cmd: LinesCmd) {
        self.push(DrawCmd::Lines(cmd));
    }

    pub fn triangles(&mut self, cmd: TrianglesCmd) {
        self.push(DrawCmd::Triangles(cmd));
    }

    pub fn points(&mut self, cmd: PointsCmd) {
        self.push(DrawCmd::Points(cmd));
    }

    /// Iterates line commands with their paint-order index.
    pub fn iter_lines(&self) -> impl Iterator<Item = (usize, &LinesCmd)> {
        self.items.iter().enumerate().filter_map(|(i, c)| match c {
            DrawCmd::Lines(l) => Some((i, l)),
            _ => None,
        })
    }

    pub fn iter_triangles(&self) -> impl Iterator<Item = (usize, &TrianglesCmd)> {
        self.items.iter().enumerate().filter_map(|(i, c)| match c {
            DrawCmd::Triangles(t) => Some((i, t)),
            _ => None,
        })
    }

    pub fn iter_points(&self) -> impl Iterator<Item = (usize, &PointsCmd)> {
        self.items.iter().enumerate().filter_map(|(i, c)| match c {
            DrawCmd::Points(p) => Some((i, p)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::scene::{BlendMode, Vertex};

    fn v(x: f32) -> Vertex {
        Vertex::new([x, 0.0, 0.0], Color::from_hex(0xffffff))
    }

    #[test]
    fn empty_commands_are_dropped() {
        let mut list = DrawList::new();
        list.lines(LinesCmd::default());
        list.points(PointsCmd { points: vec![], size: 0.1, blend: BlendMode::Additive });
        assert!(list.is_empty());
    }

    #[test]
    fn preserves_insertion_order() {
        let mut list = DrawList::new();
        list.lines(LinesCmd { vertices: vec![v(0.0), v(1.0)], blend: BlendMode::Alpha });
        list.points(PointsCmd { points: vec![v(2.0)], size: 0.1, blend: BlendMode::Additive });
        list.triangles(TrianglesCmd { vertices: vec![v(0.0), v(1.0), v(2.0)], blend: BlendMode::Alpha });

        assert_eq!(list.len(), 3);
        assert!(matches!(list.items()[0], DrawCmd::Lines(_)));
        assert!(matches!(list.items()[1], DrawCmd::Points(_)));
        assert!(matches!(list.items()[2], DrawCmd::Triangles(_)));
    }

    #[test]
    fn typed_iterators_report_paint_index() {
        let mut list = DrawList::new();
        list.points(PointsCmd { points: vec![v(2.0)], size: 0.1, blend: BlendMode::Additive });
        list.lines(LinesCmd { vertices: vec![v(0.0), v(1.0)], blend: BlendMode::Alpha });

        let lines: Vec<usize> = list.iter_lines().map(|(i, _)| i).collect();
        let points: Vec<usize> = list.iter_points().map(|(i, _)| i).collect();
        assert_eq!(lines, vec![1]);
        assert_eq!(points, vec![0]);
        assert_eq!(list.iter_triangles().count(), 0);
    }

    #[test]
    fn clear_empties_the_list() {
        let mut list = DrawList::new();
        list.lines(LinesCmd { vertices: vec![v(0.0), v(1.0)], blend: BlendMode::Alpha });
        list.clear();
        assert!(list.is_empty());
    }
}
