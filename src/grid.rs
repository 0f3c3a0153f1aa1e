//! Tiling a document into a grid of copies, and editing such grids.
//!
//! A grid document has one group per cell directly below the root, each only
//! translated by the cell's offset. `tile` produces such documents and the
//! other operations only accept them.

use svg_dom::prelude::*;
use itertools::iproduct;
use thiserror::Error;
use std::sync::Arc;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("invalid grid size {rows}x{cols}, rows and columns must be at least 1")]
    InvalidGridSize { rows: usize, cols: usize },

    #[error("tile ({row}, {col}) is outside of the {rows}x{cols} grid")]
    TileOutOfRange { row: usize, col: usize, rows: usize, cols: usize },

    #[error("not a grid document: {0}")]
    NotAGrid(String),
}

/// Row and column of a tile, counted from the top left.
pub type Cell = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    pub cell_width: f64,
    pub cell_height: f64,
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

impl GridLayout {
    pub fn offset(&self, row: usize, col: usize) -> Vector {
        vec(col as f64 * self.cell_width, row as f64 * self.cell_height)
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn check(&self, (row, col): Cell) -> Result<(), GridError> {
        if self.contains(row, col) {
            Ok(())
        } else {
            Err(GridError::TileOutOfRange { row, col, rows: self.rows, cols: self.cols })
        }
    }

    /// Index of the root item that holds each cell, row major.
    fn cells(&self, doc: &Document) -> Result<Vec<usize>, GridError> {
        let mut cells = vec![None; self.rows * self.cols];
        for (i, item) in doc.root.items.iter().enumerate() {
            let t = match **item {
                Item::G(ref g) if g.attrs.transform.is_translation() => g.attrs.transform.translation(),
                Item::G(_) => return Err(GridError::NotAGrid(format!("group {} is not only translated", i))),
                Item::Path(_) => return Err(GridError::NotAGrid(format!("item {} is a path, not a tile", i))),
            };
            let col = (t.x / self.cell_width).round();
            let row = (t.y / self.cell_height).round();
            let aligned = col >= 0. && row >= 0.
                && self.contains(row as usize, col as usize)
                && close(t.x, col * self.cell_width)
                && close(t.y, row * self.cell_height);
            if !aligned {
                return Err(GridError::NotAGrid(format!("group {} at ({}, {}) is off the raster", i, t.x, t.y)));
            }
            let slot = &mut cells[row as usize * self.cols + col as usize];
            if slot.is_some() {
                return Err(GridError::NotAGrid(format!("two groups at ({}, {})", t.x, t.y)));
            }
            *slot = Some(i);
        }
        cells.into_iter().collect::<Option<Vec<_>>>()
            .ok_or_else(|| GridError::NotAGrid("a cell has no group".into()))
    }

    /// Detects the layout of a document made by `tile`.
    pub fn of(doc: &Document) -> Result<GridLayout, GridError> {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for item in &doc.root.items {
            if let Item::G(ref g) = **item {
                let t = g.attrs.transform.translation();
                xs.push(t.x);
                ys.push(t.y);
            }
        }
        let distinct = |v: &mut Vec<f64>| {
            v.sort_by(|a, b| a.total_cmp(b));
            v.first().map_or(0, |_| 1 + v.windows(2).filter(|w| !close(w[0], w[1])).count())
        };
        let (cols, rows) = (distinct(&mut xs), distinct(&mut ys));
        if rows == 0 || cols == 0 {
            return Err(GridError::NotAGrid("no tiles".into()));
        }
        let layout = GridLayout {
            rows,
            cols,
            cell_width: doc.canvas.width / cols as f64,
            cell_height: doc.canvas.height / rows as f64,
        };
        if layout.rows * layout.cols != doc.root.items.len() {
            return Err(GridError::NotAGrid(format!(
                "{} items do not fill a {}x{} grid", doc.root.items.len(), rows, cols)));
        }
        layout.cells(doc)?;
        debug!("grid layout {:?}", layout);
        Ok(layout)
    }
}

fn tile_id(row: usize, col: usize) -> String {
    format!("tile-{}-{}", row, col)
}

/// What every tile holds: the root group, moved so the viewBox origin lands
/// on the tile origin.
fn tile_content(doc: &Document) -> Vec<Arc<Item>> {
    let mut content = doc.root.clone();
    let origin = doc.canvas.view_box.origin();
    if origin != Vector::default() {
        content.attrs.transform = Transform::translate(-origin.x, -origin.y).compose(&content.attrs.transform);
        content.source.retain(|a| a.name != "transform");
        content.source.push(Attribute::new("transform", content.attrs.transform.to_string()));
    }
    if content.source.is_empty() {
        content.items
    } else {
        vec![Arc::new(Item::G(content))]
    }
}

/// Repeats the document `rows` × `cols` times, each copy at its original size.
///
/// Ids inside the content are kept, so they repeat once per tile and
/// `Document::get_item` finds the copy in tile (0, 0).
pub fn tile(doc: &Document, rows: usize, cols: usize) -> Result<Document, GridError> {
    if rows < 1 || cols < 1 {
        return Err(GridError::InvalidGridSize { rows, cols });
    }
    let layout = GridLayout {
        rows,
        cols,
        cell_width: doc.canvas.width,
        cell_height: doc.canvas.height,
    };
    let content = tile_content(doc);
    let tiles = iproduct!(0 .. rows, 0 .. cols)
        .map(|(r, c)| {
            let offset = layout.offset(r, c);
            Arc::new(Item::G(TagG::translated(&tile_id(r, c), offset.x, offset.y, content.clone())))
        })
        .collect();
    let canvas = Canvas::new(cols as f64 * layout.cell_width, rows as f64 * layout.cell_height);
    debug!("tiled {}x{} into {}x{}", doc.canvas.width, doc.canvas.height, canvas.width, canvas.height);
    let root = TagG { items: tiles, .. TagG::default() };
    Ok(doc.with_content(root, canvas))
}

fn replace_contents(doc: &Document, edits: &[(usize, Vec<Arc<Item>>)]) -> Document {
    let mut items = doc.root.items.clone();
    for (index, content) in edits {
        if let Item::G(ref g) = *items[*index] {
            items[*index] = Arc::new(Item::G(g.with_items(content.clone())));
        }
    }
    doc.with_content(doc.root.with_items(items), doc.canvas.clone())
}

fn contents(doc: &Document, index: usize) -> Vec<Arc<Item>> {
    doc.root.items[index].children().to_vec()
}

/// Copies the content of tile `from` into tile `to`, replacing what was there.
/// The source tile stays as it is.
pub fn move_tile(doc: &Document, from: Cell, to: Cell) -> Result<Document, GridError> {
    let layout = GridLayout::of(doc)?;
    layout.check(from)?;
    layout.check(to)?;
    let cells = layout.cells(doc)?;
    let index = |(row, col): Cell| cells[row * layout.cols + col];

    debug!("copy tile {:?} to {:?}", from, to);
    Ok(replace_contents(doc, &[(index(to), contents(doc, index(from)))]))
}

/// Exchanges the contents of two tiles.
pub fn swap_tiles(doc: &Document, a: Cell, b: Cell) -> Result<Document, GridError> {
    let layout = GridLayout::of(doc)?;
    layout.check(a)?;
    layout.check(b)?;
    let cells = layout.cells(doc)?;
    let (ia, ib) = (cells[a.0 * layout.cols + a.1], cells[b.0 * layout.cols + b.1]);

    debug!("swap tiles {:?} and {:?}", a, b);
    Ok(replace_contents(doc, &[(ia, contents(doc, ib)), (ib, contents(doc, ia))]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use svg_draw::{resolve, document_bounds};

    const SOURCE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100" version="1.1">
        <defs><linearGradient id="lg"/></defs>
        <g id="art"><path id="dot" d="M10 10 L20 30"/></g>
    </svg>"##;

    const OTHER: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
        <path id="line" d="M50 50 h10"/>
    </svg>"#;

    fn source() -> Document {
        Document::parse(SOURCE).unwrap()
    }

    fn translation_of(doc: &Document, id: &str) -> Vector {
        match **doc.get_item(id).unwrap() {
            Item::G(ref g) => g.attrs.transform.translation(),
            ref other => panic!("{} is not a group: {:?}", id, other),
        }
    }

    fn content_ids(doc: &Document, id: &str) -> Vec<String> {
        doc.get_item(id).unwrap().children().iter()
            .map(|c| c.id().unwrap_or("-").to_owned())
            .collect()
    }

    #[test]
    fn two_by_three() {
        let grid = tile(&source(), 2, 3).unwrap();
        assert_eq!((grid.canvas.width, grid.canvas.height), (300., 200.));
        assert_eq!(grid.canvas.view_box, Rect::from_origin_size(0., 0., 300., 200.));
        assert_eq!(grid.root.items.len(), 6);
        assert_eq!(translation_of(&grid, "tile-0-0"), vec(0., 0.));
        assert_eq!(translation_of(&grid, "tile-1-2"), vec(200., 100.));

        let layout = GridLayout::of(&grid).unwrap();
        assert_eq!(layout, GridLayout { rows: 2, cols: 3, cell_width: 100., cell_height: 100. });
        assert_eq!(layout.offset(1, 2), vec(200., 100.));
        assert!(layout.contains(1, 2) && !layout.contains(2, 0));
    }

    fn x_range(b: BoundingBox) -> (f64, f64) {
        let r = b.rect().unwrap();
        (r.min_x, r.max_x)
    }

    #[test]
    fn tiles_keep_document_parts() {
        let grid = tile(&source(), 1, 2).unwrap();
        assert_eq!(grid.opaque, source().opaque);
        assert!(grid.root_attrs.contains(&Attribute::new("version", "1.1")));
        assert!(grid.root.source.is_empty());
        let paths = resolve(&grid);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[1].group_trail, ["tile-0-1", "art"]);
    }

    #[test]
    fn root_transform_and_style_stay_inside_each_tile() {
        let doc = Document::parse(r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100" id="drawing"
            transform="scale(2)" fill="#333333"><path d="M0 0 L10 10"/></svg>"##).unwrap();
        let grid = tile(&doc, 1, 2).unwrap();
        assert_eq!(grid.root.attrs.transform, Transform::default());
        assert!(grid.root.attrs.fill.is_none());

        let paths = resolve(&grid);
        assert_eq!(x_range(paths[0].bounds), (0., 20.));
        assert_eq!(x_range(paths[1].bounds), (100., 120.));
        assert!(paths.iter().all(|p| p.style.fill.to_string() == "#333333"));
        assert_eq!(GridLayout::of(&grid).unwrap().cols, 2);

        let reparsed = Document::parse(&write_document(&grid)).unwrap();
        assert_eq!(document_bounds(&reparsed), document_bounds(&grid));
        assert!(reparsed.get_item("drawing").is_none());
    }

    #[test]
    fn view_box_origin_moves_to_tile_origin() {
        let doc = Document::parse(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100" viewBox="50 50 100 100">
            <path d="M50 50 L150 150"/></svg>"#).unwrap();
        let grid = tile(&doc, 1, 2).unwrap();
        let vb = grid.canvas.view_box;
        assert_eq!(vb, Rect::from_origin_size(0., 0., 200., 100.));
        let paths = resolve(&grid);
        let r = paths[1].bounds.rect().unwrap();
        assert_eq!((r.min_x, r.min_y, r.max_x, r.max_y), (100., 0., 200., 100.));
        assert!(r.max_x <= vb.max_x && r.max_y <= vb.max_y);

        let layout = GridLayout::of(&grid).unwrap();
        assert_eq!(translation_of(&grid, "tile-0-1"), layout.offset(0, 1));
        let reparsed = Document::parse(&write_document(&grid)).unwrap();
        assert_eq!(document_bounds(&reparsed), document_bounds(&grid));
    }

    #[test]
    fn repeated_ids_find_first_tile() {
        // tile (1,1) gets its own copy of the same ids
        let grid = replace_contents(&tile(&source(), 2, 2).unwrap(), &[(3, source().root.items.clone())]);
        let first = match **grid.get_item("tile-0-0").unwrap() {
            Item::G(ref g) => g.items[0].clone(),
            _ => unreachable!(),
        };
        assert!(Arc::ptr_eq(grid.get_item("art").unwrap(), &first));
    }

    #[test]
    fn invalid_sizes() {
        assert!(matches!(tile(&source(), 0, 3), Err(GridError::InvalidGridSize { rows: 0, cols: 3 })));
        assert!(matches!(tile(&source(), 2, 0), Err(GridError::InvalidGridSize { .. })));
    }

    #[test]
    fn single_tile_has_same_bounds() {
        let doc = source();
        let grid = tile(&doc, 1, 1).unwrap();
        assert_eq!(document_bounds(&grid), document_bounds(&doc).translated(0., 0.));
        assert_eq!((grid.canvas.width, grid.canvas.height), (doc.canvas.width, doc.canvas.height));
    }

    #[test]
    fn bounds_of_grid() {
        let grid = tile(&source(), 2, 3).unwrap();
        let r = document_bounds(&grid).rect().unwrap();
        assert_eq!((r.min_x, r.min_y, r.max_x, r.max_y), (10., 10., 220., 130.));
    }

    #[test]
    fn copy_tile() {
        let other = Document::parse(OTHER).unwrap();
        let mut grid = tile(&source(), 2, 3).unwrap();
        // put different content into (0,0) so the copy is visible
        grid = replace_contents(&grid, &[(0, other.root.items.clone())]);

        let moved = move_tile(&grid, (0, 0), (1, 2)).unwrap();
        assert_eq!(content_ids(&moved, "tile-0-0"), ["line"]);
        assert_eq!(content_ids(&moved, "tile-1-2"), ["line"]);
        assert_eq!(content_ids(&moved, "tile-1-1"), ["art"]);
        assert_eq!(translation_of(&moved, "tile-0-0"), vec(0., 0.));
        assert_eq!(translation_of(&moved, "tile-1-2"), vec(200., 100.));
        assert_eq!(moved.canvas, grid.canvas);

        // the copied content is drawn at the destination
        let at_dest = resolve(&moved).into_iter()
            .find(|p| p.group_trail.first() == Some(&"tile-1-2"))
            .unwrap();
        let r = at_dest.bounds.rect().unwrap();
        assert_eq!((r.min_x, r.min_y, r.max_x), (250., 150., 260.));

        // the source is untouched
        assert_eq!(content_ids(&grid, "tile-1-2"), ["art"]);
    }

    #[test]
    fn copy_is_idempotent() {
        let grid = tile(&source(), 2, 3).unwrap();
        let once = move_tile(&grid, (0, 1), (1, 0)).unwrap();
        let twice = move_tile(&once, (0, 1), (1, 0)).unwrap();
        assert_eq!(write_document(&once), write_document(&twice));

        let same = move_tile(&grid, (1, 1), (1, 1)).unwrap();
        assert_eq!(write_document(&same), write_document(&grid));
    }

    #[test]
    fn out_of_range() {
        let grid = tile(&source(), 2, 3).unwrap();
        match move_tile(&grid, (5, 5), (0, 0)) {
            Err(GridError::TileOutOfRange { row: 5, col: 5, rows: 2, cols: 3 }) => {}
            r => panic!("expected TileOutOfRange, got {:?}", r.map(|_| ())),
        }
        assert!(matches!(move_tile(&grid, (0, 0), (2, 0)), Err(GridError::TileOutOfRange { .. })));
        assert!(matches!(swap_tiles(&grid, (0, 3), (0, 0)), Err(GridError::TileOutOfRange { .. })));
    }

    #[test]
    fn not_a_grid() {
        let other = Document::parse(OTHER).unwrap();
        assert!(matches!(GridLayout::of(&other), Err(GridError::NotAGrid(_))));
        assert!(matches!(move_tile(&other, (0, 0), (0, 0)), Err(GridError::NotAGrid(_))));

        let rotated = Document::parse(r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100">
            <g transform="translate(0,0)"/><g transform="rotate(90)"/></svg>"#).unwrap();
        assert!(matches!(GridLayout::of(&rotated), Err(GridError::NotAGrid(_))));

        let misaligned = Document::parse(r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100">
            <g transform="translate(0,0)"/><g transform="translate(30,0)"/></svg>"#).unwrap();
        assert!(matches!(GridLayout::of(&misaligned), Err(GridError::NotAGrid(_))));

        let missing = Document::parse(r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="200">
            <g transform="translate(0,0)"/><g transform="translate(100,0)"/><g transform="translate(0,100)"/></svg>"#).unwrap();
        assert!(matches!(GridLayout::of(&missing), Err(GridError::NotAGrid(_))));
    }

    #[test]
    fn swap() {
        let other = Document::parse(OTHER).unwrap();
        let grid = replace_contents(&tile(&source(), 1, 2).unwrap(), &[(1, other.root.items.clone())]);
        let swapped = swap_tiles(&grid, (0, 0), (0, 1)).unwrap();
        assert_eq!(content_ids(&swapped, "tile-0-0"), ["line"]);
        assert_eq!(content_ids(&swapped, "tile-0-1"), ["art"]);
    }

    #[test]
    fn written_grid_is_still_a_grid() {
        let grid = tile(&source(), 2, 2).unwrap();
        let reparsed = Document::parse(&write_document(&grid)).unwrap();
        assert_eq!(GridLayout::of(&reparsed).unwrap(), GridLayout::of(&grid).unwrap());
        let moved = move_tile(&reparsed, (0, 0), (1, 1)).unwrap();
        assert_eq!(document_bounds(&moved), document_bounds(&grid));
    }
}
