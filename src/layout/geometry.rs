use std::collections::BTreeMap;

use crate::{
    composition::model::LayoutSpec,
    foundation::{
        core::SlotRect,
        error::{FotorekError, FotorekResult},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Fixed geometry of one layout: grid shape plus canvas size.
///
/// Slot capacity is always `columns * rows`; it is derived, never stored.
pub struct LayoutEntry {
    /// Slot columns.
    pub columns: u32,
    /// Slot rows.
    pub rows: u32,
    /// Output canvas width in pixels.
    pub canvas_width: u32,
    /// Output canvas height in pixels.
    pub canvas_height: u32,
}

impl LayoutEntry {
    /// Build an entry.
    pub const fn new(columns: u32, rows: u32, canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            columns,
            rows,
            canvas_width,
            canvas_height,
        }
    }

    /// Number of photos this layout holds.
    pub fn max_slots(&self) -> usize {
        (self.columns as usize) * (self.rows as usize)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// Single source of truth mapping each [`LayoutSpec`] to its geometry.
///
/// Both the final export and any reduced-size preview read from this table.
pub struct LayoutTable {
    entries: BTreeMap<LayoutSpec, LayoutEntry>,
}

impl Default for LayoutTable {
    fn default() -> Self {
        let entries = BTreeMap::from([
            (LayoutSpec::Single, LayoutEntry::new(1, 1, 1200, 1800)),
            (LayoutSpec::Vertical4, LayoutEntry::new(1, 4, 600, 1800)),
            (LayoutSpec::Horizontal2x2, LayoutEntry::new(2, 2, 1200, 1800)),
            (LayoutSpec::Grid2x3, LayoutEntry::new(2, 3, 1200, 1800)),
        ]);
        Self { entries }
    }
}

impl LayoutTable {
    /// Look up the geometry of `layout`.
    pub fn get(&self, layout: LayoutSpec) -> FotorekResult<&LayoutEntry> {
        self.entries.get(&layout).ok_or_else(|| {
            FotorekError::validation(format!("layout table has no entry for '{layout}'"))
        })
    }

    /// Replace one entry.
    pub fn set(&mut self, layout: LayoutSpec, entry: LayoutEntry) {
        self.entries.insert(layout, entry);
    }

    /// Iterate entries in [`LayoutSpec`] order.
    pub fn iter(&self) -> impl Iterator<Item = (LayoutSpec, &LayoutEntry)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Every layout must be present with a non-empty grid and canvas.
    pub fn validate(&self) -> FotorekResult<()> {
        for layout in LayoutSpec::ALL {
            let e = self.get(layout)?;
            if e.columns == 0 || e.rows == 0 {
                return Err(FotorekError::validation(format!(
                    "layout '{layout}' must have at least one column and one row"
                )));
            }
            if e.canvas_width == 0 || e.canvas_height == 0 {
                return Err(FotorekError::validation(format!(
                    "layout '{layout}' canvas must be non-empty"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Resolved canvas and slot geometry for one layout.
pub struct StripGeometry {
    /// Layout this geometry was resolved for.
    pub layout: LayoutSpec,
    /// Canvas width.
    pub canvas_width: u32,
    /// Canvas height.
    pub canvas_height: u32,
    /// Slot columns.
    pub columns: u32,
    /// Slot rows.
    pub rows: u32,
    /// Outer and inter-slot padding.
    pub padding: u32,
    /// Height reserved at the bottom for the watermark.
    pub watermark_band_height: u32,
    /// Width of every slot.
    pub slot_width: u32,
    /// Height of every slot.
    pub slot_height: u32,
}

impl StripGeometry {
    /// Compute slot sizes for `layout`:
    ///
    /// - `slot_width = (canvas_width - padding*(columns+1)) / columns`
    /// - `slot_height = (canvas_height - band - padding*(rows+1)) / rows`
    ///
    /// Division floors; any remainder stays background.
    pub fn resolve(
        layout: LayoutSpec,
        table: &LayoutTable,
        padding: u32,
        watermark_band_height: u32,
    ) -> FotorekResult<Self> {
        let e = *table.get(layout)?;
        if e.columns == 0 || e.rows == 0 {
            return Err(FotorekError::render(format!(
                "layout '{layout}' has an empty grid"
            )));
        }

        let too_small = || {
            FotorekError::render(format!(
                "layout '{layout}' canvas {}x{} leaves no room for slots",
                e.canvas_width, e.canvas_height
            ))
        };
        let inner_w = i64::from(e.canvas_width) - i64::from(padding) * i64::from(e.columns + 1);
        let inner_h = i64::from(e.canvas_height)
            - i64::from(watermark_band_height)
            - i64::from(padding) * i64::from(e.rows + 1);
        if inner_w < i64::from(e.columns) || inner_h < i64::from(e.rows) {
            return Err(too_small());
        }

        let slot_width = u32::try_from(inner_w / i64::from(e.columns)).map_err(|_| too_small())?;
        let slot_height = u32::try_from(inner_h / i64::from(e.rows)).map_err(|_| too_small())?;

        Ok(Self {
            layout,
            canvas_width: e.canvas_width,
            canvas_height: e.canvas_height,
            columns: e.columns,
            rows: e.rows,
            padding,
            watermark_band_height,
            slot_width,
            slot_height,
        })
    }

    /// Number of photos this geometry holds.
    pub fn max_slots(&self) -> usize {
        (self.columns as usize) * (self.rows as usize)
    }

    /// Rectangle of slot `index`, filled row-major from the top-left.
    pub fn slot_rect(&self, index: usize) -> Option<SlotRect> {
        if index >= self.max_slots() {
            return None;
        }
        let columns = self.columns as usize;
        let col = (index % columns) as u32;
        let row = (index / columns) as u32;
        Some(SlotRect::new(
            self.padding + col * (self.slot_width + self.padding),
            self.padding + row * (self.slot_height + self.padding),
            self.slot_width,
            self.slot_height,
        ))
    }

    /// All slot rectangles in placement order.
    pub fn slots(&self) -> impl Iterator<Item = SlotRect> + '_ {
        (0..self.max_slots()).filter_map(|i| self.slot_rect(i))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
