//! Layered Compositor
//!
//! Manages z-ordered layers for rendering, so the add-book and analysis
//! modals can overlay the book list. Each layer has its own buffer and can
//! be positioned, resized and hidden independently; the compositor
//! composites all visible layers into one output buffer.

mod layer;

use std::collections::HashMap;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

pub use layer::Layer;

/// Unique identifier for a layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerId(u32);

/// The compositor manages all layers and composites them together
pub struct Compositor {
    /// All layers by ID
    layers: HashMap<LayerId, Layer>,
    /// Layers sorted by z-index for rendering
    render_order: Vec<LayerId>,
    /// Next layer ID to assign
    next_id: u32,
    /// Output buffer (composited result)
    output: Buffer,
    /// Total area
    area: Rect,
}

impl Compositor {
    /// Create a new compositor for the given area
    pub fn new(area: Rect) -> Self {
        Self {
            layers: HashMap::new(),
            render_order: Vec::new(),
            next_id: 0,
            output: Buffer::empty(area),
            area,
        }
    }

    /// Create a new layer and return its ID
    pub fn create_layer(&mut self, bounds: Rect, z_index: i32) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        self.layers.insert(id, Layer::new(bounds, z_index));
        self.update_render_order();

        id
    }

    /// Get mutable access to a layer's buffer for rendering
    pub fn layer_buffer_mut(&mut self, id: LayerId) -> Option<&mut Buffer> {
        self.layers.get_mut(&id).map(|l| &mut l.buffer)
    }

    /// Move a layer to a new position
    pub fn move_layer(&mut self, id: LayerId, x: u16, y: u16) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.bounds.x = x;
            layer.bounds.y = y;
        }
    }

    /// Resize a layer
    pub fn resize_layer(&mut self, id: LayerId, width: u16, height: u16) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.bounds.width = width;
            layer.bounds.height = height;
            // Buffer uses origin coordinates
            layer.buffer = Buffer::empty(Rect::new(0, 0, width, height));
        }
    }

    /// Set layer visibility
    pub fn set_visible(&mut self, id: LayerId, visible: bool) {
        if let Some(layer) = self.layers.get_mut(&id) {
            layer.visible = visible;
        }
    }

    /// Whether a layer is currently visible
    pub fn is_visible(&self, id: LayerId) -> bool {
        self.layers.get(&id).is_some_and(|l| l.visible)
    }

    /// Resize the entire compositor
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.output = Buffer::empty(area);
    }

    /// Composite all visible layers into the output buffer
    pub fn composite(&mut self) -> &Buffer {
        self.output.reset();

        // Back to front; later (higher z) layers fully occlude
        for &id in &self.render_order.clone() {
            if let Some(layer) = self.layers.get(&id) {
                if layer.visible {
                    Self::blit_layer(&mut self.output, &self.area, layer);
                }
            }
        }

        &self.output
    }

    /// Blit a layer onto the output buffer (opaque: every cell copies)
    fn blit_layer(output: &mut Buffer, area: &Rect, layer: &Layer) {
        let lb = &layer.bounds;

        for ly in 0..lb.height {
            for lx in 0..lb.width {
                let dst_x = lb.x + lx;
                let dst_y = lb.y + ly;

                if dst_x >= area.width || dst_y >= area.height {
                    continue;
                }

                let src_idx = layer.buffer.index_of(lx, ly);
                if src_idx >= layer.buffer.content.len() {
                    continue;
                }

                let dst_idx = output.index_of(dst_x, dst_y);
                if dst_idx < output.content.len() {
                    output.content[dst_idx] = layer.buffer.content[src_idx].clone();
                }
            }
        }
    }

    /// Update render order based on z-indices
    fn update_render_order(&mut self) {
        self.render_order = self.layers.keys().copied().collect();
        self.render_order
            .sort_by_key(|id| self.layers.get(id).map(|l| l.z_index).unwrap_or(0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_higher_z_occludes() {
        let area = Rect::new(0, 0, 10, 4);
        let mut compositor = Compositor::new(area);

        let back = compositor.create_layer(Rect::new(0, 0, 10, 4), 0);
        let front = compositor.create_layer(Rect::new(2, 1, 4, 2), 50);

        if let Some(buf) = compositor.layer_buffer_mut(back) {
            buf.set_string(0, 0, "bbbbbbbbbb", ratatui::style::Style::default());
            buf.set_string(0, 1, "bbbbbbbbbb", ratatui::style::Style::default());
        }
        if let Some(buf) = compositor.layer_buffer_mut(front) {
            buf.set_string(0, 0, "ffff", ratatui::style::Style::default());
        }

        let out = compositor.composite();
        assert_eq!(out.content[out.index_of(0, 1)].symbol(), "b");
        assert_eq!(out.content[out.index_of(2, 1)].symbol(), "f");
        // Opaque blit: the front layer's blank cells also occlude.
        assert_eq!(out.content[out.index_of(2, 2)].symbol(), " ");
    }

    #[test]
    fn test_hidden_layer_skipped() {
        let area = Rect::new(0, 0, 6, 2);
        let mut compositor = Compositor::new(area);

        let layer = compositor.create_layer(Rect::new(0, 0, 6, 2), 10);
        if let Some(buf) = compositor.layer_buffer_mut(layer) {
            buf.set_string(0, 0, "xxxxxx", ratatui::style::Style::default());
        }
        compositor.set_visible(layer, false);
        assert!(!compositor.is_visible(layer));

        let out = compositor.composite();
        assert_eq!(out.content[out.index_of(0, 0)].symbol(), " ");
    }

    #[test]
    fn test_layer_clipped_to_area() {
        let area = Rect::new(0, 0, 4, 2);
        let mut compositor = Compositor::new(area);

        let layer = compositor.create_layer(Rect::new(2, 0, 4, 1), 0);
        if let Some(buf) = compositor.layer_buffer_mut(layer) {
            buf.set_string(0, 0, "wxyz", ratatui::style::Style::default());
        }

        // Cells past the compositor area are dropped, not wrapped.
        let out = compositor.composite();
        assert_eq!(out.content[out.index_of(3, 0)].symbol(), "x");
    }
}
