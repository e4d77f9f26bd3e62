//! Frame compositing — stacks layers for the current frame, with optional
//! onion-skin overlay of the active layer's previous frame.

use tracing::debug;

use fl_common::PixelBuffer;
use fl_project::Project;

use crate::surface::RenderSurface;
use crate::view::ViewTransform;

/// Composites the project's current frame onto a render surface.
///
/// The compositor owns no pixel data; it reads the project model and view
/// transform and issues draws against the surface the caller provides.
pub struct Compositor {
    /// Opacity for the onion-skin overlay (0..1).
    onion_alpha: f32,
}

impl Compositor {
    pub fn new(onion_alpha: f32) -> Self {
        Self {
            onion_alpha: onion_alpha.clamp(0.0, 1.0),
        }
    }

    pub fn onion_alpha(&self) -> f32 {
        self.onion_alpha
    }

    /// Render the current frame.
    ///
    /// The surface is cleared in untransformed space, then every draw goes
    /// through `(zoom, 0, 0, zoom, pan_x, pan_y)`. Layers composite in
    /// reverse index order so that stacking index 0 lands visually topmost.
    /// Empty and malformed cells are skipped silently. When `onion` is set
    /// and the layer is the selected one, the previous frame's buffer (if
    /// any, and only for `current_frame > 0`) is drawn first at reduced
    /// opacity so the current frame paints over it.
    pub fn render(
        &self,
        project: &Project,
        view: &ViewTransform,
        onion: bool,
        surface: &mut dyn RenderSurface,
    ) {
        self.render_with_preview(project, view, onion, None, surface);
    }

    /// Render the current frame with a live stroke preview.
    ///
    /// While a stroke is in progress its working buffer already contains the
    /// cell's prior content, so it must stand in *for* the selected cell at
    /// its stacking position — drawing it over the finished composite would
    /// double-composite that content and hide eraser feedback entirely.
    pub fn render_with_preview(
        &self,
        project: &Project,
        view: &ViewTransform,
        onion: bool,
        preview: Option<&PixelBuffer>,
        surface: &mut dyn RenderSurface,
    ) {
        surface.clear();
        surface.set_transform(view.zoom, view.pan_x, view.pan_y);

        debug!(
            frame = project.current_frame,
            layers = project.layers.len(),
            onion,
            zoom = view.zoom,
            "Compositing frame"
        );

        for idx in (0..project.layers.len()).rev() {
            if onion && idx == project.current_layer && project.current_frame > 0 {
                if let Some(prev) = project.frame(idx, project.current_frame - 1) {
                    surface.draw_buffer_alpha(prev, self.onion_alpha);
                }
            }

            let cell = if idx == project.current_layer {
                preview
                    .filter(|b| b.is_well_formed())
                    .or_else(|| project.frame(idx, project.current_frame))
            } else {
                project.frame(idx, project.current_frame)
            };
            if let Some(buffer) = cell {
                surface.draw_buffer(buffer);
            }
        }
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(0.3)
    }
}
