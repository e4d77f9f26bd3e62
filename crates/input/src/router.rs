//! Input router — maps pointer events to strokes, pans, and zooms.
//!
//! One state machine per pointer stream: `Idle -> Drawing -> Idle` for
//! strokes and `Idle -> Panning -> Idle` for pans, mutually exclusive via
//! the pan-modifier gate (pan only starts while the modifier is held, and
//! drawing never starts while it is).

use tracing::debug;

use fl_common::Point;
use fl_compositor::ViewTransform;
use fl_project::Project;

use crate::stroke::StrokeCanvas;
use crate::tool::ToolConfig;

/// A pointer/wheel/modifier event in screen coordinates, as delivered by
/// the host shell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    /// Pointer left the surface; ends a stroke like `Up` does.
    Leave,
    Wheel { delta_y: f32 },
    /// The pan modifier (e.g. Space) was pressed or released.
    PanModifier(bool),
}

/// Current router state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RouterState {
    #[default]
    Idle,
    Drawing,
    Panning,
}

/// What the controller must resync after an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RouterEffect {
    /// Nothing changed.
    None,
    /// View or in-progress stroke changed; recomposite the canvas.
    Redraw,
    /// A finished stroke was captured into the project; recomposite and
    /// refresh the timeline's occupancy markers.
    StrokeCaptured,
}

/// Pointer input state machine.
#[derive(Debug, Default)]
pub struct InputRouter {
    state: RouterState,
    pan_modifier: bool,
    anchor: Point,
    stroke: Option<StrokeCanvas>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RouterState {
        self.state
    }

    /// The in-progress stroke raster, for live preview while drawing.
    pub fn in_progress_stroke(&self) -> Option<&StrokeCanvas> {
        self.stroke.as_ref()
    }

    /// Process one event against the project and view.
    pub fn dispatch(
        &mut self,
        event: PointerEvent,
        project: &mut Project,
        view: &mut ViewTransform,
        tool: &ToolConfig,
    ) -> RouterEffect {
        match event {
            PointerEvent::Down { x, y } => self.on_down(Point::new(x, y), project, view),
            PointerEvent::Move { x, y } => self.on_move(Point::new(x, y), view, tool),
            PointerEvent::Up | PointerEvent::Leave => self.on_up(project),
            PointerEvent::Wheel { delta_y } => {
                view.adjust_zoom(delta_y);
                RouterEffect::Redraw
            }
            PointerEvent::PanModifier(held) => {
                self.pan_modifier = held;
                if !held && self.state == RouterState::Panning {
                    self.state = RouterState::Idle;
                }
                RouterEffect::None
            }
        }
    }

    fn on_down(
        &mut self,
        screen: Point,
        project: &mut Project,
        view: &ViewTransform,
    ) -> RouterEffect {
        if self.state != RouterState::Idle {
            return RouterEffect::None;
        }
        if self.pan_modifier {
            self.state = RouterState::Panning;
            self.anchor = screen;
            debug!(x = screen.x, y = screen.y, "Pan started");
            return RouterEffect::None;
        }
        let start = view.to_canvas(screen);
        self.stroke = Some(StrokeCanvas::begin(
            project.current_cell(),
            project.resolution,
            start,
        ));
        self.state = RouterState::Drawing;
        debug!(
            x = start.x,
            y = start.y,
            layer = project.current_layer,
            frame = project.current_frame,
            "Stroke started"
        );
        RouterEffect::None
    }

    fn on_move(
        &mut self,
        screen: Point,
        view: &mut ViewTransform,
        tool: &ToolConfig,
    ) -> RouterEffect {
        match self.state {
            RouterState::Drawing => {
                if let Some(stroke) = self.stroke.as_mut() {
                    stroke.extend(view.to_canvas(screen), tool);
                }
                RouterEffect::Redraw
            }
            RouterState::Panning => {
                view.pan_by(screen.x - self.anchor.x, screen.y - self.anchor.y);
                self.anchor = screen;
                RouterEffect::Redraw
            }
            RouterState::Idle => RouterEffect::None,
        }
    }

    fn on_up(&mut self, project: &mut Project) -> RouterEffect {
        match self.state {
            RouterState::Drawing => {
                self.state = RouterState::Idle;
                if let Some(stroke) = self.stroke.take() {
                    project.capture_stroke(stroke.finish());
                    debug!(
                        layer = project.current_layer,
                        frame = project.current_frame,
                        "Stroke captured"
                    );
                    return RouterEffect::StrokeCaptured;
                }
                RouterEffect::None
            }
            RouterState::Panning => {
                self.state = RouterState::Idle;
                RouterEffect::None
            }
            RouterState::Idle => RouterEffect::None,
        }
    }
}
