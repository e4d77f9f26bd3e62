//! The editor controller — single owner of all mutable editor state.

use std::path::Path;

use tracing::{debug, info};

use fl_common::EditorConfig;
use fl_compositor::{
    export_spritesheet, Compositor, CompositorResult, RenderSurface, ViewTransform,
};
use fl_input::{InputRouter, PointerEvent, RouterEffect, ToolConfig};
use fl_project::{load_project, save_project, Project, ProjectResult};

use crate::playback::PlaybackClock;

/// Dirty flags for the external UI collaborators. The host shell calls
/// [`Editor::take_ui_sync`] after each event batch and re-renders whatever
/// is flagged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct UiSync {
    /// Layer-list UI needs re-rendering (names or selection changed).
    pub layers: bool,
    /// Timeline UI needs re-rendering (selection or occupancy changed).
    pub timeline: bool,
    /// Canvas needs recompositing.
    pub canvas: bool,
}

impl UiSync {
    fn all() -> Self {
        Self {
            layers: true,
            timeline: true,
            canvas: true,
        }
    }

    pub fn any(self) -> bool {
        self.layers || self.timeline || self.canvas
    }
}

/// The editor: project model, view transform, tool state, input router,
/// playback clock, and compositor, owned together behind one `&mut`.
pub struct Editor {
    config: EditorConfig,
    project: Project,
    view: ViewTransform,
    tool: ToolConfig,
    router: InputRouter,
    clock: PlaybackClock,
    compositor: Compositor,
    onion: bool,
    ui: UiSync,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let project = Project::new(config.resolution);
        let tool = ToolConfig::from_config(&config);
        let clock = PlaybackClock::new(config.fps);
        let compositor = Compositor::new(config.onion_alpha);
        let onion = config.onion_skin;
        info!(resolution = %config.resolution, fps = config.fps, "Editor created");
        Self {
            config,
            project,
            view: ViewTransform::new(),
            tool,
            router: InputRouter::new(),
            clock,
            compositor,
            onion,
            ui: UiSync::all(),
        }
    }

    // --- Accessors ---

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tool(&self) -> &ToolConfig {
        &self.tool
    }

    /// Live tool settings; the toolbar mutates these at any time, including
    /// mid-stroke.
    pub fn tool_mut(&mut self) -> &mut ToolConfig {
        &mut self.tool
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    pub fn onion_enabled(&self) -> bool {
        self.onion
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    // --- Model operations ---

    /// Add a layer at the top of the stack and select it.
    pub fn add_layer(&mut self) {
        self.project.add_layer();
        self.ui.layers = true;
        self.ui.canvas = true;
    }

    /// Select a frame and flag the timeline and canvas for resync.
    pub fn select_frame(&mut self, index: usize) {
        self.project.select_frame(index);
        self.ui.timeline = true;
        self.ui.canvas = true;
    }

    /// Select a layer and flag the layer list and canvas for resync.
    pub fn select_layer(&mut self, index: usize) {
        self.project.select_layer(index);
        self.ui.layers = true;
        self.ui.canvas = true;
    }

    pub fn set_onion(&mut self, enabled: bool) {
        self.onion = enabled;
        self.ui.canvas = true;
    }

    // --- Input ---

    /// Route one pointer event through the input state machine.
    pub fn handle_input(&mut self, event: PointerEvent) {
        let effect = self
            .router
            .dispatch(event, &mut self.project, &mut self.view, &self.tool);
        match effect {
            RouterEffect::None => {}
            RouterEffect::Redraw => self.ui.canvas = true,
            RouterEffect::StrokeCaptured => {
                self.ui.canvas = true;
                self.ui.timeline = true;
            }
        }
    }

    // --- Playback ---

    /// Flip the playing flag; the tick timer itself keeps running.
    pub fn toggle_play(&mut self) -> bool {
        self.clock.toggle_play()
    }

    /// One scheduler tick. Advances the frame while playing; no-op otherwise.
    pub fn tick(&mut self) {
        if let Some(frame) = self.clock.tick(&mut self.project) {
            debug!(frame, "Playback advanced");
            self.ui.timeline = true;
            self.ui.canvas = true;
        }
    }

    // --- Rendering ---

    /// Composite the current frame, including a live preview of any stroke
    /// in progress. The stroke's working buffer stands in for the selected
    /// cell (it already carries that cell's prior content), so eraser
    /// strokes are visible mid-stroke.
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        let preview = self.router.in_progress_stroke().map(|s| s.pixels());
        self.compositor
            .render_with_preview(&self.project, &self.view, self.onion, preview, surface);
    }

    // --- Persistence & export ---

    /// Save the project to a `.fla` file.
    pub fn save(&self, path: &Path) -> ProjectResult<()> {
        save_project(&self.project, path)
    }

    /// Replace the project wholesale from a `.fla` file. On success all UI
    /// surfaces are flagged for resync; on failure the live model is
    /// untouched.
    pub fn load(&mut self, path: &Path) -> ProjectResult<()> {
        let project = load_project(path)?;
        self.project = project;
        self.ui = UiSync::all();
        Ok(())
    }

    /// Export all frames as a horizontal PNG strip.
    pub fn export_spritesheet(&self, path: &Path) -> CompositorResult<()> {
        export_spritesheet(&self.project, path)
    }

    // --- UI sync ---

    /// Fetch and clear the accumulated dirty flags.
    pub fn take_ui_sync(&mut self) -> UiSync {
        std::mem::take(&mut self.ui)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fl_common::{Resolution, Rgba, TOTAL_FRAMES};
    use fl_compositor::SoftwareSurface;
    use fl_input::Tool;

    fn small_editor() -> Editor {
        Editor::new(EditorConfig {
            resolution: Resolution::new(16, 16),
            ..EditorConfig::default()
        })
    }

    fn draw_segment(editor: &mut Editor, from: (f32, f32), to: (f32, f32)) {
        editor.handle_input(PointerEvent::Down {
            x: from.0,
            y: from.1,
        });
        editor.handle_input(PointerEvent::Move { x: to.0, y: to.1 });
        editor.handle_input(PointerEvent::Up);
    }

    #[test]
    fn new_editor_flags_everything_dirty() {
        let mut e = small_editor();
        let sync = e.take_ui_sync();
        assert!(sync.layers && sync.timeline && sync.canvas);
        assert!(!e.take_ui_sync().any());
    }

    #[test]
    fn add_layer_marks_layer_list() {
        let mut e = small_editor();
        e.take_ui_sync();
        e.add_layer();
        let sync = e.take_ui_sync();
        assert!(sync.layers && sync.canvas);
        assert!(!sync.timeline);
        assert_eq!(e.project().layers.len(), 2);
        assert_eq!(e.project().current_layer, 0);
    }

    #[test]
    fn stroke_marks_canvas_and_timeline() {
        let mut e = small_editor();
        e.take_ui_sync();
        e.tool_mut().color = "#ff0000".into();
        draw_segment(&mut e, (2.0, 2.0), (10.0, 2.0));
        let sync = e.take_ui_sync();
        assert!(sync.canvas && sync.timeline);
        assert!(e.project().is_occupied(0, 0));
    }

    #[test]
    fn playback_ticks_advance_and_wrap() {
        let mut e = small_editor();
        e.tick();
        assert_eq!(e.project().current_frame, 0); // stopped: no-op

        assert!(e.toggle_play());
        for _ in 0..TOTAL_FRAMES {
            e.tick();
        }
        assert_eq!(e.project().current_frame, 0); // full cycle
        e.tick();
        assert_eq!(e.project().current_frame, 1);
    }

    #[test]
    fn render_shows_captured_frame() {
        let mut e = small_editor();
        e.tool_mut().color = "#ff0000".into();
        e.tool_mut().width = 4.0;
        draw_segment(&mut e, (4.0, 8.0), (12.0, 8.0));

        let mut surface = SoftwareSurface::new(Resolution::new(16, 16));
        e.render(&mut surface);
        assert_eq!(surface.pixels().pixel(8, 8), Some(Rgba::RED));
    }

    #[test]
    fn render_previews_stroke_in_progress() {
        let mut e = small_editor();
        e.tool_mut().color = "#ff0000".into();
        e.handle_input(PointerEvent::Down { x: 2.0, y: 8.0 });
        e.handle_input(PointerEvent::Move { x: 12.0, y: 8.0 });
        // Not yet captured
        assert!(!e.project().is_occupied(0, 0));

        let mut surface = SoftwareSurface::new(Resolution::new(16, 16));
        e.render(&mut surface);
        assert_eq!(surface.pixels().pixel(8, 8), Some(Rgba::RED));
    }

    #[test]
    fn eraser_preview_is_visible_mid_stroke() {
        let mut e = small_editor();
        e.tool_mut().color = "#ff0000".into();
        e.tool_mut().width = 6.0;
        draw_segment(&mut e, (0.0, 8.0), (16.0, 8.0));

        // Start erasing over the captured stroke without lifting the pointer
        e.tool_mut().tool = Tool::Eraser;
        e.handle_input(PointerEvent::Down { x: 0.0, y: 8.0 });
        e.handle_input(PointerEvent::Move { x: 16.0, y: 8.0 });
        assert!(e.project().frame(0, 0).is_some());

        let mut surface = SoftwareSurface::new(Resolution::new(16, 16));
        e.render(&mut surface);
        // Erased pixels must read transparent in the live render, not be
        // backfilled by the stored cell content.
        assert_eq!(surface.pixels().pixel(8, 8).unwrap().a, 0);
    }

    #[test]
    fn eraser_removes_previous_stroke() {
        let mut e = small_editor();
        e.tool_mut().color = "#ff0000".into();
        e.tool_mut().width = 6.0;
        draw_segment(&mut e, (0.0, 8.0), (16.0, 8.0));

        e.tool_mut().tool = Tool::Eraser;
        draw_segment(&mut e, (0.0, 8.0), (16.0, 8.0));

        let cell = e.project().frame(0, 0).expect("cell exists");
        assert_eq!(cell.pixel(8, 8).unwrap().a, 0);
    }

    #[test]
    fn save_load_roundtrip_resyncs_ui() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.fla");

        let mut e = small_editor();
        e.tool_mut().color = "#ff0000".into();
        draw_segment(&mut e, (2.0, 2.0), (10.0, 10.0));
        e.add_layer();
        e.select_frame(4);
        e.save(&path).expect("save");

        let mut fresh = small_editor();
        fresh.take_ui_sync();
        fresh.load(&path).expect("load");

        let sync = fresh.take_ui_sync();
        assert!(sync.layers && sync.timeline && sync.canvas);
        assert_eq!(fresh.project().layers.len(), 2);
        assert_eq!(fresh.project().current_frame, 4);
        assert!(fresh.project().is_occupied(1, 0));
    }

    #[test]
    fn failed_load_leaves_model_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.fla");
        std::fs::write(&path, "not a project").expect("write");

        let mut e = small_editor();
        e.add_layer();
        assert!(e.load(&path).is_err());
        assert_eq!(e.project().layers.len(), 2);
    }

    #[test]
    fn spritesheet_export_from_editor() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("strip.png");

        let mut e = small_editor();
        e.tool_mut().color = "#ff0000".into();
        draw_segment(&mut e, (2.0, 2.0), (10.0, 10.0));
        e.export_spritesheet(&path).expect("export");
        assert!(path.exists());
    }

    #[test]
    fn red_square_scenario_end_to_end() {
        // Spec walkthrough: one layer, red square on frame 0, frame 1 empty.
        let mut e = small_editor();
        e.tool_mut().color = "#ff0000".into();
        e.tool_mut().width = 8.0;
        draw_segment(&mut e, (4.0, 8.0), (12.0, 8.0));

        e.select_frame(1);
        let mut surface = SoftwareSurface::new(Resolution::new(16, 16));
        e.render(&mut surface);
        // Onion on by default: faint red at frame 1
        let px = surface.pixels().pixel(8, 8).unwrap();
        assert_eq!(px.r, 255);
        assert!(px.a > 0 && px.a < 255);

        e.set_onion(false);
        let mut surface = SoftwareSurface::new(Resolution::new(16, 16));
        e.render(&mut surface);
        assert!(surface.pixels().is_blank());

        e.select_frame(0);
        let mut surface = SoftwareSurface::new(Resolution::new(16, 16));
        e.render(&mut surface);
        assert_eq!(surface.pixels().pixel(8, 8), Some(Rgba::RED));
    }
}
