//! Replay script handling
//!
//! A script describes a synthetic surface, an engine configuration, and an
//! ordered list of input steps:
//!
//! ```toml
//! [surface]
//! width = 300.0
//! height = 100.0
//! children = [100.0, 100.0, 100.0, 100.0, 100.0]
//!
//! [config]
//! scrollbar_hidden = true
//!
//! [[step]]
//! action = "move_right"
//!
//! [[step]]
//! action = "wait"
//! ms = 600
//! ```

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use dragscroll::{
    BoundaryState, DragScroll, DragScrollConfig, EventResponse, ProbeMeasurement, StyleSize,
    SyntheticSurface,
};
use dragscroll_core::{PointerEvent, Size};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Top-level replay script
#[derive(Debug, Deserialize)]
pub struct Script {
    pub surface: SurfaceConfig,
    #[serde(default)]
    pub config: DragScrollConfig,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// Synthetic surface layout
#[derive(Debug, Deserialize)]
pub struct SurfaceConfig {
    /// Viewport width
    pub width: f32,
    /// Viewport height
    pub height: f32,
    /// Content height; defaults to the viewport height
    #[serde(default)]
    pub content_height: Option<f32>,
    /// Child widths, laid out in one row
    #[serde(default)]
    pub children: Vec<f32>,
    #[serde(default)]
    pub style: Option<StyleSize>,
    #[serde(default)]
    pub probe: Option<ProbeMeasurement>,
}

/// One scripted input
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Down {
        x: f32,
        y: f32,
        #[serde(default)]
        button: u8,
    },
    Move {
        x: f32,
        y: f32,
        #[serde(default)]
        button: u8,
    },
    Up {
        x: f32,
        y: f32,
        #[serde(default)]
        button: u8,
    },
    /// Host-initiated scroll (wheel, keyboard)
    Scroll {
        #[serde(default)]
        dx: f32,
        #[serde(default)]
        dy: f32,
    },
    /// Advance the virtual clock
    Wait { ms: u64 },
    /// Change the viewport size
    Resize { width: f32, height: f32 },
    /// Replace the children
    Children { widths: Vec<f32> },
    MoveLeft,
    MoveRight,
    MoveTo { index: usize },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Down { .. } => "down",
            Step::Move { .. } => "move",
            Step::Up { .. } => "up",
            Step::Scroll { .. } => "scroll",
            Step::Wait { .. } => "wait",
            Step::Resize { .. } => "resize",
            Step::Children { .. } => "children",
            Step::MoveLeft => "move_left",
            Step::MoveRight => "move_right",
            Step::MoveTo { .. } => "move_to",
        }
    }
}

/// Bound notification observed during a step
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Notification {
    pub step: usize,
    pub at_ms: u64,
    pub left: bool,
    pub right: bool,
}

/// State after one step
#[derive(Clone, Debug, Serialize)]
pub struct StepRecord {
    pub step: usize,
    pub action: &'static str,
    pub response: String,
    pub at_ms: u64,
    pub index: usize,
    pub scroll_x: f32,
    pub scroll_y: f32,
}

/// Engine state at the end of a replay
#[derive(Clone, Debug, Serialize)]
pub struct FinalState {
    pub current_index: usize,
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub boundary: BoundaryState,
    pub is_animating: bool,
    pub now_ms: u64,
}

/// Full replay output
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub steps: Vec<StepRecord>,
    pub notifications: Vec<Notification>,
    #[serde(rename = "final")]
    pub final_state: FinalState,
}

impl Script {
    /// Load a script from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    fn build_surface(&self) -> SyntheticSurface {
        let layout = &self.surface;
        let mut surface = SyntheticSurface::new(
            Size::new(layout.width, layout.height),
            layout.children.clone(),
        );
        if let Some(height) = layout.content_height {
            surface = surface.with_content_height(height);
        }
        if let Some(style) = layout.style {
            surface = surface.with_style(style);
        }
        if let Some(probe) = layout.probe {
            surface = surface.with_probe(probe);
        }
        surface
    }

    /// Run every step against a fresh engine
    pub fn run(&self) -> Result<Report> {
        let mut engine = DragScroll::new(self.build_surface(), self.config)
            .context("Failed to attach drag scroll engine")?;

        let observed: Arc<Mutex<Vec<BoundaryState>>> = Arc::default();
        let sink = observed.clone();
        engine.on_boundary_change(move |state| {
            if let Ok(mut log) = sink.lock() {
                log.push(state);
            }
        });

        let mut steps = Vec::with_capacity(self.steps.len());
        let mut notifications = Vec::new();

        for (index, step) in self.steps.iter().enumerate() {
            let response = apply(&mut engine, step);
            debug!(step = index, action = step.name(), ?response, "step");

            let at_ms = engine.now_ms();
            if let Ok(mut log) = observed.lock() {
                notifications.extend(log.drain(..).map(|state| Notification {
                    step: index,
                    at_ms,
                    left: state.left,
                    right: state.right,
                }));
            }

            let state = engine.surface_state();
            steps.push(StepRecord {
                step: index,
                action: step.name(),
                response: format!("{response:?}"),
                at_ms,
                index: engine.current_index(),
                scroll_x: state.scroll_x,
                scroll_y: state.scroll_y,
            });
        }

        let state = engine.surface_state();
        let final_state = FinalState {
            current_index: engine.current_index(),
            scroll_x: state.scroll_x,
            scroll_y: state.scroll_y,
            boundary: engine.boundary(),
            is_animating: engine.is_animating(),
            now_ms: engine.now_ms(),
        };
        info!(
            steps = steps.len(),
            notifications = notifications.len(),
            "replay finished"
        );

        Ok(Report {
            steps,
            notifications,
            final_state,
        })
    }
}

fn apply(engine: &mut DragScroll<SyntheticSurface>, step: &Step) -> EventResponse {
    let moved = |allowed: bool| {
        if allowed {
            EventResponse::Handled
        } else {
            EventResponse::Ignored
        }
    };

    match *step {
        Step::Down { x, y, button } => engine.on_pointer_down(PointerEvent::new(x, y, button)),
        Step::Move { x, y, button } => engine.on_pointer_move(PointerEvent::new(x, y, button)),
        Step::Up { x, y, button } => engine.on_pointer_up(PointerEvent::new(x, y, button)),
        Step::Scroll { dx, dy } => {
            engine.host_mut().scroll_by(dx, dy);
            engine.on_scroll()
        }
        Step::Wait { ms } => engine.advance(ms),
        Step::Resize { width, height } => {
            engine.host_mut().set_viewport(Size::new(width, height));
            engine.on_resize()
        }
        Step::Children { ref widths } => {
            engine.host_mut().set_child_widths(widths.clone());
            engine.check_structure()
        }
        Step::MoveLeft => moved(engine.move_left()),
        Step::MoveRight => moved(engine.move_right()),
        Step::MoveTo { index } => moved(engine.move_to(index)),
    }
}
