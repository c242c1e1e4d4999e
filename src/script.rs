//! Scripted edits, for driving a session without a touch screen.
//!
//! A script is JSON:
//!
//! ```json
//! { "ops": [
//!     { "op": "color", "color": "#ff0000" },
//!     { "op": "stroke", "points": [[10, 10], [60, 40]] },
//!     { "op": "text", "at": [100, 80], "text": "Hi" },
//!     { "op": "done" }
//! ] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::color::Color;
use crate::geometry::Point;
use crate::session::{AnnotationSession, CommitOutput};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("could not read script: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// Pick the color for what follows
    Color { color: Color },
    /// Drag through `points`, in display points
    Stroke { points: Vec<(f32, f32)> },
    /// Place a label centered on `at` and commit `text` into it
    Text { at: (f32, f32), text: String },
    Edit,
    Done,
    Cancel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditScript {
    #[serde(default)]
    pub ops: Vec<EditOp>,
}

impl EditScript {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Run every op against `session`. Returns the last commit, if any.
    pub fn apply(&self, session: &mut AnnotationSession) -> Option<CommitOutput> {
        let mut last_commit = None;
        for op in &self.ops {
            match op {
                EditOp::Color { color } => session.set_stroke_color(*color),
                EditOp::Stroke { points } => {
                    let mut points = points.iter().copied().map(Point::from);
                    let Some(first) = points.next() else {
                        debug!("Skipping stroke with no points");
                        continue;
                    };
                    session.begin_stroke(first);
                    for point in points {
                        session.extend_stroke(point);
                    }
                    session.end_stroke();
                }
                EditOp::Text { at, text } => {
                    if let Some(handle) = session.place_annotation(Point::from(*at)) {
                        session.commit_annotation(handle, text);
                    }
                }
                EditOp::Edit => {
                    session.edit();
                }
                EditOp::Done => {
                    if let Some(output) = session.done() {
                        last_commit = Some(output);
                    }
                }
                EditOp::Cancel => {
                    session.cancel();
                }
            }
        }
        info!("Applied {} scripted edits", self.ops.len());
        last_commit
    }
}
