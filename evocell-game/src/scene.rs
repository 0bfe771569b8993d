//! Render-agnostic scene description.
//!
//! Mini-games describe their visuals as plain data; whatever owns the
//! surface decides how to draw it. The engine itself never touches a
//! rendering API.

use serde::{Deserialize, Serialize};

/// Snapshot of everything a mini-game wants drawn this frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    pub fn label(&mut self, x: f32, y: f32, text: impl Into<String>) {
        self.nodes.push(SceneNode::Label {
            x,
            y,
            text: text.into(),
        });
    }
}

/// One drawable element, in surface coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneNode {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        tint: Tint,
    },
    Circle {
        x: f32,
        y: f32,
        r: f32,
        tint: Tint,
    },
    Label {
        x: f32,
        y: f32,
        text: String,
    },
    /// Horizontal fill gauge; `fraction` is clamped by the renderer.
    Gauge {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fraction: f32,
    },
}

/// Semantic palette slot; the renderer maps these to actual colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tint {
    Neutral,
    Good,
    Bad,
    Accent,
    Muted,
}
