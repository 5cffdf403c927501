use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Names a visual resource the renderer can attach to the scene.
///
/// Handles are plain names ("weather/storm", "zone/echo/trail-3"); the
/// renderer decides what they map to. Two handles with the same name refer
/// to the same resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectHandle(String);

impl EffectHandle {
    /// Create a handle from a resource name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The resource name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EffectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attaches and detaches visual resources on behalf of the simulation.
///
/// Calls are synchronous and ordered: the engines always detach the outgoing
/// resource before attaching its replacement, so at most one instance of
/// each pair coexists. Failures are reported, never propagated as fatal.
pub trait Renderer {
    /// Attach a resource to the scene.
    fn attach(&mut self, effect: &EffectHandle) -> RenderResult<()>;

    /// Detach a previously attached resource.
    fn detach(&mut self, effect: &EffectHandle) -> RenderResult<()>;
}

/// Renderer that accepts and ignores every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn attach(&mut self, _effect: &EffectHandle) -> RenderResult<()> {
        Ok(())
    }

    fn detach(&mut self, _effect: &EffectHandle) -> RenderResult<()> {
        Ok(())
    }
}

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    /// An attach of the named resource.
    Attach(String),
    /// A detach of the named resource.
    Detach(String),
}

/// Renderer that records the exact call sequence it receives.
///
/// Serves headless hosts and call-ordering assertions (e.g. that a weather
/// change detaches the old kind before attaching the new one).
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    ops: Vec<RenderOp>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls received so far, in order.
    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    /// Names of currently attached resources (attached minus detached).
    pub fn attached(&self) -> Vec<&str> {
        let mut live: Vec<&str> = Vec::new();
        for op in &self.ops {
            match op {
                RenderOp::Attach(name) => live.push(name),
                RenderOp::Detach(name) => {
                    if let Some(pos) = live.iter().position(|n| n == name) {
                        live.remove(pos);
                    }
                }
            }
        }
        live
    }

    /// Drop the recorded history.
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn attach(&mut self, effect: &EffectHandle) -> RenderResult<()> {
        self.ops.push(RenderOp::Attach(effect.name().to_string()));
        Ok(())
    }

    fn detach(&mut self, effect: &EffectHandle) -> RenderResult<()> {
        self.ops.push(RenderOp::Detach(effect.name().to_string()));
        Ok(())
    }
}

/// Renderer that rejects every call.
///
/// Exercises the degraded path: logical transitions must complete even when
/// no resource can be shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectingRenderer;

impl Renderer for RejectingRenderer {
    fn attach(&mut self, effect: &EffectHandle) -> RenderResult<()> {
        Err(RenderError::AttachRejected(effect.name().to_string()))
    }

    fn detach(&mut self, effect: &EffectHandle) -> RenderResult<()> {
        Err(RenderError::DetachRejected(effect.name().to_string()))
    }
}
