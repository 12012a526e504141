//! Host-side collaborators: the project's texture sets and its lifecycle events.

use crate::error::{ExporterError, Result};
use crate::model::{Resolution, TextureSet};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, Sender};

/// Read/write access to the texture sets of the open project.
pub trait TextureSetProvider {
    /// Texture sets in project order.
    fn texture_sets(&self) -> Vec<TextureSet>;

    /// Overwrites the resolution of the texture set at `index` and returns the
    /// previous value. Fails when that position no longer holds `name`.
    fn set_resolution(
        &mut self,
        index: usize,
        name: &str,
        resolution: Resolution,
    ) -> Result<Resolution>;
}

/// Project held in memory, typically loaded from a JSON/YAML manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InMemoryProject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub texture_sets: Vec<TextureSet>,
}

impl InMemoryProject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            texture_sets: Vec::new(),
        }
    }

    pub fn with_texture_set(mut self, name: impl Into<String>, width: u32, height: u32) -> Self {
        self.texture_sets.push(TextureSet::new(name, width, height));
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn get(&self, name: &str) -> Option<&TextureSet> {
        self.texture_sets.iter().find(|t| t.name == name)
    }
}

impl TextureSetProvider for InMemoryProject {
    fn texture_sets(&self) -> Vec<TextureSet> {
        self.texture_sets.clone()
    }

    fn set_resolution(
        &mut self,
        index: usize,
        name: &str,
        resolution: Resolution,
    ) -> Result<Resolution> {
        let set = self
            .texture_sets
            .get_mut(index)
            .filter(|t| t.name == name)
            .ok_or_else(|| ExporterError::TextureSetNotFound(name.to_string()))?;
        Ok(std::mem::replace(&mut set.resolution, resolution))
    }
}

/// Project lifecycle notifications that invalidate every verdict.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProjectEvent {
    Opened,
    Created,
    AboutToClose,
}

/// Fan-out of [`ProjectEvent`]s to channel subscribers.
#[derive(Debug, Default)]
pub struct ProjectEvents {
    subscribers: Vec<Sender<ProjectEvent>>,
}

impl ProjectEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<ProjectEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Sends `event` to every live subscriber and returns how many received it.
    /// Subscribers whose receiver was dropped are forgotten.
    pub fn publish(&mut self, event: ProjectEvent) -> usize {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
        self.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
