//! Per-frame line batch
//!
//! The batch holds entity ids, not entities. Ids are registered and
//! unregistered from the world's spawn/destroy events; any id whose entity
//! has gone away without an event (for example when a frame's events were
//! not forwarded) is dropped silently the next time the batch is assembled.

use super::vertex::{Vertex, color_for, colors};
use super::viewport::Viewport;
use crate::sim::{EntityId, GameEvent, Model, World};

/// Vertices one batch may hold; indices are 16-bit
pub const MAX_BATCH_VERTICES: usize = u16::MAX as usize + 1;

#[derive(Debug, Default)]
pub struct DrawBatch {
    handles: Vec<EntityId>,
    vertices: Vec<Vertex>,
    indices: Vec<u16>,
}

impl DrawBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start drawing an entity; registering twice is a no-op
    pub fn register(&mut self, id: EntityId) {
        if !self.handles.contains(&id) {
            self.handles.push(id);
        }
    }

    pub fn unregister(&mut self, id: EntityId) {
        self.handles.retain(|&h| h != id);
    }

    /// Follow spawn and destroy events from one frame
    pub fn apply_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::EntitySpawned { id, .. } => self.register(id),
                GameEvent::EntityDestroyed { id, .. } => self.unregister(id),
                _ => {}
            }
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.handles.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Rebuild vertex and index data from the world's current state
    ///
    /// Positions are in clip space. Models with drawing switched off are
    /// skipped; a model that would overflow the batch is skipped with a
    /// warning.
    pub fn assemble(&mut self, world: &World) {
        self.vertices.clear();
        self.indices.clear();

        let before = self.handles.len();
        self.handles.retain(|&id| world.entity(id).is_some());
        let pruned = before - self.handles.len();
        if pruned > 0 {
            log::debug!("Pruned {pruned} stale draw handles");
        }

        let viewport = world.viewport();
        let mut overflowed = false;
        for &id in &self.handles {
            let Some(entity) = world.entity(id) else {
                continue;
            };
            let color = color_for(entity);
            if entity.model().draw() {
                overflowed |= !push_model(
                    &mut self.vertices,
                    &mut self.indices,
                    entity.model(),
                    color,
                    viewport,
                );
            }
            if let Some(engine) = entity.engine().filter(|m| m.draw()) {
                overflowed |= !push_model(
                    &mut self.vertices,
                    &mut self.indices,
                    engine,
                    colors::ENGINE,
                    viewport,
                );
            }
        }
        if overflowed {
            log::warn!(
                "Draw batch full at {} vertices, some models skipped",
                self.vertices.len()
            );
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Vertex data ready for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data ready for upload (line list)
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Append one model as a line list; false if it did not fit
fn push_model(
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u16>,
    model: &Model,
    color: [f32; 4],
    viewport: &Viewport,
) -> bool {
    let base = vertices.len();
    if base + model.vert_count() > MAX_BATCH_VERTICES {
        return false;
    }

    vertices.extend(model.transformed().iter().map(|&p| {
        let clip = viewport.world_to_clip(p);
        Vertex::new(clip.x, clip.y, color)
    }));
    indices.extend(model.indices().iter().map(|&i| base as u16 + i));
    true
}
