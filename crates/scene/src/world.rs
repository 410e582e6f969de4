use crate::components::{ComponentBounds, Drawable3D, Transform, Visibility};
use crate::entity::EntityId;
use foundation::handles::Handle;

/// Scene graph of positionable/orientable nodes, stored struct-of-arrays.
#[derive(Debug, Default)]
pub struct World {
    next_index: u32,
    transforms: Vec<Option<Transform>>,
    bounds: Vec<Option<ComponentBounds>>,
    visibility: Vec<Option<Visibility>>,
    drawables_3d: Vec<Option<Drawable3D>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId(Handle::new(self.next_index, 0));
        self.next_index += 1;
        self.ensure_capacity(id.index() as usize);
        id
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        self.ensure_capacity(entity.index() as usize);
        self.transforms[entity.index() as usize] = Some(transform);
    }

    pub fn set_bounds(&mut self, entity: EntityId, bounds: ComponentBounds) {
        self.ensure_capacity(entity.index() as usize);
        self.bounds[entity.index() as usize] = Some(bounds);
    }

    pub fn set_visibility(&mut self, entity: EntityId, visibility: Visibility) {
        self.ensure_capacity(entity.index() as usize);
        self.visibility[entity.index() as usize] = Some(visibility);
    }

    pub fn set_drawable_3d(&mut self, entity: EntityId, drawable: Drawable3D) {
        self.ensure_capacity(entity.index() as usize);
        self.drawables_3d[entity.index() as usize] = Some(drawable);
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.transforms.get(entity.index() as usize).and_then(|t| *t)
    }

    pub fn bounds(&self, entity: EntityId) -> Option<ComponentBounds> {
        self.bounds.get(entity.index() as usize).and_then(|b| *b)
    }

    /// Entities hidden via an explicit `Visibility` component are excluded;
    /// entities without the component default to visible.
    pub fn is_visible(&self, entity: EntityId) -> bool {
        self.visibility
            .get(entity.index() as usize)
            .and_then(|v| *v)
            .map(|v| v.visible)
            .unwrap_or(true)
    }

    /// Visible drawables with their transforms, in entity-index order.
    pub fn drawables_3d(&self) -> Vec<(EntityId, Transform, Drawable3D)> {
        let mut out = Vec::new();
        for index in 0..self.next_index {
            let entity = EntityId(Handle::new(index, 0));
            if !self.is_visible(entity) {
                continue;
            }
            let (Some(transform), Some(drawable)) = (
                self.transform(entity),
                self.drawables_3d[index as usize],
            ) else {
                continue;
            };
            out.push((entity, transform, drawable));
        }
        out
    }

    /// Visible entities with explicit bounds, in entity-index order.
    pub fn pickable_bounds(&self) -> Vec<(EntityId, ComponentBounds)> {
        let mut out = Vec::new();
        for index in 0..self.next_index {
            let entity = EntityId(Handle::new(index, 0));
            if !self.is_visible(entity) {
                continue;
            }
            if let Some(b) = self.bounds(entity) {
                out.push((entity, b));
            }
        }
        out
    }

    pub fn entity_count(&self) -> u32 {
        self.next_index
    }

    fn ensure_capacity(&mut self, index: usize) {
        let needed = index + 1;
        if self.transforms.len() < needed {
            self.transforms.resize(needed, None);
            self.bounds.resize(needed, None);
            self.visibility.resize(needed, None);
            self.drawables_3d.resize(needed, None);
        }
    }
}
