//! Snapshot ownership.
//!
//! A [`GraphWorld`] owns the current [`GraphWorldEntities`] snapshot and is
//! the only place a new snapshot can be committed. Readers get a cheap `Rc`
//! handle to whatever snapshot is current; nothing is pushed to them. A
//! handle stays valid and unchanged after later commits, so a commit only
//! updates in place when no handle to the current snapshot is alive.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::entities::GraphWorldEntities;
use crate::entity::Vertex;
use crate::error::GraphResult;

/// Read + commit capability over a graph world snapshot.
///
/// This is the seam the graph adapter is written against. Implementors hand
/// out the current snapshot and accept a replacement; they never merge.
pub trait EntityStore {
    /// The snapshot current at call time.
    fn entities(&self) -> Rc<GraphWorldEntities>;

    /// Replace the current snapshot.
    fn set_entities(&self, next: Rc<GraphWorldEntities>);

    /// Commit a snapshot with one vertex state replaced.
    fn commit_vertex(&self, id: &str, vertex: Vertex) -> GraphResult<()> {
        let next = self.entities().with_vertex(id, vertex)?;
        self.set_entities(Rc::new(next));
        Ok(())
    }
}

impl<S: EntityStore + ?Sized> EntityStore for &S {
    fn entities(&self) -> Rc<GraphWorldEntities> {
        (**self).entities()
    }

    fn set_entities(&self, next: Rc<GraphWorldEntities>) {
        (**self).set_entities(next)
    }

    fn commit_vertex(&self, id: &str, vertex: Vertex) -> GraphResult<()> {
        (**self).commit_vertex(id, vertex)
    }
}

impl<S: EntityStore + ?Sized> EntityStore for Rc<S> {
    fn entities(&self) -> Rc<GraphWorldEntities> {
        (**self).entities()
    }

    fn set_entities(&self, next: Rc<GraphWorldEntities>) {
        (**self).set_entities(next)
    }

    fn commit_vertex(&self, id: &str, vertex: Vertex) -> GraphResult<()> {
        (**self).commit_vertex(id, vertex)
    }
}

/// Owner of the current graph world snapshot.
#[derive(Debug, Default)]
pub struct GraphWorld {
    entities: RefCell<Rc<GraphWorldEntities>>,
    /// Number of commits since creation.
    revision: Cell<u64>,
}

impl GraphWorld {
    pub fn new(entities: GraphWorldEntities) -> Self {
        Self {
            entities: RefCell::new(Rc::new(entities)),
            revision: Cell::new(0),
        }
    }

    /// Monotonic commit counter. Renderers can compare it between frames.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// Take the current snapshot out of the world.
    pub fn into_entities(self) -> Rc<GraphWorldEntities> {
        self.entities.into_inner()
    }
}

impl EntityStore for GraphWorld {
    fn entities(&self) -> Rc<GraphWorldEntities> {
        Rc::clone(&self.entities.borrow())
    }

    fn set_entities(&self, next: Rc<GraphWorldEntities>) {
        *self.entities.borrow_mut() = next;
        self.revision.set(self.revision.get() + 1);
    }

    /// Updates the current snapshot in place when no reader holds it.
    /// A snapshot still held elsewhere is copied first and stays unchanged.
    fn commit_vertex(&self, id: &str, vertex: Vertex) -> GraphResult<()> {
        Rc::make_mut(&mut self.entities.borrow_mut()).set_vertex(id, vertex)?;
        self.revision.set(self.revision.get() + 1);
        Ok(())
    }
}

impl From<GraphWorldEntities> for GraphWorld {
    fn from(entities: GraphWorldEntities) -> Self {
        Self::new(entities)
    }
}
