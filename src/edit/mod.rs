//! Edit operations on a built mesh
//!
//! Edits change vertex attributes (elevation) and never topology. Editor
//! dialogs preview an edit on a copy of the mesh and either keep the copy
//! or throw it away; [`EditSession`] is that flow.

mod slope;

pub use slope::{Line, LinearTransform};

use crate::error::Result;
use crate::mesh::Mesh;

/// An operation that rewrites vertex attributes of a mesh
pub trait MeshEdit {
    /// Apply the edit in place
    fn apply(&self, mesh: &mut Mesh) -> Result<()>;
}

/// A speculative copy of a mesh that edits are applied to
///
/// # Example
///
/// ```
/// use voronoi_mesh::*;
///
/// let config = MeshConfigBuilder::new().seed(3).points(128).unwrap().build().unwrap();
/// let mesh = Mesh::generate(&config).unwrap();
///
/// let mut session = EditSession::begin(&mesh);
/// session.apply(&LinearTransform::from_slope(0.0, 0.5, config.z_extent)).unwrap();
///
/// // the source is untouched until the session is committed
/// assert!(mesh.vertices().iter().all(|v| v.z == 0.0));
/// let edited = session.commit();
/// assert_eq!(edited.vertex_count(), mesh.vertex_count());
/// ```
#[derive(Debug, Clone)]
pub struct EditSession {
    draft: Mesh,
    applied: usize,
    debug_level: u8,
}

impl EditSession {
    /// Start a session on a copy of `mesh`
    ///
    /// The session is silent; see [`EditSession::with_debug_level`].
    pub fn begin(mesh: &Mesh) -> Self {
        Self {
            draft: mesh.clone(),
            applied: 0,
            debug_level: 0,
        }
    }

    /// Set the verbosity threshold (see `MeshConfig::debug_level`)
    ///
    /// Commit and discard are reported above level 1.
    pub fn with_debug_level(mut self, level: u8) -> Self {
        self.debug_level = level;
        self
    }

    /// Verbosity threshold of this session
    #[inline]
    pub fn debug_level(&self) -> u8 {
        self.debug_level
    }

    /// Apply an edit to the draft
    ///
    /// # Errors
    ///
    /// Propagates the edit's error. The draft may be partially edited.
    pub fn apply<E: MeshEdit + ?Sized>(&mut self, edit: &E) -> Result<()> {
        edit.apply(&mut self.draft)?;
        self.applied += 1;
        Ok(())
    }

    /// The edited copy
    #[inline]
    pub fn draft(&self) -> &Mesh {
        &self.draft
    }

    /// Number of edits applied so far
    #[inline]
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Keep the edits
    pub fn commit(self) -> Mesh {
        if self.debug_level > 1 {
            tracing::debug!(edits = self.applied, "edit session committed");
        }
        self.draft
    }

    /// Throw the edits away
    pub fn discard(self) {
        if self.debug_level > 1 {
            tracing::debug!(edits = self.applied, "edit session discarded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MeshConfigBuilder;
    use crate::error::MeshError;

    struct Flatten(f64);

    impl MeshEdit for Flatten {
        fn apply(&self, mesh: &mut Mesh) -> Result<()> {
            for z in mesh.elevations_mut() {
                *z = self.0;
            }
            Ok(())
        }
    }

    struct Broken;

    impl MeshEdit for Broken {
        fn apply(&self, _mesh: &mut Mesh) -> Result<()> {
            Err(MeshError::DegenerateLine)
        }
    }

    fn mesh() -> Mesh {
        let config = MeshConfigBuilder::new()
            .seed(17)
            .points(200)
            .unwrap()
            .debug_level(0)
            .build()
            .unwrap();
        Mesh::generate(&config).unwrap()
    }

    #[test]
    fn test_commit_keeps_edits() {
        let source = mesh();
        let mut session = EditSession::begin(&source);
        session.apply(&Flatten(0.25)).unwrap();
        session.apply(&Flatten(0.5)).unwrap();
        assert_eq!(session.applied(), 2);

        let edited = session.commit();
        assert!(edited.vertices().iter().all(|v| v.z == 0.5));
        assert!(source.vertices().iter().all(|v| v.z == 0.0));
        assert_eq!(edited.edges(), source.edges());
    }

    #[test]
    fn test_discard_leaves_source() {
        let source = mesh();
        let before = source.vertices().to_vec();

        let mut session = EditSession::begin(&source);
        session.apply(&Flatten(1.0)).unwrap();
        assert!(session.draft().vertices().iter().all(|v| v.z == 1.0));
        session.discard();

        assert_eq!(source.vertices(), &before[..]);
    }

    #[test]
    fn test_debug_level() {
        let source = mesh();

        let quiet = EditSession::begin(&source);
        assert_eq!(quiet.debug_level(), 0);
        quiet.discard();

        let mut verbose = EditSession::begin(&source).with_debug_level(2);
        assert_eq!(verbose.debug_level(), 2);
        verbose.apply(&Flatten(0.75)).unwrap();
        let edited = verbose.commit();
        assert!(edited.vertices().iter().all(|v| v.z == 0.75));
    }

    #[test]
    fn test_failed_edit_not_counted() {
        let source = mesh();
        let mut session = EditSession::begin(&source);
        let edit: &dyn MeshEdit = &Broken;

        assert_eq!(session.apply(edit), Err(MeshError::DegenerateLine));
        assert_eq!(session.applied(), 0);
    }
}
