use std::ops::{Deref, DerefMut};

use marionette_mesh::MeshData;
use marionette_skeleton::Skin;

use crate::{material::MaterialRef, Error, Result};

/// A mesh placed in the scene, optionally deformed by a skeleton.
#[derive(Debug, Clone, Default)]
pub struct MeshInstance {
    mesh: Option<MeshData>,
    /// Material override for each surface of the mesh
    materials: Vec<Option<MaterialRef>>,
    /// Name of the skeleton node deforming the mesh
    skeleton: Option<String>,
    skin: Option<Skin>,
}

impl MeshInstance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skeleton(mut self, skeleton: impl Into<String>) -> Self {
        self.skeleton = Some(skeleton.into());
        self
    }

    pub fn mesh(&self) -> Option<&MeshData> {
        self.mesh.as_ref()
    }

    /// Replaces the mesh, which consists of a single surface without material override
    pub fn set_mesh(&mut self, mesh: MeshData) {
        self.mesh = Some(mesh);
        self.materials = vec![None];
    }

    pub fn surface_count(&self) -> usize {
        self.materials.len()
    }

    pub fn set_surface_material(&mut self, surface: usize, material: MaterialRef) -> Result<()> {
        let surface_count = self.materials.len();
        let slot = self
            .materials
            .get_mut(surface)
            .ok_or(Error::SurfaceOutOfRange {
                surface,
                surface_count,
            })?;

        *slot = Some(material);
        Ok(())
    }

    pub fn surface_material(&self, surface: usize) -> Option<&MaterialRef> {
        self.materials.get(surface)?.as_ref()
    }

    pub fn skeleton(&self) -> Option<&str> {
        self.skeleton.as_deref()
    }

    pub fn set_skeleton(&mut self, skeleton: Option<String>) {
        self.skeleton = skeleton;
    }

    pub fn skin(&self) -> Option<&Skin> {
        self.skin.as_ref()
    }

    pub fn set_skin(&mut self, skin: Skin) {
        self.skin = Some(skin);
    }

    /// Unbinds the skeleton until the returned guard is dropped.
    ///
    /// The binding is restored however the guard goes out of scope, including early returns.
    pub fn detach_skeleton(&mut self) -> DetachedSkeleton<'_> {
        let skeleton = self.skeleton.take();

        if let Some(skeleton) = &skeleton {
            tracing::debug!(%skeleton, "detached skeleton");
        }

        DetachedSkeleton {
            instance: self,
            skeleton,
        }
    }
}

/// Keeps the skeleton of a [`MeshInstance`] detached while alive.
///
/// Gives access to the instance in the meantime. Binding another skeleton through the guard
/// is undone on drop.
pub struct DetachedSkeleton<'a> {
    instance: &'a mut MeshInstance,
    skeleton: Option<String>,
}

impl DetachedSkeleton<'_> {
    /// The skeleton which will be rebound
    pub fn skeleton(&self) -> Option<&str> {
        self.skeleton.as_deref()
    }
}

impl Deref for DetachedSkeleton<'_> {
    type Target = MeshInstance;

    fn deref(&self) -> &Self::Target {
        self.instance
    }
}

impl DerefMut for DetachedSkeleton<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.instance
    }
}

impl Drop for DetachedSkeleton<'_> {
    fn drop(&mut self) {
        self.instance.skeleton = self.skeleton.take();

        if let Some(skeleton) = &self.instance.skeleton {
            tracing::debug!(%skeleton, "rebound skeleton");
        }
    }
}
