//! glTF asset ingest
//!
//! Flattens a `.glb`/`.gltf` file into a [`SceneData`]: nodes in
//! parent-before-child order, one `MeshData` per triangle primitive,
//! editable material records, and the file's animation clips. Meshes whose
//! node or mesh name looks like an annotation overlay are tagged so the
//! framing pass can skip them.

use crate::scene::{
    is_overlay_name, Aabb, AnimationClip, ChannelValues, ClipChannel, MaterialData, MeshData,
    NodeTrs, SceneData, SceneNode,
};
use glam::{Quat, Vec3};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Load a glTF file into a scene
pub fn load_gltf_scene_from_path(path: &Path) -> Result<SceneData, String> {
    let (doc, buffers, _images) = gltf::import(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let gltf_scene = doc
        .default_scene()
        .or_else(|| doc.scenes().next())
        .ok_or_else(|| format!("{} contains no scenes", path.display()))?;

    let mut builder = SceneBuilder {
        buffers: &buffers,
        nodes: Vec::new(),
        meshes: Vec::new(),
        materials: doc.materials().map(convert_material).collect(),
        node_index: HashMap::new(),
    };
    // Primitives without a material slot share one appended default
    let default_material = builder.materials.len();
    builder.materials.push(MaterialData::default());

    for node in gltf_scene.nodes() {
        builder.add_node(&node, None, default_material);
    }

    let clips = doc
        .animations()
        .enumerate()
        .filter_map(|(i, anim)| builder.convert_clip(&anim, i))
        .collect::<Vec<_>>();

    if builder.meshes.is_empty() {
        return Err(format!("{} contains no triangle meshes", path.display()));
    }

    info!(
        "loaded {}: {} nodes, {} meshes, {} materials, {} clips",
        path.display(),
        builder.nodes.len(),
        builder.meshes.len(),
        builder.materials.len(),
        clips.len()
    );

    Ok(SceneData {
        nodes: builder.nodes,
        meshes: Arc::new(builder.meshes),
        materials: builder.materials,
        clips,
    })
}

struct SceneBuilder<'a> {
    buffers: &'a [gltf::buffer::Data],
    nodes: Vec<SceneNode>,
    meshes: Vec<MeshData>,
    materials: Vec<MaterialData>,
    /// glTF node index -> flattened node index, for animation retargeting
    node_index: HashMap<usize, usize>,
}

impl SceneBuilder<'_> {
    fn add_node(&mut self, node: &gltf::Node, parent: Option<usize>, default_material: usize) {
        let (translation, rotation, scale) = node.transform().decomposed();
        let name = node
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("node_{}", node.index()));

        let index = self.nodes.len();
        self.nodes.push(SceneNode {
            name: name.clone(),
            rest: NodeTrs {
                translation: Vec3::from_array(translation),
                rotation: Quat::from_array(rotation),
                scale: Vec3::from_array(scale),
            },
            parent,
            meshes: Vec::new(),
        });
        self.node_index.insert(node.index(), index);

        if let Some(mesh) = node.mesh() {
            let overlay =
                is_overlay_name(&name) || mesh.name().map(is_overlay_name).unwrap_or(false);
            for primitive in mesh.primitives() {
                if let Some(data) =
                    self.convert_primitive(&mesh, &primitive, overlay, default_material)
                {
                    self.nodes[index].meshes.push(self.meshes.len());
                    self.meshes.push(data);
                }
            }
        }

        for child in node.children() {
            self.add_node(&child, Some(index), default_material);
        }
    }

    fn convert_primitive(
        &self,
        mesh: &gltf::Mesh,
        primitive: &gltf::Primitive,
        overlay: bool,
        default_material: usize,
    ) -> Option<MeshData> {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            warn!(
                "skipping primitive with unsupported mode {:?} in mesh {:?}",
                primitive.mode(),
                mesh.name()
            );
            return None;
        }

        let reader = primitive.reader(|buffer| self.buffers.get(buffer.index()).map(|b| &b.0[..]));
        let positions: Vec<[f32; 3]> = match reader.read_positions() {
            Some(iter) => iter.collect(),
            None => {
                warn!("skipping primitive without positions in mesh {:?}", mesh.name());
                return None;
            }
        };

        let indices: Vec<u32> = reader
            .read_indices()
            .map(|i| i.into_u32().collect())
            .unwrap_or_else(|| (0..positions.len() as u32).collect());

        let normals: Vec<[f32; 3]> = match reader.read_normals() {
            Some(iter) => iter.collect(),
            None => compute_normals(&positions, &indices),
        };

        let uvs: Vec<[f32; 2]> = reader
            .read_tex_coords(0)
            .map(|t| t.into_f32().collect())
            .unwrap_or_else(|| vec![[0.0, 0.0]; positions.len()]);

        let bounds = Aabb::from_points(&positions);

        Some(MeshData {
            name: mesh.name().map(str::to_string).unwrap_or_default(),
            positions,
            normals,
            uvs,
            indices,
            material: primitive
                .material()
                .index()
                .unwrap_or(default_material),
            overlay,
            bounds,
        })
    }

    fn convert_clip(&self, anim: &gltf::Animation, index: usize) -> Option<AnimationClip> {
        let mut channels = Vec::new();
        let mut duration: f32 = 0.0;

        for channel in anim.channels() {
            let Some(&node) = self.node_index.get(&channel.target().node().index()) else {
                continue;
            };
            let reader = channel.reader(|buffer| self.buffers.get(buffer.index()).map(|b| &b.0[..]));
            let Some(times) = reader.read_inputs().map(|i| i.collect::<Vec<f32>>()) else {
                continue;
            };
            if times.is_empty() {
                continue;
            }

            let cubic = channel.sampler().interpolation()
                == gltf::animation::Interpolation::CubicSpline;
            let Some(outputs) = reader.read_outputs() else {
                continue;
            };
            let values = match outputs {
                gltf::animation::util::ReadOutputs::Translations(iter) => {
                    ChannelValues::Translation(pick_values(iter.map(Vec3::from_array), cubic))
                }
                gltf::animation::util::ReadOutputs::Rotations(rotations) => ChannelValues::Rotation(
                    pick_values(rotations.into_f32().map(Quat::from_array), cubic),
                ),
                gltf::animation::util::ReadOutputs::Scales(iter) => {
                    ChannelValues::Scale(pick_values(iter.map(Vec3::from_array), cubic))
                }
                gltf::animation::util::ReadOutputs::MorphTargetWeights(_) => {
                    debug!("morph target channel ignored in animation {:?}", anim.name());
                    continue;
                }
            };

            if let Some(&last) = times.last() {
                duration = duration.max(last);
            }
            channels.push(ClipChannel {
                node,
                times,
                values,
            });
        }

        if channels.is_empty() {
            return None;
        }
        Some(AnimationClip {
            name: anim
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("clip_{}", index)),
            duration,
            channels,
        })
    }
}

/// Cubic-spline samplers store in-tangent / value / out-tangent triplets;
/// keep the value and sample the curve as if linear.
fn pick_values<T>(iter: impl Iterator<Item = T>, cubic: bool) -> Vec<T> {
    if cubic {
        iter.skip(1).step_by(3).collect()
    } else {
        iter.collect()
    }
}

/// Area-weighted vertex normals for primitives that ship without them
fn compute_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let pa = Vec3::from_array(positions[a]);
        let pb = Vec3::from_array(positions[b]);
        let pc = Vec3::from_array(positions[c]);
        let face = (pb - pa).cross(pc - pa);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    normals
        .into_iter()
        .map(|n| n.normalize_or_zero().to_array())
        .collect()
}

fn convert_material(material: gltf::Material) -> MaterialData {
    let pbr = material.pbr_metallic_roughness();
    MaterialData {
        base_color: pbr.base_color_factor(),
        metallic: pbr.metallic_factor(),
        roughness: pbr.roughness_factor(),
        wireframe: false,
        double_sided: material.double_sided(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computed_normals_point_out_of_the_winding() {
        let positions = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let indices = vec![0, 1, 2];
        let normals = compute_normals(&positions, &indices);
        for n in normals {
            assert!((Vec3::from_array(n) - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn cubic_values_keep_the_middle_of_each_triplet() {
        let raw = vec![0, 1, 2, 10, 11, 12, 20, 21, 22];
        assert_eq!(pick_values(raw.into_iter(), true), vec![1, 11, 21]);
    }
}
