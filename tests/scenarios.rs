mod common;

use approx::assert_abs_diff_eq;
use pretty_assertions::assert_eq;
use sphere_bvh::material::MaterialKind;
use sphere_bvh::{bounds3f, point3f, vec3f, Material, Scene, SceneError, Sphere};

fn links(scene: &Scene) -> anyhow::Result<Vec<(i32, i32, i32)>> {
    let buffers = scene.build_buffers()?;
    Ok(buffers.nodes().iter().map(|n| (n.parent, n.left, n.right)).collect())
}

#[test]
fn single_sphere_at_origin() -> anyhow::Result<()> {
    let mut scene = Scene::new();
    scene.add(Sphere::new(point3f!(0, 0, 0), 1.0, Material::matte(vec3f!(0.5, 0.5, 0.5)))?);

    let bvh = scene.build_bvh()?;
    assert_eq!(bvh.len(), 1);
    assert!(bvh.root().is_leaf());

    let buffers = scene.build_buffers()?;
    let nodes = buffers.nodes();
    assert_eq!(nodes.len(), 1);
    assert!(nodes[0].is_leaf());
    assert_eq!((nodes[0].left, nodes[0].right, nodes[0].parent), (-1, -1, -1));
    assert_eq!(buffers.bounds(), bounds3f!((-1, -1, -1), (1, 1, 1)));
    Ok(())
}

#[test]
fn two_disjoint_spheres() -> anyhow::Result<()> {
    let a = Sphere::new(point3f!(-2, 0, 0), 0.5, Material::glass(1.5))?;
    let b = Sphere::new(point3f!(2, 3, -1), 1.0, Material::metal(vec3f!(0.8, 0.8, 0.8), 0.2))?;
    let mut scene = Scene::new();
    scene.add(a);
    scene.add(b);

    let bvh = scene.build_bvh()?;
    assert_eq!(bvh.len(), 3);
    assert!(!bvh.root().is_leaf());
    assert_eq!(bvh.bounds(), a.bounds().join(&b.bounds()));
    assert_eq!(links(&scene)?, vec![(-1, 1, 2), (0, -1, -1), (0, -1, -1)]);
    Ok(())
}

#[test]
fn five_spheres_split_at_median() -> anyhow::Result<()> {
    let mut scene = Scene::new();
    for &z in &[4.0, 2.0, 0.0, 3.0, 1.0] {
        scene.add(Sphere::new(point3f!(0, 0, z), 0.1, Material::matte(vec3f!(1, 0, 0)))?);
    }

    let buffers = scene.build_buffers()?;
    let nodes = buffers.nodes();
    // left subtree holds z = 0, 1; right subtree holds z = 2 | 3, 4
    assert_eq!(links(&scene)?, vec![
        (-1, 1, 4),
        (0, 2, 3),
        (1, -1, -1),
        (1, -1, -1),
        (0, 5, 6),
        (4, -1, -1),
        (4, 7, 8),
        (6, -1, -1),
        (6, -1, -1),
    ]);
    let leaf_z: Vec<f32> = nodes.iter().filter(|n| n.is_leaf()).map(|n| n.center[2]).collect();
    assert_eq!(leaf_z, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    // material indices follow leaf order, not insertion order
    let indices: Vec<u32> = nodes.iter().filter(|n| n.is_leaf()).map(|n| n.material_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    Ok(())
}

#[test]
fn unused_material_kinds_get_placeholders() -> anyhow::Result<()> {
    let mut scene = Scene::new();
    scene.add(Sphere::new(point3f!(0, 0, 0), 1.0, Material::glass(1.5))?);
    scene.add(Sphere::new(point3f!(3, 0, 0), 1.0, Material::glass(1.3))?);

    let buffers = scene.build_buffers()?;
    assert_eq!(buffers.materials().len(MaterialKind::Matte), 0);
    assert_eq!(&*buffers.material_bytes(MaterialKind::Matte), &[0u8; 16][..]);
    assert_eq!(&*buffers.material_bytes(MaterialKind::Metal), &[0u8; 16][..]);
    assert_eq!(buffers.material_bytes(MaterialKind::Glass).len(), 8);
    Ok(())
}

#[test]
fn node_buffer_word_layout() -> anyhow::Result<()> {
    let mut scene = Scene::new();
    scene.add(Sphere::moving(point3f!(1, 2, 3), point3f!(1, 2.5, 3), 0.5, Material::metal(vec3f!(1, 1, 1), 0.1))?);
    scene.add(Sphere::new(point3f!(-1, 0, 0), 0.25, Material::matte(vec3f!(0.2, 0.2, 0.2)))?);
    let buffers = scene.build_buffers()?;

    let words: &[u32] = bytemuck::cast_slice(buffers.node_bytes());
    assert_eq!(words.len(), 3 * 20);

    // root: bounds, children 1 and 2, no parent, interior
    let root = &words[0..20];
    assert_eq!(f32::from_bits(root[0]), -1.25);
    assert_eq!(f32::from_bits(root[4]), 3.0);
    assert_eq!(root[6] as i32, 1);
    assert_eq!(root[7] as i32, 2);
    assert_eq!(root[8] as i32, -1);
    assert_eq!(root[9], 0);

    // the moving metal sphere is the first leaf
    let leaf = &words[20..40];
    assert_eq!(leaf[8] as i32, 0);
    assert_eq!(leaf[9], 1);
    assert_eq!([f32::from_bits(leaf[10]), f32::from_bits(leaf[11]), f32::from_bits(leaf[12])], [1.0, 2.0, 3.0]);
    assert_abs_diff_eq!(f32::from_bits(leaf[14]), 0.5, epsilon = 1e-6);
    assert_eq!(f32::from_bits(leaf[16]), 0.5);
    assert_eq!(leaf[17], MaterialKind::Metal.tag());
    assert_eq!(leaf[18], 0);
    assert_eq!(leaf[19], 1);
    Ok(())
}

#[test]
fn moving_sphere_center_at() -> anyhow::Result<()> {
    let s = Sphere::moving(point3f!(0, 0.2, 0), point3f!(0, 0.6, 0), 0.2, Material::matte(vec3f!(1, 1, 1)))?;
    assert_abs_diff_eq!(s.center_at(0.25).y, 0.3, epsilon = 1e-6);
    assert_abs_diff_eq!(s.bounds().max.y, 0.8, epsilon = 1e-6);
    assert_abs_diff_eq!(s.bounds().min.y, 0.0, epsilon = 1e-6);
    Ok(())
}

#[test]
fn configuration_errors_are_reported() {
    assert_eq!(
        Sphere::new(point3f!(0, 0, 0), 0.0, Material::glass(1.5)),
        Err(SceneError::NonPositiveRadius { radius: 0.0 })
    );
    assert_eq!(
        Sphere::new(point3f!(0, 0, 0), f32::INFINITY, Material::glass(1.5)),
        Err(SceneError::NonFiniteRadius { radius: f32::INFINITY })
    );
    assert_eq!(Scene::new().build_buffers(), Err(SceneError::EmptyScene));
    assert_eq!(Scene::new().build_bvh(), Err(SceneError::EmptyScene));
}

#[test]
fn large_random_scene_builds() -> anyhow::Result<()> {
    let scene = common::random_scene(1234, 5000);
    let buffers = scene.build_buffers()?;
    assert_eq!(buffers.nodes().len(), 9999);
    assert_eq!(buffers.bounds(), scene.world_bound());
    assert_eq!(buffers.materials().total_len(), 5000);
    Ok(())
}
