use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use sphere_bvh::{point3f, vec3f, Material, Scene, Sphere};

pub fn random_material(rng: &mut impl Rng) -> Material {
    let choose: f32 = rng.gen();
    if choose < 0.6 {
        Material::matte(vec3f!(rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>()))
    } else if choose < 0.9 {
        Material::metal(vec3f!(rng.gen_range(0.5..1.0), rng.gen_range(0.5..1.0), rng.gen_range(0.5..1.0)), rng.gen_range(0.0..0.5))
    } else {
        Material::glass(rng.gen_range(1.1..2.4))
    }
}

/// Spheres scattered through a 100-unit cube, about a quarter of them moving.
pub fn random_spheres(seed: u64, n: usize) -> Vec<Sphere> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let center = point3f!(
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0),
                rng.gen_range(-50.0..50.0)
            );
            let radius = rng.gen_range(0.05..3.0);
            let material = random_material(&mut rng);
            if rng.gen_bool(0.25) {
                let center1 = center + vec3f!(0, rng.gen_range(0.0..0.5), 0);
                Sphere::moving(center, center1, radius, material).unwrap()
            } else {
                Sphere::new(center, radius, material).unwrap()
            }
        })
        .collect()
}

pub fn random_scene(seed: u64, n: usize) -> Scene {
    let mut scene = Scene::new();
    scene.extend(random_spheres(seed, n));
    scene
}
