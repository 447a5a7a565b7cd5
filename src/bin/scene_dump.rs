//! Builds the random sphere field and writes its traversal buffers to disk, one raw
//! little-endian file per buffer, ready to be uploaded as storage buffers.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use cgmath::InnerSpace;
use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use sphere_bvh::material::MaterialKind;
use sphere_bvh::{point3f, vec3f, BvhConfig, Material, Point3f, Scene, Sphere, SplitMethod};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Split {
    EqualCounts,
    Middle,
    Sah,
}

impl From<Split> for SplitMethod {
    fn from(split: Split) -> Self {
        match split {
            Split::EqualCounts => SplitMethod::EqualCounts,
            Split::Middle => SplitMethod::Middle,
            Split::Sah => SplitMethod::SAH,
        }
    }
}

#[derive(Debug, Parser)]
#[command(about = "Build a sphere BVH and dump its GPU buffers")]
struct Args {
    /// Seed for the scene generator
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = Split::EqualCounts)]
    split: Split,

    /// Directory receiving nodes.bin, matte.bin, metal.bin and glass.bin
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

fn random_field(rng: &mut impl Rng) -> anyhow::Result<Vec<Sphere>> {
    let mut spheres = vec![
        Sphere::new(point3f!(0, -1000, 0), 1000.0, Material::matte(vec3f!(0.5, 0.5, 0.5)))?,
    ];

    let clearing = point3f!(4, 0.2, 0);
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Point3f::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>()
            );
            if (center - clearing).magnitude() <= 0.9 {
                continue;
            }

            let sphere = if choose_mat < 0.8 {
                let albedo = vec3f!(
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>()
                );
                let center1 = center + vec3f!(0, rng.gen_range(0.0..0.5), 0);
                Sphere::moving(center, center1, 0.2, Material::matte(albedo))?
            } else if choose_mat < 0.95 {
                let albedo = vec3f!(
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0)
                );
                Sphere::new(center, 0.2, Material::metal(albedo, rng.gen_range(0.0..0.5)))?
            } else {
                Sphere::new(center, 0.2, Material::glass(1.5))?
            };
            spheres.push(sphere);
        }
    }

    spheres.push(Sphere::new(point3f!(0, 1, 0), 1.0, Material::glass(1.5))?);
    spheres.push(Sphere::new(point3f!(-4, 1, 0), 1.0, Material::matte(vec3f!(0.4, 0.2, 0.1)))?);
    spheres.push(Sphere::new(point3f!(4, 1, 0), 1.0, Material::metal(vec3f!(0.7, 0.6, 0.5), 0.0))?);
    Ok(spheres)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(args.seed);

    let mut scene = Scene::with_config(BvhConfig { split_method: args.split.into() });
    scene.extend(random_field(&mut rng)?);
    let buffers = scene.build_buffers()?;

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    let nodes_path = args.out.join("nodes.bin");
    fs::write(&nodes_path, buffers.node_bytes())
        .with_context(|| format!("writing {}", nodes_path.display()))?;

    for &kind in MaterialKind::ALL.iter() {
        let name = match kind {
            MaterialKind::Matte => "matte.bin",
            MaterialKind::Metal => "metal.bin",
            MaterialKind::Glass => "glass.bin",
        };
        let path = args.out.join(name);
        fs::write(&path, &*buffers.material_bytes(kind))
            .with_context(|| format!("writing {}", path.display()))?;
    }

    tracing::info!(
        spheres = scene.len(),
        nodes = buffers.nodes().len(),
        out = %args.out.display(),
        "Wrote scene buffers"
    );
    Ok(())
}
