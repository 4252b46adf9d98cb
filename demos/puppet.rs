//! Brings a 2D puppet to life as a 3D character and swings its last bone back and forth.
//!
//! Usage: `cargo run --example puppet --features serde -- [puppet.json]`
//!
//! Set `RUST_LOG=debug` for details of the setup.
use std::{fs, path::PathBuf};

use anyhow::Context;
use glam::{vec2, Affine2};
use marionette::{
    mesh::Polygon2D,
    scene::{Character, CharacterConfig, Puppet},
    skeleton::{Skeleton2D, SkeletonSource},
};
use tracing_subscriber::{layer::SubscriberExt, registry, util::SubscriberInitExt, EnvFilter};
use tracing_tree::HierarchicalLayer;

const FRAMES: usize = 8;
const TIMESTEP: f32 = 1.0 / 30.0;

pub fn main() -> anyhow::Result<()> {
    registry()
        .with(EnvFilter::from_default_env())
        .with(
            HierarchicalLayer::default()
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true),
        )
        .init();

    let puppet = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => load(&path)?,
        None => builtin()?,
    };

    if let Err(err) = run(puppet) {
        tracing::error!("{err:?}");
        Err(err)
    } else {
        Ok(())
    }
}

fn load(path: &PathBuf) -> anyhow::Result<Puppet> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read puppet {path:?}"))?;

    serde_json::from_str(&contents).with_context(|| format!("Failed to parse puppet {path:?}"))
}

/// A two bone arm cut out of a 512x512 image
fn builtin() -> anyhow::Result<Puppet> {
    let bones = [
        ("shoulder", None, Affine2::from_translation(vec2(256.0, 448.0))),
        ("elbow", Some(0), Affine2::from_translation(vec2(0.0, -192.0))),
    ];

    let mut skeleton = Skeleton2D::new();
    for (name, parent, rest) in bones {
        skeleton
            .add_bone(name, parent, rest)
            .with_context(|| format!("Failed to add bone {name:?}"))?;
    }

    let polygon = Polygon2D::new([
        vec2(224.0, 448.0),
        vec2(288.0, 448.0),
        vec2(288.0, 256.0),
        vec2(288.0, 64.0),
        vec2(224.0, 64.0),
        vec2(224.0, 256.0),
    ])
    .with_bone_weights([1.0, 1.0, 0.5, 0.0, 0.0, 0.5])
    .with_bone_weights([0.0, 0.0, 0.5, 1.0, 1.0, 0.5]);

    Ok(Puppet::new(skeleton, polygon).with_config(CharacterConfig::default()))
}

fn run(puppet: Puppet) -> anyhow::Result<()> {
    let mut character = puppet
        .instantiate()
        .context("Failed to set up character")?;

    let last = character
        .skeleton_2d()
        .bone_count()
        .checked_sub(1)
        .context("Puppet has no bones")?;

    let rest = character.skeleton_2d().bones()[last].rest();

    for frame in 0..FRAMES {
        let time = frame as f32 * TIMESTEP;
        let angle = (time * std::f32::consts::TAU * 2.0).sin() * 0.5;

        character
            .skeleton_2d_mut()
            .set_pose(last, rest * Affine2::from_angle(angle))?;

        character.process(TIMESTEP);

        let _span = tracing::info_span!("frame", frame).entered();
        for (vertex, position) in character.deformed_positions().iter().enumerate() {
            tracing::info!(vertex, %position);
        }
    }

    Ok(())
}
