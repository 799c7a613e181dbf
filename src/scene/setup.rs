use bevy::prelude::*;

use crate::avatar::{Avatar, AvatarPart};
use crate::sandbox::{
    BlockCatalog, BlockPool, Highlighter, HighlighterMaterials, HoveredFace, InteractionSettings,
    PointerRay, SceneAssets, SceneEntities, TemplateCatalog,
};
use crate::scene::OrbitCamera;
use crate::{
    AVATAR_SPAWN, BLOCK_TYPES, CAMERA_INITIAL_DISTANCE, CAMERA_INITIAL_PITCH, CAMERA_INITIAL_YAW,
    FLOOR_Y, GRID_SIZE, SANDBOX_SIZE,
};

/// Template layouts shipped with the binary.
const TEMPLATES_JSON: &str = include_str!("../../assets/templates/templates.json");
/// Cue played when blocks are placed.
const PLACE_SOUND_PATH: &str = "sounds/place.ogg";
/// Cue played when blocks are removed.
const REMOVE_SOUND_PATH: &str = "sounds/remove.ogg";
/// World-space sun position used for light direction.
const SUN_POSITION: Vec3 = Vec3::new(30.0, 50.0, 20.0);
/// Directional-light illuminance used for the sun.
const SUN_ILLUMINANCE: f32 = 12_000.0;
/// Directional-light color used for the sun.
const SUN_COLOR: Color = Color::srgb(1.0, 0.97, 0.90);
/// Clear-color used for the sky background.
const SKY_COLOR: Color = Color::srgb(0.52, 0.74, 0.88);
/// Global ambient-light color.
const AMBIENT_COLOR: Color = Color::srgb(0.72, 0.78, 0.90);
/// Global ambient-light brightness.
const AMBIENT_BRIGHTNESS: f32 = 600.0;
/// Floor colour.
const FLOOR_COLOR: Color = Color::srgb(0.36, 0.52, 0.30);
/// Highlighter colour in build mode.
const BUILD_HIGHLIGHT: Color = Color::srgba(0.1, 0.1, 0.1, 0.45);
/// Highlighter colour in destroy mode.
const DESTROY_HIGHLIGHT: Color = Color::srgba(0.9, 0.1, 0.1, 0.45);

/// Build lighting, floor, sandbox resources, highlighter, camera and avatar.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    setup_environment(&mut commands);
    spawn_floor(&mut commands, &mut meshes, &mut materials);
    insert_sandbox_resources(&mut commands, &mut meshes, &asset_server);
    spawn_highlighter(&mut commands, &mut meshes, &mut materials);
    spawn_camera(&mut commands);
    spawn_avatar(&mut commands, &mut meshes, &mut materials);
}

/// Insert global background and ambient-light resources and the sun.
fn setup_environment(commands: &mut Commands) {
    // Sky-like background color.
    commands.insert_resource(ClearColor(SKY_COLOR));
    commands.insert_resource(bevy::light::GlobalAmbientLight {
        color: AMBIENT_COLOR,
        brightness: AMBIENT_BRIGHTNESS,
        affects_lightmapped_meshes: true,
    });
    commands.spawn((
        bevy::light::DirectionalLight {
            illuminance: SUN_ILLUMINANCE,
            color: SUN_COLOR,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(SUN_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Spawn the visible floor slab under the ambient proxies.
fn spawn_floor(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(Plane3d::default().mesh().size(SANDBOX_SIZE, SANDBOX_SIZE));
    let material = materials.add(StandardMaterial {
        base_color: FLOOR_COLOR,
        perceptual_roughness: 0.95,
        ..default()
    });
    commands.spawn((
        bevy::mesh::Mesh3d(mesh),
        bevy::pbr::MeshMaterial3d(material),
        Transform::from_xyz(0.0, FLOOR_Y, 0.0),
    ));
}

/// Insert the pool, catalogs, interaction state and shared scene handles.
fn insert_sandbox_resources(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    asset_server: &Res<AssetServer>,
) {
    let pool = BlockPool::new(GRID_SIZE, SANDBOX_SIZE, FLOOR_Y);
    info!("sandbox floor: {} proxies", pool.ambient_count());
    commands.insert_resource(pool);

    let mut catalog = BlockCatalog::default();
    for (name, texture, fallback) in BLOCK_TYPES {
        catalog.register(name, asset_server.load(texture), fallback);
    }
    commands.insert_resource(catalog);

    let templates = TemplateCatalog::from_json(TEMPLATES_JSON).unwrap_or_else(|error| {
        warn!("template file rejected: {error}");
        TemplateCatalog::default()
    });
    if templates.is_empty() {
        warn!("no templates available for replay");
    } else {
        info!("loaded {} templates", templates.len());
    }
    commands.insert_resource(templates);

    let first_type = BLOCK_TYPES.first().map_or("", |(name, _, _)| *name);
    commands.insert_resource(InteractionSettings::new(first_type));
    commands.insert_resource(SceneEntities::default());
    commands.insert_resource(PointerRay::default());
    commands.insert_resource(HoveredFace::default());
    commands.insert_resource(SceneAssets {
        block_mesh: meshes.add(Cuboid::from_length(GRID_SIZE)),
        place_sound: asset_server.load(PLACE_SOUND_PATH),
        remove_sound: asset_server.load(REMOVE_SOUND_PATH),
    });
}

/// Spawn the face outline quad and its per-mode materials.
fn spawn_highlighter(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let outline = |color: Color| StandardMaterial {
        base_color: color,
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        cull_mode: None,
        ..default()
    };
    let highlighter_materials = HighlighterMaterials {
        build: materials.add(outline(BUILD_HIGHLIGHT)),
        destroy: materials.add(outline(DESTROY_HIGHLIGHT)),
    };
    let highlighter = Highlighter::new(FLOOR_Y);
    commands.spawn((
        bevy::mesh::Mesh3d(meshes.add(Rectangle::new(GRID_SIZE, GRID_SIZE))),
        bevy::pbr::MeshMaterial3d(highlighter_materials.build.clone()),
        highlighter.parked,
        bevy::light::NotShadowCaster,
        highlighter,
    ));
    commands.insert_resource(highlighter_materials);
}

/// Spawn the orbit camera looking at the sandbox centre.
fn spawn_camera(commands: &mut Commands) {
    let orbit = OrbitCamera::new(
        CAMERA_INITIAL_YAW,
        CAMERA_INITIAL_PITCH,
        CAMERA_INITIAL_DISTANCE,
        Vec3::new(0.0, FLOOR_Y, 0.0),
    );
    commands.spawn((bevy::camera::Camera3d::default(), orbit.transform(), orbit));
}

/// Spawn the avatar root with one pivot and cuboid per body part.
fn spawn_avatar(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let avatar = Avatar::new(0.0);
    commands
        .spawn((
            Transform::from_translation(AVATAR_SPAWN).with_rotation(avatar.body_rotation()),
            Visibility::default(),
            avatar,
        ))
        .with_children(|root| {
            for part in AvatarPart::ALL {
                let mesh = meshes.add(Cuboid::from_size(part.size()));
                let material = materials.add(StandardMaterial {
                    base_color: part.color(),
                    perceptual_roughness: 0.8,
                    ..default()
                });
                root.spawn((part, Transform::from_translation(part.joint()), Visibility::default()))
                    .with_children(|pivot| {
                        pivot.spawn((
                            bevy::mesh::Mesh3d(mesh),
                            bevy::pbr::MeshMaterial3d(material),
                            Transform::from_translation(part.mesh_offset()),
                        ));
                    });
            }
        });
}
