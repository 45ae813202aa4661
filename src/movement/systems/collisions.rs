//! Movement domain: ground probe and surface contact routing.

use avian3d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::movement::components::{GameLayer, Locomotion, Player, PlayerCapsule, Surface};
use crate::movement::events::SurfaceContact;
use crate::movement::resources::LocomotionTuning;

/// A HitLegs contact only counts when the contact normal is near
/// horizontal; anything steeper is ordinary terrain underfoot.
pub(crate) const HIT_LEGS_MAX_UP_COMPONENT: f32 = 0.05;

pub(crate) fn hit_legs_normal_triggers(normal_up: f32) -> bool {
    normal_up <= HIT_LEGS_MAX_UP_COMPONENT
}

/// Sphere probe at the capsule foot, against walkable geometry only.
pub(crate) fn update_grounded(
    spatial_query: SpatialQuery,
    tuning: Res<LocomotionTuning>,
    mut query: Query<(&Transform, &mut Locomotion), With<Player>>,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);
    let probe = Collider::sphere(tuning.grounded_radius);

    for (transform, mut loco) in &mut query {
        let was_grounded = loco.grounded;

        let probe_center = Vec3::new(
            transform.translation.x,
            transform.translation.y - tuning.grounded_offset,
            transform.translation.z,
        );

        let hits =
            spatial_query.shape_intersections(&probe, probe_center, Quat::IDENTITY, &ground_filter);
        loco.grounded = !hits.is_empty();

        if loco.grounded && !was_grounded {
            debug!("Landed (vertical velocity {:.2})", loco.vertical_velocity);
        } else if !loco.grounded && was_grounded {
            debug!("Left ground");
        }
    }
}

/// Resolve raw collision messages against `Surface`-tagged geometry into
/// typed contact messages. Both solid and sensor wall-run surfaces route
/// through here; the pending flag downstream de-duplicates them.
pub(crate) fn route_surface_contacts(
    mut collision_start_events: MessageReader<CollisionStart>,
    collisions: Collisions,
    surfaces: Query<&Surface>,
    player_parts: Query<Entity, Or<(With<Player>, With<PlayerCapsule>)>>,
    mut contacts: MessageWriter<SurfaceContact>,
) {
    if player_parts.is_empty() {
        for _ in collision_start_events.read() {}
        return;
    }

    for event in collision_start_events.read() {
        let (surface_entity, other) = if surfaces.get(event.collider1).is_ok() {
            (event.collider1, event.collider2)
        } else if surfaces.get(event.collider2).is_ok() {
            (event.collider2, event.collider1)
        } else {
            continue;
        };

        if !player_parts.contains(other) {
            continue;
        }

        let Ok(&kind) = surfaces.get(surface_entity) else {
            continue;
        };

        // Sensors produce no manifold; a zero up-component routes them as
        // side contacts, which is what a wall-run zone is
        let normal_up = contact_normal_toward(&collisions, surface_entity, other)
            .map(|normal| normal.y)
            .unwrap_or(0.0);

        if kind == Surface::HitLegs && !hit_legs_normal_triggers(normal_up) {
            debug!("HitLegs contact rejected, walkable normal (up {normal_up:.3})");
            continue;
        }

        contacts.write(SurfaceContact { kind, normal_up });
    }
}

/// Contact normal oriented to point out of the surface toward the player.
fn contact_normal_toward(collisions: &Collisions, surface: Entity, player: Entity) -> Option<Vec3> {
    let pair = collisions.get(surface, player)?;
    let manifold = pair.manifolds.first()?;
    let normal = manifold.normal;
    Some(if pair.collider1 == surface {
        normal
    } else {
        -normal
    })
}
