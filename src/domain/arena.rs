// Arena: owns every entity of a session, grouped by collision group.

use crate::domain::errors::SessionError;
use crate::domain::state::{Body, EntityId, EntityRef, Fixture, Group, MonsterEntity, PlayerEntity};
use crate::domain::systems::projectiles::ProjectilePool;
use crate::domain::tuning::session::{FixtureSpec, SessionConfig, WorldBounds};

/// Snapshot of an enabled body, tagged with its owner.
#[derive(Debug, Clone, Copy)]
pub struct Collider {
    pub entity: EntityRef,
    pub body: Body,
}

pub struct Arena {
    pub bounds: WorldBounds,
    pub players: Vec<PlayerEntity>,
    pub hazards: Vec<Fixture>,
    pub monsters: Vec<MonsterEntity>,
    pub obstacles: Vec<Fixture>,
    pub collectibles: Vec<Fixture>,
    // Bullets group.
    pub projectiles: ProjectilePool,
}

impl Arena {
    /// Builds every entity of the session. Ids are assigned in config order.
    pub fn from_config(config: &SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;

        let mut next_id: EntityId = 1;
        let mut alloc = || {
            let id = next_id;
            next_id += 1;
            id
        };

        let players = config
            .players
            .iter()
            .map(|tuning| PlayerEntity::new(alloc(), *tuning))
            .collect();
        let hazards = fixtures(&config.hazards, Group::Hazard, &mut alloc);
        let obstacles = fixtures(&config.obstacles, Group::Obstacle, &mut alloc);
        let collectibles = fixtures(&config.collectibles, Group::Collectible, &mut alloc);
        let monsters = config
            .monsters
            .iter()
            .map(|spec| {
                let body = Body::new(spec.x, spec.y, spec.width, spec.height);
                MonsterEntity::new(alloc(), body, spec.tuning.clone())
            })
            .collect();
        let projectiles = ProjectilePool::new(config.projectile, alloc());

        Ok(Self {
            bounds: config.world,
            players,
            hazards,
            monsters,
            obstacles,
            collectibles,
            projectiles,
        })
    }

    pub fn player(&self, id: EntityId) -> Option<&PlayerEntity> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: EntityId) -> Option<&mut PlayerEntity> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn monster(&self, id: EntityId) -> Option<&MonsterEntity> {
        self.monsters.iter().find(|m| m.id == id)
    }

    pub fn monster_mut(&mut self, id: EntityId) -> Option<&mut MonsterEntity> {
        self.monsters.iter_mut().find(|m| m.id == id)
    }

    pub fn collectible_mut(&mut self, id: EntityId) -> Option<&mut Fixture> {
        self.collectibles.iter_mut().find(|c| c.id == id)
    }

    /// Every enabled body in the arena.
    pub fn colliders(&self) -> Vec<Collider> {
        let players = self
            .players
            .iter()
            .map(|p| (EntityRef::new(p.id, Group::Player), p.body));
        let monsters = self
            .monsters
            .iter()
            .map(|m| (EntityRef::new(m.id, Group::Monster), m.body));
        let fixtures = self
            .hazards
            .iter()
            .chain(&self.obstacles)
            .chain(&self.collectibles)
            .map(|f| (EntityRef::new(f.id, f.group), f.body));
        let projectiles = self
            .projectiles
            .active()
            .map(|p| (EntityRef::new(p.id, Group::Projectile), p.body));

        players
            .chain(monsters)
            .chain(fixtures)
            .chain(projectiles)
            .filter(|(_, body)| body.enabled)
            .map(|(entity, body)| Collider { entity, body })
            .collect()
    }
}

fn fixtures(
    specs: &[FixtureSpec],
    group: Group,
    alloc: &mut impl FnMut() -> EntityId,
) -> Vec<Fixture> {
    specs
        .iter()
        .map(|spec| Fixture {
            id: alloc(),
            group,
            body: Body::new(spec.x, spec.y, spec.width, spec.height),
            animation: spec.animation.clone(),
        })
        .collect()
}
