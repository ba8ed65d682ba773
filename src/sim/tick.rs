//! Fixed timestep simulation tick
//!
//! Advances the game by exactly one frame. Player-facing speeds are expressed
//! in pixels per tick, so the step takes no `dt`.

use super::collision::collides;
use super::state::{Asteroid, Bullet, Explosion, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Fire requested since the previous tick
    pub fire: bool,
    /// Asteroids delivered by the spawner since the previous tick
    pub spawns: Vec<Asteroid>,
}

/// What happened during a tick, for the host's HUD and game-over handling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Score after the tick
    pub score: u64,
    /// Asteroids shot down this tick
    pub destroyed: u32,
    /// Final score, set only on the tick the run ended
    pub game_over: Option<u64>,
}

/// Bullet/asteroid hits for one frame, indexed like the slices they came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulletHits {
    pub asteroid_hit: Vec<bool>,
    pub bullet_spent: Vec<bool>,
}

/// Pair bullets with asteroids in a single pass over the cross product.
///
/// Each bullet can be spent on at most one asteroid; an asteroid takes the
/// first unspent bullet overlapping it.
pub fn resolve_bullet_hits(bullets: &[Bullet], asteroids: &[Asteroid]) -> BulletHits {
    let mut bullet_spent = vec![false; bullets.len()];
    let mut asteroid_hit = Vec::with_capacity(asteroids.len());

    for asteroid in asteroids {
        let hit = bullets
            .iter()
            .enumerate()
            .find(|(i, bullet)| !bullet_spent[*i] && collides(*bullet, asteroid))
            .map(|(i, _)| i);

        if let Some(i) = hit {
            bullet_spent[i] = true;
        }
        asteroid_hit.push(hit.is_some());
    }

    BulletHits {
        asteroid_hit,
        bullet_spent,
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if state.phase == GamePhase::GameOver {
        return TickOutcome {
            score: state.score,
            ..Default::default()
        };
    }

    let config = state.config;
    state.time_ticks += 1;

    // Side inputs that arrived between frames
    state.asteroids.extend(input.spawns.iter().copied());
    if input.fire {
        state.bullets.push(Bullet::fired_from(&state.player));
    }

    // Explosions are cosmetic and age first
    state.explosions.retain_mut(Explosion::advance);

    state.player.steer(
        input.left,
        input.right,
        config.player_speed,
        config.playfield_width,
    );

    for bullet in &mut state.bullets {
        bullet.advance(config.bullet_speed);
    }
    state.bullets.retain(Bullet::in_play);

    for asteroid in &mut state.asteroids {
        asteroid.advance();
    }

    // Resolve every hit against the advanced positions, then apply removals
    let hits = resolve_bullet_hits(&state.bullets, &state.asteroids);

    let mut destroyed = 0;
    let mut player_hit = false;
    let asteroids = std::mem::take(&mut state.asteroids);
    for (asteroid, shot) in asteroids.into_iter().zip(hits.asteroid_hit) {
        if shot {
            destroyed += 1;
            state.score += config.score_per_asteroid;
            if config.explosions {
                state
                    .explosions
                    .push(Explosion::at(&asteroid, config.explosion_max_frames));
            }
            continue;
        }

        if collides(&state.player, &asteroid) {
            player_hit = true;
            continue;
        }

        if asteroid.in_play(config.playfield_height) {
            state.asteroids.push(asteroid);
        }
    }

    let mut spent = hits.bullet_spent.into_iter();
    state.bullets.retain(|_| !spent.next().unwrap_or(false));

    let game_over = if player_hit {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at tick {} with score {}",
            state.time_ticks,
            state.score
        );
        Some(state.score)
    } else {
        None
    };

    TickOutcome {
        score: state.score,
        destroyed,
        game_over,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::consts::*;
    use crate::sim::Spawner;
    use glam::Vec2;
    use proptest::prelude::*;

    fn asteroid_at(x: f32, y: f32, speed: f32) -> Asteroid {
        Asteroid {
            pos: Vec2::new(x, y),
            speed,
        }
    }

    fn bullet_at(x: f32, y: f32) -> Bullet {
        Bullet {
            pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_bullet_destroys_asteroid() {
        let mut state = GameState::default();
        state.bullets.push(bullet_at(400.0, 100.0));
        state.asteroids.push(asteroid_at(398.0, 95.0, 2.0));

        let outcome = tick(&mut state, &TickInput::default());

        assert!(state.bullets.is_empty());
        assert!(state.asteroids.is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(outcome.destroyed, 1);
        assert_eq!(outcome.game_over, None);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_asteroid_hits_player() {
        let mut state = GameState::default();
        state.score = 40;
        state.player.pos = Vec2::new(375.0, 550.0);
        // Lands at y=530 after advancing
        state.asteroids.push(asteroid_at(375.0, 528.0, 2.0));

        let outcome = tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(outcome.game_over, Some(40));
        assert_eq!(state.score, 40);
        assert!(state.asteroids.is_empty());
    }

    #[test]
    fn test_shot_asteroid_skips_player_check() {
        let mut state = GameState::default();
        state.player.pos = Vec2::new(375.0, 550.0);
        state.asteroids.push(asteroid_at(375.0, 528.0, 2.0));
        // Bullet sitting inside the asteroid after both advance
        state.bullets.push(bullet_at(380.0, 542.0));

        let outcome = tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(outcome.game_over, None);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_final_score_counts_same_frame_kills() {
        let mut state = GameState::default();
        state.score = 30;
        state.player.pos = Vec2::new(375.0, 550.0);
        // Shot far from the player
        state.asteroids.push(asteroid_at(100.0, 100.0, 2.0));
        state.bullets.push(bullet_at(110.0, 120.0));
        // Lands on the player in the same frame
        state.asteroids.push(asteroid_at(375.0, 528.0, 2.0));

        let outcome = tick(&mut state, &TickInput::default());

        assert_eq!(outcome.destroyed, 1);
        assert_eq!(outcome.game_over, Some(40));
        assert_eq!(outcome.score, 40);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_bullet_expires_at_top_edge() {
        let mut state = GameState::default();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        // Fired from y=550, moves 7 per tick: y=4 after 78 ticks, y=-3 after 79
        tick(&mut state, &fire);
        for _ in 1..78 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos.y, 4.0);

        tick(&mut state, &TickInput::default());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_bullet_fired_before_player_moves() {
        let mut state = GameState::default();
        let input = TickInput {
            fire: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.player.pos.x, 405.0);
        assert_eq!(state.bullets[0].pos.x, 425.0);
        assert_eq!(state.bullets[0].pos.y, 543.0);
    }

    #[test]
    fn test_asteroid_leaves_bottom() {
        let mut state = GameState::default();
        // Far from the player horizontally
        state.asteroids.push(asteroid_at(0.0, 597.0, 2.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.asteroids.len(), 1);

        tick(&mut state, &TickInput::default());
        assert!(state.asteroids.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_one_bullet_destroys_one_asteroid() {
        let mut state = GameState::default();
        // Two overlapping asteroids, one bullet inside both
        state.asteroids.push(asteroid_at(100.0, 100.0, 2.0));
        state.asteroids.push(asteroid_at(110.0, 100.0, 2.0));
        state.bullets.push(bullet_at(115.0, 117.0));

        let outcome = tick(&mut state, &TickInput::default());

        assert_eq!(outcome.destroyed, 1);
        assert_eq!(state.score, 10);
        assert_eq!(state.asteroids.len(), 1);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_two_bullets_one_asteroid() {
        let mut state = GameState::default();
        state.asteroids.push(asteroid_at(100.0, 100.0, 2.0));
        state.bullets.push(bullet_at(105.0, 115.0));
        state.bullets.push(bullet_at(115.0, 115.0));

        let outcome = tick(&mut state, &TickInput::default());

        assert_eq!(outcome.destroyed, 1);
        assert_eq!(state.score, 10);
        assert!(state.asteroids.is_empty());
        // Exactly one bullet was spent
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_resolve_hits_marks_first_unspent_bullet() {
        let bullets = [bullet_at(105.0, 105.0), bullet_at(110.0, 105.0)];
        let asteroids = [asteroid_at(100.0, 100.0, 2.0), asteroid_at(100.0, 100.0, 2.0)];

        let hits = resolve_bullet_hits(&bullets, &asteroids);
        assert_eq!(hits.asteroid_hit, vec![true, true]);
        assert_eq!(hits.bullet_spent, vec![true, true]);

        let hits = resolve_bullet_hits(&bullets[..1], &asteroids);
        assert_eq!(hits.asteroid_hit, vec![true, false]);
    }

    #[test]
    fn test_explosion_spawned_and_expires() {
        let mut state = GameState::default();
        state.bullets.push(bullet_at(400.0, 100.0));
        state.asteroids.push(asteroid_at(398.0, 95.0, 2.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].pos, Vec2::new(398.0, 97.0));
        assert_eq!(state.explosions[0].frame, 0);

        for _ in 0..EXPLOSION_MAX_FRAMES - 1 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.explosions.len(), 1);

        tick(&mut state, &TickInput::default());
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_explosions_disabled() {
        let config = GameConfig {
            explosions: false,
            ..Default::default()
        };
        let mut state = GameState::new(config);
        state.bullets.push(bullet_at(400.0, 100.0));
        state.asteroids.push(asteroid_at(398.0, 95.0, 2.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 10);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut state = GameState::default();
        state.phase = GamePhase::GameOver;
        state.score = 70;

        let input = TickInput {
            fire: true,
            left: true,
            spawns: vec![Asteroid::new(10.0, 3.0)],
            ..Default::default()
        };
        let outcome = tick(&mut state, &input);

        assert_eq!(outcome.score, 70);
        assert_eq!(outcome.game_over, None);
        assert!(state.bullets.is_empty());
        assert!(state.asteroids.is_empty());
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_spawns_are_advanced_on_arrival() {
        let mut state = GameState::default();
        let input = TickInput {
            spawns: vec![Asteroid::new(10.0, 3.0)],
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.asteroids[0].pos.y, -ASTEROID_SIZE + 3.0);
    }

    #[test]
    fn test_determinism() {
        // Two runs with the same seed and inputs should be identical
        let run = |seed: u64| {
            let config = GameConfig::default();
            let mut state = GameState::new(config);
            let mut spawner = Spawner::new(seed, &config);
            for t in 0..600u32 {
                let input = TickInput {
                    left: t % 90 < 30,
                    right: t % 90 > 60,
                    fire: t % 12 == 0,
                    spawns: spawner.poll().into_iter().collect(),
                };
                tick(&mut state, &input);
            }
            state
        };

        let a = run(99999);
        let b = run(99999);
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.player, b.player);
        assert_eq!(a.asteroids, b.asteroids);
        assert_eq!(a.bullets, b.bullets);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            start in 0.0f32..=750.0,
            moves in prop::collection::vec((any::<bool>(), any::<bool>()), 0..300),
        ) {
            let mut state = GameState::default();
            state.player.pos.x = start;

            for (left, right) in moves {
                let input = TickInput { left, right, ..Default::default() };
                tick(&mut state, &input);
                prop_assert!(state.player.pos.x >= 0.0);
                prop_assert!(state.player.pos.x <= PLAYFIELD_WIDTH - PLAYER_WIDTH);
            }
        }
    }
}
