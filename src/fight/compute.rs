//! Pure fighting-simulation logic.
//!
//! Every public function takes the current `FightState` by reference and
//! returns a brand-new one.  Time enters as a millisecond timestamp and
//! randomness through an injected RNG, so a step is fully reproducible
//! from its arguments.

use rand::Rng;
use tracing::debug;

use crate::config::{FightConfig, FightParams};
use crate::fight::ai::{self, AiDecision, AiView};
use crate::fight::entities::{
    Action, ActiveAttack, AttackKind, Facing, FightInput, FightState, FightStatus, Fighter,
    Particle, ParticleTone, Side,
};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

pub fn body_box(fighter: &Fighter, config: &FightConfig) -> Rect {
    Rect {
        x: fighter.x,
        y: fighter.y,
        w: config.fighter_width,
        h: config.fighter_height,
    }
}

/// The strip in front of a fighter that an attack reaches.
pub fn reach_box(fighter: &Fighter, config: &FightConfig) -> Rect {
    let x = match fighter.facing {
        Facing::Right => fighter.x + config.fighter_width,
        Facing::Left => fighter.x - config.attack_range,
    };
    Rect {
        x,
        y: fighter.y + FightParams::ATTACK_BOX_OFFSET_Y,
        w: config.attack_range,
        h: FightParams::ATTACK_BOX_HEIGHT,
    }
}

fn damage_for(attacker: Side, kind: AttackKind) -> f32 {
    match (attacker, kind) {
        (Side::Player, AttackKind::Punch) => FightParams::PLAYER_PUNCH_DAMAGE,
        (Side::Player, AttackKind::Kick) => FightParams::PLAYER_KICK_DAMAGE,
        (Side::Cpu, AttackKind::Punch) => FightParams::CPU_PUNCH_DAMAGE,
        (Side::Cpu, AttackKind::Kick) => FightParams::CPU_KICK_DAMAGE,
    }
}

// ── Constructors ──────────────────────────────────────────────────────────────

fn fresh_fighter(x: f32, facing: Facing, config: &FightConfig) -> Fighter {
    Fighter {
        x,
        y: config.standing_y(),
        vx: 0.0,
        vy: 0.0,
        health: FightParams::MAX_HEALTH,
        action: Action::Idle,
        facing,
        airborne: false,
        blocking: false,
        attack: None,
        last_attack_at: None,
        anim: 0.0,
    }
}

/// Both fighters at their spawn points, waiting for the start action.
pub fn init_state(config: &FightConfig) -> FightState {
    FightState {
        player: fresh_fighter(FightParams::PLAYER_START_X, Facing::Right, config),
        cpu: fresh_fighter(FightParams::CPU_START_X, Facing::Left, config),
        particles: Vec::new(),
        status: FightStatus::NotStarted,
        frame: 0,
    }
}

/// `NotStarted → Playing`.  Any other status is returned unchanged.
pub fn start(state: &FightState) -> FightState {
    if state.status != FightStatus::NotStarted {
        return state.clone();
    }
    FightState {
        status: FightStatus::Playing,
        ..state.clone()
    }
}

/// Full reset straight into a running match.
pub fn restart(config: &FightConfig) -> FightState {
    FightState {
        status: FightStatus::Playing,
        ..init_state(config)
    }
}

// ── Attacks ───────────────────────────────────────────────────────────────────

/// Open an attack window if the cooldown allows it.  Rejected (fighter
/// returned unchanged) while blocking, while a window is still open, or
/// within the cooldown of the previous attack.
pub fn perform_attack(fighter: &Fighter, kind: AttackKind, now: u64, config: &FightConfig) -> Fighter {
    let cooling = fighter
        .last_attack_at
        .is_some_and(|last| now.saturating_sub(last) < config.attack_cooldown_ms);
    if cooling || fighter.blocking || fighter.attack.is_some() {
        return fighter.clone();
    }
    Fighter {
        action: Action::Attacking(kind),
        attack: Some(ActiveAttack {
            kind,
            expires_at: now + config.attack_window_ms,
            landed: false,
        }),
        last_attack_at: Some(now),
        ..fighter.clone()
    }
}

/// Close windows whose expiry has passed.
fn expire_attack(fighter: &Fighter, now: u64) -> Fighter {
    match fighter.attack {
        Some(attack) if now >= attack.expires_at => Fighter {
            attack: None,
            action: if fighter.action == Action::Attacking(attack.kind) {
                Action::Idle
            } else {
                fighter.action
            },
            ..fighter.clone()
        },
        _ => fighter.clone(),
    }
}

/// True when an open, unspent attack of `attacker` reaches `defender`.
pub fn check_hit(attacker: &Fighter, defender: &Fighter, config: &FightConfig) -> bool {
    attacker.is_attacking() && reach_box(attacker, config).overlaps(&body_box(defender, config))
}

// ── Input & AI ────────────────────────────────────────────────────────────────

/// Map the sampled key state onto the player fighter.
pub fn apply_input(player: &Fighter, input: FightInput, now: u64, config: &FightConfig) -> Fighter {
    let mut p = player.clone();

    p.vx = 0.0;
    if input.left {
        p.vx = -config.move_speed;
        p.facing = Facing::Left;
    }
    if input.right {
        p.vx = config.move_speed;
        p.facing = Facing::Right;
    }

    p.blocking = input.block && !p.airborne;

    if p.blocking {
        p.vx = 0.0;
        p.action = Action::Blocking;
    } else if input.punch {
        p = perform_attack(&p, AttackKind::Punch, now, config);
    } else if input.kick {
        p = perform_attack(&p, AttackKind::Kick, now, config);
    } else if p.vx != 0.0 {
        p.action = Action::Walking;
    } else if !p.airborne {
        p.action = Action::Idle;
    }

    // Blocking pins the fighter to the ground.
    if input.jump && !p.airborne && !p.blocking {
        p.vy = config.jump_force;
        p.airborne = true;
        p.action = Action::Jumping;
    }

    p
}

fn cooldown_elapsed(fighter: &Fighter, now: u64, interval: u64) -> bool {
    fighter
        .last_attack_at
        .map_or(true, |last| now.saturating_sub(last) > interval)
}

/// Run the opponent policy and apply its decision to the CPU fighter.
pub fn apply_ai(
    cpu: &Fighter,
    player: &Fighter,
    now: u64,
    config: &FightConfig,
    rng: &mut impl Rng,
) -> Fighter {
    let mut c = cpu.clone();
    c.facing = if player.x > c.x { Facing::Right } else { Facing::Left };

    let view = AiView {
        distance: (c.x - player.x).abs(),
        player_attacking: player.is_attacking(),
        cooldown_elapsed: cooldown_elapsed(&c, now, config.ai_attack_interval_ms),
    };

    match ai::decide(view, config, rng) {
        AiDecision::Approach => {
            c.vx = c.facing.sign() * config.move_speed * FightParams::AI_SPEED_FACTOR;
            c.action = Action::Walking;
            c.blocking = false;
        }
        AiDecision::Block => {
            c.vx = 0.0;
            c.blocking = true;
            c.action = Action::Blocking;
        }
        AiDecision::Attack(kind) => {
            c.vx = 0.0;
            c.blocking = false;
            c = perform_attack(&c, kind, now, config);
        }
        AiDecision::Idle => {
            c.vx = 0.0;
            c.blocking = false;
            c.action = Action::Idle;
        }
    }
    c
}

// ── Physics ───────────────────────────────────────────────────────────────────

/// Integrate one tick: velocity, gravity, ground and wall clamps.
pub fn integrate(fighter: &Fighter, config: &FightConfig) -> Fighter {
    let mut f = fighter.clone();
    f.x += f.vx;
    f.y += f.vy;
    f.vy += config.gravity;
    if f.y > config.standing_y() {
        f.y = config.standing_y();
        f.vy = 0.0;
        f.airborne = false;
    }
    f.x = config.clamp_x(f.x);
    f.anim += FightParams::ANIMATION_STEP;
    f
}

// ── Hit resolution ────────────────────────────────────────────────────────────

fn burst(x: f32, y: f32, tone: ParticleTone, rng: &mut impl Rng) -> Vec<Particle> {
    let speed = FightParams::PARTICLE_SPEED;
    (0..FightParams::PARTICLES_PER_IMPACT)
        .map(|_| Particle {
            x,
            y,
            vx: rng.gen_range(-speed..speed),
            vy: rng.gen_range(-speed..speed),
            life: 1.0,
            tone,
        })
        .collect()
}

/// Resolve `attacker`'s open window against `defender`.  Returns the
/// updated pair plus any particles spawned.  A window lands at most once:
/// a connecting attack is marked spent whether or not it was blocked.
pub fn resolve_hit(
    attacker: &Fighter,
    defender: &Fighter,
    attacker_side: Side,
    config: &FightConfig,
    rng: &mut impl Rng,
) -> (Fighter, Fighter, Vec<Particle>) {
    let attack = match attacker.attack {
        Some(attack) if check_hit(attacker, defender, config) => attack,
        _ => return (attacker.clone(), defender.clone(), Vec::new()),
    };

    let mut a = attacker.clone();
    let mut d = defender.clone();
    a.attack = Some(ActiveAttack {
        landed: true,
        ..attack
    });

    let impact_y = d.y + 40.0;
    let particles = if d.blocking {
        let x = match d.facing {
            Facing::Right => d.x - 10.0,
            Facing::Left => d.x + config.fighter_width + 10.0,
        };
        debug!(attacker = ?attacker_side, kind = ?attack.kind, "attack deflected");
        burst(x, impact_y, ParticleTone::Deflect, rng)
    } else {
        let damage = damage_for(attacker_side, attack.kind);
        d.health = (d.health - damage).clamp(0.0, FightParams::MAX_HEALTH);
        d.action = Action::Stunned;
        let tone = match attacker_side.other() {
            Side::Player => ParticleTone::PlayerHit,
            Side::Cpu => ParticleTone::CpuHit,
        };
        debug!(attacker = ?attacker_side, kind = ?attack.kind, health = d.health, "hit landed");
        burst(d.x + config.fighter_width / 2.0, impact_y, tone, rng)
    };

    (a, d, particles)
}

/// Move every particle one tick and drop the dead ones.
pub fn advance_particles(particles: &[Particle]) -> Vec<Particle> {
    particles
        .iter()
        .map(|p| Particle {
            x: p.x + p.vx,
            y: p.y + p.vy,
            life: p.life - FightParams::PARTICLE_DECAY,
            ..p.clone()
        })
        .filter(|p| p.life > 0.0)
        .collect()
}

fn status_after(player: &Fighter, cpu: &Fighter) -> FightStatus {
    if player.health <= 0.0 {
        FightStatus::Over { winner: Side::Cpu }
    } else if cpu.health <= 0.0 {
        FightStatus::Over { winner: Side::Player }
    } else {
        FightStatus::Playing
    }
}

// ── Per-tick step ─────────────────────────────────────────────────────────────

/// Advance the match by one tick.  Only a `Playing` match moves; any other
/// status is returned unchanged.
pub fn tick(
    state: &FightState,
    input: FightInput,
    now: u64,
    config: &FightConfig,
    rng: &mut impl Rng,
) -> FightState {
    if state.status != FightStatus::Playing {
        return state.clone();
    }

    // ── 1. Close expired attack windows ──────────────────────────────────────
    let player = expire_attack(&state.player, now);
    let cpu = expire_attack(&state.cpu, now);

    // ── 2. Player input, then the opponent's reaction ────────────────────────
    let player = apply_input(&player, input, now, config);
    let cpu = apply_ai(&cpu, &player, now, config, rng);

    // ── 3. Physics ───────────────────────────────────────────────────────────
    let player = integrate(&player, config);
    let cpu = integrate(&cpu, config);

    // ── 4. Hits, player first ────────────────────────────────────────────────
    let (player, cpu, mut spawned) = resolve_hit(&player, &cpu, Side::Player, config, rng);
    let (cpu, player, counter) = resolve_hit(&cpu, &player, Side::Cpu, config, rng);
    spawned.extend(counter);

    // ── 5. Particles ─────────────────────────────────────────────────────────
    let mut particles = state.particles.clone();
    particles.extend(spawned);
    let particles = advance_particles(&particles);

    // ── 6. Result ────────────────────────────────────────────────────────────
    let status = status_after(&player, &cpu);

    FightState {
        player,
        cpu,
        particles,
        status,
        frame: state.frame + 1,
    }
}
