//! Fighting-simulation entity types: pure data, no logic.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackKind {
    /// Light attack (J).
    Punch,
    /// Heavy attack (K).
    Kick,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Idle,
    Walking,
    Jumping,
    Attacking(AttackKind),
    Blocking,
    /// Just took a hit. Purely visual; the next action resolution replaces it.
    Stunned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Player,
    Cpu,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Cpu,
            Side::Cpu => Side::Player,
        }
    }
}

// ── Attack window ─────────────────────────────────────────────────────────────

/// An open attack window.  It can land until `expires_at` (ms) or until
/// its first connection, whichever comes first; a spent window stays
/// around only so the attack pose lasts its full duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveAttack {
    pub kind: AttackKind,
    pub expires_at: u64,
    pub landed: bool,
}

// ── Fighter ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Fighter {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Always within `0.0..=100.0`.
    pub health: f32,
    pub action: Action,
    pub facing: Facing,
    pub airborne: bool,
    pub blocking: bool,
    pub attack: Option<ActiveAttack>,
    /// Timestamp (ms) of the last accepted attack; `None` before the first.
    pub last_attack_at: Option<u64>,
    /// Cosmetic oscillation phase.
    pub anim: f32,
}

impl Fighter {
    /// True while an attack window is open and has not connected yet.
    pub fn is_attacking(&self) -> bool {
        self.attack.is_some_and(|a| !a.landed)
    }
}

// ── Particles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleTone {
    /// Damage dealt to the player.
    PlayerHit,
    /// Damage dealt to the computer.
    CpuHit,
    /// An attack bounced off a block.
    Deflect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Starts at 1.0; the particle is dropped once this reaches zero.
    pub life: f32,
    pub tone: ParticleTone,
}

// ── Match state ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FightStatus {
    NotStarted,
    Playing,
    Over { winner: Side },
}

/// Held-key snapshot sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FightInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub block: bool,
    pub punch: bool,
    pub kick: bool,
}

/// The entire fight.  Cloneable so the step function can return a fresh
/// copy without mutating the original.
#[derive(Clone, Debug)]
pub struct FightState {
    pub player: Fighter,
    pub cpu: Fighter,
    pub particles: Vec<Particle>,
    pub status: FightStatus,
    pub frame: u64,
}

impl FightState {
    pub fn fighter(&self, side: Side) -> &Fighter {
        match side {
            Side::Player => &self.player,
            Side::Cpu => &self.cpu,
        }
    }
}
