//! Grid-snapping first-person walker.
//!
//! [`GridWalker`] turns analog input into discrete steps of exactly
//! `grid_spacing` world units along a single world axis. It is driven by two
//! host calls:
//! - [`GridWalker::on_physics_tick`] – fixed rate: samples input while idle,
//!   starts a walk session, and advances the active session by one step
//! - [`GridWalker::on_render_tick`] – once per frame: applies mouse look
//!
//! The collision callback [`GridWalker::on_controller_collider_hit`] is fed
//! with the contacts the physics body reports. A sideways contact during a
//! session makes the walker turn around once and head back to the tile it
//! started from.
//!
//! # Walk session lifecycle
//!
//! ```text
//!  Idle --(input != 0)--> Walking{start, target, move_dir}
//!  Walking --(|target - pos| <= margin)--> snap to target --> Idle
//!  Walking --(side hit, not yet reversed)--> Walking{target = start, -move_dir}
//! ```
//!
//! A session that can never reach its target (blocked on both sides) keeps
//! walking forever; nothing detects that.

use bevy_ecs::prelude::Component;
use log::{debug, trace};
use raylib::prelude::{Vector2, Vector3};

use crate::capabilities::{
    AudioSink, AxisSource, CollisionFlags, ControllerHit, IndexSource, InputAxis, LookProvider,
    LookRotation, Mover,
};
use crate::components::footsteps::FootstepPool;
use crate::components::headbob::CurveControlledBob;

/// World gravity in units per second squared.
pub const GRAVITY: Vector3 = Vector3 {
    x: 0.0,
    y: -9.81,
    z: 0.0,
};

/// Tunables fixed at spawn time.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkerSettings {
    pub walk_speed: f32,
    /// Length of one grid step.
    pub grid_spacing: f32,
    /// Distance under which the target counts as reached.
    pub movement_margin: f32,
    pub gravity_multiplier: f32,
    /// Downward speed applied while grounded.
    pub stick_to_ground_force: f32,
    /// Stride distance between footsteps.
    pub step_interval: f32,
    pub use_head_bob: bool,
    /// Round session start and target to whole units.
    pub lock_to_whole_units: bool,
    /// Camera rest position relative to the body center.
    pub camera_offset: Vector3,
}

impl Default for WalkerSettings {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            grid_spacing: 6.0,
            movement_margin: 0.1,
            gravity_multiplier: 2.0,
            stick_to_ground_force: 10.0,
            step_interval: 5.0,
            use_head_bob: true,
            lock_to_whole_units: false,
            camera_offset: Vector3::new(0.0, 0.8, 0.0),
        }
    }
}

/// One grid step in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkSession {
    /// Velocity submitted to the mover (horizontal speed plus vertical).
    pub move_dir: Vector3,
    pub start: Vector3,
    pub target: Vector3,
    /// Set once the wall bounce has been used up.
    pub reversed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WalkState {
    #[default]
    Idle,
    Walking(WalkSession),
}

/// Camera state owned by the walker: local offset (head bob) and pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub local_position: Vector3,
    pub pitch: f32,
}

#[derive(Component, Debug, Clone)]
pub struct GridWalker {
    pub settings: WalkerSettings,
    state: WalkState,
    input: Vector2,
    speed: f32,
    /// Velocity of the active session; gravity accumulates into `y`.
    move_dir: Vector3,
    collided_while_walking: bool,
    collision_flags: CollisionFlags,
    step_cycle: f32,
    next_step: f32,
    footsteps: FootstepPool,
    head_bob: CurveControlledBob,
    camera: CameraRig,
    footsteps_played: u32,
    sessions_completed: u32,
}

impl GridWalker {
    pub fn new(settings: WalkerSettings, footsteps: FootstepPool, head_bob: CurveControlledBob) -> Self {
        let mut head_bob = head_bob;
        head_bob.setup(settings.camera_offset, settings.step_interval);
        let step_cycle = 0.0;
        Self {
            camera: CameraRig {
                local_position: settings.camera_offset,
                pitch: 0.0,
            },
            settings,
            state: WalkState::Idle,
            input: Vector2::zero(),
            speed: 0.0,
            move_dir: Vector3::zero(),
            collided_while_walking: false,
            collision_flags: CollisionFlags::NONE,
            step_cycle,
            next_step: step_cycle / 2.0,
            footsteps,
            head_bob,
            footsteps_played: 0,
            sessions_completed: 0,
        }
    }

    pub fn state(&self) -> &WalkState {
        &self.state
    }

    pub fn session(&self) -> Option<&WalkSession> {
        match &self.state {
            WalkState::Walking(session) => Some(session),
            WalkState::Idle => None,
        }
    }

    pub fn is_walking(&self) -> bool {
        matches!(self.state, WalkState::Walking(_))
    }

    /// Intent captured by the last idle input sample.
    pub fn input(&self) -> Vector2 {
        self.input
    }

    pub fn collided_while_walking(&self) -> bool {
        self.collided_while_walking
    }

    pub fn collision_flags(&self) -> CollisionFlags {
        self.collision_flags
    }

    pub fn stride(&self) -> (f32, f32) {
        (self.step_cycle, self.next_step)
    }

    pub fn footsteps(&self) -> &FootstepPool {
        &self.footsteps
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn footsteps_played(&self) -> u32 {
        self.footsteps_played
    }

    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    /// Per-frame camera look.
    pub fn on_render_tick<L, M>(&mut self, look: &mut L, mover: &mut M, dt: f32)
    where
        L: LookProvider + ?Sized,
        M: Mover + ?Sized,
    {
        let current = LookRotation {
            yaw: mover.yaw(),
            pitch: self.camera.pitch,
        };
        let next = look.look_rotation(current, dt);
        mover.set_yaw(next.yaw);
        self.camera.pitch = next.pitch;
    }

    /// Fixed-step update: sample input while idle, then advance the session.
    pub fn on_physics_tick<M, A, S, R>(
        &mut self,
        dt: f32,
        mover: &mut M,
        axes: &A,
        audio: &mut S,
        rng: &mut R,
    ) where
        M: Mover + ?Sized,
        A: AxisSource + ?Sized,
        S: AudioSink + ?Sized,
        R: IndexSource + ?Sized,
    {
        if !self.is_walking() {
            self.move_dir = Vector3::zero();
            self.speed = self.sample_input(axes);
            if self.input.length() > 0.0 {
                self.begin_session(mover);
            }
        }

        if self.is_walking() {
            self.advance_session(dt, mover, audio, rng);
        }
    }

    /// Collision callback. Sideways contacts during a session arm the
    /// one-shot bounce; contacts purely underfoot are ignored.
    pub fn on_controller_collider_hit(&mut self, hit: &ControllerHit) {
        if hit.flags == CollisionFlags::BELOW {
            return;
        }
        if hit.flags.intersects(CollisionFlags::SIDES) && self.is_walking() {
            self.collided_while_walking = true;
        }
    }

    /// Read both axes, keep the dominant one and clamp the length to 1.
    /// Returns the walk speed.
    fn sample_input<A: AxisSource + ?Sized>(&mut self, axes: &A) -> f32 {
        let horizontal = axes.axis(InputAxis::Horizontal);
        let vertical = axes.axis(InputAxis::Vertical);
        self.input = dominant_axis_intent(horizontal, vertical);
        self.settings.walk_speed
    }

    fn begin_session<M: Mover + ?Sized>(&mut self, mover: &M) {
        let desired = mover.forward() * self.input.y + mover.right() * self.input.x;
        let desired = collapse_to_grid_axis(desired);

        self.move_dir.x = desired.x * self.speed;
        self.move_dir.z = desired.z * self.speed;

        let position = mover.position();
        let mut target = position + desired * self.settings.grid_spacing;
        let mut start = position;
        if self.settings.lock_to_whole_units {
            target = round_to_whole_units(target);
            start = round_to_whole_units(start);
        }

        self.collided_while_walking = false;
        self.state = WalkState::Walking(WalkSession {
            move_dir: self.move_dir,
            start,
            target,
            reversed: false,
        });
        debug!(
            "walk session started: ({:.2}, {:.2}, {:.2}) -> ({:.2}, {:.2}, {:.2})",
            start.x, start.y, start.z, target.x, target.y, target.z
        );
    }

    fn advance_session<M, S, R>(&mut self, dt: f32, mover: &mut M, audio: &mut S, rng: &mut R)
    where
        M: Mover + ?Sized,
        S: AudioSink + ?Sized,
        R: IndexSource + ?Sized,
    {
        let WalkState::Walking(mut session) = self.state else {
            return;
        };

        if (session.target - mover.position()).length() <= self.settings.movement_margin {
            mover.set_position_and_rotation(session.target, mover.yaw());
            self.state = WalkState::Idle;
            self.sessions_completed += 1;
            debug!(
                "walk session finished at ({:.2}, {:.2}, {:.2})",
                session.target.x, session.target.y, session.target.z
            );
            return;
        }

        if self.collided_while_walking && !session.reversed {
            self.move_dir = self.move_dir * -1.0;
            session.target = session.start;
            self.collided_while_walking = false;
            session.reversed = true;
            debug!("walk session blocked, heading back to start");
        }

        if mover.is_grounded() {
            self.move_dir.y = -self.settings.stick_to_ground_force;
        } else {
            self.move_dir = self.move_dir + GRAVITY * (self.settings.gravity_multiplier * dt);
        }

        self.collision_flags = mover.move_by(self.move_dir * dt, dt);

        self.progress_step_cycle(dt, mover, audio, rng);
        self.update_camera_position(dt, mover);

        session.move_dir = self.move_dir;
        self.state = WalkState::Walking(session);
    }

    fn progress_step_cycle<M, S, R>(&mut self, dt: f32, mover: &M, audio: &mut S, rng: &mut R)
    where
        M: Mover + ?Sized,
        S: AudioSink + ?Sized,
        R: IndexSource + ?Sized,
    {
        let velocity = mover.velocity();
        if velocity.dot(velocity) > 0.0 && (self.input.x != 0.0 || self.input.y != 0.0) {
            self.step_cycle += (velocity.length() + self.speed) * dt;
        }

        if !(self.step_cycle > self.next_step) {
            return;
        }

        self.next_step = self.step_cycle + self.settings.step_interval;

        self.play_footstep_audio(mover, audio, rng);
    }

    fn play_footstep_audio<M, S, R>(&mut self, mover: &M, audio: &mut S, rng: &mut R)
    where
        M: Mover + ?Sized,
        S: AudioSink + ?Sized,
        R: IndexSource + ?Sized,
    {
        if !mover.is_grounded() {
            return;
        }
        match self.footsteps.next_clip(rng) {
            Some(clip) => {
                trace!("footstep '{}'", clip);
                audio.play_one_shot(clip);
                self.footsteps_played += 1;
            }
            None => debug!("footstep skipped: pool has fewer than two clips"),
        }
    }

    /// Head bob while grounded and moving; otherwise the last offset stays.
    fn update_camera_position<M: Mover + ?Sized>(&mut self, dt: f32, mover: &M) {
        if !self.settings.use_head_bob {
            return;
        }
        let speed = mover.velocity().length();
        if speed > 0.0 && mover.is_grounded() {
            self.camera.local_position = self.head_bob.do_head_bob(speed + self.speed, dt);
        }
    }
}

/// Keep the axis with the larger magnitude (horizontal wins ties) and clamp
/// the result to unit length.
pub fn dominant_axis_intent(horizontal: f32, vertical: f32) -> Vector2 {
    let intent = if horizontal.abs() >= vertical.abs() {
        Vector2::new(horizontal, 0.0)
    } else {
        Vector2::new(0.0, vertical)
    };
    if intent.length_sqr() > 1.0 {
        intent.normalized()
    } else {
        intent
    }
}

/// Zero whichever horizontal world axis is smaller (z wins ties) and
/// normalize. A zero vector stays zero.
pub fn collapse_to_grid_axis(desired: Vector3) -> Vector3 {
    let mut desired = Vector3::new(desired.x, 0.0, desired.z);
    if desired.z.abs() >= desired.x.abs() {
        desired.x = 0.0;
    } else {
        desired.z = 0.0;
    }
    let len = desired.length();
    if len > 0.0 {
        desired * (1.0 / len)
    } else {
        desired
    }
}

pub fn round_to_whole_units(v: Vector3) -> Vector3 {
    Vector3::new(v.x.round(), v.y.round(), v.z.round())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    const EPSILON: f32 = 1e-4;
    const DT: f32 = 0.02;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Flat-ground mover with optional invisible walls along x.
    struct FakeMover {
        pos: Vector3,
        yaw: f32,
        velocity: Vector3,
        grounded: bool,
        /// Motion along +x beyond this x is blocked.
        wall_x: Option<f32>,
        /// Motion along -x below this x is blocked.
        back_wall_x: Option<f32>,
        moves: usize,
    }

    impl FakeMover {
        fn at(x: f32, z: f32) -> Self {
            Self {
                pos: Vector3::new(x, 1.0, z),
                yaw: 0.0,
                velocity: Vector3::zero(),
                grounded: true,
                wall_x: None,
                back_wall_x: None,
                moves: 0,
            }
        }
    }

    impl Mover for FakeMover {
        fn position(&self) -> Vector3 {
            self.pos
        }
        fn yaw(&self) -> f32 {
            self.yaw
        }
        fn set_yaw(&mut self, degrees: f32) {
            self.yaw = degrees;
        }
        fn velocity(&self) -> Vector3 {
            self.velocity
        }
        fn is_grounded(&self) -> bool {
            self.grounded
        }
        fn move_by(&mut self, motion: Vector3, dt: f32) -> CollisionFlags {
            self.moves += 1;
            let before = self.pos;
            let mut flags = CollisionFlags::NONE;
            let mut next = Vector3::new(self.pos.x + motion.x, self.pos.y, self.pos.z + motion.z);
            if let Some(wall) = self.wall_x {
                if next.x > wall {
                    next.x = wall;
                    flags |= CollisionFlags::SIDES;
                }
            }
            if let Some(wall) = self.back_wall_x {
                if next.x < wall {
                    next.x = wall;
                    flags |= CollisionFlags::SIDES;
                }
            }
            if self.grounded {
                flags |= CollisionFlags::BELOW;
            }
            self.pos = next;
            self.velocity = (self.pos - before) * (1.0 / dt);
            flags
        }
        fn set_position_and_rotation(&mut self, position: Vector3, yaw: f32) {
            self.pos = position;
            self.yaw = yaw;
        }
    }

    #[derive(Default, Clone, Copy)]
    struct Axes {
        h: f32,
        v: f32,
    }

    impl AxisSource for Axes {
        fn axis(&self, axis: InputAxis) -> f32 {
            match axis {
                InputAxis::Horizontal => self.h,
                InputAxis::Vertical => self.v,
            }
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl AudioSink for Recorder {
        fn play_one_shot(&mut self, clip: &str) {
            self.0.push(clip.to_string());
        }
    }

    struct Scripted(VecDeque<usize>);

    impl IndexSource for Scripted {
        fn index_in(&mut self, range: std::ops::Range<usize>) -> usize {
            self.0.pop_front().unwrap_or(range.start)
        }
    }

    struct Rig {
        walker: GridWalker,
        mover: FakeMover,
        audio: Recorder,
        rng: fastrand::Rng,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                walker: GridWalker::new(
                    WalkerSettings::default(),
                    FootstepPool::new(["a", "b", "c"]),
                    CurveControlledBob::default(),
                ),
                mover: FakeMover::at(0.0, 0.0),
                audio: Recorder::default(),
                rng: fastrand::Rng::with_seed(11),
            }
        }

        fn tick(&mut self, axes: Axes) {
            self.walker
                .on_physics_tick(DT, &mut self.mover, &axes, &mut self.audio, &mut self.rng);
        }

        fn run_until_idle(&mut self, axes: Axes, max_ticks: usize) -> usize {
            for n in 1..=max_ticks {
                self.tick(axes);
                if !self.walker.is_walking() {
                    return n;
                }
            }
            panic!("walker still walking after {max_ticks} ticks");
        }
    }

    #[test]
    fn dominant_axis_prefers_larger_magnitude() {
        let i = dominant_axis_intent(0.3, -0.8);
        assert_eq!((i.x, i.y), (0.0, -0.8));
        let i = dominant_axis_intent(-0.9, 0.2);
        assert_eq!((i.x, i.y), (-0.9, 0.0));
    }

    #[test]
    fn sampler_tie_keeps_horizontal_input() {
        let i = dominant_axis_intent(0.5, 0.5);
        assert_eq!((i.x, i.y), (0.5, 0.0));
    }

    #[test]
    fn collapse_tie_favours_z_axis() {
        let d = collapse_to_grid_axis(Vector3::new(1.0, 0.0, 1.0));
        assert_eq!((d.x, d.z), (0.0, 1.0));
        let d = collapse_to_grid_axis(Vector3::new(-2.0, 0.0, 0.5));
        assert_eq!((d.x, d.z), (-1.0, 0.0));
    }

    #[test]
    fn collapse_of_zero_stays_zero() {
        let d = collapse_to_grid_axis(Vector3::zero());
        assert_eq!((d.x, d.y, d.z), (0.0, 0.0, 0.0));
    }

    #[test]
    fn no_input_never_starts_a_session() {
        let mut rig = Rig::new();
        for _ in 0..100 {
            rig.tick(Axes::default());
        }
        assert!(!rig.walker.is_walking());
        assert_eq!(rig.mover.moves, 0);
        assert_eq!((rig.mover.pos.x, rig.mover.pos.z), (0.0, 0.0));
    }

    #[test]
    fn right_input_targets_one_cell_right() {
        let mut rig = Rig::new();
        rig.tick(Axes { h: 1.0, v: 0.0 });

        let session = *rig.walker.session().expect("session should start");
        assert!(approx_eq(session.target.x, 6.0));
        assert_eq!(session.target.z, 0.0);
        assert_eq!(session.start.x, 0.0);
        // First step runs in the same tick the session starts.
        assert_eq!(rig.mover.moves, 1);
    }

    #[test]
    fn session_snaps_exactly_onto_target() {
        let mut rig = Rig::new();
        rig.tick(Axes { h: 1.0, v: 0.0 });
        let target = rig.walker.session().unwrap().target;

        rig.run_until_idle(Axes::default(), 200);

        assert_eq!(rig.mover.pos, target);
        assert!(!rig.walker.is_walking());
        assert_eq!(rig.walker.sessions_completed(), 1);
    }

    #[test]
    fn target_is_one_spacing_along_one_axis() {
        for (h, v, yaw) in [
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (-0.4, 0.9, 30.0),
            (0.7, 0.69, 44.0),
            (0.2, -1.0, 135.0),
        ] {
            let mut rig = Rig::new();
            rig.mover.yaw = yaw;
            rig.tick(Axes { h, v });
            let s = rig.walker.session().unwrap();
            let d = s.target - s.start;
            assert!(approx_eq(d.length(), 6.0), "yaw {yaw}: {d:?}");
            assert!(d.x == 0.0 || d.z == 0.0, "yaw {yaw}: diagonal {d:?}");
        }
    }

    #[test]
    fn input_during_session_does_not_retarget() {
        let mut rig = Rig::new();
        rig.tick(Axes { h: 0.0, v: 1.0 });
        let target = rig.walker.session().unwrap().target;

        for _ in 0..10 {
            rig.tick(Axes { h: -1.0, v: 0.0 });
            assert_eq!(rig.walker.session().unwrap().target, target);
        }
        assert!(approx_eq(rig.walker.input().y, 1.0));
    }

    #[test]
    fn side_hit_bounces_back_to_start() {
        let mut rig = Rig::new();
        rig.mover.wall_x = Some(2.0);
        rig.tick(Axes { h: 1.0, v: 0.0 });

        // Walk until the fake wall stops us, then report the contact.
        for _ in 0..200 {
            if rig.mover.pos.x >= 2.0 {
                break;
            }
            rig.tick(Axes::default());
        }
        let hit = ControllerHit {
            flags: CollisionFlags::SIDES | CollisionFlags::BELOW,
            normal: Vector3::new(-1.0, 0.0, 0.0),
            point: rig.mover.pos,
        };
        rig.walker.on_controller_collider_hit(&hit);
        assert!(rig.walker.collided_while_walking());

        rig.tick(Axes::default());
        let session = *rig.walker.session().unwrap();
        assert!(session.reversed);
        assert_eq!(session.target, session.start);
        assert!(!rig.walker.collided_while_walking());

        // A second hit in the same session is swallowed.
        rig.walker.on_controller_collider_hit(&hit);
        rig.tick(Axes::default());
        assert_eq!(rig.walker.session().unwrap().target, session.start);
        assert!(rig.walker.session().unwrap().move_dir.x < 0.0);

        rig.run_until_idle(Axes::default(), 400);
        assert_eq!(rig.mover.pos, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn blocked_return_path_keeps_walking() {
        let mut rig = Rig::new();
        rig.mover.wall_x = Some(2.0);
        rig.tick(Axes { h: 1.0, v: 0.0 });
        for _ in 0..200 {
            if rig.mover.pos.x >= 2.0 {
                break;
            }
            rig.tick(Axes::default());
        }
        let side = |point| ControllerHit {
            flags: CollisionFlags::SIDES | CollisionFlags::BELOW,
            normal: Vector3::new(-1.0, 0.0, 0.0),
            point,
        };
        rig.walker.on_controller_collider_hit(&side(rig.mover.pos));
        rig.tick(Axes::default());
        let session = *rig.walker.session().unwrap();
        assert!(session.reversed);

        // Something now sits between the walker and its start cell.
        rig.mover.back_wall_x = Some(1.0);
        for _ in 0..500 {
            rig.tick(Axes::default());
            rig.walker.on_controller_collider_hit(&side(rig.mover.pos));
        }

        assert!(rig.walker.is_walking());
        let s = *rig.walker.session().unwrap();
        assert!(s.reversed);
        assert_eq!(s.target, session.start);
        assert!(s.move_dir.x < 0.0);
        assert_eq!(rig.walker.sessions_completed(), 0);
        assert_eq!(rig.mover.pos.x, 1.0);
    }

    #[test]
    fn diagonal_input_at_zero_yaw_steps_along_x() {
        // Sampler tie keeps the horizontal axis, so the collapse never sees
        // its own tie and the step goes right, not forward.
        let mut rig = Rig::new();
        rig.tick(Axes { h: 0.7, v: 0.7 });
        let s = rig.walker.session().unwrap();
        assert!(approx_eq(s.target.x, 6.0));
        assert_eq!(s.target.z, 0.0);
        assert!(approx_eq(rig.walker.input().x, 0.7));
        assert_eq!(rig.walker.input().y, 0.0);

        let d = collapse_to_grid_axis(Vector3::new(0.7, 0.0, 0.7));
        assert_eq!((d.x, d.z), (0.0, 1.0));
    }

    #[test]
    fn single_clip_pool_walks_silently() {
        let mut walker = GridWalker::new(
            WalkerSettings::default(),
            FootstepPool::new(["only"]),
            CurveControlledBob::default(),
        );
        let mut mover = FakeMover::at(0.0, 0.0);
        let mut audio = Recorder::default();
        let mut rng = fastrand::Rng::with_seed(3);

        walker.on_physics_tick(DT, &mut mover, &Axes { h: 1.0, v: 0.0 }, &mut audio, &mut rng);
        for _ in 0..200 {
            if !walker.is_walking() {
                break;
            }
            walker.on_physics_tick(DT, &mut mover, &Axes::default(), &mut audio, &mut rng);
        }

        assert!(audio.0.is_empty());
        assert_eq!(walker.footsteps_played(), 0);
        assert!(walker.stride().1 > 5.0);
        assert_eq!(walker.sessions_completed(), 1);
    }

    #[test]
    fn below_only_contact_is_ignored() {
        let mut rig = Rig::new();
        rig.tick(Axes { h: 1.0, v: 0.0 });
        rig.walker.on_controller_collider_hit(&ControllerHit {
            flags: CollisionFlags::BELOW,
            normal: Vector3::new(0.0, 1.0, 0.0),
            point: rig.mover.pos,
        });
        assert!(!rig.walker.collided_while_walking());
    }

    #[test]
    fn side_contact_while_idle_is_ignored() {
        let mut rig = Rig::new();
        rig.walker.on_controller_collider_hit(&ControllerHit {
            flags: CollisionFlags::SIDES,
            normal: Vector3::new(-1.0, 0.0, 0.0),
            point: rig.mover.pos,
        });
        assert!(!rig.walker.collided_while_walking());
    }

    #[test]
    fn grounded_walker_sticks_to_ground() {
        let mut rig = Rig::new();
        rig.tick(Axes { h: 1.0, v: 0.0 });
        let s = rig.walker.session().unwrap();
        assert_eq!(s.move_dir.y, -10.0);
        assert!(approx_eq(s.move_dir.x, 5.0));
    }

    #[test]
    fn airborne_walker_accumulates_gravity() {
        let mut rig = Rig::new();
        rig.mover.grounded = false;
        rig.tick(Axes { h: 1.0, v: 0.0 });
        rig.tick(Axes::default());
        let s = rig.walker.session().unwrap();
        // Two steps of 9.81 * 2 * 0.02.
        assert!(approx_eq(s.move_dir.y, -0.7848));
    }

    #[test]
    fn first_step_plays_a_footstep() {
        let mut rig = Rig::new();
        rig.tick(Axes { h: 1.0, v: 0.0 });
        assert_eq!(rig.audio.0.len(), 1);
        assert_ne!(rig.audio.0[0], "a");
        let (cycle, next) = rig.walker.stride();
        assert!(approx_eq(next, cycle + 5.0));
    }

    #[test]
    fn stride_paces_footsteps() {
        let mut rig = Rig::new();
        rig.tick(Axes { h: 1.0, v: 0.0 });
        rig.run_until_idle(Axes::default(), 200);
        // (|v| + speed) * dt = 0.2 per step, ~60 steps => 12 units / 5 per step.
        assert_eq!(rig.walker.footsteps_played(), 3);
        for pair in rig.audio.0.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn airborne_steps_are_silent() {
        let mut rig = Rig::new();
        rig.mover.grounded = false;
        rig.tick(Axes { h: 1.0, v: 0.0 });
        assert!(rig.audio.0.is_empty());
        // The threshold still advanced.
        assert!(rig.walker.stride().1 > 0.0);
    }

    #[test]
    fn scripted_footstep_order_swaps_to_front() {
        let mut walker = GridWalker::new(
            WalkerSettings::default(),
            FootstepPool::new(["A", "B", "C"]),
            CurveControlledBob::default(),
        );
        let mut mover = FakeMover::at(0.0, 0.0);
        let mut audio = Recorder::default();
        let mut rng = Scripted(VecDeque::from([2, 1]));

        walker.on_physics_tick(DT, &mut mover, &Axes { h: 1.0, v: 0.0 }, &mut audio, &mut rng);
        assert_eq!(audio.0, ["C"]);
        assert_eq!(walker.footsteps().clips(), ["C", "B", "A"]);
    }

    #[test]
    fn head_bob_holds_last_offset_when_stopped() {
        let mut rig = Rig::new();
        let rest = rig.walker.camera().local_position;
        rig.tick(Axes { h: 1.0, v: 0.0 });
        for _ in 0..10 {
            rig.tick(Axes::default());
        }
        let moving = rig.walker.camera().local_position;
        assert_ne!(moving, rest);

        // Airborne: the offset is held, not reset.
        rig.mover.grounded = false;
        rig.tick(Axes::default());
        assert_eq!(rig.walker.camera().local_position, moving);
    }

    #[test]
    fn head_bob_disabled_keeps_rest_offset() {
        let mut rig = Rig::new();
        rig.walker.settings.use_head_bob = false;
        let rest = rig.walker.camera().local_position;
        rig.tick(Axes { h: 1.0, v: 0.0 });
        rig.run_until_idle(Axes::default(), 200);
        assert_eq!(rig.walker.camera().local_position, rest);
    }

    #[test]
    fn whole_unit_lock_rounds_start_and_target() {
        let mut rig = Rig::new();
        rig.walker.settings.lock_to_whole_units = true;
        rig.mover.pos = Vector3::new(0.3, 1.0, -0.4);
        rig.tick(Axes { h: 1.0, v: 0.0 });
        let s = rig.walker.session().unwrap();
        assert_eq!(s.start, Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(s.target, Vector3::new(6.0, 1.0, 0.0));
    }

    struct Turn(f32);

    impl LookProvider for Turn {
        fn look_rotation(&mut self, current: LookRotation, _dt: f32) -> LookRotation {
            LookRotation {
                yaw: current.yaw + self.0,
                pitch: current.pitch - self.0,
            }
        }
    }

    #[test]
    fn render_tick_applies_look_rotation() {
        let mut rig = Rig::new();
        let mut look = Turn(90.0);
        rig.walker.on_render_tick(&mut look, &mut rig.mover, 0.016);
        assert_eq!(rig.mover.yaw, 90.0);
        assert_eq!(rig.walker.camera().pitch, -90.0);

        // Facing -X now: pushing "forward" walks toward -X.
        rig.tick(Axes { h: 0.0, v: 1.0 });
        let s = rig.walker.session().unwrap();
        assert!(approx_eq(s.target.x, -6.0));
        assert!(approx_eq(s.target.z, 0.0));
    }
}
