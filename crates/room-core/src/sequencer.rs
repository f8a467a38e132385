//! Timed-stage sequencer driving every transform transition.
//!
//! A [`Sequence`] is a list of [`Stage`]s played strictly back to back: stage
//! N+1 captures its starting values only after stage N has written its final
//! values. A single tween is simply a one-stage sequence. Completion side
//! effects are returned as data from [`Sequencer::update`] so the caller can
//! apply them against the registry without closures.

use crate::registry::{ObjectId, ObjectRegistry};
use glam::Vec3;
use smallvec::SmallVec;
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Scale,
    Position,
    Rotation,
    Color,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    Linear,
    QuadIn,
    QuadOut,
    #[default]
    QuadInOut,
    SineInOut,
    BackOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadIn => t * t,
            Ease::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Ease::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) * 0.5
                }
            }
            Ease::SineInOut => -((PI * t).cos() - 1.0) * 0.5,
            Ease::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Absolute target value.
    To(Vec3),
    /// Offset from the value at stage start.
    By(Vec3),
    /// Rise and fall along +y on a half sine, returning to the start value.
    Arc { height: f32 },
}

#[derive(Clone, Copy, Debug)]
pub struct Track {
    pub object: ObjectId,
    pub channel: Channel,
    pub motion: Motion,
    pub ease: Ease,
}

#[derive(Clone, Debug)]
pub struct Stage {
    pub duration: f32,
    pub tracks: SmallVec<[Track; 2]>,
}

impl Stage {
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            tracks: SmallVec::new(),
        }
    }

    pub fn track(mut self, object: ObjectId, channel: Channel, motion: Motion, ease: Ease) -> Self {
        self.tracks.push(Track {
            object,
            channel,
            motion,
            ease,
        });
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceKind {
    /// Hover pops and restores; freely cancelled by newer transitions.
    Cosmetic,
    /// Holds the owner's busy lock until it completes.
    Exclusive,
}

/// What to do with the owner once the last stage finishes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Completion {
    Nothing,
    /// Back to Idle immediately.
    Release,
    /// Enter Cooldown for `secs`, then Idle; optionally re-admit to the hover set.
    Cooldown { secs: f32, reinsert: bool },
}

#[derive(Clone, Debug)]
pub struct Sequence {
    pub owner: ObjectId,
    pub kind: SequenceKind,
    pub stages: Vec<Stage>,
    pub completion: Completion,
}

impl Sequence {
    pub fn cosmetic(owner: ObjectId) -> Self {
        Self {
            owner,
            kind: SequenceKind::Cosmetic,
            stages: Vec::new(),
            completion: Completion::Nothing,
        }
    }

    pub fn exclusive(owner: ObjectId, completion: Completion) -> Self {
        Self {
            owner,
            kind: SequenceKind::Exclusive,
            stages: Vec::new(),
            completion,
        }
    }

    pub fn then(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn total_duration(&self) -> f32 {
        self.stages.iter().map(|s| s.duration).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SequenceId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Finished {
    pub id: SequenceId,
    pub owner: ObjectId,
    pub kind: SequenceKind,
    pub completion: Completion,
}

struct Running {
    id: SequenceId,
    seq: Sequence,
    stage: usize,
    elapsed: f32,
    from: SmallVec<[Option<Vec3>; 2]>,
    started: bool,
}

#[derive(Default)]
pub struct Sequencer {
    running: Vec<Running>,
    next_id: u64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self, seq: Sequence) -> SequenceId {
        let id = SequenceId(self.next_id);
        self.next_id += 1;
        if seq.stages.is_empty() {
            log::debug!("[anim] empty sequence for {:?}", seq.owner);
        }
        self.running.push(Running {
            id,
            seq,
            stage: 0,
            elapsed: 0.0,
            from: SmallVec::new(),
            started: false,
        });
        id
    }

    pub fn cancel(&mut self, id: SequenceId) -> bool {
        let before = self.running.len();
        self.running.retain(|r| r.id != id);
        self.running.len() != before
    }

    /// Stop sequences owned by `owner`; `kind: None` stops all of them.
    /// Values stay wherever the cut left them.
    pub fn cancel_owner(&mut self, owner: ObjectId, kind: Option<SequenceKind>) -> usize {
        let before = self.running.len();
        self.running
            .retain(|r| !(r.seq.owner == owner && kind.map_or(true, |k| r.seq.kind == k)));
        before - self.running.len()
    }

    pub fn is_playing(&self, owner: ObjectId, kind: SequenceKind) -> bool {
        self.running
            .iter()
            .any(|r| r.seq.owner == owner && r.seq.kind == kind)
    }

    pub fn active_count(&self) -> usize {
        self.running.len()
    }

    /// Advance every running sequence by `dt` seconds. Time left over when a
    /// stage ends carries into the next stage.
    pub fn update(&mut self, dt: f32, registry: &mut ObjectRegistry) -> SmallVec<[Finished; 2]> {
        let mut finished = SmallVec::new();
        for r in &mut self.running {
            let mut left = dt.max(0.0);
            loop {
                let Some(stage) = r.seq.stages.get(r.stage) else {
                    finished.push(Finished {
                        id: r.id,
                        owner: r.seq.owner,
                        kind: r.seq.kind,
                        completion: r.seq.completion,
                    });
                    break;
                };
                if !r.started {
                    r.from.clear();
                    r.from
                        .extend(stage.tracks.iter().map(|t| read(registry, t.object, t.channel)));
                    r.started = true;
                }
                let remaining = stage.duration - r.elapsed;
                if left < remaining {
                    r.elapsed += left;
                    apply_stage(registry, stage, &r.from, r.elapsed / stage.duration);
                    break;
                }
                left -= remaining.max(0.0);
                apply_stage(registry, stage, &r.from, 1.0);
                r.stage += 1;
                r.elapsed = 0.0;
                r.started = false;
            }
        }
        if !finished.is_empty() {
            self.running
                .retain(|r| !finished.iter().any(|f: &Finished| f.id == r.id));
        }
        finished
    }
}

fn apply_stage(registry: &mut ObjectRegistry, stage: &Stage, from: &[Option<Vec3>], t: f32) {
    for (track, start) in stage.tracks.iter().zip(from) {
        let Some(start) = *start else { continue };
        let e = track.ease.apply(t);
        let value = match track.motion {
            Motion::To(target) => start.lerp(target, e),
            Motion::By(delta) => start + delta * e,
            Motion::Arc { height } => start + Vec3::Y * ((PI * e).sin() * height),
        };
        write(registry, track.object, track.channel, value);
    }
}

fn read(registry: &ObjectRegistry, id: ObjectId, channel: Channel) -> Option<Vec3> {
    let o = registry.get(id)?;
    match channel {
        Channel::Scale => Some(o.live.scale),
        Channel::Position => Some(o.live.position),
        Channel::Rotation => Some(o.live.rotation),
        Channel::Color => o.color,
    }
}

fn write(registry: &mut ObjectRegistry, id: ObjectId, channel: Channel, value: Vec3) {
    let Some(o) = registry.get_mut(id) else {
        return;
    };
    match channel {
        Channel::Scale => o.live.scale = value,
        Channel::Position => o.live.position = value,
        Channel::Rotation => o.live.rotation = value,
        Channel::Color => o.color = Some(value),
    }
}
