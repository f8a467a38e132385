//! Hover animation dispatcher.
//!
//! Maps a hover root and its [`HoverKind`] to a concrete sequence, enforces
//! the per-object busy/cooldown lock and applies completion side effects.
//! Exit is the same for every kind: ease back to the rest snapshot.

use crate::constants::*;
use crate::error::{InteractionError, Result};
use crate::registry::{AnimState, HoverKind, ObjectId, ObjectRegistry, Transform};
use crate::sequencer::{
    Channel, Completion, Ease, Motion, Sequence, SequenceKind, Sequencer, Stage,
};
use glam::Vec3;
use std::f32::consts::TAU;

struct CooldownTimer {
    object: ObjectId,
    remaining: f32,
    reinsert: bool,
}

#[derive(Default)]
pub struct Animator {
    sequencer: Sequencer,
    cooldowns: Vec<CooldownTimer>,
}

impl HoverKind {
    /// Start this kind's enter animation on `id`.
    pub fn enter(self, anim: &mut Animator, reg: &mut ObjectRegistry, id: ObjectId) -> Result<()> {
        match self {
            HoverKind::Keys => anim.press_key(reg, id),
            HoverKind::Jump => {
                let factor = reg.try_get(id)?.jump_factor;
                anim.pop(reg, id, factor, Vec3::ZERO, JUMP_SECS, Ease::BackOut)
            }
            HoverKind::Info => anim.pop(
                reg,
                id,
                INFO_SCALE_FACTOR,
                Vec3::Z * INFO_TILT_RAD,
                INFO_SECS,
                Ease::BackOut,
            ),
            HoverKind::Ride => anim.spin_ride(reg, id, RIDE_TURNS, RIDE_LIFT),
            HoverKind::Guitar => anim.spin_ride(reg, id, GUITAR_TURNS, GUITAR_LIFT),
            HoverKind::Bowie => anim.bowie(reg, id),
            HoverKind::Vinyls => anim.slide_vinyl(reg, id),
            HoverKind::Default => anim.pop(
                reg,
                id,
                POP_SCALE_FACTOR,
                Vec3::ZERO,
                POP_SECS,
                Ease::QuadOut,
            ),
        }
    }

    /// Exit is shared by every kind.
    pub fn exit(self, anim: &mut Animator, reg: &mut ObjectRegistry, id: ObjectId) -> Result<()> {
        anim.restore(reg, id)
    }
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry point used by the hover resolver and the modal gate.
    pub fn apply_hover_state(&mut self, reg: &mut ObjectRegistry, id: ObjectId, entering: bool) {
        let kind = match reg.get(id) {
            Some(o) => o.hover.unwrap_or(HoverKind::Default),
            None => return,
        };
        let res = if entering {
            kind.enter(self, reg, id)
        } else {
            kind.exit(self, reg, id)
        };
        if let Err(e) = res {
            log::debug!("[anim] {:?} {}: {}", id, if entering { "enter" } else { "exit" }, e);
        }
    }

    pub fn is_busy(&self, reg: &ObjectRegistry, id: ObjectId) -> bool {
        reg.state(id) == AnimState::Animating
    }

    pub fn is_animating(&self, id: ObjectId) -> bool {
        self.sequencer.is_playing(id, SequenceKind::Cosmetic)
            || self.sequencer.is_playing(id, SequenceKind::Exclusive)
    }

    pub fn active_sequences(&self) -> usize {
        self.sequencer.active_count()
    }

    /// True while the record-to-turntable sequence is running.
    pub fn set_piece_playing(&self, reg: &ObjectRegistry) -> bool {
        reg.find(BOWIE_PROP_NAME).is_some_and(|id| {
            reg.state(id) == AnimState::Animating
                && self.sequencer.is_playing(id, SequenceKind::Exclusive)
        })
    }

    pub fn is_set_piece_member(&self, reg: &ObjectRegistry, id: ObjectId) -> bool {
        let Some(obj) = reg.get(id) else {
            return false;
        };
        obj.hover == Some(HoverKind::Bowie)
            || [BOWIE_PROP_NAME, RECORD_PROP_NAME, PLAYER_PROP_NAME].contains(&obj.name.as_str())
    }

    /// Advance sequences and cooldown timers by `dt` seconds.
    pub fn update(&mut self, dt: f32, reg: &mut ObjectRegistry) {
        self.cooldowns.retain_mut(|c| {
            c.remaining -= dt;
            if c.remaining > 0.0 {
                return true;
            }
            reg.set_state(c.object, AnimState::Idle);
            if c.reinsert {
                reg.insert_hover(c.object);
            }
            log::debug!("[anim] {:?} cooldown over", c.object);
            false
        });

        for done in self.sequencer.update(dt, reg) {
            if done.kind != SequenceKind::Exclusive {
                continue;
            }
            if reg.get(done.owner).is_some_and(|o| o.name == BOWIE_PROP_NAME) {
                log::info!("[anim] set piece finished");
            }
            match done.completion {
                Completion::Nothing => {}
                Completion::Release => reg.set_state(done.owner, AnimState::Idle),
                Completion::Cooldown { secs, reinsert } => {
                    reg.set_state(done.owner, AnimState::Cooldown);
                    self.cooldowns.push(CooldownTimer {
                        object: done.owner,
                        remaining: secs,
                        reinsert,
                    });
                }
            }
        }
    }

    /// Ease scale/position/rotation/color back to rest. Skipped while an
    /// exclusive sequence owns the object.
    pub fn restore(&mut self, reg: &mut ObjectRegistry, id: ObjectId) -> Result<()> {
        let obj = reg.try_get(id)?;
        if obj.state == AnimState::Animating {
            log::debug!("[anim] restore deferred, {} is busy", obj.name);
            return Ok(());
        }
        let rest = obj
            .rest
            .ok_or_else(|| InteractionError::MissingRest(obj.name.clone()))?;
        let base_color = obj.base_color;
        self.sequencer.cancel_owner(id, Some(SequenceKind::Cosmetic));
        let mut stage = Stage::new(RESTORE_SECS)
            .track(id, Channel::Scale, Motion::To(rest.scale), Ease::QuadOut)
            .track(id, Channel::Position, Motion::To(rest.position), Ease::QuadOut)
            .track(id, Channel::Rotation, Motion::To(rest.rotation), Ease::QuadOut);
        if let Some(c) = base_color {
            stage = stage.track(id, Channel::Color, Motion::To(c), Ease::QuadOut);
        }
        self.sequencer.play(Sequence::cosmetic(id).then(stage));
        Ok(())
    }

    /// One-shot press and release of a piano key.
    pub fn press_key(&mut self, reg: &mut ObjectRegistry, id: ObjectId) -> Result<()> {
        let start = self.lock(reg, id)?;
        let rest_pos = reg
            .get(id)
            .and_then(|o| o.rest)
            .map(|r| r.position)
            .unwrap_or(start.position);
        self.sequencer.play(
            Sequence::exclusive(id, Completion::Release)
                .then(Stage::new(KEY_PRESS_DOWN_SECS).track(
                    id,
                    Channel::Position,
                    Motion::By(Vec3::NEG_Y * KEY_PRESS_DEPTH),
                    Ease::QuadOut,
                ))
                .then(Stage::new(KEY_PRESS_UP_SECS).track(
                    id,
                    Channel::Position,
                    Motion::To(rest_pos),
                    Ease::QuadInOut,
                )),
        );
        Ok(())
    }

    fn pop(
        &mut self,
        reg: &mut ObjectRegistry,
        id: ObjectId,
        factor: f32,
        tilt: Vec3,
        secs: f32,
        ease: Ease,
    ) -> Result<()> {
        let obj = reg.try_get(id)?;
        let rest = obj
            .rest
            .ok_or_else(|| InteractionError::MissingRest(obj.name.clone()))?;
        self.sequencer.cancel_owner(id, Some(SequenceKind::Cosmetic));
        let mut stage = Stage::new(secs).track(id, Channel::Scale, Motion::To(rest.scale * factor), ease);
        if tilt != Vec3::ZERO {
            stage = stage.track(id, Channel::Rotation, Motion::To(rest.rotation + tilt), ease);
        }
        self.sequencer.play(Sequence::cosmetic(id).then(stage));
        Ok(())
    }

    fn spin_ride(&mut self, reg: &mut ObjectRegistry, id: ObjectId, turns: f32, lift: f32) -> Result<()> {
        let start = self.lock(reg, id)?;
        reg.remove_hover(id);
        self.sequencer.play(
            Sequence::exclusive(
                id,
                Completion::Cooldown {
                    secs: RIDE_COOLDOWN_SECS,
                    reinsert: true,
                },
            )
            .then(
                Stage::new(RIDE_SPIN_SECS)
                    .track(id, Channel::Rotation, Motion::By(Vec3::Y * turns * TAU), Ease::QuadInOut)
                    .track(id, Channel::Position, Motion::Arc { height: lift }, Ease::Linear),
            )
            // whole turns: snapping back is invisible and keeps angles bounded
            .then(Stage::new(0.0).track(id, Channel::Rotation, Motion::To(start.rotation), Ease::Linear)),
        );
        Ok(())
    }

    fn slide_vinyl(&mut self, reg: &mut ObjectRegistry, id: ObjectId) -> Result<()> {
        let start = self.lock(reg, id)?;
        reg.remove_hover(id);
        self.sequencer.play(
            Sequence::exclusive(
                id,
                Completion::Cooldown {
                    secs: VINYL_COOLDOWN_SECS,
                    reinsert: true,
                },
            )
            .then(Stage::new(VINYL_SLIDE_OUT_SECS).track(
                id,
                Channel::Position,
                Motion::By(Vec3::X * VINYL_SLIDE_DISTANCE),
                Ease::QuadOut,
            ))
            .then(Stage::new(VINYL_SLIDE_BACK_SECS).track(
                id,
                Channel::Position,
                Motion::To(start.position),
                Ease::QuadInOut,
            )),
        );
        Ok(())
    }

    fn bowie(&mut self, reg: &mut ObjectRegistry, id: ObjectId) -> Result<()> {
        if reg.try_get(id)?.name != BOWIE_PROP_NAME {
            return Ok(());
        }
        reg.find(RECORD_PROP_NAME)
            .ok_or(InteractionError::MissingProp(RECORD_PROP_NAME))?;
        let player = reg
            .find(PLAYER_PROP_NAME)
            .ok_or(InteractionError::MissingProp(PLAYER_PROP_NAME))?;
        let player_pos = reg.try_get(player)?.live.position;

        let start = self.lock(reg, id)?;
        reg.remove_hover(id);

        let lift = Vec3::Y * BOWIE_LIFT;
        let seated = player_pos + Vec3::Y * BOWIE_REST_OFFSET;
        let seq = Sequence::exclusive(
            id,
            Completion::Cooldown {
                secs: BOWIE_COOLDOWN_SECS,
                reinsert: true,
            },
        )
        .then(Stage::new(BOWIE_LIFT_SECS).track(id, Channel::Position, Motion::By(lift), Ease::QuadOut))
        .then(Stage::new(BOWIE_TRAVEL_SECS).track(
            id,
            Channel::Position,
            Motion::To(seated + lift),
            Ease::QuadInOut,
        ))
        .then(Stage::new(BOWIE_DROP_SECS).track(id, Channel::Position, Motion::To(seated), Ease::QuadIn))
        .then(Stage::new(BOWIE_SPIN_SECS).track(
            id,
            Channel::Rotation,
            Motion::By(Vec3::Y * BOWIE_SPIN_TURNS * TAU),
            Ease::Linear,
        ))
        .then(Stage::new(BOWIE_LIFT_SECS).track(id, Channel::Position, Motion::To(seated + lift), Ease::QuadOut))
        .then(Stage::new(BOWIE_TRAVEL_SECS).track(
            id,
            Channel::Position,
            Motion::To(start.position + lift),
            Ease::QuadInOut,
        ))
        .then(
            Stage::new(BOWIE_UNSPIN_SECS)
                .track(id, Channel::Rotation, Motion::To(start.rotation), Ease::QuadOut)
                .track(id, Channel::Position, Motion::To(start.position), Ease::QuadInOut),
        );
        log::info!("[anim] set piece start, {:.1}s", seq.total_duration());
        self.sequencer.play(seq);
        Ok(())
    }

    /// Try-lock for exclusive behaviors: Idle -> Animating, dropping the
    /// trigger otherwise. Returns the live transform at lock time.
    fn lock(&mut self, reg: &mut ObjectRegistry, id: ObjectId) -> Result<Transform> {
        let obj = reg.try_get_mut(id)?;
        if obj.state != AnimState::Idle {
            return Err(InteractionError::Busy(obj.name.clone()));
        }
        obj.state = AnimState::Animating;
        let live = obj.live;
        self.sequencer.cancel_owner(id, Some(SequenceKind::Cosmetic));
        Ok(live)
    }

    /// Stop everything on `id`, release its lock and re-admit it for picking.
    pub fn cancel_sequences(&mut self, reg: &mut ObjectRegistry, id: ObjectId) -> usize {
        let n = self.sequencer.cancel_owner(id, None);
        self.cooldowns.retain(|c| c.object != id);
        reg.set_state(id, AnimState::Idle);
        reg.insert_hover(id);
        n
    }
}
