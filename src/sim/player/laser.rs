//! Charge-based laser.
//!
//! Firing from full charges starts the recharge clock. Below max, one charge
//! comes back every `charge_cooldown` and the clock restarts.
//!
//! A shot opens a beam window of `duration`. While it is open the beam is
//! re-cast every tick and pierces everything on the segment.

use bevy::log::error;
use bevy::math::Vec2;

use crate::common::config::LaserConfig;
use crate::common::layers::hostile_mask;
use crate::sim::query::{CollisionQuery, WeaponHit, WeaponKind};

#[derive(Debug, Clone)]
pub struct LaserWeapon {
    cfg: LaserConfig,
    charges: u32,
    max_charges: u32,
    shot_started: Option<f32>,
    recharge_anchor: Option<f32>,
}

impl LaserWeapon {
    pub fn new(cfg: LaserConfig) -> Self {
        Self {
            cfg,
            charges: cfg.start_charges,
            max_charges: cfg.start_charges,
            shot_started: None,
            recharge_anchor: None,
        }
    }

    /// Full charges, no beam, no timers.
    pub fn reset(&mut self) {
        self.charges = self.max_charges;
        self.shot_started = None;
        self.recharge_anchor = None;
    }

    #[inline]
    pub fn charges(&self) -> u32 {
        self.charges
    }

    #[inline]
    pub fn max_charges(&self) -> u32 {
        self.max_charges
    }

    /// Consume a charge and open the beam window. `false` with no charges left.
    pub fn fire(&mut self, now: f32) -> bool {
        if self.charges == 0 {
            return false;
        }
        if self.charges == self.max_charges {
            self.recharge_anchor = Some(now);
        }
        self.charges -= 1;
        self.shot_started = Some(now);
        true
    }

    #[inline]
    pub fn is_beam_active(&self, now: f32) -> bool {
        self.shot_started
            .is_some_and(|start| now < start + self.cfg.duration)
    }

    /// Cast the beam if it is active and restore charges.
    ///
    /// Returns the far end of the beam while it is active.
    pub fn update(
        &mut self,
        now: f32,
        origin: Vec2,
        forward: Vec2,
        query: &impl CollisionQuery,
        hits: &mut Vec<WeaponHit>,
    ) -> Option<Vec2> {
        let beam_end = if self.is_beam_active(now) {
            let end = origin + forward * self.cfg.length;
            hits.extend(
                query
                    .line_cast_all(origin, end, hostile_mask())
                    .into_iter()
                    .map(|hit| WeaponHit {
                        hit,
                        weapon: WeaponKind::Laser,
                    }),
            );
            Some(end)
        } else {
            None
        };

        self.recharge(now);
        beam_end
    }

    fn recharge(&mut self, now: f32) {
        if self.charges >= self.max_charges {
            return;
        }
        match self.recharge_anchor {
            Some(anchor) if now >= anchor + self.cfg.charge_cooldown => {
                self.charges += 1;
                self.recharge_anchor = Some(now);
            }
            Some(_) => {}
            None => self.report_missing_anchor(),
        }
    }

    /// Seconds until the next charge; the full cooldown while at max.
    pub fn recharge_remaining(&self, now: f32) -> f32 {
        if self.charges >= self.max_charges {
            return self.cfg.charge_cooldown;
        }
        match self.recharge_anchor {
            Some(anchor) => (self.cfg.charge_cooldown - (now - anchor)).max(0.0),
            None => {
                self.report_missing_anchor();
                0.0
            }
        }
    }

    fn report_missing_anchor(&self) {
        error!(
            "laser has {}/{} charges but no recharge anchor",
            self.charges, self.max_charges
        );
        debug_assert!(false, "laser below max charges without a recharge anchor");
    }

    #[cfg(test)]
    pub(crate) fn corrupt_for_test(&mut self) {
        self.charges = 0;
        self.recharge_anchor = None;
    }
}
