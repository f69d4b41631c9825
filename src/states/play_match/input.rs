//! Player input state
//!
//! Held flags for each control plus the most recently pressed horizontal
//! direction. Jump and attack are edge-triggered: a press queues a request
//! that the next match tick consumes.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Controls the player can hold or tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    MoveLeft,
    MoveRight,
    Jump,
    Attack,
}

impl Control {
    const COUNT: usize = 4;

    pub fn all() -> [Control; Self::COUNT] {
        [Control::MoveLeft, Control::MoveRight, Control::Jump, Control::Attack]
    }

    fn index(self) -> usize {
        match self {
            Control::MoveLeft => 0,
            Control::MoveRight => 1,
            Control::Jump => 2,
            Control::Attack => 3,
        }
    }

    /// Parse a control name as written in headless scripts.
    pub fn parse(name: &str) -> Result<Control, String> {
        match name {
            "MoveLeft" => Ok(Control::MoveLeft),
            "MoveRight" => Ok(Control::MoveRight),
            "Jump" => Ok(Control::Jump),
            "Attack" => Ok(Control::Attack),
            _ => Err(format!(
                "Unknown control: '{}'. Valid controls: MoveLeft, MoveRight, Jump, Attack",
                name
            )),
        }
    }
}

/// Horizontal direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

impl Horizontal {
    fn control(self) -> Control {
        match self {
            Horizontal::Left => Control::MoveLeft,
            Horizontal::Right => Control::MoveRight,
        }
    }

    fn opposite(self) -> Horizontal {
        match self {
            Horizontal::Left => Horizontal::Right,
            Horizontal::Right => Horizontal::Left,
        }
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    held: [bool; Control::COUNT],
    last_horizontal: Option<Horizontal>,
    jump_requested: bool,
    attack_requested: bool,
}

impl PlayerInput {
    pub fn press(&mut self, control: Control) {
        let was_held = self.held[control.index()];
        self.held[control.index()] = true;
        match control {
            Control::MoveLeft => self.last_horizontal = Some(Horizontal::Left),
            Control::MoveRight => self.last_horizontal = Some(Horizontal::Right),
            Control::Jump if !was_held => self.jump_requested = true,
            Control::Attack if !was_held => self.attack_requested = true,
            _ => {}
        }
    }

    pub fn release(&mut self, control: Control) {
        self.held[control.index()] = false;
        // Letting go of the newer direction hands control back to the
        // older one if it is still down.
        if let Some(last) = self.last_horizontal {
            if last.control() == control {
                let other = last.opposite();
                self.last_horizontal = self.is_held(other.control()).then_some(other);
            }
        }
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held[control.index()]
    }

    pub fn last_horizontal(&self) -> Option<Horizontal> {
        self.last_horizontal
    }

    /// Direction the player should move this tick, if any.
    pub fn horizontal(&self) -> Option<Horizontal> {
        self.last_horizontal
            .filter(|direction| self.is_held(direction.control()))
    }

    /// Consume a pending jump request.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }

    /// Consume a pending attack request.
    pub fn take_attack(&mut self) -> bool {
        std::mem::take(&mut self.attack_requested)
    }

    /// Drop pending requests without acting on them.
    pub fn clear_requests(&mut self) {
        self.jump_requested = false;
        self.attack_requested = false;
    }

    /// Release everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
