use super::scene::{GridPos, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Quit,
}

const ACTION_COUNT: usize = 5;

pub const MOVE_ACTIONS: [InputAction; 4] = [
    InputAction::MoveUp,
    InputAction::MoveDown,
    InputAction::MoveLeft,
    InputAction::MoveRight,
];

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::Quit => 4,
        }
    }

    /// Grid offset applied by a move nudge; `None` for non-move actions.
    pub const fn nudge_offset(self) -> Option<GridPos> {
        match self {
            InputAction::MoveUp => Some(GridPos::new(0, 1)),
            InputAction::MoveDown => Some(GridPos::new(0, -1)),
            InputAction::MoveLeft => Some(GridPos::new(1, 0)),
            InputAction::MoveRight => Some(GridPos::new(-1, 0)),
            InputAction::Quit => None,
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "move_up" => Some(InputAction::MoveUp),
            "move_down" => Some(InputAction::MoveDown),
            "move_left" => Some(InputAction::MoveLeft),
            "move_right" => Some(InputAction::MoveRight),
            "quit" => Some(InputAction::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ActionStates {
    pressed: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_pressed: bool) {
        self.pressed[action.index()] = is_pressed;
    }

    pub(crate) fn is_pressed(&self, action: InputAction) -> bool {
        self.pressed[action.index()]
    }
}

/// Discrete input edges for a single simulation step.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    actions: ActionStates,
    click_released_px: Option<Vec2>,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_action_pressed(mut self, action: InputAction, is_pressed: bool) -> Self {
        self.actions.set(action, is_pressed);
        self
    }

    pub fn with_click_released_px(mut self, click_released_px: Option<Vec2>) -> Self {
        self.click_released_px = click_released_px;
        self
    }

    pub fn is_pressed(&self, action: InputAction) -> bool {
        self.actions.is_pressed(action)
    }

    pub fn quit_requested(&self) -> bool {
        self.is_pressed(InputAction::Quit)
    }

    pub fn click_released_px(&self) -> Option<Vec2> {
        self.click_released_px
    }
}
