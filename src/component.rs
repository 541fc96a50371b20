//! Component trait - Interface for UI components
//!
//! Each component encapsulates its own state, event handling, and rendering
//! logic. Components communicate through Actions rather than direct state
//! mutation: `handle_key_event` converts events to Actions, `update`
//! processes Actions, `draw` renders.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
pub trait Component {
    /// Called once when the component is created; use for state that
    /// depends on runtime information.
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Convert a key event into a semantic Action; no state changes here.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Process an Action and update state; may return a follow-up Action.
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Render the component into `area`; pure rendering only.
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
