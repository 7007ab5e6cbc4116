//! Input events: [`Msg`], [`Key`], [`MouseAction`].

use std::time::Instant;

use crate::geom::Point;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// A keyboard key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Escape,
    Enter,
    Space,
    /// A printable character other than space.
    Char(char),
}

// ---------------------------------------------------------------------------
// MouseAction
// ---------------------------------------------------------------------------

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseAction {
    /// Primary (left) button pressed.
    Main,
    /// Middle button pressed.
    Auxiliary,
    /// Secondary (right) button pressed.
    Secondary,
    /// Button released.
    Release,
}

// ---------------------------------------------------------------------------
// Msg
// ---------------------------------------------------------------------------

/// An input message delivered to the model.
#[derive(Clone, Debug)]
pub enum Msg {
    /// Sent once when the application starts.
    Init,
    /// A key was pressed.
    KeyDown { key: Key, time: Instant },
    /// A mouse button event. `pos` is a grid cell, already mapped from screen
    /// coordinates by the driver.
    Mouse {
        action: MouseAction,
        pos: Point,
        time: Instant,
    },
    /// Request to quit.
    Quit,
}

impl Msg {
    /// Convenience: a `KeyDown` stamped now.
    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            time: Instant::now(),
        }
    }

    /// Convenience: a `Mouse` event stamped now.
    pub fn mouse(action: MouseAction, pos: Point) -> Self {
        Self::Mouse {
            action,
            pos,
            time: Instant::now(),
        }
    }
}
