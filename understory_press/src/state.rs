// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch states, transition signals, and the transition table.
//!
//! ## States
//!
//! - `NotResponder`: idle.
//! - `ResponderInactivePressIn` / `ResponderInactivePressOut`: the element owns
//!   the gesture but the press-in delay has not elapsed yet.
//! - `ResponderActivePressIn` / `ResponderActivePressOut`: activated, pointer
//!   inside / outside the responder region.
//! - `ResponderActiveLongPressIn` / `ResponderActiveLongPressOut`: as above,
//!   after the long-press threshold was reached.
//! - `Error`: an invalid signal arrived; the machine recovers to idle.
//!
//! [`transition`] is the only way the machine moves between states.

use core::fmt;

/// The press state of one element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TouchState {
    /// Idle; the element is not the responder.
    #[default]
    NotResponder,
    /// Responder granted, press-in delay pending, pointer inside the region.
    ResponderInactivePressIn,
    /// Responder granted, press-in delay pending, pointer outside the region.
    ResponderInactivePressOut,
    /// Activated, pointer inside the region.
    ResponderActivePressIn,
    /// Activated, pointer outside the region.
    ResponderActivePressOut,
    /// Long press detected, pointer inside the region.
    ResponderActiveLongPressIn,
    /// Long press detected, pointer outside the region.
    ResponderActiveLongPressOut,
    /// Invalid signal ordering was observed.
    Error,
}

impl TouchState {
    /// `true` for the states in which a release counts as a press.
    pub const fn is_press_in(self) -> bool {
        matches!(
            self,
            Self::ResponderInactivePressIn
                | Self::ResponderActivePressIn
                | Self::ResponderActiveLongPressIn
        )
    }

    /// `true` for activated states with the pointer inside the region.
    pub const fn is_active(self) -> bool {
        matches!(
            self,
            Self::ResponderActivePressIn | Self::ResponderActiveLongPressIn
        )
    }

    /// `true` once the press-in delay has elapsed, regardless of pointer location.
    pub const fn is_activated(self) -> bool {
        matches!(
            self,
            Self::ResponderActivePressIn
                | Self::ResponderActivePressOut
                | Self::ResponderActiveLongPressIn
                | Self::ResponderActiveLongPressOut
        )
    }

    /// `true` while the element owns the gesture.
    pub const fn is_responder(self) -> bool {
        !matches!(self, Self::NotResponder | Self::Error)
    }
}

/// Transition alphabet of the press state machine.
///
/// Raw events are translated into signals; timers produce `Delay` and
/// `LongPressDetected`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The press-in delay elapsed.
    Delay,
    /// The element became the responder.
    ResponderGrant,
    /// The pointer was released.
    ResponderRelease,
    /// The gesture was taken away or cancelled.
    ResponderTerminated,
    /// The pointer is inside the responder region.
    EnterPressRect,
    /// The pointer is outside the responder region.
    LeavePressRect,
    /// The long-press threshold was reached.
    LongPressDetected,
}

impl Signal {
    /// `true` for signals that end a press cycle.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::ResponderRelease | Self::ResponderTerminated)
    }
}

/// A signal that is not valid in the current state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SignalError {
    /// State the machine was in.
    pub state: TouchState,
    /// Signal that was received.
    pub signal: Signal,
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "signal {:?} is not valid in state {:?}",
            self.signal, self.state
        )
    }
}

impl core::error::Error for SignalError {}

/// Looks up the next state for `signal` received in `state`.
pub fn transition(state: TouchState, signal: Signal) -> Result<TouchState, SignalError> {
    use Signal as S;
    use TouchState as T;

    let next = match (state, signal) {
        // Any responder state returns to idle when the gesture ends.
        (s, sig) if s.is_responder() && sig.is_terminal() => T::NotResponder,

        (T::NotResponder | T::Error, S::ResponderGrant) => T::ResponderInactivePressIn,

        (T::ResponderInactivePressIn, S::Delay) => T::ResponderActivePressIn,
        (T::ResponderInactivePressOut, S::Delay) => T::ResponderActivePressOut,
        (T::ResponderInactivePressIn | T::ResponderInactivePressOut, S::EnterPressRect) => {
            T::ResponderInactivePressIn
        }
        (T::ResponderInactivePressIn | T::ResponderInactivePressOut, S::LeavePressRect) => {
            T::ResponderInactivePressOut
        }

        (T::ResponderActivePressIn | T::ResponderActivePressOut, S::EnterPressRect) => {
            T::ResponderActivePressIn
        }
        (T::ResponderActivePressIn | T::ResponderActivePressOut, S::LeavePressRect) => {
            T::ResponderActivePressOut
        }
        (T::ResponderActivePressIn, S::LongPressDetected) => T::ResponderActiveLongPressIn,

        (T::ResponderActiveLongPressIn | T::ResponderActiveLongPressOut, S::EnterPressRect) => {
            T::ResponderActiveLongPressIn
        }
        (T::ResponderActiveLongPressIn | T::ResponderActiveLongPressOut, S::LeavePressRect) => {
            T::ResponderActiveLongPressOut
        }
        (T::ResponderActiveLongPressIn, S::LongPressDetected) => T::ResponderActiveLongPressIn,

        (T::Error, _) => T::NotResponder,

        _ => return Err(SignalError { state, signal }),
    };
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_is_only_valid_when_idle() {
        assert_eq!(
            transition(TouchState::NotResponder, Signal::ResponderGrant),
            Ok(TouchState::ResponderInactivePressIn)
        );
        assert!(transition(TouchState::ResponderActivePressIn, Signal::ResponderGrant).is_err());
        assert!(transition(TouchState::ResponderInactivePressIn, Signal::ResponderGrant).is_err());
    }

    #[test]
    fn idle_rejects_everything_but_grant() {
        for signal in [
            Signal::Delay,
            Signal::ResponderRelease,
            Signal::ResponderTerminated,
            Signal::EnterPressRect,
            Signal::LeavePressRect,
            Signal::LongPressDetected,
        ] {
            let err = transition(TouchState::NotResponder, signal).unwrap_err();
            assert_eq!(err.signal, signal);
            assert_eq!(err.state, TouchState::NotResponder);
        }
    }

    #[test]
    fn delay_activates_preserving_region() {
        assert_eq!(
            transition(TouchState::ResponderInactivePressIn, Signal::Delay),
            Ok(TouchState::ResponderActivePressIn)
        );
        assert_eq!(
            transition(TouchState::ResponderInactivePressOut, Signal::Delay),
            Ok(TouchState::ResponderActivePressOut)
        );
        assert!(transition(TouchState::ResponderActivePressIn, Signal::Delay).is_err());
    }

    #[test]
    fn long_press_only_from_active_press_in() {
        assert_eq!(
            transition(TouchState::ResponderActivePressIn, Signal::LongPressDetected),
            Ok(TouchState::ResponderActiveLongPressIn)
        );
        assert!(
            transition(TouchState::ResponderActivePressOut, Signal::LongPressDetected).is_err()
        );
        assert!(
            transition(TouchState::ResponderInactivePressIn, Signal::LongPressDetected).is_err()
        );
    }

    #[test]
    fn long_press_states_keep_their_flavor_across_region_changes() {
        assert_eq!(
            transition(TouchState::ResponderActiveLongPressIn, Signal::LeavePressRect),
            Ok(TouchState::ResponderActiveLongPressOut)
        );
        assert_eq!(
            transition(TouchState::ResponderActiveLongPressOut, Signal::EnterPressRect),
            Ok(TouchState::ResponderActiveLongPressIn)
        );
    }

    #[test]
    fn terminal_signals_return_to_idle() {
        for state in [
            TouchState::ResponderInactivePressIn,
            TouchState::ResponderInactivePressOut,
            TouchState::ResponderActivePressIn,
            TouchState::ResponderActivePressOut,
            TouchState::ResponderActiveLongPressIn,
            TouchState::ResponderActiveLongPressOut,
        ] {
            assert_eq!(
                transition(state, Signal::ResponderRelease),
                Ok(TouchState::NotResponder)
            );
            assert_eq!(
                transition(state, Signal::ResponderTerminated),
                Ok(TouchState::NotResponder)
            );
        }
    }

    #[test]
    fn error_recovers() {
        assert_eq!(
            transition(TouchState::Error, Signal::ResponderGrant),
            Ok(TouchState::ResponderInactivePressIn)
        );
        assert_eq!(
            transition(TouchState::Error, Signal::ResponderRelease),
            Ok(TouchState::NotResponder)
        );
    }

    #[test]
    fn predicates() {
        assert!(TouchState::ResponderInactivePressIn.is_press_in());
        assert!(!TouchState::ResponderActivePressOut.is_press_in());
        assert!(TouchState::ResponderActiveLongPressIn.is_active());
        assert!(!TouchState::ResponderInactivePressIn.is_active());
        assert!(TouchState::ResponderActiveLongPressOut.is_activated());
        assert!(!TouchState::NotResponder.is_responder());
    }

    #[test]
    fn only_release_and_termination_end_a_cycle() {
        assert!(Signal::ResponderRelease.is_terminal());
        assert!(Signal::ResponderTerminated.is_terminal());
        for signal in [
            Signal::Delay,
            Signal::ResponderGrant,
            Signal::EnterPressRect,
            Signal::LeavePressRect,
            Signal::LongPressDetected,
        ] {
            assert!(!signal.is_terminal(), "{signal:?}");
        }
    }
}
