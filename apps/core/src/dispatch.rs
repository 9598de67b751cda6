//! Activation state machine for the launcher window.
//!
//! Two states, `Hidden` and `Visible`. An activation that arrives while a
//! transition's side effects are still running is queued and applied after
//! completion, so N activations always produce N toggles even under rapid
//! double-firing.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    Hidden,
    Visible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Reset the session (clear query, clear results, shrink, recenter),
    /// then show the window. The reset runs before visibility so stale
    /// results can never flash.
    Show,
    /// Cancel the in-flight search, release its worker, hide the window.
    Hide,
}

#[derive(Debug)]
pub struct ActivationMachine {
    state: WindowState,
    in_transition: bool,
    queued: usize,
}

impl Default for ActivationMachine {
    fn default() -> Self {
        Self {
            state: WindowState::Hidden,
            in_transition: false,
            queued: 0,
        }
    }
}

impl ActivationMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn queued_activations(&self) -> usize {
        self.queued
    }

    /// Handle one activation event. Returns the transition whose side
    /// effects the caller must now run, or `None` when a transition is
    /// already in flight and the event was queued.
    pub fn on_activation(&mut self) -> Option<Transition> {
        if self.in_transition {
            self.queued += 1;
            return None;
        }
        Some(self.begin())
    }

    /// Report that the current transition's side effects finished. Commits
    /// the state change, then immediately begins the next queued transition
    /// if any; the returned transition must be executed by the caller.
    pub fn transition_complete(&mut self) -> Option<Transition> {
        debug_assert!(self.in_transition, "no transition in flight");
        self.state = match self.state {
            WindowState::Hidden => WindowState::Visible,
            WindowState::Visible => WindowState::Hidden,
        };
        self.in_transition = false;

        if self.queued == 0 {
            return None;
        }
        self.queued -= 1;
        Some(self.begin())
    }

    fn begin(&mut self) -> Transition {
        self.in_transition = true;
        match self.state {
            WindowState::Hidden => Transition::Show,
            WindowState::Visible => Transition::Hide,
        }
    }
}
