//! Screen navigation and backend access.
//!
//! The desk runs a single session: one authentication flag and one active
//! screen. Every navigation request goes through [`Session::apply`], which is
//! the only place the backend guard is enforced.

use serde::Serialize;
use tracing::{info, warn};

/// A screen of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// The customer-facing intake form.
    #[default]
    Public,
    /// The backend password gate.
    Login,
    /// The live queue dashboard.
    Queue,
    /// The customer log dashboard.
    Customers,
}

impl Screen {
    /// Check if the screen belongs to the staff dashboard.
    #[must_use]
    pub fn is_backend(self) -> bool {
        matches!(self, Self::Queue | Self::Customers)
    }
}

/// A navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The hidden backend button on the public screen.
    OpenBackend,
    /// A password submitted at the gate.
    Login(String),
    /// Show the live queue.
    ShowQueue,
    /// Show the customer log.
    ShowCustomers,
    /// Return to the intake form.
    ShowPublic,
    /// Leave the backend.
    Logout,
}

/// The result of applying an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The session moved to the given screen.
    Moved(Screen),
    /// The password was wrong; the session stays at the gate.
    LoginRejected,
    /// A backend screen was requested without authentication.
    Denied,
}

/// The desk's session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    authenticated: bool,
    screen: Screen,
}

impl Session {
    /// A fresh, unauthenticated session on the public screen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if backend access has been granted.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The screen that should be rendered.
    ///
    /// A backend screen is never shown to an unauthenticated session.
    #[must_use]
    pub fn screen(&self) -> Screen {
        if self.screen.is_backend() && !self.authenticated {
            Screen::Public
        } else {
            self.screen
        }
    }

    /// Apply a navigation request.
    ///
    /// `password` is the configured shared secret that [`Action::Login`] is
    /// compared against.
    pub fn apply(&mut self, action: Action, password: &str) -> Transition {
        match action {
            Action::OpenBackend => {
                let target = if self.authenticated {
                    Screen::Queue
                } else {
                    Screen::Login
                };
                self.move_to(target)
            }
            Action::Login(attempt) => {
                if attempt == password {
                    self.authenticated = true;
                    info!("backend login");
                    self.move_to(Screen::Queue)
                } else {
                    warn!("backend login rejected");
                    self.screen = Screen::Login;
                    Transition::LoginRejected
                }
            }
            Action::ShowQueue => self.guarded(Screen::Queue),
            Action::ShowCustomers => self.guarded(Screen::Customers),
            Action::ShowPublic => self.move_to(Screen::Public),
            Action::Logout => {
                if self.authenticated {
                    info!("backend logout");
                }
                self.authenticated = false;
                self.move_to(Screen::Public)
            }
        }
    }

    fn guarded(&mut self, target: Screen) -> Transition {
        if self.authenticated {
            self.move_to(target)
        } else {
            self.screen = Screen::Public;
            Transition::Denied
        }
    }

    fn move_to(&mut self, screen: Screen) -> Transition {
        self.screen = screen;
        Transition::Moved(screen)
    }
}
