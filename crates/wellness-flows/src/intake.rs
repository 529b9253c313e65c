//! Two-step onboarding wizard.

use std::sync::Arc;

use gateway_client::GatewayClient;
use tokio::sync::Mutex;
use tracing::{debug, info};
use wellness_core::{DietaryPreference, Goal, Outcome, RequestState, User, UserIntake};

use crate::panel::{Panel, ViewGuard};
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeStep {
    /// Name, email, age and gender.
    Basics,
    /// Experience, activity level, dietary preferences and goals.
    Preferences,
}

impl IntakeStep {
    pub fn number(&self) -> u8 {
        match self {
            Self::Basics => 1,
            Self::Preferences => 2,
        }
    }
}

/// Collects a [`UserIntake`] over two steps and registers it.
///
/// Values entered on either step survive moving back and forth.
pub struct IntakeWizard {
    gateway: Arc<dyn GatewayClient>,
    session: Arc<SessionStore>,
    step: Mutex<IntakeStep>,
    form: Mutex<UserIntake>,
    registration: Panel<User>,
    guard: ViewGuard,
}

impl IntakeWizard {
    pub fn new(gateway: Arc<dyn GatewayClient>, session: Arc<SessionStore>) -> Self {
        let guard = ViewGuard::new();
        Self {
            gateway,
            session,
            step: Mutex::new(IntakeStep::Basics),
            form: Mutex::new(UserIntake::default()),
            registration: Panel::new("registration", guard.clone()),
            guard,
        }
    }

    pub async fn step(&self) -> IntakeStep {
        *self.step.lock().await
    }

    pub async fn form(&self) -> UserIntake {
        self.form.lock().await.clone()
    }

    /// Edit the form in place.
    pub async fn update<F>(&self, edit: F)
    where
        F: FnOnce(&mut UserIntake),
    {
        edit(&mut *self.form.lock().await);
    }

    /// Flip a dietary preference. Returns whether it is now selected.
    pub async fn toggle_dietary_preference(&self, preference: DietaryPreference) -> bool {
        self.form.lock().await.dietary_preferences.toggle(preference)
    }

    /// Flip a goal. Returns whether it is now selected.
    pub async fn toggle_goal(&self, goal: Goal) -> bool {
        self.form.lock().await.goals.toggle(goal)
    }

    /// Step 1 to Step 2. No effect on Step 2.
    pub async fn next(&self) -> IntakeStep {
        let mut step = self.step.lock().await;
        *step = IntakeStep::Preferences;
        *step
    }

    /// Step 2 to Step 1. No effect on Step 1, or while a registration is
    /// pending.
    pub async fn back(&self) -> IntakeStep {
        if self.registration.is_pending().await {
            debug!("back() during registration, staying on step 2");
            return self.step().await;
        }
        let mut step = self.step.lock().await;
        *step = IntakeStep::Basics;
        *step
    }

    /// Register the accumulated intake and persist the returned user.
    ///
    /// Only allowed from Step 2, and only while no user is established in
    /// the session. On failure the wizard is on Step 2 with the form intact
    /// and the error available from [`IntakeWizard::error`].
    pub async fn complete(&self) -> Outcome {
        if self.step().await != IntakeStep::Preferences {
            debug!("complete() called before the preferences step, ignoring");
            return Outcome::Ignored;
        }
        if !self.registration.begin().await {
            return Outcome::Ignored;
        }

        if let Some(user_id) = self.session.user_id().await {
            let message = format!("Already onboarded as user {}", user_id);
            return self.registration.finish(Err(message)).await;
        }

        let snapshot = self.form().await;
        let result = match self.gateway.register(&snapshot).await {
            Ok(reply) => {
                let user = User::from_registration(reply, &snapshot);
                if self.registration.is_live() {
                    self.session
                        .establish(user.clone())
                        .await
                        .map(|()| user)
                        .map_err(|err| format!("Could not save your profile: {}", err))
                } else {
                    Ok(user)
                }
            }
            Err(err) => Err(format!("Registration failed: {}", err.user_message())),
        };

        let outcome = self.registration.finish(result).await;
        match outcome {
            Outcome::Completed => info!("Onboarding complete"),
            Outcome::Failed => *self.step.lock().await = IntakeStep::Preferences,
            _ => {}
        }
        outcome
    }

    pub async fn state(&self) -> RequestState<User> {
        self.registration.state().await
    }

    pub async fn user(&self) -> Option<User> {
        self.registration.value().await
    }

    pub async fn error(&self) -> Option<String> {
        self.registration.error().await
    }

    /// Tear down the view; a registration still in flight is not applied.
    pub fn teardown(&self) {
        self.guard.teardown();
    }
}
