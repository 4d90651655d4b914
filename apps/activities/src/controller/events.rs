//! Typed user intents handled by the controller.

/// Everything the user can ask for. Row and option positions are resolved
/// against the display as it is when the command is handled, never when it
/// was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Refresh,
    SelectActivity { position: usize },
    EditEmail { email: String },
    SubmitSignup,
    UnregisterRow { card: usize, row: usize },
    SignupRequested { activity: String, email: String },
    UnregisterRequested { activity: String, email: String },
}

impl UiCommand {
    pub fn name(&self) -> &'static str {
        match self {
            UiCommand::Refresh => "refresh",
            UiCommand::SelectActivity { .. } => "select_activity",
            UiCommand::EditEmail { .. } => "edit_email",
            UiCommand::SubmitSignup => "submit_signup",
            UiCommand::UnregisterRow { .. } => "unregister_row",
            UiCommand::SignupRequested { .. } => "signup",
            UiCommand::UnregisterRequested { .. } => "unregister",
        }
    }
}

/// State of the signup form: the selector's current value and the email
/// field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub activity: String,
    pub email: String,
}

impl SignupForm {
    pub fn reset(&mut self) {
        self.activity.clear();
        self.email.clear();
    }
}
