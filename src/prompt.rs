use dialoguer::{Confirm, theme::ColorfulTheme};

/// Abstraction over a boolean (yes/no) confirmation prompt.
///
/// This trait allows interactive confirmation to be injected or mocked,
/// promoting testability in CLI workflows.
pub trait ConfirmPrompter {
    /// Prompt the user for a yes/no confirmation.
    ///
    /// # Parameters
    /// - `prompt`: The confirmation message.
    /// - `default`: The default answer if the user presses Enter.
    ///
    /// # Returns
    /// `Ok(true)` if confirmed, `Ok(false)` if declined, or `Err(String)` on input failure.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, String>;
}

/// Default implementation of `ConfirmPrompter` using `dialoguer::Confirm`.
///
/// Displays a yes/no dialog with styling from `ColorfulTheme`.
pub struct DialoguerConfirmPrompter;

impl ConfirmPrompter for DialoguerConfirmPrompter {
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, String> {
        let theme = ColorfulTheme::default();
        let confirm = Confirm::with_theme(&theme)
            .with_prompt(prompt)
            .default(default);
        match confirm.interact() {
            Ok(v) => Ok(v),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Ask the user to confirm the history rewrite before it starts.
///
/// Wraps the `ConfirmPrompter` trait with the fixed warning prompt. The
/// default answer is yes, so pressing Enter proceeds.
///
/// # Parameters
/// - `prompter`: A mutable reference to a `ConfirmPrompter` implementation.
///
/// # Returns
/// - `Ok(true)` if the user confirmed.
/// - `Ok(false)` if the user declined.
/// - `Err(String)` if input failed.
pub fn confirm_rewrite<P: ConfirmPrompter>(prompter: &mut P) -> Result<bool, String> {
    let prompt = "Bắt đầu rewrite? (toàn bộ lịch sử sẽ bị thay đổi)";
    prompter.confirm(prompt, true)
}
