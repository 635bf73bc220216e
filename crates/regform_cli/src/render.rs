//! Plain-text rendering of a form view

use std::fmt;

use regform_core::{FormView, SubmitControl};

/// Displays a [`FormView`] as the terminal form
pub struct TextView<'a>(pub &'a FormView);

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Join options, bracketing the selected one
fn options<T: fmt::Display + PartialEq>(items: &[T], selected: Option<&T>) -> String {
    items
        .iter()
        .map(|item| {
            if selected == Some(item) {
                format!("[{item}]")
            } else {
                item.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;

        writeln!(f, "Name:          {}", or_dash(&view.first_name))?;
        writeln!(f, "Surname:       {}", or_dash(&view.last_name))?;
        writeln!(f, "Date of birth: {}", or_dash(&view.date_of_birth))?;
        writeln!(
            f,
            "Framework:     {}",
            options(&view.frameworks, view.framework.as_ref())
        )?;
        if view.version_disabled {
            writeln!(f, "Version:       (select a framework first)")?;
        } else {
            writeln!(
                f,
                "Version:       {}",
                options(&view.version_options, view.version.as_ref())
            )?;
        }

        writeln!(f, "Email:         {}", or_dash(&view.email))?;
        if let Some(error) = &view.email_error {
            writeln!(f, "  ! {error}")?;
        }

        writeln!(f, "Hobbies:")?;
        for hobby in &view.hobbies {
            writeln!(f, "  - {} ({})  [Delete]", hobby.name, hobby.duration)?;
        }
        writeln!(
            f,
            "  + {} / {}  [Add one{}]",
            or_dash(&view.draft_name),
            or_dash(&view.draft_duration),
            if view.add_hobby_disabled { ", disabled" } else { "" }
        )?;

        match view.submit {
            SubmitControl::Progress => writeln!(f, "[ ... registering ... ]")?,
            SubmitControl::Button { disabled: true } => writeln!(f, "[Sign up, disabled]")?,
            SubmitControl::Button { disabled: false } => writeln!(f, "[Sign up]")?,
        }

        if let Some(message) = view.success_message {
            writeln!(f, "{message}")?;
        }
        Ok(())
    }
}
