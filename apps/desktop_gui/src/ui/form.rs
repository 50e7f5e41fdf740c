//! The search form: field widgets, the number input mask, and validation
//! marking.

use eframe::egui::{
    self,
    text::{CCursor, CCursorRange},
    text_edit::TextEditOutput,
};
use shared::{
    domain::{FormField, FormInput, SearchQuery},
    error::ValidationError,
};

use crate::ui::theme;

pub const EMAIL_PLACEHOLDER: &str = "name@example.com";
pub const NUMBER_PLACEHOLDER: &str = "Enter a number";
const NUMBER_DIGITS: usize = 6;

/// Formats typed text as `DD-DD-DD`: non-digits are dropped, at most six
/// digits are kept and hyphens follow the second and fourth digit.
pub fn mask_number_input(raw: &str) -> String {
    let mut masked = String::with_capacity(NUMBER_DIGITS + 2);
    for (index, digit) in raw
        .chars()
        .filter(char::is_ascii_digit)
        .take(NUMBER_DIGITS)
        .enumerate()
    {
        if index == 2 || index == 4 {
            masked.push('-');
        }
        masked.push(digit);
    }
    masked
}

#[derive(Debug, Default)]
pub struct SearchForm {
    pub email: String,
    pub number: String,
    errors: Vec<ValidationError>,
    submitted_once: bool,
}

impl SearchForm {
    pub fn field_error(&self, field: FormField) -> Option<&ValidationError> {
        self.errors.iter().find(|err| err.field == field)
    }

    pub fn input(&self) -> FormInput {
        let number = (!self.number.is_empty()).then(|| self.number.clone());
        FormInput::new(self.email.clone(), number)
    }

    /// Validates every field. Failing fields are marked and nothing is
    /// returned; otherwise the query to submit.
    pub fn submit(&mut self) -> Option<SearchQuery> {
        self.submitted_once = true;
        match self.input().validate() {
            Ok(query) => {
                self.errors.clear();
                Some(query)
            }
            Err(errors) => {
                tracing::debug!(invalid_fields = errors.len(), "search form rejected");
                self.errors = errors;
                None
            }
        }
    }

    pub fn on_email_edited(&mut self) {
        self.revalidate();
    }

    pub fn on_number_edited(&mut self) {
        self.number = mask_number_input(&self.number);
        self.revalidate();
    }

    // Marks only update while typing once a submit has been attempted.
    fn revalidate(&mut self) {
        if !self.submitted_once {
            return;
        }
        self.errors = match self.input().validate() {
            Ok(_) => Vec::new(),
            Err(errors) => errors,
        };
    }

    /// Draws the fields and the submit button. Returns a query when the user
    /// submitted valid input this frame.
    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<SearchQuery> {
        let mut email = std::mem::take(&mut self.email);
        let email_out = form_field(
            ui,
            field_id(FormField::Email),
            "Email address",
            EMAIL_PLACEHOLDER,
            &mut email,
            self.field_error(FormField::Email),
        );
        self.email = email;
        if email_out.response.changed() {
            self.on_email_edited();
        }
        field_message(ui, self.field_error(FormField::Email));

        ui.add_space(8.0);

        let mut number = std::mem::take(&mut self.number);
        let number_out = form_field(
            ui,
            field_id(FormField::Number),
            "Number (Optional)",
            NUMBER_PLACEHOLDER,
            &mut number,
            self.field_error(FormField::Number),
        );
        self.number = number;
        if number_out.response.changed() {
            let typed = self.number.clone();
            self.on_number_edited();
            if self.number != typed {
                // The stored cursor still indexes the unmasked text.
                let mut state = number_out.state;
                let end = CCursor::new(self.number.chars().count());
                state.cursor.set_char_range(Some(CCursorRange::one(end)));
                state.store(ui.ctx(), number_out.response.id);
            }
        }
        field_message(ui, self.field_error(FormField::Number));

        ui.add_space(10.0);

        let enter_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));
        let enter_submit = enter_pressed
            && (email_out.response.lost_focus() || number_out.response.lost_focus());
        let clicked = ui
            .add(egui::Button::new(egui::RichText::new("Submit").strong()).min_size(
                egui::vec2(theme::FIELD_WIDTH, 32.0),
            ))
            .clicked();

        if clicked || enter_submit {
            self.submit()
        } else {
            None
        }
    }
}

/// Widget id of a form field's text edit.
pub fn field_id(field: FormField) -> egui::Id {
    egui::Id::new(("search_form", field.name()))
}

fn form_field(
    ui: &mut egui::Ui,
    id: egui::Id,
    label: &str,
    hint: &str,
    value: &mut String,
    error: Option<&ValidationError>,
) -> TextEditOutput {
    ui.label(egui::RichText::new(label).strong());
    let stroke = if error.is_some() {
        egui::Stroke::new(1.5, theme::ERROR_COLOR)
    } else {
        egui::Stroke::NONE
    };
    egui::Frame::NONE
        .stroke(stroke)
        .corner_radius(6.0)
        .inner_margin(egui::Margin::same(2))
        .show(ui, |ui| {
            egui::TextEdit::singleline(value)
                .id(id)
                .hint_text(hint)
                .desired_width(theme::FIELD_WIDTH)
                .show(ui)
        })
        .inner
}

fn field_message(ui: &mut egui::Ui, error: Option<&ValidationError>) {
    if let Some(err) = error {
        ui.label(egui::RichText::new(err.message()).color(theme::ERROR_COLOR));
    }
}
