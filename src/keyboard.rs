use log::warn;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// callback payloads the bot puts on its inline buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    /// re-run the membership check
    Verify,
    /// manual "I've joined everything" confirmation, skips the check
    ForceVerify,
}

impl CallbackAction {
    pub fn as_data(&self) -> &'static str {
        match self {
            CallbackAction::Verify => "verify",
            CallbackAction::ForceVerify => "force_verify",
        }
    }

    pub fn from_data(data: &str) -> Option<Self> {
        match data {
            "verify" => Some(CallbackAction::Verify),
            "force_verify" => Some(CallbackAction::ForceVerify),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Button {
    Url { label: String, url: String },
    Callback { label: String, action: CallbackAction },
}

impl Button {
    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Button::Url {
            label: label.into(),
            url: url.into(),
        }
    }

    pub fn callback(label: impl Into<String>, action: CallbackAction) -> Self {
        Button::Callback {
            label: label.into(),
            action,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Button::Url { label, .. } | Button::Callback { label, .. } => label,
        }
    }
}

/// ordered rows of ordered buttons
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// appends a row holding a single button
    pub fn single(mut self, button: Button) -> Self {
        self.rows.push(vec![button]);
        self
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    pub fn url_buttons(&self) -> impl Iterator<Item = &Button> {
        self.buttons()
            .filter(|button| matches!(button, Button::Url { .. }))
    }

    pub fn has_action(&self, action: CallbackAction) -> bool {
        self.buttons().any(|button| {
            matches!(button, Button::Callback { action: a, .. } if *a == action)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.is_empty())
    }

    pub fn to_markup(&self) -> InlineKeyboardMarkup {
        let rows: Vec<Vec<InlineKeyboardButton>> = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .filter_map(|button| match button {
                        Button::Url { label, url } => match url.parse() {
                            Ok(parsed) => Some(InlineKeyboardButton::url(label.clone(), parsed)),
                            Err(e) => {
                                warn!("Skipping button {:?} with invalid url {}: {}", label, url, e);
                                None
                            }
                        },
                        Button::Callback { label, action } => {
                            Some(InlineKeyboardButton::callback(label.clone(), action.as_data()))
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|row| !row.is_empty())
            .collect();

        InlineKeyboardMarkup::new(rows)
    }
}
