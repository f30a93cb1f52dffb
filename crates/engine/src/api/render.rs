//! Outbound render payload.
//!
//! A [`RenderResult`] is everything the chat collaborator needs to draw a
//! response: it never contains platform markup.

use serde::{Deserialize, Serialize};
use tavernkeep_domain::PageControls;

/// Outcome class of a command, used by the collaborator to pick styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderKind {
    Success,
    UserError,
    NotFound,
    Ambiguous,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderField {
    pub label: String,
    pub value: String,
}

/// An interactive button attached to a rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderControl {
    pub id: String,
    pub label: String,
    pub enabled: bool,
}

pub const PREVIOUS_PAGE_CONTROL: &str = "page_previous";
pub const NEXT_PAGE_CONTROL: &str = "page_next";

impl RenderControl {
    /// Previous/next buttons for a paginated listing.
    pub fn pagination(controls: PageControls) -> Vec<Self> {
        vec![
            Self {
                id: PREVIOUS_PAGE_CONTROL.to_string(),
                label: "Previous".to_string(),
                enabled: controls.previous_enabled,
            },
            Self {
                id: NEXT_PAGE_CONTROL.to_string(),
                label: "Next".to_string(),
                enabled: controls.next_enabled,
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResult {
    /// Echo of `Command::request_id` so responses can be matched to requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub kind: RenderKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<RenderField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Pagination caption for listings (`"Page 2 of 3"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<Vec<RenderControl>>,
    /// Disable every control on the message this result answers.
    #[serde(default)]
    pub disable_further_interaction: bool,
}

impl RenderResult {
    fn new(kind: RenderKind, title: impl Into<String>) -> Self {
        Self {
            request_id: None,
            kind,
            title: Some(title.into()),
            fields: Vec::new(),
            image_ref: None,
            footer: None,
            controls: None,
            disable_further_interaction: false,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(RenderKind::Success, title)
    }

    pub fn user_error(message: impl Into<String>) -> Self {
        Self::new(RenderKind::UserError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(RenderKind::NotFound, message)
    }

    pub fn ambiguous(message: impl Into<String>) -> Self {
        Self::new(RenderKind::Ambiguous, message)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(RenderKind::Failure, message)
    }

    pub fn with_field(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(RenderField {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    pub fn with_image(mut self, image_ref: Option<String>) -> Self {
        self.image_ref = image_ref;
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn with_controls(mut self, controls: Vec<RenderControl>) -> Self {
        self.controls = Some(controls);
        self
    }

    pub fn disable_further_interaction(mut self) -> Self {
        self.disable_further_interaction = true;
        self
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }
}
