//! Per-tenant screen configuration.
//!
//! A tenant document describes the fields each generated client screen
//! renders (sign-in, sign-up, profile, ...). Fields are a closed set of
//! known kinds rather than an open map, so an unrecognized kind fails at
//! seed time instead of producing an unrenderable screen.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Map of screen name (e.g., `"signup"`) to its ordered field list.
pub type ScreenConfig = HashMap<String, Vec<ScreenField>>;

/// One field definition on a generated client screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScreenField {
    /// Free-form text input.
    Text {
        key: String,
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(default)]
        required: bool,
    },
    /// Email input (client applies email keyboard/validation).
    Email {
        key: String,
        label: String,
        #[serde(default)]
        required: bool,
    },
    /// Masked password input.
    Password {
        key: String,
        label: String,
        #[serde(default)]
        required: bool,
    },
    /// Phone number input.
    Phone {
        key: String,
        label: String,
        #[serde(default)]
        required: bool,
    },
    /// Numeric input.
    Number {
        key: String,
        label: String,
        #[serde(default)]
        required: bool,
    },
    /// Action button; `action` names the client-side handler.
    Button {
        key: String,
        label: String,
        action: String,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_wire_format() {
        let field = ScreenField::Email {
            key: "email".to_owned(),
            label: "Email address".to_owned(),
            required: true,
        };
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["kind"], "email");
        assert_eq!(json["required"], true);
    }

    #[test]
    fn test_parses_signup_screen() {
        let raw = r#"[
            {"kind": "text", "key": "firstName", "label": "First name", "required": true},
            {"kind": "email", "key": "email", "label": "Email", "required": true},
            {"kind": "password", "key": "password", "label": "Password", "required": true},
            {"kind": "phone", "key": "phone", "label": "Phone"},
            {"kind": "button", "key": "submit", "label": "Create account", "action": "register"}
        ]"#;
        let fields: Vec<ScreenField> = serde_json::from_str(raw).unwrap();
        assert_eq!(fields.len(), 5);
        assert!(matches!(
            fields.first(),
            Some(ScreenField::Text { required: true, .. })
        ));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let raw = r#"{"kind": "carousel", "key": "x", "label": "y"}"#;
        assert!(serde_json::from_str::<ScreenField>(raw).is_err());
    }
}
