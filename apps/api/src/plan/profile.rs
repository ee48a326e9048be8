//! Questionnaire payload collected by the front-end.

use serde::{Deserialize, Serialize};

/// A field the front-end may send as free text or as a list of selected tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrTags {
    Text(String),
    Tags(Vec<String>),
}

impl TextOrTags {
    /// Tag lists render joined with `", "`; free text renders as itself.
    pub fn render(&self) -> String {
        match self {
            TextOrTags::Text(text) => text.clone(),
            TextOrTags::Tags(tags) => tags.join(", "),
        }
    }
}

impl Default for TextOrTags {
    fn default() -> Self {
        TextOrTags::Text(String::new())
    }
}

/// Coaching-business profile from the questionnaire.
///
/// Fields the front-end omits deserialize to empty strings and render as
/// blanks in the published document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub coach_type: String,
    pub location: String,
    /// Free-text description of the ideal client.
    pub client_avatar: String,
    pub brand_voice: TextOrTags,
    pub platforms: TextOrTags,
    pub content_formats: TextOrTags,
    pub posting_frequency: String,
    pub cta_style: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_joins_tags_with_comma_space() {
        let tags = TextOrTags::Tags(vec![
            "A".to_string(),
            "B".to_string(),
            "C".to_string(),
        ]);
        assert_eq!(tags.render(), "A, B, C");
    }

    #[test]
    fn test_render_passes_text_through_unchanged() {
        let text = TextOrTags::Text("bold and direct".to_string());
        assert_eq!(text.render(), "bold and direct");
    }

    #[test]
    fn test_deserializes_scalar_and_list_shapes() {
        let profile: UserProfile = serde_json::from_str(
            r#"{
                "firstName": "Jane",
                "brandVoice": ["bold", "direct"],
                "platforms": "Instagram"
            }"#,
        )
        .unwrap();

        assert_eq!(profile.first_name, "Jane");
        assert_eq!(
            profile.brand_voice,
            TextOrTags::Tags(vec!["bold".to_string(), "direct".to_string()])
        );
        assert_eq!(profile.platforms, TextOrTags::Text("Instagram".to_string()));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let profile: UserProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile.first_name, "");
        assert_eq!(profile.brand_voice.render(), "");
        assert_eq!(profile.cta_style, "");
    }
}
