//! Document assembler — turns a profile and a generated plan into the ordered
//! batch of edits that renders the published document.
//!
//! The batch is position-indexed: each insert names the offset it lands at,
//! assuming every earlier edit in the batch has already been applied. The
//! assembler is pure; the creation date is injected by the caller so tests can
//! freeze it.

use crate::gdocs::{Alignment, DocRequest, Location, NamedStyleType, ParagraphStyle, Range};
use crate::plan::profile::UserProfile;

/// Document heading. The offset arithmetic below derives from this string so
/// the style range and cursor stay in sync if the wording ever changes.
const TITLE: &str = "30-Day Social Media Content Plan\n";

/// Horizontal rule between document sections.
const SECTION_RULE: &str = "═══════════════════════════════════════════════════";

/// en-US short date (`8/6/2026`), matching what the front-end shows.
pub const DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Builds the full edit batch for one content-plan document:
/// title insert, title heading style, body insert.
pub fn assemble(profile: &UserProfile, plan: &str, date_created: &str) -> Vec<DocRequest> {
    let mut requests = Vec::with_capacity(3);

    // Offset 0 is reserved in a new document; 1 is the first insertable position.
    let index: u32 = 1;

    requests.push(DocRequest::InsertText {
        location: Location { index },
        text: TITLE.to_string(),
    });

    // The title is ASCII, so byte length equals the API's UTF-16 offsets.
    let title_len = TITLE.len() as u32;

    requests.push(DocRequest::UpdateParagraphStyle {
        range: Range {
            start_index: index,
            end_index: index + title_len,
        },
        paragraph_style: ParagraphStyle {
            named_style_type: NamedStyleType::Heading1,
            alignment: Alignment::Center,
        },
        fields: "namedStyleType,alignment".to_string(),
    });

    // Past the inserted title plus the paragraph marker after the heading.
    let index = index + title_len + 1;

    requests.push(DocRequest::InsertText {
        location: Location { index },
        text: render_body(profile, plan, date_created),
    });

    requests
}

/// Renders the document body. The plan text is embedded verbatim.
fn render_body(profile: &UserProfile, plan: &str, date_created: &str) -> String {
    format!(
        r#"
Coach: {first_name} {last_name}
Type: {coach_type}
Location: {location}
Date Created: {date_created}

{rule}

COACHING PROFILE

Ideal Clients: {client_avatar}

Brand Voice: {brand_voice}

Platform(s): {platforms}

Content Formats: {content_formats}

Posting Frequency: {posting_frequency}

CTA Style: {cta_style}

{rule}

YOUR 30-DAY CONTENT CALENDAR

{plan}

{rule}

IMPLEMENTATION TIPS

1. Schedule posts in advance using your platform's scheduling tool
2. Batch create content on your "content days" to stay ahead
3. Engage with comments within the first hour of posting
4. Track which posts perform best and create more of that content
5. Don't be afraid to repurpose top-performing content

Questions? Contact TurnKey Coach at jveach@barbell-logic.com

"#,
        first_name = profile.first_name,
        last_name = profile.last_name,
        coach_type = profile.coach_type,
        location = profile.location,
        date_created = date_created,
        rule = SECTION_RULE,
        client_avatar = profile.client_avatar,
        brand_voice = profile.brand_voice.render(),
        platforms = profile.platforms.render(),
        content_formats = profile.content_formats.render(),
        posting_frequency = profile.posting_frequency,
        cta_style = profile.cta_style,
        plan = plan,
    )
}
