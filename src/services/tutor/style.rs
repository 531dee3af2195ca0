//! Profile-Driven Response Style
//!
//! Turns a learner profile into the directives and profile lines the
//! synthesis prompt needs. The style choice is a small decision table: rules
//! are checked in order and the first match wins, `Balanced` otherwise.

use serde::{Deserialize, Serialize};
use tutor_cascade_core::{format_score, UserProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStyle {
    Verbal,
    NonVerbal,
    Balanced,
}

impl ResponseStyle {
    /// Directive text placed under "Response Style Guidelines".
    pub fn directive(&self) -> &'static str {
        match self {
            ResponseStyle::Verbal => VERBAL_DIRECTIVE,
            ResponseStyle::NonVerbal => NON_VERBAL_DIRECTIVE,
            ResponseStyle::Balanced => BALANCED_DIRECTIVE,
        }
    }
}

const VERBAL_DIRECTIVE: &str = "Focus on providing detailed text explanations and story-based examples.
Break down concepts into clear, sequential steps.
Use analogies and metaphors to explain complex ideas.
Provide written examples and scenarios.";

const NON_VERBAL_DIRECTIVE: &str = "Focus on interactive scaffolding and visual descriptions.
Use step-by-step guidance with clear checkpoints.
Incorporate spatial and pattern-based explanations.
Break complex tasks into smaller, manageable parts.";

const BALANCED_DIRECTIVE: &str = "Provide a balanced approach with both verbal and visual explanations.
Use concise explanations with supporting examples.
Combine text-based and pattern-based learning strategies.";

const ENCOURAGEMENT_CLAUSE: &str = "Provide additional encouragement and positive reinforcement.";
const DIRECT_CLAUSE: &str = "Maintain supportive but direct communication.";

type StyleRule = (fn(&UserProfile) -> bool, ResponseStyle);

fn prefers_verbal(p: &UserProfile) -> bool {
    p.verbal_score > p.non_verbal_score
}

fn prefers_non_verbal(p: &UserProfile) -> bool {
    p.non_verbal_score > p.verbal_score
}

const STYLE_RULES: &[StyleRule] = &[
    (prefers_verbal, ResponseStyle::Verbal),
    (prefers_non_verbal, ResponseStyle::NonVerbal),
];

/// Pick the response style for a profile.
pub fn select_style(profile: &UserProfile) -> ResponseStyle {
    STYLE_RULES
        .iter()
        .find(|(applies, _)| applies(profile))
        .map(|(_, style)| *style)
        .unwrap_or(ResponseStyle::Balanced)
}

/// Confidence text: the self-assessment band, then the encouragement or
/// direct-communication clause on the next line.
pub fn confidence_guidance(profile: &UserProfile) -> String {
    let clause = if profile.needs_encouragement() {
        ENCOURAGEMENT_CLAUSE
    } else {
        DIRECT_CLAUSE
    };
    format!(
        "The user's self-assessment score is {}/10, indicating {} confidence in non-verbal skills.\n{}",
        format_score(profile.self_assessment),
        profile.confidence_band(),
        clause
    )
}

/// Everything profile-dependent in the synthesis prompt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleGuidance {
    pub style: Option<ResponseStyle>,
    pub response_style: String,
    pub confidence_guidance: String,
    pub age_line: String,
    pub verbal_line: String,
    pub non_verbal_line: String,
    pub self_assessment_line: String,
}

impl StyleGuidance {
    /// Derive guidance; without a profile every directive is empty and the
    /// age is reported as unknown.
    pub fn derive(profile: Option<&UserProfile>) -> Self {
        let Some(p) = profile else {
            return Self {
                age_line: "Age: Unknown".to_string(),
                ..Self::default()
            };
        };

        let style = select_style(p);
        Self {
            style: Some(style),
            response_style: style.directive().to_string(),
            confidence_guidance: confidence_guidance(p),
            age_line: format!("Age: {}", p.age),
            verbal_line: format!("Verbal Score: {}/2", format_score(p.verbal_score)),
            non_verbal_line: format!("Non-verbal Score: {}/2", format_score(p.non_verbal_score)),
            self_assessment_line: format!(
                "Self-assessment Score: {}/10",
                format_score(p.self_assessment)
            ),
        }
    }

    /// Synthesis slot values, minus `user_query` and `final_analysis`.
    pub fn slots(&self) -> [(&'static str, &str); 6] {
        [
            ("age_line", self.age_line.as_str()),
            ("verbal_line", self.verbal_line.as_str()),
            ("non_verbal_line", self.non_verbal_line.as_str()),
            ("self_assessment_line", self.self_assessment_line.as_str()),
            ("response_style", self.response_style.as_str()),
            ("confidence_guidance", self.confidence_guidance.as_str()),
        ]
    }
}
