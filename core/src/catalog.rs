use crate::navigation::ToolKey;

/// Static dashboard entry for one tool.
#[derive(Debug, PartialEq, Eq)]
pub struct ToolCard {
    pub key: ToolKey,
    pub icon: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub call_to_action: &'static str,
}

pub const DASHBOARD_TITLE: &str = "SEO & Marketing Tools";
pub const DASHBOARD_SUBTITLE: &str = "Select a tool to get started with your analysis";
pub const DASHBOARD_TIP: &str = "Each tool includes advanced features, data export, and \
     AI-powered insights to accelerate your marketing workflows.";

/// Cards in the order the dashboard shows them.
pub static CATALOG: [ToolCard; 2] = [
    ToolCard {
        key: ToolKey::Linkedin,
        icon: "📊",
        label: "LinkedIn Analysis",
        description: "Analyze company LinkedIn presence, voice profiles, and content strategy. \
             Generate AI-powered posts in your client's unique voice.",
        features: &[
            "Company presence analysis",
            "Voice profile extraction",
            "Content strategy review",
            "AI-generated posts in your client's voice",
        ],
        call_to_action: "Click to start analyzing",
    },
    ToolCard {
        key: ToolKey::Keywords,
        icon: "🔍",
        label: "Keyword Research",
        description: "Discover high-value keywords, analyze competitors, track trends, and \
             identify content opportunities with advanced SEO metrics.",
        features: &[
            "High-value keyword discovery",
            "Competitor analysis",
            "Trend tracking",
            "Content opportunity scoring",
        ],
        call_to_action: "Click to start researching",
    },
];

pub fn card(key: ToolKey) -> &'static ToolCard {
    match key {
        ToolKey::Linkedin => &CATALOG[0],
        ToolKey::Keywords => &CATALOG[1],
    }
}
