use toolboard_core::error::RenderError;
use toolboard_core::registry::{Frame, Notice, ToolRenderer};

pub struct KeywordResearch;

impl ToolRenderer for KeywordResearch {
    fn render(&self, frame: &mut Frame) -> Result<(), RenderError> {
        frame
            .heading("🔍 Keyword Research")
            .paragraph(
                "Discover high-value keywords, analyze competitors and spot content \
                 opportunities.",
            )
            .bullets([
                "Keyword discovery with volume and difficulty",
                "Competitor gap analysis",
                "Trend tracking",
            ])
            .notice(Notice::info("Enter a seed keyword to begin."));
        Ok(())
    }
}
