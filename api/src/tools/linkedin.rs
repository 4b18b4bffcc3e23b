use toolboard_core::error::RenderError;
use toolboard_core::registry::{Frame, Notice, ToolRenderer};

/// Entry view of the LinkedIn analysis tool.
pub struct LinkedinAnalysis;

impl ToolRenderer for LinkedinAnalysis {
    fn render(&self, frame: &mut Frame) -> Result<(), RenderError> {
        frame
            .heading("📊 LinkedIn Analysis")
            .paragraph(
                "Analyze a company's LinkedIn presence, extract its voice profile and \
                 review its content strategy.",
            )
            .bullets([
                "Company presence analysis",
                "Voice profile extraction",
                "Content strategy review",
                "AI-generated posts in your client's voice",
            ])
            .notice(Notice::info(
                "Connect a company page to start an analysis.",
            ));
        Ok(())
    }
}
