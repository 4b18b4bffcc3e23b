use std::sync::Arc;

use toolboard_core::navigation::ToolKey;
use toolboard_core::registry::{Registry, ToolRenderer};

pub mod keywords;
pub mod linkedin;

fn renderer_for(key: ToolKey) -> Arc<dyn ToolRenderer> {
    match key {
        ToolKey::Linkedin => Arc::new(linkedin::LinkedinAnalysis),
        ToolKey::Keywords => Arc::new(keywords::KeywordResearch),
    }
}

/// Register every bundled tool except the disabled ones, and report any
/// dashboard entry left without a renderer.
pub fn registry(disabled: &[ToolKey]) -> Registry {
    let mut registry = Registry::new();
    for key in ToolKey::ALL {
        if disabled.contains(&key) {
            continue;
        }
        registry.register(key, renderer_for(key));
    }

    for key in registry.missing() {
        tracing::warn!(
            tool = key.as_str(),
            "no renderer registered; the dashboard will show an error for this tool"
        );
    }

    registry
}
