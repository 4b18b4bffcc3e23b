use std::collections::HashMap;
use std::sync::Arc;

use crate::error::RenderError;
use crate::navigation::ToolKey;

/// One piece of content a tool draws into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Paragraph(String),
    Bullets(Vec<String>),
    Notice(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// The region of the page a tool renders into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    blocks: Vec<Block>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Heading(text.into()));
        self
    }

    pub fn paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.blocks.push(Block::Paragraph(text.into()));
        self
    }

    pub fn bullets<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocks
            .push(Block::Bullets(items.into_iter().map(Into::into).collect()));
        self
    }

    pub fn notice(&mut self, notice: Notice) -> &mut Self {
        self.blocks.push(Block::Notice(notice));
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// An independently owned tool view. Called with nothing but the frame to
/// draw into whenever its navigation key is active.
pub trait ToolRenderer: Send + Sync {
    fn render(&self, frame: &mut Frame) -> Result<(), RenderError>;
}

/// Maps navigation keys to the renderer that owns them.
#[derive(Clone, Default)]
pub struct Registry {
    renderers: HashMap<ToolKey, Arc<dyn ToolRenderer>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: ToolKey, renderer: Arc<dyn ToolRenderer>) -> &mut Self {
        self.renderers.insert(key, renderer);
        self
    }

    pub fn get(&self, key: ToolKey) -> Option<&dyn ToolRenderer> {
        self.renderers.get(&key).map(|r| r.as_ref())
    }

    pub fn contains(&self, key: ToolKey) -> bool {
        self.renderers.contains_key(&key)
    }

    /// Keys the dashboard offers but nothing renders. Checked at startup.
    pub fn missing(&self) -> Vec<ToolKey> {
        ToolKey::ALL
            .into_iter()
            .filter(|key| !self.contains(*key))
            .collect()
    }

    /// Run the renderer for `key` into a fresh frame.
    pub fn render(&self, key: ToolKey) -> Result<Frame, RenderError> {
        let renderer = self.get(key).ok_or(RenderError::Unavailable(key))?;
        let mut frame = Frame::new();
        renderer.render(&mut frame)?;
        Ok(frame)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&str> = self.renderers.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        f.debug_struct("Registry").field("renderers", &keys).finish()
    }
}
