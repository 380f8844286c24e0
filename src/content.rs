//! Document model for the scrolling side of the widget.
//!
//! Markup is line based: a line starting with `# ` opens a section heading,
//! blank lines separate paragraphs, and any other line is joined into the
//! paragraph being built. Text before the first heading is kept as a
//! preamble.

/// One block of document content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Section heading; its text is the default carousel label
    Heading(String),
    /// Body text
    Paragraph(String),
}

impl Block {
    pub fn text(&self) -> &str {
        match self {
            Block::Heading(t) => t,
            Block::Paragraph(t) => t,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading(_))
    }
}

/// Parsed document content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Parse line-based markup into blocks
    pub fn parse(markup: &str) -> Self {
        let mut blocks = Vec::new();
        let mut paragraph: Vec<&str> = Vec::new();

        fn flush(paragraph: &mut Vec<&str>, blocks: &mut Vec<Block>) {
            if !paragraph.is_empty() {
                blocks.push(Block::Paragraph(paragraph.join(" ")));
                paragraph.clear();
            }
        }

        for line in markup.lines() {
            let trimmed = line.trim();
            if let Some(title) = trimmed.strip_prefix("# ") {
                flush(&mut paragraph, &mut blocks);
                blocks.push(Block::Heading(title.trim().to_string()));
            } else if trimmed.is_empty() {
                flush(&mut paragraph, &mut blocks);
            } else {
                paragraph.push(trimmed);
            }
        }
        flush(&mut paragraph, &mut blocks);

        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Heading texts in document order
    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.blocks
            .iter()
            .filter(|b| b.is_heading())
            .map(Block::text)
    }

    pub fn heading_count(&self) -> usize {
        self.headings().count()
    }
}
