use colored::Colorize;

use crate::commands::Outline;

pub struct Render;

impl Render {
    pub fn new() -> Self {
        Self
    }

    fn build_prefix(&self, index: usize) -> String {
        let id_str = index.to_string();
        let padding = " ".repeat(4usize.saturating_sub(id_str.len()));
        format!("{}{}", padding, format!("{}.", index).dimmed())
    }

    fn display_title(&self, outline: &Outline) {
        let table = &outline.table;
        let summary = format!(
            "[{} titles / {} sections]",
            table.len(),
            table.section_count()
        );
        println!("\n {} {}", "Title table".underline(), summary.dimmed());
    }

    fn display_row(&self, outline: &Outline, index: usize) {
        let table = &outline.table;
        let label = table.label(index).unwrap_or_default();
        let offset = table.offset(index).unwrap_or_default();
        let section = table.section_of(index);

        // Titles past the first tile repeat an earlier section
        let label = if index < table.section_count() {
            label.to_string()
        } else {
            label.dimmed().to_string()
        };
        let focused = if index == 0 {
            "◆".magenta().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{} {} {:<24} {} {}",
            self.build_prefix(index),
            focused,
            label,
            format!("@{offset}").cyan(),
            format!("§{}", section + 1).dimmed()
        );
    }

    fn display_strip(&self, outline: &Outline) {
        let strip: Vec<String> = outline
            .slots
            .iter()
            .map(|slot| {
                if slot.style.weight >= 800 {
                    slot.label.bold().underline().to_string()
                } else if slot.style.opacity >= 0.4 {
                    slot.label.to_string()
                } else {
                    slot.label.dimmed().to_string()
                }
            })
            .collect();
        println!("\n {}  {}", "Carousel".underline(), strip.join("  "));
    }

    fn display_bounds(&self, outline: &Outline) {
        println!(
            "\n  {} {}  {} {}",
            "scroll min".dimmed(),
            outline.scroll_min,
            "scroll max".dimmed(),
            outline.scroll_max
        );
    }

    pub fn display_outline(&self, outline: &Outline) {
        self.display_title(outline);
        for index in 0..outline.table.len() {
            self.display_row(outline, index);
        }
        self.display_strip(outline);
        self.display_bounds(outline);
        println!();
    }
}

impl Default for Render {
    fn default() -> Self {
        Self::new()
    }
}
