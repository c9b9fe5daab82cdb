use crate::models::photo::{GalleryRecord, LookupRecord};
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};
use std::fmt::Display;

pub struct DisplayFormatter;

impl DisplayFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_header(&self, text: &str) -> String {
        format!("\n=== {} ===", text.bright_white().bold())
    }

    pub fn format_photo_found(&self, code: &str, record: &LookupRecord) -> String {
        let mut output = Vec::new();
        output.push(self.format_header(&format!("Photo {}", code)));
        match &record.download_url {
            Some(url) => output.push(format!("Download: {}", url.cyan())),
            None => output.push(format!("Download: {}", "unavailable".yellow())),
        }
        output.push("Type `download` to print the link again.".dimmed().to_string());
        output.join("\n")
    }

    pub fn format_not_found(&self, code: &str) -> String {
        if code.is_empty() {
            "Please enter a photo code.".yellow().to_string()
        } else {
            format!("No photo found for code {}.", code.bold()).red().to_string()
        }
    }

    pub fn format_error(&self, error: impl Display) -> String {
        format!("Error: {}", error).red().to_string()
    }

    pub fn format_download(&self, url: Option<&str>) -> String {
        match url {
            Some(url) => url.to_string(),
            None => "Photo URL not found. Please try searching again."
                .yellow()
                .to_string(),
        }
    }

    pub fn format_gallery_table(&self, records: &[GalleryRecord]) -> String {
        if records.is_empty() {
            return "No photos found.".dimmed().to_string();
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

        table.add_row(Row::new(
            ["Filename", "Image", "View / Download"]
                .iter()
                .map(|h| Cell::new(h).style_spec("b"))
                .collect(),
        ));

        for record in records {
            table.add_row(Row::new(vec![
                Cell::new(&record.filename),
                Cell::new(&record.image_url),
                Cell::new(record.view_url.as_deref().unwrap_or("-")),
            ]));
        }

        format!("{}\n{} photos", table, records.len())
    }

    /// Gallery cards as HTML, one `gallery-item` per record.
    pub fn format_gallery_html(&self, records: &[GalleryRecord]) -> String {
        if records.is_empty() {
            return r#"<p class="text-gray-500 text-center">No photos found.</p>"#.to_string();
        }

        records
            .iter()
            .map(|record| {
                let image = escape_html(&record.image_url);
                let filename = escape_html(&record.filename);
                let view = escape_html(record.view_url.as_deref().unwrap_or(&record.image_url));
                format!(
                    r#"<div class="gallery-item bg-white rounded-lg shadow-lg overflow-hidden hover:shadow-xl transition">
  <img src="{image}" alt="{filename}" class="w-full h-64 object-cover cursor-pointer" data-preview="{image}">
  <div class="p-4">
    <h3 class="font-semibold text-gray-800">{filename}</h3>
    <a href="{view}" target="_blank" class="inline-block mt-2 text-cyan-600 hover:text-cyan-800 font-medium">View / Download</a>
  </div>
</div>"#
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
