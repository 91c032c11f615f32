// Single-page PDF export of the resume content region.
// Layout is computed first as plain data, then drawn with printpdf.

pub mod metrics;

use std::fs;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, Mm, PdfDocument};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::resume::Resume;
pub use metrics::PageSpec;

pub const DEFAULT_FILE_NAME: &str = "resume.pdf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("Could not write PDF: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Heading,
    Strong,
    Body,
}

/// One line of text with its baseline measured from the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub style: LineStyle,
    pub baseline_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
    /// Lines that did not fit on the page and were dropped.
    pub cut: usize,
    /// Characters drawn as `?` because the builtin fonts cannot encode them.
    pub replaced: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub lines_written: usize,
    pub lines_cut: usize,
    pub chars_replaced: usize,
}

impl LineStyle {
    fn size_pt(self, spec: &PageSpec) -> f32 {
        match self {
            LineStyle::Heading => spec.heading_size_pt,
            LineStyle::Strong | LineStyle::Body => spec.body_size_pt,
        }
    }
}

/// Places the Education, Skills and Projects sections top-down on one page.
pub fn layout(resume: &Resume, spec: &PageSpec) -> PageLayout {
    let mut writer = LineWriter::new(spec);

    writer.heading("Education");
    for edu in &resume.education {
        let row = [&edu.degree, &edu.institution, &edu.year]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" - ");
        writer.paragraph(&row, LineStyle::Body);
    }

    writer.heading("Skills");
    writer.paragraph(&resume.skills.join(", "), LineStyle::Body);

    writer.heading("Projects");
    for project in &resume.projects {
        writer.paragraph(&project.title, LineStyle::Strong);
        writer.paragraph(&project.description, LineStyle::Body);
        writer.paragraph(&project.link, LineStyle::Body);
    }

    writer.finish()
}

struct LineWriter<'a> {
    spec: &'a PageSpec,
    /// Distance from the top edge to the top of the next line.
    cursor_mm: f32,
    layout: PageLayout,
}

impl<'a> LineWriter<'a> {
    fn new(spec: &'a PageSpec) -> Self {
        Self {
            spec,
            cursor_mm: spec.margin_mm,
            layout: PageLayout::default(),
        }
    }

    fn heading(&mut self, title: &str) {
        if !self.layout.lines.is_empty() || self.layout.cut > 0 {
            self.cursor_mm += self.spec.section_gap_mm;
        }
        self.push(title.to_string(), LineStyle::Heading);
    }

    fn paragraph(&mut self, text: &str, style: LineStyle) {
        let (text, replaced) = metrics::to_encodable(text);
        self.layout.replaced += replaced;
        let size = style.size_pt(self.spec);
        for line in metrics::wrap(&text, size, self.spec.text_width_mm()) {
            self.push(line, style);
        }
    }

    fn push(&mut self, text: String, style: LineStyle) {
        let height = self.spec.line_height_mm(style.size_pt(self.spec));
        let bottom_limit = self.spec.height_mm - self.spec.margin_mm;
        if self.layout.cut > 0 || self.cursor_mm + height > bottom_limit {
            self.layout.cut += 1;
            return;
        }
        // Baseline sits at roughly 80% of the line box.
        let baseline_from_top = self.cursor_mm + height * 0.8;
        self.layout.lines.push(PlacedLine {
            text,
            style,
            baseline_mm: self.spec.height_mm - baseline_from_top,
        });
        self.cursor_mm += height;
    }

    fn finish(self) -> PageLayout {
        self.layout
    }
}

/// Draws a computed layout onto a single PDF page.
pub fn render_pdf(page: &PageLayout, spec: &PageSpec) -> Result<Vec<u8>, ExportError> {
    let (doc, page_index, layer_index) =
        PdfDocument::new("Resume", Mm(spec.width_mm), Mm(spec.height_mm), "content");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(format!("{e:?}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ExportError::Pdf(format!("{e:?}")))?;
    let layer = doc.get_page(page_index).get_layer(layer_index);

    for line in &page.lines {
        let font = match line.style {
            LineStyle::Heading | LineStyle::Strong => &bold,
            LineStyle::Body => &regular,
        };
        layer.use_text(
            line.text.as_str(),
            line.style.size_pt(spec),
            Mm(spec.margin_mm),
            Mm(line.baseline_mm),
            font,
        );
    }

    doc.save_to_bytes().map_err(|e| ExportError::Pdf(format!("{e:?}")))
}

/// Lays out `resume`, renders it and writes the PDF to `path`.
pub fn export_resume(resume: &Resume, path: &Path) -> Result<ExportSummary, ExportError> {
    let spec = PageSpec::a4();
    let page = layout(resume, &spec);
    if page.cut > 0 {
        warn!(
            "Resume does not fit on one page; {} line(s) left out of the PDF",
            page.cut
        );
    }
    if page.replaced > 0 {
        warn!(
            "{} character(s) cannot be drawn with the PDF font and were replaced by '{}'",
            page.replaced,
            metrics::REPLACEMENT_CHAR
        );
    }

    let bytes = render_pdf(&page, &spec)?;
    fs::write(path, bytes)?;
    info!("Resume exported to {}", path.display());

    Ok(ExportSummary {
        path: path.to_path_buf(),
        lines_written: page.lines.len(),
        lines_cut: page.cut,
        chars_replaced: page.replaced,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Education, Project};

    fn resume() -> Resume {
        Resume {
            id: "r1".to_string(),
            education: vec![Education {
                degree: "BSc Computer Science".to_string(),
                institution: "MIT".to_string(),
                year: "2019".to_string(),
            }],
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            projects: vec![Project {
                title: "resumectl".to_string(),
                description: "Command line resume builder".to_string(),
                link: "https://example.com/resumectl".to_string(),
            }],
        }
    }

    fn texts(page: &PageLayout) -> Vec<&str> {
        page.lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_sections_appear_in_order() {
        let page = layout(&resume(), &PageSpec::a4());
        assert_eq!(
            texts(&page),
            vec![
                "Education",
                "BSc Computer Science - MIT - 2019",
                "Skills",
                "Rust, SQL",
                "Projects",
                "resumectl",
                "Command line resume builder",
                "https://example.com/resumectl",
            ]
        );
        assert_eq!(page.cut, 0);
    }

    #[test]
    fn test_baselines_descend_and_stay_inside_margins() {
        let spec = PageSpec::a4();
        let page = layout(&resume(), &spec);
        for pair in page.lines.windows(2) {
            assert!(pair[1].baseline_mm < pair[0].baseline_mm);
        }
        for line in &page.lines {
            assert!(line.baseline_mm > spec.margin_mm);
            assert!(line.baseline_mm < spec.height_mm - spec.margin_mm);
        }
    }

    #[test]
    fn test_empty_resume_still_has_headings() {
        let empty = Resume {
            id: "r1".to_string(),
            education: vec![],
            skills: vec![],
            projects: vec![],
        };
        let page = layout(&empty, &PageSpec::a4());
        assert_eq!(texts(&page), vec!["Education", "Skills", "Projects"]);
    }

    #[test]
    fn test_blank_education_fields_are_skipped_in_row() {
        let mut r = resume();
        r.education[0].year = String::new();
        let page = layout(&r, &PageSpec::a4());
        assert_eq!(page.lines[1].text, "BSc Computer Science - MIT");
    }

    #[test]
    fn test_overflow_is_cut_to_one_page() {
        let mut r = resume();
        r.skills.clear();
        r.projects = (0..80)
            .map(|i| Project {
                title: format!("Project {i}"),
                description: "Something worth mentioning".to_string(),
                link: String::new(),
            })
            .collect();
        let spec = PageSpec::a4();
        let page = layout(&r, &spec);

        assert!(page.cut > 0);
        let last = page.lines.last().unwrap();
        assert!(last.baseline_mm > spec.margin_mm);
        // 80 projects * 2 lines + 3 headings + 1 education row
        assert_eq!(page.lines.len() + page.cut, 164);
    }

    #[test]
    fn test_export_writes_readable_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);

        let summary = export_resume(&resume(), &path).unwrap();

        assert_eq!(summary.lines_written, 8);
        assert_eq!(summary.lines_cut, 0);
        assert_eq!(summary.chars_replaced, 0);
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        let text = pdf_extract::extract_text_from_mem(&bytes).unwrap();
        assert!(text.contains("Education"), "extracted: {text}");
        assert!(text.contains("resumectl"), "extracted: {text}");
    }

    #[test]
    fn test_non_latin_text_is_replaced_visibly() {
        let mut r = resume();
        r.education[0].institution = "Universidade de São Paulo".to_string();
        r.skills = vec!["Café".to_string(), "日本語".to_string()];
        let page = layout(&r, &PageSpec::a4());

        assert_eq!(page.replaced, 3);
        assert_eq!(page.lines[1].text, "BSc Computer Science - Universidade de São Paulo - 2019");
        assert_eq!(page.lines[3].text, "Café, ???");
    }

    #[test]
    fn test_export_reports_replaced_chars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_FILE_NAME);
        let mut r = resume();
        r.skills = vec!["Rust".to_string(), "日本語".to_string()];

        let summary = export_resume(&r, &path).unwrap();

        assert_eq!(summary.chars_replaced, 3);
        let text = pdf_extract::extract_text_from_mem(&std::fs::read(&path).unwrap()).unwrap();
        assert!(text.contains("Rust, ???"), "extracted: {text}");
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join(DEFAULT_FILE_NAME);
        assert!(matches!(
            export_resume(&resume(), &path),
            Err(ExportError::Io(_))
        ));
    }
}
