//! PDF payslip rendering.
//!
//! Paints a [`PayslipLayout`] onto a single A4 page with `printpdf` and
//! writes it to `<output_dir>/<employee_id>.pdf`.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point,
};
use tracing::debug;

use crate::config::PayslipSettings;
use crate::error::{PayrollError, PayrollResult};
use crate::models::EmployeeRecord;

use super::DocumentRenderer;
use super::layout::{LayoutLine, PayslipLayout};

/// File extension of rendered payslips.
pub const PAYSLIP_EXTENSION: &str = "pdf";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const LINE_HEIGHT_MM: f32 = 10.0;
const LABEL_WIDTH_MM: f32 = 90.0;
const CELL_PADDING_MM: f32 = 2.0;
const TITLE_FONT_SIZE: f32 = 16.0;
const BODY_FONT_SIZE: f32 = 12.0;
const BORDER_THICKNESS: f32 = 0.5;

/// Points to millimetres.
const PT_TO_MM: f32 = 0.3528;

/// Average Helvetica Bold glyph width as a fraction of the font size.
const AVERAGE_GLYPH_WIDTH_EM: f32 = 0.58;

/// Renders payslips as single-page PDF documents.
///
/// # Example
///
/// ```no_run
/// use payslip_dispatch::config::PayslipSettings;
/// use payslip_dispatch::render::{DocumentRenderer, PdfRenderer};
/// # use payslip_dispatch::models::EmployeeRecord;
/// # fn record() -> EmployeeRecord { unimplemented!() }
///
/// let renderer = PdfRenderer::new(&PayslipSettings::default());
/// let path = renderer.render(&record())?;
/// println!("Payslip generated: {}", path.display());
/// # Ok::<(), payslip_dispatch::error::PayrollError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    output_dir: PathBuf,
    currency_symbol: String,
    organization: String,
}

impl PdfRenderer {
    /// Creates a renderer writing into the configured output directory.
    pub fn new(settings: &PayslipSettings) -> Self {
        Self {
            output_dir: settings.output_dir.clone(),
            currency_symbol: settings.currency_symbol.clone(),
            organization: settings.organization.clone(),
        }
    }

    /// Returns the path the payslip for `record` is written to.
    pub fn document_path(&self, record: &EmployeeRecord) -> PathBuf {
        self.output_dir.join(record.document_name(PAYSLIP_EXTENSION))
    }

    fn render_error(path: &Path, message: impl ToString) -> PayrollError {
        PayrollError::Render {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, record: &EmployeeRecord) -> PayrollResult<PathBuf> {
        let path = self.document_path(record);

        if !is_plain_file_name(&record.employee_id) {
            return Err(Self::render_error(
                &path,
                format!(
                    "employee identifier '{}' cannot be used as a file name",
                    record.employee_id
                ),
            ));
        }

        let layout = PayslipLayout::build(record, &self.currency_symbol, &self.organization)
            .map_err(|e| Self::render_error(&path, e))?;

        let unsupported = unencodable_chars(&layout);
        if !unsupported.is_empty() {
            let listed: Vec<String> = unsupported.iter().map(|c| format!("'{}'", c)).collect();
            return Err(Self::render_error(
                &path,
                format!(
                    "characters not supported by the PDF font: {}",
                    listed.join(", ")
                ),
            ));
        }

        fs::create_dir_all(&self.output_dir)
            .map_err(|e| Self::render_error(&self.output_dir, e))?;

        let document = paint(&layout).map_err(|e| Self::render_error(&path, e))?;

        let file = File::create(&path).map_err(|e| Self::render_error(&path, e))?;
        document
            .save(&mut BufWriter::new(file))
            .map_err(|e| Self::render_error(&path, e))?;

        debug!(employee_id = %record.employee_id, path = %path.display(), "Payslip written");
        Ok(path)
    }
}

/// Identifiers become file names verbatim, so they must not address
/// another directory.
fn is_plain_file_name(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier != "."
        && identifier != ".."
        && !identifier.contains(['/', '\\', '\0'])
}

/// Returns the distinct characters in `layout`, in order of first
/// appearance, that the built-in fonts cannot show.
fn unencodable_chars(layout: &PayslipLayout) -> Vec<char> {
    let mut found = Vec::new();
    for c in layout.texts().flat_map(str::chars) {
        if !is_win_ansi(c) && !found.contains(&c) {
            found.push(c);
        }
    }
    found
}

/// Built-in PDF fonts use WinAnsiEncoding (Windows-1252). Anything outside
/// it is dropped by the text encoder.
fn is_win_ansi(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{a0}'..='\u{ff}')
        || matches!(
            c,
            '€' | '‚' | 'ƒ' | '„' | '…' | '†' | '‡' | 'ˆ' | '‰' | 'Š' | '‹' | 'Œ' | 'Ž'
                | '‘' | '’' | '“' | '”' | '•' | '–' | '—' | '˜' | '™' | 'š' | '›' | 'œ'
                | 'ž' | 'Ÿ'
        )
}

/// Paints the layout onto a fresh single-page document.
fn paint(layout: &PayslipLayout) -> Result<PdfDocumentReference, String> {
    let title = layout.title().unwrap_or("Payslip");
    let (document, page, layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Payslip");

    let mut painter = Painter {
        layer: document.get_page(page).get_layer(layer),
        regular: builtin_font(&document, BuiltinFont::Helvetica)?,
        bold: builtin_font(&document, BuiltinFont::HelveticaBold)?,
        top: PAGE_HEIGHT_MM - MARGIN_MM,
    };
    painter.layer.set_outline_thickness(BORDER_THICKNESS);

    for line in &layout.lines {
        painter.draw(line);
    }

    Ok(document)
}

fn builtin_font(
    document: &PdfDocumentReference,
    font: BuiltinFont,
) -> Result<IndirectFontRef, String> {
    document
        .add_builtin_font(font)
        .map_err(|e| format!("cannot load font: {}", e))
}

/// Cursor over the page; `top` is the upper edge of the next line.
struct Painter {
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    top: f32,
}

impl Painter {
    fn draw(&mut self, line: &LayoutLine) {
        match line {
            LayoutLine::Title(text) => {
                let width = estimated_width_mm(text, TITLE_FONT_SIZE);
                let x = ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM);
                self.text(text, TITLE_FONT_SIZE, x, true);
                self.top -= LINE_HEIGHT_MM;
            }
            LayoutLine::Text(text) => {
                self.text(text, BODY_FONT_SIZE, MARGIN_MM + CELL_PADDING_MM, false);
                self.top -= LINE_HEIGHT_MM;
            }
            LayoutLine::Heading(text) => {
                self.text(text, BODY_FONT_SIZE, MARGIN_MM + CELL_PADDING_MM, true);
                self.top -= LINE_HEIGHT_MM;
            }
            LayoutLine::Gap(mm) => {
                self.top -= f32::from(*mm);
            }
            LayoutLine::Row {
                label,
                value,
                emphasis,
            } => {
                let value_x = MARGIN_MM + LABEL_WIDTH_MM;
                let right = PAGE_WIDTH_MM - MARGIN_MM;
                self.cell_border(MARGIN_MM, value_x);
                self.cell_border(value_x, right);
                self.text(label, BODY_FONT_SIZE, MARGIN_MM + CELL_PADDING_MM, *emphasis);
                self.text(value, BODY_FONT_SIZE, value_x + CELL_PADDING_MM, *emphasis);
                self.top -= LINE_HEIGHT_MM;
            }
        }
    }

    fn text(&self, text: &str, size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        let baseline = self.top - LINE_HEIGHT_MM / 2.0 - size * PT_TO_MM / 3.0;
        self.layer.use_text(text, size, Mm(x), Mm(baseline), font);
    }

    fn cell_border(&self, left: f32, right: f32) {
        let bottom = self.top - LINE_HEIGHT_MM;
        let corners = [
            (left, self.top),
            (right, self.top),
            (right, bottom),
            (left, bottom),
        ];
        self.layer.add_line(Line {
            points: corners
                .iter()
                .map(|&(x, y)| (Point::new(Mm(x), Mm(y)), false))
                .collect(),
            is_closed: true,
        });
    }
}

fn estimated_width_mm(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVERAGE_GLYPH_WIDTH_EM * PT_TO_MM
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_record(id: &str) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: id.to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            basic_salary: dec("1000"),
            allowances: dec("50.5"),
            deductions: dec("75"),
        }
    }

    fn create_renderer(output_dir: &Path) -> PdfRenderer {
        PdfRenderer::new(&PayslipSettings {
            output_dir: output_dir.to_path_buf(),
            ..PayslipSettings::default()
        })
    }

    #[test]
    fn test_render_writes_pdf_named_after_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = create_renderer(dir.path());

        let path = renderer.render(&create_test_record("E001")).unwrap();

        assert_eq!(path, dir.path().join("E001.pdf"));
        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("payslips");
        let renderer = create_renderer(&nested);

        let path = renderer.render(&create_test_record("E001")).unwrap();

        assert!(nested.is_dir());
        assert!(path.exists());
    }

    #[test]
    fn test_render_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = create_renderer(dir.path());
        let existing = dir.path().join("E001.pdf");
        fs::write(&existing, b"stale").unwrap();

        let path = renderer.render(&create_test_record("E001")).unwrap();

        assert_eq!(path, existing);
        assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_fails_when_output_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("payslips");
        fs::write(&blocker, b"not a directory").unwrap();
        let renderer = create_renderer(&blocker);

        let result = renderer.render(&create_test_record("E001"));

        assert!(matches!(result, Err(PayrollError::Render { .. })));
    }

    #[test]
    fn test_render_rejects_identifier_with_path_separator() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = create_renderer(dir.path());

        let result = renderer.render(&create_test_record("../E001"));

        match result {
            Err(PayrollError::Render { message, .. }) => {
                assert!(message.contains("../E001"));
            }
            other => panic!("Expected Render error, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_file_name_check() {
        assert!(is_plain_file_name("E001"));
        assert!(is_plain_file_name("emp 42"));
        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("a/b"));
        assert!(!is_plain_file_name("a\\b"));
    }

    #[test]
    fn test_render_rejects_characters_outside_font() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = create_renderer(dir.path());
        let mut record = create_test_record("E001");
        record.name = "Zoë 山田".to_string();

        let result = renderer.render(&record);

        match result {
            Err(PayrollError::Render { message, .. }) => {
                assert!(message.contains("'山', '田'"));
                assert!(!message.contains('ë'));
            }
            other => panic!("Expected Render error, got {:?}", other),
        }
        assert!(!dir.path().join("E001.pdf").exists());
    }

    #[test]
    fn test_render_accepts_western_european_text() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = PdfRenderer::new(&PayslipSettings {
            output_dir: dir.path().to_path_buf(),
            currency_symbol: "€".to_string(),
            ..PayslipSettings::default()
        });
        let mut record = create_test_record("E001");
        record.name = "Zoë Ångström-O’Neil".to_string();

        let path = renderer.render(&record).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_render_fails_for_overflowing_net_pay() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = create_renderer(dir.path());
        let mut record = create_test_record("E001");
        record.basic_salary = Decimal::MAX;

        match renderer.render(&record) {
            Err(PayrollError::Render { message, .. }) => {
                assert!(message.contains("out of range"));
            }
            other => panic!("Expected Render error, got {:?}", other),
        }
    }

    #[test]
    fn test_win_ansi_coverage() {
        assert!(is_win_ansi('A'));
        assert!(is_win_ansi('é'));
        assert!(is_win_ansi('€'));
        assert!(is_win_ansi('—'));
        assert!(!is_win_ansi('山'));
        assert!(!is_win_ansi('Ł'));
        assert!(!is_win_ansi('\n'));
    }

    #[test]
    fn test_title_estimate_fits_page() {
        let width = estimated_width_mm("Uncommon.org Payslip", TITLE_FONT_SIZE);
        assert!(width > 0.0 && width < PAGE_WIDTH_MM - 2.0 * MARGIN_MM);
    }
}
