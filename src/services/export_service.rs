use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};

use crate::error::Result;
use crate::models::submission::{Gender, Submission};

const COLUMNS: [(&str, f64); 9] = [
    ("id", 36.0),
    ("Ad Soyad", 24.0),
    ("Telefon", 16.0),
    ("Cinsiyet", 14.0),
    ("Pozisyon", 20.0),
    ("Tür", 16.0),
    ("Durum", 12.0),
    ("Not", 40.0),
    ("Tarih", 18.0),
];

pub struct ExportService;

impl ExportService {
    /// Every field is quoted and embedded quotes are doubled, so free-text
    /// columns survive Excel and spreadsheet imports unchanged.
    pub fn to_csv(rows: &[Submission]) -> String {
        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(
            COLUMNS
                .iter()
                .map(|(label, _)| Self::escape(label))
                .collect::<Vec<_>>()
                .join(","),
        );
        for submission in rows {
            lines.push(
                Self::row_cells(submission)
                    .iter()
                    .map(|cell| Self::escape(cell))
                    .collect::<Vec<_>>()
                    .join(","),
            );
        }
        lines.join("\n")
    }

    pub fn to_xlsx(rows: &[Submission]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Başvurular")?;

        let header_format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(0x0F172A))
            .set_border(FormatBorder::Thin);

        for (i, (label, width)) in COLUMNS.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
            worksheet.write_string_with_format(0, i as u16, *label, &header_format)?;
        }

        for (r, submission) in rows.iter().enumerate() {
            let row = (r + 1) as u32;
            for (col, cell) in Self::row_cells(submission).iter().enumerate() {
                worksheet.write_string(row, col as u16, cell)?;
            }
        }

        worksheet.set_freeze_panes(1, 0)?;
        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }

    fn row_cells(submission: &Submission) -> [String; 9] {
        [
            submission.id.clone(),
            submission.full_name.clone(),
            submission.phone.clone().unwrap_or_default(),
            Self::gender_label(submission.gender).to_string(),
            submission.position_applied.clone().unwrap_or_default(),
            Self::work_type_label(submission.employment_type.as_deref()),
            submission.status.as_str().to_string(),
            submission.message.clone(),
            submission.created_at.format("%d.%m.%Y %H:%M").to_string(),
        ]
    }

    fn escape(value: &str) -> String {
        format!("\"{}\"", value.replace('"', "\"\""))
    }

    pub fn gender_label(gender: Option<Gender>) -> &'static str {
        match gender {
            Some(g) => g.label(),
            None => "",
        }
    }

    /// Renders the comma-joined work-type codes as human labels.
    pub fn work_type_label(value: Option<&str>) -> String {
        let Some(raw) = value else {
            return String::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(|code| match code {
                "sabit" => "Sabit",
                "sezonluk" => "Sezonluk",
                "gunluk" => "Günlük",
                "parttime" => "Part-time",
                other => other,
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
