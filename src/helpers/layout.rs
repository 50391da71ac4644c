use crate::helpers::week::DayCategory;
use crate::models::report::{DailyReport, WeeklyReport};

/// One millimeter in PDF user-space points.
pub const MM: f64 = 72.0 / 25.4;

const A4_WIDTH: f64 = 210.0 * MM;
const A4_HEIGHT: f64 = 297.0 * MM;

/// Absence credit as the sheet has always printed it.
const ABSENCE_CREDIT_TEXT: &str = "8,0 Std.";
const EMPTY_DAY_DASH: &str = "–";
const OVERTIME_BASIS_NOTE: &str = "(Basis 40,0 Std./Woche)";

fn fmt_hours(hours: f64) -> String {
    format!("{hours:.1} Std.")
}

fn fmt_signed_hours(hours: f64) -> String {
    format!("{hours:+.1} Std.")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A single draw directive. The list is emitted strictly top-to-bottom as
/// the content appears on the page; regression tests compare it verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutInstruction {
    Text {
        text: String,
        x: f64,
        y: f64,
        size: f64,
        weight: FontWeight,
        align: Align,
    },
    Rule {
        x1: f64,
        x2: f64,
        y: f64,
        width: f64,
    },
}

impl LayoutInstruction {
    /// Vertical anchor, for ordering checks.
    pub fn y(&self) -> f64 {
        match self {
            LayoutInstruction::Text { y, .. } | LayoutInstruction::Rule { y, .. } => *y,
        }
    }
}

/// Immutable page geometry of one sheet kind. All placement decisions read
/// from this value; there are no module-level layout globals.
#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub title: &'static str,
    pub footer_left: &'static str,
    pub footer_right: &'static str,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    /// Left offset of the content block relative to the left margin.
    pub block_shift_x: f64,
    /// Extra downward shift of the first content row.
    pub block_shift_y: f64,
    /// Vertical distance between consecutive rows.
    pub row_step: f64,
    /// Right-aligned number column, measured left from the right margin.
    pub value_column: f64,
    /// Annotation column and short-rule end, measured left from the right margin.
    pub note_column: f64,
    pub rule_width: f64,
    pub size_header: f64,
    pub size_week_label: f64,
    pub size_text: f64,
    pub size_value: f64,
    pub size_section: f64,
    pub size_footer: f64,
}

impl PageGeometry {
    /// Geometry of the daily sheet ("Tagesblatt").
    pub fn daily() -> Self {
        Self {
            title: "Arbeitstagebuch",
            footer_left: "Seite 1",
            footer_right: "(c)2025 – Arbeitstagebuch_UM",
            margin_left: 20.0 * MM,
            margin_right: 20.0 * MM,
            margin_top: 18.0 * MM,
            margin_bottom: 18.0 * MM,
            block_shift_x: 20.0 * MM,
            block_shift_y: 3.0 * MM,
            row_step: 6.0 * MM,
            value_column: 40.0 * MM,
            note_column: 15.0 * MM,
            rule_width: 0.5,
            size_header: 13.0,
            size_week_label: 11.0,
            size_text: 10.0,
            size_value: 11.5,
            size_section: 11.5,
            size_footer: 9.0,
        }
    }

    /// Geometry of the weekly summary ("Wochenübersicht").
    pub fn weekly() -> Self {
        Self {
            title: "Wochenübersicht",
            footer_left: "Seite 1",
            footer_right: "(c)2025 – Arbeitstagebuch_UM",
            margin_left: 20.0 * MM,
            margin_right: 20.0 * MM,
            margin_top: 18.0 * MM,
            margin_bottom: 18.0 * MM,
            block_shift_x: 20.0 * MM,
            block_shift_y: 0.0,
            row_step: 8.0 * MM,
            value_column: 60.0 * MM,
            note_column: 15.0 * MM,
            rule_width: 0.5,
            size_header: 13.0,
            size_week_label: 11.0,
            size_text: 10.5,
            size_value: 10.5,
            size_section: 10.5,
            size_footer: 9.0,
        }
    }

    pub fn page_width(&self) -> f64 {
        A4_WIDTH
    }

    pub fn page_height(&self) -> f64 {
        A4_HEIGHT
    }

    pub fn header_y(&self) -> f64 {
        A4_HEIGHT - self.margin_top
    }

    pub fn right_edge(&self) -> f64 {
        A4_WIDTH - self.margin_right
    }

    /// Left edge of the content block.
    pub fn block_x(&self) -> f64 {
        self.margin_left + self.block_shift_x
    }

    /// Anchor of the right-aligned number column.
    pub fn value_x(&self) -> f64 {
        self.right_edge() - self.value_column
    }

    /// Anchor of the annotation column and end of the short rules.
    pub fn note_x(&self) -> f64 {
        self.right_edge() - self.note_column
    }
}

/// Instruction-list builder with a single vertical cursor. Pure placement
/// arithmetic over an already-validated report; it cannot fail.
struct SheetBuilder<'a> {
    geometry: &'a PageGeometry,
    instructions: Vec<LayoutInstruction>,
    y: f64,
}

impl<'a> SheetBuilder<'a> {
    /// Emit the header (title, week label, rule) and park the cursor at the
    /// first content row.
    fn new(geometry: &'a PageGeometry, week_label: &str) -> Self {
        let mut builder = Self {
            geometry,
            instructions: Vec::new(),
            y: 0.0,
        };

        let header_y = geometry.header_y();
        builder.text(
            geometry.title,
            geometry.margin_left,
            header_y,
            geometry.size_header,
            FontWeight::Bold,
            Align::Left,
        );
        builder.text(
            week_label,
            geometry.right_edge(),
            header_y,
            geometry.size_week_label,
            FontWeight::Regular,
            Align::Right,
        );
        builder.rule(geometry.margin_left, geometry.right_edge(), header_y - 3.0 * MM);

        builder.y = header_y - 15.0 * MM - geometry.block_shift_y;
        builder
    }

    fn text(
        &mut self,
        text: impl Into<String>,
        x: f64,
        y: f64,
        size: f64,
        weight: FontWeight,
        align: Align,
    ) {
        self.instructions.push(LayoutInstruction::Text {
            text: text.into(),
            x,
            y,
            size,
            weight,
            align,
        });
    }

    fn rule(&mut self, x1: f64, x2: f64, y: f64) {
        self.instructions.push(LayoutInstruction::Rule {
            x1,
            x2,
            y,
            width: self.geometry.rule_width,
        });
    }

    /// Row label at the block edge, current cursor row.
    fn label(&mut self, text: impl Into<String>) {
        self.text(
            text,
            self.geometry.block_x(),
            self.y,
            self.geometry.size_text,
            FontWeight::Regular,
            Align::Left,
        );
    }

    /// Right-aligned value in the number column, current cursor row.
    fn value(&mut self, text: impl Into<String>, weight: FontWeight) {
        self.text(
            text,
            self.geometry.value_x(),
            self.y,
            self.geometry.size_value,
            weight,
            Align::Right,
        );
    }

    /// Right-aligned annotation in the note column, current cursor row.
    fn note(&mut self, text: impl Into<String>) {
        self.text(
            text,
            self.geometry.note_x(),
            self.y,
            self.geometry.size_text,
            FontWeight::Regular,
            Align::Right,
        );
    }

    fn advance(&mut self) {
        self.y -= self.geometry.row_step;
    }

    /// Emit the footer and hand out the finished list.
    fn finish(mut self) -> Vec<LayoutInstruction> {
        let geometry = self.geometry;
        self.text(
            geometry.footer_left,
            geometry.margin_left,
            geometry.margin_bottom,
            geometry.size_footer,
            FontWeight::Regular,
            Align::Left,
        );
        self.text(
            geometry.footer_right,
            geometry.right_edge(),
            geometry.margin_bottom,
            geometry.size_footer,
            FontWeight::Regular,
            Align::Right,
        );
        self.instructions
    }
}

/// Place the daily sheet.
pub fn layout_daily(report: &DailyReport, geometry: &PageGeometry) -> Vec<LayoutInstruction> {
    let mut sheet = SheetBuilder::new(geometry, &report.week_label);

    let rows: [(&str, String, FontWeight); 6] = [
        ("Datum:", report.header_date(), FontWeight::Regular),
        ("Start:", report.start.to_string(), FontWeight::Regular),
        ("Stopp:", report.stop.to_string(), FontWeight::Regular),
        (
            "Arbeitszeit:",
            fmt_hours(report.worked_hours()),
            FontWeight::Bold,
        ),
        (
            "Überstunden:",
            fmt_signed_hours(report.overtime_hours()),
            FontWeight::Bold,
        ),
        (
            "Gesamtzeit:",
            fmt_hours(report.total_hours()),
            FontWeight::Bold,
        ),
    ];
    for (label, value, weight) in rows {
        sheet.label(label);
        sheet.value(value, weight);
        sheet.advance();
    }

    sheet.y -= 2.0 * MM;
    sheet.rule(geometry.margin_left, geometry.right_edge(), sheet.y);

    sheet.y -= 8.0 * MM;
    sheet.text(
        "Tätigkeiten:",
        geometry.block_x(),
        sheet.y,
        geometry.size_section,
        FontWeight::Bold,
        Align::Left,
    );

    sheet.y -= 7.0 * MM;
    for activity in &report.activities {
        sheet.text(
            format!("• {activity}"),
            geometry.block_x(),
            sheet.y,
            geometry.size_text,
            FontWeight::Regular,
            Align::Left,
        );
        sheet.y -= 6.0 * MM;
    }

    sheet.finish()
}

/// Place the weekly summary.
pub fn layout_weekly(report: &WeeklyReport, geometry: &PageGeometry) -> Vec<LayoutInstruction> {
    let mut sheet = SheetBuilder::new(geometry, &report.week_label);

    for day in &report.days {
        sheet.label(format!("{}:", day.label.short_name()));
        match day.category {
            DayCategory::Vacation
            | DayCategory::Sick
            | DayCategory::Holiday
            | DayCategory::HolidayWorked(_) => {
                sheet.value(ABSENCE_CREDIT_TEXT, FontWeight::Bold);
                // Annotation only names the absence; worked holiday hours
                // surface in the summary block below.
                if let Some(annotation) = day.category.annotation() {
                    sheet.note(annotation);
                }
            }
            DayCategory::WeekdayWorked(hours) | DayCategory::WeekendWorked(hours) => {
                sheet.value(fmt_hours(hours), FontWeight::Bold);
            }
            DayCategory::Empty => {
                sheet.value(EMPTY_DAY_DASH, FontWeight::Regular);
            }
        }
        sheet.advance();
    }

    // Divider between the day rows and the summary block.
    sheet.rule(geometry.block_x(), geometry.note_x(), sheet.y + 4.0 * MM);

    let totals = &report.totals;

    sheet.y -= 3.0 * MM;
    sheet.label("Gesamt (Mo–Fr):");
    sheet.value(fmt_hours(totals.weekday_total), FontWeight::Bold);

    sheet.advance();
    sheet.label("Überstunden (Mo–Fr):");
    sheet.value(fmt_signed_hours(totals.overtime), FontWeight::Bold);
    sheet.note(OVERTIME_BASIS_NOTE);

    if totals.weekend_saturday > 0.0 {
        sheet.advance();
        sheet.label("Samstagsarbeit:");
        sheet.value(fmt_hours(totals.weekend_saturday), FontWeight::Bold);
    }
    if totals.weekend_sunday > 0.0 {
        sheet.advance();
        sheet.label("Sonntagsarbeit:");
        sheet.value(fmt_hours(totals.weekend_sunday), FontWeight::Bold);
    }
    if !totals.holidays_worked.is_empty() {
        let days: Vec<&str> = totals
            .holidays_worked
            .iter()
            .map(|(label, _)| label.short_name())
            .collect();
        sheet.advance();
        sheet.label(format!("Feiertagsarbeit ({}):", days.join("+")));
        sheet.value(fmt_hours(totals.holiday_worked_sum), FontWeight::Bold);
    }

    sheet.advance();
    sheet.label("Gesamt (Mo–So):");
    sheet.value(fmt_hours(totals.grand_total), FontWeight::Bold);

    sheet.rule(geometry.block_x(), geometry.note_x(), sheet.y - 8.0 * MM);
    sheet.text(
        format!("Erstellt am: {}", report.created.format("%d.%m.%Y")),
        geometry.note_x(),
        sheet.y - 12.0 * MM,
        geometry.size_text,
        FontWeight::Regular,
        Align::Right,
    );

    sheet.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::models::report::{DailyReport, WeeklyReport};
    use crate::models::request::{DailyRequest, WeekDayItem, WeeklyRequest};

    fn daily_report() -> DailyReport {
        DailyReport::try_from(DailyRequest {
            datum: NaiveDate::from_ymd_opt(2025, 8, 30).unwrap(),
            start: "08:00 Uhr".to_string(),
            stop: "17:30 Uhr".to_string(),
            pause: 0.5,
            taetigkeiten: vec![
                "Montageübersicht Kran 1".to_string(),
                "Montageübersicht Kran 2".to_string(),
            ],
            kw_label: Some("KW 35 – 2025".to_string()),
        })
        .unwrap()
    }

    fn weekly_report(week_data: Vec<WeekDayItem>) -> WeeklyReport {
        WeeklyReport::try_from(WeeklyRequest {
            kw_label: Some("KW 38 – 2025".to_string()),
            week_data,
            created_date: NaiveDate::from_ymd_opt(2025, 9, 19),
        })
        .unwrap()
    }

    fn item(day: &str, hours: Option<f64>, special: Option<&str>) -> WeekDayItem {
        WeekDayItem {
            day: serde_json::from_value(serde_json::Value::String(day.to_string())).unwrap(),
            hours,
            special: special.map(str::to_string),
        }
    }

    fn mixed_week() -> Vec<WeekDayItem> {
        vec![
            item("Mo", None, Some("Urlaub")),
            item("Di", None, Some("Krank")),
            item("Mi", Some(8.0), Some("Feiertag")),
            item("Do", Some(8.0), Some("Feiertag")),
            item("Fr", Some(9.0), None),
            item("Sa", Some(4.0), None),
            item("So", Some(0.0), None),
        ]
    }

    fn texts(instructions: &[LayoutInstruction]) -> Vec<&str> {
        instructions
            .iter()
            .filter_map(|instruction| match instruction {
                LayoutInstruction::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn find_text<'a>(
        instructions: &'a [LayoutInstruction],
        needle: &str,
    ) -> &'a LayoutInstruction {
        instructions
            .iter()
            .find(|instruction| {
                matches!(instruction, LayoutInstruction::Text { text, .. } if text.as_str() == needle)
            })
            .unwrap_or_else(|| panic!("no instruction with text '{needle}'"))
    }

    #[test]
    fn daily_sheet_lists_all_rows_in_page_order() {
        let instructions = layout_daily(&daily_report(), &PageGeometry::daily());
        let texts = texts(&instructions);

        assert_eq!(texts[0], "Arbeitstagebuch");
        assert_eq!(texts[1], "KW 35 – 2025");
        let expected = [
            "Datum:",
            "Samstag, 30.08.2025",
            "Start:",
            "08:00 Uhr",
            "Stopp:",
            "17:30 Uhr",
            "Arbeitszeit:",
            "9.0 Std.",
            "Überstunden:",
            "+1.0 Std.",
            "Gesamtzeit:",
            "9.5 Std.",
            "Tätigkeiten:",
            "• Montageübersicht Kran 1",
            "• Montageübersicht Kran 2",
        ];
        assert_eq!(&texts[2..2 + expected.len()], &expected);
        assert_eq!(texts.last().unwrap(), &"(c)2025 – Arbeitstagebuch_UM");
    }

    #[test]
    fn daily_values_share_one_right_aligned_column() {
        let geometry = PageGeometry::daily();
        let instructions = layout_daily(&daily_report(), &geometry);

        for needle in ["08:00 Uhr", "17:30 Uhr", "9.0 Std.", "+1.0 Std.", "9.5 Std."] {
            match find_text(&instructions, needle) {
                LayoutInstruction::Text { x, align, .. } => {
                    assert_eq!(*x, geometry.value_x());
                    assert_eq!(*align, Align::Right);
                }
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn daily_rows_step_down_by_the_fixed_row_height() {
        let geometry = PageGeometry::daily();
        let instructions = layout_daily(&daily_report(), &geometry);

        let datum = find_text(&instructions, "Datum:").y();
        let start = find_text(&instructions, "Start:").y();
        let stopp = find_text(&instructions, "Stopp:").y();

        assert!((datum - start - geometry.row_step).abs() < 1e-9);
        assert!((start - stopp - geometry.row_step).abs() < 1e-9);
    }

    #[test]
    fn instructions_are_emitted_top_to_bottom() {
        let daily = layout_daily(&daily_report(), &PageGeometry::daily());
        let weekly = layout_weekly(&weekly_report(mixed_week()), &PageGeometry::weekly());

        for instructions in [daily, weekly] {
            for pair in instructions.windows(2) {
                assert!(
                    pair[0].y() >= pair[1].y() - 1e-9,
                    "instruction out of page order: {:?} then {:?}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn weekly_sheet_renders_mixed_week() {
        let instructions = layout_weekly(&weekly_report(mixed_week()), &PageGeometry::weekly());
        let texts = texts(&instructions);

        assert!(texts.contains(&"Mo:"));
        assert!(texts.contains(&"(Urlaub)"));
        assert!(texts.contains(&"(Krank)"));
        assert!(texts.contains(&"(Feiertag)"));
        assert!(texts.contains(&"9.0 Std."));
        assert!(texts.contains(&"Gesamt (Mo–Fr):"));
        assert!(texts.contains(&"41.0 Std."));
        assert!(texts.contains(&"+1.0 Std."));
        assert!(texts.contains(&"(Basis 40,0 Std./Woche)"));
        assert!(texts.contains(&"Samstagsarbeit:"));
        assert!(texts.contains(&"4.0 Std."));
        // Sunday logged zero hours, so its summary row is skipped.
        assert!(!texts.contains(&"Sonntagsarbeit:"));
        assert!(texts.contains(&"Feiertagsarbeit (Mi+Do):"));
        assert!(texts.contains(&"16.0 Std."));
        assert!(texts.contains(&"Gesamt (Mo–So):"));
        assert!(texts.contains(&"45.0 Std."));
        assert!(texts.contains(&"Erstellt am: 19.09.2025"));
    }

    #[test]
    fn weekly_empty_week_renders_dashes_and_no_conditional_rows() {
        let instructions = layout_weekly(&weekly_report(Vec::new()), &PageGeometry::weekly());
        let texts = texts(&instructions);

        assert_eq!(texts.iter().filter(|text| **text == "–").count(), 7);
        assert!(texts.contains(&"0.0 Std."));
        assert!(texts.contains(&"-40.0 Std."));
        assert!(!texts.contains(&"Samstagsarbeit:"));
        assert!(!texts.contains(&"Sonntagsarbeit:"));
        assert!(!texts.iter().any(|text| text.starts_with("Feiertagsarbeit")));
    }

    #[test]
    fn weekly_closing_rule_and_stamp_keep_their_offsets() {
        let geometry = PageGeometry::weekly();

        for week_data in [mixed_week(), Vec::new()] {
            let instructions = layout_weekly(&weekly_report(week_data), &geometry);
            let grand_y = find_text(&instructions, "Gesamt (Mo–So):").y();

            let closing_rule = instructions
                .iter()
                .filter(|instruction| matches!(instruction, LayoutInstruction::Rule { .. }))
                .next_back()
                .unwrap();
            let stamp = find_text(&instructions, "Erstellt am: 19.09.2025");

            assert!((closing_rule.y() - (grand_y - 8.0 * MM)).abs() < 1e-9);
            assert!((stamp.y() - (grand_y - 12.0 * MM)).abs() < 1e-9);
        }
    }

    #[test]
    fn weekly_day_rows_step_down_by_eight_millimeters() {
        let geometry = PageGeometry::weekly();
        let instructions = layout_weekly(&weekly_report(mixed_week()), &geometry);

        let monday = find_text(&instructions, "Mo:").y();
        let sunday = find_text(&instructions, "So:").y();
        assert!((monday - sunday - 6.0 * geometry.row_step).abs() < 1e-9);
    }
}
