use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use crate::error::RenderError;
use crate::helpers::layout::{Align, FontWeight, LayoutInstruction, PageGeometry};

const FONT_REGULAR: &str = "Helv";
const FONT_BOLD: &str = "HelvB";

/// Helvetica advance widths in 1/1000 em, WinAnsi codes 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths, same code range.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Render an instruction list into a single-page PDF.
///
/// The layout stage decides what goes where; this boundary only turns the
/// directives into a content stream with the two Helvetica faces. Right
/// alignment is resolved here from the built-in advance widths.
pub fn render_document(
    instructions: &[LayoutInstruction],
    geometry: &PageGeometry,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let font_bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => font_regular_id,
            FONT_BOLD => font_bold_id,
        },
    });

    let content = build_content(instructions);
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            geometry.page_width().into(),
            geometry.page_height().into(),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

fn build_content(instructions: &[LayoutInstruction]) -> Content {
    let mut operations = Vec::new();

    for instruction in instructions {
        match instruction {
            LayoutInstruction::Text {
                text,
                x,
                y,
                size,
                weight,
                align,
            } => {
                let font = match weight {
                    FontWeight::Regular => FONT_REGULAR,
                    FontWeight::Bold => FONT_BOLD,
                };
                let anchor = match align {
                    Align::Left => *x,
                    Align::Right => *x - text_width(text, *weight, *size),
                };
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec![font.into(), (*size).into()]));
                operations.push(Operation::new("Td", vec![anchor.into(), (*y).into()]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(
                        encode_win_ansi(text),
                        StringFormat::Literal,
                    )],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            LayoutInstruction::Rule { x1, x2, y, width } => {
                operations.push(Operation::new("w", vec![(*width).into()]));
                operations.push(Operation::new("m", vec![(*x1).into(), (*y).into()]));
                operations.push(Operation::new("l", vec![(*x2).into(), (*y).into()]));
                operations.push(Operation::new("S", vec![]));
            }
        }
    }

    Content { operations }
}

/// Width of a string at the given size, from the built-in metrics.
fn text_width(text: &str, weight: FontWeight, size: f64) -> f64 {
    let units: u32 = text
        .chars()
        .map(|ch| u32::from(glyph_width(ch, weight)))
        .sum();
    f64::from(units) * size / 1000.0
}

fn glyph_width(ch: char, weight: FontWeight) -> u16 {
    let code = u32::from(ch);
    if (0x20..=0x7E).contains(&code) {
        let table = match weight {
            FontWeight::Regular => &HELVETICA_WIDTHS,
            FontWeight::Bold => &HELVETICA_BOLD_WIDTHS,
        };
        return table[(code - 0x20) as usize];
    }

    // Non-ASCII glyphs the sheets actually use.
    match (ch, weight) {
        ('ä' | 'ö' | 'ü', FontWeight::Regular) => 556,
        ('ä', FontWeight::Bold) => 556,
        ('ö' | 'ü', FontWeight::Bold) => 611,
        ('Ä', FontWeight::Regular) => 667,
        ('Ä', FontWeight::Bold) => 722,
        ('Ö', _) => 778,
        ('Ü', _) => 722,
        ('ß', _) => 611,
        ('\u{2013}', _) => 556,
        ('\u{2022}', _) => 350,
        _ => 556,
    }
}

fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(ch: char) -> u8 {
    let code = u32::from(ch);
    match ch {
        _ if code < 0x80 => code as u8,
        '\u{2013}' => 0x96,
        '\u{2022}' => 0x95,
        '\u{20AC}' => 0x80,
        _ if (0xA0..=0xFF).contains(&code) => code as u8,
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_pdf_document() {
        let geometry = PageGeometry::daily();
        let instructions = vec![
            LayoutInstruction::Text {
                text: "Arbeitstagebuch".to_string(),
                x: geometry.margin_left,
                y: geometry.header_y(),
                size: geometry.size_header,
                weight: FontWeight::Bold,
                align: Align::Left,
            },
            LayoutInstruction::Rule {
                x1: geometry.margin_left,
                x2: geometry.right_edge(),
                y: geometry.header_y() - 10.0,
                width: 0.5,
            },
        ];

        let bytes = render_document(&instructions, &geometry).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn encodes_sheet_glyphs_as_win_ansi() {
        assert_eq!(win_ansi_byte('ä'), 0xE4);
        assert_eq!(win_ansi_byte('Ü'), 0xDC);
        assert_eq!(win_ansi_byte('\u{2013}'), 0x96);
        assert_eq!(win_ansi_byte('\u{2022}'), 0x95);
        assert_eq!(win_ansi_byte('日'), b'?');
    }

    #[test]
    fn text_width_grows_with_content_and_size() {
        let narrow = text_width("8", FontWeight::Regular, 10.0);
        let wide = text_width("88", FontWeight::Regular, 10.0);
        let large = text_width("8", FontWeight::Regular, 20.0);

        assert!(wide > narrow);
        assert_eq!(large, narrow * 2.0);
        assert_eq!(narrow, 5.56);
    }

    #[test]
    fn bold_face_uses_its_own_metrics() {
        let regular = text_width("Gesamt", FontWeight::Regular, 10.5);
        let bold = text_width("Gesamt", FontWeight::Bold, 10.5);
        assert!(bold > regular);
    }
}
