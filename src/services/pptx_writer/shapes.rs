//! Slide part generation: background, shapes and text boxes.

use std::fmt::Write as FmtWrite;

use super::parts::{escape_xml, GROUP_HEADER, NS_A, NS_P, NS_R, XML_DECLARATION};
use super::{emu, EMU_PER_INCH, EMU_PER_POINT};
use crate::errors::AppResult;
use crate::models::domain::{
    Align, Background, Fill, Gradient, ListStyle, PageDescriptor, PageElement, Rect, Shape,
    ShapeKind, TextBlock,
};

/// Shape id 1 belongs to the group; drawn shapes start after it.
const FIRST_SHAPE_ID: usize = 2;

/// Upper bound of the `roundRect` adjust value (a half-circle end).
const MAX_CORNER_ADJUST: f64 = 50_000.0;

pub(super) fn slide(page: &PageDescriptor) -> AppResult<String> {
    let mut xml = String::from(XML_DECLARATION);
    write!(
        xml,
        r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"><p:cSld>"#,
        NS_A, NS_R, NS_P
    )?;

    xml.push_str("<p:bg><p:bgPr>");
    match &page.background {
        Background::Solid { color } => solid_fill(&mut xml, color, None)?,
        Background::Gradient(gradient) => gradient_fill(&mut xml, gradient)?,
    }
    xml.push_str("<a:effectLst/></p:bgPr></p:bg>");

    xml.push_str("<p:spTree>");
    xml.push_str(GROUP_HEADER);
    for (offset, element) in page.elements.iter().enumerate() {
        let id = FIRST_SHAPE_ID + offset;
        match element {
            PageElement::Shape(shape) => shape_xml(&mut xml, id, shape)?,
            PageElement::Text(block) => text_xml(&mut xml, id, block)?,
        }
    }
    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>");
    Ok(xml)
}

fn alpha(transparency: Option<u8>) -> Option<u32> {
    transparency
        .filter(|t| *t > 0)
        .map(|t| (100 - u32::from(t.min(100))) * 1000)
}

fn color(xml: &mut String, value: &str, transparency: Option<u8>) -> AppResult<()> {
    match alpha(transparency) {
        Some(alpha) => write!(
            xml,
            r#"<a:srgbClr val="{}"><a:alpha val="{}"/></a:srgbClr>"#,
            value, alpha
        )?,
        None => write!(xml, r#"<a:srgbClr val="{}"/>"#, value)?,
    }
    Ok(())
}

fn solid_fill(xml: &mut String, value: &str, transparency: Option<u8>) -> AppResult<()> {
    xml.push_str("<a:solidFill>");
    color(xml, value, transparency)?;
    xml.push_str("</a:solidFill>");
    Ok(())
}

fn gradient_fill(xml: &mut String, gradient: &Gradient) -> AppResult<()> {
    write!(
        xml,
        concat!(
            r#"<a:gradFill rotWithShape="1"><a:gsLst>"#,
            r#"<a:gs pos="0"><a:srgbClr val="{}"/></a:gs>"#,
            r#"<a:gs pos="100000"><a:srgbClr val="{}"/></a:gs>"#,
            r#"</a:gsLst><a:lin ang="{}" scaled="0"/></a:gradFill>"#
        ),
        gradient.from,
        gradient.to,
        u32::from(gradient.angle) * 60_000
    )?;
    Ok(())
}

fn transform(xml: &mut String, frame: &Rect) -> AppResult<()> {
    write!(
        xml,
        r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        emu(frame.x),
        emu(frame.y),
        emu(frame.w),
        emu(frame.h)
    )?;
    Ok(())
}

/// `roundRect` adjust value for a corner radius given in points.
fn corner_adjust(frame: &Rect, radius_pt: f64) -> u32 {
    let short_side = frame.w.min(frame.h) * EMU_PER_INCH;
    if short_side <= 0.0 {
        return 0;
    }
    let adjust = radius_pt * EMU_PER_POINT / short_side * 100_000.0;
    adjust.clamp(0.0, MAX_CORNER_ADJUST).round() as u32
}

fn shape_xml(xml: &mut String, id: usize, shape: &Shape) -> AppResult<()> {
    let (name, preset) = match (shape.kind, shape.corner_radius) {
        (ShapeKind::Rectangle, Some(_)) => ("Rounded Rectangle", "roundRect"),
        (ShapeKind::Rectangle, None) => ("Rectangle", "rect"),
        (ShapeKind::Circle, _) => ("Oval", "ellipse"),
        (ShapeKind::Line, _) => ("Straight Connector", "line"),
    };

    xml.push_str("<p:sp><p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{}" name="{} {}"/>"#, id, name, id)?;
    xml.push_str("<p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr>");
    transform(xml, &shape.frame)?;

    write!(xml, r#"<a:prstGeom prst="{}">"#, preset)?;
    match shape.corner_radius {
        Some(radius) if shape.kind == ShapeKind::Rectangle => write!(
            xml,
            r#"<a:avLst><a:gd name="adj" fmla="val {}"/></a:avLst>"#,
            corner_adjust(&shape.frame, radius)
        )?,
        _ => xml.push_str("<a:avLst/>"),
    }
    xml.push_str("</a:prstGeom>");

    match &shape.fill {
        Some(Fill::Solid { color }) => solid_fill(xml, color, shape.transparency)?,
        Some(Fill::Gradient(gradient)) => gradient_fill(xml, gradient)?,
        None => xml.push_str("<a:noFill/>"),
    }

    match &shape.outline {
        Some(outline) => {
            write!(xml, r#"<a:ln w="{}">"#, (outline.width * EMU_PER_POINT).round() as i64)?;
            let stroke_transparency = match shape.kind {
                ShapeKind::Line => shape.transparency,
                _ => None,
            };
            solid_fill(xml, &outline.color, stroke_transparency)?;
            xml.push_str("</a:ln>");
        }
        None => xml.push_str("<a:ln><a:noFill/></a:ln>"),
    }

    xml.push_str("</p:spPr></p:sp>");
    Ok(())
}

fn text_xml(xml: &mut String, id: usize, block: &TextBlock) -> AppResult<()> {
    xml.push_str("<p:sp><p:nvSpPr>");
    write!(xml, r#"<p:cNvPr id="{}" name="TextBox {}"/>"#, id, id)?;
    xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>"#);
    transform(xml, &block.frame)?;
    xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#);

    write!(
        xml,
        r#"<p:txBody><a:bodyPr wrap="square" rtlCol="0" anchor="{}"><a:normAutofit/></a:bodyPr><a:lstStyle/>"#,
        if block.vertical_center { "ctr" } else { "t" }
    )?;

    if block.lines.is_empty() {
        xml.push_str(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
    }
    for line in &block.lines {
        paragraph(xml, block, line)?;
    }

    xml.push_str("</p:txBody></p:sp>");
    Ok(())
}

fn paragraph(xml: &mut String, block: &TextBlock, line: &str) -> AppResult<()> {
    let align = match block.align {
        Align::Left => "l",
        Align::Center => "ctr",
    };

    xml.push_str("<a:p>");
    match block.list {
        Some(style) => {
            write!(xml, r#"<a:pPr marL="342900" indent="-342900" algn="{}">"#, align)?;
            match style {
                ListStyle::Numbered => {
                    xml.push_str(r#"<a:buFont typeface="+mj-lt"/><a:buAutoNum type="arabicPeriod"/>"#)
                }
            }
            xml.push_str("</a:pPr>");
        }
        None => write!(xml, r#"<a:pPr algn="{}"/>"#, align)?,
    }

    write!(
        xml,
        r#"<a:r><a:rPr lang="en-US" sz="{}"{} dirty="0">"#,
        (block.font_size * 100.0).round() as u32,
        if block.bold { r#" b="1""# } else { "" }
    )?;
    solid_fill(xml, &block.color, block.transparency)?;
    write!(xml, r#"<a:latin typeface="{}"/>"#, escape_xml(&block.font_face))?;
    xml.push_str("</a:rPr>");
    write!(xml, "<a:t>{}</a:t></a:r></a:p>", escape_xml(line))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::PageVariant;

    fn page(elements: Vec<PageElement>) -> PageDescriptor {
        PageDescriptor {
            index: 0,
            variant: PageVariant::SingleColumn,
            background: Background::Gradient(Gradient::new("6366F1", "8B5CF6")),
            elements,
        }
    }

    #[test]
    fn test_gradient_background() {
        let xml = slide(&page(vec![])).unwrap();
        assert!(xml.contains(r#"<a:gs pos="0"><a:srgbClr val="6366F1"/></a:gs>"#));
        assert!(xml.contains(r#"<a:lin ang="2700000" scaled="0"/>"#));
    }

    #[test]
    fn test_shapes_keep_paint_order_and_ids() {
        let xml = slide(&page(vec![
            PageElement::Shape(Shape::rect(Rect::new(0.0, 0.0, 10.0, 1.4), "111111")),
            PageElement::Shape(Shape::circle(Rect::new(8.5, 0.2, 1.0, 1.0), "222222")),
            PageElement::Text(TextBlock::new(Rect::new(8.5, 0.2, 1.0, 1.0), "1", 14.0, "FFFFFF")),
        ]))
        .unwrap();

        let rect = xml.find(r#"name="Rectangle 2""#).unwrap();
        let oval = xml.find(r#"name="Oval 3""#).unwrap();
        let text = xml.find(r#"name="TextBox 4""#).unwrap();
        assert!(rect < oval && oval < text);
    }

    #[test]
    fn test_transparency_becomes_alpha() {
        let shape = Shape::rect(Rect::new(0.0, 0.0, 1.0, 1.0), "EC4899").with_transparency(20);
        let xml = slide(&page(vec![PageElement::Shape(shape)])).unwrap();
        assert!(xml.contains(r#"<a:srgbClr val="EC4899"><a:alpha val="80000"/></a:srgbClr>"#));
    }

    #[test]
    fn test_rounded_rectangle_adjust() {
        let frame = Rect::new(0.0, 0.0, 1.6, 1.6);
        assert_eq!(corner_adjust(&frame, 8.0), 6944);
        assert_eq!(corner_adjust(&Rect::new(0.0, 0.0, 0.1, 0.1), 8.0), 50_000);
        assert_eq!(corner_adjust(&Rect::new(0.0, 0.0, 1.0, 0.0), 8.0), 0);
    }

    #[test]
    fn test_numbered_text_block() {
        let block = TextBlock::paragraphs(
            Rect::new(0.9, 1.8, 8.5, 5.0),
            vec!["First".to_string(), "Second".to_string()],
            18.0,
            "1E293B",
        )
        .bold()
        .listed(ListStyle::Numbered);
        let xml = slide(&page(vec![PageElement::Text(block)])).unwrap();

        assert_eq!(xml.matches(r#"<a:buAutoNum type="arabicPeriod"/>"#).count(), 2);
        assert!(xml.contains(r#"sz="1800" b="1""#));
        assert!(xml.contains("<a:t>Second</a:t>"));
    }
}
