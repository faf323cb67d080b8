//! SVG export of individual shapes.
//!
//! Groups are in shape-local coordinates; the exporter positions them.

use crate::element::{Element, px};
use crate::layout::image_layout;
use pinmark_core::shapes::{Label, Pin, Shape, TextAlign};

/// Id of the clip path a cropped pin references.
pub fn clip_path_id(pin: &Pin) -> String {
    format!("crop-{}", pin.id())
}

/// Export a pin. A valid crop becomes a clip path sized to the pin, with
/// the scaled image translated behind it.
pub fn export_pin(pin: &Pin) -> Element {
    let layout = image_layout(pin);
    let image = Element::new("image")
        .attr("xlink:href", &pin.props.url)
        .attr("width", layout.width)
        .attr("height", layout.height);

    let Some(clip) = layout.clip else {
        return Element::new("g").child(image);
    };

    let points = [(0.0, 0.0), (clip.width, 0.0), (clip.width, clip.height), (0.0, clip.height)]
        .iter()
        .map(|(x, y)| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(" ");
    let id = clip_path_id(pin);

    Element::new("g")
        .child(
            Element::new("defs").child(
                Element::new("clipPath")
                    .attr("id", &id)
                    .child(Element::new("polygon").attr("points", points)),
            ),
        )
        .child(
            Element::new("g").attr("clip-path", format!("url(#{id})")).child(
                image.attr(
                    "transform",
                    format!("translate({}, {})", layout.offset.x, layout.offset.y),
                ),
            ),
        )
}

/// Spaces become non-breaking so renderers keep runs of them.
fn spaces_to_nbsp(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_whitespace() { '\u{a0}' } else { c })
        .collect()
}

/// Export a label as one `<tspan>` per line, centered vertically in its box.
pub fn export_label(label: &Label) -> Element {
    let props = &label.props;
    let line_height = label.line_height();
    let lines = label.lines();
    let text_height = lines.len() as f64 * line_height;

    let x = match props.align {
        TextAlign::Start => Label::PADDING,
        TextAlign::Middle => label.size.width / 2.0,
        TextAlign::End => label.size.width - Label::PADDING,
    };
    let offset_y = props.font_size / 2.0 + (label.size.height.ceil() - text_height) / 2.0;

    let mut text = Element::new("text")
        .attr("font-size", px(props.font_size))
        .attr("font-family", props.font_family.css_stack())
        .attr("font-style", "normal")
        .attr("font-weight", "normal")
        .attr("line-height", px(line_height))
        .attr("dominant-baseline", "mathematical")
        .attr("alignment-baseline", "mathematical")
        .attr("text-anchor", props.align.anchor())
        .attr("fill", props.color.to_css());

    for (i, line) in lines.iter().enumerate() {
        text = text.child(
            Element::new("tspan")
                .attr("alignment-baseline", "mathematical")
                .attr("x", px(x))
                .attr("y", px(i as f64 * line_height + offset_y))
                .text(spaces_to_nbsp(line)),
        );
    }

    Element::new("g").child(text)
}

pub fn export_shape(shape: &Shape) -> Element {
    match shape {
        Shape::Pin(pin) => export_pin(pin),
        Shape::Label(label) => export_label(label),
    }
}
