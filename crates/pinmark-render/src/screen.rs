//! Screen markup: absolutely positioned HTML containers per shape.

use crate::element::{Element, px, style};
use crate::layout::image_layout;
use pinmark_core::shapes::{Label, Pin, Shape};
use pinmark_core::text::normalize_text_for_dom;

/// Render a pin: a clipping container holding the (possibly cropped) image.
pub fn render_pin(pin: &Pin) -> Element {
    let layout = image_layout(pin);

    let mut image_style = vec![
        ("position", "absolute".to_string()),
        ("left", px(0.0)),
        ("top", px(0.0)),
        ("width", px(layout.width)),
        ("height", px(layout.height)),
        ("pointer-events", "all".to_string()),
    ];
    if layout.is_cropped() {
        image_style.push((
            "transform",
            format!("translate({}, {})", px(layout.offset.x), px(layout.offset.y)),
        ));
    }

    Element::new("div")
        .attr("id", pin.id())
        .attr("class", "pinmark-pin")
        .attr("style", style(&container_style(pin.position.x, pin.position.y, pin.size.width, pin.size.height)))
        .child(
            Element::new("img")
                .attr("src", &pin.props.url)
                .attr("alt", "pin")
                .attr("draggable", "false")
                .attr("style", style(&image_style)),
        )
}

/// Render a label. While editing, the text sits in a `textarea` the host
/// wires to an editable surface.
pub fn render_label(label: &Label, editing: bool) -> Element {
    let props = &label.props;
    let mut text_style = vec![
        ("font-size", px(props.font_size)),
        ("font-family", props.font_family.css_stack().to_string()),
        ("line-height", px(label.line_height())),
        ("color", props.color.to_css()),
        ("text-align", props.align.css().to_string()),
        ("padding", px(Label::PADDING)),
        ("white-space", "pre-wrap".to_string()),
        ("box-sizing", "border-box".to_string()),
        ("width", "100%".to_string()),
        ("height", "100%".to_string()),
    ];

    let body = if editing {
        text_style.push(("resize", "none".to_string()));
        text_style.push(("background", "transparent".to_string()));
        Element::new("textarea")
            .attr("class", "pinmark-label-input")
            .attr("autofocus", "true")
            .attr("spellcheck", "false")
            .attr("wrap", "off")
            .attr("style", style(&text_style))
            .text(props.text.as_str())
    } else {
        Element::new("div")
            .attr("class", "pinmark-label-text")
            .attr("style", style(&text_style))
            .text(normalize_text_for_dom(&props.text))
    };

    Element::new("div")
        .attr("id", label.id())
        .attr("class", "pinmark-label")
        .attr("data-editing", editing)
        .attr(
            "style",
            style(&container_style(
                label.position.x,
                label.position.y,
                label.size.width,
                label.size.height,
            )),
        )
        .child(body)
}

/// Render any shape; `editing` only affects labels.
pub fn render_shape(shape: &Shape, editing: bool) -> Element {
    match shape {
        Shape::Pin(pin) => render_pin(pin),
        Shape::Label(label) => render_label(label, editing),
    }
}

fn container_style(x: f64, y: f64, w: f64, h: f64) -> Vec<(&'static str, String)> {
    vec![
        ("position", "absolute".to_string()),
        ("left", px(x)),
        ("top", px(y)),
        ("width", px(w)),
        ("height", px(h)),
        ("overflow", "hidden".to_string()),
        ("pointer-events", "all".to_string()),
    ]
}
