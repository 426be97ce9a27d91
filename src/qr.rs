use pool_structures::Ticket;
use qrcode::render::{svg, unicode};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};

pub const ERROR_CORRECTION: EcLevel = EcLevel::H;
/// Side of the exported image, in pixels
pub const PASS_SIZE: u32 = 200;

fn encode(ticket: &Ticket) -> Result<QrCode, QrError> {
    if ticket.is_ambiguous() {
        log::warn!(
            "ticket payload of rider {} in pool {} holds a delimiter: {}",
            ticket.index,
            ticket.pool.id,
            ticket.payload()
        );
    }
    QrCode::with_error_correction_level(ticket.payload().as_bytes(), ERROR_CORRECTION)
}

/// The pass drawn with half-block characters, two modules per line
pub fn to_terminal(ticket: &Ticket) -> Result<String, QrError> {
    let code = encode(ticket)?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .quiet_zone(true)
        .build())
}

fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let start = tag.find(&format!(" {name}=\""))? + name.len() + 3;
    tag[start..].split('"').next()
}

/// Pins the outer `<svg>` to `PASS_SIZE` pixels, scaling the modules through the viewBox
fn fixed_size(svg: String) -> String {
    let Some(start) = svg.find("<svg") else {
        return svg;
    };
    let end = svg[start..].find('>').map_or(svg.len(), |e| start + e);
    let tag = &svg[start..end];
    let (Some(width), Some(height)) = (attribute(tag, "width"), attribute(tag, "height")) else {
        return svg;
    };

    let mut sized = tag
        .replacen(&format!(" width=\"{width}\""), &format!(" width=\"{PASS_SIZE}\""), 1)
        .replacen(&format!(" height=\"{height}\""), &format!(" height=\"{PASS_SIZE}\""), 1);
    if attribute(tag, "viewBox").is_none() {
        sized.push_str(&format!(" viewBox=\"0 0 {width} {height}\""));
    }
    format!("{}{}{}", &svg[..start], sized, &svg[end..])
}

/// The pass as a standalone SVG document of `PASS_SIZE` × `PASS_SIZE` pixels
pub fn to_svg(ticket: &Ticket) -> Result<String, QrError> {
    let code = encode(ticket)?;
    let svg = code
        .render::<svg::Color>()
        .module_dimensions(1, 1)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();
    Ok(fixed_size(svg))
}
