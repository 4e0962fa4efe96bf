use eframe::egui::Color32;

const RAMP: [(u8, u8, u8); 11] = [
    (165, 0, 38),
    (215, 48, 39),
    (244, 109, 67),
    (253, 174, 97),
    (254, 224, 139),
    (255, 255, 191),
    (217, 239, 139),
    (166, 217, 106),
    (102, 189, 99),
    (26, 152, 80),
    (0, 104, 55),
];

pub(super) fn ramp_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0) * (RAMP.len() - 1) as f32;
    let low = t.floor() as usize;
    let high = (low + 1).min(RAMP.len() - 1);
    let fraction = t - low as f32;

    let (r0, g0, b0) = RAMP[low];
    let (r1, g1, b1) = RAMP[high];
    Color32::from_rgb(
        lerp_channel(r0, r1, fraction),
        lerp_channel(g0, g1, fraction),
        lerp_channel(b0, b1, fraction),
    )
}

pub(super) fn severity_color(severity: f32) -> Color32 {
    ramp_color(1.0 - (severity / 10.0).clamp(0.0, 1.0))
}

pub(super) fn wellbeing_color(wellbeing: f32) -> Color32 {
    ramp_color(wellbeing.clamp(0.0, 1.0))
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    ((a as f32) + ((b as f32 - a as f32) * t)).round().clamp(0.0, 255.0) as u8
}
