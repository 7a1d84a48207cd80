/// Placement of an image scaled to cover a container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub scaled_width: f32,
    pub scaled_height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Scales the image so it covers the whole container without distortion and
/// centers it on the overflowing axis. The overflow is hidden by the balloon mask.
///
/// Returns `None` when either size is zero or not finite, in which case the
/// caller skips scaling for that image.
pub fn cover_fit(container_width: f32, container_height: f32, natural_width: f32, natural_height: f32) -> Option<Fit> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if !(valid(container_width) && valid(container_height) && valid(natural_width) && valid(natural_height)) {
        return None;
    }

    let container_ratio = container_width / container_height;
    let image_ratio = natural_width / natural_height;

    if image_ratio > container_ratio {
        // Wider than the container: match heights, overflow left and right
        let scaled_width = container_height * image_ratio;
        Some(Fit {
            scaled_width,
            scaled_height: container_height,
            offset_x: (container_width - scaled_width) / 2.0,
            offset_y: 0.0,
        })
    } else {
        // Taller than the container: match widths, overflow top and bottom
        let scaled_height = container_width / image_ratio;
        Some(Fit {
            scaled_width: container_width,
            scaled_height,
            offset_x: 0.0,
            offset_y: (container_height - scaled_height) / 2.0,
        })
    }
}
