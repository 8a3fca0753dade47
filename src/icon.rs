use crate::raster::{self, Bounds, Point, WHITE};
use anyhow::{bail, Context, Result};
use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;

/// Stroke width of the stand and its base, in pixels.
const STROKE_WIDTH: i32 = 2;

/// The two colour variants of the extension icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Idle. Purple background.
    Inactive,
    /// Listening. Green background.
    Active,
}

impl Variant {
    pub fn from_active(active: bool) -> Self {
        if active {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }

    pub fn color(self) -> Rgb<u8> {
        match self {
            Self::Inactive => Rgb([102, 126, 234]),
            Self::Active => Rgb([16, 185, 129]),
        }
    }

    /// Canonical file name, e.g. `icon48.png` or `icon-active48.png`.
    pub fn file_name(self, size: u32) -> String {
        match self {
            Self::Inactive => format!("icon{size}.png"),
            Self::Active => format!("icon-active{size}.png"),
        }
    }
}

/// Shape geometry for one icon size. Integer (floor) division throughout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLayout {
    pub size: i32,
    /// Microphone body, inclusive corners.
    pub body: Bounds,
    pub body_radius: i32,
    pub stand: (Point, Point),
    pub base: (Point, Point),
    pub arrow: [Point; 3],
}

impl IconLayout {
    pub fn new(size: u32) -> Result<Self> {
        if size == 0 {
            bail!("Icon size must be positive");
        }
        let s = i32::try_from(size).with_context(|| format!("Icon size {size} is too large"))?;
        let half = s / 2;

        let mic_width = s / 4;
        let mic_height = s / 3;
        let mic_x = (s - mic_width) / 2;
        let mic_y = s / 4;
        let body = [mic_x, mic_y, mic_x + mic_width, mic_y + mic_height];

        // Clamp to 1 px so small sizes keep visible shapes.
        let stand_len = (s / 8).max(1);
        let stand_y = mic_y + mic_height;
        let foot_y = stand_y + stand_len;
        let stand = ((half, stand_y), (half, foot_y));
        let base = ((half - stand_len, foot_y), (half + stand_len, foot_y));

        let arrow_y = s * 2 / 3;
        let arrow_size = s / 6;
        let spread = (arrow_size / 3).max(1);
        let back_x = half + arrow_size / 2;
        let tip_x = (half + arrow_size).max(back_x + 1);
        let arrow = [
            (back_x, arrow_y - spread),
            (tip_x, arrow_y),
            (back_x, arrow_y + spread),
        ];

        Ok(Self {
            size: s,
            body,
            body_radius: mic_width / 2,
            stand,
            base,
            arrow,
        })
    }
}

/// Render the icon at the given `size`.
///
/// Draws a filled circle in the variant colour with a white microphone,
/// stand and a small rightward arrow on top.
pub fn create_icon(size: u32, variant: Variant) -> Result<RgbImage> {
    let layout = IconLayout::new(size)?;
    log::debug!("Icon layout for {size}px {variant:?}: {layout:?}");

    let mut canvas = RgbImage::from_pixel(size, size, WHITE);
    raster::fill_ellipse(&mut canvas, [0, 0, layout.size, layout.size], variant.color());

    // Microphone body
    raster::fill_rounded_rect(&mut canvas, layout.body, layout.body_radius, WHITE);

    // Stand and base
    raster::draw_line(&mut canvas, layout.stand.0, layout.stand.1, STROKE_WIDTH, WHITE)?;
    raster::draw_line(&mut canvas, layout.base.0, layout.base.1, STROKE_WIDTH, WHITE)?;

    raster::fill_polygon(&mut canvas, &layout.arrow, WHITE)?;

    Ok(canvas)
}

/// Render the icon and write it to `path` as PNG, replacing any existing file.
pub fn write_icon(size: u32, path: &Path, variant: Variant) -> Result<()> {
    let canvas = create_icon(size, variant)?;
    canvas
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write icon {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SIZES: [u32; 6] = [8, 16, 32, 48, 64, 128];

    fn area(b: Bounds) -> i32 {
        (b[2] - b[0]) * (b[3] - b[1])
    }

    #[test]
    fn variant_mapping() {
        assert_eq!(Variant::from_active(true), Variant::Active);
        assert_eq!(Variant::from_active(false), Variant::Inactive);
        assert!(Variant::Active.is_active());
        assert_eq!(Variant::Inactive.color(), Rgb([102, 126, 234]));
        assert_eq!(Variant::Active.color(), Rgb([16, 185, 129]));
        assert_eq!(Variant::Inactive.file_name(128), "icon128.png");
        assert_eq!(Variant::Active.file_name(16), "icon-active16.png");
    }

    #[test]
    fn layout_at_48() {
        let l = IconLayout::new(48).unwrap();
        assert_eq!(l.body, [18, 12, 30, 28]);
        assert_eq!(l.body_radius, 6);
        assert_eq!(l.stand, ((24, 28), (24, 34)));
        assert_eq!(l.base, ((18, 34), (30, 34)));
        assert_eq!(l.arrow, [(28, 30), (32, 32), (28, 34)]);
    }

    #[test]
    fn smallest_canonical_size_keeps_shapes() {
        let l = IconLayout::new(16).unwrap();
        assert!(area(l.body) > 0);
        assert!(l.stand.1 .1 > l.stand.0 .1);
        assert!(l.base.1 .0 > l.base.0 .0);

        let [a, b, c] = l.arrow;
        let doubled = (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0);
        assert_ne!(doubled, 0);
        // Tip is to the right of the back edge.
        assert!(b.0 > a.0 && a.0 == c.0);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(IconLayout::new(0).is_err());
        assert!(create_icon(0, Variant::Active).is_err());
    }

    #[test]
    fn icon_has_requested_dimensions() {
        for size in SIZES {
            let img = create_icon(size, Variant::Inactive).unwrap();
            assert_eq!(img.dimensions(), (size, size));
        }
    }

    #[test]
    fn centre_is_white() {
        for size in SIZES {
            for variant in [Variant::Inactive, Variant::Active] {
                let img = create_icon(size, variant).unwrap();
                assert_eq!(*img.get_pixel(size / 2, size / 2), WHITE, "{size}px {variant:?}");
            }
        }
    }

    #[test]
    fn background_uses_variant_colour() {
        for size in [16, 48, 128] {
            for variant in [Variant::Inactive, Variant::Active] {
                let img = create_icon(size, variant).unwrap();
                let q = size / 4;
                assert_eq!(*img.get_pixel(q, q), variant.color(), "{size}px {variant:?}");
                assert_eq!(*img.get_pixel(size - q, q), variant.color(), "{size}px {variant:?}");
            }
        }
    }

    #[test]
    fn corners_stay_white() {
        let img = create_icon(48, Variant::Active).unwrap();
        for (x, y) in [(0, 0), (47, 0), (0, 47), (47, 47)] {
            assert_eq!(*img.get_pixel(x, y), WHITE);
        }
    }

    #[test]
    fn arrow_is_drawn() {
        let img = create_icon(128, Variant::Inactive).unwrap();
        let l = IconLayout::new(128).unwrap();
        let (x, y) = l.arrow[1];
        assert_eq!(*img.get_pixel(x as u32 - 1, y as u32), WHITE);
        // Just past the tip is background again.
        assert_eq!(*img.get_pixel(x as u32 + 2, y as u32), Variant::Inactive.color());
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = create_icon(48, Variant::Active).unwrap();
        let b = create_icon(48, Variant::Active).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn written_png_decodes_to_same_pixels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("icon-active48.png");
        write_icon(48, &path, Variant::Active).unwrap();

        let decoded = image::open(&path).unwrap().into_rgb8();
        assert_eq!(decoded, create_icon(48, Variant::Active).unwrap());
    }

    #[test]
    fn write_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("icon16.png");
        std::fs::write(&path, b"stale").unwrap();

        write_icon(16, &path, Variant::Inactive).unwrap();
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 16));
    }

    #[test]
    fn unwritable_path_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("icon16.png");
        let err = write_icon(16, &path, Variant::Inactive).unwrap_err();
        assert!(err.to_string().contains("icon16.png"));
    }
}
