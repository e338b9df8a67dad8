use super::*;

fn img_from(pixels: &[[u8; 4]]) -> DynamicImage {
    let mut img = RgbaImage::new(pixels.len() as u32, 1);
    for (i, px) in pixels.iter().enumerate() {
        img.put_pixel(i as u32, 0, Rgba(*px));
    }
    DynamicImage::ImageRgba8(img)
}

#[test]
fn distance_is_mean_squared() {
    assert_eq!(color_distance(Rgb([255, 255, 255]), WHITE), 0.0);
    assert_eq!(color_distance(Rgb([252, 255, 255]), WHITE), 3.0);
    assert_eq!(color_distance(Rgb([0, 0, 0]), WHITE), 65025.0);
}

#[test]
fn options_validate_tolerance_and_color() {
    assert_eq!(TransparencyOptions::default().tolerance, 10);
    assert_eq!(TransparencyOptions::default().color, WHITE);
    assert!(matches!(
        TransparencyOptions::from_specs("white", 101),
        Err(NanobananaError::InvalidTolerance(101))
    ));
    assert!(matches!(
        TransparencyOptions::from_specs("chartreuse", 10),
        Err(NanobananaError::InvalidColor(_))
    ));
    let opts = TransparencyOptions::from_specs("#00FF00", 0).unwrap();
    assert_eq!(opts.color, Rgb([0, 255, 0]));
    assert_eq!(opts.threshold(), 0.0);
}

#[test]
fn zero_tolerance_only_keys_exact_matches() {
    let src = img_from(&[[255, 255, 255, 255], [254, 255, 255, 255], [10, 20, 30, 255]]);
    let opts = TransparencyOptions {
        color: WHITE,
        tolerance: 0,
    };
    let out = make_transparent(&src, &opts).unwrap();
    assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255, 0]);
    assert_eq!(out.get_pixel(1, 0).0, [254, 255, 255, 255]);
    assert_eq!(out.get_pixel(2, 0).0, [10, 20, 30, 255]);
}

#[test]
fn full_tolerance_keys_nearly_everything() {
    // Threshold 255 covers any pixel within ~16 per channel of white.
    let src = img_from(&[[255, 255, 255, 255], [240, 240, 240, 255], [0, 0, 0, 255]]);
    let opts = TransparencyOptions {
        color: WHITE,
        tolerance: 100,
    };
    let out = make_transparent(&src, &opts).unwrap();
    assert_eq!(out.get_pixel(0, 0)[3], 0);
    assert_eq!(out.get_pixel(1, 0)[3], 0);
    assert_eq!(out.get_pixel(2, 0)[3], 255);
}

#[test]
fn unmatched_pixels_keep_existing_alpha() {
    let src = img_from(&[[1, 2, 3, 77]]);
    let out = make_transparent(&src, &TransparencyOptions::default()).unwrap();
    assert_eq!(out.get_pixel(0, 0).0, [1, 2, 3, 77]);
}

#[test]
fn rgb_sources_become_opaque_rgba() {
    let src = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(2, 2, Rgb([9, 9, 9])));
    let out = make_transparent(&src, &TransparencyOptions::default()).unwrap();
    assert_eq!(out.get_pixel(1, 1).0, [9, 9, 9, 255]);
}

#[test]
fn default_output_sits_next_to_input() {
    assert_eq!(
        default_output_path(Path::new("shots/logo.jpg")),
        PathBuf::from("shots/logo_transparent.png")
    );
    assert_eq!(
        default_output_path(Path::new("icon.png")),
        PathBuf::from("icon_transparent.png")
    );
}

#[test]
fn make_transparent_file_writes_png() {
    let dir = PathBuf::from("target").join("unit_transparency");
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("white_box.png");
    img_from(&[[255, 255, 255, 255], [0, 0, 0, 255]])
        .save(&input)
        .unwrap();
    let output = default_output_path(&input);

    let res = make_transparent_file(&input, &output, &TransparencyOptions::default()).unwrap();
    assert_eq!(res, TransparencyResult { width: 2, height: 1 });

    let (decoded, format) = raster::open_image(&output).unwrap();
    assert_eq!(format, Some(ImageFormat::Png));
    assert_eq!(decoded.to_rgba8().get_pixel(0, 0)[3], 0);
}
