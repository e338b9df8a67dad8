use image::{Rgba, RgbImage, RgbaImage};

use super::*;

#[test]
fn opaque_rgb_image_recommends_background_removal() {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([255, 255, 255])));
    let res = inspect_image(&img, Some(ImageFormat::Jpeg));

    assert!(!res.has_alpha_channel);
    assert_eq!(res.transparent_pixel_percent, 0.0);
    assert_eq!(res.format, "jpeg");
    assert_eq!((res.width, res.height), (8, 8));
    assert_eq!(res.dominant_background_color, "white");
    assert!(res.recommendation.contains("transparent make"));
    assert!(res.recommendation.contains("--color white"));
}

#[test]
fn few_transparent_pixels_are_flagged() {
    let mut img = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
    img.put_pixel(5, 5, Rgba([0, 0, 0, 200]));
    let res = inspect_image(&DynamicImage::ImageRgba8(img), Some(ImageFormat::Png));

    assert!(res.has_alpha_channel);
    assert_eq!(res.transparent_pixel_percent, 0.0);
    assert_eq!(res.dominant_background_color, "black");
    assert!(res.recommendation.contains("very few transparent pixels"));
}

#[test]
fn keyed_image_reports_percent() {
    let mut img = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 0]));
    for x in 0..10 {
        img.put_pixel(x, 0, Rgba([18, 52, 86, 255]));
    }
    let res = inspect_image(&DynamicImage::ImageRgba8(img), None);

    assert!(res.has_alpha_channel);
    assert!((res.transparent_pixel_percent - 90.0).abs() < 1e-9);
    assert_eq!(res.format, "unknown");
    assert_eq!(res.recommendation, "Image already has transparency.");
    // 10 top-edge pixels vs 26 other edge pixels.
    assert_eq!(res.dominant_background_color, "white");
}

#[test]
fn edge_color_ties_go_to_first_seen() {
    // 2x1: both pixels are edges, one of each color.
    let mut img = RgbaImage::new(2, 1);
    img.put_pixel(0, 0, Rgba([0x12, 0x34, 0x56, 255]));
    img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
    let res = inspect_image(&DynamicImage::ImageRgba8(img), None);
    assert_eq!(res.dominant_background_color, "#123456");
}

#[test]
fn serializes_with_snake_case_fields() {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([0, 0, 0])));
    let json = serde_json::to_value(inspect_image(&img, Some(ImageFormat::Png))).unwrap();
    assert_eq!(json["has_alpha_channel"], false);
    assert_eq!(json["dominant_background_color"], "black");
    assert_eq!(json["format"], "png");
}

#[test]
fn inspect_missing_file_fails() {
    let err = inspect_file(Path::new("target/unit_inspect/missing.png")).unwrap_err();
    assert_eq!(err.code(), "FILE_NOT_FOUND");
}
