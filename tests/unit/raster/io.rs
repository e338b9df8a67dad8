use std::path::PathBuf;

use image::Rgba;

use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_raster_io").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn open_missing_file_is_file_not_found() {
    let err = open_image(Path::new("target/definitely/missing.png")).unwrap_err();
    assert!(matches!(err, NanobananaError::FileNotFound(_)));
}

#[test]
fn open_garbage_is_decode_error() {
    let dir = scratch_dir("garbage");
    let path = dir.join("not_an_image.png");
    std::fs::write(&path, b"this is not a png").unwrap();

    let err = open_image(&path).unwrap_err();
    assert!(matches!(err, NanobananaError::Decode { .. }));
    assert_eq!(err.code(), "DECODE_FAILED");
}

#[test]
fn save_creates_parent_dirs_and_roundtrips_png() {
    let dir = scratch_dir("save");
    let path = dir.join("nested").join("deeper").join("out.png");
    let _ = std::fs::remove_file(&path);

    let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 40]));
    save_rgba(&img, &path, ImageFormat::Png).unwrap();

    let (decoded, format) = open_image(&path).unwrap();
    assert_eq!(format, Some(ImageFormat::Png));
    assert_eq!(decoded.to_rgba8().get_pixel(0, 0).0, [10, 20, 30, 40]);
}

#[test]
fn save_jpeg_drops_alpha_instead_of_failing() {
    let dir = scratch_dir("jpeg");
    let path = dir.join("out.jpg");
    let img = RgbaImage::from_pixel(4, 4, Rgba([200, 10, 10, 128]));
    save_rgba(&img, &path, ImageFormat::Jpeg).unwrap();

    let (decoded, format) = open_image(&path).unwrap();
    assert_eq!(format, Some(ImageFormat::Jpeg));
    assert_eq!((decoded.width(), decoded.height()), (4, 4));
}

#[test]
fn format_helpers() {
    assert_eq!(format_from_path(Path::new("a.PNG")).unwrap(), ImageFormat::Png);
    assert_eq!(format_from_path(Path::new("a.jpeg")).unwrap(), ImageFormat::Jpeg);
    assert!(matches!(
        format_from_path(Path::new("a.txt")).unwrap_err(),
        NanobananaError::UnsupportedFormat(_)
    ));
    assert_eq!(format_name(ImageFormat::Png), "png");
    assert_eq!(format_name(ImageFormat::Jpeg), "jpeg");
    assert_eq!(format_name(ImageFormat::Gif), "gif");
}
