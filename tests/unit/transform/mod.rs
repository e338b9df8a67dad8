use std::path::PathBuf;

use image::Rgba;

use super::*;

fn checker(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    }))
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_transform").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn empty_request_is_rejected() {
    let req = TransformRequest::default();
    assert!(req.is_empty());
    let err = transform_image(&checker(4, 4), &req).unwrap_err();
    assert!(matches!(err, NanobananaError::NoOperation));
}

#[test]
fn rotation_out_of_range_is_rejected() {
    let req = TransformRequest {
        rotate: 400.0,
        ..Default::default()
    };
    assert!(matches!(
        req.validate(),
        Err(NanobananaError::InvalidRotation(_))
    ));
    let req = TransformRequest {
        rotate: -360.0,
        ..Default::default()
    };
    assert!(req.validate().is_ok());
}

#[test]
fn from_specs_parses_and_skips_blank() {
    let req = TransformRequest::from_specs(Some("64x64"), "cover", Some(""), 0.0, true, false).unwrap();
    assert_eq!(req.crop, None);
    assert_eq!(
        req.resize,
        Some(ResizeSpec::Exact {
            width: 64,
            height: 64
        })
    );
    assert_eq!(req.fit, FitMode::Cover);
    assert!(req.flip);

    let req =
        TransformRequest::from_specs(Some("   "), "", Some(" 1,2,3,4 "), 0.0, false, false).unwrap();
    assert_eq!(req.resize, None);
    assert_eq!(
        req.crop,
        Some(CropRegion {
            left: 1,
            top: 2,
            width: 3,
            height: 4
        })
    );
    assert!(req.validate().is_ok());

    let err = TransformRequest::from_specs(None, "sideways", None, 0.0, true, false).unwrap_err();
    assert!(matches!(err, NanobananaError::InvalidFit(_)));
}

#[test]
fn crop_then_cover_hits_target_for_any_aspect() {
    for (w, h) in [(120, 40), (40, 120), (77, 77)] {
        let req = TransformRequest {
            crop: Some(CropRegion {
                left: 1,
                top: 2,
                width: w - 10,
                height: h - 10,
            }),
            resize: Some(ResizeSpec::Exact {
                width: 32,
                height: 24,
            }),
            fit: FitMode::Cover,
            ..Default::default()
        };
        let out = transform_image(&checker(w, h), &req).unwrap();
        assert_eq!(out.dimensions(), (32, 24), "source {w}x{h}");
    }
}

#[test]
fn contain_keeps_one_side_at_target() {
    let req = TransformRequest {
        resize: Some(ResizeSpec::Exact {
            width: 50,
            height: 50,
        }),
        ..Default::default()
    };
    let out = transform_image(&checker(200, 100), &req).unwrap();
    assert_eq!(out.dimensions(), (50, 25));
}

#[test]
fn flip_and_flop_mirror() {
    let mut src = RgbaImage::new(2, 2);
    src.put_pixel(0, 0, Rgba([1, 0, 0, 255]));
    let img = DynamicImage::ImageRgba8(src);

    let flipped = transform_image(
        &img,
        &TransformRequest {
            flip: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(flipped.get_pixel(0, 1)[0], 1);

    let flopped = transform_image(
        &img,
        &TransformRequest {
            flop: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(flopped.get_pixel(1, 0)[0], 1);
}

#[test]
fn order_is_crop_before_resize() {
    // Cropping a 10x10 down to 4x2 then resizing by 50% must give 2x1.
    let req = TransformRequest {
        crop: Some(CropRegion {
            left: 0,
            top: 0,
            width: 4,
            height: 2,
        }),
        resize: Some(ResizeSpec::Percent(50.0)),
        fit: FitMode::Fill,
        ..Default::default()
    };
    let out = transform_image(&checker(10, 10), &req).unwrap();
    assert_eq!(out.dimensions(), (2, 1));
}

#[test]
fn transform_file_writes_output_and_reports_format() {
    let dir = scratch_dir("file");
    let input = dir.join("in.png");
    checker(20, 10).save(&input).unwrap();
    let output = dir.join("out").join("small.jpg");

    let req = TransformRequest {
        resize: Some(ResizeSpec::Percent(50.0)),
        flop: true,
        ..Default::default()
    };
    let res = transform_file(&input, &output, &req).unwrap();
    assert_eq!(
        res,
        TransformResult {
            width: 10,
            height: 5,
            format: "jpg".to_string()
        }
    );
    assert!(output.exists());
}

#[test]
fn transform_file_rejects_unknown_extension_before_decoding() {
    let dir = scratch_dir("badext");
    let req = TransformRequest {
        flip: true,
        ..Default::default()
    };
    let err = transform_file(&dir.join("missing.png"), &dir.join("out.xyz"), &req).unwrap_err();
    assert!(matches!(err, NanobananaError::UnsupportedFormat(_)));
}
