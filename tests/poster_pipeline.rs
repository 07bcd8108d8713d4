//! End-to-end pipeline tests: bytes in, poster files and archives out.

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use shotcard::batch::{self, BatchError, RenderJob};
use shotcard::export::{self, OutputFormat};
use shotcard::render::RenderEngine;
use std::io::Cursor;
use zip::ZipArchive;

fn synthetic_photo(w: u32, h: u32, color: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(w, h, Rgba(color));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// A JPEG carrying an EXIF orientation tag: the encoded image with an APP1
/// Exif segment spliced in right after the SOI marker.
fn jpeg_with_orientation(w: u32, h: u32, code: u16) -> Vec<u8> {
    let img = RgbImage::from_pixel(w, h, Rgb([70, 140, 210]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Jpeg).unwrap();
    let jpeg = buf.into_inner();

    let orientation = exif::Field {
        tag: exif::Tag::Orientation,
        ifd_num: exif::In::PRIMARY,
        value: exif::Value::Short(vec![code]),
    };
    let mut writer = exif::experimental::Writer::new();
    writer.push_field(&orientation);
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false).unwrap();
    let tiff = tiff.into_inner();

    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((tiff.len() + 8) as u16).to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

#[test]
fn classic_poster_written_to_disk_decodes_back() {
    let engine = RenderEngine::builtin();
    let (poster, meta) = engine
        .render("classic", &synthetic_photo(160, 120, [40, 90, 150, 255]), "hike.png")
        .unwrap();
    assert_eq!(meta.original_filename, "hike.png");

    let encoded = export::export(&poster, OutputFormat::Png, 0.9).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hike_poster.png");
    std::fs::write(&path, &encoded).unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), poster.dimensions());
    // Poster canvas is wider and taller than the photo
    assert!(decoded.width() > 160);
    assert!(decoded.height() > 120);
}

#[test]
fn blur_poster_exports_as_jpeg() {
    let engine = RenderEngine::builtin();
    let (poster, _) = engine
        .render(
            "blur-background",
            &synthetic_photo(200, 150, [180, 120, 60, 255]),
            "dune.png",
        )
        .unwrap();
    let encoded = export::export(&poster, OutputFormat::Jpeg, 0.85).unwrap();
    assert_eq!(&encoded[..2], &[0xFF, 0xD8]);
    let decoded = image::load_from_memory(&encoded).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), poster.dimensions());
}

#[test]
fn batch_isolates_the_corrupt_item_and_keeps_order() {
    let engine = RenderEngine::builtin();
    let mut jobs: Vec<RenderJob> = (1..=5)
        .map(|i| RenderJob {
            original_name: Some(format!("shot{i}.png")),
            bytes: synthetic_photo(80, 60, [i as u8 * 40, 100, 100, 255]),
        })
        .collect();
    jobs[2].bytes = b"corrupt payload".to_vec();

    let result = batch::run(&engine, &jobs, "classic", OutputFormat::Png, 0.9).unwrap();
    assert_eq!(result.succeeded, 4);
    assert_eq!(result.failed, 1);

    let mut zip = ZipArchive::new(Cursor::new(result.archive)).unwrap();
    let names: Vec<String> = (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "shot1_poster.png",
            "shot2_poster.png",
            "shot4_poster.png",
            "shot5_poster.png",
        ]
    );

    // Every entry is a decodable poster
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).unwrap();
        let mut bytes = Vec::new();
        std::io::Read::read_to_end(&mut entry, &mut bytes).unwrap();
        assert!(image::load_from_memory(&bytes).is_ok());
    }
}

#[test]
fn batch_with_nothing_renderable_fails() {
    let engine = RenderEngine::builtin();
    let jobs = vec![
        RenderJob {
            original_name: Some("a.jpg".to_string()),
            bytes: vec![0xDE, 0xAD],
        },
        RenderJob {
            original_name: Some("b.jpg".to_string()),
            bytes: vec![0xBE, 0xEF],
        },
    ];
    let err = batch::run(&engine, &jobs, "classic", OutputFormat::Jpeg, 0.9).unwrap_err();
    assert!(matches!(err, BatchError::AllFailed { failed: 2 }));
}

#[test]
fn batch_archive_round_trips_through_disk() {
    let engine = RenderEngine::builtin();
    let jobs = vec![RenderJob {
        original_name: Some("solo.png".to_string()),
        bytes: synthetic_photo(64, 64, [10, 10, 200, 255]),
    }];
    let result = batch::run(&engine, &jobs, "blur-background", OutputFormat::Jpeg, 0.8).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posters.zip");
    std::fs::write(&path, &result.archive).unwrap();

    let file = std::fs::File::open(&path).unwrap();
    let mut zip = ZipArchive::new(file).unwrap();
    assert_eq!(zip.len(), 1);
    assert_eq!(zip.by_index(0).unwrap().name(), "solo_poster.jpg");
}

#[test]
fn orientation_tag_rotates_the_photo_before_layout() {
    // A 200x120 landscape frame stored with orientation 6 (90 deg CW)
    // displays as 120x200 portrait; the poster must be laid out around the
    // upright dimensions, not the stored ones
    let engine = RenderEngine::builtin();
    let bytes = jpeg_with_orientation(200, 120, 6);
    let (poster, meta) = engine.render("classic", &bytes, "rotated.jpg").unwrap();

    assert_eq!(meta.orientation, 6);
    // Classic canvas width = upright photo width + 2 * padding, where
    // padding is 5% of the upright short edge (120)
    assert_eq!(poster.width(), 120 + 2 * (120 / 20));
    // Laid out around the stored width instead, it would be at least 200 wide
    assert!(poster.width() < 200);
    assert!(poster.height() > 200);
}

#[test]
fn upright_orientation_tag_changes_nothing() {
    let engine = RenderEngine::builtin();
    let tagged = jpeg_with_orientation(200, 120, 1);
    let (poster, meta) = engine.render("classic", &tagged, "plain.jpg").unwrap();
    assert_eq!(meta.orientation, 1);
    assert_eq!(poster.width(), 200 + 2 * (120 / 20));
}

#[test]
fn engine_lists_both_shipping_templates() {
    let engine = RenderEngine::builtin();
    let ids: Vec<&str> = engine.templates().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["classic", "blur-background"]);
}
