use std::io::Cursor;
use std::path::Path;

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::TempDir;
use watermark_overlay::{Error, ImageRole, Session};

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self, name: &str) -> String {
        self.dir.path().join(name).to_str().unwrap().to_string()
    }

    fn rgb(&self, name: &str, image: &RgbImage) -> String {
        let path = self.path(name);
        image.save(&path).unwrap();
        path
    }

    fn rgba(&self, name: &str, image: &RgbaImage) -> String {
        let path = self.path(name);
        image.save(&path).unwrap();
        path
    }
}

/// Run a session over `answers` and return its result and transcript.
fn run(answers: &[&str]) -> (Result<std::path::PathBuf, Error>, String) {
    let mut input = answers.join("\n");
    input.push('\n');
    let mut out = Vec::new();
    let result = Session::new(Cursor::new(input), &mut out).run();
    (result, String::from_utf8(out).unwrap())
}

fn exit_code(answers: &[&str]) -> i32 {
    run(answers).0.unwrap_err().exit_code()
}

#[allow(clippy::cast_possible_truncation)]
fn base_4x4() -> RgbImage {
    RgbImage::from_fn(4, 4, |x, y| Rgb([(x * 40) as u8, (y * 40) as u8, 90]))
}

fn load_rgb(path: &Path) -> RgbImage {
    image::open(path).unwrap().to_rgb8()
}

#[test]
fn single_white_watermark_at_half_weight() {
    let fx = Fixture::new();
    let base = base_4x4();
    let image = fx.rgb("base.png", &base);
    let mark = fx.rgb("mark.png", &RgbImage::from_pixel(2, 2, Rgb([255, 255, 255])));
    let out = fx.path("out.png");

    let (result, transcript) = run(&[&image, &mark, "no", "50", "single", "1 1", &out]);

    assert_eq!(result.unwrap(), Path::new(&out));
    let expected = format!(
        "Input the image filename:\n\
         Input the watermark image filename:\n\
         Do you want to set a transparency color?\n\
         Input the watermark transparency percentage (Integer 0-100):\n\
         Choose the position method (single, grid):\n\
         Input the watermark position ([x 0-2] [y 0-2]):\n\
         \n\
         Input the output image filename (jpg or png extension):\n\
         The watermarked image {out} has been created.\n"
    );
    assert_eq!(transcript, expected);

    let written = load_rgb(Path::new(&out));
    for (x, y, px) in written.enumerate_pixels() {
        let orig = base.get_pixel(x, y);
        if (1..3).contains(&x) && (1..3).contains(&y) {
            for ch in 0..3 {
                assert_eq!(u32::from(px[ch]), (255 + u32::from(orig[ch])) / 2);
            }
        } else {
            assert_eq!(px, orig);
        }
    }
}

#[test]
fn zero_weight_round_trips_base_pixels() {
    let fx = Fixture::new();
    let base = base_4x4();
    let image = fx.rgb("base.png", &base);
    let mark = fx.rgb("mark.png", &RgbImage::from_pixel(3, 3, Rgb([1, 2, 3])));
    let out = fx.path("same.png");

    let (result, _) = run(&[&image, &mark, "no", "0", "grid", &out]);

    result.unwrap();
    assert_eq!(load_rgb(Path::new(&out)), base);
}

#[test]
fn grid_tiles_with_clipped_edges() {
    let fx = Fixture::new();
    let image = fx.rgb("base.png", &RgbImage::from_pixel(5, 3, Rgb([0, 0, 0])));
    #[allow(clippy::cast_possible_truncation)]
    let tile = RgbImage::from_fn(2, 2, |x, y| {
        let v = (50 * (1 + x + 2 * y)) as u8;
        Rgb([v, v, v])
    });
    let mark = fx.rgb("mark.png", &tile);
    let out = fx.path("grid.png");

    let (result, _) = run(&[&image, &mark, "no", "100", "grid", &out]);

    result.unwrap();
    let written = load_rgb(Path::new(&out));
    for (x, y, px) in written.enumerate_pixels() {
        assert_eq!(px, tile.get_pixel(x % 2, y % 2), "pixel ({x},{y})");
    }
}

#[test]
fn transparency_color_keeps_keyed_pixels() {
    let fx = Fixture::new();
    let image = fx.rgb("base.png", &RgbImage::from_pixel(2, 1, Rgb([10, 20, 30])));
    let mut logo = RgbImage::from_pixel(2, 1, Rgb([0, 255, 0]));
    logo.put_pixel(1, 0, Rgb([200, 200, 200]));
    let mark = fx.rgb("mark.png", &logo);
    let out = fx.path("keyed.png");

    let (result, transcript) = run(&[
        &image, &mark, "YES", "0 255 0", "100", "single", "0 0", &out,
    ]);

    result.unwrap();
    assert!(transcript.contains("Input a transparency color ([Red] [Green] [Blue]):\n"));
    let written = load_rgb(Path::new(&out));
    assert_eq!(*written.get_pixel(0, 0), Rgb([10, 20, 30]));
    assert_eq!(*written.get_pixel(1, 0), Rgb([200, 200, 200]));
}

#[test]
fn translucent_watermark_asks_about_alpha_only() {
    let fx = Fixture::new();
    let image = fx.rgb("base.png", &RgbImage::from_pixel(2, 1, Rgb([10, 20, 30])));
    let mut logo = RgbaImage::from_pixel(2, 1, Rgba([100, 100, 100, 255]));
    logo.put_pixel(0, 0, Rgba([100, 100, 100, 0]));
    let mark = fx.rgba("mark.png", &logo);
    let out = fx.path("alpha.png");

    let (result, transcript) = run(&[&image, &mark, "yes", "100", "grid", &out]);

    result.unwrap();
    assert!(transcript.contains("Do you want to use the watermark's Alpha channel?\n"));
    assert!(!transcript.contains("transparency color"));
    let written = load_rgb(Path::new(&out));
    assert_eq!(*written.get_pixel(0, 0), Rgb([10, 20, 30]));
    assert_eq!(*written.get_pixel(1, 0), Rgb([100, 100, 100]));
}

#[test]
fn declined_alpha_blends_transparent_pixels() {
    let fx = Fixture::new();
    let image = fx.rgb("base.png", &RgbImage::from_pixel(1, 1, Rgb([10, 20, 30])));
    let mark = fx.rgba("mark.png", &RgbaImage::from_pixel(1, 1, Rgba([100, 100, 100, 0])));
    let out = fx.path("no-alpha.png");

    let (result, _) = run(&[&image, &mark, "no", "100", "grid", &out]);

    result.unwrap();
    assert_eq!(*load_rgb(Path::new(&out)).get_pixel(0, 0), Rgb([100, 100, 100]));
}

#[test]
fn jpeg_output_is_written() {
    let fx = Fixture::new();
    let image = fx.rgb("base.png", &RgbImage::from_pixel(16, 16, Rgb([128, 128, 128])));
    let mark = fx.rgb("mark.png", &RgbImage::from_pixel(4, 4, Rgb([255, 0, 0])));
    let out = fx.path("out.jpg");

    let (result, _) = run(&[&image, &mark, "no", "40", "single", "+3 5", &out]);

    result.unwrap();
    let written = image::open(&out).unwrap();
    assert_eq!((written.width(), written.height()), (16, 16));
}

#[test]
fn missing_watermark_file_exits_21() {
    let fx = Fixture::new();
    let image = fx.rgb("base.png", &base_4x4());
    let missing = fx.path("nope.png");

    let (result, transcript) = run(&[&image, &missing]);

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 21);
    assert_eq!(err.to_string(), format!("The file {missing} doesn't exist."));
    assert!(transcript.ends_with("Input the watermark image filename:\n"));
}

#[test]
fn grayscale_image_exits_22() {
    let fx = Fixture::new();
    let path = fx.path("gray.png");
    image::GrayImage::new(4, 4).save(&path).unwrap();

    let (result, _) = run(&[&path]);

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 22);
    assert!(matches!(err, Error::ColorComponents { role: ImageRole::Image }));
}

#[test]
fn sixteen_bit_watermark_exits_23() {
    let fx = Fixture::new();
    let image = fx.rgb("base.png", &base_4x4());
    let path = fx.path("deep.png");
    image::ImageBuffer::<Rgb<u16>, Vec<u16>>::from_pixel(2, 2, Rgb([1000, 2000, 3000]))
        .save(&path)
        .unwrap();

    let err = run(&[&image, &path]).0.unwrap_err();
    assert_eq!(err.exit_code(), 23);
    assert_eq!(err.to_string(), "The watermark isn't 24 or 32-bit.");
}

#[test]
fn indexed_base_image_exits_23() {
    let fx = Fixture::new();
    let path = fx.path("palette.png");
    let file = std::io::BufWriter::new(std::fs::File::create(&path).unwrap());
    let mut encoder = png::Encoder::new(file, 2, 2);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(vec![255, 255, 255, 0, 0, 0]);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&[0, 1, 1, 0]).unwrap();
    writer.finish().unwrap();

    let (result, transcript) = run(&[&path]);

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 23);
    assert_eq!(err.to_string(), "The image isn't 24 or 32-bit.");
    assert_eq!(transcript, "Input the image filename:\n");
}

#[test]
fn oversized_watermark_exits_24() {
    let fx = Fixture::new();
    let image = fx.rgb("base.png", &base_4x4());
    let mark = fx.rgb("mark.png", &RgbImage::new(5, 2));

    assert_eq!(exit_code(&[&image, &mark]), 24);
}

#[test]
fn weight_errors_exit_25_and_26() {
    let fx = Fixture::new();
    let image = fx.rgb("base.png", &base_4x4());
    let mark = fx.rgb("mark.png", &RgbImage::new(2, 2));

    assert_eq!(exit_code(&[&image, &mark, "no", "abc"]), 25);
    assert_eq!(exit_code(&[&image, &mark, "no", "150"]), 26);
}

#[test]
fn bad_output_extension_exits_27_without_writing() {
    let fx = Fixture::new();
    let image = fx.rgb("base.png", &base_4x4());
    let mark = fx.rgb("mark.png", &RgbImage::new(2, 2));
    let out = fx.path("out.gif");

    assert_eq!(exit_code(&[&image, &mark, "no", "50", "grid", &out]), 27);
    assert!(!Path::new(&out).exists());
}

#[test]
fn bad_transparency_color_exits_28() {
    let fx = Fixture::new();
    let image = fx.rgb("base.png", &base_4x4());
    let mark = fx.rgb("mark.png", &RgbImage::new(2, 2));

    assert_eq!(exit_code(&[&image, &mark, "yes", "0 300 0"]), 28);
    assert_eq!(exit_code(&[&image, &mark, "yes", "0 0"]), 28);
}

#[test]
fn bad_placement_method_exits_29() {
    let fx = Fixture::new();
    let image = fx.rgb("base.png", &base_4x4());
    let mark = fx.rgb("mark.png", &RgbImage::new(2, 2));

    assert_eq!(exit_code(&[&image, &mark, "no", "50", "tiled"]), 29);
}

#[test]
fn position_errors_exit_30_and_31() {
    let fx = Fixture::new();
    let image = fx.rgb("base.png", &base_4x4());
    let mark = fx.rgb("mark.png", &RgbImage::new(2, 2));

    assert_eq!(exit_code(&[&image, &mark, "no", "50", "single", "1,1"]), 30);
    assert_eq!(exit_code(&[&image, &mark, "no", "50", "single", "3 0"]), 31);
    assert_eq!(exit_code(&[&image, &mark, "no", "50", "single", "-1 0"]), 31);
}
