//! End-to-end scenarios through the public API.

use image_transformer::{
    crt_effect, crt_effect_with, grayscale, pixel_art, pixelate, CrtSettings, FilterError,
    PixelBuffer,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn checkerboard(width: usize, height: usize) -> PixelBuffer {
    let data: Vec<u8> = (0..width * height)
        .flat_map(|i| {
            let (x, y) = (i % width, i / width);
            if (x + y) % 2 == 0 {
                [240, 30, 90, 255]
            } else {
                [10, 200, 60, 128]
            }
        })
        .collect();
    PixelBuffer::from_raw(width, height, data).unwrap()
}

#[test]
fn red_square_grayscales_to_85() {
    let red = PixelBuffer::filled(4, 4, [255, 0, 0, 255]);
    let gray = grayscale(&red);

    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(gray.pixel(x, y), Some([85, 85, 85, 255]));
        }
    }
}

#[test]
fn single_block_is_mean_of_all_pixels() {
    let buffer = checkerboard(4, 4);
    let result = pixelate(&buffer, 4).unwrap();

    // 8 of each color: (240+10)/2=125, (30+200)/2=115, (90+60)/2=75, (255+128)/2=191.5 -> 192
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(result.pixel(x, y), Some([125, 115, 75, 192]));
        }
    }
}

#[test]
fn grayscale_then_pixelate_chain() {
    let buffer = checkerboard(13, 9);
    let art = pixel_art(&buffer, 5).unwrap();
    let manual = pixelate(&grayscale(&buffer), 5).unwrap();
    assert_eq!(art, manual);

    for y in 0..9 {
        for x in 0..13 {
            let [r, g, b, _] = art.pixel(x, y).unwrap();
            assert_eq!(r, g);
            assert_eq!(g, b);
        }
    }
}

#[test]
fn every_filter_preserves_dimensions() {
    let buffer = checkerboard(11, 6);
    let mut rng = StdRng::seed_from_u64(3);

    let outputs = [
        grayscale(&buffer),
        pixelate(&buffer, 4).unwrap(),
        pixel_art(&buffer, 7).unwrap(),
        crt_effect_with(&buffer, &CrtSettings::default(), &mut rng).unwrap(),
    ];
    for out in outputs {
        assert_eq!((out.width(), out.height()), (11, 6));
        assert_eq!(out.into_raw().len(), 11 * 6 * 4);
    }
}

#[test]
fn invalid_parameters_are_rejected() {
    let buffer = checkerboard(4, 4);

    assert!(matches!(pixelate(&buffer, 0), Err(FilterError::InvalidParameter { .. })));
    assert!(matches!(pixelate(&buffer, -3), Err(FilterError::InvalidParameter { .. })));
    assert!(matches!(
        crt_effect(&buffer, 1.5, 0, 0.0),
        Err(FilterError::InvalidParameter { .. })
    ));
}

#[test]
fn crt_output_feeds_back_into_other_filters() {
    let buffer = checkerboard(8, 8);
    let crt = crt_effect(&buffer, 0.4, 1, 5.0).unwrap();
    let gray = grayscale(&crt);
    assert_eq!(grayscale(&gray), gray);
}

#[test]
fn filters_run_concurrently_on_shared_input() {
    let buffer = checkerboard(32, 32);
    let expected = pixelate(&buffer, 6).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| pixelate(&buffer, 6).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
