use std::sync::Arc;

use gifos_anim::{
    type_text, AnimationEncoder, CompressionAlgorithm, Compressor, FrameRecorder, SpeedClass,
    TickScale,
};
use gifos_terminal::{CursorTarget, GlyphAtlas, Screen, Theme};
use gifos_test_utils::{fixtures::data, DecodedAnimation};
use proptest::prelude::*;

fn screen(width: u32, height: u32) -> Screen {
    Screen::new(
        width,
        height,
        Arc::new(Theme::default()),
        Arc::new(GlyphAtlas::new(1)),
    )
    .unwrap()
}

fn encode(recorder: &FrameRecorder, scale: TickScale) -> DecodedAnimation {
    let mut out = Vec::new();
    AnimationEncoder::new(scale, true)
        .encode(recorder.frames(), &mut out)
        .unwrap();
    DecodedAnimation::from_bytes(&out).unwrap()
}

#[test]
fn roundtrip_preserves_frames_delays_and_pixels() {
    gifos_test_utils::init_test_logging();

    let mut screen = screen(160, 60);
    let mut recorder = FrameRecorder::new(Compressor::new(CompressionAlgorithm::Zstd));

    screen.write("boot");
    recorder.hold(&screen, 20).unwrap();
    screen.set_cursor_visible(true);
    let typed = type_text(&mut screen, " ok\n", SpeedClass::Normal, recorder.compressor()).unwrap();
    recorder.extend(typed);
    screen.move_cursor(CursorTarget::LastRow);
    screen.set_highlight(true);
    screen.write("done");
    recorder.hold(&screen, 150).unwrap();

    let decoded = encode(&recorder, TickScale::default());

    assert_eq!(decoded.frames.len(), recorder.len());
    assert_eq!(decoded.frames.len(), 2 + 4);
    assert!(decoded.looping);
    for (frame, original) in decoded.frames.iter().zip(recorder.frames()) {
        assert_eq!(u32::from(frame.delay), original.delay_ticks());
        assert_eq!(frame.rgb, original.rgb().unwrap());
    }
    assert_eq!(decoded.total_delay(), recorder.total_ticks());
}

#[test]
fn typing_scenario_two_frames() {
    let mut screen = screen(80, 20);
    let mut recorder = FrameRecorder::default();
    recorder.extend(type_text(&mut screen, "OK", SpeedClass::Fast, recorder.compressor()).unwrap());

    let decoded = encode(&recorder, TickScale::default());
    assert_eq!(decoded.frames.len(), 2);
    assert_eq!(decoded.total_delay(), 4);

    // The first frame only has "O"; the second also draws "K" in cell 1
    let first = &decoded.frames[0];
    let second = &decoded.frames[1];
    let cell = |rgb: &[u8], column: usize| -> Vec<u8> {
        (0..10)
            .flat_map(|y| {
                let start = (y * 80 + column * 8) * 3;
                rgb[start..start + 24].to_vec()
            })
            .collect()
    };
    assert_eq!(cell(&first.rgb, 0), cell(&second.rgb, 0));
    assert_ne!(cell(&first.rgb, 1), cell(&second.rgb, 1));
    assert!(second.left >= 8);
}

#[test]
fn images_beyond_palette_limit_are_quantized_not_rejected() {
    let mut screen = screen(256, 120);
    let mut recorder = FrameRecorder::default();

    screen.write("avatar:");
    recorder.hold(&screen, 5).unwrap();
    screen.draw_image(
        gifos_terminal::Rect::new(0, 20, 256, 100),
        &data::striped_image(256, 100),
    );
    recorder.hold(&screen, 5).unwrap();

    let mut out = Vec::new();
    let stats = AnimationEncoder::default()
        .encode(recorder.frames(), &mut out)
        .unwrap();
    assert!(!stats.lossless_palette);

    let decoded = DecodedAnimation::from_bytes(&out).unwrap();
    assert_eq!(decoded.frames.len(), 2);

    // Geometry is preserved: glyph pixels in the text row stay distinct from
    // the (exactly kept) background
    let background = Theme::default().background.to_array();
    let text_pixels = 256 * 10;
    let original = recorder.frames()[1].rgb().unwrap();
    for (decoded_px, original_px) in decoded.frames[1]
        .rgb
        .chunks_exact(3)
        .zip(original.chunks_exact(3))
        .take(text_pixels)
    {
        assert_eq!(decoded_px == background, original_px == background);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn total_duration_is_within_one_tick(
        holds in prop::collection::vec(0u32..400, 1..12),
        millis in 10u32..40,
    ) {
        let mut screen = screen(16, 10);
        let mut recorder = FrameRecorder::new(Compressor::new(CompressionAlgorithm::None));
        for (i, &ticks) in holds.iter().enumerate() {
            screen.write(if i % 2 == 0 { "a" } else { "b" });
            recorder.hold(&screen, ticks).unwrap();
        }

        let scale = TickScale::from_millis(millis);
        let decoded = encode(&recorder, scale);
        prop_assert_eq!(decoded.frames.len(), holds.len());

        let requested_ms = scale.to_millis(recorder.total_ticks());
        let played_ms = decoded.total_delay() * 10;

        // Never shorter, and never longer by a full tick
        prop_assert!(played_ms >= requested_ms);
        prop_assert!(played_ms < requested_ms + u64::from(millis));
    }
}

#[test]
fn short_holds_at_odd_tick_length_keep_total_time() {
    let mut screen = screen(16, 10);
    let mut recorder = FrameRecorder::default();
    for i in 0..10 {
        screen.write(if i % 2 == 0 { "a" } else { "b" });
        recorder.hold(&screen, 1).unwrap();
    }

    let decoded = encode(&recorder, TickScale::from_millis(15));
    assert_eq!(decoded.frames.len(), 10);
    assert_eq!(decoded.total_delay() * 10, 150);
}
