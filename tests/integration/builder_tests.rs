//! Layer builder integration tests.
//!
//! Tests verify:
//! - Array dimensionality and scale vectors for every time/depth layout
//! - One layer per channel, in channel order, with cycling colormaps
//! - Single-channel naming under both policies
//! - Display metadata constants
//! - Evaluated layer data matches the source planes

use cellphy_reader::config::{ReaderConfig, SingleChannelNaming};
use cellphy_reader::error::{ImageError, ReaderError};
use cellphy_reader::layer::{LayerBuilder, LayerKind, COLORMAPS};
use cellphy_reader::PathInput;

use super::test_utils::{
    named_image, pixel_value, source_with, synthetic_image, CorruptSource, HEIGHT, PIXEL_SIZES,
    WIDTH,
};

const PX: f64 = PIXEL_SIZES.x;
const PY: f64 = PIXEL_SIZES.y;
const PZ: f64 = PIXEL_SIZES.z;

// =============================================================================
// Single Channel
// =============================================================================

#[test]
fn test_single_channel_plane() {
    let builder = LayerBuilder::new(source_with("plane.czi", synthetic_image(1, 1, 1, &["DAPI"])));
    let layers = builder.build(&PathInput::from("plane.czi")).unwrap();

    assert_eq!(layers.len(), 1);
    let layer = &layers[0];
    assert_eq!(layer.data.ndim(), 2);
    assert_eq!(layer.data.shape(), &[HEIGHT, WIDTH]);
    assert_eq!(layer.metadata.scale, vec![PY, PX]);
    assert_eq!(layer.metadata.colormap, COLORMAPS[0]);
}

#[test]
fn test_single_channel_time_volume_name_is_unset() {
    // The single-channel branch never binds a channel name; pin that
    let builder = LayerBuilder::new(source_with("tz.lif", synthetic_image(4, 1, 3, &["DAPI"])));
    let layers = builder.build(&PathInput::from("tz.lif")).unwrap();

    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].name(), "");
    assert_eq!(layers[0].data.shape(), &[4, 3, HEIGHT, WIDTH]);
    assert_eq!(layers[0].metadata.scale, vec![1.0, PZ, PY, PX]);
}

#[test]
fn test_single_channel_named_when_configured() {
    let config =
        ReaderConfig::default().with_single_channel_naming(SingleChannelNaming::ChannelName);
    let builder = LayerBuilder::with_config(
        source_with("tz.lif", synthetic_image(4, 1, 3, &["DAPI"])),
        config,
    );
    let layers = builder.build(&PathInput::from("tz.lif")).unwrap();

    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].name(), "DAPI");
}

#[test]
fn test_single_channel_time_series() {
    let builder = LayerBuilder::new(source_with("t.czi", synthetic_image(5, 1, 1, &["GFP"])));
    let layers = builder.build(&PathInput::from("t.czi")).unwrap();

    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].data.shape(), &[5, HEIGHT, WIDTH]);
    assert_eq!(layers[0].metadata.scale, vec![1.0, PY, PX]);
}

// =============================================================================
// Multiple Channels
// =============================================================================

#[test]
fn test_three_channel_plane_colormaps() {
    let builder = LayerBuilder::new(source_with("rgb.czi", named_image(1, 3, 1)));
    let layers = builder.build(&PathInput::from("rgb.czi")).unwrap();

    assert_eq!(layers.len(), 3);
    let names: Vec<_> = layers.iter().map(|l| l.name()).collect();
    assert_eq!(names, vec!["ch0", "ch1", "ch2"]);

    let colormaps: Vec<_> = layers.iter().map(|l| l.metadata.colormap.as_str()).collect();
    assert_eq!(colormaps, vec![COLORMAPS[0], COLORMAPS[1], COLORMAPS[2]]);

    for layer in &layers {
        assert_eq!(layer.data.shape(), &[HEIGHT, WIDTH]);
        assert_eq!(layer.metadata.scale, vec![PY, PX]);
    }
}

#[test]
fn test_two_channel_time_series() {
    let builder = LayerBuilder::new(source_with("ts.lif", named_image(5, 2, 1)));
    let layers = builder.build(&PathInput::from("ts.lif")).unwrap();

    assert_eq!(layers.len(), 2);
    for layer in &layers {
        assert_eq!(layer.data.ndim(), 3);
        assert_eq!(layer.data.shape()[0], 5);
        assert_eq!(layer.metadata.scale, vec![1.0, PY, PX]);
    }
}

#[test]
fn test_two_channel_volume() {
    let builder = LayerBuilder::new(source_with("z.czi", named_image(1, 2, 7)));
    let layers = builder.build(&PathInput::from("z.czi")).unwrap();

    assert_eq!(layers.len(), 2);
    for layer in &layers {
        assert_eq!(layer.data.shape(), &[7, HEIGHT, WIDTH]);
        assert_eq!(layer.metadata.scale, vec![PZ, PY, PX]);
    }
}

#[test]
fn test_two_channel_time_volume() {
    let builder = LayerBuilder::new(source_with("tz.czi", named_image(3, 2, 4)));
    let layers = builder.build(&PathInput::from("tz.czi")).unwrap();

    assert_eq!(layers.len(), 2);
    for layer in &layers {
        assert_eq!(layer.data.shape(), &[3, 4, HEIGHT, WIDTH]);
        assert_eq!(layer.metadata.scale, vec![1.0, PZ, PY, PX]);
    }
}

#[test]
fn test_colormaps_cycle_past_palette() {
    let builder = LayerBuilder::new(source_with("many.czi", named_image(1, 12, 1)));
    let layers = builder.build(&PathInput::from("many.czi")).unwrap();

    assert_eq!(layers.len(), 12);
    for (i, layer) in layers.iter().enumerate() {
        assert_eq!(layer.metadata.colormap, COLORMAPS[i % COLORMAPS.len()]);
    }
}

#[test]
fn test_scale_length_matches_ndim() {
    for (t, z) in [(1, 1), (1, 3), (4, 1), (4, 3)] {
        let builder = LayerBuilder::new(source_with("x.czi", named_image(t, 2, z)));
        for layer in builder.build(&PathInput::from("x.czi")).unwrap() {
            assert_eq!(layer.metadata.scale.len(), layer.data.ndim(), "t={} z={}", t, z);
        }
    }
}

// =============================================================================
// Metadata
// =============================================================================

#[test]
fn test_display_metadata_constants() {
    let builder = LayerBuilder::new(source_with("m.czi", named_image(1, 2, 1)));
    for layer in builder.build(&PathInput::from("m.czi")).unwrap() {
        assert_eq!(layer.metadata.blending.as_str(), "additive");
        assert_eq!(layer.metadata.rendering.as_str(), "mip");
        assert_eq!(layer.kind, LayerKind::Image);

        let json = layer.metadata.to_json().unwrap();
        assert_eq!(json["blending"], "additive");
        assert_eq!(json["rendering"], "mip");
        assert_eq!(json["name"], layer.name());
    }
}

#[test]
fn test_builder_is_deterministic() {
    let builder = LayerBuilder::new(source_with("d.lif", named_image(2, 4, 2)));
    let first = builder.build(&PathInput::from("d.lif")).unwrap();
    let second = builder.build(&PathInput::from("d.lif")).unwrap();

    let meta = |layers: &[cellphy_reader::LayerData]| {
        layers.iter().map(|l| l.metadata.clone()).collect::<Vec<_>>()
    };
    assert_eq!(meta(&first), meta(&second));
}

// =============================================================================
// Data
// =============================================================================

#[test]
fn test_time_volume_data_matches_source() {
    let builder = LayerBuilder::new(source_with("tz.czi", named_image(3, 2, 4)));
    let layers = builder.build(&PathInput::from("tz.czi")).unwrap();

    let data = layers[1].data.compute().unwrap();
    for t in 0..3 {
        for z in 0..4 {
            assert_eq!(data[[t, z, 2, 5]], pixel_value(t, 1, z, 2, 5));
        }
    }
}

#[test]
fn test_time_series_data_uses_first_plane() {
    let builder = LayerBuilder::new(source_with("ts.czi", named_image(4, 2, 1)));
    let layers = builder.build(&PathInput::from("ts.czi")).unwrap();

    let data = layers[0].data.compute().unwrap();
    assert_eq!(data[[3, 0, 0]], pixel_value(3, 0, 0, 0, 0));
    assert_eq!(data[[2, HEIGHT - 1, WIDTH - 1]], pixel_value(2, 0, 0, HEIGHT - 1, WIDTH - 1));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_corrupt_file_propagates() {
    let builder = LayerBuilder::new(CorruptSource);
    let err = builder.build(&PathInput::from("broken.czi")).unwrap_err();

    assert!(matches!(
        err,
        ReaderError::Image(ImageError::Corrupt { ref path, .. }) if path == "broken.czi"
    ));
}

#[test]
fn test_missing_file_propagates() {
    let builder = LayerBuilder::new(source_with("present.czi", named_image(1, 1, 1)));
    let err = builder.build(&PathInput::from("absent.czi")).unwrap_err();
    assert_eq!(
        err,
        ReaderError::Image(ImageError::NotFound("absent.czi".to_string()))
    );
}

#[test]
fn test_zero_depth_is_not_guarded() {
    let builder = LayerBuilder::new(source_with("flat.czi", named_image(1, 2, 0)));
    assert!(builder.build(&PathInput::from("flat.czi")).is_err());
}

#[test]
fn test_multi_channel_without_names_yields_no_layers() {
    let builder = LayerBuilder::new(source_with("anon.czi", synthetic_image(1, 3, 1, &[])));
    let layers = builder.build(&PathInput::from("anon.czi")).unwrap();
    assert!(layers.is_empty());
}

#[test]
fn test_more_names_than_channels_fails() {
    let builder = LayerBuilder::new(source_with(
        "extra.czi",
        synthetic_image(1, 2, 1, &["DAPI", "GFP", "RFP"]),
    ));
    let err = builder.build(&PathInput::from("extra.czi")).unwrap_err();

    assert_eq!(
        err,
        ReaderError::Image(ImageError::SelectionOutOfBounds {
            dim: 'C',
            index: 2,
            size: 2
        })
    );
}
