//! Laziness integration tests.
//!
//! Building layers must not touch pixel data. Planes are loaded only when a
//! layer (or one of its chunks) is evaluated, and only the planes that layer
//! covers.

use cellphy_reader::layer::LayerBuilder;
use cellphy_reader::PathInput;

use super::test_utils::{named_image, pixel_value, source_with, HEIGHT, WIDTH};

#[test]
fn test_build_loads_nothing() {
    let image = named_image(3, 2, 4);
    let builder = LayerBuilder::new(source_with("tz.czi", image.clone()));

    let layers = builder.build(&PathInput::from("tz.czi")).unwrap();
    assert_eq!(layers.len(), 2);
    assert_eq!(image.planes_loaded(), 0);
}

#[test]
fn test_compute_loads_only_own_channel() {
    let image = named_image(3, 2, 4);
    let builder = LayerBuilder::new(source_with("tz.czi", image.clone()));
    let layers = builder.build(&PathInput::from("tz.czi")).unwrap();

    layers[0].data.compute().unwrap();
    assert_eq!(image.planes_loaded(), 3 * 4);

    layers[1].data.compute().unwrap();
    assert_eq!(image.planes_loaded(), 2 * 3 * 4);
}

#[test]
fn test_plane_layer_loads_single_plane() {
    let image = named_image(1, 3, 1);
    let builder = LayerBuilder::new(source_with("p.czi", image.clone()));
    let layers = builder.build(&PathInput::from("p.czi")).unwrap();

    let data = layers[2].data.compute().unwrap();
    assert_eq!(image.planes_loaded(), 1);
    assert_eq!(data[[1, 3]], pixel_value(0, 2, 0, 1, 3));
}

#[test]
fn test_chunk_grid_is_one_plane_per_chunk() {
    let image = named_image(3, 2, 4);
    let builder = LayerBuilder::new(source_with("tz.czi", image.clone()));
    let layers = builder.build(&PathInput::from("tz.czi")).unwrap();

    let chunks = layers[0].data.chunks();
    assert_eq!(chunks.len(), 12);
    for chunk in &chunks {
        assert_eq!(chunk.shape(), &[1, 1, HEIGHT, WIDTH]);
    }
    assert_eq!(image.planes_loaded(), 0);
}

#[test]
fn test_single_chunk_load() {
    let image = named_image(3, 2, 4);
    let builder = LayerBuilder::new(source_with("tz.czi", image.clone()));
    let layers = builder.build(&PathInput::from("tz.czi")).unwrap();

    let chunks = layers[1].data.chunks();
    let chunk = chunks
        .iter()
        .find(|c| c.offset() == [2, 3, 0, 0])
        .expect("chunk at t=2, z=3");

    let data = chunk.load().unwrap();
    assert_eq!(image.planes_loaded(), 1);
    assert_eq!(data.shape(), &[1, 1, HEIGHT, WIDTH]);
    assert_eq!(data[[0, 0, 4, 7]], pixel_value(2, 1, 3, 4, 7));
}

#[test]
fn test_optimized_graph_drops_other_channels() {
    let builder = LayerBuilder::new(source_with("tz.czi", named_image(3, 5, 4)));
    let layers = builder.build(&PathInput::from("tz.czi")).unwrap();

    // One stack per time point over that channel's planes
    for layer in &layers {
        assert_eq!(layer.data.node_count(), 1 + 3 * (1 + 4));
    }

    let builder = LayerBuilder::new(source_with("p.czi", named_image(1, 5, 1)));
    for layer in builder.build(&PathInput::from("p.czi")).unwrap() {
        assert_eq!(layer.data.node_count(), 1);
    }
}

#[test]
fn test_repeated_compute_reloads() {
    let image = named_image(2, 1, 1);
    let builder = LayerBuilder::new(source_with("t.lif", image.clone()));
    let layers = builder.build(&PathInput::from("t.lif")).unwrap();

    let first = layers[0].data.compute().unwrap();
    let second = layers[0].data.compute().unwrap();
    assert_eq!(first, second);
    assert_eq!(image.planes_loaded(), 4);
}

#[test]
fn test_long_time_series_graph_is_linear() {
    let image = named_image(200, 4, 3);
    let builder = LayerBuilder::new(source_with("long.lif", image.clone()));
    let layers = builder.build(&PathInput::from("long.lif")).unwrap();

    assert_eq!(layers.len(), 4);
    for layer in &layers {
        assert_eq!(layer.data.shape(), &[200, 3, HEIGHT, WIDTH]);
        // Time stack over one depth stack of three planes per time point
        assert_eq!(layer.data.node_count(), 1 + 200 * (1 + 3));
        assert_eq!(layer.data.chunks().len(), 200 * 3);
    }
    assert_eq!(image.planes_loaded(), 0);
}
