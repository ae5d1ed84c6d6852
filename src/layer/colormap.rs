//! Channel colormap palette.

/// Colormaps assigned to channels in order, wrapping around.
pub const COLORMAPS: [&str; 5] = ["bop purple", "bop orange", "bop blue", "green", "blue"];

/// Colormap for the channel at `index`.
pub const fn colormap_for_channel(index: usize) -> &'static str {
    COLORMAPS[index % COLORMAPS.len()]
}
