//! Typed filter-graph construction for GIF encoding
//!
//! Graphs are assembled as ordered chains of typed [`Filter`] stages and only
//! rendered to ffmpeg's `-filter_complex` syntax at the process boundary.
//! Building a graph performs no I/O and cannot fail.

use std::fmt;

use crate::domain::model::FilterVariant;

/// Label of the first video stream of the first input
const INPUT_VIDEO: &str = "0:v";

/// Output intent for one GIF encode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GifIntent {
    pub motion_highlight: bool,
    pub fps: u32,
    pub width: u32,
}

/// Resampling kernel used when scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resampler {
    Lanczos,
}

/// Palette statistics mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsMode {
    /// Palette computed over every frame of the clip
    Full,
}

/// Dithering applied when mapping to the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dither {
    FloydSteinberg,
}

/// Pixel formats the graph converts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgba,
}

/// One filter stage with typed parameters
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Resample to a fixed frame rate
    Fps { fps: u32 },
    /// Scale to a width, height follows the aspect ratio
    Scale { width: u32, resampler: Resampler },
    /// Duplicate the stream
    Split { outputs: u8 },
    /// Absolute difference between consecutive frames
    TemporalDifference,
    /// Contrast curve applied to all channels, as `(input, output)` points
    Curves { points: Vec<(f32, f32)> },
    /// Pixel format conversion
    Format { pixel_format: PixelFormat },
    /// Make pixels near `color` transparent
    ColorKey { color: &'static str, similarity: f32, blend: f32 },
    /// Per-channel gain, used to tint the motion mask
    Recolor { red: f32, green: f32, blue: f32, alpha: f32 },
    /// Alpha-composite the second input over the first
    Overlay,
    /// Adaptive palette generation
    PaletteGen { max_colors: u16, stats_mode: StatsMode },
    /// Palette application
    PaletteUse { dither: Dither },
}

impl Filter {
    /// ffmpeg filter name
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Fps { .. } => "fps",
            Filter::Scale { .. } => "scale",
            Filter::Split { .. } => "split",
            Filter::TemporalDifference => "tblend",
            Filter::Curves { .. } => "curves",
            Filter::Format { .. } => "format",
            Filter::ColorKey { .. } => "colorkey",
            Filter::Recolor { .. } => "colorchannelmixer",
            Filter::Overlay => "overlay",
            Filter::PaletteGen { .. } => "palettegen",
            Filter::PaletteUse { .. } => "paletteuse",
        }
    }

    fn arguments(&self) -> String {
        match self {
            Filter::Fps { fps } => fps.to_string(),
            Filter::Scale { width, resampler } => {
                let flags = match resampler {
                    Resampler::Lanczos => "lanczos",
                };
                format!("{}:-1:flags={}", width, flags)
            }
            Filter::Split { outputs } => outputs.to_string(),
            Filter::TemporalDifference => "all_mode=difference".to_string(),
            Filter::Curves { points } => {
                let points = points
                    .iter()
                    .map(|(input, output)| format!("{}/{}", input, output))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("all='{}'", points)
            }
            Filter::Format { pixel_format } => match pixel_format {
                PixelFormat::Rgba => "rgba".to_string(),
            },
            Filter::ColorKey { color, similarity, blend } => format!(
                "color={}:similarity={}:blend={}",
                color, similarity, blend
            ),
            Filter::Recolor { red, green, blue, alpha } => format!(
                "rr={}:gg={}:bb={}:aa={}",
                red, green, blue, alpha
            ),
            Filter::Overlay => "format=auto".to_string(),
            Filter::PaletteGen { max_colors, stats_mode } => {
                let mode = match stats_mode {
                    StatsMode::Full => "full",
                };
                format!("max_colors={}:stats_mode={}", max_colors, mode)
            }
            Filter::PaletteUse { dither } => {
                let dither = match dither {
                    Dither::FloydSteinberg => "floyd_steinberg",
                };
                format!("dither={}", dither)
            }
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name(), self.arguments())
    }
}

/// Linear chain of filters between labeled pads
#[derive(Debug, Clone, PartialEq)]
pub struct FilterChain {
    pub inputs: Vec<String>,
    pub filters: Vec<Filter>,
    pub outputs: Vec<String>,
}

impl FilterChain {
    fn new(inputs: &[&str], filters: Vec<Filter>, outputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            filters,
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for input in &self.inputs {
            write!(f, "[{}]", input)?;
        }
        let filters = self
            .filters
            .iter()
            .map(|filter| filter.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{}", filters)?;
        for output in &self.outputs {
            write!(f, "[{}]", output)?;
        }
        Ok(())
    }
}

/// Complete filter graph plus the variant it implements
#[derive(Debug, Clone, PartialEq)]
pub struct FilterGraph {
    variant: FilterVariant,
    chains: Vec<FilterChain>,
}

impl FilterGraph {
    pub fn variant(&self) -> FilterVariant {
        self.variant
    }

    pub fn chains(&self) -> &[FilterChain] {
        &self.chains
    }

    /// Filter names in application order
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.chains
            .iter()
            .flat_map(|chain| chain.filters.iter().map(Filter::name))
            .collect()
    }

    /// Render to ffmpeg `-filter_complex` syntax
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FilterGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chains = self
            .chains
            .iter()
            .map(|chain| chain.to_string())
            .collect::<Vec<_>>()
            .join(";");
        write!(f, "{}", chains)
    }
}

/// Builds palette-optimized GIF graphs, with an optional motion-highlight overlay.
///
/// The motion highlight is a frame-difference heuristic: regions that changed
/// between consecutive frames are tinted and composited back over the clip. It
/// has no notion of what moved.
pub struct FilterGraphBuilder;

impl FilterGraphBuilder {
    /// Palette size for GIF output
    pub const MAX_COLORS: u16 = 256;

    /// Build the graph for an output intent
    pub fn build(intent: &GifIntent) -> FilterGraph {
        if intent.motion_highlight {
            Self::motion_highlighted(intent.fps, intent.width)
        } else {
            Self::standard(intent.fps, intent.width)
        }
    }

    /// fps -> scale -> palettegen -> paletteuse
    pub fn standard(fps: u32, width: u32) -> FilterGraph {
        let mut chains = vec![FilterChain::new(
            &[INPUT_VIDEO],
            vec![
                Filter::Fps { fps },
                Self::scale(width),
                Filter::Split { outputs: 2 },
            ],
            &["s0", "s1"],
        )];
        chains.extend(Self::palette_chains());

        FilterGraph {
            variant: FilterVariant::Standard,
            chains,
        }
    }

    /// Standard graph with a tinted frame-difference layer composited in
    /// before palette generation.
    pub fn motion_highlighted(fps: u32, width: u32) -> FilterGraph {
        let mut chains = vec![
            FilterChain::new(
                &[INPUT_VIDEO],
                vec![
                    Filter::Fps { fps },
                    Self::scale(width),
                    Filter::Split { outputs: 2 },
                ],
                &["base", "motion"],
            ),
            FilterChain::new(
                &["motion"],
                vec![
                    Filter::TemporalDifference,
                    Filter::Curves {
                        points: vec![(0.0, 0.0), (0.15, 0.0), (0.35, 1.0), (1.0, 1.0)],
                    },
                    Filter::Format {
                        pixel_format: PixelFormat::Rgba,
                    },
                    Filter::ColorKey {
                        color: "black",
                        similarity: 0.3,
                        blend: 0.1,
                    },
                    Filter::Recolor {
                        red: 1.0,
                        green: 0.85,
                        blue: 0.0,
                        alpha: 0.8,
                    },
                ],
                &["highlight"],
            ),
            FilterChain::new(
                &["base", "highlight"],
                vec![Filter::Overlay, Filter::Split { outputs: 2 }],
                &["s0", "s1"],
            ),
        ];
        chains.extend(Self::palette_chains());

        FilterGraph {
            variant: FilterVariant::MotionHighlight,
            chains,
        }
    }

    fn scale(width: u32) -> Filter {
        Filter::Scale {
            width,
            resampler: Resampler::Lanczos,
        }
    }

    /// `[s0]` feeds palette generation, `[s1]` is mapped through the palette
    fn palette_chains() -> Vec<FilterChain> {
        vec![
            FilterChain::new(
                &["s0"],
                vec![Filter::PaletteGen {
                    max_colors: Self::MAX_COLORS,
                    stats_mode: StatsMode::Full,
                }],
                &["palette"],
            ),
            FilterChain::new(
                &["s1", "palette"],
                vec![Filter::PaletteUse {
                    dither: Dither::FloydSteinberg,
                }],
                &[],
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(motion_highlight: bool) -> GifIntent {
        GifIntent {
            motion_highlight,
            fps: 15,
            width: 480,
        }
    }

    #[test]
    fn test_standard_stage_order() {
        let graph = FilterGraphBuilder::build(&intent(false));
        assert_eq!(graph.variant(), FilterVariant::Standard);
        assert_eq!(
            graph.filter_names(),
            vec!["fps", "scale", "split", "palettegen", "paletteuse"]
        );
    }

    #[test]
    fn test_standard_parameters() {
        let graph = FilterGraphBuilder::standard(12, 320);
        let first = &graph.chains()[0];
        assert_eq!(first.inputs, vec!["0:v".to_string()]);
        assert_eq!(first.filters[0], Filter::Fps { fps: 12 });
        assert_eq!(
            first.filters[1],
            Filter::Scale {
                width: 320,
                resampler: Resampler::Lanczos
            }
        );
        assert!(graph.chains().iter().any(|chain| chain.filters.contains(&Filter::PaletteGen {
            max_colors: 256,
            stats_mode: StatsMode::Full
        })));
    }

    #[test]
    fn test_motion_highlight_composites_before_palette() {
        let graph = FilterGraphBuilder::build(&intent(true));
        assert_eq!(graph.variant(), FilterVariant::MotionHighlight);

        let names = graph.filter_names();
        let position = |name: &str| names.iter().position(|n| *n == name).unwrap();
        assert!(position("scale") < position("tblend"));
        assert!(position("tblend") < position("curves"));
        assert!(position("colorkey") < position("colorchannelmixer"));
        assert!(position("overlay") < position("palettegen"));
        assert_eq!(names.last(), Some(&"paletteuse"));
    }

    #[test]
    fn test_motion_overlay_takes_base_and_highlight() {
        let graph = FilterGraphBuilder::motion_highlighted(15, 480);
        let overlay = graph
            .chains()
            .iter()
            .find(|chain| chain.filters.first() == Some(&Filter::Overlay))
            .unwrap();
        assert_eq!(overlay.inputs, vec!["base".to_string(), "highlight".to_string()]);
    }

    #[test]
    fn test_standard_has_no_motion_stages() {
        let names = FilterGraphBuilder::build(&intent(false)).filter_names();
        assert!(!names.contains(&"tblend"));
        assert!(!names.contains(&"overlay"));
    }

    #[test]
    fn test_standard_render() {
        let rendered = FilterGraphBuilder::standard(15, 480).render();
        assert_eq!(
            rendered,
            "[0:v]fps=15,scale=480:-1:flags=lanczos,split=2[s0][s1];\
             [s0]palettegen=max_colors=256:stats_mode=full[palette];\
             [s1][palette]paletteuse=dither=floyd_steinberg"
        );
    }

    #[test]
    fn test_curves_render_quotes_points() {
        let curves = Filter::Curves {
            points: vec![(0.0, 0.0), (0.5, 1.0)],
        };
        assert_eq!(curves.to_string(), "curves=all='0/0 0.5/1'");
    }
}
