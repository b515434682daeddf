use clap::Parser;
use serde::{Deserialize, Serialize};
use ssdbox::{
    generate_anchors, suppress_with, AnchorConfig, AnchorLayer, NmsConfig, Point, ScoredRegion,
};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "ssdbox CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PresetConfig {
    BlazefaceFront,
    BlazefaceBack,
    BlazeposeDetector,
    #[serde(rename = "ssd_mobilenet_320")]
    SsdMobilenet320,
}

impl From<PresetConfig> for AnchorConfig {
    fn from(value: PresetConfig) -> Self {
        match value {
            PresetConfig::BlazefaceFront => AnchorConfig::blazeface_front(),
            PresetConfig::BlazefaceBack => AnchorConfig::blazeface_back(),
            PresetConfig::BlazeposeDetector => AnchorConfig::blazepose_detector(),
            PresetConfig::SsdMobilenet320 => AnchorConfig::ssd_mobilenet_320(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct AnchorConfigJson {
    strides: Vec<usize>,
    aspect_ratios: Vec<f32>,
    min_scale: f32,
    max_scale: f32,
    input_size_width: usize,
    input_size_height: usize,
    anchor_offset_x: f32,
    anchor_offset_y: f32,
    reduce_boxes_in_lowest_layer: bool,
    interpolated_scale_aspect_ratio: f32,
    fixed_anchor_size: bool,
    feature_map_width: Vec<usize>,
    feature_map_height: Vec<usize>,
}

impl Default for AnchorConfigJson {
    fn default() -> Self {
        let cfg = AnchorConfig::default();
        Self {
            strides: cfg.strides,
            aspect_ratios: cfg.aspect_ratios,
            min_scale: cfg.min_scale,
            max_scale: cfg.max_scale,
            input_size_width: cfg.input_size_width,
            input_size_height: cfg.input_size_height,
            anchor_offset_x: cfg.anchor_offset_x,
            anchor_offset_y: cfg.anchor_offset_y,
            reduce_boxes_in_lowest_layer: cfg.reduce_boxes_in_lowest_layer,
            interpolated_scale_aspect_ratio: cfg.interpolated_scale_aspect_ratio,
            fixed_anchor_size: cfg.fixed_anchor_size,
            feature_map_width: cfg.feature_map_width,
            feature_map_height: cfg.feature_map_height,
        }
    }
}

impl From<AnchorConfigJson> for AnchorConfig {
    fn from(value: AnchorConfigJson) -> Self {
        Self {
            strides: value.strides,
            aspect_ratios: value.aspect_ratios,
            min_scale: value.min_scale,
            max_scale: value.max_scale,
            input_size_width: value.input_size_width,
            input_size_height: value.input_size_height,
            anchor_offset_x: value.anchor_offset_x,
            anchor_offset_y: value.anchor_offset_y,
            reduce_boxes_in_lowest_layer: value.reduce_boxes_in_lowest_layer,
            interpolated_scale_aspect_ratio: value.interpolated_scale_aspect_ratio,
            fixed_anchor_size: value.fixed_anchor_size,
            feature_map_width: value.feature_map_width,
            feature_map_height: value.feature_map_height,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct NmsConfigJson {
    iou_threshold: f32,
    max_count: usize,
}

impl Default for NmsConfigJson {
    fn default() -> Self {
        let cfg = NmsConfig::default();
        Self {
            iou_threshold: cfg.iou_threshold,
            max_count: cfg.max_count,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    preset: Option<PresetConfig>,
    anchors: AnchorConfigJson,
    emit_anchors: bool,
    regions_path: Option<String>,
    nms: NmsConfigJson,
    output_path: Option<String>,
}

/// Region as read from and written to JSON; the payload is carried verbatim.
#[derive(Debug, Deserialize, Serialize)]
struct RegionRecord {
    topleft: [f32; 2],
    btmright: [f32; 2],
    score: f32,
    #[serde(default)]
    payload: serde_json::Value,
}

impl From<RegionRecord> for ScoredRegion<serde_json::Value> {
    fn from(value: RegionRecord) -> Self {
        ScoredRegion::new(
            Point::new(value.topleft[0], value.topleft[1]),
            Point::new(value.btmright[0], value.btmright[1]),
            value.score,
            value.payload,
        )
    }
}

impl From<ScoredRegion<serde_json::Value>> for RegionRecord {
    fn from(value: ScoredRegion<serde_json::Value>) -> Self {
        Self {
            topleft: [value.topleft.x, value.topleft.y],
            btmright: [value.btmright.x, value.btmright.y],
            score: value.score,
            payload: value.payload,
        }
    }
}

#[derive(Debug, Serialize)]
struct LayerRecord {
    stride: usize,
    first_stride_index: usize,
    num_strides: usize,
    grid_width: usize,
    grid_height: usize,
    anchor_types: usize,
    offset: usize,
}

impl From<&AnchorLayer> for LayerRecord {
    fn from(value: &AnchorLayer) -> Self {
        Self {
            stride: value.stride,
            first_stride_index: value.first_stride_index,
            num_strides: value.num_strides,
            grid_width: value.grid_width,
            grid_height: value.grid_height,
            anchor_types: value.anchor_types.len(),
            offset: value.offset,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    num_anchors: usize,
    layers: Vec<LayerRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    anchors: Option<Vec<[f32; 4]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detections: Option<Vec<RegionRecord>>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env()
                    .add_directive("ssdbox=info".parse()?)
                    .add_directive("ssdbox_cli=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;

    let anchor_config: AnchorConfig = match config.preset {
        Some(preset) => preset.into(),
        None => config.anchors.into(),
    };
    anchor_config.validate()?;
    let nms_config = NmsConfig {
        iou_threshold: config.nms.iou_threshold,
        max_count: config.nms.max_count,
    };
    nms_config.validate()?;

    let layers = anchor_config.layers();
    let anchors = generate_anchors(&anchor_config);
    tracing::info!(anchors = anchors.len(), layers = layers.len(), "anchors ready");

    let detections = match &config.regions_path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            let records: Vec<RegionRecord> = serde_json::from_str(&text)?;
            let regions: Vec<ScoredRegion<serde_json::Value>> =
                records.into_iter().map(ScoredRegion::from).collect();
            let kept = suppress_with(&regions, &nms_config);
            tracing::info!(candidates = regions.len(), kept = kept.len(), "regions suppressed");
            Some(kept.into_iter().map(RegionRecord::from).collect())
        }
        None => None,
    };

    let output = Output {
        num_anchors: anchors.len(),
        layers: layers.iter().map(LayerRecord::from).collect(),
        anchors: config
            .emit_anchors
            .then(|| anchors.iter().map(|a| [a.x_center, a.y_center, a.w, a.h]).collect()),
        detections,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
