//! Python bindings for the ssdbox anchor and suppression library.
//!
//! Anchors come back as `float32` arrays of shape `(N, 4)` holding
//! `[x_center, y_center, w, h]`; suppression takes corner boxes and scores and
//! returns kept indices.

use numpy::{PyArray1, PyArray2, PyArrayMethods, PyReadonlyArray1, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use ssdbox::{
    generate_anchors, suppress_batch_par, suppress_indices, AnchorConfig as RustAnchorConfig,
    NmsConfig, Point, ScoredRegion, SsdBoxError,
};

/// Convert an SsdBoxError to a Python exception.
fn to_py_err(err: SsdBoxError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Anchor configuration of an SSD-style detector.
#[pyclass]
#[derive(Clone)]
pub struct AnchorConfig {
    inner: RustAnchorConfig,
}

#[pymethods]
impl AnchorConfig {
    /// Create a new AnchorConfig.
    ///
    /// Args:
    ///     strides: Per-layer strides; consecutive equal values share a feature map
    ///     aspect_ratios: Aspect ratios emitted for every stride (default: [1.0])
    ///     min_scale: Scale of the first stride (default: 0.1)
    ///     max_scale: Scale of the last stride (default: 0.75)
    ///     input_size_width: Network input width (default: 128)
    ///     input_size_height: Network input height (default: 128)
    ///     anchor_offset_x: Center offset inside a cell (default: 0.5)
    ///     anchor_offset_y: Center offset inside a cell (default: 0.5)
    ///     reduce_boxes_in_lowest_layer: Predefined types for the first stride (default: False)
    ///     interpolated_scale_aspect_ratio: Extra anchor ratio, <= 0 disables (default: 1.0)
    ///     fixed_anchor_size: Emit unit-size anchors (default: False)
    ///     feature_map_width: Explicit grid widths per merged layer (default: [])
    ///     feature_map_height: Explicit grid heights per merged layer (default: [])
    #[new]
    #[pyo3(signature = (
        strides,
        aspect_ratios = vec![1.0],
        min_scale = 0.1,
        max_scale = 0.75,
        input_size_width = 128,
        input_size_height = 128,
        anchor_offset_x = 0.5,
        anchor_offset_y = 0.5,
        reduce_boxes_in_lowest_layer = false,
        interpolated_scale_aspect_ratio = 1.0,
        fixed_anchor_size = false,
        feature_map_width = Vec::new(),
        feature_map_height = Vec::new()
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
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
    ) -> PyResult<Self> {
        let inner = RustAnchorConfig {
            strides,
            aspect_ratios,
            min_scale,
            max_scale,
            input_size_width,
            input_size_height,
            anchor_offset_x,
            anchor_offset_y,
            reduce_boxes_in_lowest_layer,
            interpolated_scale_aspect_ratio,
            fixed_anchor_size,
            feature_map_width,
            feature_map_height,
        };
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// BlazeFace front camera anchors (896).
    #[staticmethod]
    fn blazeface_front() -> Self {
        Self {
            inner: RustAnchorConfig::blazeface_front(),
        }
    }

    /// BlazeFace back camera anchors (896).
    #[staticmethod]
    fn blazeface_back() -> Self {
        Self {
            inner: RustAnchorConfig::blazeface_back(),
        }
    }

    /// BlazePose detector anchors (2254).
    #[staticmethod]
    fn blazepose_detector() -> Self {
        Self {
            inner: RustAnchorConfig::blazepose_detector(),
        }
    }

    /// SSD MobileNet 320x320 anchors (2034).
    #[staticmethod]
    fn ssd_mobilenet_320() -> Self {
        Self {
            inner: RustAnchorConfig::ssd_mobilenet_320(),
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> PyResult<()> {
        self.inner.validate().map_err(to_py_err)
    }

    /// Number of anchors `generate_anchors` will return.
    #[getter]
    fn num_anchors(&self) -> usize {
        self.inner.num_anchors()
    }

    /// Merged layers as `(stride, grid_width, grid_height, anchor_types, offset)` tuples.
    fn layers(&self) -> Vec<(usize, usize, usize, usize, usize)> {
        self.inner
            .layers()
            .iter()
            .map(|l| {
                (
                    l.stride,
                    l.grid_width,
                    l.grid_height,
                    l.anchor_types.len(),
                    l.offset,
                )
            })
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "AnchorConfig(strides={:?}, aspect_ratios={:?}, min_scale={}, max_scale={}, input_size=({}, {}), num_anchors={})",
            self.inner.strides,
            self.inner.aspect_ratios,
            self.inner.min_scale,
            self.inner.max_scale,
            self.inner.input_size_width,
            self.inner.input_size_height,
            self.inner.num_anchors()
        )
    }
}

/// Generate the anchor lattice for a configuration.
///
/// Returns:
///     float32 array of shape (N, 4) with [x_center, y_center, w, h] rows
#[pyfunction]
#[pyo3(name = "generate_anchors")]
fn py_generate_anchors<'py>(
    py: Python<'py>,
    config: &AnchorConfig,
) -> PyResult<Bound<'py, PyArray2<f32>>> {
    let anchors = generate_anchors(&config.inner);
    let rows = anchors.len();
    let flat: Vec<f32> = anchors
        .iter()
        .flat_map(|a| [a.x_center, a.y_center, a.w, a.h])
        .collect();
    PyArray1::from_vec(py, flat).reshape([rows, 4])
}

fn regions_from_arrays(
    boxes: &PyReadonlyArray2<'_, f32>,
    scores: &PyReadonlyArray1<'_, f32>,
) -> PyResult<Vec<ScoredRegion<usize>>> {
    let boxes = boxes.as_array();
    let scores = scores.as_array();
    if boxes.ncols() != 4 {
        return Err(PyValueError::new_err("boxes must have shape (N, 4)"));
    }
    if boxes.nrows() != scores.len() {
        return Err(PyValueError::new_err(
            "boxes and scores must have the same length",
        ));
    }
    Ok((0..boxes.nrows())
        .map(|i| {
            ScoredRegion::new(
                Point::new(boxes[[i, 0]], boxes[[i, 1]]),
                Point::new(boxes[[i, 2]], boxes[[i, 3]]),
                scores[i],
                i,
            )
        })
        .collect())
}

fn nms_config(iou_threshold: f32, max_count: usize) -> PyResult<NmsConfig> {
    let config = NmsConfig {
        iou_threshold,
        max_count,
    };
    config.validate().map_err(to_py_err)?;
    Ok(config)
}

/// Greedy non-maximum suppression.
///
/// Args:
///     boxes: float32 array (N, 4) of [x0, y0, x1, y1] corners, any order
///     scores: float32 array (N,)
///     iou_threshold: Drop a box when IoU with a kept box reaches this (default: 0.3)
///     max_count: Maximum number of kept boxes (default: 100)
///
/// Returns:
///     Indices of kept boxes, best score first
#[pyfunction]
#[pyo3(signature = (boxes, scores, iou_threshold = 0.3, max_count = 100))]
fn non_max_suppression(
    boxes: PyReadonlyArray2<'_, f32>,
    scores: PyReadonlyArray1<'_, f32>,
    iou_threshold: f32,
    max_count: usize,
) -> PyResult<Vec<usize>> {
    let config = nms_config(iou_threshold, max_count)?;
    let regions = regions_from_arrays(&boxes, &scores)?;
    Ok(suppress_indices(
        &regions,
        config.iou_threshold,
        config.max_count,
    ))
}

/// Suppress several independent frames in parallel.
///
/// Args:
///     frames: list of (boxes, scores) pairs as for `non_max_suppression`
///
/// Returns:
///     One list of kept indices per frame
#[pyfunction]
#[pyo3(signature = (frames, iou_threshold = 0.3, max_count = 100))]
fn non_max_suppression_batch(
    frames: Vec<(PyReadonlyArray2<'_, f32>, PyReadonlyArray1<'_, f32>)>,
    iou_threshold: f32,
    max_count: usize,
) -> PyResult<Vec<Vec<usize>>> {
    let config = nms_config(iou_threshold, max_count)?;
    let regions = frames
        .iter()
        .map(|(boxes, scores)| regions_from_arrays(boxes, scores))
        .collect::<PyResult<Vec<_>>>()?;
    let kept = suppress_batch_par(&regions, &config);
    Ok(kept
        .into_iter()
        .map(|frame| frame.into_iter().map(|r| r.payload).collect())
        .collect())
}

/// Intersection over union of two [x0, y0, x1, y1] boxes.
#[pyfunction]
fn calc_iou(a: [f32; 4], b: [f32; 4]) -> f32 {
    let a = ScoredRegion::from_corners(a[0], a[1], a[2], a[3], 0.0);
    let b = ScoredRegion::from_corners(b[0], b[1], b[2], b[3], 0.0);
    ssdbox::calc_iou(&a, &b)
}

/// Python module for ssdbox.
#[pymodule]
fn _ssdbox(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<AnchorConfig>()?;
    m.add_function(wrap_pyfunction!(py_generate_anchors, m)?)?;
    m.add_function(wrap_pyfunction!(non_max_suppression, m)?)?;
    m.add_function(wrap_pyfunction!(non_max_suppression_batch, m)?)?;
    m.add_function(wrap_pyfunction!(calc_iou, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
